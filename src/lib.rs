//! Block Quiz - a Java quiz paired with a falling-block game
//!
//! Core modules:
//! - `sim`: Deterministic block-stack simulation (grid, pieces, penalty quiz)
//! - `quiz`: Topic quiz engine with per-question countdown
//! - `render`: Draw-command sink for a 2D surface
//! - `status`: Push-only status snapshots for the HUD
//! - `input`: Command mapping for keyboard/button input
//! - `leaderboard`: Best topic results, persisted in the browser
//! - `settings`: Data-driven thresholds and timings

pub mod input;
pub mod leaderboard;
pub mod quiz;
pub mod render;
pub mod settings;
pub mod sim;
pub mod status;

pub use leaderboard::Leaderboard;
pub use settings::{Settings, SettingsError};

/// Game configuration constants
pub mod consts {
    /// Grid dimensions (cells)
    pub const BOARD_WIDTH: usize = 10;
    pub const BOARD_HEIGHT: usize = 20;
    /// Pixel size of one cell on the canvas
    pub const TILE_SIZE: u32 = 30;

    /// Time between gravity steps
    pub const GRAVITY_INTERVAL_MS: u64 = 500;
    /// Maximum gravity steps per `tick` call to avoid catch-up storms
    pub const MAX_GRAVITY_STEPS: u32 = 8;

    /// Points per cleared row
    pub const LINE_CLEAR_BONUS: u64 = 10;
    /// Score at which the penalty quiz is triggered
    pub const TARGET_SCORE: u64 = 10;
    /// How far the target moves after each crossing
    pub const TARGET_STEP: u64 = 10;

    /// Topic quiz score needed to unlock the run affordance
    pub const TOPIC_UNLOCK_SCORE: u32 = 16;
    /// Seconds allowed per topic question
    pub const QUESTION_TIME_LIMIT_SECS: u64 = 30;
}
