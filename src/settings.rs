//! Game settings and thresholds
//!
//! Persisted in LocalStorage on the web build. Every gating threshold lives
//! here instead of being baked into the simulation.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Error raised when settings cannot be parsed or are out of range
#[derive(Debug)]
pub enum SettingsError {
    /// Malformed JSON
    Parse(serde_json::Error),
    /// A value that would make the game unplayable
    Invalid(&'static str),
}

impl std::fmt::Display for SettingsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SettingsError::Parse(e) => write!(f, "Failed to parse settings: {}", e),
            SettingsError::Invalid(reason) => write!(f, "Invalid settings: {}", reason),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SettingsError::Parse(e) => Some(e),
            SettingsError::Invalid(_) => None,
        }
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(err: serde_json::Error) -> Self {
        SettingsError::Parse(err)
    }
}

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Board ===
    pub board_width: usize,
    pub board_height: usize,
    /// Canvas pixels per cell
    pub tile_size: u32,

    // === Block stack ===
    /// Milliseconds between gravity steps
    pub gravity_interval_ms: u64,
    /// Points per cleared row
    pub line_clear_bonus: u64,
    /// Score that triggers the penalty quiz and gates scrolling
    pub target_score: u64,
    /// How far the target moves after each crossing (0 = fixed target)
    pub target_step: u64,
    /// Start scrolling as soon as the gate opens
    pub auto_scroll: bool,

    // === Topic quiz ===
    /// Score needed to unlock the run affordance
    pub topic_unlock_score: u32,
    /// Seconds per question
    pub question_time_limit_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            board_width: BOARD_WIDTH,
            board_height: BOARD_HEIGHT,
            tile_size: TILE_SIZE,

            gravity_interval_ms: GRAVITY_INTERVAL_MS,
            line_clear_bonus: LINE_CLEAR_BONUS,
            target_score: TARGET_SCORE,
            target_step: TARGET_STEP,
            auto_scroll: true,

            topic_unlock_score: TOPIC_UNLOCK_SCORE,
            question_time_limit_secs: QUESTION_TIME_LIMIT_SECS,
        }
    }
}

impl Settings {
    /// Parse and validate settings from JSON (missing fields take defaults)
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), SettingsError> {
        // The I piece is four cells wide
        if self.board_width < 4 {
            return Err(SettingsError::Invalid("board_width must be at least 4"));
        }
        if self.board_height < 4 {
            return Err(SettingsError::Invalid("board_height must be at least 4"));
        }
        if self.gravity_interval_ms == 0 {
            return Err(SettingsError::Invalid("gravity_interval_ms must be positive"));
        }
        if self.question_time_limit_secs == 0 {
            return Err(SettingsError::Invalid(
                "question_time_limit_secs must be positive",
            ));
        }
        if self.tile_size == 0 {
            return Err(SettingsError::Invalid("tile_size must be positive"));
        }
        Ok(())
    }

    pub fn gravity_interval(&self) -> Duration {
        Duration::from_millis(self.gravity_interval_ms)
    }

    pub fn question_time_limit(&self) -> Duration {
        Duration::from_secs(self.question_time_limit_secs)
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "block_quiz_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            match self.to_json() {
                Ok(json) => {
                    let _ = storage.set_item(Self::STORAGE_KEY, &json);
                    log::info!("Settings saved");
                }
                Err(e) => log::warn!("Settings not saved: {}", e),
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}
