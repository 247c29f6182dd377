//! Deterministic block-stack simulation
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time only arrives through `tick`
//! - Pieces only come from the injected `PieceSource`
//! - No rendering or platform dependencies

pub mod grid;
pub mod penalty;
pub mod piece;
pub mod rng;
pub mod state;
pub mod tick;

pub use grid::{Cell, Grid};
pub use penalty::{PenaltyAnswer, PenaltyQuiz};
pub use piece::{Piece, Shape, Tetromino};
pub use rng::{PieceSequence, PieceSource, SeededPieces};
pub use state::{GameEvent, GamePhase, GameState};
pub use tick::{Command, apply_input, tick};
