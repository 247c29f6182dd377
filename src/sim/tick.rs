//! Gravity step and command handling
//!
//! The front-end owns the clock. It feeds elapsed time into `tick` and
//! player commands into `apply_input`; the simulation itself never sleeps.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::rng::PieceSource;
use super::state::{GamePhase, GameState};
use crate::consts::MAX_GRAVITY_STEPS;

/// Discrete player commands, independent of the device they came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    MoveLeft,
    MoveRight,
    SoftDrop,
    Rotate,
    /// Start from idle (restarts a finished or running game as well)
    Start,
    TogglePause,
    Restart,
    /// Start background scrolling once the gate is open
    Run,
    /// Stop background scrolling
    Stop,
    /// Choose an option of the penalty question on screen
    AnswerPenalty(usize),
}

/// Advance gravity by `elapsed`. One soft drop per gravity interval while
/// running; returns the number of steps taken.
///
/// Catch-up is capped at `MAX_GRAVITY_STEPS` per call and the surplus time
/// is dropped, so a long stall (hidden tab) does not slam the piece down.
pub fn tick<S: PieceSource>(state: &mut GameState<S>, elapsed: Duration) -> u32 {
    if state.phase() != GamePhase::Running {
        return 0;
    }

    let interval = state.settings.gravity_interval();
    state.gravity_elapsed += elapsed;

    let mut steps = 0;
    while state.gravity_elapsed >= interval {
        if steps >= MAX_GRAVITY_STEPS {
            state.gravity_elapsed = Duration::ZERO;
            break;
        }
        state.gravity_elapsed -= interval;
        state.soft_drop();
        steps += 1;

        // Lock may have asked a question or ended the game
        if state.phase() != GamePhase::Running {
            state.gravity_elapsed = Duration::ZERO;
            break;
        }
    }
    steps
}

/// Apply one command. Returns true if it changed anything.
pub fn apply_input<S: PieceSource>(state: &mut GameState<S>, command: Command) -> bool {
    match command {
        Command::MoveLeft => state.move_piece(-1),
        Command::MoveRight => state.move_piece(1),
        Command::SoftDrop => {
            let before = state.active_piece().cloned();
            state.soft_drop();
            state.active_piece() != before.as_ref()
        }
        Command::Rotate => state.rotate(),
        Command::Start | Command::Restart => {
            state.restart();
            true
        }
        Command::TogglePause => state.toggle_pause(),
        Command::Run => state.start_scrolling(),
        Command::Stop => state.stop_scrolling(),
        Command::AnswerPenalty(option) => state.answer_penalty(option).is_some(),
    }
}
