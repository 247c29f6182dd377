//! Keyboard mapping
//!
//! Arrow keys drive the piece like the classic layout; `p` and `r` stand in
//! for the pause and restart buttons.

use crate::sim::Command;

/// Map a `KeyboardEvent.key` value to a command
pub fn command_for_key(key: &str) -> Option<Command> {
    match key {
        "ArrowLeft" => Some(Command::MoveLeft),
        "ArrowRight" => Some(Command::MoveRight),
        "ArrowDown" => Some(Command::SoftDrop),
        "ArrowUp" => Some(Command::Rotate),
        "p" | "P" => Some(Command::TogglePause),
        "r" | "R" => Some(Command::Restart),
        _ => None,
    }
}

/// Map a button element id to a command
pub fn command_for_button(id: &str) -> Option<Command> {
    match id {
        "start-button" => Some(Command::Start),
        "pause-button" => Some(Command::TogglePause),
        "restart-button" => Some(Command::Restart),
        "run-button" => Some(Command::Run),
        "stop-button" => Some(Command::Stop),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arrow_keys() {
        assert_eq!(command_for_key("ArrowLeft"), Some(Command::MoveLeft));
        assert_eq!(command_for_key("ArrowRight"), Some(Command::MoveRight));
        assert_eq!(command_for_key("ArrowDown"), Some(Command::SoftDrop));
        assert_eq!(command_for_key("ArrowUp"), Some(Command::Rotate));
    }

    #[test]
    fn test_letters_and_unknown_keys() {
        assert_eq!(command_for_key("P"), Some(Command::TogglePause));
        assert_eq!(command_for_key("r"), Some(Command::Restart));
        assert_eq!(command_for_key(" "), None);
        assert_eq!(command_for_key("Escape"), None);
    }

    #[test]
    fn test_buttons() {
        assert_eq!(command_for_button("start-button"), Some(Command::Start));
        assert_eq!(command_for_button("stop-button"), Some(Command::Stop));
        assert_eq!(command_for_button("submit-button"), None);
    }
}
