//! HUD status snapshots
//!
//! Both components push plain snapshots outward; the front-end decides how to
//! show them. Snapshots serialize to JSON for front-ends that want that.

use serde::Serialize;

use crate::quiz::{QuestionSlot, QuizEngine};
use crate::sim::{GamePhase, GameState, PieceSource};

/// Block-stack side of the HUD
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoardStatus {
    pub score: u64,
    pub level: u32,
    pub target_score: u64,
    pub phase: GamePhase,
    /// Prompt and options of the penalty question on screen, if any
    pub penalty_prompt: Option<String>,
    pub penalty_options: Vec<String>,
    /// 1-based indices of wrongly answered penalty questions
    pub penalty_wrong: Vec<usize>,
    pub penalty_answered: usize,
    pub penalty_total: usize,
    pub scrolling: bool,
    pub run_enabled: bool,
    pub stop_enabled: bool,
}

impl BoardStatus {
    pub fn capture<S: PieceSource>(state: &GameState<S>) -> Self {
        let penalty = state.penalty();
        let pending = penalty.pending_question();
        Self {
            score: state.score(),
            level: state.level(),
            target_score: state.target_score(),
            phase: state.phase(),
            penalty_prompt: pending.map(|q| q.prompt.clone()),
            penalty_options: pending.map(|q| q.options.clone()).unwrap_or_default(),
            penalty_wrong: penalty.wrong_answers().to_vec(),
            penalty_answered: penalty.answered(),
            penalty_total: penalty.total(),
            scrolling: state.is_scrolling(),
            run_enabled: state.run_enabled(),
            stop_enabled: state.stop_enabled(),
        }
    }
}

/// Topic quiz side of the HUD
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuizStatus {
    pub topic: Option<String>,
    /// Question on screen; `None` before a topic starts and after it ends
    pub prompt: Option<String>,
    pub code: Option<String>,
    pub options: Vec<String>,
    pub selected: Option<usize>,
    pub score: u32,
    pub time_left_secs: u64,
    pub wrong_answers: Vec<usize>,
    pub answered: usize,
    pub total: usize,
    pub complete: bool,
    pub run_unlocked: bool,
}

impl QuizStatus {
    pub fn capture(engine: &QuizEngine) -> Self {
        let question = match engine.current_question() {
            QuestionSlot::Question(q) => Some(q),
            QuestionSlot::Complete | QuestionSlot::NoTopic => None,
        };
        Self {
            topic: engine.current_topic().map(|t| t.name.clone()),
            prompt: question.map(|q| q.prompt.clone()),
            code: question.and_then(|q| q.code.clone()),
            options: question.map(|q| q.options.clone()).unwrap_or_default(),
            selected: engine.selected(),
            score: engine.score(),
            time_left_secs: engine.time_left_secs(),
            wrong_answers: engine.wrong_answers().to_vec(),
            answered: engine.answered(),
            total: engine.total_questions(),
            complete: engine.is_complete(),
            run_unlocked: engine.run_unlocked(),
        }
    }
}

/// Receives snapshots; implementations must not call back into the core
pub trait StatusSink {
    fn board(&mut self, status: &BoardStatus);
    fn quiz(&mut self, status: &QuizStatus);
}

/// "Wrong Questions: 1, 3", or empty when there are none
pub fn format_wrong_list(wrong: &[usize]) -> String {
    if wrong.is_empty() {
        return String::new();
    }
    let list: Vec<String> = wrong.iter().map(usize::to_string).collect();
    format!("Wrong Questions: {}", list.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::{PieceSequence, Tetromino};

    #[test]
    fn test_format_wrong_list() {
        assert_eq!(format_wrong_list(&[]), "");
        assert_eq!(format_wrong_list(&[2]), "Wrong Questions: 2");
        assert_eq!(format_wrong_list(&[1, 3]), "Wrong Questions: 1, 3");
    }

    #[test]
    fn test_board_status_shows_pending_penalty() {
        let mut state =
            GameState::with_source(Settings::default(), PieceSequence::repeat(Tetromino::I));
        state.restart();
        let bottom = state.grid().height() - 1;
        state.grid_mut().fill_row(bottom, Tetromino::Z);
        for x in 3..7 {
            state.grid_mut().set(x, bottom as i32, None);
        }
        while state.soft_drop() {}

        let status = BoardStatus::capture(&state);
        assert_eq!(status.score, 10);
        assert_eq!(status.level, 2);
        assert_eq!(status.phase, GamePhase::AnsweringPenaltyQuestion);
        assert!(status.penalty_prompt.is_some());
        assert_eq!(status.penalty_options.len(), 4);
        assert_eq!(status.penalty_total, 8);
        assert!(!status.run_enabled);
        assert!(!status.stop_enabled);
    }

    #[test]
    fn test_quiz_status_tracks_engine() {
        let settings = Settings::default();
        let mut engine = QuizEngine::with_builtin_topics(&settings);
        let before = QuizStatus::capture(&engine);
        assert_eq!(before.topic, None);
        assert_eq!(before.prompt, None);
        assert_eq!(before.total, 0);

        engine.start_topic("variables").unwrap();
        engine.submit_answer(None);
        engine.select(1);
        let status = QuizStatus::capture(&engine);
        assert_eq!(status.topic.as_deref(), Some("variables"));
        assert_eq!(status.answered, 1);
        assert_eq!(status.wrong_answers, vec![1]);
        assert_eq!(status.options.len(), 4);
        assert!(status.code.is_some());
        assert_eq!(status.selected, Some(1));
        assert_eq!(status.time_left_secs, 30);
        assert!(!status.run_unlocked);
    }

    #[test]
    fn test_status_serializes() {
        let engine = QuizEngine::with_builtin_topics(&Settings::default());
        let json = serde_json::to_string(&QuizStatus::capture(&engine)).unwrap();
        assert!(json.contains("\"run_unlocked\":false"));
    }
}
