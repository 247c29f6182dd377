//! Multiple-choice quiz
//!
//! The topic quiz engine plus the question types and banks it shares with the
//! block-stack penalty overlay.

pub mod bank;
pub mod countdown;
pub mod engine;
pub mod question;

pub use countdown::Countdown;
pub use engine::{AnswerOutcome, QuestionSlot, QuizEngine};
pub use question::{Question, QuestionBank, QuizError};
