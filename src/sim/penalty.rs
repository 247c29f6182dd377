//! Penalty quiz overlay
//!
//! Questions are asked in bank order, each at most once per session. The
//! overlay only tracks progress; the grid effect of a correct answer is
//! applied by the game state.

use serde::Serialize;

use crate::quiz::{Question, QuestionBank, bank};

/// Result of answering the pending penalty question
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PenaltyAnswer {
    /// 0-based index into the bank
    pub index: usize,
    pub option: usize,
    pub correct: bool,
    /// That was the last question in the bank
    pub completed: bool,
}

#[derive(Debug, Clone)]
pub struct PenaltyQuiz {
    bank: QuestionBank,
    next_index: usize,
    pending: Option<usize>,
    /// 1-based indices of wrongly answered questions
    wrong_answers: Vec<usize>,
}

impl PenaltyQuiz {
    pub fn new(bank: QuestionBank) -> Self {
        Self {
            bank,
            next_index: 0,
            pending: None,
            wrong_answers: Vec::new(),
        }
    }

    pub fn builtin() -> Self {
        Self::new(bank::penalty_bank())
    }

    /// Put the next unanswered question on screen. `None` when the bank is
    /// exhausted. Asking again while one is pending returns the same question.
    pub fn ask(&mut self) -> Option<&Question> {
        if self.pending.is_none() {
            if self.next_index >= self.bank.len() {
                return None;
            }
            self.pending = Some(self.next_index);
        }
        self.pending_question()
    }

    pub fn pending_question(&self) -> Option<&Question> {
        self.pending.and_then(|i| self.bank.get(i))
    }

    pub fn pending_index(&self) -> Option<usize> {
        self.pending
    }

    /// Score the pending question. Out-of-range options are wrong.
    pub fn answer(&mut self, option: usize) -> Option<PenaltyAnswer> {
        let index = self.pending.take()?;
        let correct = self.bank.get(index).is_some_and(|q| q.is_correct(option));
        if !correct {
            self.wrong_answers.push(index + 1);
        }
        self.next_index = index + 1;

        Some(PenaltyAnswer {
            index,
            option,
            correct,
            completed: self.all_answered(),
        })
    }

    /// Take the pending question off screen without answering it
    pub fn dismiss(&mut self) {
        self.pending = None;
    }

    pub fn answered(&self) -> usize {
        self.next_index
    }

    pub fn total(&self) -> usize {
        self.bank.len()
    }

    /// Questions left that have not been put on screen
    pub fn remaining(&self) -> usize {
        self.bank.len().saturating_sub(self.next_index + usize::from(self.pending.is_some()))
    }

    pub fn all_answered(&self) -> bool {
        self.next_index >= self.bank.len()
    }

    pub fn wrong_answers(&self) -> &[usize] {
        &self.wrong_answers
    }

    pub fn reset(&mut self) {
        self.next_index = 0;
        self.pending = None;
        self.wrong_answers.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_question_bank() -> QuestionBank {
        QuestionBank::new(
            "mini",
            vec![
                Question::new("first", &["a", "b"], 0, 1),
                Question::new("second", &["a", "b"], 1, 1),
            ],
        )
    }

    #[test]
    fn test_asks_in_order_until_exhausted() {
        let mut quiz = PenaltyQuiz::new(two_question_bank());
        assert_eq!(quiz.ask().unwrap().prompt, "first");
        assert_eq!(quiz.ask().unwrap().prompt, "first");
        assert_eq!(quiz.remaining(), 1);

        let a = quiz.answer(0).unwrap();
        assert!(a.correct);
        assert!(!a.completed);

        assert_eq!(quiz.ask().unwrap().prompt, "second");
        let b = quiz.answer(0).unwrap();
        assert!(!b.correct);
        assert!(b.completed);

        assert!(quiz.all_answered());
        assert!(quiz.ask().is_none());
        assert_eq!(quiz.wrong_answers(), &[2]);
    }

    #[test]
    fn test_answer_without_pending_question() {
        let mut quiz = PenaltyQuiz::new(two_question_bank());
        assert_eq!(quiz.answer(0), None);
        assert_eq!(quiz.answered(), 0);
    }

    #[test]
    fn test_out_of_range_option_is_wrong() {
        let mut quiz = PenaltyQuiz::new(two_question_bank());
        quiz.ask();
        let a = quiz.answer(17).unwrap();
        assert!(!a.correct);
        assert_eq!(quiz.wrong_answers(), &[1]);
    }

    #[test]
    fn test_reset() {
        let mut quiz = PenaltyQuiz::builtin();
        assert_eq!(quiz.total(), 8);
        quiz.ask();
        quiz.answer(3);
        quiz.reset();
        assert_eq!(quiz.answered(), 0);
        assert!(quiz.pending_index().is_none());
        assert!(quiz.wrong_answers().is_empty());
    }
}
