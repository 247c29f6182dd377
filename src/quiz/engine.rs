//! Topic quiz engine
//!
//! Walks one topic bank at a time, scoring answers and recording the 1-based
//! positions of wrong ones. Score and wrong answers accumulate across topics
//! until `reset`.

use std::time::Duration;

use serde::Serialize;

use super::bank;
use super::countdown::Countdown;
use super::question::{Question, QuestionBank, QuizError};
use crate::settings::Settings;

/// Result of looking up a question position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionSlot<'a> {
    Question(&'a Question),
    /// Index is past the end of the topic
    Complete,
    /// No topic has been started
    NoTopic,
}

/// What happened when an answer was submitted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AnswerOutcome {
    /// 1-based position within the topic
    pub question_number: usize,
    pub selected: Option<usize>,
    pub correct: bool,
    pub points_awarded: u32,
    /// Submitted by the countdown rather than the player
    pub timed_out: bool,
    /// This was the last question of the topic
    pub topic_complete: bool,
}

#[derive(Debug, Clone)]
pub struct QuizEngine {
    topics: Vec<QuestionBank>,
    current_topic: Option<usize>,
    /// Questions answered in the current topic (also the next index)
    answered: usize,
    score: u32,
    wrong_answers: Vec<usize>,
    selected: Option<usize>,
    countdown: Countdown,
    unlock_score: u32,
}

impl QuizEngine {
    pub fn new(topics: Vec<QuestionBank>, settings: &Settings) -> Self {
        Self {
            topics,
            current_topic: None,
            answered: 0,
            score: 0,
            wrong_answers: Vec::new(),
            selected: None,
            countdown: Countdown::new(settings.question_time_limit()),
            unlock_score: settings.topic_unlock_score,
        }
    }

    pub fn with_builtin_topics(settings: &Settings) -> Self {
        Self::new(bank::topic_banks(), settings)
    }

    pub fn topic_names(&self) -> impl Iterator<Item = &str> {
        self.topics.iter().map(|t| t.name.as_str())
    }

    /// Switch to a topic and show its first question
    pub fn start_topic(&mut self, name: &str) -> Result<QuestionSlot<'_>, QuizError> {
        let index = self
            .topics
            .iter()
            .position(|t| t.name == name)
            .ok_or_else(|| QuizError::UnknownTopic(name.to_string()))?;

        self.current_topic = Some(index);
        self.answered = 0;
        self.selected = None;
        self.arm_countdown();
        log::info!("Topic '{}' started ({} questions)", name, self.total_questions());

        Ok(self.current_question())
    }

    pub fn current_topic(&self) -> Option<&QuestionBank> {
        self.current_topic.and_then(|i| self.topics.get(i))
    }

    pub fn total_questions(&self) -> usize {
        self.current_topic().map_or(0, QuestionBank::len)
    }

    /// Question at `index` in the current topic
    pub fn load_question(&self, index: usize) -> QuestionSlot<'_> {
        match self.current_topic() {
            None => QuestionSlot::NoTopic,
            Some(topic) => match topic.get(index) {
                Some(q) => QuestionSlot::Question(q),
                None => QuestionSlot::Complete,
            },
        }
    }

    pub fn current_question(&self) -> QuestionSlot<'_> {
        self.load_question(self.answered)
    }

    /// Highlight an option. Options that don't exist are ignored.
    pub fn select(&mut self, option: usize) -> bool {
        let exists = matches!(
            self.current_question(),
            QuestionSlot::Question(q) if q.has_option(option)
        );
        if exists {
            self.selected = Some(option);
        }
        exists
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Submit the highlighted option. Does nothing while nothing is selected.
    pub fn submit(&mut self) -> Option<AnswerOutcome> {
        let selected = self.selected?;
        self.submit_answer(Some(selected))
    }

    /// Score `selected` against the current question and move on. `None` or
    /// an out-of-range option counts as wrong.
    pub fn submit_answer(&mut self, selected: Option<usize>) -> Option<AnswerOutcome> {
        self.answer(selected, false)
    }

    /// Feed elapsed time to the countdown; on expiry the current selection is
    /// submitted on the player's behalf.
    pub fn tick(&mut self, dt: Duration) -> Option<AnswerOutcome> {
        if self.countdown.advance(dt) {
            log::debug!("Question {} timed out", self.answered + 1);
            return self.answer(self.selected, true);
        }
        None
    }

    fn answer(&mut self, selected: Option<usize>, timed_out: bool) -> Option<AnswerOutcome> {
        let (correct, points) = match self.current_question() {
            QuestionSlot::Question(q) => (
                selected.is_some_and(|option| q.is_correct(option)),
                q.points,
            ),
            _ => return None,
        };

        let question_number = self.answered + 1;
        let points_awarded = if correct { points } else { 0 };

        if correct {
            self.score = self.score.saturating_add(points_awarded);
        } else {
            self.wrong_answers.push(question_number);
        }

        self.answered += 1;
        self.selected = None;
        let topic_complete = self.is_complete();

        if topic_complete {
            self.countdown.cancel();
            log::info!(
                "Topic complete: score {}, wrong {:?}",
                self.score,
                self.wrong_answers
            );
        } else {
            self.countdown.restart();
        }

        Some(AnswerOutcome {
            question_number,
            selected,
            correct,
            points_awarded,
            timed_out,
            topic_complete,
        })
    }

    fn arm_countdown(&mut self) {
        if self.is_complete() {
            self.countdown.cancel();
        } else {
            self.countdown.restart();
        }
    }

    /// Every question of the current topic has been answered
    pub fn is_complete(&self) -> bool {
        self.current_topic.is_some() && self.answered >= self.total_questions()
    }

    /// Gate for the run affordance: enough points and the whole topic done
    pub fn run_unlocked(&self) -> bool {
        self.score >= self.unlock_score && self.is_complete()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn unlock_score(&self) -> u32 {
        self.unlock_score
    }

    pub fn answered(&self) -> usize {
        self.answered
    }

    pub fn wrong_answers(&self) -> &[usize] {
        &self.wrong_answers
    }

    pub fn countdown(&self) -> &Countdown {
        &self.countdown
    }

    pub fn time_left_secs(&self) -> u64 {
        self.countdown.remaining_secs()
    }

    /// Back to the topic selection screen with a clean slate
    pub fn reset(&mut self) {
        self.countdown.cancel();
        self.current_topic = None;
        self.answered = 0;
        self.score = 0;
        self.wrong_answers.clear();
        self.selected = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> QuizEngine {
        QuizEngine::with_builtin_topics(&Settings::default())
    }

    fn answer_all(quiz: &mut QuizEngine, correct_count: usize) {
        for i in 0..quiz.total_questions() {
            let QuestionSlot::Question(q) = quiz.current_question() else {
                panic!("ran out of questions at {}", i);
            };
            let option = if i < correct_count {
                q.correct
            } else {
                (q.correct + 1) % q.options.len()
            };
            quiz.select(option);
            quiz.submit().unwrap();
        }
    }

    #[test]
    fn test_start_unknown_topic() {
        let mut quiz = engine();
        let err = quiz.start_topic("rust").unwrap_err();
        assert!(matches!(err, QuizError::UnknownTopic(ref t) if t == "rust"));
        assert_eq!(quiz.load_question(0), QuestionSlot::NoTopic);
    }

    #[test]
    fn test_load_question_signals_completion() {
        let mut quiz = engine();
        assert!(matches!(
            quiz.start_topic("variables").unwrap(),
            QuestionSlot::Question(_)
        ));
        assert!(matches!(quiz.load_question(7), QuestionSlot::Question(_)));
        assert_eq!(quiz.load_question(8), QuestionSlot::Complete);
    }

    #[test]
    fn test_correct_answer_adds_points() {
        let mut quiz = engine();
        quiz.start_topic("variables").unwrap();
        let outcome = quiz.submit_answer(Some(1)).unwrap();
        assert!(outcome.correct);
        assert_eq!(outcome.points_awarded, 2);
        assert_eq!(outcome.question_number, 1);
        assert_eq!(quiz.score(), 2);
        assert!(quiz.wrong_answers().is_empty());
    }

    #[test]
    fn test_wrong_answers_record_positions() {
        let mut quiz = engine();
        quiz.start_topic("variables").unwrap();
        quiz.submit_answer(Some(0)).unwrap();
        quiz.submit_answer(Some(2)).unwrap();
        quiz.submit_answer(Some(99)).unwrap();
        assert_eq!(quiz.wrong_answers(), &[1, 3]);
        assert_eq!(quiz.score(), 2);
    }

    #[test]
    fn test_select_ignores_missing_option() {
        let mut quiz = engine();
        quiz.start_topic("oop").unwrap();
        assert!(quiz.select(2));
        assert!(!quiz.select(4));
        assert_eq!(quiz.selected(), Some(2));
    }

    #[test]
    fn test_submit_without_selection_is_ignored() {
        let mut quiz = engine();
        quiz.start_topic("oop").unwrap();
        assert_eq!(quiz.submit(), None);
        assert_eq!(quiz.answered(), 0);
    }

    #[test]
    fn test_timeout_without_selection_counts_wrong() {
        let mut quiz = engine();
        quiz.start_topic("variables").unwrap();
        assert_eq!(quiz.tick(Duration::from_secs(29)), None);
        assert_eq!(quiz.time_left_secs(), 1);

        let outcome = quiz.tick(Duration::from_secs(1)).unwrap();
        assert!(outcome.timed_out);
        assert!(!outcome.correct);
        assert_eq!(quiz.wrong_answers(), &[1]);
        // Next question gets the full time
        assert_eq!(quiz.time_left_secs(), 30);
    }

    #[test]
    fn test_timeout_submits_current_selection() {
        let mut quiz = engine();
        quiz.start_topic("variables").unwrap();
        quiz.select(1);
        let outcome = quiz.tick(Duration::from_secs(30)).unwrap();
        assert!(outcome.timed_out);
        assert!(outcome.correct);
        assert_eq!(quiz.score(), 2);
    }

    #[test]
    fn test_all_correct_unlocks_run() {
        let mut quiz = engine();
        quiz.start_topic("variables").unwrap();
        answer_all(&mut quiz, 8);
        assert_eq!(quiz.score(), 16);
        assert!(quiz.is_complete());
        assert!(quiz.run_unlocked());
        assert_eq!(quiz.current_question(), QuestionSlot::Complete);
        assert!(!quiz.countdown().is_running());
    }

    #[test]
    fn test_seven_of_eight_answered_stays_locked() {
        let mut quiz = engine();
        quiz.start_topic("oop").unwrap();
        for _ in 0..7 {
            let QuestionSlot::Question(q) = quiz.current_question() else {
                unreachable!()
            };
            let correct = q.correct;
            quiz.submit_answer(Some(correct)).unwrap();
        }
        assert_eq!(quiz.score(), 14);
        assert!(!quiz.run_unlocked());

        // Even with the score over the bar, the topic must be finished
        let mut lenient = QuizEngine::new(
            bank::topic_banks(),
            &Settings {
                topic_unlock_score: 2,
                ..Settings::default()
            },
        );
        lenient.start_topic("oop").unwrap();
        for _ in 0..7 {
            lenient.submit_answer(Some(3)).unwrap();
        }
        assert!(lenient.score() >= 2);
        assert!(!lenient.run_unlocked());
    }

    #[test]
    fn test_one_wrong_answer_misses_unlock_score() {
        let mut quiz = engine();
        quiz.start_topic("variables").unwrap();
        answer_all(&mut quiz, 7);
        assert_eq!(quiz.score(), 14);
        assert_eq!(quiz.wrong_answers(), &[8]);
        assert!(quiz.is_complete());
        assert!(!quiz.run_unlocked());
    }

    #[test]
    fn test_submit_after_completion_is_ignored() {
        let mut quiz = engine();
        quiz.start_topic("variables").unwrap();
        answer_all(&mut quiz, 8);
        assert_eq!(quiz.submit_answer(Some(0)), None);
        assert_eq!(quiz.tick(Duration::from_secs(60)), None);
        assert_eq!(quiz.score(), 16);
    }

    #[test]
    fn test_changing_topic_resets_cursor_and_timer() {
        let mut quiz = engine();
        quiz.start_topic("variables").unwrap();
        quiz.submit_answer(Some(1)).unwrap();
        quiz.tick(Duration::from_secs(20));

        quiz.start_topic("oop").unwrap();
        assert_eq!(quiz.answered(), 0);
        assert_eq!(quiz.time_left_secs(), 30);
        // Score carries over between topics
        assert_eq!(quiz.score(), 2);
    }

    #[test]
    fn test_score_saturates_on_huge_points() {
        let big = QuestionBank::new(
            "big",
            vec![
                Question::new("a?", &["y", "n"], 0, u32::MAX),
                Question::new("b?", &["y", "n"], 0, u32::MAX),
            ],
        );
        let mut quiz = QuizEngine::new(vec![big], &Settings::default());
        quiz.start_topic("big").unwrap();
        quiz.submit_answer(Some(0)).unwrap();
        quiz.submit_answer(Some(0)).unwrap();
        assert_eq!(quiz.score(), u32::MAX);
        assert!(quiz.is_complete());
        assert!(quiz.run_unlocked());
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut quiz = engine();
        quiz.start_topic("variables").unwrap();
        quiz.submit_answer(None).unwrap();
        quiz.submit_answer(Some(2)).unwrap();
        quiz.reset();
        assert_eq!(quiz.score(), 0);
        assert!(quiz.wrong_answers().is_empty());
        assert!(quiz.current_topic().is_none());
        assert_eq!(quiz.tick(Duration::from_secs(60)), None);
    }
}
