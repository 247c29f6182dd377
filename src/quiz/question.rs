//! Questions and question banks

use serde::{Deserialize, Serialize};

/// Error type for quiz content and topic selection.
#[derive(Debug)]
pub enum QuizError {
    /// No bank with that topic name
    UnknownTopic(String),
    /// Bank JSON could not be parsed
    Parse(serde_json::Error),
    /// A question that can never be answered correctly
    InvalidQuestion { index: usize, reason: &'static str },
}

impl std::fmt::Display for QuizError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QuizError::UnknownTopic(topic) => write!(f, "Unknown topic: {}", topic),
            QuizError::Parse(e) => write!(f, "Failed to parse questions: {}", e),
            QuizError::InvalidQuestion { index, reason } => {
                write!(f, "Question {} is invalid: {}", index + 1, reason)
            }
        }
    }
}

impl std::error::Error for QuizError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            QuizError::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for QuizError {
    fn from(err: serde_json::Error) -> Self {
        QuizError::Parse(err)
    }
}

fn default_points() -> u32 {
    1
}

/// A multiple-choice question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub prompt: String,
    /// Code snippet shown under the prompt
    #[serde(default)]
    pub code: Option<String>,
    pub options: Vec<String>,
    /// Index into `options`
    pub correct: usize,
    #[serde(default = "default_points")]
    pub points: u32,
}

impl Question {
    pub fn new(prompt: &str, options: &[&str], correct: usize, points: u32) -> Self {
        Self {
            prompt: prompt.to_string(),
            code: None,
            options: options.iter().map(|o| o.to_string()).collect(),
            correct,
            points,
        }
    }

    pub fn with_code(mut self, code: &str) -> Self {
        self.code = Some(code.to_string());
        self
    }

    /// Out-of-range options are simply wrong
    pub fn is_correct(&self, option: usize) -> bool {
        option == self.correct && option < self.options.len()
    }

    pub fn correct_option(&self) -> Option<&str> {
        self.options.get(self.correct).map(String::as_str)
    }

    pub fn has_option(&self, option: usize) -> bool {
        option < self.options.len()
    }
}

/// A named, ordered list of questions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionBank {
    pub name: String,
    pub questions: Vec<Question>,
}

impl QuestionBank {
    pub fn new(name: &str, questions: Vec<Question>) -> Self {
        Self {
            name: name.to_string(),
            questions,
        }
    }

    /// Parse a bank from JSON and check every question is answerable
    pub fn from_json(json: &str) -> Result<Self, QuizError> {
        let bank: QuestionBank = serde_json::from_str(json)?;
        bank.validate()?;
        Ok(bank)
    }

    pub fn validate(&self) -> Result<(), QuizError> {
        for (index, q) in self.questions.iter().enumerate() {
            if q.options.is_empty() {
                return Err(QuizError::InvalidQuestion {
                    index,
                    reason: "no options",
                });
            }
            if q.correct >= q.options.len() {
                return Err(QuizError::InvalidQuestion {
                    index,
                    reason: "correct option out of range",
                });
            }
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    /// Sum of all point values
    pub fn max_score(&self) -> u32 {
        self.questions.iter().map(|q| q.points).sum()
    }
}
