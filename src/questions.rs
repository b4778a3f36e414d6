//! Question bank seam and bounded shuffled draws
//!
//! Content management and curriculum seeding are external; the engine
//! only reads a level's questions and freezes a shuffled subset per game.

use async_trait::async_trait;
use dashmap::DashMap;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use crate::errors::{EngineError, EngineResult};

/// Answer choice for a two-option question.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum AnswerOption {
    A,
    B,
}

impl fmt::Display for AnswerOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnswerOption::A => write!(f, "a"),
            AnswerOption::B => write!(f, "b"),
        }
    }
}

/// Authoritative question record, answer key included.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub text: String,
    pub option_a: String,
    pub option_b: String,
    pub correct_option: AnswerOption,
    pub time_limit_seconds: u32,
}

/// Question as shown to players: no answer key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionView {
    pub id: String,
    pub text: String,
    pub option_a: String,
    pub option_b: String,
    pub time_limit_seconds: u32,
}

impl From<&Question> for QuestionView {
    fn from(q: &Question) -> Self {
        Self {
            id: q.id.clone(),
            text: q.text.clone(),
            option_a: q.option_a.clone(),
            option_b: q.option_b.clone(),
            time_limit_seconds: q.time_limit_seconds,
        }
    }
}

#[async_trait]
pub trait QuestionBank: Send + Sync {
    /// All questions of a level, or `None` when the level does not exist.
    async fn fetch_by_level(&self, level_id: &str) -> Option<Vec<Question>>;
}

pub struct InMemoryQuestionBank {
    levels: DashMap<String, Vec<Question>>,
}

impl InMemoryQuestionBank {
    pub fn new() -> Self {
        Self {
            levels: DashMap::new(),
        }
    }

    pub fn insert_level(&self, level_id: &str, questions: Vec<Question>) {
        self.levels.insert(level_id.to_string(), questions);
    }
}

impl Default for InMemoryQuestionBank {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl QuestionBank for InMemoryQuestionBank {
    async fn fetch_by_level(&self, level_id: &str) -> Option<Vec<Question>> {
        self.levels.get(level_id).map(|qs| qs.value().clone())
    }
}

/// Shuffled, size-bounded draws against a question bank.
pub struct QuestionPool {
    bank: Arc<dyn QuestionBank>,
    min_questions: usize,
}

impl QuestionPool {
    pub fn new(bank: Arc<dyn QuestionBank>, min_questions: usize) -> Self {
        Self {
            bank,
            min_questions,
        }
    }

    /// Draw up to `cap` questions for a game. The returned order is the
    /// order every participant sees.
    pub async fn draw(&self, level_id: &str, cap: usize) -> EngineResult<Vec<Question>> {
        let mut questions = self
            .bank
            .fetch_by_level(level_id)
            .await
            .ok_or_else(|| EngineError::LevelNotFound(level_id.to_string()))?;

        if questions.len() < self.min_questions {
            return Err(EngineError::InsufficientQuestions {
                level: level_id.to_string(),
                available: questions.len(),
                required: self.min_questions,
            });
        }

        questions.shuffle(&mut rand::thread_rng());
        questions.truncate(cap);
        Ok(questions)
    }
}

#[cfg(test)]
pub(crate) fn sample_questions(count: usize) -> Vec<Question> {
    (0..count)
        .map(|i| Question {
            id: format!("q{}", i),
            text: format!("Question {}?", i),
            option_a: "first".to_string(),
            option_b: "second".to_string(),
            correct_option: if i % 2 == 0 {
                AnswerOption::A
            } else {
                AnswerOption::B
            },
            time_limit_seconds: 15,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn draw_unknown_level_fails() {
        let bank = Arc::new(InMemoryQuestionBank::new());
        let pool = QuestionPool::new(bank, 5);
        let err = pool.draw("missing", 10).await.unwrap_err();
        assert!(matches!(err, EngineError::LevelNotFound(level) if level == "missing"));
    }

    #[tokio::test]
    async fn draw_rejects_thin_levels() {
        let bank = Arc::new(InMemoryQuestionBank::new());
        bank.insert_level("thin", sample_questions(3));
        let pool = QuestionPool::new(bank, 5);
        let err = pool.draw("thin", 10).await.unwrap_err();
        assert!(matches!(
            err,
            EngineError::InsufficientQuestions {
                available: 3,
                required: 5,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn draw_is_bounded_and_complete() {
        let bank = Arc::new(InMemoryQuestionBank::new());
        bank.insert_level("general", sample_questions(30));
        let pool = QuestionPool::new(bank, 5);

        let drawn = pool.draw("general", 10).await.unwrap();
        assert_eq!(drawn.len(), 10);

        // No duplicates in a draw.
        let ids: std::collections::HashSet<_> = drawn.iter().map(|q| q.id.clone()).collect();
        assert_eq!(ids.len(), 10);

        // A level smaller than the cap is drawn in full.
        let bank2 = Arc::new(InMemoryQuestionBank::new());
        bank2.insert_level("small", sample_questions(7));
        let pool2 = QuestionPool::new(bank2, 5);
        assert_eq!(pool2.draw("small", 10).await.unwrap().len(), 7);
    }

    #[test]
    fn view_hides_answer_key() {
        let questions = sample_questions(1);
        let view = QuestionView::from(&questions[0]);
        let encoded = serde_json::to_string(&view).unwrap();
        assert!(!encoded.contains("correct_option"));
        assert!(encoded.contains("option_a"));
    }
}
