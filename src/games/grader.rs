//! Answer grading
//!
//! Pure function of the frozen question set and a submission. No clock,
//! no randomness: identical inputs always grade identically.

use std::collections::HashMap;

use crate::games::types::{AnswerRecord, SubmittedAnswer};
use crate::questions::{AnswerOption, Question};

#[derive(Debug, Clone, PartialEq)]
pub struct GradeOutcome {
    pub score: u32,
    pub graded: Vec<AnswerRecord>,
}

/// Grade a submission against the authoritative question set. Answers
/// referencing unknown question ids grade as incorrect.
pub fn grade(questions: &[Question], answers: &[SubmittedAnswer]) -> GradeOutcome {
    let key: HashMap<&str, AnswerOption> = questions
        .iter()
        .map(|q| (q.id.as_str(), q.correct_option))
        .collect();

    let mut score = 0u32;
    let graded = answers
        .iter()
        .map(|answer| {
            let is_correct = key
                .get(answer.question_id.as_str())
                .map_or(false, |correct| *correct == answer.submitted_option);
            if is_correct {
                score += 1;
            }
            AnswerRecord {
                question_id: answer.question_id.clone(),
                submitted_option: answer.submitted_option,
                is_correct,
                time_taken_seconds: answer.time_taken_seconds,
            }
        })
        .collect();

    GradeOutcome { score, graded }
}
