//! Quiz scoring.

use crate::models::{
    score_record::{QuizResultResponse, ScoreRecord},
    topic::Topic,
};

pub const FULL_SCORE_MESSAGE: &str = "Great job! You answered every question correctly.";
pub const PARTIAL_SCORE_MESSAGE: &str = "Please review the explanation above and try again.";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QuizError {
    #[error("Answer count mismatch: expected {expected} answers, got {actual}")]
    AnswerCountMismatch { expected: usize, actual: usize },
}

/// Result of scoring one quiz attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizOutcome {
    pub topic: String,
    pub score: usize,
    pub total: usize,
}

impl QuizOutcome {
    pub fn passed(&self) -> bool {
        self.score == self.total
    }

    pub fn message(&self) -> &'static str {
        if self.passed() {
            FULL_SCORE_MESSAGE
        } else {
            PARTIAL_SCORE_MESSAGE
        }
    }

    pub fn record(&self) -> ScoreRecord {
        ScoreRecord {
            topic: self.topic.clone(),
            score: self.score as i64,
        }
    }
}

impl From<QuizOutcome> for QuizResultResponse {
    fn from(outcome: QuizOutcome) -> Self {
        Self {
            passed: outcome.passed(),
            message: outcome.message().to_string(),
            topic: outcome.topic,
            score: outcome.score,
            total_questions: outcome.total,
        }
    }
}

/// Scores `answers` against `topic`, position by position.
///
/// Exactly one answer per question is required; anything else is rejected
/// rather than scored.
pub fn score_attempt<S: AsRef<str>>(topic: &Topic, answers: &[S]) -> Result<QuizOutcome, QuizError> {
    if answers.len() != topic.questions.len() {
        return Err(QuizError::AnswerCountMismatch {
            expected: topic.questions.len(),
            actual: answers.len(),
        });
    }

    let score = topic
        .questions
        .iter()
        .zip(answers)
        .filter(|(q, a)| q.is_correct(a.as_ref()))
        .count();

    Ok(QuizOutcome {
        topic: topic.name.clone(),
        score,
        total: topic.questions.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    #[test]
    fn test_water_conservation_full_score() {
        let catalog = Catalog::builtin();
        let topic = catalog.get("Water Conservation").unwrap();

        let outcome =
            score_attempt(topic, &["Use low-flow faucets", "To save money and resources"]).unwrap();
        assert_eq!(outcome.score, 2);
        assert_eq!(outcome.total, 2);
        assert!(outcome.passed());
        assert_eq!(outcome.message(), FULL_SCORE_MESSAGE);
    }

    #[test]
    fn test_machine_safety_partial_score() {
        let catalog = Catalog::builtin();
        let topic = catalog.get("Machine Safety").unwrap();

        let outcome = score_attempt(topic, &["Turn it on", "It protects from injury"]).unwrap();
        assert_eq!(outcome.score, 1);
        assert!(!outcome.passed());
        assert_eq!(outcome.message(), PARTIAL_SCORE_MESSAGE);
    }

    #[test]
    fn test_zero_score() {
        let catalog = Catalog::builtin();
        let topic = catalog.get("Plantation").unwrap();

        let outcome = score_attempt(topic, &["Burning leaves", "Burning leaves"]).unwrap();
        assert_eq!(outcome.score, 0);
    }

    #[test]
    fn test_score_never_exceeds_question_count() {
        let catalog = Catalog::builtin();
        for topic in catalog.topics() {
            let answers: Vec<&str> = topic.questions.iter().map(|q| q.answer.as_str()).collect();
            let outcome = score_attempt(topic, &answers).unwrap();
            assert_eq!(outcome.score, topic.questions.len());
        }
    }

    #[test]
    fn test_answers_are_positional() {
        let catalog = Catalog::builtin();
        let topic = catalog.get("Water Conservation").unwrap();

        // Correct answers in swapped order score nothing.
        let outcome =
            score_attempt(topic, &["To save money and resources", "Use low-flow faucets"]).unwrap();
        assert_eq!(outcome.score, 0);
    }

    #[test]
    fn test_short_submission_rejected() {
        let catalog = Catalog::builtin();
        let topic = catalog.get("Sustainability").unwrap();

        let err = score_attempt(topic, &["Recycling and reducing waste"]).unwrap_err();
        assert_eq!(
            err,
            QuizError::AnswerCountMismatch {
                expected: 2,
                actual: 1
            }
        );
    }

    #[test]
    fn test_long_submission_rejected() {
        let catalog = Catalog::builtin();
        let topic = catalog.get("Sustainability").unwrap();

        assert!(score_attempt(topic, &["a", "b", "c"]).is_err());
    }

    #[test]
    fn test_outcome_into_response() {
        let outcome = QuizOutcome {
            topic: "Plantation".to_string(),
            score: 1,
            total: 2,
        };
        assert_eq!(
            outcome.record(),
            ScoreRecord {
                topic: "Plantation".to_string(),
                score: 1
            }
        );
        let response: QuizResultResponse = outcome.into();
        assert!(!response.passed);
        assert_eq!(response.total_questions, 2);
        assert_eq!(response.message, PARTIAL_SCORE_MESSAGE);
    }
}
