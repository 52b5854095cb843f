// src/models/topic.rs

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use url::Url;
use utoipa::ToSchema;
use validator::Validate;

/// A named training subject with its video and quiz.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Topic {
    #[validate(length(min = 1, max = 100))]
    pub name: String,

    /// Link to the topic video (YouTube watch or short link).
    #[validate(custom(function = validate_url_string))]
    pub video_url: String,

    /// Quiz questions, in the order they are asked.
    #[validate(length(min = 1), custom(function = validate_questions))]
    pub questions: Vec<Question>,
}

/// One multiple-choice question. `answer` must be one of `options`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub prompt: String,
    pub options: Vec<String>,
    pub answer: String,
}

impl Question {
    pub fn new(prompt: &str, options: &[&str], answer: &str) -> Self {
        Self {
            prompt: prompt.to_string(),
            options: options.iter().map(|o| o.to_string()).collect(),
            answer: answer.to_string(),
        }
    }

    pub fn is_correct(&self, selected: &str) -> bool {
        self.answer == selected
    }
}

/// Question as sent to clients (excludes the answer).
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PublicQuestion {
    pub prompt: String,
    pub options: Vec<String>,
}

impl From<&Question> for PublicQuestion {
    fn from(q: &Question) -> Self {
        Self {
            prompt: q.prompt.clone(),
            options: q.options.clone(),
        }
    }
}

/// Listing entry for the topic selector.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TopicSummary {
    pub name: String,
    pub video_url: String,
    pub question_count: usize,
}

/// Full topic view for a quiz client.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TopicDetail {
    pub name: String,
    pub video_url: String,
    /// Embeddable player URL, when the video host supports one.
    pub embed_url: Option<String>,
    pub questions: Vec<PublicQuestion>,
}

impl From<&Topic> for TopicSummary {
    fn from(topic: &Topic) -> Self {
        Self {
            name: topic.name.clone(),
            video_url: topic.video_url.clone(),
            question_count: topic.questions.len(),
        }
    }
}

impl From<&Topic> for TopicDetail {
    fn from(topic: &Topic) -> Self {
        Self {
            name: topic.name.clone(),
            video_url: topic.video_url.clone(),
            embed_url: crate::utils::video::embed_url(&topic.video_url),
            questions: topic.questions.iter().map(PublicQuestion::from).collect(),
        }
    }
}

/// Validates that a string is a correctly formatted URL.
fn validate_url_string(url: &str) -> Result<(), validator::ValidationError> {
    if Url::parse(url).is_err() {
        return Err(validator::ValidationError::new("invalid_url"));
    }
    Ok(())
}

/// Every question needs a prompt, distinct non-empty options and an answer among them.
fn validate_questions(questions: &[Question]) -> Result<(), validator::ValidationError> {
    for q in questions {
        if q.prompt.trim().is_empty() {
            return Err(validator::ValidationError::new("empty_prompt"));
        }
        if q.options.is_empty() {
            return Err(validator::ValidationError::new("options_cannot_be_empty"));
        }
        let mut seen = HashSet::new();
        for opt in &q.options {
            if opt.trim().is_empty() {
                return Err(validator::ValidationError::new("empty_option"));
            }
            if !seen.insert(opt.as_str()) {
                return Err(validator::ValidationError::new("duplicate_option"));
            }
        }
        if !q.options.contains(&q.answer) {
            return Err(validator::ValidationError::new("answer_not_in_options"));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn topic_with(question: Question) -> Topic {
        Topic {
            name: "Test".to_string(),
            video_url: "https://youtu.be/abc123".to_string(),
            questions: vec![question],
        }
    }

    #[test]
    fn test_valid_topic_passes() {
        let topic = topic_with(Question::new("Q?", &["A", "B"], "A"));
        assert!(topic.validate().is_ok());
    }

    #[test]
    fn test_answer_must_be_an_option() {
        let topic = topic_with(Question::new("Q?", &["A", "B"], "C"));
        assert!(topic.validate().is_err());
    }

    #[test]
    fn test_duplicate_options_rejected() {
        let topic = topic_with(Question::new("Q?", &["A", "A"], "A"));
        assert!(topic.validate().is_err());
    }

    #[test]
    fn test_bad_video_url_rejected() {
        let mut topic = topic_with(Question::new("Q?", &["A", "B"], "B"));
        topic.video_url = "not a url".to_string();
        assert!(topic.validate().is_err());
    }

    #[test]
    fn test_public_question_hides_answer() {
        let q = Question::new("Q?", &["A", "B"], "B");
        let json = serde_json::to_value(PublicQuestion::from(&q)).unwrap();
        assert!(json.get("answer").is_none());
        assert_eq!(json["options"], serde_json::json!(["A", "B"]));
    }
}
