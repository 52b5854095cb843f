// src/catalog.rs

use std::collections::HashSet;
use std::path::Path;

use validator::Validate;

use crate::models::topic::{Question, Topic};

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse catalog file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Catalog has no topics")]
    Empty,
    #[error("Duplicate topic name '{0}'")]
    DuplicateTopic(String),
    #[error("Invalid topic '{topic}': {errors}")]
    InvalidTopic {
        topic: String,
        errors: validator::ValidationErrors,
    },
}

/// Immutable set of training topics, in display order.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    topics: Vec<Topic>,
}

impl Catalog {
    /// Builds a catalog, rejecting it if any topic breaks the question invariants.
    pub fn new(topics: Vec<Topic>) -> Result<Self, CatalogError> {
        let catalog = Self { topics };
        catalog.validate()?;
        Ok(catalog)
    }

    /// Loads topics from a JSON array of `Topic` objects.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let raw = std::fs::read_to_string(path)?;
        let topics: Vec<Topic> = serde_json::from_str(&raw)?;
        Self::new(topics)
    }

    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.topics.is_empty() {
            return Err(CatalogError::Empty);
        }
        let mut names = HashSet::new();
        for topic in &self.topics {
            topic.validate().map_err(|errors| CatalogError::InvalidTopic {
                topic: topic.name.clone(),
                errors,
            })?;
            if !names.insert(topic.name.as_str()) {
                return Err(CatalogError::DuplicateTopic(topic.name.clone()));
            }
        }
        Ok(())
    }

    pub fn topics(&self) -> &[Topic] {
        &self.topics
    }

    pub fn names(&self) -> Vec<&str> {
        self.topics.iter().map(|t| t.name.as_str()).collect()
    }

    pub fn get(&self, name: &str) -> Option<&Topic> {
        self.topics.iter().find(|t| t.name == name)
    }

    /// The topic preselected when the page is opened without a choice.
    pub fn first(&self) -> &Topic {
        // `validate` guarantees at least one topic.
        &self.topics[0]
    }

    /// The workplace safety and sustainability topics shipped with the service.
    pub fn builtin() -> Self {
        Self {
            topics: builtin_topics(),
        }
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

fn topic(name: &str, video_url: &str, questions: Vec<Question>) -> Topic {
    Topic {
        name: name.to_string(),
        video_url: video_url.to_string(),
        questions,
    }
}

fn builtin_topics() -> Vec<Topic> {
    vec![
        topic(
            "Machine Safety",
            "https://www.youtube.com/watch?v=WQMAazVc4KY",
            vec![
                Question::new(
                    "What is the first step before using a machine?",
                    &["Read the manual", "Turn it on", "Check social media"],
                    "Read the manual",
                ),
                Question::new(
                    "Why is PPE important?",
                    &["It looks cool", "It protects from injury", "It’s optional"],
                    "It protects from injury",
                ),
            ],
        ),
        topic(
            "Water Conservation",
            "https://youtu.be/QLOGvbSrIDk?feature=shared",
            vec![
                Question::new(
                    "What is one way to conserve water?",
                    &["Leave the tap running", "Use low-flow faucets", "Take longer showers"],
                    "Use low-flow faucets",
                ),
                Question::new(
                    "Why is water conservation important?",
                    &["For fun", "To save money and resources", "To waste less time"],
                    "To save money and resources",
                ),
            ],
        ),
        topic(
            "Electricity Safety",
            "https://youtu.be/zRHtJLFJf78?si=OXvehg3QGyiuaXEd",
            vec![
                Question::new(
                    "Which of these saves energy?",
                    &["Leaving lights on", "Using LED bulbs", "Watching TV all day"],
                    "Using LED bulbs",
                ),
                Question::new(
                    "Why should we reduce electricity use?",
                    &[
                        "To lower costs and emissions",
                        "To charge phones faster",
                        "To avoid paying taxes",
                    ],
                    "To lower costs and emissions",
                ),
            ],
        ),
        topic(
            "Plantation",
            "https://youtu.be/4soBIwz4eMU?si=mtLpwDhPloRC7A5n",
            vec![
                Question::new(
                    "Why is tree plantation important?",
                    &[
                        "It decorates the street",
                        "It reduces pollution and improves air quality",
                        "It increases traffic",
                    ],
                    "It reduces pollution and improves air quality",
                ),
                Question::new(
                    "Which of these activities supports plantation?",
                    &[
                        "Cutting trees for space",
                        "Organizing a tree-planting drive",
                        "Burning leaves",
                    ],
                    "Organizing a tree-planting drive",
                ),
            ],
        ),
        topic(
            "Sustainability",
            "https://youtu.be/OT3gsCbCKdI?si=yWRJ5lBrFnwpgR9B",
            vec![
                Question::new(
                    "What does sustainability mean in the workplace?",
                    &[
                        "Using resources wisely to protect the future",
                        "Working overtime every day",
                        "Throwing everything in the trash",
                    ],
                    "Using resources wisely to protect the future",
                ),
                Question::new(
                    "Which of these is a sustainable practice?",
                    &[
                        "Using single-use plastics",
                        "Printing unnecessary documents",
                        "Recycling and reducing waste",
                    ],
                    "Recycling and reducing waste",
                ),
            ],
        ),
    ]
}
