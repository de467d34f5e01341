//! Question value object

use super::error::DomainError;
use serde::{Deserialize, Serialize};

/// A question to be broadcast to the group (Value Object)
///
/// The text is immutable once created and is shared by every response
/// slot of a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    content: String,
}

impl Question {
    /// Try to create a new question, rejecting blank content
    pub fn try_new(content: impl Into<String>) -> Result<Self, DomainError> {
        let content = content.into();
        if content.trim().is_empty() {
            Err(DomainError::InvalidQuestion(
                "question cannot be empty".to_string(),
            ))
        } else {
            Ok(Self { content })
        }
    }

    /// Get the question content
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Consume and return the inner content
    pub fn into_content(self) -> String {
        self.content
    }
}

impl std::fmt::Display for Question {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.content)
    }
}

impl TryFrom<&str> for Question {
    type Error = DomainError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Question::try_new(s)
    }
}

impl TryFrom<String> for Question {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Question::try_new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_question_creation() {
        let q = Question::try_new("Where should we meet?").unwrap();
        assert_eq!(q.content(), "Where should we meet?");
    }

    #[test]
    fn test_question_try_from_str() {
        let q: Question = "Lunch?".try_into().unwrap();
        assert_eq!(q.to_string(), "Lunch?");
    }

    #[test]
    fn test_blank_question_rejected() {
        assert!(Question::try_new("").is_err());
        assert!(Question::try_new("   \n").is_err());
    }
}
