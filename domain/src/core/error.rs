//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid question: {0}")]
    InvalidQuestion(String),

    #[error("Timeout must be at least one minute")]
    InvalidTimeout,

    #[error("Chunk size must be greater than zero")]
    InvalidChunkSize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_question_display() {
        let error = DomainError::InvalidQuestion("empty".to_string());
        assert_eq!(error.to_string(), "Invalid question: empty");
    }

    #[test]
    fn test_invalid_timeout_display() {
        assert_eq!(
            DomainError::InvalidTimeout.to_string(),
            "Timeout must be at least one minute"
        );
    }
}
