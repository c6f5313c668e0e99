//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Snippet is empty")]
    EmptySnippet,

    #[error("Invalid language identifier: {0}")]
    InvalidLanguage(String),

    #[error("Invalid line range: {0}")]
    InvalidLineRange(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(DomainError::EmptySnippet.to_string(), "Snippet is empty");
        assert_eq!(
            DomainError::InvalidLineRange("5:2".to_string()).to_string(),
            "Invalid line range: 5:2"
        );
    }
}
