//! Error types for the Recall agent.
//!
//! This module defines a unified error enum that covers all error categories
//! in the application, including configuration, I/O, LLM, fact memory,
//! prompt, and dialog errors.

use thiserror::Error;

/// Unified error type for the Recall agent.
///
/// All fallible functions in the workspace return `Result<T, AppError>`.
/// Errors are represented and propagated, never panicked on.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O and filesystem errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// LLM provider errors
    #[error("LLM error: {0}")]
    Llm(String),

    /// Fact store errors
    #[error("Memory error: {0}")]
    Memory(String),

    /// Prompt system errors
    #[error("Prompt error: {0}")]
    Prompt(String),

    /// Dialog and pipeline errors
    #[error("Dialog error: {0}")]
    Dialog(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic errors
    #[error("{0}")]
    Other(String),
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

impl From<serde_yaml::Error> for AppError {
    fn from(err: serde_yaml::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

/// Convenience type alias for Results with AppError.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AppError::Memory("database locked".to_string());
        assert_eq!(err.to_string(), "Memory error: database locked");
    }

    #[test]
    fn test_from_yaml_error() {
        let yaml_err = serde_yaml::from_str::<u32>("not: a number").unwrap_err();
        let err: AppError = yaml_err.into();
        assert!(matches!(err, AppError::Serialization(_)));
    }
}
