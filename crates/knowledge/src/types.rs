//! Fact memory type definitions.

use serde::{Deserialize, Serialize};

/// A persisted question/answer pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fact {
    /// Normalized question (the primary key)
    pub question: String,

    /// Stored answer text
    pub answer: String,
}

/// A stored fact that matched a query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactMatch {
    /// Normalized question that matched
    pub question: String,

    /// Stored answer text
    pub answer: String,

    /// Similarity score, 0-100
    pub score: f64,
}

/// Normalize a question into its storage key.
///
/// Lower-cases, trims and collapses internal whitespace runs.
pub fn normalize_question(question: &str) -> String {
    question
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
