//! Persistent fact memory.
//!
//! Stores confirmed question/answer pairs in SQLite and finds the stored
//! answer for a new question by fuzzy string similarity.

pub mod similarity;
pub mod store;
pub mod types;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use store::SqliteFactStore;
pub use types::{normalize_question, Fact, FactMatch};

use recall_core::AppResult;

/// Durable question/answer storage consulted before the language model.
///
/// Keys are normalized with [`normalize_question`]; at most one answer is
/// kept per normalized question.
pub trait FactStore: Send {
    /// Find the stored fact most similar to `query`.
    ///
    /// Scores run from 0 to 100 and compare case-insensitively; a fact only
    /// matches when its score is strictly greater than `threshold`.
    fn lookup(&self, query: &str, threshold: f64) -> AppResult<Option<FactMatch>>;

    /// Exact lookup by normalized question.
    fn get(&self, question: &str) -> AppResult<Option<String>>;

    /// Insert or overwrite the answer for `question`.
    fn save(&self, question: &str, answer: &str) -> AppResult<()>;

    /// Remove the fact for `question`. Returns whether a row was deleted.
    fn delete(&self, question: &str) -> AppResult<bool>;

    /// Number of stored facts.
    fn count(&self) -> AppResult<usize>;

    /// All stored facts, oldest first.
    fn list(&self) -> AppResult<Vec<Fact>>;
}
