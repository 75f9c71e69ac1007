//! SQLite-backed fact store.

use crate::similarity::ratio;
use crate::types::{normalize_question, Fact, FactMatch};
use crate::FactStore;
use recall_core::{AppError, AppResult};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

/// Fact store persisted in a single SQLite table.
pub struct SqliteFactStore {
    conn: Connection,
}

impl SqliteFactStore {
    /// Open (or create) the fact database at `db_path`.
    pub fn open(db_path: &Path) -> AppResult<Self> {
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                AppError::Memory(format!("Failed to create memory directory: {}", e))
            })?;
        }

        let conn = Connection::open(db_path)
            .map_err(|e| AppError::Memory(format!("Failed to open fact database: {}", e)))?;

        let store = Self::with_connection(conn)?;
        tracing::debug!("Opened fact store at {:?}", db_path);
        Ok(store)
    }

    /// Open a transient in-memory store.
    pub fn in_memory() -> AppResult<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| AppError::Memory(format!("Failed to open in-memory database: {}", e)))?;
        Self::with_connection(conn)
    }

    fn with_connection(conn: Connection) -> AppResult<Self> {
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS facts (
                question TEXT PRIMARY KEY,
                answer TEXT NOT NULL
            );
            "#,
        )
        .map_err(|e| AppError::Memory(format!("Failed to create facts table: {}", e)))?;

        Ok(Self { conn })
    }
}

impl FactStore for SqliteFactStore {
    fn lookup(&self, query: &str, threshold: f64) -> AppResult<Option<FactMatch>> {
        let needle = normalize_question(query);
        let facts = self.list()?;

        let mut best: Option<FactMatch> = None;
        for fact in facts {
            let score = ratio(&needle, &fact.question);
            if score <= threshold {
                continue;
            }
            if best.as_ref().map_or(true, |b| score > b.score) {
                best = Some(FactMatch {
                    question: fact.question,
                    answer: fact.answer,
                    score,
                });
            }
        }

        match best {
            Some(ref m) => tracing::debug!(
                "Memory hit for '{}': '{}' (score {:.1})",
                needle,
                m.question,
                m.score
            ),
            None => tracing::debug!("Memory miss for '{}' (threshold {})", needle, threshold),
        }

        Ok(best)
    }

    fn get(&self, question: &str) -> AppResult<Option<String>> {
        self.conn
            .query_row(
                "SELECT answer FROM facts WHERE question = ?1",
                params![normalize_question(question)],
                |row| row.get(0),
            )
            .optional()
            .map_err(|e| AppError::Memory(format!("Failed to read fact: {}", e)))
    }

    fn save(&self, question: &str, answer: &str) -> AppResult<()> {
        let key = normalize_question(question);

        self.conn
            .execute(
                "INSERT OR REPLACE INTO facts (question, answer) VALUES (?1, ?2)",
                params![key, answer],
            )
            .map_err(|e| AppError::Memory(format!("Failed to save fact: {}", e)))?;

        tracing::info!("Saved fact for '{}'", key);
        Ok(())
    }

    fn delete(&self, question: &str) -> AppResult<bool> {
        let key = normalize_question(question);

        let removed = self
            .conn
            .execute("DELETE FROM facts WHERE question = ?1", params![key])
            .map_err(|e| AppError::Memory(format!("Failed to delete fact: {}", e)))?;

        tracing::info!("Deleted {} fact(s) for '{}'", removed, key);
        Ok(removed > 0)
    }

    fn count(&self) -> AppResult<usize> {
        self.conn
            .query_row("SELECT COUNT(*) FROM facts", [], |row| {
                row.get::<_, i64>(0).map(|v| v as usize)
            })
            .map_err(|e| AppError::Memory(format!("Failed to count facts: {}", e)))
    }

    fn list(&self) -> AppResult<Vec<Fact>> {
        let mut stmt = self
            .conn
            .prepare("SELECT question, answer FROM facts ORDER BY rowid")
            .map_err(|e| AppError::Memory(format!("Failed to prepare query: {}", e)))?;

        let rows = stmt
            .query_map([], |row| {
                Ok(Fact {
                    question: row.get(0)?,
                    answer: row.get(1)?,
                })
            })
            .map_err(|e| AppError::Memory(format!("Failed to query facts: {}", e)))?;

        rows.collect::<Result<Vec<_>, _>>()
            .map_err(|e| AppError::Memory(format!("Failed to read fact row: {}", e)))
    }
}
