//! Forget command handler.

use clap::Args;
use recall_core::{config::AppConfig, AppError, AppResult};
use recall_knowledge::FactStore;

/// Remove a stored fact
#[derive(Args, Debug)]
pub struct ForgetCommand {
    /// The question whose answer should be forgotten
    #[arg(required = true, trailing_var_arg = true)]
    pub question: Vec<String>,
}

impl ForgetCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing forget command");

        let question = super::join_words(&self.question);
        if question.is_empty() {
            return Err(AppError::Config("No question provided".to_string()));
        }

        let store = super::open_store(config)?;
        match forget(&store, &question)? {
            Some(answer) => {
                println!("Deleted fact about: '{}'", question);
                println!("Forgotten answer: {}", answer);
            }
            None => println!("No stored fact about: '{}'", question),
        }

        Ok(())
    }
}

/// Delete the fact for `question`, returning the answer it held.
fn forget(store: &dyn FactStore, question: &str) -> AppResult<Option<String>> {
    let Some(answer) = store.get(question)? else {
        return Ok(None);
    };

    store.delete(question)?;
    Ok(Some(answer))
}

#[cfg(test)]
mod tests {
    use super::*;
    use recall_knowledge::SqliteFactStore;

    #[test]
    fn test_forget_returns_removed_answer() {
        let store = SqliteFactStore::in_memory().unwrap();
        store.save("capital of france", "Paris.").unwrap();

        let removed = forget(&store, "Capital of France").unwrap();
        assert_eq!(removed, Some("Paris.".to_string()));
        assert_eq!(store.count().unwrap(), 0);
    }

    #[test]
    fn test_forget_missing_fact() {
        let store = SqliteFactStore::in_memory().unwrap();
        store.save("capital of spain", "Madrid.").unwrap();

        assert_eq!(forget(&store, "capital of france").unwrap(), None);
        assert_eq!(store.count().unwrap(), 1);
    }
}
