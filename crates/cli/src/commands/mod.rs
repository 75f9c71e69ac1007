//! Command handlers for the Recall CLI.
//!
//! This module organizes all CLI commands into separate submodules.

pub mod ask;
pub mod chat;
pub mod forget;
pub mod stats;

// Re-export command types for convenience
pub use ask::AskCommand;
pub use chat::ChatCommand;
pub use forget::ForgetCommand;
pub use stats::StatsCommand;

use recall_core::{config::AppConfig, AppError, AppResult};
use recall_dialog::{AnswerPipeline, PipelineSettings};
use recall_knowledge::SqliteFactStore;
use recall_llm::create_client;
use recall_prompt::{load_prompt, GENERATE_PROMPT_ID, PARAPHRASE_PROMPT_ID};

/// Open the fact store for the configured workspace.
///
/// Failure here is fatal: nothing works without memory.
pub fn open_store(config: &AppConfig) -> AppResult<SqliteFactStore> {
    let path = config.memory_path();
    tracing::debug!("Fact store: {:?}", path);
    SqliteFactStore::open(&path)
}

/// Wire the fact store, LLM client and prompts into a pipeline.
pub fn build_pipeline(config: &AppConfig) -> AppResult<AnswerPipeline> {
    let store = open_store(config)?;

    let endpoint = config.resolve_endpoint();
    let client = create_client(&config.provider, endpoint.as_deref()).map_err(AppError::Config)?;

    let prompts_dir = config.prompts_dir();
    let generate_prompt = load_prompt(&prompts_dir, GENERATE_PROMPT_ID)?;
    let paraphrase_prompt = load_prompt(&prompts_dir, PARAPHRASE_PROMPT_ID)?;

    Ok(AnswerPipeline::with_prompts(
        Box::new(store),
        client,
        PipelineSettings::from_config(config),
        generate_prompt,
        paraphrase_prompt,
    ))
}

/// Join trailing words into one question.
pub fn join_words(words: &[String]) -> String {
    words.join(" ").trim().to_string()
}
