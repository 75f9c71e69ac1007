//! Prompt system for the Recall agent.
//!
//! This crate provides structured prompt management with:
//! - YAML-based prompt definitions (built in, overridable per workspace)
//! - Handlebars template rendering for the system and user messages

pub mod builder;
pub mod loader;
pub mod types;

// Re-export main types
pub use builder::build_prompt;
pub use loader::{builtin_prompt, load_prompt, GENERATE_PROMPT_ID, PARAPHRASE_PROMPT_ID};
pub use types::{BuiltPrompt, BuiltPromptMetadata, PromptDefinition};
