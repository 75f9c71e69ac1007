//! LLM integration crate for the Recall agent.
//!
//! This crate provides a provider-agnostic abstraction for interacting with
//! Large Language Models (LLMs) through a unified trait-based interface.
//!
//! # Providers
//! - **Ollama**: Local LLM runtime (default)
//! - **Mock**: Scripted responses for tests and offline runs
//!
//! # Example
//! ```no_run
//! use recall_llm::{LlmClient, LlmRequest, providers::OllamaClient};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = OllamaClient::new();
//! let request = LlmRequest::new("What is the capital of France?", "phi3");
//! let response = client.complete(&request).await?;
//! println!("{}", response.content);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod factory;
pub mod providers;

// Re-export main types
pub use client::{complete_with_timeout, LlmClient, LlmRequest, LlmResponse};
pub use factory::create_client;
pub use providers::{MockClient, OllamaClient};
