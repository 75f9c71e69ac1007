//! Answer pipeline: one user turn in, one outcome out.
//!
//! A turn is handled in this order:
//! 1. `exit` ends the conversation.
//! 2. `delete <question>` removes a stored fact.
//! 3. While detail is pending, the reply is classified as a follow-up.
//! 4. Otherwise the fact store is consulted, then the language model.
//!
//! Freshly generated answers come back with a [`PendingFact`]; the caller
//! asks the user and reports back through [`AnswerPipeline::confirm`].

use crate::chunker::chunk_detail;
use crate::conversation::Conversation;
use crate::intent::{classify, is_greeting, Intent, IntentPrecedence};
use crate::session::{DialogSession, FollowUp};
use crate::splitter::split_answer;
use rand::rngs::StdRng;
use rand::SeedableRng;
use recall_core::config::{AppConfig, DEFAULT_CHUNK_MAX_LENGTH, DEFAULT_MATCH_THRESHOLD};
use recall_core::{AppError, AppResult};
use recall_knowledge::FactStore;
use recall_llm::{complete_with_timeout, LlmClient, LlmRequest};
use recall_prompt::{
    build_prompt, builtin_prompt, PromptDefinition, GENERATE_PROMPT_ID, PARAPHRASE_PROMPT_ID,
};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Tunables for the pipeline, usually taken from [`AppConfig`].
#[derive(Debug, Clone)]
pub struct PipelineSettings {
    /// Model passed to the LLM client
    pub model: String,

    /// Maximum characters per detail chunk
    pub chunk_max_length: usize,

    /// Similarity a stored question must exceed to be used
    pub match_threshold: f64,

    /// Tie-break for replies matching both "more" and "stop"
    pub precedence: IntentPrecedence,

    /// Rephrase remembered answers through the LLM
    pub paraphrase_memory: bool,

    /// Ceiling on one LLM call
    pub generation_timeout: Option<Duration>,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            model: "phi3".to_string(),
            chunk_max_length: DEFAULT_CHUNK_MAX_LENGTH,
            match_threshold: DEFAULT_MATCH_THRESHOLD,
            precedence: IntentPrecedence::default(),
            paraphrase_memory: false,
            generation_timeout: None,
        }
    }
}

impl PipelineSettings {
    pub fn from_config(config: &AppConfig) -> Self {
        let timeout_secs = config.dialog.generation_timeout_secs;

        Self {
            model: config.model.clone(),
            chunk_max_length: config.dialog.chunk_max_length,
            match_threshold: config.memory.match_threshold,
            precedence: config.dialog.precedence,
            paraphrase_memory: config.dialog.paraphrase_memory,
            generation_timeout: (timeout_secs > 0).then(|| Duration::from_secs(timeout_secs)),
        }
    }
}

/// Where an answer came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum AnswerSource {
    /// Recalled from the fact store
    Memory { question: String, score: f64 },
    /// Produced by the language model
    Generated,
}

/// A generated answer awaiting the user's verdict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PendingFact {
    /// The question as the user asked it
    pub question: String,

    /// Lead and detail rejoined
    pub answer: String,
}

/// The user's verdict on a [`PendingFact`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Confirmation {
    /// Store the answer as given
    Correct,
    /// Store this text instead
    Corrected(String),
    /// Store nothing
    Skipped,
}

/// A delivered answer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Answer {
    /// First sentence
    pub short: String,

    /// Remainder after the first sentence
    pub detail: String,

    pub source: AnswerSource,

    /// Whether detail chunks are waiting for a "more" reply
    pub offers_more: bool,

    /// Set when the answer was generated and may be learned
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pending: Option<PendingFact>,
}

/// What a turn produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum TurnOutcome {
    /// The user asked to leave
    Exit,
    /// A `delete` command ran
    Deleted { question: String, existed: bool },
    /// The input was not acted on
    Rejected { reason: String },
    /// The next detail chunk
    Revealed { chunk: String, more_remaining: bool },
    /// The user declined further detail
    Acknowledged { message: String },
    /// A new answer
    Answered(Answer),
    /// The language model failed or said nothing
    GenerationFailed { reason: String },
}

/// Orchestrates fact lookup, generation, delivery and learning.
pub struct AnswerPipeline {
    store: Box<dyn FactStore>,
    client: Arc<dyn LlmClient>,
    generate_prompt: PromptDefinition,
    paraphrase_prompt: PromptDefinition,
    settings: PipelineSettings,
    rng: Mutex<StdRng>,
}

impl AnswerPipeline {
    /// Create a pipeline using the built-in prompts.
    pub fn new(
        store: Box<dyn FactStore>,
        client: Arc<dyn LlmClient>,
        settings: PipelineSettings,
    ) -> AppResult<Self> {
        let generate_prompt = require_builtin(GENERATE_PROMPT_ID)?;
        let paraphrase_prompt = require_builtin(PARAPHRASE_PROMPT_ID)?;

        Ok(Self::with_prompts(
            store,
            client,
            settings,
            generate_prompt,
            paraphrase_prompt,
        ))
    }

    /// Create a pipeline with explicit prompt definitions.
    pub fn with_prompts(
        store: Box<dyn FactStore>,
        client: Arc<dyn LlmClient>,
        settings: PipelineSettings,
        generate_prompt: PromptDefinition,
        paraphrase_prompt: PromptDefinition,
    ) -> Self {
        tracing::debug!(
            "Answer pipeline: provider={}, model={}, threshold={}, chunk_max_length={}",
            client.provider_name(),
            settings.model,
            settings.match_threshold,
            settings.chunk_max_length
        );

        Self {
            store,
            client,
            generate_prompt,
            paraphrase_prompt,
            settings,
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Fix the acknowledgement picks for reproducible runs.
    pub fn with_rng_seed(mut self, seed: u64) -> Self {
        self.rng = Mutex::new(StdRng::seed_from_u64(seed));
        self
    }

    pub fn store(&self) -> &dyn FactStore {
        self.store.as_ref()
    }

    pub fn settings(&self) -> &PipelineSettings {
        &self.settings
    }

    /// Handle one line of user input for `conversation`.
    ///
    /// Store failures propagate as errors. Language model failures do not:
    /// they become [`TurnOutcome::GenerationFailed`].
    pub async fn handle_turn(
        &self,
        conversation: &mut Conversation,
        input: &str,
    ) -> AppResult<TurnOutcome> {
        let input = input.trim();

        if input.eq_ignore_ascii_case("exit") {
            return Ok(TurnOutcome::Exit);
        }

        if input.is_empty() {
            return Ok(TurnOutcome::Rejected {
                reason: "Please type a question.".to_string(),
            });
        }

        if let Some(question) = delete_argument(input) {
            return self.delete(question);
        }

        if conversation.session().is_awaiting() {
            let intent = classify(input, self.settings.precedence);
            let (session, follow_up) = self.advance(conversation.take_session(), intent)?;
            conversation.set_session(session);

            match follow_up {
                FollowUp::Reveal {
                    chunk,
                    more_remaining,
                    ..
                } => return Ok(TurnOutcome::Revealed { chunk, more_remaining }),
                FollowUp::Acknowledge(message) => {
                    return Ok(TurnOutcome::Acknowledged {
                        message: message.to_string(),
                    })
                }
                FollowUp::Abandoned => {}
            }
        }

        self.answer(conversation, input).await
    }

    /// Apply the user's verdict on a generated answer.
    ///
    /// Returns whether a fact was written. An empty correction is an error.
    pub fn confirm(&self, pending: PendingFact, confirmation: Confirmation) -> AppResult<bool> {
        match confirmation {
            Confirmation::Correct => {
                self.store.save(&pending.question, &pending.answer)?;
                Ok(true)
            }
            Confirmation::Corrected(text) => {
                let text = text.trim();
                if text.is_empty() {
                    return Err(AppError::Dialog("Correction is empty".to_string()));
                }
                self.store.save(&pending.question, text)?;
                Ok(true)
            }
            Confirmation::Skipped => {
                tracing::debug!("Answer for '{}' not confirmed", pending.question);
                Ok(false)
            }
        }
    }

    fn delete(&self, question: &str) -> AppResult<TurnOutcome> {
        if question.is_empty() {
            return Ok(TurnOutcome::Rejected {
                reason: "Usage: delete <question>".to_string(),
            });
        }

        let existed = self.store.delete(question)?;
        Ok(TurnOutcome::Deleted {
            question: question.to_string(),
            existed,
        })
    }

    fn advance(
        &self,
        session: DialogSession,
        intent: Intent,
    ) -> AppResult<(DialogSession, FollowUp)> {
        let mut rng = self
            .rng
            .lock()
            .map_err(|_| AppError::Dialog("Random source lock poisoned".to_string()))?;
        Ok(session.apply(intent, &mut *rng))
    }

    async fn answer(
        &self,
        conversation: &mut Conversation,
        input: &str,
    ) -> AppResult<TurnOutcome> {
        let found = self.store.lookup(input, self.settings.match_threshold)?;

        let (text, source) = match found {
            Some(fact) => {
                let text = if self.settings.paraphrase_memory {
                    self.paraphrase(input, &fact.answer).await
                } else {
                    fact.answer
                };
                let source = AnswerSource::Memory {
                    question: fact.question,
                    score: fact.score,
                };
                (text, source)
            }
            None => match self.generate(input).await {
                Ok(text) => (text, AnswerSource::Generated),
                Err(e) => {
                    tracing::warn!("Generation failed: {}", e);
                    conversation.reset_session();
                    return Ok(TurnOutcome::GenerationFailed {
                        reason: e.to_string(),
                    });
                }
            },
        };

        let greeting = is_greeting(input);
        let split = split_answer(&text);

        let session = if greeting || !split.has_detail() {
            DialogSession::idle()
        } else {
            DialogSession::begin(chunk_detail(&split.detail, self.settings.chunk_max_length))
        };
        let offers_more = session.is_awaiting();
        conversation.set_session(session);

        let pending = (source == AnswerSource::Generated && !greeting).then(|| PendingFact {
            question: input.to_string(),
            answer: split.joined(),
        });

        tracing::info!(
            "Answered from {} (detail pending: {})",
            match source {
                AnswerSource::Memory { .. } => "memory",
                AnswerSource::Generated => "model",
            },
            offers_more
        );

        Ok(TurnOutcome::Answered(Answer {
            short: split.short,
            detail: split.detail,
            source,
            offers_more,
            pending,
        }))
    }

    async fn generate(&self, question: &str) -> AppResult<String> {
        let mut variables = HashMap::new();
        variables.insert("question".to_string(), question.to_string());

        self.complete(&self.generate_prompt, variables).await
    }

    /// Rephrase a stored answer, keeping the stored text if the model fails.
    async fn paraphrase(&self, question: &str, stored: &str) -> String {
        let mut variables = HashMap::new();
        variables.insert("question".to_string(), question.to_string());
        variables.insert("answer".to_string(), stored.to_string());

        match self.complete(&self.paraphrase_prompt, variables).await {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!("Paraphrase failed, using stored answer: {}", e);
                stored.to_string()
            }
        }
    }

    async fn complete(
        &self,
        definition: &PromptDefinition,
        variables: HashMap<String, String>,
    ) -> AppResult<String> {
        let built = build_prompt(definition, variables)?;

        let mut request = LlmRequest::new(built.user, &self.settings.model);
        if let Some(system) = built.system {
            request = request.with_system(system);
        }

        let response = complete_with_timeout(
            self.client.as_ref(),
            &request,
            self.settings.generation_timeout,
        )
        .await?;
        tracing::debug!("Completion from model {}", response.model);

        let content = response.content.trim();
        if content.is_empty() {
            return Err(AppError::Llm(format!(
                "{} returned an empty answer",
                self.client.provider_name()
            )));
        }

        Ok(content.to_string())
    }
}

fn require_builtin(id: &str) -> AppResult<PromptDefinition> {
    builtin_prompt(id)?.ok_or_else(|| AppError::Prompt(format!("Missing built-in prompt: {}", id)))
}

/// The argument of a `delete` command, if `input` is one.
fn delete_argument(input: &str) -> Option<&str> {
    let (command, rest) = input
        .split_once(char::is_whitespace)
        .unwrap_or((input, ""));

    command.eq_ignore_ascii_case("delete").then(|| rest.trim())
}
