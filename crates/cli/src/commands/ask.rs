//! Ask command handler.
//!
//! Answers one question non-interactively: memory first, then the model.

use clap::Args;
use recall_core::{config::AppConfig, AppError, AppResult};
use recall_dialog::{AnswerSource, Confirmation, Conversation, TurnOutcome};

/// Ask a single question
#[derive(Args, Debug)]
pub struct AskCommand {
    /// The question to ask
    #[arg(required = true, trailing_var_arg = true)]
    pub question: Vec<String>,

    /// Print the full detail instead of only the first sentence
    #[arg(long)]
    pub full: bool,

    /// Store a generated answer without asking
    #[arg(long)]
    pub remember: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl AskCommand {
    /// Execute the ask command.
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing ask command");
        tracing::debug!("Ask command options: {:?}", self);

        let question = super::join_words(&self.question);
        if question.is_empty() {
            return Err(AppError::Config("No question provided".to_string()));
        }

        let pipeline = super::build_pipeline(config)?;
        let mut conversation = Conversation::new("ask");
        let outcome = pipeline.handle_turn(&mut conversation, &question).await?;

        if self.remember {
            if let TurnOutcome::Answered(ref answer) = outcome {
                if let Some(ref pending) = answer.pending {
                    pipeline.confirm(pending.clone(), Confirmation::Correct)?;
                }
            }
        }

        if self.json {
            let output = serde_json::json!({
                "question": question,
                "provider": config.provider,
                "model": config.model,
                "outcome": outcome,
            });
            let json = serde_json::to_string_pretty(&output)?;
            println!("{}", json);
            return Ok(());
        }

        match outcome {
            TurnOutcome::Answered(answer) => {
                if let AnswerSource::Memory { question, score } = &answer.source {
                    tracing::debug!("Recalled '{}' (score {:.1})", question, score);
                }

                if self.full && !answer.detail.is_empty() {
                    println!("{} {}", answer.short, answer.detail);
                } else {
                    println!("{}", answer.short);
                    if answer.offers_more {
                        eprintln!("(more detail available, use --full)");
                    }
                }
            }
            TurnOutcome::GenerationFailed { reason } => return Err(AppError::Llm(reason)),
            TurnOutcome::Deleted { question, existed } => {
                println!(
                    "{} fact about: '{}'",
                    if existed { "Deleted" } else { "No stored" },
                    question
                );
            }
            TurnOutcome::Rejected { reason } => println!("{}", reason),
            // A fresh conversation has no pending detail
            TurnOutcome::Revealed { .. } | TurnOutcome::Acknowledged { .. } | TurnOutcome::Exit => {}
        }

        Ok(())
    }
}
