//! Chat command handler.
//!
//! Interactive loop: one line in, one reply out. Generated answers are
//! followed by a "Is this correct?" exchange that teaches the fact store.

use clap::Args;
use recall_core::{config::AppConfig, AppResult};
use recall_dialog::{
    AnswerPipeline, AnswerSource, Confirmation, Conversation, PendingFact, TurnOutcome,
    MORE_PROMPT,
};
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};

/// Start an interactive conversation
#[derive(Args, Debug)]
pub struct ChatCommand {
    /// Seed for reproducible acknowledgements
    #[arg(long)]
    pub seed: Option<u64>,

    /// Never ask whether answers are correct
    #[arg(long)]
    pub no_learn: bool,
}

impl ChatCommand {
    /// Execute the chat command.
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing chat command");
        tracing::debug!("Chat options: {:?}", self);

        let mut pipeline = super::build_pipeline(config)?;
        if let Some(seed) = self.seed {
            pipeline = pipeline.with_rng_seed(seed);
        }

        let stdin = tokio::io::BufReader::new(tokio::io::stdin());
        let mut stdout = std::io::stdout();

        run_chat(&pipeline, stdin, &mut stdout, !self.no_learn).await
    }
}

/// Drive a conversation from `input` until `exit` or end of input.
///
/// Per-turn errors are reported to the user and the loop continues.
pub async fn run_chat<R, W>(
    pipeline: &AnswerPipeline,
    input: R,
    out: &mut W,
    learn: bool,
) -> AppResult<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();
    let mut conversation = Conversation::new("local");

    writeln!(
        out,
        "Recall chat (type 'exit' to quit, 'delete <question>' to remove a fact)"
    )?;

    loop {
        let Some(line) = read_reply(&mut lines, out, "You: ").await? else {
            break;
        };

        let outcome = match pipeline.handle_turn(&mut conversation, &line).await {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::error!("Turn failed: {}", e);
                writeln!(out, "Bot: Sorry, something went wrong: {}", e)?;
                continue;
            }
        };

        if outcome == TurnOutcome::Exit {
            break;
        }

        if let Some(pending) = render(&outcome, out)? {
            if learn {
                confirm(pipeline, pending, &mut lines, out).await?;
            }
        }
    }

    writeln!(out, "Bye!")?;
    Ok(())
}

/// Print an outcome. Returns the fact awaiting confirmation, if any.
fn render<W: Write>(outcome: &TurnOutcome, out: &mut W) -> AppResult<Option<PendingFact>> {
    match outcome {
        TurnOutcome::Exit => {}
        TurnOutcome::Deleted { question, existed } => {
            if *existed {
                writeln!(out, "Deleted fact about: '{}'", question)?;
            } else {
                writeln!(out, "No stored fact about: '{}'", question)?;
            }
        }
        TurnOutcome::Rejected { reason } => writeln!(out, "Bot: {}", reason)?,
        TurnOutcome::Revealed {
            chunk,
            more_remaining,
        } => {
            writeln!(out, "Bot (detail): {}", chunk)?;
            if *more_remaining {
                writeln!(out, "Bot: {}", MORE_PROMPT)?;
            }
        }
        TurnOutcome::Acknowledged { message } => writeln!(out, "Bot: {}", message)?,
        TurnOutcome::Answered(answer) => {
            let label = match answer.source {
                AnswerSource::Memory { .. } => "Bot (Memory)",
                AnswerSource::Generated => "Bot (LLM)",
            };
            if answer.offers_more {
                writeln!(out, "{}: {} {}", label, answer.short, MORE_PROMPT)?;
            } else {
                writeln!(out, "{}: {}", label, answer.short)?;
            }
            return Ok(answer.pending.clone());
        }
        TurnOutcome::GenerationFailed { reason } => {
            writeln!(out, "Bot: Sorry, I couldn't come up with an answer ({})", reason)?;
        }
    }

    Ok(None)
}

/// Ask whether a generated answer is right and store the verdict.
async fn confirm<R, W>(
    pipeline: &AnswerPipeline,
    pending: PendingFact,
    lines: &mut Lines<R>,
    out: &mut W,
) -> AppResult<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let Some(reply) = read_reply(lines, out, "Is this correct? (y/n): ").await? else {
        return Ok(());
    };

    let confirmation = match reply.trim().to_lowercase().as_str() {
        "y" | "yes" => Confirmation::Correct,
        "n" | "no" => {
            let correction = read_reply(lines, out, "Please provide the correct answer: ")
                .await?
                .unwrap_or_default();
            Confirmation::Corrected(correction)
        }
        _ => Confirmation::Skipped,
    };
    let corrected = matches!(confirmation, Confirmation::Corrected(_));

    match pipeline.confirm(pending, confirmation) {
        Ok(true) if corrected => writeln!(out, "Correct answer saved.")?,
        Ok(true) => writeln!(out, "Saved to memory.")?,
        Ok(false) => {}
        Err(e) => {
            tracing::warn!("Answer not saved: {}", e);
            writeln!(out, "Nothing saved: {}", e)?;
        }
    }

    Ok(())
}

async fn read_reply<R, W>(
    lines: &mut Lines<R>,
    out: &mut W,
    prompt: &str,
) -> AppResult<Option<String>>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    write!(out, "{}", prompt)?;
    out.flush()?;
    Ok(lines.next_line().await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use recall_dialog::PipelineSettings;
    use recall_knowledge::{FactStore, SqliteFactStore};
    use recall_llm::MockClient;
    use std::sync::Arc;

    fn pipeline(responses: &[&str]) -> AnswerPipeline {
        let client = Arc::new(MockClient::new(
            responses.iter().map(|r| r.to_string()).collect(),
        ));
        let settings = PipelineSettings {
            chunk_max_length: 40,
            ..PipelineSettings::default()
        };
        AnswerPipeline::new(
            Box::new(SqliteFactStore::in_memory().unwrap()),
            client,
            settings,
        )
        .unwrap()
        .with_rng_seed(5)
    }

    async fn transcript(pipeline: &AnswerPipeline, input: &str) -> String {
        let mut out = Vec::new();
        run_chat(pipeline, input.as_bytes(), &mut out, true)
            .await
            .unwrap();
        String::from_utf8(out).unwrap()
    }

    #[tokio::test]
    async fn test_generate_confirm_and_reveal() {
        let pipeline = pipeline(&[
            "Paris is the capital of France. It has been the capital since 987. It sits on the Seine.",
        ]);

        let text = transcript(
            &pipeline,
            "What is the capital of France?\ny\nyes\nyes\nexit\n",
        )
        .await;

        assert!(text.contains(
            "Bot (LLM): Paris is the capital of France. Would you like to hear more?"
        ));
        assert!(text.contains("Saved to memory."));
        assert!(text.contains("Bot (detail): It has been the capital since 987."));
        assert!(text.contains("Bot (detail): It sits on the Seine."));
        assert!(text.ends_with("Bye!\n"));
        assert_eq!(pipeline.store().count().unwrap(), 1);
    }

    #[tokio::test]
    async fn test_correction_is_learned() {
        let pipeline = pipeline(&["Sydney is the capital of Australia."]);

        let text = transcript(
            &pipeline,
            "capital of australia\nn\nCanberra is the capital of Australia.\ncapital of australia\n",
        )
        .await;

        assert!(text.contains("Correct answer saved."));
        assert!(text.contains("Bot (Memory): Canberra is the capital of Australia."));
    }

    #[tokio::test]
    async fn test_errors_do_not_end_the_loop() {
        let pipeline = pipeline(&[]);

        let text = transcript(&pipeline, "anything\ndelete\nexit\n").await;

        assert!(text.contains("Bot: Sorry, I couldn't come up with an answer"));
        assert!(text.contains("Bot: Usage: delete <question>"));
        assert!(!text.contains("Is this correct?"));
    }

    #[tokio::test]
    async fn test_end_of_input_ends_chat() {
        let pipeline = pipeline(&[]);
        let text = transcript(&pipeline, "").await;
        assert!(text.ends_with("Bye!\n"));
    }
}
