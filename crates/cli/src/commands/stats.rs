//! Stats command handler.
//!
//! Handles fact memory statistics display.

use clap::Args;
use recall_core::{config::AppConfig, AppResult};
use recall_knowledge::FactStore;

/// Show fact memory statistics
#[derive(Args, Debug)]
pub struct StatsCommand {
    /// List every stored fact
    #[arg(short, long)]
    pub list: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl StatsCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing stats command");
        tracing::debug!("Stats options: {:?}", self);

        let path = config.memory_path();
        let store = super::open_store(config)?;
        let count = store.count()?;
        let facts = if self.list { store.list()? } else { Vec::new() };

        if self.json {
            let mut output = serde_json::json!({
                "memoryPath": path,
                "factCount": count,
                "matchThreshold": config.memory.match_threshold,
            });
            if self.list {
                output["facts"] = serde_json::to_value(&facts)?;
            }
            println!("{}", serde_json::to_string_pretty(&output)?);
            return Ok(());
        }

        println!("Memory:    {}", path.display());
        println!("Facts:     {}", count);
        println!("Threshold: {}", config.memory.match_threshold);

        for fact in &facts {
            println!();
            println!("Q: {}", fact.question);
            println!("A: {}", fact.answer);
        }

        Ok(())
    }
}
