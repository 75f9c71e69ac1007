//! Prompt loader for built-in and workspace YAML prompt definitions.

use crate::types::PromptDefinition;
use recall_core::{AppError, AppResult};
use std::path::Path;

/// Prompt used to generate a fresh answer.
pub const GENERATE_PROMPT_ID: &str = "answer.generate";

/// Prompt used to rephrase an answer recalled from memory.
pub const PARAPHRASE_PROMPT_ID: &str = "answer.paraphrase";

const BUILTIN_PROMPTS: &[(&str, &str)] = &[
    (
        GENERATE_PROMPT_ID,
        include_str!("../prompts/answer.generate.yml"),
    ),
    (
        PARAPHRASE_PROMPT_ID,
        include_str!("../prompts/answer.paraphrase.yml"),
    ),
];

/// Load a prompt definition by ID.
///
/// A file named `<id>.yml` in `prompts_dir` overrides the built-in
/// definition of the same ID.
///
/// # Arguments
/// * `prompts_dir` - Directory holding prompt overrides (e.g. `.recall/prompts`)
/// * `prompt_id` - Prompt identifier (e.g., "answer.generate")
///
/// # Returns
/// A parsed `PromptDefinition` or an error if not found/invalid.
///
/// # Example
/// ```no_run
/// use recall_prompt::{load_prompt, GENERATE_PROMPT_ID};
/// use std::path::Path;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let prompt = load_prompt(Path::new(".recall/prompts"), GENERATE_PROMPT_ID)?;
/// println!("Loaded prompt: {}", prompt.title);
/// # Ok(())
/// # }
/// ```
pub fn load_prompt(prompts_dir: &Path, prompt_id: &str) -> AppResult<PromptDefinition> {
    let prompt_file = prompts_dir.join(format!("{}.yml", prompt_id));

    if !prompt_file.exists() {
        tracing::debug!("No override at {:?}, using built-in prompt", prompt_file);
        return builtin_prompt(prompt_id)?.ok_or_else(|| {
            AppError::Prompt(format!(
                "Prompt '{}' is not built in and {:?} does not exist",
                prompt_id, prompt_file
            ))
        });
    }

    let contents = std::fs::read_to_string(&prompt_file).map_err(|e| {
        AppError::Prompt(format!(
            "Failed to read prompt file {:?}: {}",
            prompt_file, e
        ))
    })?;

    let definition = parse_prompt(&contents)
        .map_err(|e| AppError::Prompt(format!("{:?}: {}", prompt_file, e)))?;

    tracing::info!("Loaded prompt override: {} ({})", definition.id, definition.title);

    Ok(definition)
}

/// Look up a prompt shipped with the crate.
pub fn builtin_prompt(prompt_id: &str) -> AppResult<Option<PromptDefinition>> {
    BUILTIN_PROMPTS
        .iter()
        .find(|(id, _)| *id == prompt_id)
        .map(|(_, yaml)| parse_prompt(yaml))
        .transpose()
}

fn parse_prompt(contents: &str) -> AppResult<PromptDefinition> {
    let definition: PromptDefinition = serde_yaml::from_str(contents)
        .map_err(|e| AppError::Prompt(format!("Failed to parse prompt YAML: {}", e)))?;

    validate_prompt(&definition)?;
    Ok(definition)
}

/// Validate a prompt definition.
fn validate_prompt(def: &PromptDefinition) -> AppResult<()> {
    if def.id.is_empty() {
        return Err(AppError::Prompt("Prompt ID cannot be empty".to_string()));
    }

    if def.title.is_empty() {
        return Err(AppError::Prompt("Prompt title cannot be empty".to_string()));
    }

    if def.template.is_empty() {
        return Err(AppError::Prompt(
            "Prompt template cannot be empty".to_string(),
        ));
    }

    if !def.api_version.contains('.') {
        return Err(AppError::Prompt(format!(
            "Invalid apiVersion format: {}. Expected format: 'x.y'",
            def.api_version
        )));
    }

    Ok(())
}
