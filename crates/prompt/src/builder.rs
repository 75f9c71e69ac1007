//! Prompt builder for rendering templates.

use crate::types::{BuiltPrompt, PromptDefinition};
use handlebars::Handlebars;
use recall_core::{AppError, AppResult};
use std::collections::HashMap;

/// Build a prompt from a definition and input variables.
///
/// Both the system instruction and the user template are rendered with
/// Handlebars using the same variables.
///
/// # Arguments
/// * `definition` - Prompt definition (built in or loaded from YAML)
/// * `variables` - Template variables (e.g., "question" -> user input)
///
/// # Example
/// ```no_run
/// use recall_prompt::{build_prompt, builtin_prompt, GENERATE_PROMPT_ID};
/// use std::collections::HashMap;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let def = builtin_prompt(GENERATE_PROMPT_ID)?.expect("built in");
/// let mut vars = HashMap::new();
/// vars.insert("question".to_string(), "What is Rust?".to_string());
///
/// let built = build_prompt(&def, vars)?;
/// println!("User prompt: {}", built.user);
/// # Ok(())
/// # }
/// ```
pub fn build_prompt(
    definition: &PromptDefinition,
    variables: HashMap<String, String>,
) -> AppResult<BuiltPrompt> {
    tracing::debug!("Building prompt: {}", definition.id);

    let user = render_template(&definition.template, &variables)?;

    let system = definition
        .system
        .as_deref()
        .map(|s| render_template(s, &variables))
        .transpose()?
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());

    Ok(BuiltPrompt::new(
        system,
        user,
        definition.id.clone(),
        variables,
    ))
}

/// Render a Handlebars template with variables.
fn render_template(template: &str, variables: &HashMap<String, String>) -> AppResult<String> {
    let mut handlebars = Handlebars::new();

    // Plain text, not HTML
    handlebars.register_escape_fn(handlebars::no_escape);

    handlebars
        .register_template_string("prompt", template)
        .map_err(|e| AppError::Prompt(format!("Failed to register template: {}", e)))?;

    let rendered = handlebars
        .render("prompt", &variables)
        .map_err(|e| AppError::Prompt(format!("Failed to render template: {}", e)))?;

    Ok(rendered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::{builtin_prompt, PARAPHRASE_PROMPT_ID};

    fn create_test_definition(system: Option<&str>) -> PromptDefinition {
        PromptDefinition {
            id: "test.prompt".to_string(),
            title: "Test".to_string(),
            api_version: "1.0".to_string(),
            created_by: "test".to_string(),
            system: system.map(str::to_string),
            template: "Question: {{question}}".to_string(),
        }
    }

    #[test]
    fn test_render_simple_template() {
        let mut vars = HashMap::new();
        vars.insert("question".to_string(), "Hello, world!".to_string());

        let result = render_template("Question: {{question}}", &vars);
        assert_eq!(result.unwrap(), "Question: Hello, world!");
    }

    #[test]
    fn test_no_html_escaping() {
        let mut vars = HashMap::new();
        vars.insert("question".to_string(), "Is 1 < 2 && 3 > 2?".to_string());

        let result = render_template("{{question}}", &vars).unwrap();
        assert_eq!(result, "Is 1 < 2 && 3 > 2?");
    }

    #[test]
    fn test_build_prompt_with_system() {
        let def = create_test_definition(Some("Answer briefly."));
        let mut vars = HashMap::new();
        vars.insert("question".to_string(), "Test question".to_string());

        let built = build_prompt(&def, vars).unwrap();
        assert_eq!(built.user, "Question: Test question");
        assert_eq!(built.system.as_deref(), Some("Answer briefly."));
        assert_eq!(built.metadata.source_prompt_id, "test.prompt");
    }

    #[test]
    fn test_build_prompt_blank_system_dropped() {
        let def = create_test_definition(Some("   "));
        let built = build_prompt(&def, HashMap::new()).unwrap();
        assert!(built.system.is_none());
    }

    #[test]
    fn test_build_paraphrase_prompt() {
        let def = builtin_prompt(PARAPHRASE_PROMPT_ID).unwrap().unwrap();
        let mut vars = HashMap::new();
        vars.insert("question".to_string(), "capital of france".to_string());
        vars.insert("answer".to_string(), "Paris.".to_string());

        let built = build_prompt(&def, vars).unwrap();
        assert_eq!(
            built.user,
            "Question: capital of france\nRemembered answer: Paris."
        );
        assert!(built.system.is_some());
    }

    #[test]
    fn test_render_template_missing_variable() {
        let vars = HashMap::new();
        let result = render_template("Question: {{missing}}", &vars);
        // Handlebars renders missing variables as empty string
        assert_eq!(result.unwrap(), "Question: ");
    }
}
