//! Configuration management for the Recall agent.
//!
//! This module handles loading and merging configuration from multiple sources:
//! - Config files (.recall/config.yaml)
//! - Environment variables
//! - Command-line flags
//!
//! The configuration is workspace-centric, with all state stored in `.recall/`.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::{AppError, AppResult};
use crate::logging::LogFormat;

/// Default Ollama endpoint.
pub const DEFAULT_OLLAMA_ENDPOINT: &str = "http://localhost:11434";

/// Default similarity threshold (0-100) for a stored fact to answer a query.
pub const DEFAULT_MATCH_THRESHOLD: f64 = 85.0;

/// Default maximum chunk length, in characters, for detail delivery.
pub const DEFAULT_CHUNK_MAX_LENGTH: usize = 300;

/// Default ceiling on a single LLM call.
pub const DEFAULT_GENERATION_TIMEOUT_SECS: u64 = 120;

/// Main application configuration.
///
/// This struct holds all global configuration options that affect
/// agent behavior across commands.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Path to the workspace root (contains .recall/)
    pub workspace: PathBuf,

    /// Optional config file path
    pub config_file: Option<PathBuf>,

    /// LLM provider ("ollama" or "mock")
    pub provider: String,

    /// Model identifier
    pub model: String,

    /// Endpoint override for the provider
    pub endpoint: Option<String>,

    /// Log level override
    pub log_level: Option<String>,

    /// Log line format
    pub log_format: LogFormat,

    /// Verbose mode (enables debug logging)
    pub verbose: bool,

    /// Disable colored output
    pub no_color: bool,

    /// LLM provider configurations
    pub llm: Option<LlmConfig>,

    /// Fact store settings
    pub memory: MemoryConfig,

    /// Answer delivery settings
    pub dialog: DialogConfig,
}

/// LLM configuration from config.yaml.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    #[serde(rename = "activeProvider")]
    pub active_provider: String,

    pub providers: HashMap<String, ProviderConfig>,
}

/// Provider-specific configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProviderConfig {
    Ollama {
        endpoint: String,
        model: String,
    },
}

/// Fact store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryConfig {
    /// Database path; relative paths resolve against `.recall/`
    #[serde(default)]
    pub path: Option<PathBuf>,

    /// Minimum similarity score (exclusive, 0-100) for a stored answer to match
    #[serde(rename = "matchThreshold", default = "default_match_threshold")]
    pub match_threshold: f64,
}

fn default_match_threshold() -> f64 {
    DEFAULT_MATCH_THRESHOLD
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            path: None,
            match_threshold: default_match_threshold(),
        }
    }
}

/// Which intent wins when a reply matches both the "more" and "stop" keywords.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum IntentPrecedence {
    /// "more" is checked first ("okay" reveals the next chunk)
    #[default]
    MoreFirst,
    /// "stop" is checked first ("okay" ends the detail delivery)
    StopFirst,
}

/// Answer delivery configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DialogConfig {
    /// Maximum characters per detail chunk
    #[serde(rename = "chunkMaxLength", default = "default_chunk_max_length")]
    pub chunk_max_length: usize,

    /// Tie-break for overlapping follow-up keywords
    #[serde(default)]
    pub precedence: IntentPrecedence,

    /// Let the LLM rephrase answers recalled from memory
    #[serde(rename = "paraphraseMemory", default)]
    pub paraphrase_memory: bool,

    /// Ceiling on one LLM call, in seconds; 0 disables the timeout
    #[serde(
        rename = "generationTimeoutSecs",
        default = "default_generation_timeout_secs"
    )]
    pub generation_timeout_secs: u64,
}

fn default_chunk_max_length() -> usize {
    DEFAULT_CHUNK_MAX_LENGTH
}

fn default_generation_timeout_secs() -> u64 {
    DEFAULT_GENERATION_TIMEOUT_SECS
}

impl Default for DialogConfig {
    fn default() -> Self {
        Self {
            chunk_max_length: default_chunk_max_length(),
            precedence: IntentPrecedence::default(),
            paraphrase_memory: false,
            generation_timeout_secs: default_generation_timeout_secs(),
        }
    }
}

/// Full configuration file structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ConfigFile {
    llm: Option<LlmConfig>,
    workspace: Option<WorkspaceConfig>,
    logging: Option<LoggingConfig>,
    memory: Option<MemoryConfig>,
    dialog: Option<DialogConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct WorkspaceConfig {
    path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct LoggingConfig {
    level: Option<String>,
    color: Option<bool>,
    format: Option<LogFormat>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            workspace: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            config_file: None,
            provider: "ollama".to_string(),
            model: "phi3".to_string(),
            endpoint: None,
            log_level: None,
            log_format: LogFormat::Text,
            verbose: false,
            no_color: false,
            llm: None,
            memory: MemoryConfig::default(),
            dialog: DialogConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from defaults, the YAML config file and
    /// environment variables.
    ///
    /// Environment variables:
    /// - `RECALL_WORKSPACE`: Override workspace path
    /// - `RECALL_CONFIG`: Path to config file
    /// - `RECALL_PROVIDER`: LLM provider
    /// - `RECALL_MODEL`: Model identifier
    /// - `RECALL_ENDPOINT`: Provider endpoint
    /// - `RUST_LOG`: Log level
    /// - `NO_COLOR`: Disable colored output
    ///
    /// # Example
    /// ```no_run
    /// use recall_core::config::AppConfig;
    ///
    /// let config = AppConfig::load().expect("Failed to load config");
    /// println!("Workspace: {:?}", config.workspace);
    /// ```
    pub fn load() -> AppResult<Self> {
        Self::load_from(None, None)
    }

    /// Load configuration with an explicit workspace and/or config file,
    /// which take precedence over `RECALL_WORKSPACE` and `RECALL_CONFIG`.
    pub fn load_from(workspace: Option<PathBuf>, config_file: Option<PathBuf>) -> AppResult<Self> {
        let mut config = Self::default();

        if let Some(workspace) =
            workspace.or_else(|| std::env::var("RECALL_WORKSPACE").ok().map(PathBuf::from))
        {
            config.workspace = workspace;
        }

        config.config_file =
            config_file.or_else(|| std::env::var("RECALL_CONFIG").ok().map(PathBuf::from));

        if !config.workspace.exists() {
            return Err(AppError::Config(format!(
                "Workspace directory does not exist: {:?}",
                config.workspace
            )));
        }

        let config_path = match config.config_file {
            Some(ref cf) => cf.clone(),
            None => config.recall_dir().join("config.yaml"),
        };

        if config_path.exists() {
            config = config.merge_yaml(&config_path)?;
        }

        // Environment variables override YAML config
        if let Ok(provider) = std::env::var("RECALL_PROVIDER") {
            config.provider = provider;
        }

        if let Ok(model) = std::env::var("RECALL_MODEL") {
            config.model = model;
        }

        if let Ok(endpoint) = std::env::var("RECALL_ENDPOINT") {
            config.endpoint = Some(endpoint);
        }

        if let Ok(level) = std::env::var("RUST_LOG") {
            config.log_level = Some(level);
        }

        if std::env::var("NO_COLOR").is_ok() {
            config.no_color = true;
        }

        Ok(config)
    }

    /// Merge YAML configuration file into this config.
    fn merge_yaml(&self, path: &Path) -> AppResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;

        let config_file: ConfigFile = serde_yaml::from_str(&contents).map_err(|e| {
            AppError::Config(format!("Failed to parse config file {:?}: {}", path, e))
        })?;

        let mut result = self.clone();

        if let Some(ws) = config_file.workspace {
            if let Some(path) = ws.path {
                result.workspace = PathBuf::from(path);
            }
        }

        if let Some(logging) = config_file.logging {
            if let Some(level) = logging.level {
                result.log_level = Some(level);
            }
            if let Some(color) = logging.color {
                result.no_color = !color;
            }
            if let Some(format) = logging.format {
                result.log_format = format;
            }
        }

        if let Some(llm) = config_file.llm {
            result.provider = llm.active_provider.clone();

            if let Some(provider_config) = llm.providers.get(&llm.active_provider) {
                match provider_config {
                    ProviderConfig::Ollama { endpoint, model } => {
                        result.model = model.clone();
                        result.endpoint = Some(endpoint.clone());
                    }
                }
            }

            result.llm = Some(llm);
        }

        if let Some(memory) = config_file.memory {
            result.memory = memory;
        }

        if let Some(dialog) = config_file.dialog {
            result.dialog = dialog;
        }

        tracing::debug!("Merged config file {:?}", path);
        Ok(result)
    }

    /// Apply CLI overrides to the configuration.
    ///
    /// CLI flags take precedence over environment variables and the config file.
    #[allow(clippy::too_many_arguments)]
    pub fn with_overrides(
        mut self,
        workspace: Option<PathBuf>,
        config_file: Option<PathBuf>,
        provider: Option<String>,
        model: Option<String>,
        log_level: Option<String>,
        verbose: bool,
        no_color: bool,
    ) -> Self {
        if let Some(workspace) = workspace {
            self.workspace = workspace;
        }

        if let Some(config_file) = config_file {
            self.config_file = Some(config_file);
        }

        if let Some(provider) = provider {
            self.provider = provider;
        }

        if let Some(model) = model {
            self.model = model;
        }

        if let Some(log_level) = log_level {
            self.log_level = Some(log_level);
        }

        if verbose {
            self.verbose = true;
            if self.log_level.is_none() {
                self.log_level = Some("debug".to_string());
            }
        }

        if no_color {
            self.no_color = true;
        }

        self
    }

    /// Get the path to the .recall directory.
    pub fn recall_dir(&self) -> PathBuf {
        self.workspace.join(".recall")
    }

    /// Ensure the .recall directory exists.
    pub fn ensure_recall_dir(&self) -> AppResult<()> {
        let recall_dir = self.recall_dir();
        if !recall_dir.exists() {
            std::fs::create_dir_all(&recall_dir).map_err(|e| {
                AppError::Config(format!("Failed to create .recall directory: {}", e))
            })?;
        }
        Ok(())
    }

    /// Directory holding prompt overrides.
    pub fn prompts_dir(&self) -> PathBuf {
        self.recall_dir().join("prompts")
    }

    /// Resolved path of the fact database.
    pub fn memory_path(&self) -> PathBuf {
        match self.memory.path {
            Some(ref p) if p.is_absolute() => p.clone(),
            Some(ref p) => self.recall_dir().join(p),
            None => self.recall_dir().join("memory.db"),
        }
    }

    /// Get the configuration for a provider, if one was declared.
    pub fn get_provider_config(&self, provider: &str) -> Option<&ProviderConfig> {
        self.llm
            .as_ref()
            .and_then(|llm| llm.providers.get(provider))
    }

    /// Resolve the provider endpoint: explicit override, then provider table.
    pub fn resolve_endpoint(&self) -> Option<String> {
        if let Some(ref endpoint) = self.endpoint {
            return Some(endpoint.clone());
        }

        self.get_provider_config(&self.provider).map(|pc| match pc {
            ProviderConfig::Ollama { endpoint, .. } => endpoint.clone(),
        })
    }

    /// Validate configuration for the active provider and dialog settings.
    pub fn validate(&self) -> AppResult<()> {
        let known_providers = ["ollama", "mock"];

        if !known_providers.contains(&self.provider.as_str()) {
            return Err(AppError::Config(format!(
                "Unknown provider: {}. Supported: {}",
                self.provider,
                known_providers.join(", ")
            )));
        }

        if !(0.0..=100.0).contains(&self.memory.match_threshold) {
            return Err(AppError::Config(format!(
                "matchThreshold must be between 0 and 100, got {}",
                self.memory.match_threshold
            )));
        }

        if self.dialog.chunk_max_length == 0 {
            return Err(AppError::Config(
                "chunkMaxLength must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }
}
