//! Configuration management for the PLAT SKILL task generator.
//!
//! Configuration is merged from several sources, later ones winning:
//! - Built-in defaults
//! - The workspace config file (`.platskill/config.yaml`)
//! - Environment variables
//! - Command-line flags
//!
//! The resulting `AppConfig` is loaded once per command and passed explicitly
//! to everything that needs it. `AppConfig::save` is the only place that
//! writes the config file back.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{AppError, AppResult};

/// Directory holding config and stored templates, relative to the workspace.
pub const STATE_DIR: &str = ".platskill";

/// Default Gemini endpoint (without the `models/<id>:generateContent` suffix).
pub const DEFAULT_GEMINI_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default Ollama endpoint.
pub const DEFAULT_OLLAMA_ENDPOINT: &str = "http://localhost:11434";

/// Default Gemini model.
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

const KNOWN_PROVIDERS: [&str; 2] = ["gemini", "ollama"];

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Path to the workspace root (contains .platskill/)
    pub workspace: PathBuf,

    /// Optional config file path
    pub config_file: Option<PathBuf>,

    /// Active LLM provider ("gemini" or "ollama")
    pub provider: String,

    /// Active model identifier
    pub model: String,

    /// API key override from the environment
    pub api_key: Option<String>,

    /// Log level override
    pub log_level: Option<String>,

    /// Verbose mode (enables debug logging)
    pub verbose: bool,

    /// Disable colored output
    pub no_color: bool,

    /// Provider settings
    pub llm: LlmConfig,

    /// Prompt compilation settings
    pub prompt: PromptSettings,
}

/// LLM section of config.yaml.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    #[serde(rename = "activeProvider")]
    pub active_provider: String,

    #[serde(default)]
    pub providers: ProvidersConfig,
}

/// Per-provider settings, keyed by provider name in YAML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProvidersConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gemini: Option<GeminiSettings>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub ollama: Option<OllamaSettings>,
}

/// Gemini provider settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiSettings {
    /// Stored keys; the first non-empty one is used
    #[serde(rename = "apiKeys", default)]
    pub api_keys: Vec<String>,

    /// Environment variable consulted when no key is stored
    #[serde(rename = "apiKeyEnv", skip_serializing_if = "Option::is_none")]
    pub api_key_env: Option<String>,

    pub model: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
}

impl Default for GeminiSettings {
    fn default() -> Self {
        Self {
            api_keys: Vec::new(),
            api_key_env: Some("GEMINI_API_KEY".to_string()),
            model: DEFAULT_MODEL.to_string(),
            endpoint: None,
        }
    }
}

/// Ollama provider settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OllamaSettings {
    pub endpoint: String,
    pub model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            active_provider: "gemini".to_string(),
            providers: ProvidersConfig {
                gemini: Some(GeminiSettings::default()),
                ollama: None,
            },
        }
    }
}

/// Prompt section of config.yaml.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptSettings {
    /// Id of the stored template used by `generate`
    #[serde(rename = "templateId", default = "default_template_id")]
    pub template_id: String,

    /// Append the table-format instructions after compilation
    #[serde(rename = "appendFormatFooter", default = "default_true")]
    pub append_format_footer: bool,

    /// Inclusive lower bound on template length, in characters
    #[serde(rename = "minLength", default = "default_min_length")]
    pub min_length: usize,

    /// Inclusive upper bound on template length, in characters
    #[serde(rename = "maxLength", default = "default_max_length")]
    pub max_length: usize,
}

fn default_template_id() -> String {
    "custom".to_string()
}

fn default_true() -> bool {
    true
}

fn default_min_length() -> usize {
    50
}

fn default_max_length() -> usize {
    5000
}

impl Default for PromptSettings {
    fn default() -> Self {
        Self {
            template_id: default_template_id(),
            append_format_footer: true,
            min_length: default_min_length(),
            max_length: default_max_length(),
        }
    }
}

/// Full configuration file structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ConfigFile {
    #[serde(skip_serializing_if = "Option::is_none")]
    llm: Option<LlmConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    prompt: Option<PromptSettings>,
    #[serde(skip_serializing_if = "Option::is_none")]
    logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct LoggingConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    level: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    color: Option<bool>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            workspace: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            config_file: None,
            provider: "gemini".to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key: None,
            log_level: None,
            verbose: false,
            no_color: false,
            llm: LlmConfig::default(),
            prompt: PromptSettings::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration for a workspace and config file, then apply the
    /// environment.
    ///
    /// Both paths are resolved before any file is read, so the YAML that is
    /// merged is always the one `save` writes back. `None` falls back to the
    /// matching environment variable, then the current directory.
    ///
    /// Environment variables:
    /// - `PLATSKILL_WORKSPACE`: Workspace path
    /// - `PLATSKILL_CONFIG`: Path to config file
    /// - `PLATSKILL_PROVIDER`: LLM provider
    /// - `PLATSKILL_MODEL`: Model identifier
    /// - `PLATSKILL_API_KEY`: API key
    /// - `RUST_LOG`: Log level
    /// - `NO_COLOR`: Disable colored output
    pub fn load_from(workspace: Option<PathBuf>, config_file: Option<PathBuf>) -> AppResult<Self> {
        let workspace = match workspace {
            Some(ws) => ws,
            None => match std::env::var("PLATSKILL_WORKSPACE") {
                Ok(ws) => PathBuf::from(ws),
                Err(_) => std::env::current_dir()?,
            },
        };
        let config_file =
            config_file.or_else(|| std::env::var("PLATSKILL_CONFIG").ok().map(PathBuf::from));

        let mut config = Self::from_workspace(workspace, config_file)?;

        // Environment variables override YAML config
        if let Ok(provider) = std::env::var("PLATSKILL_PROVIDER") {
            config.provider = provider;
        }

        if let Ok(model) = std::env::var("PLATSKILL_MODEL") {
            config.model = model;
        }

        config.api_key = std::env::var("PLATSKILL_API_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty());

        if let Ok(level) = std::env::var("RUST_LOG") {
            config.log_level = Some(level);
        }

        if std::env::var("NO_COLOR").is_ok() {
            config.no_color = true;
        }

        Ok(config)
    }

    /// Build a configuration from defaults and the workspace config file only.
    pub fn from_workspace(workspace: PathBuf, config_file: Option<PathBuf>) -> AppResult<Self> {
        if !workspace.exists() {
            return Err(AppError::Config(format!(
                "Workspace directory does not exist: {:?}",
                workspace
            )));
        }

        let config = Self {
            workspace,
            config_file,
            ..Self::default()
        };

        let config_path = config.config_path();
        if config_path.exists() {
            config.merge_yaml(&config_path)
        } else {
            Ok(config)
        }
    }

    /// Merge a YAML configuration file into this config.
    fn merge_yaml(mut self, path: &Path) -> AppResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;

        let config_file: ConfigFile = serde_yaml::from_str(&contents).map_err(|e| {
            AppError::Config(format!("Failed to parse config file {:?}: {}", path, e))
        })?;

        if let Some(logging) = config_file.logging {
            if let Some(level) = logging.level {
                self.log_level = Some(level);
            }
            if let Some(color) = logging.color {
                self.no_color = !color;
            }
        }

        if let Some(prompt) = config_file.prompt {
            self.prompt = prompt;
        }

        if let Some(llm) = config_file.llm {
            self.provider = llm.active_provider.clone();
            if let Some(model) = llm.model_for(&llm.active_provider) {
                self.model = model.to_string();
            }
            self.llm = llm;
        }

        Ok(self)
    }

    /// Apply CLI overrides to the configuration.
    ///
    /// Workspace and config file are not overridable here; pass them to
    /// [`AppConfig::load_from`] so the matching YAML is merged.
    pub fn with_overrides(
        mut self,
        provider: Option<String>,
        model: Option<String>,
        log_level: Option<String>,
        verbose: bool,
        no_color: bool,
    ) -> Self {
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
            // Verbose mode implies debug logging
            if self.log_level.is_none() {
                self.log_level = Some("debug".to_string());
            }
        }

        if no_color {
            self.no_color = true;
        }

        self
    }

    /// Get the path to the .platskill directory.
    pub fn state_dir(&self) -> PathBuf {
        self.workspace.join(STATE_DIR)
    }

    /// Path of the config file this configuration reads from and saves to.
    pub fn config_path(&self) -> PathBuf {
        self.config_file
            .clone()
            .unwrap_or_else(|| self.state_dir().join("config.yaml"))
    }

    /// Ensure the .platskill directory exists.
    pub fn ensure_state_dir(&self) -> AppResult<()> {
        let state_dir = self.state_dir();
        if !state_dir.exists() {
            std::fs::create_dir_all(&state_dir).map_err(|e| {
                AppError::Config(format!("Failed to create {} directory: {}", STATE_DIR, e))
            })?;
        }
        Ok(())
    }

    /// Persist the provider, prompt and logging settings to the config file.
    pub fn save(&self) -> AppResult<PathBuf> {
        let path = self.config_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let mut llm = self.llm.clone();
        llm.active_provider = self.provider.clone();

        let file = ConfigFile {
            llm: Some(llm),
            prompt: Some(self.prompt.clone()),
            logging: Some(LoggingConfig {
                level: self.log_level.clone().filter(|_| !self.verbose),
                color: Some(!self.no_color),
            }),
        };

        let yaml = serde_yaml::to_string(&file)?;
        std::fs::write(&path, yaml).map_err(|e| {
            AppError::Config(format!("Failed to write config file {:?}: {}", path, e))
        })?;

        tracing::info!("Saved configuration to {:?}", path);
        Ok(path)
    }

    /// Store a Gemini API key in the given slot (0 = primary, 1 = secondary).
    pub fn set_api_key(&mut self, key: &str, slot: usize) -> AppResult<()> {
        let key = key.trim();
        if key.is_empty() {
            return Err(AppError::Config(
                "Please enter a Gemini API key".to_string(),
            ));
        }

        let gemini = self
            .llm
            .providers
            .gemini
            .get_or_insert_with(GeminiSettings::default);
        if gemini.api_keys.len() <= slot {
            gemini.api_keys.resize(slot + 1, String::new());
        }
        gemini.api_keys[slot] = key.to_string();
        Ok(())
    }

    /// Select the model for the active provider.
    pub fn set_model(&mut self, model: &str) -> AppResult<()> {
        let model = model.trim();
        if model.is_empty() {
            return Err(AppError::Config("Please select a model".to_string()));
        }

        self.model = model.to_string();
        match self.provider.as_str() {
            "gemini" => {
                self.llm
                    .providers
                    .gemini
                    .get_or_insert_with(GeminiSettings::default)
                    .model = model.to_string();
            }
            "ollama" => {
                let ollama = self
                    .llm
                    .providers
                    .ollama
                    .get_or_insert_with(|| OllamaSettings {
                        endpoint: DEFAULT_OLLAMA_ENDPOINT.to_string(),
                        model: model.to_string(),
                        timeout: None,
                    });
                ollama.model = model.to_string();
            }
            _ => {}
        }
        Ok(())
    }

    /// Endpoint configured for the active provider, if any.
    pub fn endpoint(&self) -> Option<String> {
        match self.provider.as_str() {
            "gemini" => self
                .llm
                .providers
                .gemini
                .as_ref()
                .and_then(|g| g.endpoint.clone()),
            "ollama" => self
                .llm
                .providers
                .ollama
                .as_ref()
                .map(|o| o.endpoint.clone()),
            _ => None,
        }
    }

    /// Resolve the API key for the active provider.
    ///
    /// Order: `PLATSKILL_API_KEY`, the first non-empty stored key, then the
    /// variable named by `apiKeyEnv`.
    pub fn resolve_api_key(&self) -> Option<String> {
        if let Some(ref key) = self.api_key {
            return Some(key.clone());
        }

        let gemini = self.llm.providers.gemini.as_ref()?;
        if let Some(key) = gemini.api_keys.iter().find(|k| !k.trim().is_empty()) {
            return Some(key.trim().to_string());
        }

        gemini
            .api_key_env
            .as_ref()
            .and_then(|var| std::env::var(var).ok())
            .filter(|k| !k.trim().is_empty())
    }

    /// Validate configuration for the active provider.
    pub fn validate(&self) -> AppResult<()> {
        let provider = &self.provider;
        if !KNOWN_PROVIDERS.contains(&provider.as_str()) {
            return Err(AppError::Config(format!(
                "Unknown provider: {}. Supported: {}",
                provider,
                KNOWN_PROVIDERS.join(", ")
            )));
        }

        if provider == "gemini" && self.resolve_api_key().is_none() {
            return Err(AppError::Config(
                "No Gemini API key found. Please add your API key.".to_string(),
            ));
        }

        Ok(())
    }
}

impl LlmConfig {
    fn model_for(&self, provider: &str) -> Option<&str> {
        match provider {
            "gemini" => self.providers.gemini.as_ref().map(|g| g.model.as_str()),
            "ollama" => self.providers.ollama.as_ref().map(|o| o.model.as_str()),
            _ => None,
        }
    }
}
