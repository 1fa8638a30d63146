//! Config command handler.
//!
//! Shows the resolved configuration, stores API keys and model choices, and
//! checks that the configured key works.

use super::output;
use clap::{Args, Subcommand};
use platskill_core::{config::AppConfig, AppError, AppResult};
use platskill_llm::{check_api, client_from_config, is_known_gemini_model, ApiStatus, GEMINI_MODELS};

/// Show or change settings and check the API key
#[derive(Args, Debug)]
pub struct ConfigCommand {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Print the resolved configuration
    Show(ConfigShowCommand),
    /// Change settings and save them to the config file
    Set(ConfigSetCommand),
    /// Send a test request with the configured key
    Check(ConfigCheckCommand),
}

impl ConfigCommand {
    pub async fn execute(&self, config: AppConfig) -> AppResult<()> {
        match &self.action {
            ConfigAction::Show(cmd) => cmd.execute(&config),
            ConfigAction::Set(cmd) => cmd.execute(config),
            ConfigAction::Check(cmd) => cmd.execute(&config).await,
        }
    }
}

/// Print the resolved configuration
#[derive(Args, Debug)]
pub struct ConfigShowCommand {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl ConfigShowCommand {
    pub fn execute(&self, config: &AppConfig) -> AppResult<()> {
        let key_status = if config.resolve_api_key().is_some() {
            "configured"
        } else {
            "missing"
        };

        if self.json {
            let output = serde_json::json!({
                "workspace": config.workspace,
                "configFile": config.config_path(),
                "provider": config.provider,
                "model": config.model,
                "apiKey": key_status,
                "templateId": config.prompt.template_id,
                "appendFormatFooter": config.prompt.append_format_footer,
                "minLength": config.prompt.min_length,
                "maxLength": config.prompt.max_length,
            });
            output::print_json(&output)?;
        } else {
            println!("Workspace:     {}", config.workspace.display());
            println!("Config file:   {}", config.config_path().display());
            println!("Provider:      {}", config.provider);
            println!("Model:         {}", config.model);
            println!("API key:       {}", key_status);
            println!("Template:      {}", config.prompt.template_id);
            println!("Format footer: {}", config.prompt.append_format_footer);
            println!(
                "Length bounds: {}-{} characters",
                config.prompt.min_length, config.prompt.max_length
            );
        }
        Ok(())
    }
}

/// Change settings and save them
#[derive(Args, Debug)]
pub struct ConfigSetCommand {
    /// Primary Gemini API key
    #[arg(long)]
    pub api_key: Option<String>,

    /// Secondary Gemini API key
    #[arg(long)]
    pub secondary_key: Option<String>,

    /// Model for the active provider
    #[arg(long = "set-model")]
    pub set_model: Option<String>,

    /// Active provider (gemini, ollama)
    #[arg(long = "set-provider")]
    pub set_provider: Option<String>,

    /// Template id used by `generate`
    #[arg(long)]
    pub template_id: Option<String>,

    /// Append the table-format instructions to compiled prompts
    #[arg(long)]
    pub format_footer: Option<bool>,
}

impl ConfigSetCommand {
    pub fn execute(&self, mut config: AppConfig) -> AppResult<()> {
        tracing::info!("Executing config set command");

        if let Some(ref provider) = self.set_provider {
            config.provider = provider.trim().to_lowercase();
        }
        if let Some(ref key) = self.api_key {
            config.set_api_key(key, 0)?;
        }
        if let Some(ref key) = self.secondary_key {
            config.set_api_key(key, 1)?;
        }
        if let Some(ref model) = self.set_model {
            if config.provider == "gemini" && !is_known_gemini_model(model.trim()) {
                let known: Vec<&str> = GEMINI_MODELS.iter().map(|(id, _)| *id).collect();
                return Err(AppError::Config(format!(
                    "Unknown Gemini model '{}'. Available: {}",
                    model,
                    known.join(", ")
                )));
            }
            config.set_model(model)?;
        }
        if let Some(ref id) = self.template_id {
            config.prompt.template_id = id.trim().to_string();
        }
        if let Some(footer) = self.format_footer {
            config.prompt.append_format_footer = footer;
        }

        config.validate()?;
        let path = config.save()?;
        println!("Settings saved to {}", path.display());
        Ok(())
    }
}

/// Send a test request with the configured key
#[derive(Args, Debug)]
pub struct ConfigCheckCommand {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl ConfigCheckCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing config check command");

        let client = client_from_config(config)?;
        let status = check_api(client.as_ref(), &config.model).await?;

        if self.json {
            output::print_json(&serde_json::json!({
                "provider": config.provider,
                "model": config.model,
                "status": status,
                "message": status.message(),
            }))?;
        } else {
            println!("{}", status.message());
        }

        if status == ApiStatus::Unexpected {
            tracing::warn!("API check reply did not contain the expected phrase");
        }
        Ok(())
    }
}
