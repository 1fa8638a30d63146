//! Prompt command handler.
//!
//! Manages stored prompt templates and tries them against the live API.

use super::output;
use clap::{Args, Subcommand};
use platskill_core::{config::AppConfig, AppError, AppResult};
use platskill_llm::client_from_config;
use platskill_prompt::{
    delete_template, list_templates, load_template, placeholder, save_template,
    PromptDefinition, REQUIRED_FIELDS,
};
use platskill_tasks::Generator;
use std::path::PathBuf;

/// Manage the stored prompt template
#[derive(Args, Debug)]
pub struct PromptCommand {
    #[command(subcommand)]
    pub action: PromptAction,
}

#[derive(Subcommand, Debug)]
pub enum PromptAction {
    /// Print a stored template
    Show(PromptShowCommand),
    /// Validate and store a template
    Save(PromptSaveCommand),
    /// Remove a stored template
    Delete(PromptDeleteCommand),
    /// List stored templates
    List(PromptListCommand),
    /// Send a template with a sample profile and print the raw reply
    Test(PromptTestCommand),
}

impl PromptCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        match &self.action {
            PromptAction::Show(cmd) => cmd.execute(config),
            PromptAction::Save(cmd) => cmd.execute(config),
            PromptAction::Delete(cmd) => cmd.execute(config),
            PromptAction::List(cmd) => cmd.execute(config),
            PromptAction::Test(cmd) => cmd.execute(config).await,
        }
    }
}

fn template_id<'a>(id: &'a Option<String>, config: &'a AppConfig) -> &'a str {
    id.as_deref().unwrap_or(&config.prompt.template_id)
}

/// Print a stored template
#[derive(Args, Debug)]
pub struct PromptShowCommand {
    /// Template id (default: prompt.templateId from config)
    pub id: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl PromptShowCommand {
    pub fn execute(&self, config: &AppConfig) -> AppResult<()> {
        let definition = load_template(&config.workspace, template_id(&self.id, config))?;
        if self.json {
            output::print_json(&definition)?;
        } else {
            println!("{}", definition.template);
        }
        Ok(())
    }
}

/// Validate and store a template
#[derive(Args, Debug)]
pub struct PromptSaveCommand {
    /// Template id (default: prompt.templateId from config)
    #[arg(long)]
    pub id: Option<String>,

    /// Template text
    #[arg(long, conflicts_with = "file")]
    pub text: Option<String>,

    /// Read the template text from a file
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Human-readable title
    #[arg(long)]
    pub title: Option<String>,
}

impl PromptSaveCommand {
    pub fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing prompt save command");

        let text = match (&self.text, &self.file) {
            (Some(text), _) => text.clone(),
            (None, Some(path)) => std::fs::read_to_string(path)?,
            (None, None) => {
                return Err(AppError::Config(format!(
                    "Provide the template with --text or --file. Required placeholders: {}",
                    REQUIRED_FIELDS
                        .iter()
                        .map(|f| placeholder(f))
                        .collect::<Vec<_>>()
                        .join(", ")
                )))
            }
        };

        let mut definition = PromptDefinition::new(template_id(&self.id, config), text);
        if let Some(ref title) = self.title {
            definition.title = title.clone();
        }

        let path = save_template(&config.workspace, &definition)?;
        println!("Saved prompt '{}' to {}", definition.id, path.display());
        Ok(())
    }
}

/// Remove a stored template
#[derive(Args, Debug)]
pub struct PromptDeleteCommand {
    /// Template id (default: prompt.templateId from config)
    pub id: Option<String>,
}

impl PromptDeleteCommand {
    pub fn execute(&self, config: &AppConfig) -> AppResult<()> {
        let id = template_id(&self.id, config);
        if delete_template(&config.workspace, id)? {
            println!("Removed prompt '{}'", id);
        } else {
            println!("No stored prompt '{}'", id);
        }
        Ok(())
    }
}

/// List stored templates
#[derive(Args, Debug)]
pub struct PromptListCommand {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl PromptListCommand {
    pub fn execute(&self, config: &AppConfig) -> AppResult<()> {
        let ids = list_templates(&config.workspace)?;
        if self.json {
            output::print_json(&ids)?;
        } else if ids.is_empty() {
            println!("No stored prompts. Save one with `platskill prompt save`.");
        } else {
            for id in ids {
                println!("{}", id);
            }
        }
        Ok(())
    }
}

/// Send a template with a sample profile
#[derive(Args, Debug)]
pub struct PromptTestCommand {
    /// Template id (default: prompt.templateId from config)
    pub id: Option<String>,

    /// Test a template file instead of a stored one
    #[arg(short, long, conflicts_with = "id")]
    pub file: Option<PathBuf>,
}

impl PromptTestCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing prompt test command");

        let template = match self.file {
            Some(ref path) => std::fs::read_to_string(path)?,
            None => load_template(&config.workspace, template_id(&self.id, config))?.template,
        };

        let client = client_from_config(config)?;
        let reply = Generator::from_config(client, config)
            .test_template(&template)
            .await?;
        println!("{}", reply);
        Ok(())
    }
}
