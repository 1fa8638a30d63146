//! PLAT SKILL CLI
//!
//! Main entry point for the platskill command-line tool.
//! Generates skill-development tasks for students from a stored prompt
//! template and a text-generation API.

mod commands;

use anyhow::Context;
use clap::{Parser, Subcommand};
use commands::{ConfigCommand, GenerateCommand, LanguagesCommand, PromptCommand};
use platskill_core::{config::AppConfig, logging};
use std::path::PathBuf;

/// PLAT SKILL task generator
#[derive(Parser, Debug)]
#[command(name = "platskill")]
#[command(about = "Generate student skill-development tasks with an LLM", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to workspace directory (default: current directory)
    #[arg(short, long, global = true, env = "PLATSKILL_WORKSPACE")]
    workspace: Option<PathBuf>,

    /// Path to config file
    #[arg(short, long, global = true, env = "PLATSKILL_CONFIG")]
    config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, env = "RUST_LOG")]
    log_level: Option<String>,

    /// Enable verbose output (sets log level to debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    no_color: bool,

    /// LLM provider (gemini, ollama)
    #[arg(short, long, global = true, env = "PLATSKILL_PROVIDER")]
    provider: Option<String>,

    /// Model identifier
    #[arg(short, long, global = true, env = "PLATSKILL_MODEL")]
    model: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate tasks for a student profile
    Generate(GenerateCommand),

    /// Manage the stored prompt template
    Prompt(PromptCommand),

    /// Show or change settings and check the API key
    Config(ConfigCommand),

    /// List supported translation languages
    Languages(LanguagesCommand),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse command-line arguments first (needed for logging config)
    let cli = Cli::parse();

    // Workspace and config file pick which YAML is read, so they go in first
    let config = AppConfig::load_from(cli.workspace, cli.config)
        .context("Failed to load configuration")?;

    let config = config.with_overrides(
        cli.provider,
        cli.model,
        cli.log_level,
        cli.verbose,
        cli.no_color,
    );

    logging::init_logging(config.log_level.as_deref(), config.no_color)?;

    tracing::info!("PLAT SKILL CLI starting");
    tracing::debug!("Workspace: {:?}", config.workspace);
    tracing::debug!("Provider: {}", config.provider);
    tracing::debug!("Model: {}", config.model);

    let command_name = match &cli.command {
        Commands::Generate(_) => "generate",
        Commands::Prompt(_) => "prompt",
        Commands::Config(_) => "config",
        Commands::Languages(_) => "languages",
    };
    let _span = tracing::info_span!("command", name = command_name).entered();

    let result = match cli.command {
        Commands::Generate(cmd) => cmd.execute(&config).await,
        Commands::Prompt(cmd) => cmd.execute(&config).await,
        Commands::Config(cmd) => cmd.execute(config).await,
        Commands::Languages(cmd) => cmd.execute(),
    };

    match &result {
        Ok(_) => tracing::info!("Command completed successfully"),
        Err(e) => tracing::error!("Command failed: {}", e),
    }

    result.with_context(|| format!("platskill {} failed", command_name))
}
