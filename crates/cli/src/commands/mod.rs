//! Command handlers for the PLAT SKILL CLI.
//!
//! This module organizes all CLI commands into separate submodules.

pub mod config;
pub mod generate;
pub mod languages;
pub mod output;
pub mod prompt;

// Re-export command types for convenience
pub use config::ConfigCommand;
pub use generate::GenerateCommand;
pub use languages::LanguagesCommand;
pub use prompt::PromptCommand;
