//! Languages command handler.

use super::output;
use clap::Args;
use platskill_core::AppResult;
use platskill_tasks::Language;

/// List supported translation languages
#[derive(Args, Debug)]
pub struct LanguagesCommand {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl LanguagesCommand {
    pub fn execute(&self) -> AppResult<()> {
        if self.json {
            let languages: Vec<_> = Language::ALL
                .iter()
                .map(|l| serde_json::json!({ "code": l.code(), "name": l.name() }))
                .collect();
            output::print_json(&languages)?;
        } else {
            for language in Language::ALL {
                println!("{:<4} {}", language.code(), language.name());
            }
        }
        Ok(())
    }
}
