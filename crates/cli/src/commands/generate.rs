//! Generate command handler.
//!
//! Compiles the stored template with a student profile, sends it to the
//! configured provider and prints, translates or exports the parsed tasks.

use super::output;
use clap::Args;
use platskill_core::{config::AppConfig, AppResult};
use platskill_llm::client_from_config;
use platskill_prompt::{load_template, CompiledPrompt, FieldMap};
use platskill_tasks::{translate_result_set, Generator, Language, PromptBuilder};
use std::path::PathBuf;

/// Generate tasks for a student profile
#[derive(Args, Debug)]
pub struct GenerateCommand {
    /// Education level (e.g. bachelor, master, diploma)
    #[arg(long)]
    pub education_level: Option<String>,

    /// Year of study (e.g. 2nd-year)
    #[arg(long)]
    pub education_year: Option<String>,

    /// Semester (e.g. 3rd-semester)
    #[arg(long)]
    pub semester: Option<String>,

    /// Skill to develop (e.g. communication)
    #[arg(long)]
    pub main_skill: Option<String>,

    /// Current skill level (e.g. low, medium, high)
    #[arg(long)]
    pub skill_level: Option<String>,

    /// Number of tasks to request (1-20)
    #[arg(long, default_value_t = 3, value_parser = clap::value_parser!(u8).range(1..=20))]
    pub task_count: u8,

    /// Stored template id (default: prompt.templateId from config)
    #[arg(long)]
    pub template_id: Option<String>,

    /// Read the template from a file instead of the store
    #[arg(long, conflicts_with = "template_id")]
    pub template_file: Option<PathBuf>,

    /// Translate tasks to this language (code or name)
    #[arg(short, long)]
    pub language: Option<String>,

    /// Print the compiled prompt without calling the API
    #[arg(long)]
    pub dry_run: bool,

    /// Output as CSV
    #[arg(long)]
    pub csv: bool,

    /// Write CSV to this file or directory
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Columns to include, comma separated (default: all)
    #[arg(long, value_delimiter = ',')]
    pub columns: Vec<String>,

    /// Task numbers to export, comma separated, starting at 1 (default: all)
    #[arg(long, value_delimiter = ',')]
    pub rows: Vec<usize>,

    /// Output as JSON
    #[arg(long, conflicts_with = "csv")]
    pub json: bool,
}

impl GenerateCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing generate command");
        tracing::debug!("Generate options: {:?}", self);

        let language = self.language.as_deref().map(Language::parse).transpose()?;
        let selection = output::selection(&self.rows, &self.columns)?;

        if self.dry_run {
            println!("{}", self.dry_run_prompt(config)?);
            return Ok(());
        }

        let fields = self.fields();
        let template = self.template(config)?;

        let client = client_from_config(config)?;
        let generator = Generator::from_config(client, config);
        let mut result = generator.generate_tasks(&template, &fields).await?;

        if let Some(language) = language {
            let report =
                translate_result_set(generator.client(), generator.model(), &result, language)
                    .await;
            if report.failed > 0 {
                tracing::warn!(
                    "{} of {} attributes could not be translated to {} and were kept as-is",
                    report.failed,
                    report.attempted,
                    language.name()
                );
            }
            result = report.result_set;
        }

        if self.csv || self.output.is_some() {
            if let Some(path) = output::write_csv(&result, &selection, self.output.as_deref())? {
                eprintln!("Saved {} tasks to {}", result.len(), path.display());
            }
        } else if self.json {
            output::print_json(&output::selected_json(&result, &selection)?)?;
        } else {
            output::print_tasks(&result, &selection);
        }

        Ok(())
    }

    /// The prompt `execute` would send, built the same way `Generator` does.
    fn dry_run_prompt(&self, config: &AppConfig) -> AppResult<CompiledPrompt> {
        let template = self.template(config)?;
        PromptBuilder::from_config(config).prepare(&template, &self.fields())
    }

    /// Field map from whichever profile flags were given.
    ///
    /// Absent flags are left out so the compiler reports them together.
    fn fields(&self) -> FieldMap {
        let mut fields = FieldMap::new();
        let given = [
            ("education-level", &self.education_level),
            ("education-year", &self.education_year),
            ("semester", &self.semester),
            ("main-skill", &self.main_skill),
            ("skill-level", &self.skill_level),
        ];
        for (name, value) in given {
            if let Some(value) = value {
                fields.insert(name, value.as_str());
            }
        }
        fields.insert("task-count", self.task_count.to_string());
        fields
    }

    fn template(&self, config: &AppConfig) -> AppResult<String> {
        if let Some(ref path) = self.template_file {
            tracing::debug!("Reading template from {:?}", path);
            return Ok(std::fs::read_to_string(path)?);
        }

        let id = self
            .template_id
            .as_deref()
            .unwrap_or(&config.prompt.template_id);
        Ok(load_template(&config.workspace, id)?.template)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use platskill_core::{AppError, ValidationError};
    use tempfile::TempDir;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        generate: GenerateCommand,
    }

    const TEMPLATE: &str = "Create {{task-count}} tasks for a {{education-level}} student in \
        {{education-year}}, {{semester}}, focused on {{main-skill}} at {{skill-level}} level.";

    fn command(args: &[&str]) -> GenerateCommand {
        let argv = std::iter::once("generate").chain(args.iter().copied());
        TestCli::parse_from(argv).generate
    }

    fn keyless_config(dir: &TempDir) -> AppConfig {
        let mut config = AppConfig::from_workspace(dir.path().to_path_buf(), None).unwrap();
        config.llm.providers.gemini = None;
        config
    }

    #[test]
    fn test_dry_run_needs_no_api_key() {
        let dir = TempDir::new().unwrap();
        let template = dir.path().join("template.txt");
        std::fs::write(&template, TEMPLATE).unwrap();
        let config = keyless_config(&dir);
        assert!(config.validate().is_err());

        let cmd = command(&[
            "--education-level", "bachelor",
            "--education-year", "2nd-year",
            "--semester", "3rd-semester",
            "--main-skill", "communication",
            "--skill-level", "medium",
            "--task-count", "4",
            "--template-file", template.to_str().unwrap(),
            "--dry-run",
        ]);
        let prompt = cmd.dry_run_prompt(&config).unwrap();

        assert!(prompt.as_str().starts_with("Create 4 tasks for a bachelor student"));
        assert!(prompt.as_str().contains("Skill Level | Bloom Level"));
    }

    #[test]
    fn test_dry_run_reports_every_missing_field() {
        let dir = TempDir::new().unwrap();
        let template = dir.path().join("template.txt");
        std::fs::write(&template, TEMPLATE).unwrap();

        let cmd = command(&["--main-skill", "communication", "--template-file", template.to_str().unwrap()]);
        match cmd.dry_run_prompt(&keyless_config(&dir)).unwrap_err() {
            AppError::Validation(ValidationError::MissingFields(names)) => assert_eq!(
                names,
                vec!["education-level", "education-year", "semester", "skill-level"]
            ),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_selection_flags_parse_without_csv() {
        let cmd = command(&["--rows", "2,3", "--columns", "heading,task", "--json"]);
        assert_eq!(cmd.rows, vec![2, 3]);
        assert_eq!(cmd.columns, vec!["heading", "task"]);
        assert!(cmd.json && !cmd.csv);

        let selection = output::selection(&cmd.rows, &cmd.columns).unwrap();
        assert_eq!(selection.rows, vec![1, 2]);
    }
}
