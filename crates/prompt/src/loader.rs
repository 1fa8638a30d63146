//! Template store: YAML definitions under `.platskill/prompts/`.
//!
//! This is the persistence boundary for templates. Callers load a definition
//! once at the start of an operation and pass the template text explicitly.

use crate::compiler::missing_placeholders;
use crate::types::PromptDefinition;
use platskill_core::config::STATE_DIR;
use platskill_core::{AppError, AppResult, ValidationError};
use std::path::{Path, PathBuf};

fn prompts_dir(workspace_path: &Path) -> PathBuf {
    workspace_path.join(STATE_DIR).join("prompts")
}

fn prompt_file(workspace_path: &Path, prompt_id: &str) -> AppResult<PathBuf> {
    validate_id(prompt_id)?;
    Ok(prompts_dir(workspace_path).join(format!("{}.yml", prompt_id)))
}

/// Load a stored template definition by id.
///
/// # Example
/// ```no_run
/// use platskill_prompt::load_template;
/// use std::path::Path;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let prompt = load_template(Path::new("."), "custom")?;
/// println!("Loaded prompt: {}", prompt.title);
/// # Ok(())
/// # }
/// ```
pub fn load_template(workspace_path: &Path, prompt_id: &str) -> AppResult<PromptDefinition> {
    let path = prompt_file(workspace_path, prompt_id)?;
    tracing::debug!("Loading prompt from: {:?}", path);

    if !path.exists() {
        return Err(AppError::Config(format!(
            "No custom prompt '{}' found. Create and save one with `platskill prompt save` first.",
            prompt_id
        )));
    }

    let contents = std::fs::read_to_string(&path)
        .map_err(|e| AppError::Prompt(format!("Failed to read prompt file {:?}: {}", path, e)))?;

    let definition: PromptDefinition = serde_yaml::from_str(&contents).map_err(|e| {
        AppError::Prompt(format!("Failed to parse prompt YAML {:?}: {}", path, e))
    })?;

    validate_definition(&definition)?;

    tracing::info!("Loaded prompt: {} ({})", definition.id, definition.title);
    Ok(definition)
}

/// Validate and store a template definition, replacing any previous one.
///
/// Only the placeholder contract is enforced here; length bounds are checked
/// at compile time against the active configuration.
pub fn save_template(workspace_path: &Path, definition: &PromptDefinition) -> AppResult<PathBuf> {
    if definition.template.trim().is_empty() {
        return Err(ValidationError::EmptyTemplate.into());
    }

    let missing = missing_placeholders(&definition.template);
    if !missing.is_empty() {
        return Err(ValidationError::MissingPlaceholders(missing).into());
    }

    validate_definition(definition)?;

    let path = prompt_file(workspace_path, &definition.id)?;
    std::fs::create_dir_all(prompts_dir(workspace_path))?;

    let mut stored = definition.clone();
    stored.template = stored.template.trim().to_string();
    let yaml = serde_yaml::to_string(&stored)?;
    std::fs::write(&path, yaml)?;

    tracing::info!("Saved prompt {} to {:?}", definition.id, path);
    Ok(path)
}

/// Remove a stored template. Returns whether a file was removed.
pub fn delete_template(workspace_path: &Path, prompt_id: &str) -> AppResult<bool> {
    let path = prompt_file(workspace_path, prompt_id)?;
    if !path.exists() {
        return Ok(false);
    }
    std::fs::remove_file(&path)?;
    tracing::info!("Removed prompt {}", prompt_id);
    Ok(true)
}

/// List all stored template ids, sorted.
pub fn list_templates(workspace_path: &Path) -> AppResult<Vec<String>> {
    let dir = prompts_dir(workspace_path);

    if !dir.exists() {
        return Ok(Vec::new());
    }

    let mut prompt_ids = Vec::new();

    for entry in walkdir::WalkDir::new(&dir)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();
        if path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("yml") {
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                prompt_ids.push(stem.to_string());
            }
        }
    }

    prompt_ids.sort();
    Ok(prompt_ids)
}

fn validate_id(id: &str) -> AppResult<()> {
    let valid = !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.')
        && !id.starts_with('.');
    if valid {
        Ok(())
    } else {
        Err(AppError::Prompt(format!("Invalid prompt id: {:?}", id)))
    }
}

fn validate_definition(def: &PromptDefinition) -> AppResult<()> {
    validate_id(&def.id)?;

    if def.title.is_empty() {
        return Err(AppError::Prompt("Prompt title cannot be empty".to_string()));
    }

    if !def.api_version.contains('.') {
        return Err(AppError::Prompt(format!(
            "Invalid apiVersion format: {}. Expected format: 'x.y'",
            def.api_version
        )));
    }

    if def.template.trim().is_empty() {
        return Err(ValidationError::EmptyTemplate.into());
    }

    Ok(())
}
