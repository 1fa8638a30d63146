//! Prompt compilation: validate a template against the required placeholder
//! contract, then substitute field values.
//!
//! Nothing here touches the network. A template that would produce a
//! malformed request is rejected before the caller spends an API call on it.

use crate::fields::{placeholder, FieldMap, REQUIRED_FIELDS};
use handlebars::Handlebars;
use platskill_core::config::PromptSettings;
use platskill_core::{AppError, AppResult, ValidationError};
use serde::Serialize;
use std::fmt;

/// Inclusive template length bounds, in characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromptLimits {
    pub min_length: usize,
    pub max_length: usize,
}

impl Default for PromptLimits {
    fn default() -> Self {
        Self {
            min_length: 50,
            max_length: 5000,
        }
    }
}

impl From<&PromptSettings> for PromptLimits {
    fn from(settings: &PromptSettings) -> Self {
        Self {
            min_length: settings.min_length,
            max_length: settings.max_length,
        }
    }
}

/// A template with every required placeholder substituted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CompiledPrompt(String);

impl CompiledPrompt {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for CompiledPrompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Required placeholders absent from `template`, in declaration order.
pub fn missing_placeholders(template: &str) -> Vec<String> {
    REQUIRED_FIELDS
        .iter()
        .map(|name| placeholder(name))
        .filter(|p| !template.contains(p.as_str()))
        .collect()
}

/// Compile with the default length limits.
pub fn compile(template: &str, fields: &FieldMap) -> AppResult<CompiledPrompt> {
    compile_with_limits(template, fields, PromptLimits::default())
}

/// Validate `template` and `fields`, then substitute every required placeholder.
///
/// Checks run in order: placeholders, length, field values. The first failing
/// check is reported; a placeholder failure names every missing placeholder.
/// Placeholders outside the required set are copied through untouched.
pub fn compile_with_limits(
    template: &str,
    fields: &FieldMap,
    limits: PromptLimits,
) -> AppResult<CompiledPrompt> {
    let missing = missing_placeholders(template);
    if !missing.is_empty() {
        return Err(ValidationError::MissingPlaceholders(missing).into());
    }

    let length = template.chars().count();
    if length < limits.min_length {
        return Err(ValidationError::TemplateTooShort {
            length,
            min: limits.min_length,
        }
        .into());
    }
    if length > limits.max_length {
        return Err(ValidationError::TemplateTooLong {
            length,
            max: limits.max_length,
        }
        .into());
    }

    let missing_fields = fields.missing_required();
    if !missing_fields.is_empty() {
        return Err(ValidationError::MissingFields(missing_fields).into());
    }

    let compiled = substitute(template, fields);
    tracing::debug!(
        template_chars = length,
        compiled_chars = compiled.chars().count(),
        "Compiled prompt"
    );
    Ok(CompiledPrompt(compiled))
}

/// Single left-to-right pass so substituted values are never rescanned.
fn substitute(template: &str, fields: &FieldMap) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after_open = &rest[start + 2..];

        let replaced = after_open.find("}}").and_then(|end| {
            let name = &after_open[..end];
            if REQUIRED_FIELDS.contains(&name) {
                fields.get(name).map(|value| (value, end))
            } else {
                None
            }
        });

        match replaced {
            Some((value, end)) => {
                out.push_str(value);
                rest = &after_open[end + 2..];
            }
            None => {
                out.push_str("{{");
                rest = after_open;
            }
        }
    }

    out.push_str(rest);
    out
}

const FORMAT_FOOTER: &str = "

**FINAL INSTRUCTIONS:**
1. Ensure 100% accuracy in table formatting
2. Each row must have exactly 8 columns separated by |
3. Use clear, professional language
4. Make tasks practical and actionable
5. Include specific examples and scenarios
6. Generate exactly {{task_count}} tasks
7. Double-check formatting before responding

**OUTPUT FORMAT VERIFICATION:**
Skill Level | Bloom Level | Main Skill | Subskill | Heading | Content | Task | Application

Generate the table now with perfect formatting.";

#[derive(Serialize)]
struct FooterData<'a> {
    task_count: &'a str,
}

/// Append the table-format instructions to a compiled prompt.
pub fn append_format_footer(
    compiled: CompiledPrompt,
    fields: &FieldMap,
) -> AppResult<CompiledPrompt> {
    let mut handlebars = Handlebars::new();
    handlebars.register_escape_fn(handlebars::no_escape);

    let data = FooterData {
        task_count: fields.non_empty("task-count").unwrap_or("N/A"),
    };
    let footer = handlebars
        .render_template(FORMAT_FOOTER, &data)
        .map_err(|e| AppError::Prompt(format!("Failed to render format footer: {}", e)))?;

    let mut text = compiled.into_string();
    text.push_str(&footer);
    Ok(CompiledPrompt(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEMPLATE: &str = "Create {{task-count}} tasks for a {{education-level}} student in \
        {{education-year}}, {{semester}}, practising {{main-skill}} at {{skill-level}} level.";

    #[test]
    fn test_compile_substitutes_every_placeholder() {
        let compiled = compile(TEMPLATE, &FieldMap::sample()).unwrap();
        assert_eq!(
            compiled.as_str(),
            "Create 3 tasks for a bachelor student in 2nd-year, 3rd-semester, \
             practising communication at medium level."
        );
    }

    #[test]
    fn test_compile_replaces_repeated_placeholders() {
        let template = format!("{} Focus on {{{{main-skill}}}} again: {{{{main-skill}}}}.", TEMPLATE);
        let compiled = compile(&template, &FieldMap::sample()).unwrap();
        assert!(compiled.as_str().ends_with("Focus on communication again: communication."));
        assert!(!compiled.as_str().contains("{{"));
    }

    #[test]
    fn test_compile_names_every_missing_placeholder() {
        let template = "A long enough template mentioning only {{education-level}} and {{main-skill}}.";
        let err = compile(template, &FieldMap::sample()).unwrap_err();
        match err {
            AppError::Validation(ValidationError::MissingPlaceholders(missing)) => assert_eq!(
                missing,
                vec![
                    "{{education-year}}",
                    "{{semester}}",
                    "{{skill-level}}",
                    "{{task-count}}"
                ]
            ),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_compile_rejects_short_template() {
        let template = "{{education-level}}{{education-year}}{{semester}}{{main-skill}}{{skill-level}}{{task-count}}";
        let limits = PromptLimits {
            min_length: 200,
            max_length: 5000,
        };
        let err = compile_with_limits(template, &FieldMap::sample(), limits).unwrap_err();
        assert!(matches!(
            err,
            AppError::Validation(ValidationError::TemplateTooShort { min: 200, .. })
        ));
    }

    #[test]
    fn test_compile_rejects_long_template() {
        let template = format!("{}{}", TEMPLATE, "x".repeat(5000));
        let err = compile(&template, &FieldMap::sample()).unwrap_err();
        assert!(matches!(
            err,
            AppError::Validation(ValidationError::TemplateTooLong { max: 5000, .. })
        ));
    }

    #[test]
    fn test_length_bounds_are_inclusive() {
        let length = TEMPLATE.chars().count();
        let limits = PromptLimits {
            min_length: length,
            max_length: length,
        };
        assert!(compile_with_limits(TEMPLATE, &FieldMap::sample(), limits).is_ok());
    }

    #[test]
    fn test_surrounding_whitespace_counts_toward_length() {
        let length = TEMPLATE.chars().count();
        let limits = PromptLimits {
            min_length: length,
            max_length: length,
        };
        let padded = format!("  {}\n", TEMPLATE);
        let err = compile_with_limits(&padded, &FieldMap::sample(), limits).unwrap_err();
        assert!(matches!(
            err,
            AppError::Validation(ValidationError::TemplateTooLong { length: l, .. }) if l == length + 3
        ));
    }

    #[test]
    fn test_compile_rejects_blank_field() {
        let fields = FieldMap::sample().with("skill-level", " ");
        let err = compile(TEMPLATE, &fields).unwrap_err();
        assert!(matches!(
            err,
            AppError::Validation(ValidationError::MissingFields(ref f)) if f == &vec!["skill-level".to_string()]
        ));
    }

    #[test]
    fn test_unknown_placeholders_left_untouched() {
        let template = format!("{} Use {{{{tone}}}} and {{{{ unclosed", TEMPLATE);
        let compiled = compile(&template, &FieldMap::sample()).unwrap();
        assert!(compiled.as_str().contains("Use {{tone}} and {{ unclosed"));
    }

    #[test]
    fn test_values_are_not_rescanned() {
        let fields = FieldMap::sample().with("main-skill", "{{semester}}");
        let compiled = compile(TEMPLATE, &fields).unwrap();
        assert!(compiled.as_str().contains("practising {{semester}} at"));
    }

    #[test]
    fn test_compile_is_deterministic() {
        let a = compile(TEMPLATE, &FieldMap::sample()).unwrap();
        let b = compile(TEMPLATE, &FieldMap::sample()).unwrap();
        assert_eq!(a.as_str().as_bytes(), b.as_str().as_bytes());
    }

    #[test]
    fn test_format_footer_mentions_task_count() {
        let compiled = compile(TEMPLATE, &FieldMap::sample()).unwrap();
        let enhanced = append_format_footer(compiled.clone(), &FieldMap::sample()).unwrap();
        assert!(enhanced.as_str().starts_with(compiled.as_str()));
        assert!(enhanced.as_str().contains("6. Generate exactly 3 tasks"));
        assert!(enhanced
            .as_str()
            .contains("Skill Level | Bloom Level | Main Skill | Subskill | Heading | Content | Task | Application"));
    }
}
