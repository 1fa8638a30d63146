//! Translation of result sets, one attribute per call.

use crate::record::{Column, ResultSet, SENTINEL};
use platskill_core::{AppResult, ValidationError};
use platskill_llm::{LlmClient, LlmRequest};
use serde::{Deserialize, Serialize};

/// Attributes sent for translation. Skill and bloom levels are labels and stay as-is.
pub const TRANSLATED_COLUMNS: [Column; 6] = [
    Column::MainSkill,
    Column::Subskill,
    Column::Heading,
    Column::Content,
    Column::Task,
    Column::Application,
];

/// Supported output languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    En,
    Hi,
    Mr,
    Bn,
    Te,
    Ta,
    Ml,
    Kn,
    Gu,
    Pa,
    Or,
    As,
    Ne,
}

impl Language {
    pub const ALL: [Language; 13] = [
        Language::En,
        Language::Hi,
        Language::Mr,
        Language::Bn,
        Language::Te,
        Language::Ta,
        Language::Ml,
        Language::Kn,
        Language::Gu,
        Language::Pa,
        Language::Or,
        Language::As,
        Language::Ne,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Hi => "hi",
            Language::Mr => "mr",
            Language::Bn => "bn",
            Language::Te => "te",
            Language::Ta => "ta",
            Language::Ml => "ml",
            Language::Kn => "kn",
            Language::Gu => "gu",
            Language::Pa => "pa",
            Language::Or => "or",
            Language::As => "as",
            Language::Ne => "ne",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Hi => "Hindi",
            Language::Mr => "Marathi",
            Language::Bn => "Bengali",
            Language::Te => "Telugu",
            Language::Ta => "Tamil",
            Language::Ml => "Malayalam",
            Language::Kn => "Kannada",
            Language::Gu => "Gujarati",
            Language::Pa => "Punjabi",
            Language::Or => "Odia",
            Language::As => "Assamese",
            Language::Ne => "Nepali",
        }
    }

    /// Accepts a language code or English name, case-insensitively.
    pub fn parse(s: &str) -> AppResult<Self> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|l| l.code() == wanted || l.name().to_lowercase() == wanted)
            .ok_or_else(|| ValidationError::UnknownLanguage(s.trim().to_string()).into())
    }
}

/// Outcome of translating a result set.
#[derive(Debug, Clone)]
pub struct TranslationReport {
    pub result_set: ResultSet,
    /// Attributes sent to the model
    pub attempted: usize,
    /// Attributes whose call failed and kept their original text
    pub failed: usize,
}

fn translation_prompt(text: &str, language: Language) -> String {
    format!(
        "Translate the following text to {}. Only return the translation, no additional text:\n\n{}",
        language.name(),
        text
    )
}

/// Translate a single string. English is returned unchanged without a call.
pub async fn translate_text(
    client: &dyn LlmClient,
    model: &str,
    text: &str,
    language: Language,
) -> AppResult<String> {
    if language == Language::En {
        return Ok(text.to_string());
    }

    let request = LlmRequest::new(translation_prompt(text, language), model);
    let response = client.complete(&request).await?;
    Ok(response.content.trim().to_string())
}

/// Translate every free-text attribute of every record, sequentially.
///
/// A failed call keeps that attribute's original text; siblings and later
/// records are still attempted. The input is left untouched.
pub async fn translate_result_set(
    client: &dyn LlmClient,
    model: &str,
    result_set: &ResultSet,
    language: Language,
) -> TranslationReport {
    let mut translated = result_set.clone();
    let mut attempted = 0;
    let mut failed = 0;

    if language == Language::En {
        return TranslationReport {
            result_set: translated,
            attempted,
            failed,
        };
    }

    tracing::info!(
        "Translating {} tasks to {}",
        result_set.len(),
        language.name()
    );

    for (index, record) in translated.tasks.iter_mut().enumerate() {
        for column in TRANSLATED_COLUMNS {
            let original = record.get(column).to_string();
            if original == SENTINEL || original.trim().is_empty() {
                continue;
            }

            attempted += 1;
            match translate_text(client, model, &original, language).await {
                Ok(text) if !text.is_empty() => record.set(column, text),
                Ok(_) => {
                    failed += 1;
                    tracing::warn!("Empty translation for task {} {}", index + 1, column.key());
                }
                Err(e) => {
                    failed += 1;
                    tracing::warn!(
                        "Translation failed for task {} {}: {}",
                        index + 1,
                        column.key(),
                        e
                    );
                }
            }
        }
    }

    TranslationReport {
        result_set: translated,
        attempted,
        failed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{ParseSource, TaskRecord};
    use platskill_core::AppError;
    use platskill_llm::MockClient;
    use platskill_prompt::FieldMap;

    fn sample_set() -> ResultSet {
        let mut record = TaskRecord::default();
        record.set(Column::SkillLevel, "Medium");
        record.set(Column::BloomLevel, "Applying");
        record.set(Column::MainSkill, "Communication");
        record.set(Column::Heading, "Team Retro");
        record.set(Column::Content, "Hold a short retrospective");
        record.set(Column::Task, "Lead a ten minute retrospective");
        record.set(Column::Application, "Sprint reviews");
        ResultSet {
            fields: FieldMap::sample(),
            tasks: vec![record],
            source: ParseSource::Table,
        }
    }

    fn text_of(request: &LlmRequest) -> String {
        request
            .prompt
            .rsplit("\n\n")
            .next()
            .unwrap_or_default()
            .to_string()
    }

    #[test]
    fn test_parse_language() {
        assert_eq!(Language::parse("hi").unwrap(), Language::Hi);
        assert_eq!(Language::parse("Tamil").unwrap(), Language::Ta);
        assert_eq!(Language::parse(" NE ").unwrap(), Language::Ne);
        assert!(matches!(
            Language::parse("xx"),
            Err(AppError::Validation(ValidationError::UnknownLanguage(_)))
        ));
    }

    #[tokio::test]
    async fn test_translate_text_builds_prompt_and_trims() {
        let client = MockClient::replying("  नमस्ते \n");
        let out = translate_text(&client, "gemini-2.0-flash", "Hello", Language::Hi)
            .await
            .unwrap();

        assert_eq!(out, "नमस्ते");
        let requests = client.requests();
        assert_eq!(
            requests[0].prompt,
            "Translate the following text to Hindi. Only return the translation, no additional text:\n\nHello"
        );
        assert_eq!(requests[0].model, "gemini-2.0-flash");
    }

    #[tokio::test]
    async fn test_english_is_identity() {
        let client = MockClient::replying("should not be used");
        let report = translate_result_set(&client, "m", &sample_set(), Language::En).await;

        assert_eq!(report.result_set, sample_set());
        assert_eq!(client.call_count(), 0);
    }

    #[tokio::test]
    async fn test_levels_and_sentinels_are_not_sent() {
        let client = MockClient::new(|req| Ok(format!("[{}]", text_of(req))));
        let report = translate_result_set(&client, "m", &sample_set(), Language::Mr).await;

        // main skill, heading, content, task, application; subskill is N/A
        assert_eq!(client.call_count(), 5);
        assert_eq!(report.attempted, 5);
        assert_eq!(report.failed, 0);

        let task = &report.result_set.tasks[0];
        assert_eq!(task.skill_level, "Medium");
        assert_eq!(task.bloom_level, "Applying");
        assert_eq!(task.subskill, SENTINEL);
        assert_eq!(task.heading, "[Team Retro]");
        assert_eq!(task.application, "[Sprint reviews]");
    }

    #[tokio::test]
    async fn test_failed_attribute_keeps_original() {
        let client = MockClient::new(|req| {
            let text = text_of(req);
            if text == "Team Retro" {
                Err(AppError::transport_status(503, "unavailable"))
            } else {
                Ok(format!("T:{text}"))
            }
        });
        let original = sample_set();
        let report = translate_result_set(&client, "m", &original, Language::Bn).await;

        let task = &report.result_set.tasks[0];
        assert_eq!(task.heading, "Team Retro");
        assert_eq!(task.content, "T:Hold a short retrospective");
        assert_eq!(task.task, "T:Lead a ten minute retrospective");
        assert_eq!(report.failed, 1);
        // input untouched
        assert_eq!(original.tasks[0].content, "Hold a short retrospective");
    }
}
