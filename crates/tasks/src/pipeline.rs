//! Compile, call, parse.

use crate::parser::{parse_with_config, ParserConfig};
use crate::record::ResultSet;
use platskill_core::{AppConfig, AppResult};
use platskill_llm::{LlmClient, LlmRequest};
use platskill_prompt::{append_format_footer, compile_with_limits, CompiledPrompt, FieldMap, PromptLimits};
use std::sync::Arc;

/// Turns a template and a profile into the exact prompt text that is sent.
///
/// Needs no client, so `generate --dry-run` works without an API key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromptBuilder {
    pub limits: PromptLimits,
    pub append_footer: bool,
}

impl Default for PromptBuilder {
    fn default() -> Self {
        Self {
            limits: PromptLimits::default(),
            append_footer: true,
        }
    }
}

impl PromptBuilder {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            limits: PromptLimits::from(&config.prompt),
            append_footer: config.prompt.append_format_footer,
        }
    }

    /// Compile, then append the format footer when enabled.
    pub fn prepare(&self, template: &str, fields: &FieldMap) -> AppResult<CompiledPrompt> {
        let compiled = compile_with_limits(template, fields, self.limits)?;
        if self.append_footer {
            append_format_footer(compiled, fields)
        } else {
            Ok(compiled)
        }
    }
}

/// Everything needed to turn a template and a profile into tasks.
pub struct Generator {
    client: Arc<dyn LlmClient>,
    model: String,
    prompt: PromptBuilder,
    parser: ParserConfig,
}

impl Generator {
    pub fn new(client: Arc<dyn LlmClient>, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
            prompt: PromptBuilder::default(),
            parser: ParserConfig::default(),
        }
    }

    /// Generator using the model and prompt settings of a loaded config.
    pub fn from_config(client: Arc<dyn LlmClient>, config: &AppConfig) -> Self {
        Self {
            client,
            model: config.model.clone(),
            prompt: PromptBuilder::from_config(config),
            parser: ParserConfig::default(),
        }
    }

    pub fn with_limits(mut self, limits: PromptLimits) -> Self {
        self.prompt.limits = limits;
        self
    }

    pub fn with_footer(mut self, append_footer: bool) -> Self {
        self.prompt.append_footer = append_footer;
        self
    }

    pub fn with_parser(mut self, parser: ParserConfig) -> Self {
        self.parser = parser;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn client(&self) -> &dyn LlmClient {
        self.client.as_ref()
    }

    /// The exact text that would be sent. Fails without any network call.
    pub fn prepare(&self, template: &str, fields: &FieldMap) -> AppResult<CompiledPrompt> {
        self.prompt.prepare(template, fields)
    }

    /// Compile the template, make one call and parse the reply.
    pub async fn generate_tasks(&self, template: &str, fields: &FieldMap) -> AppResult<ResultSet> {
        let prompt = self.prepare(template, fields)?;
        tracing::info!(
            "Requesting {} tasks from {} ({})",
            fields.get("task-count").unwrap_or("?"),
            self.client.provider_name(),
            self.model
        );
        tracing::debug!("Prompt: {}", prompt);

        let request = LlmRequest::new(prompt.into_string(), &self.model);
        let response = self.client.complete(&request).await?;
        tracing::debug!("Response: {} characters", response.content.len());

        let result = parse_with_config(&response.content, fields, &self.parser);
        tracing::info!("Parsed {} tasks ({:?})", result.len(), result.source);
        Ok(result)
    }

    /// Send a template compiled with the sample profile and return the raw reply.
    pub async fn test_template(&self, template: &str) -> AppResult<String> {
        let prompt = compile_with_limits(template, &FieldMap::sample(), self.prompt.limits)?;
        let request = LlmRequest::new(prompt.into_string(), &self.model);
        let response = self.client.complete(&request).await?;
        Ok(response.content)
    }
}
