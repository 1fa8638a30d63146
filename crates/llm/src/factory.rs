//! LLM provider factory.
//!
//! Resolves a provider name plus optional endpoint and secret into a ready
//! `LlmClient`.

use crate::client::LlmClient;
use crate::providers::{GeminiClient, OllamaClient};
use crate::types::ProviderType;
use platskill_core::config::{DEFAULT_GEMINI_ENDPOINT, DEFAULT_OLLAMA_ENDPOINT};
use platskill_core::{AppConfig, AppError, AppResult};
use std::sync::Arc;
use std::time::Duration;

/// Create an LLM client based on the provider name.
///
/// # Arguments
/// * `provider` - Provider identifier ("gemini", "ollama")
/// * `endpoint` - Optional custom endpoint URL
/// * `api_key` - API key (required for Gemini)
///
/// # Errors
/// Returns `AppError::Config` if the provider is unknown or a required key
/// is missing.
pub fn create_client(
    provider: &str,
    endpoint: Option<&str>,
    api_key: Option<&str>,
) -> AppResult<Arc<dyn LlmClient>> {
    match ProviderType::parse(provider) {
        Some(ProviderType::Gemini) => {
            let api_key = api_key.filter(|k| !k.trim().is_empty()).ok_or_else(|| {
                AppError::Config("No Gemini API key found. Please add your API key.".to_string())
            })?;
            let base_url = endpoint.unwrap_or(DEFAULT_GEMINI_ENDPOINT);
            Ok(Arc::new(GeminiClient::with_base_url(base_url, api_key)))
        }
        Some(ProviderType::Ollama) => {
            let base_url = endpoint.unwrap_or(DEFAULT_OLLAMA_ENDPOINT);
            Ok(Arc::new(OllamaClient::with_base_url(base_url)))
        }
        None => Err(AppError::Config(format!("Unknown provider: {}", provider))),
    }
}

/// Create the client for the active provider of a loaded configuration.
pub fn client_from_config(config: &AppConfig) -> AppResult<Arc<dyn LlmClient>> {
    config.validate()?;

    if config.provider == "ollama" {
        if let Some(timeout) = config
            .llm
            .providers
            .ollama
            .as_ref()
            .and_then(|o| o.timeout)
        {
            let base_url = config
                .endpoint()
                .unwrap_or_else(|| DEFAULT_OLLAMA_ENDPOINT.to_string());
            let client = OllamaClient::with_timeout(base_url, Duration::from_secs(timeout))?;
            return Ok(Arc::new(client));
        }
    }

    let endpoint = config.endpoint();
    let api_key = config.resolve_api_key();
    create_client(&config.provider, endpoint.as_deref(), api_key.as_deref())
}
