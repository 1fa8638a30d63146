//! Connectivity check for a configured provider.

use crate::client::{LlmClient, LlmRequest};
use platskill_core::AppResult;
use serde::Serialize;

const CHECK_PROMPT: &str = r#"Hello, this is a test. Please respond with "API test successful"."#;

/// Outcome of a successful round trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiStatus {
    /// The model echoed the expected phrase
    Working,
    /// The call succeeded but the reply was not what we asked for
    Unexpected,
}

impl ApiStatus {
    pub fn message(&self) -> &'static str {
        match self {
            Self::Working => "API key is valid and working!",
            Self::Unexpected => "API key test completed, but response was unexpected",
        }
    }
}

/// Send the fixed check prompt and classify the reply.
///
/// Transport failures are returned as errors, not folded into the status.
pub async fn check_api(client: &dyn LlmClient, model: &str) -> AppResult<ApiStatus> {
    let response = client.complete(&LlmRequest::new(CHECK_PROMPT, model)).await?;
    let status = if response.content.to_lowercase().contains("successful") {
        ApiStatus::Working
    } else {
        ApiStatus::Unexpected
    };
    tracing::info!(provider = client.provider_name(), ?status, "API check finished");
    Ok(status)
}
