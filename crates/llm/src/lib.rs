//! LLM integration crate for the PLAT SKILL task generator.
//!
//! This crate provides a provider-agnostic abstraction for the single
//! request/response call the generator makes to a text-generation service.
//!
//! # Providers
//! - **Gemini**: Google Generative Language API (default)
//! - **Ollama**: Local LLM runtime
//! - **Mock**: Scripted replies for tests
//!
//! # Example
//! ```no_run
//! use platskill_llm::{LlmClient, LlmRequest, providers::GeminiClient};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = GeminiClient::new("my-api-key");
//! let request = LlmRequest::new("Hello, world!", "gemini-2.0-flash");
//! let response = client.complete(&request).await?;
//! println!("{}", response.content);
//! # Ok(())
//! # }
//! ```

pub mod check;
pub mod client;
pub mod factory;
pub mod providers;
pub mod types;

// Re-export main types
pub use check::{check_api, ApiStatus};
pub use client::{LlmClient, LlmRequest, LlmResponse, LlmUsage};
pub use factory::{client_from_config, create_client};
pub use providers::{GeminiClient, MockClient, OllamaClient};
pub use types::{is_known_gemini_model, ProviderType, GEMINI_MODELS};
