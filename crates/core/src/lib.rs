//! PLAT SKILL Core Library
//!
//! This crate provides the foundational utilities for the PLAT SKILL task generator:
//! - Error handling (`AppError`, `AppResult`, `ValidationError`)
//! - Logging infrastructure
//! - Configuration management and persistence

pub mod config;
pub mod error;
pub mod logging;

// Re-export commonly used types
pub use config::AppConfig;
pub use error::{AppError, AppResult, ValidationError};
