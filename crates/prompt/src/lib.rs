//! Prompt system for the PLAT SKILL task generator.
//!
//! This crate provides:
//! - The student-profile field map and its required keys
//! - The prompt compiler (placeholder contract, length bounds, substitution)
//! - The table-format footer appended to compiled prompts
//! - The YAML template store

pub mod compiler;
pub mod fields;
pub mod loader;
pub mod types;

// Re-export main types
pub use compiler::{
    append_format_footer, compile, compile_with_limits, missing_placeholders, CompiledPrompt,
    PromptLimits,
};
pub use fields::{placeholder, FieldMap, REQUIRED_FIELDS};
pub use loader::{delete_template, list_templates, load_template, save_template};
pub use types::PromptDefinition;
