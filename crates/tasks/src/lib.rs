//! Task generation for the PLAT SKILL task generator.
//!
//! This crate turns model output into task records and works with them:
//! - `parser`: tolerant extraction of records from free-form text
//! - `translate`: per-attribute translation through an `LlmClient`
//! - `export`: CSV rendering with row and column selection
//! - `pipeline`: compile, call and parse in one step

pub mod export;
pub mod parser;
pub mod pipeline;
pub mod record;
pub mod translate;

pub use export::{default_file_name, to_csv, ExportSelection};
pub use parser::{fallback_record, parse, parse_with_config, ParserConfig, Schema};
pub use pipeline::{Generator, PromptBuilder};
pub use record::{Column, ParseSource, ResultSet, TaskRecord, SENTINEL};
pub use translate::{translate_result_set, translate_text, Language, TranslationReport};
