//! Stored prompt template definitions.

use serde::{Deserialize, Serialize};

/// A user-authored template persisted as YAML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptDefinition {
    /// Unique template identifier (also the file stem)
    pub id: String,

    /// Human-readable title
    pub title: String,

    /// API version for schema evolution
    #[serde(rename = "apiVersion")]
    pub api_version: String,

    /// Creator identifier
    #[serde(rename = "createdBy", default)]
    pub created_by: String,

    /// Template text with `{{name}}` placeholders
    pub template: String,
}

impl PromptDefinition {
    /// Definition with the current API version and a generic title.
    pub fn new(id: impl Into<String>, template: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: "Custom task prompt".to_string(),
            api_version: "1.0".to_string(),
            created_by: "user".to_string(),
            template: template.into(),
        }
    }
}
