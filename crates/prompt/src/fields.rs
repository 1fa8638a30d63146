//! Student-profile field map.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Field names every template must reference and every form must fill.
pub const REQUIRED_FIELDS: [&str; 6] = [
    "education-level",
    "education-year",
    "semester",
    "main-skill",
    "skill-level",
    "task-count",
];

/// Render a field name as its `{{name}}` placeholder.
pub fn placeholder(name: &str) -> String {
    format!("{{{{{}}}}}", name)
}

/// Mapping from placeholder name to the value substituted for it.
///
/// Values are opaque strings; they are never parsed or re-scanned for
/// placeholders.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldMap(BTreeMap<String, String>);

impl FieldMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Trimmed value, or `None` when absent or blank.
    pub fn non_empty(&self, name: &str) -> Option<&str> {
        self.get(name).map(str::trim).filter(|v| !v.is_empty())
    }

    /// Required field names that are absent or blank, in declaration order.
    pub fn missing_required(&self) -> Vec<String> {
        REQUIRED_FIELDS
            .iter()
            .filter(|name| self.non_empty(name).is_none())
            .map(|name| name.to_string())
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Fixed profile used to try a template against the live API.
    pub fn sample() -> Self {
        Self::new()
            .with("education-level", "bachelor")
            .with("education-year", "2nd-year")
            .with("semester", "3rd-semester")
            .with("main-skill", "communication")
            .with("skill-level", "medium")
            .with("task-count", "3")
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FieldMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}
