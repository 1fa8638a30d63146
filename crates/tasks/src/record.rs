//! Task records and result sets.

use platskill_prompt::FieldMap;
use serde::{Deserialize, Serialize};

/// Value used when an attribute was not supplied.
pub const SENTINEL: &str = "N/A";

/// One generated task. Never mutated after parsing; translation produces a copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskRecord {
    pub skill_level: String,
    pub bloom_level: String,
    pub main_skill: String,
    pub subskill: String,
    pub heading: String,
    pub content: String,
    pub task: String,
    pub application: String,
}

impl Default for TaskRecord {
    fn default() -> Self {
        Self {
            skill_level: SENTINEL.to_string(),
            bloom_level: SENTINEL.to_string(),
            main_skill: SENTINEL.to_string(),
            subskill: SENTINEL.to_string(),
            heading: SENTINEL.to_string(),
            content: SENTINEL.to_string(),
            task: SENTINEL.to_string(),
            application: SENTINEL.to_string(),
        }
    }
}

impl TaskRecord {
    pub fn get(&self, column: Column) -> &str {
        match column {
            Column::SkillLevel => &self.skill_level,
            Column::BloomLevel => &self.bloom_level,
            Column::MainSkill => &self.main_skill,
            Column::Subskill => &self.subskill,
            Column::Heading => &self.heading,
            Column::Content => &self.content,
            Column::Task => &self.task,
            Column::Application => &self.application,
        }
    }

    /// Set an attribute; blank values become the sentinel.
    pub fn set(&mut self, column: Column, value: impl Into<String>) {
        let value = value.into();
        let value = if value.trim().is_empty() {
            SENTINEL.to_string()
        } else {
            value
        };
        match column {
            Column::SkillLevel => self.skill_level = value,
            Column::BloomLevel => self.bloom_level = value,
            Column::MainSkill => self.main_skill = value,
            Column::Subskill => self.subskill = value,
            Column::Heading => self.heading = value,
            Column::Content => self.content = value,
            Column::Task => self.task = value,
            Column::Application => self.application = value,
        }
    }
}

/// The eight task attributes, in table order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Column {
    SkillLevel,
    BloomLevel,
    MainSkill,
    Subskill,
    Heading,
    Content,
    Task,
    Application,
}

impl Column {
    pub const ALL: [Column; 8] = [
        Column::SkillLevel,
        Column::BloomLevel,
        Column::MainSkill,
        Column::Subskill,
        Column::Heading,
        Column::Content,
        Column::Task,
        Column::Application,
    ];

    /// Table / CSV header label.
    pub fn header(&self) -> &'static str {
        match self {
            Column::SkillLevel => "Skill Level",
            Column::BloomLevel => "Bloom Level",
            Column::MainSkill => "Main Skill",
            Column::Subskill => "Subskill",
            Column::Heading => "Heading",
            Column::Content => "Content",
            Column::Task => "Task",
            Column::Application => "Application",
        }
    }

    /// Kebab-case key accepted on the command line.
    pub fn key(&self) -> &'static str {
        match self {
            Column::SkillLevel => "skill-level",
            Column::BloomLevel => "bloom-level",
            Column::MainSkill => "main-skill",
            Column::Subskill => "subskill",
            Column::Heading => "heading",
            Column::Content => "content",
            Column::Task => "task",
            Column::Application => "application",
        }
    }

    /// Field name in serialized records.
    pub fn field_name(&self) -> &'static str {
        match self {
            Column::SkillLevel => "skillLevel",
            Column::BloomLevel => "bloomLevel",
            Column::MainSkill => "mainSkill",
            Column::Subskill => "subskill",
            Column::Heading => "heading",
            Column::Content => "content",
            Column::Task => "task",
            Column::Application => "application",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        let wanted = s.trim().to_lowercase().replace([' ', '_'], "-");
        Self::ALL.into_iter().find(|c| c.key() == wanted)
    }
}

/// Which extraction strategy produced a result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParseSource {
    /// Pipe-delimited rows
    Table,
    /// Labelled free-text sections
    Sections,
    /// Nothing usable; one synthesized record
    Fallback,
}

/// Ordered task records plus the profile that produced them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultSet {
    pub fields: FieldMap,
    pub tasks: Vec<TaskRecord>,
    pub source: ParseSource,
}

impl ResultSet {
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}
