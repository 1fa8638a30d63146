//! Column schemas for pipe-delimited rows.
//!
//! Each schema is an ordered list of attributes; a row is mapped with the
//! widest schema whose arity it meets. Supporting another historical output
//! shape means adding an entry to `DEFAULT_SCHEMAS`.

use crate::record::{Column, TaskRecord};

/// A named positional mapping from row cells to task attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schema {
    pub name: &'static str,
    pub columns: &'static [Column],
}

impl Schema {
    pub fn arity(&self) -> usize {
        self.columns.len()
    }

    /// Map the first `arity` cells positionally; unmapped attributes stay `N/A`.
    pub fn map(&self, cells: &[String]) -> TaskRecord {
        let mut record = TaskRecord::default();
        for (column, cell) in self.columns.iter().zip(cells) {
            record.set(*column, cell.as_str());
        }
        record
    }
}

pub const FULL: Schema = Schema {
    name: "full",
    columns: &[
        Column::SkillLevel,
        Column::BloomLevel,
        Column::MainSkill,
        Column::Subskill,
        Column::Heading,
        Column::Content,
        Column::Task,
        Column::Application,
    ],
};

pub const LEGACY: Schema = Schema {
    name: "legacy",
    columns: &[
        Column::SkillLevel,
        Column::BloomLevel,
        Column::Heading,
        Column::Content,
        Column::Task,
        Column::Application,
    ],
};

pub const MINIMAL: Schema = Schema {
    name: "minimal",
    columns: &[
        Column::Heading,
        Column::Content,
        Column::Task,
        Column::Application,
    ],
};

pub const DEFAULT_SCHEMAS: [Schema; 3] = [FULL, LEGACY, MINIMAL];

/// Widest schema whose arity does not exceed `cell_count`.
pub fn select_schema(schemas: &[Schema], cell_count: usize) -> Option<&Schema> {
    schemas
        .iter()
        .filter(|s| s.arity() <= cell_count)
        .max_by_key(|s| s.arity())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::SENTINEL;

    fn cells(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_select_prefers_widest() {
        assert_eq!(select_schema(&DEFAULT_SCHEMAS, 8).unwrap().name, "full");
        assert_eq!(select_schema(&DEFAULT_SCHEMAS, 9).unwrap().name, "full");
        assert_eq!(select_schema(&DEFAULT_SCHEMAS, 7).unwrap().name, "legacy");
        assert_eq!(select_schema(&DEFAULT_SCHEMAS, 6).unwrap().name, "legacy");
        assert_eq!(select_schema(&DEFAULT_SCHEMAS, 5).unwrap().name, "minimal");
        assert_eq!(select_schema(&DEFAULT_SCHEMAS, 4).unwrap().name, "minimal");
        assert!(select_schema(&DEFAULT_SCHEMAS, 3).is_none());
    }

    #[test]
    fn test_order_of_schema_list_does_not_matter() {
        let reversed = [MINIMAL, LEGACY, FULL];
        assert_eq!(select_schema(&reversed, 8).unwrap().name, "full");
    }

    #[test]
    fn test_legacy_mapping_fills_sentinels() {
        let record = LEGACY.map(&cells(&["Low", "Remembering", "H", "C", "T", "A"]));
        assert_eq!(record.skill_level, "Low");
        assert_eq!(record.main_skill, SENTINEL);
        assert_eq!(record.subskill, SENTINEL);
        assert_eq!(record.heading, "H");
        assert_eq!(record.application, "A");
    }

    #[test]
    fn test_minimal_mapping() {
        let record = MINIMAL.map(&cells(&["Heading", "Content", "Task", "App"]));
        assert_eq!(record.skill_level, SENTINEL);
        assert_eq!(record.heading, "Heading");
        assert_eq!(record.task, "Task");
    }
}
