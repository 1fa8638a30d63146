//! CSV export with row and column selection.

use crate::record::{Column, TaskRecord, SENTINEL};
use chrono::NaiveDate;
use platskill_core::{AppResult, ValidationError};

/// Which records and attributes to export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSelection {
    /// Record indices, zero-based. Empty means every record.
    pub rows: Vec<usize>,
    /// Columns in output order. Must not be empty.
    pub columns: Vec<Column>,
}

impl Default for ExportSelection {
    fn default() -> Self {
        Self::all()
    }
}

impl ExportSelection {
    pub fn all() -> Self {
        Self {
            rows: Vec::new(),
            columns: Column::ALL.to_vec(),
        }
    }

    /// True when only part of the records or columns is exported.
    pub fn is_subset(&self) -> bool {
        !self.rows.is_empty() || self.columns.as_slice() != Column::ALL.as_slice()
    }

    /// Selected records with their zero-based index, in selection order.
    /// Out-of-range indices are skipped.
    pub fn select<'a>(&self, records: &'a [TaskRecord]) -> Vec<(usize, &'a TaskRecord)> {
        if self.rows.is_empty() {
            return records.iter().enumerate().collect();
        }

        self.rows
            .iter()
            .filter_map(|&i| {
                let record = records.get(i);
                if record.is_none() {
                    tracing::debug!("Skipping out-of-range row {}", i);
                }
                record.map(|r| (i, r))
            })
            .collect()
    }
}

fn quote(value: &str) -> String {
    let value = if value.is_empty() { SENTINEL } else { value };
    format!("\"{}\"", value.replace('"', "\"\""))
}

fn line<'a>(values: impl Iterator<Item = &'a str>) -> String {
    values.map(quote).collect::<Vec<_>>().join(",")
}

/// Render `records` as CSV: a header line, then one line per selected record.
pub fn to_csv(records: &[TaskRecord], selection: &ExportSelection) -> AppResult<String> {
    if selection.columns.is_empty() {
        return Err(ValidationError::NoColumnsSelected.into());
    }

    let selected = selection.select(records);

    let mut lines = Vec::with_capacity(selected.len() + 1);
    lines.push(line(selection.columns.iter().map(|c| c.header())));
    for (_, record) in selected {
        lines.push(line(selection.columns.iter().map(|c| record.get(*c))));
    }

    Ok(lines.join("\n"))
}

/// `PLAT_SKILL_Tasks_<date>.csv`, or `PLAT_SKILL_Tasks_Selected_<date>.csv` for a subset.
pub fn default_file_name(date: NaiveDate, subset: bool) -> String {
    let date = date.format("%Y-%m-%d");
    if subset {
        format!("PLAT_SKILL_Tasks_Selected_{date}.csv")
    } else {
        format!("PLAT_SKILL_Tasks_{date}.csv")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::fallback_record;
    use platskill_core::AppError;
    use platskill_prompt::FieldMap;

    /// Minimal reader for fully quoted fields, enough to check escaping.
    fn read_csv_line(line: &str) -> Vec<String> {
        let mut fields = Vec::new();
        let mut current = String::new();
        let mut in_quotes = false;
        let mut chars = line.chars().peekable();

        while let Some(c) = chars.next() {
            match (c, in_quotes) {
                ('"', true) if chars.peek() == Some(&'"') => {
                    current.push('"');
                    chars.next();
                }
                ('"', _) => in_quotes = !in_quotes,
                (',', false) => fields.push(std::mem::take(&mut current)),
                _ => current.push(c),
            }
        }
        fields.push(current);
        fields
    }

    fn record(heading: &str) -> TaskRecord {
        let mut record = TaskRecord::default();
        record.set(Column::Heading, heading);
        record.set(Column::Task, format!("Do {heading}"));
        record
    }

    #[test]
    fn test_header_and_quoting() {
        let mut r = record("Say \"hi\", politely");
        r.content = String::new();
        let csv = to_csv(&[r], &ExportSelection::all()).unwrap();
        let lines: Vec<&str> = csv.split('\n').collect();

        assert_eq!(
            lines[0],
            "\"Skill Level\",\"Bloom Level\",\"Main Skill\",\"Subskill\",\"Heading\",\"Content\",\"Task\",\"Application\""
        );
        assert!(lines[1].contains("\"Say \"\"hi\"\", politely\""));
        // empty content written as the sentinel
        assert_eq!(read_csv_line(lines[1])[5], "N/A");
        assert!(!csv.ends_with('\n'));
    }

    #[test]
    fn test_fallback_record_round_trips() {
        let original = fallback_record(&FieldMap::sample());
        let csv = to_csv(&[original.clone()], &ExportSelection::all()).unwrap();
        let line = csv.lines().nth(1).unwrap();
        let values = read_csv_line(line);

        assert_eq!(values.len(), 8);
        for (column, value) in Column::ALL.iter().zip(&values) {
            assert_eq!(original.get(*column), value);
        }
    }

    #[test]
    fn test_row_selection_skips_out_of_range() {
        let records = vec![record("First"), record("Second"), record("Third")];
        let selection = ExportSelection {
            rows: vec![2, 7, 0],
            columns: vec![Column::Heading],
        };
        let csv = to_csv(&records, &selection).unwrap();
        assert_eq!(csv, "\"Heading\"\n\"Third\"\n\"First\"");
    }

    #[test]
    fn test_select_keeps_original_indices() {
        let records = vec![record("First"), record("Second"), record("Third")];
        let selection = ExportSelection {
            rows: vec![2, 9, 1],
            columns: Column::ALL.to_vec(),
        };
        let picked: Vec<(usize, &str)> = selection
            .select(&records)
            .into_iter()
            .map(|(i, r)| (i, r.heading.as_str()))
            .collect();
        assert_eq!(picked, vec![(2, "Third"), (1, "Second")]);
        assert_eq!(ExportSelection::all().select(&records).len(), 3);
    }

    #[test]
    fn test_column_order_follows_selection() {
        let selection = ExportSelection {
            rows: Vec::new(),
            columns: vec![Column::Task, Column::Heading],
        };
        let csv = to_csv(&[record("Pitch")], &selection).unwrap();
        assert_eq!(csv, "\"Task\",\"Heading\"\n\"Do Pitch\",\"Pitch\"");
    }

    #[test]
    fn test_no_columns_is_rejected() {
        let selection = ExportSelection {
            rows: Vec::new(),
            columns: Vec::new(),
        };
        assert!(matches!(
            to_csv(&[record("Pitch")], &selection),
            Err(AppError::Validation(ValidationError::NoColumnsSelected))
        ));
    }

    #[test]
    fn test_file_names() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        assert_eq!(default_file_name(date, false), "PLAT_SKILL_Tasks_2024-03-09.csv");
        assert_eq!(
            default_file_name(date, true),
            "PLAT_SKILL_Tasks_Selected_2024-03-09.csv"
        );
        assert!(!ExportSelection::all().is_subset());
        assert!(ExportSelection {
            rows: vec![0],
            columns: Column::ALL.to_vec()
        }
        .is_subset());
    }
}
