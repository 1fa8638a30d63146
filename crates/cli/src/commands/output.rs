//! Rendering of result sets to stdout and files.

use platskill_core::{AppError, AppResult, ValidationError};
use platskill_tasks::{default_file_name, to_csv, Column, ExportSelection, ResultSet};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Parse `--columns` values; an empty list means every column.
pub fn parse_columns(values: &[String]) -> AppResult<Vec<Column>> {
    if values.is_empty() {
        return Ok(Column::ALL.to_vec());
    }

    values
        .iter()
        .map(|v| {
            Column::parse(v).ok_or_else(|| {
                let known: Vec<&str> = Column::ALL.iter().map(|c| c.key()).collect();
                AppError::Config(format!(
                    "Unknown column '{}'. Valid columns: {}",
                    v,
                    known.join(", ")
                ))
            })
        })
        .collect()
}

/// Build an export selection from 1-based row numbers and column names.
pub fn selection(rows: &[usize], columns: &[String]) -> AppResult<ExportSelection> {
    Ok(ExportSelection {
        rows: rows.iter().filter(|&&r| r > 0).map(|r| r - 1).collect(),
        columns: parse_columns(columns)?,
    })
}

/// Resolve where a CSV export goes. A directory gets the default file name.
pub fn csv_path(output: &Path, subset: bool) -> PathBuf {
    if output.is_dir() {
        let today = chrono::Local::now().date_naive();
        output.join(default_file_name(today, subset))
    } else {
        output.to_path_buf()
    }
}

/// Write the selected records as CSV, to `output` or stdout.
pub fn write_csv(
    result: &ResultSet,
    selection: &ExportSelection,
    output: Option<&Path>,
) -> AppResult<Option<PathBuf>> {
    let csv = to_csv(&result.tasks, selection)?;

    match output {
        Some(output) => {
            let path = csv_path(output, selection.is_subset());
            std::fs::write(&path, csv)?;
            tracing::info!("Wrote {} tasks to {:?}", result.len(), path);
            Ok(Some(path))
        }
        None => {
            println!("{}", csv);
            Ok(None)
        }
    }
}

pub fn print_json<T: Serialize>(value: &T) -> AppResult<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{}", json);
    Ok(())
}

/// JSON view of the selected rows and columns.
///
/// A full selection is the result set as-is. Otherwise `tasks` holds only the
/// selected records, each with only the selected fields.
pub fn selected_json(result: &ResultSet, selection: &ExportSelection) -> AppResult<serde_json::Value> {
    if selection.columns.is_empty() {
        return Err(ValidationError::NoColumnsSelected.into());
    }

    let mut value = serde_json::to_value(result)?;
    if !selection.is_subset() {
        return Ok(value);
    }

    let tasks = selection
        .select(&result.tasks)
        .into_iter()
        .map(|(_, task)| {
            let fields = selection
                .columns
                .iter()
                .map(|c| (c.field_name().to_string(), serde_json::Value::from(task.get(*c))))
                .collect::<serde_json::Map<_, _>>();
            serde_json::Value::Object(fields)
        })
        .collect();
    value["tasks"] = serde_json::Value::Array(tasks);
    Ok(value)
}

/// Human-readable listing of the selected records, numbered from 1.
pub fn render_tasks(result: &ResultSet, selection: &ExportSelection) -> String {
    let mut out = String::new();
    for (i, task) in selection.select(&result.tasks) {
        out.push_str(&format!("Task {}: {}\n", i + 1, task.heading));
        for column in selection.columns.iter().filter(|c| **c != Column::Heading) {
            out.push_str(&format!(
                "  {:<12} {}\n",
                format!("{}:", column.header()),
                task.get(*column)
            ));
        }
        out.push('\n');
    }
    out
}

pub fn print_tasks(result: &ResultSet, selection: &ExportSelection) {
    print!("{}", render_tasks(result, selection));
}
