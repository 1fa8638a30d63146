//! Extraction from unstructured prose, used when no table row survives.

use super::rows::clean_cell;
use super::ParserConfig;
use crate::record::{Column, TaskRecord, SENTINEL};
use platskill_prompt::FieldMap;

const TASK_LABELS: [&str; 2] = ["task:", "activity:"];
const APPLICATION_LABELS: [&str; 2] = ["application:", "use:"];

/// Split on blank lines and keep sections longer than the configured minimum.
fn split_sections<'a>(text: &'a str, config: &ParserConfig) -> Vec<Vec<&'a str>> {
    let mut sections = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for line in text.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                sections.push(std::mem::take(&mut current));
            }
        } else {
            current.push(line.trim());
        }
    }
    if !current.is_empty() {
        sections.push(current);
    }

    sections
        .into_iter()
        .filter(|lines| lines.join("\n").chars().count() > config.min_section_length)
        .collect()
}

/// Value after a case-insensitive label, with markdown emphasis ignored.
fn labelled(line: &str, labels: &[&str]) -> Option<String> {
    let plain = line.replace('*', "");
    let plain = plain
        .trim_start_matches(|c: char| c == '#' || c == '-' || c.is_whitespace())
        .to_string();

    labels.iter().find_map(|label| {
        let head = plain.get(..label.len())?;
        if head.eq_ignore_ascii_case(label) {
            plain.get(label.len()..).map(clean_cell)
        } else {
            None
        }
    })
}

fn extract_section(lines: &[&str], fields: &FieldMap, config: &ParserConfig) -> Option<TaskRecord> {
    let mut task: Option<String> = None;
    let mut application: Option<String> = None;
    let mut remaining: Vec<String> = Vec::new();

    for line in lines {
        if let Some(value) = labelled(line, &TASK_LABELS) {
            if task.is_none() {
                task = Some(value);
            }
        } else if let Some(value) = labelled(line, &APPLICATION_LABELS) {
            if application.is_none() {
                application = Some(value);
            }
        } else {
            let cleaned = clean_cell(line);
            if !cleaned.is_empty() {
                remaining.push(cleaned);
            }
        }
    }

    let heading_index = remaining
        .iter()
        .enumerate()
        .fold(None, |best: Option<(usize, usize)>, (i, line)| {
            let len = line.chars().count();
            match best {
                Some((_, best_len)) if best_len >= len => best,
                _ => Some((i, len)),
            }
        })
        .map(|(i, _)| i);

    let content = remaining
        .iter()
        .enumerate()
        .filter(|(i, line)| Some(*i) != heading_index && line.chars().count() > config.min_content_line_length)
        .map(|(_, line)| line.as_str())
        .collect::<Vec<_>>()
        .join(" ");

    let task = task.unwrap_or_default();
    let content_len = content.chars().count();
    let task_len = task.chars().count();
    if content_len <= config.min_section_content_length && task_len <= config.min_section_task_length {
        return None;
    }

    let mut record = TaskRecord::default();
    record.set(
        Column::SkillLevel,
        fields.non_empty("skill-level").unwrap_or(SENTINEL),
    );
    record.set(
        Column::MainSkill,
        fields.non_empty("main-skill").unwrap_or(SENTINEL),
    );
    if let Some(i) = heading_index {
        record.set(Column::Heading, remaining[i].as_str());
    }
    record.set(Column::Content, content);
    record.set(Column::Task, task);
    record.set(Column::Application, application.unwrap_or_default());
    Some(record)
}

/// Records recovered from labelled prose sections, in order of appearance.
pub fn extract_sections(text: &str, fields: &FieldMap, config: &ParserConfig) -> Vec<TaskRecord> {
    split_sections(text, config)
        .iter()
        .filter_map(|lines| extract_section(lines, fields, config))
        .collect()
}
