//! Tolerant parsing of model output into task records.
//!
//! The model's output format is not guaranteed, so parsing never fails. It
//! degrades through three strategies and keeps the first that yields records:
//!
//! 1. Pipe-delimited table rows, mapped with the widest matching [`Schema`]
//! 2. Free-text sections with `Task:` / `Application:` labels
//! 3. A single fallback record built from the requested profile

pub mod fallback;
pub mod rows;
pub mod schema;
pub mod sections;

use crate::record::{ParseSource, ResultSet, TaskRecord, SENTINEL};
use platskill_prompt::FieldMap;

pub use fallback::{fallback_record, FALLBACK_HEADING};
pub use schema::{select_schema, Schema, DEFAULT_SCHEMAS};

/// Thresholds and schemas used by [`parse_with_config`].
#[derive(Debug, Clone)]
pub struct ParserConfig {
    /// Minimum characters in a candidate row
    pub min_line_length: usize,
    /// Minimum `|` occurrences in a candidate row
    pub min_delimiters: usize,
    /// A kept record's heading must be longer than this
    pub min_heading_length: usize,
    /// A kept record's task must be longer than this
    pub min_task_length: usize,
    /// A prose section must be longer than this to be considered
    pub min_section_length: usize,
    /// Prose lines longer than this are joined into content
    pub min_content_line_length: usize,
    /// A section is kept if its content is longer than this...
    pub min_section_content_length: usize,
    /// ...or its task is longer than this
    pub min_section_task_length: usize,
    /// Row schemas; the widest one a row satisfies wins
    pub schemas: Vec<Schema>,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            min_line_length: 20,
            min_delimiters: 5,
            min_heading_length: 3,
            min_task_length: 10,
            min_section_length: 50,
            min_content_line_length: 50,
            min_section_content_length: 50,
            min_section_task_length: 20,
            schemas: DEFAULT_SCHEMAS.to_vec(),
        }
    }
}

impl ParserConfig {
    /// Whether a row-derived record has a usable heading and task.
    pub fn accepts(&self, record: &TaskRecord) -> bool {
        record.heading != SENTINEL
            && record.heading.chars().count() > self.min_heading_length
            && record.task != SENTINEL
            && record.task.chars().count() > self.min_task_length
    }
}

/// Parse with the default thresholds.
pub fn parse(text: &str, fields: &FieldMap) -> ResultSet {
    parse_with_config(text, fields, &ParserConfig::default())
}

pub fn parse_with_config(text: &str, fields: &FieldMap, config: &ParserConfig) -> ResultSet {
    let rows = table_rows(text, config);
    if !rows.is_empty() {
        tracing::debug!("Parsed {} task rows from table output", rows.len());
        return result(fields, rows, ParseSource::Table);
    }

    let sections = sections::extract_sections(text, fields, config);
    if !sections.is_empty() {
        tracing::info!(
            "No table rows found, recovered {} tasks from free text",
            sections.len()
        );
        return result(fields, sections, ParseSource::Sections);
    }

    tracing::warn!("Response contained no recognisable tasks, using fallback record");
    result(fields, vec![fallback_record(fields)], ParseSource::Fallback)
}

fn table_rows(text: &str, config: &ParserConfig) -> Vec<TaskRecord> {
    let mut records = Vec::new();

    for line in text.lines().filter(|l| !l.trim().is_empty()) {
        if !rows::is_candidate_row(line, config) {
            continue;
        }

        let cells: Vec<String> = rows::split_cells(line)
            .iter()
            .map(|cell| rows::clean_cell(cell))
            .collect();

        let Some(schema) = select_schema(&config.schemas, cells.len()) else {
            tracing::debug!("Skipping row with {} cells", cells.len());
            continue;
        };

        let record = schema.map(&cells);
        if config.accepts(&record) {
            records.push(record);
        } else {
            tracing::debug!("Row failed quality gate: {:?}", record.heading);
        }
    }

    records
}

fn result(fields: &FieldMap, tasks: Vec<TaskRecord>, source: ParseSource) -> ResultSet {
    ResultSet {
        fields: fields.clone(),
        tasks,
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legacy_six_column_row() {
        let text = "Medium | Analyzing | My Heading Text | Some content here | Do this task now | Apply it daily";
        let result = parse(text, &FieldMap::sample());

        assert_eq!(result.source, ParseSource::Table);
        assert_eq!(result.len(), 1);
        let task = &result.tasks[0];
        assert_eq!(task.skill_level, "Medium");
        assert_eq!(task.bloom_level, "Analyzing");
        assert_eq!(task.main_skill, SENTINEL);
        assert_eq!(task.subskill, SENTINEL);
        assert_eq!(task.heading, "My Heading Text");
        assert_eq!(task.content, "Some content here");
        assert_eq!(task.task, "Do this task now");
        assert_eq!(task.application, "Apply it daily");
    }

    #[test]
    fn test_markdown_table_with_eight_columns() {
        let text = "\
Here are your tasks:

| Skill Level | Bloom Level | Main Skill | Subskill | Heading | Content | Task | Application |
|---|---|---|---|---|---|---|---|
| Medium | **Applying** | Communication | Listening | ## Team Retro | Hold a short retrospective | Lead a ten minute team retrospective | Sprint reviews |
| High | Creating | Communication | Writing | Blog Draft | Draft a technical post | Write a 500 word post on a recent bug | Engineering blog |
";
        let result = parse(text, &FieldMap::sample());

        assert_eq!(result.source, ParseSource::Table);
        assert_eq!(result.len(), 2);
        assert_eq!(result.tasks[0].bloom_level, "Applying");
        assert_eq!(result.tasks[0].heading, "Team Retro");
        assert_eq!(result.tasks[0].subskill, "Listening");
        assert_eq!(result.tasks[1].heading, "Blog Draft");
        assert_eq!(result.tasks[1].application, "Engineering blog");
    }

    #[test]
    fn test_plain_eight_column_row_maps_every_attribute() {
        let text = "  High |  Evaluating | Leadership | Delegation  | Delegate a Sprint | Split the backlog by strength | Assign three sprint tickets to teammates | Team projects  ";
        let result = parse(text, &FieldMap::sample());

        assert_eq!(result.source, ParseSource::Table);
        assert_eq!(result.len(), 1);
        let task = &result.tasks[0];
        assert_eq!(task.skill_level, "High");
        assert_eq!(task.bloom_level, "Evaluating");
        assert_eq!(task.main_skill, "Leadership");
        assert_eq!(task.subskill, "Delegation");
        assert_eq!(task.heading, "Delegate a Sprint");
        assert_eq!(task.content, "Split the backlog by strength");
        assert_eq!(task.task, "Assign three sprint tickets to teammates");
        assert_eq!(task.application, "Team projects");
    }

    #[test]
    fn test_seven_column_row_uses_six_column_mapping() {
        let text = "Medium | Applying | Seven Cell Row | Some content | Practise with a seven cell row | Daily work | Extra cell";
        let result = parse(text, &FieldMap::sample());

        assert_eq!(result.len(), 1);
        let task = &result.tasks[0];
        assert_eq!(task.skill_level, "Medium");
        assert_eq!(task.bloom_level, "Applying");
        assert_eq!(task.main_skill, SENTINEL);
        assert_eq!(task.subskill, SENTINEL);
        assert_eq!(task.heading, "Seven Cell Row");
        assert_eq!(task.task, "Practise with a seven cell row");
        assert_eq!(task.application, "Daily work");
    }

    #[test]
    fn test_wide_row_maps_first_eight_cells() {
        let text = "Low | Remembering | Writing | Grammar | Comma Rules | Review comma usage | Fix the commas in a sample paragraph | Essays | 30 min | extra";
        let result = parse(text, &FieldMap::sample());

        assert_eq!(result.len(), 1);
        let task = &result.tasks[0];
        assert_eq!(task.main_skill, "Writing");
        assert_eq!(task.subskill, "Grammar");
        assert_eq!(task.heading, "Comma Rules");
        assert_eq!(task.task, "Fix the commas in a sample paragraph");
        assert_eq!(task.application, "Essays");
    }

    #[test]
    fn test_short_heading_is_dropped() {
        let text = "\
Low | Remembering | Hi | Some content here | Recall the five stages | Daily standups
Low | Remembering | Stages | Some content here | Recall the five stages | Daily standups";
        let result = parse(text, &FieldMap::sample());

        assert_eq!(result.len(), 1);
        assert_eq!(result.tasks[0].heading, "Stages");
    }

    #[test]
    fn test_short_task_is_dropped() {
        let text = "Low | Remembering | Good heading | Some content | Too short | Daily standups";
        let result = parse(text, &FieldMap::sample());
        assert_eq!(result.source, ParseSource::Fallback);
    }

    #[test]
    fn test_rows_keep_source_order() {
        let text = "\
A | B | First heading | c | First task text here | x
A | B | Second heading | c | Second task text here | x
A | B | Third heading | c | Third task text here | x";
        let headings: Vec<_> = parse(text, &FieldMap::sample())
            .tasks
            .into_iter()
            .map(|t| t.heading)
            .collect();
        assert_eq!(headings, ["First heading", "Second heading", "Third heading"]);
    }

    #[test]
    fn test_empty_cell_becomes_sentinel() {
        let text = "Medium | | Heading here | Content | Perform the activity | ***";
        let result = parse(text, &FieldMap::sample());
        assert_eq!(result.len(), 1);
        assert_eq!(result.tasks[0].bloom_level, SENTINEL);
        assert_eq!(result.tasks[0].application, SENTINEL);
    }

    #[test]
    fn test_prose_falls_through_to_sections() {
        let text = "\
Mock Interview Practice
Pair up and run a mock interview covering behavioural questions about past projects.
Task: Conduct two mock interviews, switching roles between interviewer and candidate.
Application: Prepare for campus placement interviews.";
        let result = parse(text, &FieldMap::sample());

        assert_eq!(result.source, ParseSource::Sections);
        assert_eq!(result.len(), 1);
        assert_eq!(
            result.tasks[0].task,
            "Conduct two mock interviews, switching roles between interviewer and candidate."
        );
        assert_eq!(result.tasks[0].skill_level, "medium");
    }

    #[test]
    fn test_nothing_usable_yields_one_fallback() {
        let fields = FieldMap::sample();
        let result = parse("Sorry, I cannot help with that.", &fields);

        assert_eq!(result.source, ParseSource::Fallback);
        assert_eq!(result.len(), 1);
        assert_eq!(result.tasks[0].heading, FALLBACK_HEADING);
        assert_eq!(result.fields, fields);
    }

    #[test]
    fn test_empty_input_yields_one_fallback() {
        let result = parse("", &FieldMap::new());
        assert_eq!(result.len(), 1);
        assert_eq!(result.source, ParseSource::Fallback);
    }

    #[test]
    fn test_custom_thresholds() {
        let config = ParserConfig {
            min_task_length: 30,
            ..ParserConfig::default()
        };
        let text = "Medium | Analyzing | My Heading Text | Some content here | Do this task now | Apply it daily";
        let result = parse_with_config(text, &FieldMap::sample(), &config);
        assert_eq!(result.source, ParseSource::Fallback);
    }
}
