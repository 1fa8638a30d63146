//! The single record returned when nothing in a response could be extracted.

use crate::record::{Column, TaskRecord, SENTINEL};
use platskill_prompt::FieldMap;

pub const FALLBACK_HEADING: &str = "Generated Task";

/// Build the fallback record from the profile that was requested.
pub fn fallback_record(fields: &FieldMap) -> TaskRecord {
    let level = fields.non_empty("education-level").unwrap_or(SENTINEL);
    let year = fields.non_empty("education-year").unwrap_or(SENTINEL);

    let mut record = TaskRecord::default();
    record.set(
        Column::SkillLevel,
        fields.non_empty("skill-level").unwrap_or(SENTINEL),
    );
    record.set(
        Column::MainSkill,
        fields.non_empty("main-skill").unwrap_or(SENTINEL),
    );
    record.set(Column::Heading, FALLBACK_HEADING);
    record.set(
        Column::Content,
        format!(
            "The model response could not be read as a task table. This placeholder \
             task was created for {level} students in {year}."
        ),
    );
    record.set(
        Column::Task,
        "Review the prompt template, then run \"platskill prompt test\" and generate again.",
    );
    record.set(
        Column::Application,
        "Use the regenerated tasks once the response contains a pipe-delimited table.",
    );
    record
}
