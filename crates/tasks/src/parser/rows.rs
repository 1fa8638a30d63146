//! Line classification, cell splitting and cell cleanup for table rows.

use super::ParserConfig;

const DELIMITER: char = '|';
const HEADER_TOKEN: &str = "Skill Level";

/// Whether `line` looks like one encoded task row.
pub fn is_candidate_row(line: &str, config: &ParserConfig) -> bool {
    if !line.contains(DELIMITER) {
        return false;
    }

    // Header row and markdown/ascii table rules
    if line.contains(HEADER_TOKEN) || line.contains("---") || line.contains("===") {
        return false;
    }

    if line.chars().count() < config.min_line_length {
        return false;
    }

    line.matches(DELIMITER).count() >= config.min_delimiters
}

/// Split a row into trimmed cells, dropping trailing empties and a leading
/// table border.
pub fn split_cells(line: &str) -> Vec<String> {
    let trimmed = line.trim();
    let mut cells: Vec<String> = trimmed
        .split(DELIMITER)
        .map(|cell| cell.trim().to_string())
        .collect();

    while cells.last().is_some_and(|c| c.is_empty()) {
        cells.pop();
    }

    if trimmed.starts_with(DELIMITER) && cells.first().is_some_and(|c| c.is_empty()) {
        cells.remove(0);
    }

    cells
}

/// Strip markdown residue from a cell: emphasis stars, dash runs and a
/// leading heading marker.
pub fn clean_cell(text: &str) -> String {
    let cleaned = text.trim().trim_matches('*').trim_matches('-');
    let cleaned = if cleaned.starts_with('#') {
        cleaned.trim_start_matches('#').trim_start()
    } else {
        cleaned
    };
    cleaned.trim().to_string()
}
