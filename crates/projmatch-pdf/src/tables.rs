use projmatch_core::{ExtractionOutcome, ExtractionStats, ProjectRecord};

use crate::config::TableParsingConfig;
use crate::text_processing::normalize_ws;

/// One reconstructed table row: one normalized string per cell.
pub type TableRow = Vec<String>;

/// Which field a label cell introduces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Label {
    Title,
    Theme,
    Supervisors,
    Description,
    Stop,
}

/// In-flight record accumulator.
#[derive(Debug, Default)]
struct RecordDraft {
    title: String,
    theme: String,
    supervisors: String,
    description: String,
}

impl RecordDraft {
    fn is_empty(&self) -> bool {
        self.title.is_empty()
            && self.theme.is_empty()
            && self.supervisors.is_empty()
            && self.description.is_empty()
    }

    fn into_record(self) -> ProjectRecord {
        ProjectRecord {
            title: self.title,
            theme: self.theme,
            supervisors: self.supervisors,
            description: self.description,
        }
    }
}

fn is_label_cell(cell: &str, target: &str, max_words: usize) -> bool {
    if cell.is_empty() || cell.split_whitespace().count() > max_words {
        return false;
    }
    cell.to_lowercase().contains(target)
}

/// Classify a cell against every known label. Stop labels win over field
/// labels so a stop row is never mistaken for a value row.
fn classify_cell(cell: &str, config: &TableParsingConfig) -> Option<Label> {
    let max = config.max_label_cell_words;
    for stop in config.stop_labels() {
        if is_label_cell(cell, &stop, max) {
            return Some(Label::Stop);
        }
    }
    if is_label_cell(cell, &config.title_label, max) {
        return Some(Label::Title);
    }
    if is_label_cell(cell, &config.description_label, max) {
        return Some(Label::Description);
    }
    if is_label_cell(cell, &config.supervisors_label, max) {
        return Some(Label::Supervisors);
    }
    if is_label_cell(cell, &config.theme_label, max) {
        return Some(Label::Theme);
    }
    None
}

/// True when any cell of the row is a label of any kind.
fn row_has_label(cells: &[String], config: &TableParsingConfig) -> bool {
    cells.iter().any(|c| classify_cell(c, config).is_some())
}

/// True when any cell terminates description accumulation.
fn row_stops_description(cells: &[String], config: &TableParsingConfig) -> bool {
    cells.iter().any(|c| {
        matches!(
            classify_cell(c, config),
            Some(Label::Stop) | Some(Label::Title)
        )
    })
}

fn join_cells(cells: &[String], from: usize) -> String {
    cells
        .iter()
        .skip(from)
        .filter(|c| !c.is_empty())
        .cloned()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Collect following value rows until a label row, returning the joined text
/// and the index of the first row not consumed.
fn gather_following(
    rows: &[TableRow],
    start: usize,
    config: &TableParsingConfig,
    normalized: &dyn Fn(&TableRow) -> Vec<String>,
) -> (String, usize) {
    let mut parts: Vec<String> = Vec::new();
    let mut j = start;
    while j < rows.len() {
        let cells = normalized(&rows[j]);
        if row_has_label(&cells, config) {
            break;
        }
        let text = join_cells(&cells, 0);
        if !text.is_empty() {
            parts.push(text);
        }
        j += 1;
    }
    (parts.join(" "), j)
}

/// Collect description rows until a stop or title label, returning the
/// joined text and the index of the first row not consumed.
fn gather_description(
    rows: &[TableRow],
    start: usize,
    seed: Vec<String>,
    config: &TableParsingConfig,
    normalized: &dyn Fn(&TableRow) -> Vec<String>,
) -> (String, usize) {
    let mut parts = seed;
    let mut j = start;
    while j < rows.len() {
        let cells = normalized(&rows[j]);
        if row_stops_description(&cells, config) {
            break;
        }
        let text = join_cells(&cells, 0);
        if !text.is_empty() {
            parts.push(text);
        }
        j += 1;
    }
    (parts.join(" "), j)
}

/// The label-driven record extraction state machine.
///
/// Scans rows top to bottom. A title label closes the in-flight record and
/// opens a new one; theme/supervisors labels fill their fields from the
/// same-row remainder or from following value rows; a description label
/// accumulates every following row until a stop (or next title) label.
/// Labels are also recognized in the second cell, with values taken from the
/// third cell onward.
pub fn extract_records_from_rows(
    rows: &[TableRow],
    config: &TableParsingConfig,
) -> ExtractionOutcome {
    let normalized = |row: &TableRow| -> Vec<String> {
        row.iter().map(|c| normalize_ws(c)).collect()
    };

    let mut records: Vec<ProjectRecord> = Vec::new();
    let mut cur = RecordDraft::default();

    let mut i = 0;
    while i < rows.len() {
        let cells = normalized(&rows[i]);
        let first_idx = cells.iter().position(|c| !c.is_empty());
        let Some(first_idx) = first_idx else {
            i += 1;
            continue;
        };

        let (label, value_from) = match classify_cell(&cells[first_idx], config) {
            Some(label) => (Some(label), first_idx + 1),
            None => {
                // Some booklets put a row number in column 0 and the label
                // in column 1.
                let second = cells.get(first_idx + 1).map(String::as_str).unwrap_or("");
                (
                    classify_cell(second, config),
                    first_idx + 2,
                )
            }
        };

        match label {
            Some(Label::Title) => {
                if !cur.is_empty() {
                    records.push(std::mem::take(&mut cur).into_record());
                }
                let remainder = join_cells(&cells, value_from);
                if !remainder.is_empty() {
                    cur.title = remainder;
                } else {
                    let (value, next) = gather_following(rows, i + 1, config, &normalized);
                    cur.title = value;
                    i = next - 1;
                }
            }
            Some(Label::Theme) => {
                let remainder = join_cells(&cells, value_from);
                if !remainder.is_empty() {
                    cur.theme = remainder;
                } else {
                    let (value, next) = gather_following(rows, i + 1, config, &normalized);
                    cur.theme = value;
                    i = next - 1;
                }
            }
            Some(Label::Supervisors) => {
                let remainder = join_cells(&cells, value_from);
                if !remainder.is_empty() {
                    cur.supervisors = remainder;
                } else {
                    let (value, next) = gather_following(rows, i + 1, config, &normalized);
                    cur.supervisors = value;
                    i = next - 1;
                }
            }
            Some(Label::Description) => {
                let mut seed = Vec::new();
                let remainder = join_cells(&cells, value_from);
                if !remainder.is_empty() {
                    seed.push(remainder);
                }
                let (value, next) = gather_description(rows, i + 1, seed, config, &normalized);
                cur.description = value;
                i = next - 1;
            }
            Some(Label::Stop) | None => {}
        }

        i += 1;
    }

    if !cur.is_empty() {
        records.push(cur.into_record());
    }

    let empty_fields = records
        .iter()
        .map(|r| {
            [&r.title, &r.theme, &r.supervisors, &r.description]
                .into_iter()
                .filter(|f| f.is_empty())
                .count()
        })
        .sum();

    let stats = ExtractionStats {
        pages: 0,
        rows_scanned: rows.len(),
        records: records.len(),
        empty_fields,
        used_marker_fallback: false,
    };

    tracing::debug!(
        rows = stats.rows_scanned,
        records = stats.records,
        "table extraction pass complete"
    );

    ExtractionOutcome { records, stats }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> TableRow {
        cells.iter().map(|c| c.to_string()).collect()
    }

    fn extract(rows: &[TableRow]) -> ExtractionOutcome {
        extract_records_from_rows(rows, &TableParsingConfig::default())
    }

    // ── single record, value in same row ──

    #[test]
    fn test_single_record_same_row_values() {
        let rows = vec![
            row(&["Project No & Title", "A1 Gut immunity atlas"]),
            row(&["Primary Theme", "Immunology"]),
            row(&["Supervisors", "Dr A, Prof B"]),
            row(&["Project Description", "Mapping immune cell states."]),
            row(&["Reasonable Expected Outcome", "A dataset."]),
        ];
        let outcome = extract(&rows);
        assert_eq!(outcome.records.len(), 1);
        let r = &outcome.records[0];
        assert_eq!(r.title, "A1 Gut immunity atlas");
        assert_eq!(r.theme, "Immunology");
        assert_eq!(r.supervisors, "Dr A, Prof B");
        assert_eq!(r.description, "Mapping immune cell states.");
        assert_eq!(outcome.stats.records, 1);
        assert_eq!(outcome.stats.rows_scanned, 5);
    }

    // ── multi-row accumulation ──

    #[test]
    fn test_title_spread_over_following_rows() {
        let rows = vec![
            row(&["Project No & Title", ""]),
            row(&["A2 Structural mechanisms of"]),
            row(&["T cell receptor recognition"]),
            row(&["Supervisors", "Dr C"]),
        ];
        let outcome = extract(&rows);
        assert_eq!(
            outcome.records[0].title,
            "A2 Structural mechanisms of T cell receptor recognition"
        );
        assert_eq!(outcome.records[0].supervisors, "Dr C");
    }

    #[test]
    fn test_description_accumulates_until_stop_label() {
        let rows = vec![
            row(&["Project No & Title", "A3 Viral dynamics"]),
            row(&["Project Description", "First paragraph."]),
            row(&["Second paragraph continues the idea."]),
            row(&["Third paragraph."]),
            row(&["Reasonable Expected Outcome", "A model."]),
            row(&["This trailing row is ignored."]),
        ];
        let outcome = extract(&rows);
        assert_eq!(
            outcome.records[0].description,
            "First paragraph. Second paragraph continues the idea. Third paragraph."
        );
    }

    #[test]
    fn test_description_stops_at_split_stop_label() {
        // Renderer split "Reasonable Expected Outcome"; the "reasonab"
        // stop label still catches it.
        let rows = vec![
            row(&["Project Description", "Only paragraph."]),
            row(&["Reasonab", "le Expected Outcome"]),
            row(&["Leaked outcome text."]),
        ];
        let outcome = extract(&rows);
        assert_eq!(outcome.records[0].description, "Only paragraph.");
    }

    // ── record boundaries ──

    #[test]
    fn test_two_records_split_on_title_label() {
        let rows = vec![
            row(&["Project No & Title", "A4 First project"]),
            row(&["Supervisors", "Dr D"]),
            row(&["Project Description", "First description."]),
            row(&["Project No & Title", "A5 Second project"]),
            row(&["Supervisors", "Dr E"]),
            row(&["Project Description", "Second description."]),
        ];
        let outcome = extract(&rows);
        assert_eq!(outcome.records.len(), 2);
        assert_eq!(outcome.records[0].title, "A4 First project");
        assert_eq!(outcome.records[1].supervisors, "Dr E");
    }

    #[test]
    fn test_description_ends_at_next_title_without_stop_label() {
        let rows = vec![
            row(&["Project No & Title", "A6 One"]),
            row(&["Project Description", "Description one."]),
            row(&["Project No & Title", "A7 Two"]),
            row(&["Project Description", "Description two."]),
        ];
        let outcome = extract(&rows);
        assert_eq!(outcome.records.len(), 2);
        assert_eq!(outcome.records[0].description, "Description one.");
        assert_eq!(outcome.records[1].description, "Description two.");
    }

    #[test]
    fn test_partial_record_closed_by_next_title() {
        let rows = vec![
            row(&["Project No & Title", "A8 Partial"]),
            row(&["Project No & Title", "A9 Complete"]),
            row(&["Supervisors", "Dr F"]),
        ];
        let outcome = extract(&rows);
        assert_eq!(outcome.records.len(), 2);
        assert_eq!(outcome.records[0].title, "A8 Partial");
        assert!(outcome.records[0].supervisors.is_empty());
    }

    // ── second-column labels ──

    #[test]
    fn test_labels_in_second_column() {
        let rows = vec![
            row(&["1", "Project No & Title", "B1 Numbered booklet entry"]),
            row(&["", "Supervisors", "Dr G"]),
            row(&["", "Project Description", "Described here."]),
        ];
        let outcome = extract(&rows);
        assert_eq!(outcome.records.len(), 1);
        assert_eq!(outcome.records[0].title, "B1 Numbered booklet entry");
        assert_eq!(outcome.records[0].supervisors, "Dr G");
        assert_eq!(outcome.records[0].description, "Described here.");
    }

    // ── edge cases ──

    #[test]
    fn test_empty_rows_do_not_break_accumulation() {
        let rows = vec![
            row(&["Project No & Title", "B2 Entry"]),
            row(&["", ""]),
            row(&["Supervisors", "Dr H"]),
        ];
        let outcome = extract(&rows);
        assert_eq!(outcome.records.len(), 1);
        assert_eq!(outcome.records[0].supervisors, "Dr H");
    }

    #[test]
    fn test_no_labels_yields_nothing() {
        let rows = vec![row(&["Introduction"]), row(&["Welcome to the booklet."])];
        let outcome = extract(&rows);
        assert!(outcome.records.is_empty());
        assert_eq!(outcome.stats.rows_scanned, 2);
    }

    #[test]
    fn test_long_cell_is_not_a_label() {
        // Body text that merely mentions supervisors must not open a field
        let rows = vec![
            row(&["Project No & Title", "B3 Entry"]),
            row(&[
                "Project Description",
                "Students meet their supervisors weekly to discuss progress and the direction of the work.",
            ]),
            row(&["Reasonable Expected Outcome", "x"]),
        ];
        let outcome = extract(&rows);
        assert_eq!(outcome.records.len(), 1);
        assert!(outcome.records[0].supervisors.is_empty());
        assert!(outcome.records[0].description.starts_with("Students meet"));
    }

    #[test]
    fn test_theme_matches_primary_theme_label() {
        let rows = vec![
            row(&["Project No & Title", "B4 Entry"]),
            row(&["Theme", "Genomics"]),
        ];
        let outcome = extract(&rows);
        assert_eq!(outcome.records[0].theme, "Genomics");
    }

    #[test]
    fn test_trailing_record_is_flushed() {
        let rows = vec![
            row(&["Project No & Title", "B5 Last entry"]),
            row(&["Supervisors", "Dr I"]),
        ];
        let outcome = extract(&rows);
        assert_eq!(outcome.records.len(), 1);
        assert_eq!(outcome.records[0].title, "B5 Last entry");
    }

    #[test]
    fn test_empty_field_count_in_stats() {
        let rows = vec![row(&["Project No & Title", "B6 Bare title"])];
        let outcome = extract(&rows);
        // theme, supervisors, description all empty
        assert_eq!(outcome.stats.empty_fields, 3);
    }

    #[test]
    fn test_whitespace_in_cells_is_normalized() {
        let rows = vec![row(&["Project  No &   Title", "  B7   spaced   title  "])];
        let outcome = extract(&rows);
        assert_eq!(outcome.records[0].title, "B7 spaced title");
    }
}
