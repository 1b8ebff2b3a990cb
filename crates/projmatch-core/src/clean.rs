use crate::ProjectRecord;

/// Placeholder written into supervisor fields the extractor mangled.
pub const PARSE_FAILED: &str = "parse failed";

/// A supervisors field longer than this many words is treated as a parse
/// failure (description text bled into the cell).
pub const MAX_SUPERVISOR_WORDS: usize = 15;

/// How many blank-ish fields a record may carry before it is dropped.
const MAX_BLANK_FIELDS: usize = 2;

/// What the cleanup pass did to a batch of records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanReport {
    pub dropped_rows: usize,
    pub filled_descriptions: usize,
    pub failed_supervisors: usize,
}

/// A field counts as blank when it is empty or the literal "empty" left
/// behind by a failed table cell.
fn is_blank(field: &str) -> bool {
    let trimmed = field.trim();
    trimmed.is_empty() || trimmed.eq_ignore_ascii_case("empty")
}

/// Repair extraction artifacts in-place before tokenization.
///
/// Three rules, applied in order:
/// 1. drop records where more than two fields are blank;
/// 2. a blank description is replaced by the record's title so the project
///    stays searchable;
/// 3. a blank or overlong supervisors field becomes [`PARSE_FAILED`].
pub fn clean_records(records: &mut Vec<ProjectRecord>) -> CleanReport {
    let before = records.len();
    records.retain(|r| {
        let blanks = [&r.title, &r.theme, &r.supervisors, &r.description]
            .into_iter()
            .filter(|f| is_blank(f))
            .count();
        blanks <= MAX_BLANK_FIELDS
    });
    let dropped_rows = before - records.len();

    let mut filled_descriptions = 0;
    let mut failed_supervisors = 0;
    for record in records.iter_mut() {
        if is_blank(&record.description) {
            record.description = record.title.clone();
            filled_descriptions += 1;
        }
        if is_blank(&record.supervisors)
            || record.supervisors.split_whitespace().count() > MAX_SUPERVISOR_WORDS
        {
            record.supervisors = PARSE_FAILED.to_string();
            failed_supervisors += 1;
        }
    }

    if dropped_rows > 0 {
        tracing::debug!(dropped_rows, "dropped mostly-blank records");
    }

    CleanReport {
        dropped_rows,
        filled_descriptions,
        failed_supervisors,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(title: &str, theme: &str, supervisors: &str, description: &str) -> ProjectRecord {
        ProjectRecord {
            title: title.to_string(),
            theme: theme.to_string(),
            supervisors: supervisors.to_string(),
            description: description.to_string(),
        }
    }

    #[test]
    fn drops_mostly_blank_records() {
        let mut records = vec![
            record("A1 Good project", "Theme", "Dr X", "A real description"),
            record("A2 Husk", "empty", "", "EMPTY"),
        ];
        let report = clean_records(&mut records);
        assert_eq!(records.len(), 1);
        assert_eq!(report.dropped_rows, 1);
    }

    #[test]
    fn fills_blank_description_with_title() {
        let mut records = vec![record("A3 Short entry", "Theme", "Dr X", "")];
        let report = clean_records(&mut records);
        assert_eq!(records[0].description, "A3 Short entry");
        assert_eq!(report.filled_descriptions, 1);
    }

    #[test]
    fn marks_overlong_supervisors_as_failed() {
        let long = "word ".repeat(16);
        let mut records = vec![record("A4 Entry", "Theme", &long, "Description text")];
        let report = clean_records(&mut records);
        assert_eq!(records[0].supervisors, PARSE_FAILED);
        assert_eq!(report.failed_supervisors, 1);
    }

    #[test]
    fn marks_blank_supervisors_as_failed() {
        let mut records = vec![record("A5 Entry", "Theme", "empty", "Description text")];
        clean_records(&mut records);
        assert_eq!(records[0].supervisors, PARSE_FAILED);
    }

    #[test]
    fn clean_record_untouched() {
        let mut records = vec![record("A6 Entry", "Theme", "Dr X, Dr Y", "Description")];
        let report = clean_records(&mut records);
        assert_eq!(report, CleanReport::default());
        assert_eq!(records[0].supervisors, "Dr X, Dr Y");
    }

    #[test]
    fn exactly_fifteen_supervisor_words_kept() {
        let fifteen = vec!["name"; MAX_SUPERVISOR_WORDS].join(" ");
        let mut records = vec![record("A7 Entry", "Theme", &fifteen, "Description")];
        let report = clean_records(&mut records);
        assert_eq!(report.failed_supervisors, 0);
    }
}
