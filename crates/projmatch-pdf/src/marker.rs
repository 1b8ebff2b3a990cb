use once_cell::sync::Lazy;
use regex::Regex;

use projmatch_core::{ExtractionOutcome, ExtractionStats, ProjectRecord};

use crate::PdfError;
use crate::config::TableParsingConfig;
use crate::text_processing::normalize_ws;

static BLOCK_SPLIT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{2,}").unwrap());

/// Characters stripped from title candidate lines (list bullets, dashes).
const TITLE_TRIM: &[char] = &[' ', '-', '\u{2022}', '\t'];

fn first_nonempty_line(block: &str) -> Option<&str> {
    block
        .lines()
        .map(|l| l.trim_matches(TITLE_TRIM))
        .find(|l| !l.is_empty())
}

fn truncate_words(text: &str, max_words: usize) -> String {
    text.split_whitespace()
        .take(max_words)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Marker-driven extraction over flat text, for booklets without usable
/// tables.
///
/// Blocks are separated by two or more newlines. Within a block, every
/// occurrence of the description marker yields a record: the title is the
/// last non-empty line before the marker (falling back to the block's first
/// non-empty line) and the description is the whitespace-collapsed text
/// after the marker, capped at `max_description_words`. Duplicate titles
/// keep their first occurrence.
pub fn extract_records_from_text(
    text: &str,
    config: &TableParsingConfig,
) -> Result<ExtractionOutcome, PdfError> {
    let text = text.replace("\r\n", "\n").replace('\r', "\n");
    let marker = &config.description_marker;

    let mut records: Vec<ProjectRecord> = Vec::new();
    let mut seen_titles: Vec<String> = Vec::new();

    for block in BLOCK_SPLIT_RE.split(&text) {
        let block = block.trim();
        if block.is_empty() || !block.contains(marker.as_str()) {
            continue;
        }

        for (pos, _) in block.match_indices(marker.as_str()) {
            let pre = &block[..pos];
            let post = &block[pos + marker.len()..];

            let title = pre
                .lines()
                .map(|l| l.trim_matches(TITLE_TRIM))
                .filter(|l| !l.is_empty())
                .next_back()
                .or_else(|| first_nonempty_line(block))
                .unwrap_or("")
                .to_string();

            let description = truncate_words(&normalize_ws(post), config.max_description_words);

            if title.is_empty() || description.is_empty() {
                continue;
            }
            if seen_titles.iter().any(|t| t == &title) {
                continue;
            }
            seen_titles.push(title.clone());
            records.push(ProjectRecord {
                title,
                theme: String::new(),
                supervisors: String::new(),
                description,
            });
        }
    }

    if records.is_empty() {
        return Err(PdfError::NoRecords {
            marker: marker.clone(),
        });
    }

    let stats = ExtractionStats {
        pages: 0,
        rows_scanned: 0,
        records: records.len(),
        empty_fields: records.len() * 2,
        used_marker_fallback: true,
    };

    tracing::debug!(records = stats.records, "marker extraction pass complete");

    Ok(ExtractionOutcome { records, stats })
}
