use serde::{Deserialize, Serialize};

pub mod backend;
pub mod clean;
pub mod config_file;
pub mod paths;
pub mod store;

// Re-export for convenience
pub use backend::{BackendError, PageContent, PdfBackend, TextBlock};
pub use clean::{CleanReport, clean_records};
pub use paths::DataDirs;
pub use store::{StoreError, read_records, read_tokenized, write_records, write_tokenized};

/// A single project entry extracted from a booklet.
///
/// Field order is the CSV column order: `title,theme,supervisors,description`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectRecord {
    pub title: String,
    pub theme: String,
    pub supervisors: String,
    pub description: String,
}

impl ProjectRecord {
    /// True when no field carries any text.
    pub fn is_empty(&self) -> bool {
        self.title.is_empty()
            && self.theme.is_empty()
            && self.supervisors.is_empty()
            && self.description.is_empty()
    }
}

/// A [`ProjectRecord`] with its normalized description tokens attached.
///
/// `tokens` is the space-joined output of the preprocessing pipeline, stored
/// alongside the original fields so the recommender never re-tokenizes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TokenizedRecord {
    pub title: String,
    pub theme: String,
    pub supervisors: String,
    pub description: String,
    pub tokens: String,
}

impl TokenizedRecord {
    pub fn from_record(record: ProjectRecord, tokens: String) -> Self {
        Self {
            title: record.title,
            theme: record.theme,
            supervisors: record.supervisors,
            description: record.description,
            tokens,
        }
    }
}

/// Counters describing one extraction run over a booklet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractionStats {
    pub pages: usize,
    pub rows_scanned: usize,
    pub records: usize,
    /// Fields left empty across all emitted records.
    pub empty_fields: usize,
    /// True when the marker fallback produced the records instead of the
    /// table state machine.
    pub used_marker_fallback: bool,
}

/// Records plus the stats of the run that produced them.
#[derive(Debug, Clone, Default)]
pub struct ExtractionOutcome {
    pub records: Vec<ProjectRecord>,
    pub stats: ExtractionStats,
}
