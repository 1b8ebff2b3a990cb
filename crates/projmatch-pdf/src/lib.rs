use std::path::Path;

use thiserror::Error;

pub mod config;
pub mod marker;
pub mod rows;
pub mod tables;
pub mod text_processing;

pub use config::{ListOverride, TableParsingConfig, TableParsingConfigBuilder};
pub use tables::TableRow;
// Re-export domain types from core (canonical definitions live there)
pub use projmatch_core::{ExtractionOutcome, ExtractionStats, ProjectRecord};

use projmatch_core::{BackendError, PageContent, PdfBackend};

#[derive(Error, Debug)]
pub enum PdfError {
    #[error("failed to open PDF: {0}")]
    OpenError(String),
    #[error("failed to extract text: {0}")]
    ExtractionError(String),
    #[error("no project records found: marker {marker:?} never matched")]
    NoRecords { marker: String },
    #[error("invalid configuration: {0}")]
    Config(#[from] config::ConfigError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<BackendError> for PdfError {
    fn from(err: BackendError) -> Self {
        match err {
            BackendError::OpenError(msg) => PdfError::OpenError(msg),
            BackendError::ExtractionError(msg) => PdfError::ExtractionError(msg),
        }
    }
}

/// A configurable booklet extraction pipeline.
///
/// Holds a [`TableParsingConfig`] and exposes each pipeline step as a method.
/// The default constructor uses built-in defaults; use
/// [`BookletExtractor::with_config`] to supply custom labels and thresholds.
pub struct BookletExtractor {
    config: TableParsingConfig,
}

impl Default for BookletExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl BookletExtractor {
    /// Create an extractor with default configuration.
    pub fn new() -> Self {
        Self {
            config: TableParsingConfig::default(),
        }
    }

    /// Create an extractor with a custom configuration.
    pub fn with_config(config: TableParsingConfig) -> Self {
        Self { config }
    }

    /// Get a reference to the current config.
    pub fn config(&self) -> &TableParsingConfig {
        &self.config
    }

    /// Reconstruct table rows from a page's positioned blocks (step 1).
    pub fn reconstruct_rows(&self, page: &PageContent) -> Vec<TableRow> {
        rows::reconstruct_rows(page, &self.config)
    }

    /// Run the label state machine over reconstructed rows (step 2).
    pub fn extract_from_rows(&self, table_rows: &[TableRow]) -> ExtractionOutcome {
        tables::extract_records_from_rows(table_rows, &self.config)
    }

    /// Marker-based extraction over flat page text (fallback path).
    pub fn extract_from_text(&self, text: &str) -> Result<ExtractionOutcome, PdfError> {
        marker::extract_records_from_text(text, &self.config)
    }

    /// Run the full extraction pipeline on a PDF file.
    ///
    /// Pages are extracted via `backend`, rows reconstructed per page, and
    /// the state machine runs over the concatenated row stream. When the
    /// table path yields nothing, the marker fallback runs over the plain
    /// page text; a booklet with neither yields an empty outcome (callers
    /// still get stats and may write a header-only CSV).
    pub fn extract_from_pdf(
        &self,
        path: &Path,
        backend: &dyn PdfBackend,
    ) -> Result<ExtractionOutcome, PdfError> {
        let pages = backend.extract_pages(path)?;

        let mut table_rows = Vec::new();
        for page in &pages {
            table_rows.extend(self.reconstruct_rows(page));
        }

        let mut outcome = self.extract_from_rows(&table_rows);
        outcome.stats.pages = pages.len();

        if outcome.records.is_empty() {
            tracing::debug!(path = %path.display(), "table path found nothing, trying marker fallback");
            let text: String = pages
                .iter()
                .map(|p| p.plain_text())
                .collect::<Vec<_>>()
                .join("\n");
            match self.extract_from_text(&text) {
                Ok(mut fallback) => {
                    fallback.stats.pages = pages.len();
                    fallback.stats.rows_scanned = outcome.stats.rows_scanned;
                    return Ok(fallback);
                }
                Err(PdfError::NoRecords { .. }) => {}
                Err(e) => return Err(e),
            }
        }

        Ok(outcome)
    }
}

/// Extract project records from a PDF booklet with the default configuration.
pub fn extract_from_pdf(
    path: &Path,
    backend: &dyn PdfBackend,
) -> Result<ExtractionOutcome, PdfError> {
    BookletExtractor::new().extract_from_pdf(path, backend)
}
