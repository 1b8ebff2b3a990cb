use std::path::Path;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("failed to open PDF: {0}")]
    OpenError(String),
    #[error("failed to extract text: {0}")]
    ExtractionError(String),
}

/// A positioned run of text on a page, in page coordinates (y grows downward).
///
/// In bordered booklet tables each cell usually comes out as one block, so
/// geometry-based row reconstruction can work at block granularity.
#[derive(Debug, Clone, PartialEq)]
pub struct TextBlock {
    pub text: String,
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
}

impl TextBlock {
    pub fn new(text: impl Into<String>, x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self {
            text: text.into(),
            x0,
            y0,
            x1,
            y1,
        }
    }

    /// Vertical midpoint, used for row clustering.
    pub fn y_center(&self) -> f32 {
        (self.y0 + self.y1) / 2.0
    }
}

/// The text content of one page as returned by a backend.
#[derive(Debug, Clone, Default)]
pub struct PageContent {
    pub blocks: Vec<TextBlock>,
}

impl PageContent {
    /// Plain text of the page, blocks in the order the backend emitted them.
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        for block in &self.blocks {
            out.push_str(&block.text);
            out.push('\n');
        }
        out
    }
}

/// Trait for PDF page extraction backends.
///
/// Implementors provide the low-level positioned-text step; row
/// reconstruction and the label state machine live in `projmatch-pdf`.
pub trait PdfBackend: Send + Sync {
    /// Extract every page of a PDF as positioned text blocks.
    fn extract_pages(&self, path: &Path) -> Result<Vec<PageContent>, BackendError>;
}
