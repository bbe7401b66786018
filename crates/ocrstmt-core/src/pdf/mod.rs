//! PDF processing module.

mod extractor;

pub use extractor::{PdfExtractor, PdfTextDecoder};

use std::path::Path;

use crate::error::PdfError;

/// Result type for PDF operations.
pub type Result<T> = std::result::Result<T, PdfError>;

/// Trait for PDF processing implementations.
pub trait PdfProcessor {
    /// Load a PDF from bytes.
    fn load(&mut self, data: &[u8]) -> Result<()>;

    /// Get the number of pages in the PDF.
    fn page_count(&self) -> u32;

    /// Extract text from the entire PDF.
    fn extract_text(&self) -> Result<String>;
}

/// Turns a document on disk into raw text.
///
/// The batch driver only sees this seam, so alternative decoders (or test
/// doubles) can stand in for the PDF stack.
pub trait TextDecoder {
    /// Decode the document at `path` into its text.
    fn decode(&self, path: &Path) -> Result<String>;
}
