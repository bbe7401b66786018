//! Reference number recovery from document file names.

use std::path::Path;

use super::FieldExtractor;
use super::patterns::REFERENCE_NUMBER;

/// Extracts the 9-digit reference number from a file name.
///
/// No checksum is applied; the first run of nine digits wins.
pub struct ReferenceExtractor;

impl ReferenceExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ReferenceExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for ReferenceExtractor {
    type Output = String;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        REFERENCE_NUMBER.find(text).map(|m| m.as_str().to_string())
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        REFERENCE_NUMBER
            .find_iter(text)
            .map(|m| m.as_str().to_string())
            .collect()
    }
}

/// Extract the reference number from the file name component of `path`.
pub fn extract_reference(path: &Path) -> Option<String> {
    let file_name = path.file_name()?.to_string_lossy();
    ReferenceExtractor::new().extract(&file_name)
}
