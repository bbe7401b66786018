//! Input resolution and document discovery.

use std::path::{Path, PathBuf};

use glob::{glob_with, MatchOptions, Pattern};
use tracing::{debug, warn};

use crate::error::BatchError;

/// Check whether a path names a PDF (case-insensitive `.pdf` suffix).
pub fn is_pdf(path: &Path) -> bool {
    path.file_name()
        .map(|name| name.to_string_lossy().to_lowercase().ends_with(".pdf"))
        .unwrap_or(false)
}

/// Resolve the batch input into the documents to process.
///
/// A single file must be a PDF; a directory is walked recursively. A missing
/// input, or a file that is not a PDF, stops the batch.
pub fn resolve_input(input: &Path) -> Result<Vec<PathBuf>, BatchError> {
    if !input.exists() {
        return Err(BatchError::InputNotFound(input.to_path_buf()));
    }

    if input.is_dir() {
        return discover_documents(input);
    }

    if input.is_file() && is_pdf(input) {
        debug!("Single PDF input: {}", input.display());
        return Ok(vec![input.to_path_buf()]);
    }

    Err(BatchError::UnsupportedInput(input.to_path_buf()))
}

/// Recursively find every PDF below `dir`, sorted by path.
pub fn discover_documents(dir: &Path) -> Result<Vec<PathBuf>, BatchError> {
    let pattern = Path::new(&Pattern::escape(&dir.to_string_lossy()))
        .join("**")
        .join("*.pdf");
    let options = MatchOptions {
        case_sensitive: false,
        require_literal_separator: false,
        require_literal_leading_dot: false,
    };

    let entries = glob_with(&pattern.to_string_lossy(), options)
        .map_err(|e| BatchError::Discovery(e.to_string()))?;

    let mut documents = Vec::new();
    for entry in entries {
        match entry {
            Ok(path) if path.is_file() => documents.push(path),
            Ok(path) => debug!("Skipping non-file {}", path.display()),
            Err(e) => warn!("Cannot read {}: {}", e.path().display(), e.error()),
        }
    }
    documents.sort();

    debug!("Discovered {} PDFs under {}", documents.len(), dir.display());
    Ok(documents)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn touch(path: &Path) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, b"").unwrap();
    }

    #[test]
    fn test_is_pdf() {
        assert!(is_pdf(Path::new("a/b/statement.pdf")));
        assert!(is_pdf(Path::new("STATEMENT.PDF")));
        assert!(is_pdf(Path::new("Statement.Pdf")));
        assert!(!is_pdf(Path::new("statement.pdf.txt")));
        assert!(!is_pdf(Path::new("statement")));
    }

    #[test]
    fn test_missing_input() {
        let dir = tempfile::tempdir().unwrap();
        let err = resolve_input(&dir.path().join("nope")).unwrap_err();
        assert!(matches!(err, BatchError::InputNotFound(_)));
    }

    #[test]
    fn test_single_non_pdf_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        touch(&path);

        let err = resolve_input(&path).unwrap_err();
        assert!(matches!(err, BatchError::UnsupportedInput(_)));
    }

    #[test]
    fn test_single_pdf_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("250000001_stmt.PDF");
        touch(&path);

        assert_eq!(resolve_input(&path).unwrap(), vec![path]);
    }

    #[test]
    fn test_recursive_discovery() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        touch(&root.join("a.pdf"));
        touch(&root.join("b.PDF"));
        touch(&root.join("notes.txt"));
        touch(&root.join("nested/deeper/c.Pdf"));
        touch(&root.join("nested/d.docx"));
        fs::create_dir_all(root.join("folder.pdf")).unwrap();

        let mut found: Vec<String> = resolve_input(root)
            .unwrap()
            .iter()
            .map(|p| p.strip_prefix(root).unwrap().to_string_lossy().replace('\\', "/"))
            .collect();
        found.sort();

        assert_eq!(found, vec!["a.pdf", "b.PDF", "nested/deeper/c.Pdf"]);
    }

    #[test]
    fn test_empty_directory() {
        let dir = tempfile::tempdir().unwrap();
        assert!(resolve_input(dir.path()).unwrap().is_empty());
    }

    #[test]
    fn test_directory_with_glob_characters() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("batch [march]");
        touch(&root.join("x.pdf"));

        assert_eq!(resolve_input(&root).unwrap().len(), 1);
    }
}
