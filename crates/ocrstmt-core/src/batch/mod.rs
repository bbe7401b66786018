//! Batch processing of statement PDFs.
//!
//! A batch resolves its input (one PDF or a folder walked recursively),
//! then processes each document in discovery order:
//! decode text, recover the reference number from the file name, extract
//! the statement fields and, only when all three fields are present, look up
//! the account rows and append them to the run's report. Failures are
//! recorded per document and never stop the batch.

mod discover;
mod driver;
mod reveal;

pub use discover::{discover_documents, is_pdf, resolve_input};
pub use driver::{default_output_dir, BatchDriver};
pub use reveal::{FolderRevealer, SystemRevealer};

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::models::statement::StatementFields;

/// What to process and where the report goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchRequest {
    /// A single PDF or a folder of PDFs.
    pub input: PathBuf,
    /// Folder receiving the report workbook.
    pub output_dir: PathBuf,
}

impl BatchRequest {
    pub fn new(input: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output_dir: output_dir.into(),
        }
    }
}

/// Outcome class of a single document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentStatus {
    /// Fields extracted, lookup ran, report written.
    Success,
    /// At least one field was not found; no lookup or write happened.
    MissingFields,
    /// The lookup failed and was treated as returning no rows.
    LookupDegraded,
    /// The report could not be written.
    WriteFailed,
    /// Processing aborted unexpectedly.
    Failed,
}

impl DocumentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::MissingFields => "missing_fields",
            Self::LookupDegraded => "lookup_degraded",
            Self::WriteFailed => "write_failed",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of processing one document.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentResult {
    /// Source document.
    pub path: PathBuf,
    /// Reference number from the file name.
    pub reference: Option<String>,
    /// Fields extracted from the text.
    pub fields: StatementFields,
    /// Report rows appended for this document.
    pub rows_written: usize,
    pub status: DocumentStatus,
    /// Human-readable detail for anything but a clean success.
    pub message: Option<String>,
    /// Extraction warnings.
    pub warnings: Vec<String>,
    pub processing_time_ms: u64,
}

impl DocumentResult {
    pub(crate) fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            reference: None,
            fields: StatementFields::default(),
            rows_written: 0,
            status: DocumentStatus::Success,
            message: None,
            warnings: Vec::new(),
            processing_time_ms: 0,
        }
    }
}

/// Everything a finished batch reports back.
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    /// Report workbook of this run.
    pub output_file: PathBuf,
    /// Per-document results in discovery order.
    pub documents: Vec<DocumentResult>,
    /// Whether the output folder was opened for the operator.
    pub revealed: bool,
}

impl BatchReport {
    /// Number of documents with the given status.
    pub fn count(&self, status: DocumentStatus) -> usize {
        self.documents.iter().filter(|d| d.status == status).count()
    }

    /// Total report rows appended during the batch.
    pub fn rows_written(&self) -> usize {
        self.documents.iter().map(|d| d.rows_written).sum()
    }

    /// Documents that did not finish cleanly.
    pub fn problems(&self) -> impl Iterator<Item = &DocumentResult> {
        self.documents
            .iter()
            .filter(|d| d.status != DocumentStatus::Success)
    }
}

/// Where a batch is in its run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchState {
    Idle,
    ResolvingInput,
    Iterating { total: usize },
    ProcessingDocument { index: usize, path: PathBuf },
    Done,
}

/// Receives progress while a batch runs.
pub trait BatchObserver {
    fn on_state(&mut self, _state: &BatchState) {}

    fn on_document(&mut self, _result: &DocumentResult) {}
}

impl BatchObserver for () {}
