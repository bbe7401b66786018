//! Error types for the ocrstmt-core library.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the ocrstmt library.
#[derive(Error, Debug)]
pub enum OcrStmtError {
    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// Account lookup error.
    #[error("lookup error: {0}")]
    Lookup(#[from] LookupError),

    /// Report workbook error.
    #[error("report error: {0}")]
    Report(#[from] ReportError),

    /// Batch could not start.
    #[error("batch error: {0}")]
    Batch(#[from] BatchError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to PDF processing.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,

    /// The file could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors raised by the account lookup collaborator.
#[derive(Error, Debug)]
pub enum LookupError {
    /// The secret provider could not supply connection settings.
    #[error("credentials unavailable: {0}")]
    Credentials(String),

    /// Opening the database failed.
    #[error("failed to connect to {database}: {reason}")]
    Connect { database: String, reason: String },

    /// Preparing or running the query failed.
    #[error("query failed: {0}")]
    Query(String),
}

/// Errors raised while loading or saving the report workbook.
#[derive(Error, Debug)]
pub enum ReportError {
    /// The existing workbook could not be read.
    #[error("failed to read {}: {reason}", .path.display())]
    Read { path: PathBuf, reason: String },

    /// The existing workbook does not fit the report schema.
    #[error("malformed report {}: row {row} has {found} columns, expected {expected}", .path.display())]
    Malformed {
        path: PathBuf,
        row: usize,
        found: usize,
        expected: usize,
    },

    /// The workbook could not be written.
    #[error("failed to write {}: {reason}", .path.display())]
    Write { path: PathBuf, reason: String },
}

/// Conditions that stop a batch before any document is processed.
#[derive(Error, Debug)]
pub enum BatchError {
    /// Input path does not exist.
    #[error("input path does not exist: {}", .0.display())]
    InputNotFound(PathBuf),

    /// Input is a file but not a PDF.
    #[error("input file is not a PDF: {}", .0.display())]
    UnsupportedInput(PathBuf),

    /// The input folder could not be searched.
    #[error("cannot search input folder: {0}")]
    Discovery(String),
}

/// Result type for the ocrstmt library.
pub type Result<T> = std::result::Result<T, OcrStmtError>;
