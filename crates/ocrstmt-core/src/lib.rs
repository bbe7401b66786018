//! Core library for credit card statement processing.
//!
//! This crate provides:
//! - PDF text decoding
//! - Statement field extraction (new balance, closing date, due date)
//! - Account lookup by the reference number in the file name
//! - A date-keyed xlsx report that accumulates rows across runs
//! - The batch driver tying these together

pub mod batch;
pub mod error;
pub mod lookup;
pub mod models;
pub mod pdf;
pub mod report;
pub mod statement;

pub use batch::{
    BatchDriver, BatchObserver, BatchReport, BatchRequest, BatchState, DocumentResult,
    DocumentStatus,
};
pub use error::{OcrStmtError, Result};
pub use lookup::{ConnectionSettings, RecordLookup, SecretProvider, SqlRecordLookup};
pub use models::config::AppConfig;
pub use models::statement::{CompleteFields, LookupRow, ReportRow, StatementFields};
pub use pdf::{PdfExtractor, PdfProcessor, PdfTextDecoder, TextDecoder};
pub use report::{ReportTable, ReportWriter};
pub use statement::{ExtractionResult, RuleStatementParser, StatementParser};
