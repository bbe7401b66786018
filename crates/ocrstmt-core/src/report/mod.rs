//! Report workbook module.
//!
//! The report is a single date-named workbook per output folder that only
//! ever grows: every save rewrites the whole file with the previous rows
//! first and the new rows after them.

mod table;
mod writer;

pub use table::ReportTable;
pub use writer::{ReportWriter, WriteOutcome};

use crate::error::ReportError;

/// Result type for report operations.
pub type Result<T> = std::result::Result<T, ReportError>;
