//! Date-keyed report writer.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tracing::{debug, info};

use super::{ReportTable, Result};
use crate::error::OcrStmtError;
use crate::models::config::ReportConfig;
use crate::models::statement::{CompleteFields, LookupRow, ReportRow};

/// What a single write did to the report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteOutcome {
    /// File that was written.
    pub path: PathBuf,
    /// Rows already in the file before this write.
    pub existing_rows: usize,
    /// Rows added by this write.
    pub appended_rows: usize,
}

/// Appends merged account/statement rows to the run's report workbook.
#[derive(Debug, Clone)]
pub struct ReportWriter {
    path: PathBuf,
    sheet_name: String,
    text_marker: String,
}

impl ReportWriter {
    /// Create a writer for the report named after `run_date` inside
    /// `output_dir`.
    pub fn new(
        output_dir: &Path,
        run_date: NaiveDate,
        config: &ReportConfig,
    ) -> std::result::Result<Self, OcrStmtError> {
        let mut file_name = config.file_prefix.clone();
        write!(file_name, "{}", run_date.format(&config.date_format)).map_err(|_| {
            OcrStmtError::Config(format!("invalid report date format: {}", config.date_format))
        })?;
        file_name.push_str(".xlsx");

        Ok(Self {
            path: output_dir.join(file_name),
            sheet_name: config.sheet_name.clone(),
            text_marker: config.text_marker.clone(),
        })
    }

    /// Path of the report workbook.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the report, append one row per account row, and save it back.
    ///
    /// With no account rows the file is still rewritten, unchanged.
    pub fn write(&self, rows: &[LookupRow], fields: &CompleteFields) -> Result<WriteOutcome> {
        let mut table = ReportTable::load_or_new(&self.path)?;
        let existing_rows = table.len();

        table.append(
            rows.iter()
                .map(|row| ReportRow::merge(row, fields, &self.text_marker)),
        );
        debug!(
            "Appending {} rows after {} existing rows",
            rows.len(),
            existing_rows
        );

        table.save(&self.path, &self.sheet_name)?;
        info!("Report updated: {}", self.path.display());

        Ok(WriteOutcome {
            path: self.path.clone(),
            existing_rows,
            appended_rows: rows.len(),
        })
    }
}
