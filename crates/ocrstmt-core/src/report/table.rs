//! In-memory report table backed by an xlsx file.

use std::path::Path;

use calamine::{open_workbook, Data, Reader, Xlsx, XlsxError};
use rust_xlsxwriter::{Format, Workbook};
use tracing::{debug, trace};

use super::Result;
use crate::error::ReportError;
use crate::models::statement::{ReportRow, REPORT_COLUMNS, REPORT_COLUMN_COUNT};

/// Ordered, append-only set of report rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportTable {
    rows: Vec<ReportRow>,
}

impl ReportTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the table from `path` if the file exists, otherwise start empty.
    pub fn load_or_new(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            debug!("No report at {}, starting a new one", path.display());
            Ok(Self::new())
        }
    }

    /// Load rows from the first worksheet of an existing workbook.
    ///
    /// The header row is skipped and cells are read positionally as text.
    /// Short rows are padded; a row with more than the report's column count
    /// makes the file malformed.
    pub fn load(path: &Path) -> Result<Self> {
        let read_err = |e: XlsxError| ReportError::Read {
            path: path.to_path_buf(),
            reason: e.to_string(),
        };

        let mut workbook: Xlsx<_> = open_workbook(path).map_err(read_err)?;
        let range = match workbook.worksheet_range_at(0) {
            Some(range) => range.map_err(read_err)?,
            None => return Ok(Self::new()),
        };

        let (first_row, first_col) = range.start().unwrap_or((0, 0));
        let mut rows = Vec::new();

        for (offset, cells) in range.rows().enumerate() {
            let row_idx = first_row as usize + offset;
            if row_idx == 0 {
                // header
                continue;
            }

            let mut values = vec![String::new(); first_col as usize];
            values.extend(cells.iter().map(cell_text));
            while values.last().is_some_and(|v| v.is_empty()) {
                values.pop();
            }

            if values.is_empty() {
                trace!("Skipping blank row {}", row_idx + 1);
                continue;
            }
            if values.len() > REPORT_COLUMN_COUNT {
                return Err(ReportError::Malformed {
                    path: path.to_path_buf(),
                    row: row_idx + 1,
                    found: values.len(),
                    expected: REPORT_COLUMN_COUNT,
                });
            }

            let cells: [String; REPORT_COLUMN_COUNT] = std::array::from_fn(|i| {
                values.get_mut(i).map(std::mem::take).unwrap_or_default()
            });
            rows.push(ReportRow::from_cells(cells));
        }

        debug!("Loaded {} existing rows from {}", rows.len(), path.display());
        Ok(Self { rows })
    }

    /// Append rows after the existing ones.
    pub fn append(&mut self, rows: impl IntoIterator<Item = ReportRow>) {
        self.rows.extend(rows);
    }

    pub fn rows(&self) -> &[ReportRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Write the whole table to `path`, replacing any existing file.
    ///
    /// Every data cell is written as a string with the text number format.
    pub fn save(&self, path: &Path, sheet_name: &str) -> Result<()> {
        let write_err = |e: rust_xlsxwriter::XlsxError| ReportError::Write {
            path: path.to_path_buf(),
            reason: e.to_string(),
        };

        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(sheet_name).map_err(write_err)?;

        let header = Format::new().set_bold();
        for (col, name) in REPORT_COLUMNS.iter().enumerate() {
            worksheet
                .write_string_with_format(0, col as u16, *name, &header)
                .map_err(write_err)?;
        }

        let text = Format::new().set_num_format("@");
        for (idx, row) in self.rows.iter().enumerate() {
            let row_num = (idx + 1) as u32;
            for (col, value) in row.cells().iter().enumerate() {
                if value.is_empty() {
                    continue;
                }
                worksheet
                    .write_string_with_format(row_num, col as u16, value, &text)
                    .map_err(write_err)?;
            }
        }

        workbook.save(path).map_err(write_err)?;
        debug!("Saved {} rows to {}", self.rows.len(), path.display());
        Ok(())
    }
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        other => other.to_string(),
    }
}
