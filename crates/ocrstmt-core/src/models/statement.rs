//! Statement data models: extracted fields, account rows, and report rows.

use serde::{Deserialize, Serialize};

/// Column headers of the report workbook, in output order.
pub const REPORT_COLUMNS: [&str; 11] = [
    "MASTER.FILENO",
    "MASTER.FORW_FILENO",
    "MASTER.FORW_REFNO",
    "DEBTOR.NAME",
    "MASTER.CHARGE_OFF",
    "MASTER.ORIG_CLAIM",
    "MASTER.CHARGE_OFF_DATE",
    "ACCOUNT NUMBER",
    "NEW BALANCE",
    "STATEMENT CLOSING DATE",
    "DUE DATE",
];

/// Number of columns in a report row.
pub const REPORT_COLUMN_COUNT: usize = REPORT_COLUMNS.len();

/// Fields pulled out of a statement's text.
///
/// Values are kept exactly as they appear in the document (after trimming);
/// no currency or date parsing happens anywhere in the pipeline.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatementFields {
    /// New balance including the currency symbol, e.g. `$1,234.56`.
    pub new_balance: Option<String>,

    /// Line following the "Statement Closing Date" label.
    pub closing_date: Option<String>,

    /// Line following the "Payment Due Date" label.
    pub due_date: Option<String>,
}

impl StatementFields {
    /// All three fields, if every one of them was found.
    pub fn complete(&self) -> Option<CompleteFields> {
        match (&self.new_balance, &self.closing_date, &self.due_date) {
            (Some(new_balance), Some(closing_date), Some(due_date)) => Some(CompleteFields {
                new_balance: new_balance.clone(),
                closing_date: closing_date.clone(),
                due_date: due_date.clone(),
            }),
            _ => None,
        }
    }

    /// Check whether all three fields are present.
    pub fn is_complete(&self) -> bool {
        self.new_balance.is_some() && self.closing_date.is_some() && self.due_date.is_some()
    }

    /// Names of the fields that were not found.
    pub fn missing(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.new_balance.is_none() {
            missing.push("new balance");
        }
        if self.closing_date.is_none() {
            missing.push("statement closing date");
        }
        if self.due_date.is_none() {
            missing.push("payment due date");
        }
        missing
    }
}

/// Statement fields with every value present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompleteFields {
    pub new_balance: String,
    pub closing_date: String,
    pub due_date: String,
}

/// One MASTER/DEBTOR row matching a reference number.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupRow {
    /// MASTER.FILENO
    pub file_number: String,
    /// MASTER.FORW_FILENO
    pub forwarded_file_number: String,
    /// MASTER.FORW_REFNO
    pub forwarded_reference: String,
    /// DEBTOR.NAME
    pub debtor_name: String,
    /// MASTER.CHARGE_OFF
    pub charge_off: String,
    /// MASTER.ORIG_CLAIM
    pub original_claim: String,
    /// MASTER.CHARGE_OFF_DATE
    pub charge_off_date: String,
}

/// A single row of the report workbook, every cell held as text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow {
    cells: [String; REPORT_COLUMN_COUNT],
}

impl ReportRow {
    /// Merge an account row with the statement fields.
    ///
    /// `text_marker` is prefixed to the file number so spreadsheet software
    /// keeps it as text.
    pub fn merge(row: &LookupRow, fields: &CompleteFields, text_marker: &str) -> Self {
        Self {
            cells: [
                format!("{}{}", text_marker, row.file_number),
                row.forwarded_file_number.clone(),
                row.forwarded_reference.clone(),
                row.debtor_name.clone(),
                row.charge_off.clone(),
                row.original_claim.clone(),
                row.charge_off_date.clone(),
                row.forwarded_file_number.clone(),
                fields.new_balance.clone(),
                fields.closing_date.clone(),
                fields.due_date.clone(),
            ],
        }
    }

    /// Build a row from cells already laid out in report order.
    pub fn from_cells(cells: [String; REPORT_COLUMN_COUNT]) -> Self {
        Self { cells }
    }

    /// Cells in report column order.
    pub fn cells(&self) -> &[String] {
        &self.cells
    }

    /// Look up a cell by its column header.
    pub fn get(&self, column: &str) -> Option<&str> {
        REPORT_COLUMNS
            .iter()
            .position(|c| *c == column)
            .map(|i| self.cells[i].as_str())
    }
}
