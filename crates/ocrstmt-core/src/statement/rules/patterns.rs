//! Regex patterns for credit-card statement extraction.
//!
//! Statement text comes out of OCR layers of many issuers, so labels are
//! matched case-insensitively and payloads are taken loosely.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Reference number embedded in the file name
    pub static ref REFERENCE_NUMBER: Regex = Regex::new(
        r"\d{9}"
    ).unwrap();

    // "New Balance:" / "New balance" then the first dollar amount after it,
    // possibly several lines further down
    pub static ref NEW_BALANCE: Regex = Regex::new(
        r"(?is)(?:New Balance:|New balance)\b.*?(\$[\d,]+\.\d{2})"
    ).unwrap();

    // Closing date sits on the line after its label
    pub static ref STATEMENT_CLOSING_DATE: Regex = Regex::new(
        r"(?i)Statement Closing Date[^\n]*\n(.+)"
    ).unwrap();

    pub static ref PAYMENT_DUE_DATE: Regex = Regex::new(
        r"(?i)(?:Payment Due Date:|Payment due date)[^\n]*\n(.+)"
    ).unwrap();
}
