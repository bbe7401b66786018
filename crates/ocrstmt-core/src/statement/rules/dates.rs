//! Statement closing date and payment due date extraction.
//!
//! Both dates are printed on the line after their label. The whole next line
//! is taken verbatim (trimmed) since issuers format dates in every way
//! imaginable.

use regex::Regex;

use super::FieldExtractor;
use super::patterns::{PAYMENT_DUE_DATE, STATEMENT_CLOSING_DATE};

/// Which labelled date to look for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementDate {
    /// "Statement Closing Date"
    Closing,
    /// "Payment Due Date"
    PaymentDue,
}

impl StatementDate {
    fn pattern(self) -> &'static Regex {
        match self {
            Self::Closing => &STATEMENT_CLOSING_DATE,
            Self::PaymentDue => &PAYMENT_DUE_DATE,
        }
    }
}

/// Extracts the line following a date label.
pub struct DateExtractor {
    kind: StatementDate,
}

impl DateExtractor {
    pub fn new(kind: StatementDate) -> Self {
        Self { kind }
    }
}

impl FieldExtractor for DateExtractor {
    type Output = String;

    // Only the first label counts; a whitespace-only line after it means no date.
    fn extract(&self, text: &str) -> Option<Self::Output> {
        let caps = self.kind.pattern().captures(text)?;
        let value = caps[1].trim();
        (!value.is_empty()).then(|| value.to_string())
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        self.kind
            .pattern()
            .captures_iter(text)
            .map(|caps| caps[1].trim().to_string())
            .filter(|value| !value.is_empty())
            .collect()
    }
}

/// Statement dates found in a document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatementDates {
    pub closing_date: Option<String>,
    pub due_date: Option<String>,
}

/// Extract both labelled dates from statement text.
pub fn extract_dates(text: &str) -> StatementDates {
    StatementDates {
        closing_date: DateExtractor::new(StatementDate::Closing).extract(text),
        due_date: DateExtractor::new(StatementDate::PaymentDue).extract(text),
    }
}
