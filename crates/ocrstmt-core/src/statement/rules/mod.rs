//! Rule-based field extractors for credit-card statements.

pub mod balance;
pub mod dates;
pub mod patterns;
pub mod reference;

pub use balance::{extract_new_balance, BalanceExtractor};
pub use dates::{extract_dates, DateExtractor, StatementDate, StatementDates};
pub use reference::{extract_reference, ReferenceExtractor};

/// Trait for field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the field from text.
    fn extract(&self, text: &str) -> Option<Self::Output>;

    /// Extract all occurrences of the field.
    fn extract_all(&self, text: &str) -> Vec<Self::Output>;
}
