//! Rule-based statement parser.

use std::time::Instant;

use tracing::debug;

use crate::models::statement::StatementFields;

use super::rules::{
    extract_dates, BalanceExtractor, DateExtractor, FieldExtractor, StatementDate,
};

/// Result of statement field extraction.
#[derive(Debug, Clone)]
pub struct ExtractionResult {
    /// Extracted fields; any of them may be absent.
    pub fields: StatementFields,
    /// Extraction warnings.
    pub warnings: Vec<String>,
    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

/// Trait for statement parsing.
pub trait StatementParser {
    /// Parse statement fields from raw document text.
    fn parse(&self, text: &str) -> ExtractionResult;
}

/// Statement parser driven by the regex rules.
///
/// Each field is searched for independently; a missing field never stops
/// the others from being found.
#[derive(Debug, Clone, Default)]
pub struct RuleStatementParser;

impl RuleStatementParser {
    /// Create a new rule-based parser.
    pub fn new() -> Self {
        Self
    }

    fn ambiguity_warnings(&self, text: &str) -> Vec<String> {
        let mut warnings = Vec::new();

        let balances = BalanceExtractor::new().extract_all(text);
        if has_conflict(&balances) {
            warnings.push(format!(
                "multiple new balances found ({}), using the first",
                balances.join(", ")
            ));
        }

        let closing = DateExtractor::new(StatementDate::Closing).extract_all(text);
        if has_conflict(&closing) {
            warnings.push(format!(
                "multiple closing dates found ({}), using the first",
                closing.join(", ")
            ));
        }

        let due = DateExtractor::new(StatementDate::PaymentDue).extract_all(text);
        if has_conflict(&due) {
            warnings.push(format!(
                "multiple due dates found ({}), using the first",
                due.join(", ")
            ));
        }

        warnings
    }
}

fn has_conflict(values: &[String]) -> bool {
    values.iter().any(|v| *v != values[0])
}

impl StatementParser for RuleStatementParser {
    fn parse(&self, text: &str) -> ExtractionResult {
        let start = Instant::now();

        let dates = extract_dates(text);
        let fields = StatementFields {
            new_balance: BalanceExtractor::new().extract(text),
            closing_date: dates.closing_date,
            due_date: dates.due_date,
        };

        let mut warnings = self.ambiguity_warnings(text);
        let missing = fields.missing();
        if !missing.is_empty() {
            warnings.push(format!("missing {}", missing.join(", ")));
        }

        debug!(
            "Extracted fields: new balance={:?}, closing date={:?}, due date={:?}",
            fields.new_balance, fields.closing_date, fields.due_date
        );

        ExtractionResult {
            fields,
            warnings,
            processing_time_ms: start.elapsed().as_millis() as u64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const STATEMENT: &str = r#"
ACME BANK VISA SIGNATURE
Account Summary
Previous Balance $980.00
Payments -$980.00
New Balance: $1,234.56
Statement Closing Date
03/15/2024
Payment Due Date:
04/10/2024
Minimum Payment Due $35.00
"#;

    #[test]
    fn test_parse_full_statement() {
        let result = RuleStatementParser::new().parse(STATEMENT);

        assert_eq!(
            result.fields,
            StatementFields {
                new_balance: Some("$1,234.56".to_string()),
                closing_date: Some("03/15/2024".to_string()),
                due_date: Some("04/10/2024".to_string()),
            }
        );
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_parse_empty_text() {
        let result = RuleStatementParser::new().parse("");

        assert_eq!(result.fields, StatementFields::default());
        assert_eq!(
            result.warnings,
            vec!["missing new balance, statement closing date, payment due date".to_string()]
        );
    }

    #[test]
    fn test_fields_are_independent() {
        let result = RuleStatementParser::new().parse("Payment due date\nMay 1, 2024");

        assert_eq!(result.fields.new_balance, None);
        assert_eq!(result.fields.closing_date, None);
        assert_eq!(result.fields.due_date, Some("May 1, 2024".to_string()));
    }

    #[test]
    fn test_conflicting_balances_warn() {
        let text = format!("{}\nNew Balance: $9.99\n", STATEMENT);
        let result = RuleStatementParser::new().parse(&text);

        assert_eq!(result.fields.new_balance, Some("$1,234.56".to_string()));
        assert_eq!(result.warnings.len(), 1);
        assert!(result.warnings[0].starts_with("multiple new balances"));
    }
}
