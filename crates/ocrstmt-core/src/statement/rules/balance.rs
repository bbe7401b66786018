//! New balance extraction.

use super::FieldExtractor;
use super::patterns::NEW_BALANCE;

/// New balance field extractor.
///
/// Returns the dollar amount as printed, symbol and thousands separators
/// included.
pub struct BalanceExtractor;

impl BalanceExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for BalanceExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for BalanceExtractor {
    type Output = String;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        NEW_BALANCE
            .captures(text)
            .map(|caps| caps[1].to_string())
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        NEW_BALANCE
            .captures_iter(text)
            .map(|caps| caps[1].to_string())
            .collect()
    }
}

/// Extract the new balance from statement text.
pub fn extract_new_balance(text: &str) -> Option<String> {
    BalanceExtractor::new().extract(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labeled_balance() {
        assert_eq!(
            extract_new_balance("New Balance: $1,234.56"),
            Some("$1,234.56".to_string())
        );
    }

    #[test]
    fn test_label_case_variants() {
        for label in ["New balance", "NEW BALANCE:", "new balance:", "New Balance"] {
            let text = format!("{} $1,234.56", label);
            assert_eq!(
                extract_new_balance(&text),
                Some("$1,234.56".to_string()),
                "label {:?}",
                label
            );
        }
    }

    #[test]
    fn test_amount_on_later_line() {
        let text = "Account Summary\nNew Balance:\nMinimum Payment Due\n$7,890.12\n$35.00";
        assert_eq!(extract_new_balance(text), Some("$7,890.12".to_string()));
    }

    #[test]
    fn test_requires_two_decimals() {
        assert_eq!(extract_new_balance("New Balance: $1,234"), None);
        assert_eq!(
            extract_new_balance("New Balance: $1,234 then $0.99"),
            Some("$0.99".to_string())
        );
    }

    #[test]
    fn test_missing_label() {
        assert_eq!(extract_new_balance("Previous Balance $100.00"), None);
        assert_eq!(extract_new_balance(""), None);
    }

    #[test]
    fn test_extract_all_balances() {
        let extractor = BalanceExtractor::new();
        let text = "New Balance: $10.00\npage 2\nNew balance $20.00";
        assert_eq!(
            extractor.extract_all(text),
            vec!["$10.00".to_string(), "$20.00".to_string()]
        );
    }
}
