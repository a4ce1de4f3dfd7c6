//! Transaction number generation helpers.
//!
//! Numbers have the shape `PREFIX-YYYY-NNNNNN`: a 3-letter type prefix, the
//! calendar year, and a zero-padded sequence scoped to (prefix, year). The
//! pure pieces live here; deriving the next sequence from persisted state
//! (max existing + 1, inside the insert's database transaction, with retry
//! on unique-constraint conflict) is the repository's job.

use super::types::TransactionType;

/// Width of the zero-padded sequence component.
pub const SEQUENCE_WIDTH: usize = 6;

/// Returns the 3-letter number prefix for a transaction type string.
///
/// Unknown or empty types fall back to the generic `TXN` prefix.
#[must_use]
pub fn transaction_prefix(transaction_type: &str) -> &'static str {
    match TransactionType::parse(transaction_type) {
        Some(TransactionType::Expense) => "EXP",
        Some(TransactionType::Revenue) => "REV",
        Some(TransactionType::Payroll) => "PAY",
        Some(TransactionType::Transfer) => "TRF",
        Some(TransactionType::Adjustment) => "ADJ",
        Some(TransactionType::Refund) => "REF",
        None => "TXN",
    }
}

/// Formats a full transaction number from its components.
#[must_use]
pub fn format_transaction_number(prefix: &str, year: i32, sequence: u32) -> String {
    format!("{prefix}-{year}-{sequence:0SEQUENCE_WIDTH$}")
}

/// Extracts the sequence component from an existing transaction number.
///
/// Returns `None` if the trailing segment is missing or not numeric, so a
/// malformed legacy number never poisons sequence derivation.
#[must_use]
pub fn extract_sequence(transaction_number: &str) -> Option<u32> {
    transaction_number
        .rsplit_once('-')
        .and_then(|(_, seq)| seq.parse::<u32>().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("expense", "EXP")]
    #[case("revenue", "REV")]
    #[case("payroll", "PAY")]
    #[case("transfer", "TRF")]
    #[case("adjustment", "ADJ")]
    #[case("refund", "REF")]
    #[case("", "TXN")]
    #[case("unknown", "TXN")]
    #[case("EXPENSE", "TXN")]
    fn test_transaction_prefix(#[case] tx_type: &str, #[case] expected: &str) {
        assert_eq!(transaction_prefix(tx_type), expected);
    }

    #[test]
    fn test_format_transaction_number() {
        assert_eq!(format_transaction_number("EXP", 2024, 1), "EXP-2024-000001");
        assert_eq!(
            format_transaction_number("TXN", 2026, 123_456),
            "TXN-2026-123456"
        );
    }

    #[test]
    fn test_extract_sequence_round_trip() {
        let number = format_transaction_number("REV", 2025, 42);
        assert_eq!(extract_sequence(&number), Some(42));
    }

    #[test]
    fn test_extract_sequence_malformed() {
        assert_eq!(extract_sequence("EXP-2024-abc"), None);
        assert_eq!(extract_sequence("nodashes"), None);
        assert_eq!(extract_sequence(""), None);
    }
}
