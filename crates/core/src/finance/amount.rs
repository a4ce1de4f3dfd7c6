//! Monetary amount parsing and budget availability arithmetic.
//!
//! Stored ledger figures may arrive as native numbers or as string-typed
//! decimals (legacy imports, NUMERIC columns serialized as text). The
//! parser here is total: every input shape maps to a `Decimal`, with
//! anything unparseable defaulting to zero so downstream arithmetic stays
//! well-defined.

use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use serde_json::Value;

/// Converts a value of unknown shape into a canonical decimal amount.
///
/// Policy:
/// - finite numbers pass through unchanged;
/// - numeric strings are parsed as decimals;
/// - empty/unparseable strings, null, booleans, arrays, and objects all
///   yield `Decimal::ZERO`.
///
/// Never fails.
#[must_use]
pub fn parse_monetary_amount(value: &Value) -> Decimal {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Decimal::from(i)
            } else if let Some(u) = n.as_u64() {
                Decimal::from(u)
            } else {
                // JSON numbers are finite by construction; a huge float can
                // still overflow Decimal, which falls back to zero.
                n.as_f64().and_then(Decimal::from_f64).unwrap_or(Decimal::ZERO)
            }
        }
        Value::String(s) => s.trim().parse::<Decimal>().unwrap_or(Decimal::ZERO),
        _ => Decimal::ZERO,
    }
}

/// Ledger figures of a budget, coerced to decimals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BudgetFigures {
    /// Total amount allocated to the budget.
    pub allocated_amount: Decimal,
    /// Amount actually spent (posted transactions).
    pub actual_spent: Decimal,
    /// Amount committed by accepted but not yet posted transactions.
    pub committed_amount: Decimal,
    /// Amount reserved outside the transaction lifecycle.
    pub reserved_amount: Decimal,
}

impl BudgetFigures {
    /// Builds figures from raw values, coercing each through
    /// [`parse_monetary_amount`] so string-typed decimals from storage
    /// compute identically to native numbers.
    #[must_use]
    pub fn from_raw(
        allocated_amount: &Value,
        actual_spent: &Value,
        committed_amount: &Value,
        reserved_amount: &Value,
    ) -> Self {
        Self {
            allocated_amount: parse_monetary_amount(allocated_amount),
            actual_spent: parse_monetary_amount(actual_spent),
            committed_amount: parse_monetary_amount(committed_amount),
            reserved_amount: parse_monetary_amount(reserved_amount),
        }
    }
}

/// Computes the available headroom of a budget.
///
/// `available = allocated - spent - committed - reserved`. May be negative
/// transiently under concurrent writes; callers must check availability
/// inside the same atomic unit as the commitment they are about to take.
#[must_use]
pub fn available_budget(figures: &BudgetFigures) -> Decimal {
    figures.allocated_amount
        - figures.actual_spent
        - figures.committed_amount
        - figures.reserved_amount
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn test_parse_number_passthrough() {
        assert_eq!(parse_monetary_amount(&json!(100)), dec!(100));
        assert_eq!(parse_monetary_amount(&json!(100.5)), dec!(100.5));
        assert_eq!(parse_monetary_amount(&json!(0)), dec!(0));
    }

    #[test]
    fn test_parse_numeric_string() {
        assert_eq!(parse_monetary_amount(&json!("100.50")), dec!(100.50));
        assert_eq!(parse_monetary_amount(&json!(" 42 ")), dec!(42));
    }

    #[test]
    fn test_parse_invalid_defaults_to_zero() {
        assert_eq!(parse_monetary_amount(&json!("invalid")), dec!(0));
        assert_eq!(parse_monetary_amount(&json!("")), dec!(0));
        assert_eq!(parse_monetary_amount(&Value::Null), dec!(0));
        assert_eq!(parse_monetary_amount(&json!(true)), dec!(0));
        assert_eq!(parse_monetary_amount(&json!({})), dec!(0));
        assert_eq!(parse_monetary_amount(&json!([1, 2])), dec!(0));
    }

    #[test]
    fn test_available_budget() {
        let figures = BudgetFigures {
            allocated_amount: dec!(1000),
            actual_spent: dec!(200),
            committed_amount: dec!(150),
            reserved_amount: dec!(50),
        };
        assert_eq!(available_budget(&figures), dec!(600));
    }

    #[test]
    fn test_available_budget_string_number_equivalence() {
        let from_strings = BudgetFigures::from_raw(
            &json!("1000"),
            &json!("200"),
            &json!("150"),
            &json!("50"),
        );
        let from_numbers =
            BudgetFigures::from_raw(&json!(1000), &json!(200), &json!(150), &json!(50));
        assert_eq!(from_strings, from_numbers);
        assert_eq!(available_budget(&from_strings), dec!(600));
    }

    #[test]
    fn test_available_budget_can_go_negative() {
        let figures = BudgetFigures {
            allocated_amount: dec!(100),
            actual_spent: dec!(80),
            committed_amount: dec!(50),
            reserved_amount: dec!(0),
        };
        assert_eq!(available_budget(&figures), dec!(-30));
    }

    proptest! {
        /// The parser is total: no input shape panics.
        #[test]
        fn prop_parser_is_total(s in "\\PC*") {
            let _ = parse_monetary_amount(&Value::String(s));
        }

        /// Integer inputs round-trip exactly.
        #[test]
        fn prop_integers_pass_through(n in -1_000_000_000i64..1_000_000_000i64) {
            prop_assert_eq!(parse_monetary_amount(&json!(n)), Decimal::from(n));
        }

        /// A decimal rendered to a string parses back to itself.
        #[test]
        fn prop_string_number_equivalence(n in -1_000_000i64..1_000_000i64, scale in 0u32..4) {
            let d = Decimal::new(n, scale);
            prop_assert_eq!(parse_monetary_amount(&json!(d.to_string())), d);
        }
    }
}
