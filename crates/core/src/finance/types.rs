//! Finance domain types: transaction type and status enumerations.

use serde::{Deserialize, Serialize};

/// Transaction type classification.
///
/// Categorizes transactions for numbering and budget-consumption purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    /// Money going out against a budget.
    Expense,
    /// Money coming in (registration fees, sponsorships, concessions).
    Revenue,
    /// Staff and official payouts.
    Payroll,
    /// Transfer between organization accounts.
    Transfer,
    /// Manual correction entry.
    Adjustment,
    /// Refund of a previous payment.
    Refund,
}

impl TransactionType {
    /// Parses a transaction type from its wire representation.
    ///
    /// Matching is case-sensitive: `"EXPENSE"` is not a valid type.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "expense" => Some(Self::Expense),
            "revenue" => Some(Self::Revenue),
            "payroll" => Some(Self::Payroll),
            "transfer" => Some(Self::Transfer),
            "adjustment" => Some(Self::Adjustment),
            "refund" => Some(Self::Refund),
            _ => None,
        }
    }

    /// Returns the wire representation of the type.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Expense => "expense",
            Self::Revenue => "revenue",
            Self::Payroll => "payroll",
            Self::Transfer => "transfer",
            Self::Adjustment => "adjustment",
            Self::Refund => "refund",
        }
    }

    /// Returns true if transactions of this type consume budget
    /// (commitment at creation, spend at posting).
    #[must_use]
    pub const fn consumes_budget(&self) -> bool {
        matches!(self, Self::Expense)
    }
}

/// Transaction status in the lifecycle state machine.
///
/// Transitions are governed by [`super::status::is_valid_transition`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionStatus {
    /// Transaction is being drafted and can be modified.
    Draft,
    /// Transaction has been submitted for approval.
    PendingApproval,
    /// Transaction has been approved and is ready for posting.
    Approved,
    /// Transaction has been posted (immutable).
    Posted,
    /// Transaction was cancelled before posting (terminal, retained for audit).
    Cancelled,
    /// Transaction was voided after posting (terminal, retained for audit).
    Voided,
}

impl TransactionStatus {
    /// Parses a transaction status from its wire representation.
    ///
    /// Matching is case-sensitive.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "draft" => Some(Self::Draft),
            "pending_approval" => Some(Self::PendingApproval),
            "approved" => Some(Self::Approved),
            "posted" => Some(Self::Posted),
            "cancelled" => Some(Self::Cancelled),
            "voided" => Some(Self::Voided),
            _ => None,
        }
    }

    /// Returns the wire representation of the status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::PendingApproval => "pending_approval",
            Self::Approved => "approved",
            Self::Posted => "posted",
            Self::Cancelled => "cancelled",
            Self::Voided => "voided",
        }
    }

    /// Returns true if no further transitions can leave this status.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Cancelled | Self::Voided)
    }

    /// Returns all statuses, in lifecycle order.
    #[must_use]
    pub const fn all() -> [Self; 6] {
        [
            Self::Draft,
            Self::PendingApproval,
            Self::Approved,
            Self::Posted,
            Self::Cancelled,
            Self::Voided,
        ]
    }
}

/// Returns true if `s` names one of the fixed transaction types.
#[must_use]
pub fn is_valid_transaction_type(s: &str) -> bool {
    TransactionType::parse(s).is_some()
}

/// Returns true if `s` names one of the fixed transaction statuses.
#[must_use]
pub fn is_valid_transaction_status(s: &str) -> bool {
    TransactionStatus::parse(s).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("expense")]
    #[case("revenue")]
    #[case("payroll")]
    #[case("transfer")]
    #[case("adjustment")]
    #[case("refund")]
    fn test_valid_transaction_types(#[case] s: &str) {
        assert!(is_valid_transaction_type(s));
        assert_eq!(TransactionType::parse(s).unwrap().as_str(), s);
    }

    #[rstest]
    #[case("EXPENSE")]
    #[case("Expense")]
    #[case("invoice")]
    #[case("")]
    #[case(" expense")]
    fn test_invalid_transaction_types(#[case] s: &str) {
        assert!(!is_valid_transaction_type(s));
    }

    #[rstest]
    #[case("draft")]
    #[case("pending_approval")]
    #[case("approved")]
    #[case("posted")]
    #[case("cancelled")]
    #[case("voided")]
    fn test_valid_transaction_statuses(#[case] s: &str) {
        assert!(is_valid_transaction_status(s));
        assert_eq!(TransactionStatus::parse(s).unwrap().as_str(), s);
    }

    #[rstest]
    #[case("DRAFT")]
    #[case("pending")]
    #[case("void")]
    #[case("")]
    fn test_invalid_transaction_statuses(#[case] s: &str) {
        assert!(!is_valid_transaction_status(s));
    }

    #[test]
    fn test_only_expense_consumes_budget() {
        assert!(TransactionType::Expense.consumes_budget());
        assert!(!TransactionType::Revenue.consumes_budget());
        assert!(!TransactionType::Payroll.consumes_budget());
        assert!(!TransactionType::Transfer.consumes_budget());
        assert!(!TransactionType::Adjustment.consumes_budget());
        assert!(!TransactionType::Refund.consumes_budget());
    }

    #[test]
    fn test_terminal_statuses() {
        assert!(TransactionStatus::Cancelled.is_terminal());
        assert!(TransactionStatus::Voided.is_terminal());
        assert!(!TransactionStatus::Draft.is_terminal());
        assert!(!TransactionStatus::PendingApproval.is_terminal());
        assert!(!TransactionStatus::Approved.is_terminal());
        assert!(!TransactionStatus::Posted.is_terminal());
    }
}
