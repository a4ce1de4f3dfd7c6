//! Transaction status machine and its budget-ledger side effects.
//!
//! The legal transition set is fixed:
//!
//! ```text
//! draft ────────────► pending_approval ────► approved ────► posted ────► voided
//!   │                        │                   │
//!   └────────────────────────┴───────────────────┴──► cancelled
//! ```
//!
//! Everything else, including self-transitions and any edge out of a
//! terminal status, is rejected. Budget commitment is taken once, at
//! creation time, so approving does not touch the ledger; posting converts
//! the commitment into spend, and cancelling releases it. Voiding a posted
//! transaction releases nothing (its commitment was already released at
//! posting) and does not reverse `actual_spent` - full reversal-on-void
//! accounting is intentionally not implemented here.

use rust_decimal::Decimal;

use super::types::{TransactionStatus, TransactionType};

/// Returns true if `(from, to)` is one of the legal lifecycle edges.
#[must_use]
pub fn is_valid_transition(from: TransactionStatus, to: TransactionStatus) -> bool {
    use TransactionStatus::{Approved, Cancelled, Draft, PendingApproval, Posted, Voided};

    matches!(
        (from, to),
        (Draft, PendingApproval | Cancelled)
            | (PendingApproval, Approved | Cancelled)
            | (Approved, Posted | Cancelled)
            | (Posted, Voided)
    )
}

/// Budget-ledger deltas to apply atomically with a status write.
///
/// Deltas are signed; the repository adds them to the budget row inside
/// the same database transaction as the status update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedgerEffect {
    /// Change to `Budget.actual_spent`.
    pub actual_spent_delta: Decimal,
    /// Change to `Budget.committed_amount`.
    pub committed_delta: Decimal,
}

/// Computes the ledger side effect of an accepted status transition.
///
/// Returns `None` when the transition is illegal, when the transaction
/// type does not consume budget, or when the accepted transition has no
/// ledger effect (submission, approval, voiding).
#[must_use]
pub fn ledger_effect(
    transaction_type: TransactionType,
    from: TransactionStatus,
    to: TransactionStatus,
    amount: Decimal,
) -> Option<LedgerEffect> {
    if !transaction_type.consumes_budget() || !is_valid_transition(from, to) {
        return None;
    }

    match to {
        // Commitment becomes spend.
        TransactionStatus::Posted => Some(LedgerEffect {
            actual_spent_delta: amount,
            committed_delta: -amount,
        }),
        // Pre-posted abort releases the commitment taken at creation.
        TransactionStatus::Cancelled => Some(LedgerEffect {
            actual_spent_delta: Decimal::ZERO,
            committed_delta: -amount,
        }),
        // Submission and approval carry the creation-time commitment;
        // voiding happens after the commitment was already released.
        TransactionStatus::PendingApproval
        | TransactionStatus::Approved
        | TransactionStatus::Voided => None,
        TransactionStatus::Draft => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    use TransactionStatus::{Approved, Cancelled, Draft, PendingApproval, Posted, Voided};

    const LEGAL_EDGES: [(TransactionStatus, TransactionStatus); 7] = [
        (Draft, PendingApproval),
        (Draft, Cancelled),
        (PendingApproval, Approved),
        (PendingApproval, Cancelled),
        (Approved, Posted),
        (Approved, Cancelled),
        (Posted, Voided),
    ];

    #[test]
    fn test_exactly_seven_legal_edges() {
        let mut legal = 0;
        for from in TransactionStatus::all() {
            for to in TransactionStatus::all() {
                if is_valid_transition(from, to) {
                    assert!(
                        LEGAL_EDGES.contains(&(from, to)),
                        "unexpected legal edge {from:?} -> {to:?}"
                    );
                    legal += 1;
                }
            }
        }
        assert_eq!(legal, LEGAL_EDGES.len());
    }

    #[test]
    fn test_self_transitions_rejected() {
        for status in TransactionStatus::all() {
            assert!(!is_valid_transition(status, status));
        }
    }

    #[test]
    fn test_terminal_statuses_have_no_exits() {
        for to in TransactionStatus::all() {
            assert!(!is_valid_transition(Cancelled, to));
            assert!(!is_valid_transition(Voided, to));
        }
    }

    #[test]
    fn test_posted_cannot_return_to_approved() {
        assert!(!is_valid_transition(Posted, Approved));
    }

    #[test]
    fn test_posting_converts_commitment_to_spend() {
        let effect =
            ledger_effect(TransactionType::Expense, Approved, Posted, dec!(150.75)).unwrap();
        assert_eq!(effect.actual_spent_delta, dec!(150.75));
        assert_eq!(effect.committed_delta, dec!(-150.75));
    }

    #[test]
    fn test_cancellation_releases_commitment() {
        for from in [Draft, PendingApproval, Approved] {
            let effect =
                ledger_effect(TransactionType::Expense, from, Cancelled, dec!(80)).unwrap();
            assert_eq!(effect.actual_spent_delta, dec!(0));
            assert_eq!(effect.committed_delta, dec!(-80));
        }
    }

    #[test]
    fn test_approval_and_submission_have_no_effect() {
        assert!(ledger_effect(TransactionType::Expense, Draft, PendingApproval, dec!(10)).is_none());
        assert!(ledger_effect(TransactionType::Expense, PendingApproval, Approved, dec!(10)).is_none());
    }

    #[test]
    fn test_void_has_no_effect() {
        // Commitment was released at posting; actual_spent reversal is out of scope.
        assert!(ledger_effect(TransactionType::Expense, Posted, Voided, dec!(10)).is_none());
    }

    #[test]
    fn test_non_budget_types_never_touch_ledger() {
        for tx_type in [
            TransactionType::Revenue,
            TransactionType::Payroll,
            TransactionType::Transfer,
            TransactionType::Adjustment,
            TransactionType::Refund,
        ] {
            for (from, to) in LEGAL_EDGES {
                assert!(ledger_effect(tx_type, from, to, dec!(100)).is_none());
            }
        }
    }

    fn status_strategy() -> impl Strategy<Value = TransactionStatus> {
        prop_oneof![
            Just(Draft),
            Just(PendingApproval),
            Just(Approved),
            Just(Posted),
            Just(Cancelled),
            Just(Voided),
        ]
    }

    proptest! {
        /// Illegal transitions never produce a ledger effect.
        #[test]
        fn prop_illegal_transitions_have_no_effect(
            from in status_strategy(),
            to in status_strategy(),
            cents in 1i64..1_000_000i64,
        ) {
            prop_assume!(!is_valid_transition(from, to));
            let amount = Decimal::new(cents, 2);
            prop_assert!(ledger_effect(TransactionType::Expense, from, to, amount).is_none());
        }

        /// Posting then the committed delta always nets to zero against the
        /// creation-time commitment: spend gained equals commitment released.
        #[test]
        fn prop_posting_is_commitment_neutral(cents in 1i64..1_000_000i64) {
            let amount = Decimal::new(cents, 2);
            let effect = ledger_effect(TransactionType::Expense, Approved, Posted, amount).unwrap();
            prop_assert_eq!(effect.actual_spent_delta + effect.committed_delta, Decimal::ZERO);
        }
    }
}
