//! Finance error types for lifecycle and ledger operations.

use rust_decimal::Decimal;
use thiserror::Error;
use uuid::Uuid;

use super::types::TransactionStatus;

/// Errors that can occur during transaction lifecycle operations.
#[derive(Debug, Error)]
pub enum FinanceError {
    // ========== Validation Errors ==========
    /// Payload failed field-level validation.
    #[error("Validation failed: {}", .0.join("; "))]
    ValidationFailed(Vec<String>),

    // ========== Lifecycle Errors ==========
    /// Requested status transition is not a legal edge.
    #[error("Invalid status transition: {from:?} -> {to:?}")]
    InvalidStatusTransition {
        /// Current status.
        from: TransactionStatus,
        /// Requested status.
        to: TransactionStatus,
    },

    /// Unknown status string supplied by the caller.
    #[error("Unknown transaction status: {0}")]
    UnknownStatus(String),

    // ========== Budget Errors ==========
    /// Budget has less available than the requested amount.
    #[error("Insufficient budget: requested {requested}, available {available}")]
    InsufficientBudget {
        /// Amount the transaction would commit.
        requested: Decimal,
        /// Available headroom at check time.
        available: Decimal,
    },

    /// Budget not found.
    #[error("Budget not found: {0}")]
    BudgetNotFound(Uuid),

    // ========== Transaction Errors ==========
    /// Transaction not found.
    #[error("Transaction not found: {0}")]
    TransactionNotFound(Uuid),

    /// Transaction number collided under concurrent creation.
    #[error("Transaction number conflict, please retry")]
    NumberConflict,

    // ========== Vendor Errors ==========
    /// Vendor not found.
    #[error("Vendor not found: {0}")]
    VendorNotFound(Uuid),

    /// Vendor name already exists in the organization.
    #[error("Vendor name already exists: {0}")]
    DuplicateVendorName(String),

    // ========== Infrastructure ==========
    /// Database error.
    #[error("Database error: {0}")]
    Database(String),
}

impl FinanceError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::ValidationFailed(_) => "VALIDATION_FAILED",
            Self::InvalidStatusTransition { .. } => "INVALID_STATUS_TRANSITION",
            Self::UnknownStatus(_) => "UNKNOWN_STATUS",
            Self::InsufficientBudget { .. } => "INSUFFICIENT_BUDGET",
            Self::BudgetNotFound(_) => "BUDGET_NOT_FOUND",
            Self::TransactionNotFound(_) => "TRANSACTION_NOT_FOUND",
            Self::NumberConflict => "NUMBER_CONFLICT",
            Self::VendorNotFound(_) => "VENDOR_NOT_FOUND",
            Self::DuplicateVendorName(_) => "DUPLICATE_VENDOR_NAME",
            Self::Database(_) => "DATABASE_ERROR",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn http_status_code(&self) -> u16 {
        match self {
            Self::ValidationFailed(_) | Self::UnknownStatus(_) => 400,
            Self::BudgetNotFound(_) | Self::TransactionNotFound(_) | Self::VendorNotFound(_) => 404,
            Self::InvalidStatusTransition { .. }
            | Self::InsufficientBudget { .. }
            | Self::NumberConflict
            | Self::DuplicateVendorName(_) => 409,
            Self::Database(_) => 500,
        }
    }

    /// Returns true if retrying the operation may succeed.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::NumberConflict)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            FinanceError::ValidationFailed(vec![]).error_code(),
            "VALIDATION_FAILED"
        );
        assert_eq!(
            FinanceError::InsufficientBudget {
                requested: dec!(100),
                available: dec!(50),
            }
            .error_code(),
            "INSUFFICIENT_BUDGET"
        );
        assert_eq!(FinanceError::NumberConflict.error_code(), "NUMBER_CONFLICT");
    }

    #[test]
    fn test_http_status_codes() {
        assert_eq!(
            FinanceError::ValidationFailed(vec![]).http_status_code(),
            400
        );
        assert_eq!(
            FinanceError::TransactionNotFound(Uuid::nil()).http_status_code(),
            404
        );
        assert_eq!(
            FinanceError::InvalidStatusTransition {
                from: TransactionStatus::Posted,
                to: TransactionStatus::Approved,
            }
            .http_status_code(),
            409
        );
        assert_eq!(
            FinanceError::Database("boom".to_string()).http_status_code(),
            500
        );
    }

    #[test]
    fn test_only_number_conflict_is_retryable() {
        assert!(FinanceError::NumberConflict.is_retryable());
        assert!(!FinanceError::ValidationFailed(vec![]).is_retryable());
        assert!(
            !FinanceError::InsufficientBudget {
                requested: dec!(1),
                available: dec!(0),
            }
            .is_retryable()
        );
    }

    #[test]
    fn test_insufficient_budget_display() {
        let err = FinanceError::InsufficientBudget {
            requested: dec!(150.75),
            available: dec!(100.00),
        };
        assert_eq!(
            err.to_string(),
            "Insufficient budget: requested 150.75, available 100.00"
        );
    }
}
