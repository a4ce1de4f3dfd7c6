//! Database enum mappings for Postgres enum columns.
//!
//! These mirror the pure domain enums in `leaguehq_core::finance::types`;
//! conversions in both directions keep the repository layer free of
//! string matching.

use leaguehq_core::finance;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Transaction type enum column.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "transaction_type")]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    /// Money going out against a budget.
    #[sea_orm(string_value = "expense")]
    Expense,
    /// Money coming in.
    #[sea_orm(string_value = "revenue")]
    Revenue,
    /// Staff and official payouts.
    #[sea_orm(string_value = "payroll")]
    Payroll,
    /// Transfer between organization accounts.
    #[sea_orm(string_value = "transfer")]
    Transfer,
    /// Manual correction entry.
    #[sea_orm(string_value = "adjustment")]
    Adjustment,
    /// Refund of a previous payment.
    #[sea_orm(string_value = "refund")]
    Refund,
}

/// Transaction status enum column.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "transaction_status")]
#[serde(rename_all = "snake_case")]
pub enum TransactionStatus {
    /// Being drafted.
    #[sea_orm(string_value = "draft")]
    Draft,
    /// Submitted for approval.
    #[sea_orm(string_value = "pending_approval")]
    PendingApproval,
    /// Approved, ready for posting.
    #[sea_orm(string_value = "approved")]
    Approved,
    /// Posted (immutable).
    #[sea_orm(string_value = "posted")]
    Posted,
    /// Cancelled before posting (terminal).
    #[sea_orm(string_value = "cancelled")]
    Cancelled,
    /// Voided after posting (terminal).
    #[sea_orm(string_value = "voided")]
    Voided,
}

impl From<finance::TransactionType> for TransactionType {
    fn from(value: finance::TransactionType) -> Self {
        match value {
            finance::TransactionType::Expense => Self::Expense,
            finance::TransactionType::Revenue => Self::Revenue,
            finance::TransactionType::Payroll => Self::Payroll,
            finance::TransactionType::Transfer => Self::Transfer,
            finance::TransactionType::Adjustment => Self::Adjustment,
            finance::TransactionType::Refund => Self::Refund,
        }
    }
}

impl From<TransactionType> for finance::TransactionType {
    fn from(value: TransactionType) -> Self {
        match value {
            TransactionType::Expense => Self::Expense,
            TransactionType::Revenue => Self::Revenue,
            TransactionType::Payroll => Self::Payroll,
            TransactionType::Transfer => Self::Transfer,
            TransactionType::Adjustment => Self::Adjustment,
            TransactionType::Refund => Self::Refund,
        }
    }
}

impl From<finance::TransactionStatus> for TransactionStatus {
    fn from(value: finance::TransactionStatus) -> Self {
        match value {
            finance::TransactionStatus::Draft => Self::Draft,
            finance::TransactionStatus::PendingApproval => Self::PendingApproval,
            finance::TransactionStatus::Approved => Self::Approved,
            finance::TransactionStatus::Posted => Self::Posted,
            finance::TransactionStatus::Cancelled => Self::Cancelled,
            finance::TransactionStatus::Voided => Self::Voided,
        }
    }
}

impl From<TransactionStatus> for finance::TransactionStatus {
    fn from(value: TransactionStatus) -> Self {
        match value {
            TransactionStatus::Draft => Self::Draft,
            TransactionStatus::PendingApproval => Self::PendingApproval,
            TransactionStatus::Approved => Self::Approved,
            TransactionStatus::Posted => Self::Posted,
            TransactionStatus::Cancelled => Self::Cancelled,
            TransactionStatus::Voided => Self::Voided,
        }
    }
}
