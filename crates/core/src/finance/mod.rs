//! Finance domain: transaction lifecycle and budget-consumption logic.
//!
//! Everything here is pure. The db crate is responsible for applying the
//! decisions made in this module atomically against persistent state.

pub mod amount;
pub mod error;
pub mod number;
pub mod query;
pub mod status;
pub mod types;
pub mod validation;

pub use amount::{BudgetFigures, available_budget, parse_monetary_amount};
pub use error::FinanceError;
pub use query::{ListQuery, RawListQuery, TransactionFilters, parse_query_params};
pub use number::{extract_sequence, format_transaction_number, transaction_prefix};
pub use status::{LedgerEffect, is_valid_transition, ledger_effect};
pub use types::{TransactionStatus, TransactionType, is_valid_transaction_status, is_valid_transaction_type};
pub use validation::{TransactionPayload, VendorPayload, validate_transaction_data, validate_vendor_data};
