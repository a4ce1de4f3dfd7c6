//! Repository abstractions for data access.

pub mod budget;
pub mod organization;
pub mod transaction;
pub mod vendor;

pub use budget::BudgetRepository;
pub use organization::OrganizationRepository;
pub use transaction::TransactionRepository;
pub use vendor::VendorRepository;

use leaguehq_core::finance::FinanceError;
use sea_orm::DbErr;

/// Maps a database error into the domain error taxonomy.
///
/// Core is database-agnostic, so the conversion lives here rather than as
/// a `From` impl.
pub(crate) fn db_err(e: DbErr) -> FinanceError {
    FinanceError::Database(e.to_string())
}
