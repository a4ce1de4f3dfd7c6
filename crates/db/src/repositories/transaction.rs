//! Transaction repository: lifecycle operations with atomic ledger effects.
//!
//! Two operations here are the correctness core of the system and each runs
//! as a single database transaction:
//!
//! - `create_transaction`: budget availability check (under an exclusive
//!   row lock), transaction-number generation, insert, and commitment
//!   increment. A unique-constraint collision on the number is retried.
//! - `transition_status`: legality check against the status machine, the
//!   resulting ledger deltas, and the status write.
//!
//! If any step fails the whole unit rolls back; partial ledger mutations
//! are never observable.

use chrono::{Datelike, NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, DatabaseTransaction, EntityTrait,
    Order, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, SqlErr, TransactionTrait,
    sea_query::Expr,
};
use tracing::{info, warn};
use uuid::Uuid;

use leaguehq_core::finance::{
    self, FinanceError, ListQuery, available_budget, extract_sequence, format_transaction_number,
    is_valid_transition, ledger_effect, transaction_prefix,
};

use crate::entities::{budgets, transactions};
use crate::repositories::{budget, db_err};

/// How many times a number collision is retried before giving up.
const MAX_NUMBER_ATTEMPTS: u32 = 3;

/// Input for creating a transaction.
#[derive(Debug, Clone)]
pub struct CreateTransactionInput {
    /// Owning organization.
    pub organization_id: Uuid,
    /// Transaction type.
    pub transaction_type: finance::TransactionType,
    /// Monetary amount (validated positive by the caller).
    pub amount: Decimal,
    /// Description.
    pub description: String,
    /// Transaction date.
    pub transaction_date: NaiveDate,
    /// Submit straight to approval instead of starting in draft.
    pub submit_for_approval: bool,
    /// Budget to charge, if any.
    pub budget_id: Option<Uuid>,
    /// Vendor reference, if any.
    pub vendor_id: Option<Uuid>,
    /// User who created the transaction.
    pub created_by: Uuid,
}

/// Transaction repository for lifecycle operations.
#[derive(Debug, Clone)]
pub struct TransactionRepository {
    db: DatabaseConnection,
}

impl TransactionRepository {
    /// Creates a new transaction repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a transaction, committing budget for budget-consuming types.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The referenced budget does not exist in the organization
    /// - The budget has insufficient availability
    /// - The generated number keeps colliding after retries
    /// - The database operation fails
    pub async fn create_transaction(
        &self,
        input: CreateTransactionInput,
    ) -> Result<transactions::Model, FinanceError> {
        for attempt in 1..=MAX_NUMBER_ATTEMPTS {
            match self.try_create(&input).await {
                Err(e) if e.is_retryable() && attempt < MAX_NUMBER_ATTEMPTS => {
                    warn!(attempt, "transaction number conflict, retrying");
                }
                other => return other,
            }
        }
        Err(FinanceError::NumberConflict)
    }

    /// One attempt at the atomic create unit.
    async fn try_create(
        &self,
        input: &CreateTransactionInput,
    ) -> Result<transactions::Model, FinanceError> {
        let txn = self.db.begin().await.map_err(db_err)?;
        let now = Utc::now();

        // Availability check and commitment, under an exclusive lock on the
        // budget row so concurrent creations serialize against the same
        // available figure.
        if input.transaction_type.consumes_budget()
            && let Some(budget_id) = input.budget_id
        {
            let budget = budgets::Entity::find_by_id(budget_id)
                .filter(budgets::Column::OrganizationId.eq(input.organization_id))
                .lock_exclusive()
                .one(&txn)
                .await
                .map_err(db_err)?
                .ok_or(FinanceError::BudgetNotFound(budget_id))?;

            let available = available_budget(&budget::figures(&budget));
            if input.amount > available {
                return Err(FinanceError::InsufficientBudget {
                    requested: input.amount,
                    available,
                });
            }

            let committed = budget.committed_amount + input.amount;
            let mut active: budgets::ActiveModel = budget.into();
            active.committed_amount = Set(committed);
            active.updated_at = Set(now.into());
            active.update(&txn).await.map_err(db_err)?;
        }

        let transaction_number = self
            .next_transaction_number(&txn, input.transaction_type, now.year())
            .await?;

        let transaction = transactions::ActiveModel {
            id: Set(Uuid::new_v4()),
            organization_id: Set(input.organization_id),
            transaction_number: Set(transaction_number.clone()),
            transaction_type: Set(input.transaction_type.into()),
            amount: Set(input.amount),
            description: Set(input.description.clone()),
            transaction_date: Set(input.transaction_date),
            status: Set(initial_status(input.submit_for_approval).into()),
            budget_id: Set(input.budget_id),
            vendor_id: Set(input.vendor_id),
            created_by: Set(input.created_by),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        };

        let inserted = match transaction.insert(&txn).await {
            Ok(model) => model,
            Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                return Err(FinanceError::NumberConflict);
            }
            Err(e) => return Err(db_err(e)),
        };

        txn.commit().await.map_err(db_err)?;

        info!(
            organization_id = %input.organization_id,
            transaction_id = %inserted.id,
            number = %transaction_number,
            "Transaction created"
        );
        Ok(inserted)
    }

    /// Derives the next number in the (prefix, year) scope.
    ///
    /// Runs inside the caller's database transaction; concurrent inserts
    /// that race to the same sequence are caught by the unique constraint
    /// and retried by `create_transaction`. The max is taken over the
    /// numeric value of the trailing segment, not the string, so a scope
    /// that outgrows the padded width keeps ordering correctly (the 7-digit
    /// `1000000` sorts below `999999` as text).
    async fn next_transaction_number(
        &self,
        txn: &DatabaseTransaction,
        transaction_type: finance::TransactionType,
        year: i32,
    ) -> Result<String, FinanceError> {
        let prefix = transaction_prefix(transaction_type.as_str());
        let scope = format!("{prefix}-{year}-");

        let latest = transactions::Entity::find()
            .filter(transactions::Column::TransactionNumber.starts_with(&scope))
            .order_by(
                Expr::cust("CAST(SPLIT_PART(transaction_number, '-', 3) AS BIGINT)"),
                Order::Desc,
            )
            .limit(1)
            .one(txn)
            .await
            .map_err(db_err)?;

        let sequence = next_sequence(latest.as_ref().map(|m| m.transaction_number.as_str()));
        Ok(format_transaction_number(prefix, year, sequence))
    }

    /// Applies a status transition with its ledger side effects.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The transaction is not found in the organization
    /// - `(current, to)` is not a legal edge of the status machine
    /// - The referenced budget row is missing
    /// - The database operation fails
    pub async fn transition_status(
        &self,
        organization_id: Uuid,
        transaction_id: Uuid,
        to: finance::TransactionStatus,
    ) -> Result<transactions::Model, FinanceError> {
        let txn = self.db.begin().await.map_err(db_err)?;
        let now = Utc::now();

        let row = transactions::Entity::find_by_id(transaction_id)
            .filter(transactions::Column::OrganizationId.eq(organization_id))
            .lock_exclusive()
            .one(&txn)
            .await
            .map_err(db_err)?
            .ok_or(FinanceError::TransactionNotFound(transaction_id))?;

        let from: finance::TransactionStatus = row.status.clone().into();
        if !is_valid_transition(from, to) {
            // Dropping the open transaction rolls it back; the row stays
            // untouched no matter how often the illegal request repeats.
            return Err(FinanceError::InvalidStatusTransition { from, to });
        }

        let transaction_type: finance::TransactionType = row.transaction_type.clone().into();
        if let Some(effect) = ledger_effect(transaction_type, from, to, row.amount)
            && let Some(budget_id) = row.budget_id
        {
            let budget = budgets::Entity::find_by_id(budget_id)
                .filter(budgets::Column::OrganizationId.eq(organization_id))
                .lock_exclusive()
                .one(&txn)
                .await
                .map_err(db_err)?
                .ok_or(FinanceError::BudgetNotFound(budget_id))?;

            let actual_spent = budget.actual_spent + effect.actual_spent_delta;
            let committed_amount = budget.committed_amount + effect.committed_delta;
            let mut active: budgets::ActiveModel = budget.into();
            active.actual_spent = Set(actual_spent);
            active.committed_amount = Set(committed_amount);
            active.updated_at = Set(now.into());
            active.update(&txn).await.map_err(db_err)?;
        }

        let mut active: transactions::ActiveModel = row.into();
        active.status = Set(to.into());
        active.updated_at = Set(now.into());
        let updated = active.update(&txn).await.map_err(db_err)?;

        txn.commit().await.map_err(db_err)?;

        info!(
            organization_id = %organization_id,
            transaction_id = %transaction_id,
            from = from.as_str(),
            to = to.as_str(),
            "Transaction status changed"
        );
        Ok(updated)
    }

    /// Lists transactions with normalized filters and pagination.
    ///
    /// Returns the page of rows plus the total row count for the filter.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_transactions(
        &self,
        organization_id: Uuid,
        query: &ListQuery,
    ) -> Result<(Vec<transactions::Model>, u64), FinanceError> {
        let mut select = transactions::Entity::find()
            .filter(transactions::Column::OrganizationId.eq(organization_id));

        let filters = &query.filters;
        if let Some(transaction_type) = filters.transaction_type {
            let db_type: crate::entities::sea_orm_active_enums::TransactionType =
                transaction_type.into();
            select = select.filter(transactions::Column::TransactionType.eq(db_type));
        }
        if let Some(status) = filters.status {
            let db_status: crate::entities::sea_orm_active_enums::TransactionStatus = status.into();
            select = select.filter(transactions::Column::Status.eq(db_status));
        }
        if let Some(date_from) = filters.date_from {
            select = select.filter(transactions::Column::TransactionDate.gte(date_from));
        }
        if let Some(date_to) = filters.date_to {
            select = select.filter(transactions::Column::TransactionDate.lte(date_to));
        }
        if let Some(min_amount) = filters.min_amount {
            select = select.filter(transactions::Column::Amount.gte(min_amount));
        }
        if let Some(max_amount) = filters.max_amount {
            select = select.filter(transactions::Column::Amount.lte(max_amount));
        }
        if let Some(search) = &filters.search {
            select = select.filter(
                Condition::any()
                    .add(transactions::Column::Description.contains(search))
                    .add(transactions::Column::TransactionNumber.contains(search)),
            );
        }

        let total = select.clone().count(&self.db).await.map_err(db_err)?;

        let rows = select
            .order_by_desc(transactions::Column::TransactionDate)
            .order_by_desc(transactions::Column::CreatedAt)
            .offset(query.offset())
            .limit(u64::from(query.limit))
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok((rows, total))
    }

    /// Gets a transaction by ID within an organization.
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction is not found or the query fails.
    pub async fn get_transaction(
        &self,
        organization_id: Uuid,
        transaction_id: Uuid,
    ) -> Result<transactions::Model, FinanceError> {
        transactions::Entity::find_by_id(transaction_id)
            .filter(transactions::Column::OrganizationId.eq(organization_id))
            .one(&self.db)
            .await
            .map_err(db_err)?
            .ok_or(FinanceError::TransactionNotFound(transaction_id))
    }
}

// ============================================================================
// Pure Helpers
// ============================================================================

/// Status a freshly created transaction starts in.
#[must_use]
pub fn initial_status(submit_for_approval: bool) -> finance::TransactionStatus {
    if submit_for_approval {
        finance::TransactionStatus::PendingApproval
    } else {
        finance::TransactionStatus::Draft
    }
}

/// Next sequence for a (prefix, year) scope given its current maximum.
///
/// A malformed latest number counts as sequence zero rather than aborting
/// numbering for the whole scope. Sequences past the padded width are
/// legal; formatting widens to 7+ digits and extraction parses any width,
/// so the scope keeps numbering past 999999.
#[must_use]
pub fn next_sequence(latest_number: Option<&str>) -> u32 {
    latest_number.and_then(extract_sequence).unwrap_or(0) + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_status() {
        assert_eq!(initial_status(false), finance::TransactionStatus::Draft);
        assert_eq!(
            initial_status(true),
            finance::TransactionStatus::PendingApproval
        );
    }

    #[test]
    fn test_next_sequence_from_empty_scope() {
        assert_eq!(next_sequence(None), 1);
    }

    #[test]
    fn test_next_sequence_increments_max() {
        assert_eq!(next_sequence(Some("EXP-2024-000041")), 42);
    }

    #[test]
    fn test_next_sequence_tolerates_malformed_latest() {
        assert_eq!(next_sequence(Some("garbage")), 1);
    }

    #[test]
    fn test_number_round_trip_through_scope() {
        let number = format_transaction_number("EXP", 2024, next_sequence(None));
        assert_eq!(number, "EXP-2024-000001");
        assert_eq!(next_sequence(Some(&number)), 2);
    }

    #[test]
    fn test_next_sequence_past_padded_width() {
        assert_eq!(next_sequence(Some("EXP-2024-999999")), 1_000_000);
        let number = format_transaction_number("EXP", 2024, 1_000_000);
        assert_eq!(number, "EXP-2024-1000000");
        assert_eq!(next_sequence(Some(&number)), 1_000_001);
    }
}
