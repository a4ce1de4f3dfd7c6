//! Budget repository for budget CRUD and availability reads.
//!
//! Ledger columns are only ever mutated by the transaction repository as
//! side effects of the transaction lifecycle; this repository creates and
//! reads budgets.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use tracing::info;
use uuid::Uuid;

use leaguehq_core::finance::{BudgetFigures, FinanceError};

use crate::entities::budgets;
use crate::repositories::db_err;

/// Input for creating a budget.
#[derive(Debug, Clone)]
pub struct CreateBudgetInput {
    /// Owning organization.
    pub organization_id: Uuid,
    /// Display name.
    pub name: String,
    /// Budget category.
    pub category: Option<String>,
    /// Period start date.
    pub period_start: NaiveDate,
    /// Period end date.
    pub period_end: NaiveDate,
    /// Total amount allocated.
    pub allocated_amount: Decimal,
    /// Amount reserved up front, if any.
    pub reserved_amount: Decimal,
}

/// Budget repository.
#[derive(Debug, Clone)]
pub struct BudgetRepository {
    db: DatabaseConnection,
}

impl BudgetRepository {
    /// Creates a new budget repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a budget with zeroed spend/commitment ledger columns.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn create_budget(
        &self,
        input: CreateBudgetInput,
    ) -> Result<budgets::Model, FinanceError> {
        let now = Utc::now();

        let budget = budgets::ActiveModel {
            id: Set(Uuid::new_v4()),
            organization_id: Set(input.organization_id),
            name: Set(input.name),
            category: Set(input.category),
            period_start: Set(input.period_start),
            period_end: Set(input.period_end),
            allocated_amount: Set(input.allocated_amount),
            actual_spent: Set(Decimal::ZERO),
            committed_amount: Set(Decimal::ZERO),
            reserved_amount: Set(input.reserved_amount),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        };

        let created = budget.insert(&self.db).await.map_err(db_err)?;
        info!(
            organization_id = %created.organization_id,
            budget_id = %created.id,
            name = %created.name,
            "Budget created"
        );
        Ok(created)
    }

    /// Lists budgets for an organization, newest period first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_budgets(
        &self,
        organization_id: Uuid,
    ) -> Result<Vec<budgets::Model>, FinanceError> {
        budgets::Entity::find()
            .filter(budgets::Column::OrganizationId.eq(organization_id))
            .order_by_desc(budgets::Column::PeriodStart)
            .all(&self.db)
            .await
            .map_err(db_err)
    }

    /// Gets a budget by ID within an organization.
    ///
    /// # Errors
    ///
    /// Returns an error if the budget is not found or the query fails.
    pub async fn get_budget(
        &self,
        organization_id: Uuid,
        budget_id: Uuid,
    ) -> Result<budgets::Model, FinanceError> {
        budgets::Entity::find_by_id(budget_id)
            .filter(budgets::Column::OrganizationId.eq(organization_id))
            .one(&self.db)
            .await
            .map_err(db_err)?
            .ok_or(FinanceError::BudgetNotFound(budget_id))
    }
}

/// Extracts the ledger figures of a budget row for availability math.
#[must_use]
pub fn figures(budget: &budgets::Model) -> BudgetFigures {
    BudgetFigures {
        allocated_amount: budget.allocated_amount,
        actual_spent: budget.actual_spent,
        committed_amount: budget.committed_amount,
        reserved_amount: budget.reserved_amount,
    }
}
