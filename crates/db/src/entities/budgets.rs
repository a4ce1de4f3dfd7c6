//! `SeaORM` Entity for the budgets table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A budget envelope with its ledger columns.
///
/// The ledger invariant `available = allocated - spent - committed -
/// reserved` is maintained exclusively by the transaction repository;
/// callers never mutate these columns directly.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "budgets")]
pub struct Model {
    /// Primary key.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Owning organization.
    pub organization_id: Uuid,
    /// Display name.
    pub name: String,
    /// Budget category (e.g. equipment, travel, officials).
    pub category: Option<String>,
    /// Period start date.
    pub period_start: Date,
    /// Period end date.
    pub period_end: Date,
    /// Total amount allocated.
    pub allocated_amount: Decimal,
    /// Amount actually spent (posted transactions).
    pub actual_spent: Decimal,
    /// Amount committed by not-yet-posted transactions.
    pub committed_amount: Decimal,
    /// Amount reserved outside the transaction lifecycle.
    pub reserved_amount: Decimal,
    /// Creation timestamp.
    pub created_at: DateTimeWithTimeZone,
    /// Last update timestamp.
    pub updated_at: DateTimeWithTimeZone,
}

/// Entity relations.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Owning organization.
    #[sea_orm(
        belongs_to = "super::organizations::Entity",
        from = "Column::OrganizationId",
        to = "super::organizations::Column::Id"
    )]
    Organizations,
    /// Transactions charged to this budget.
    #[sea_orm(has_many = "super::transactions::Entity")]
    Transactions,
}

impl Related<super::organizations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Organizations.def()
    }
}

impl Related<super::transactions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Transactions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
