//! `SeaORM` entity definitions.

pub mod budgets;
pub mod organizations;
pub mod sea_orm_active_enums;
pub mod transactions;
pub mod vendors;
