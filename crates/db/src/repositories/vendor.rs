//! Vendor repository.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    SqlErr,
};
use tracing::info;
use uuid::Uuid;

use leaguehq_core::finance::FinanceError;

use crate::entities::vendors;
use crate::repositories::db_err;

/// Input for creating a vendor.
#[derive(Debug, Clone)]
pub struct CreateVendorInput {
    /// Owning organization.
    pub organization_id: Uuid,
    /// Display name (validated by the caller: required, max 200 chars).
    pub name: String,
    /// Contact email.
    pub email: Option<String>,
    /// Contact phone.
    pub phone: Option<String>,
}

/// Vendor repository.
#[derive(Debug, Clone)]
pub struct VendorRepository {
    db: DatabaseConnection,
}

impl VendorRepository {
    /// Creates a new vendor repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a vendor. Name uniqueness within the organization is
    /// enforced by a unique constraint; a collision (including one lost
    /// to a concurrent insert) maps to a duplicate-name conflict.
    ///
    /// # Errors
    ///
    /// Returns an error if the name already exists in the organization or
    /// the database operation fails.
    pub async fn create_vendor(
        &self,
        input: CreateVendorInput,
    ) -> Result<vendors::Model, FinanceError> {
        let now = Utc::now();

        let vendor = vendors::ActiveModel {
            id: Set(Uuid::new_v4()),
            organization_id: Set(input.organization_id),
            name: Set(input.name.clone()),
            email: Set(input.email),
            phone: Set(input.phone),
            is_active: Set(true),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        };

        let created = match vendor.insert(&self.db).await {
            Ok(model) => model,
            Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                return Err(FinanceError::DuplicateVendorName(input.name));
            }
            Err(e) => return Err(db_err(e)),
        };

        info!(
            organization_id = %created.organization_id,
            vendor_id = %created.id,
            name = %created.name,
            "Vendor created"
        );
        Ok(created)
    }

    /// Lists vendors for an organization, alphabetically.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_vendors(
        &self,
        organization_id: Uuid,
    ) -> Result<Vec<vendors::Model>, FinanceError> {
        vendors::Entity::find()
            .filter(vendors::Column::OrganizationId.eq(organization_id))
            .order_by_asc(vendors::Column::Name)
            .all(&self.db)
            .await
            .map_err(db_err)
    }

    /// Gets a vendor by ID within an organization.
    ///
    /// # Errors
    ///
    /// Returns an error if the vendor is not found or the query fails.
    pub async fn get_vendor(
        &self,
        organization_id: Uuid,
        vendor_id: Uuid,
    ) -> Result<vendors::Model, FinanceError> {
        vendors::Entity::find_by_id(vendor_id)
            .filter(vendors::Column::OrganizationId.eq(organization_id))
            .one(&self.db)
            .await
            .map_err(db_err)?
            .ok_or(FinanceError::VendorNotFound(vendor_id))
    }
}
