//! Organization repository.
//!
//! Organizations are the tenant boundary; they fail with the shared
//! application errors rather than the finance taxonomy.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};
use tracing::info;
use uuid::Uuid;

use leaguehq_shared::{AppError, AppResult};

use crate::entities::organizations;

/// Organization repository.
#[derive(Debug, Clone)]
pub struct OrganizationRepository {
    db: DatabaseConnection,
}

impl OrganizationRepository {
    /// Creates a new organization repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates an organization.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn create_organization(&self, name: String) -> AppResult<organizations::Model> {
        let now = Utc::now();

        let organization = organizations::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        };

        let created = organization
            .insert(&self.db)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        info!(organization_id = %created.id, name = %created.name, "Organization created");
        Ok(created)
    }

    /// Gets an organization by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the organization is not found or the query fails.
    pub async fn get_organization(&self, organization_id: Uuid) -> AppResult<organizations::Model> {
        organizations::Entity::find_by_id(organization_id)
            .one(&self.db)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?
            .ok_or_else(|| AppError::NotFound(format!("Organization {organization_id}")))
    }

    /// Lists all organizations, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_organizations(&self) -> AppResult<Vec<organizations::Model>> {
        organizations::Entity::find()
            .order_by_asc(organizations::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}
