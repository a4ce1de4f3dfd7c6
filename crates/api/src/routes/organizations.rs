//! Organization routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::routes::{app_error_response, check_policy};
use crate::{AppState, middleware::AuthUser};
use leaguehq_db::OrganizationRepository;
use leaguehq_db::entities::organizations;
use leaguehq_shared::AppError;

/// Creates the organization routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/organizations", post(create_organization))
        .route("/organizations", get(list_organizations))
        .route("/organizations/{org_id}", get(get_organization))
}

/// Request body for creating an organization.
#[derive(Debug, Deserialize)]
pub struct CreateOrganizationRequest {
    /// Display name of the organization.
    pub name: Option<String>,
}

/// Response for an organization.
#[derive(Debug, Serialize)]
pub struct OrganizationResponse {
    /// Organization ID.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Created at timestamp.
    pub created_at: String,
}

impl From<organizations::Model> for OrganizationResponse {
    fn from(model: organizations::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            created_at: model.created_at.to_rfc3339(),
        }
    }
}

/// POST `/organizations` - Create an organization.
///
/// Any authenticated user may create an organization; there is no
/// organization scope to consult the policy service about yet.
async fn create_organization(
    State(state): State<AppState>,
    _auth: AuthUser,
    Json(payload): Json<CreateOrganizationRequest>,
) -> impl IntoResponse {
    let name = payload.name.map(|n| n.trim().to_string());
    let Some(name) = name.filter(|n| !n.is_empty()) else {
        return app_error_response(&AppError::Validation(
            "Organization name is required".to_string(),
        ));
    };

    let repo = OrganizationRepository::new((*state.db).clone());
    match repo.create_organization(name).await {
        Ok(model) => (
            StatusCode::CREATED,
            Json(OrganizationResponse::from(model)),
        )
            .into_response(),
        Err(e) => app_error_response(&e),
    }
}

/// GET `/organizations` - List organizations.
async fn list_organizations(State(state): State<AppState>, _auth: AuthUser) -> impl IntoResponse {
    let repo = OrganizationRepository::new((*state.db).clone());
    match repo.list_organizations().await {
        Ok(models) => {
            let items: Vec<OrganizationResponse> =
                models.into_iter().map(OrganizationResponse::from).collect();
            (StatusCode::OK, Json(items)).into_response()
        }
        Err(e) => app_error_response(&e),
    }
}

/// GET `/organizations/{org_id}` - Get an organization.
async fn get_organization(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(org_id): Path<Uuid>,
) -> impl IntoResponse {
    if let Err(response) = check_policy(&state, auth, org_id, "organization:read").await {
        return response;
    }

    let repo = OrganizationRepository::new((*state.db).clone());
    match repo.get_organization(org_id).await {
        Ok(model) => (StatusCode::OK, Json(OrganizationResponse::from(model))).into_response(),
        Err(e) => app_error_response(&e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_organization_response_mapping() {
        let now = Utc::now();
        let id = Uuid::new_v4();
        let response = OrganizationResponse::from(organizations::Model {
            id,
            name: "Riverside Youth League".to_string(),
            created_at: now.into(),
            updated_at: now.into(),
        });
        assert_eq!(response.id, id);
        assert_eq!(response.name, "Riverside Youth League");
    }

    #[test]
    fn test_create_request_accepts_missing_name() {
        let request: CreateOrganizationRequest = serde_json::from_str("{}").unwrap();
        assert!(request.name.is_none());
    }
}
