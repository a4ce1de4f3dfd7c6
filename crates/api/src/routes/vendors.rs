//! Vendor routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use serde::Serialize;
use uuid::Uuid;

use crate::routes::{check_policy, error_response};
use crate::{AppState, middleware::AuthUser};
use leaguehq_core::finance::{FinanceError, VendorPayload, validate_vendor_data};
use leaguehq_db::VendorRepository;
use leaguehq_db::entities::vendors;
use leaguehq_db::repositories::vendor::CreateVendorInput;

/// Creates the vendor routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/organizations/{org_id}/vendors", get(list_vendors))
        .route("/organizations/{org_id}/vendors", post(create_vendor))
        .route(
            "/organizations/{org_id}/vendors/{vendor_id}",
            get(get_vendor),
        )
}

/// Response for a vendor.
#[derive(Debug, Serialize)]
pub struct VendorResponse {
    /// Vendor ID.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Contact email.
    pub email: Option<String>,
    /// Contact phone.
    pub phone: Option<String>,
    /// Whether the vendor is active.
    pub is_active: bool,
    /// Created at timestamp.
    pub created_at: String,
}

impl From<vendors::Model> for VendorResponse {
    fn from(model: vendors::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            email: model.email,
            phone: model.phone,
            is_active: model.is_active,
            created_at: model.created_at.to_rfc3339(),
        }
    }
}

/// POST `/organizations/{org_id}/vendors` - Create a vendor.
async fn create_vendor(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(org_id): Path<Uuid>,
    Json(payload): Json<VendorPayload>,
) -> impl IntoResponse {
    if let Err(response) = check_policy(&state, auth, org_id, "vendor:create").await {
        return response;
    }

    let errors = validate_vendor_data(&payload);
    if !errors.is_empty() {
        return error_response(&FinanceError::ValidationFailed(errors));
    }
    let Some(name) = payload.name else {
        return error_response(&FinanceError::ValidationFailed(vec![
            "Vendor name is required".to_string(),
        ]));
    };

    let repo = VendorRepository::new((*state.db).clone());
    let input = CreateVendorInput {
        organization_id: org_id,
        name: name.trim().to_string(),
        email: payload.email,
        phone: payload.phone,
    };

    match repo.create_vendor(input).await {
        Ok(model) => (StatusCode::CREATED, Json(VendorResponse::from(model))).into_response(),
        Err(e) => error_response(&e),
    }
}

/// GET `/organizations/{org_id}/vendors` - List vendors.
async fn list_vendors(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(org_id): Path<Uuid>,
) -> impl IntoResponse {
    if let Err(response) = check_policy(&state, auth, org_id, "vendor:read").await {
        return response;
    }

    let repo = VendorRepository::new((*state.db).clone());
    match repo.list_vendors(org_id).await {
        Ok(models) => {
            let items: Vec<VendorResponse> =
                models.into_iter().map(VendorResponse::from).collect();
            (StatusCode::OK, Json(items)).into_response()
        }
        Err(e) => error_response(&e),
    }
}

/// GET `/organizations/{org_id}/vendors/{vendor_id}` - Get a vendor.
async fn get_vendor(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((org_id, vendor_id)): Path<(Uuid, Uuid)>,
) -> impl IntoResponse {
    if let Err(response) = check_policy(&state, auth, org_id, "vendor:read").await {
        return response;
    }

    let repo = VendorRepository::new((*state.db).clone());
    match repo.get_vendor(org_id, vendor_id).await {
        Ok(model) => (StatusCode::OK, Json(VendorResponse::from(model))).into_response(),
        Err(e) => error_response(&e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_vendor_response_mapping() {
        let now = Utc::now();
        let response = VendorResponse::from(vendors::Model {
            id: Uuid::new_v4(),
            organization_id: Uuid::new_v4(),
            name: "Acme Field Services".to_string(),
            email: Some("billing@acme.example".to_string()),
            phone: None,
            is_active: true,
            created_at: now.into(),
            updated_at: now.into(),
        });
        assert_eq!(response.name, "Acme Field Services");
        assert!(response.is_active);
    }
}
