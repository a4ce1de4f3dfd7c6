//! API route definitions.

use axum::{
    Json, Router,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::error;
use uuid::Uuid;

use crate::middleware::{AuthUser, PolicyError};
use crate::AppState;
use leaguehq_core::finance::FinanceError;
use leaguehq_shared::AppError;

pub mod budgets;
pub mod health;
pub mod organizations;
pub mod transactions;
pub mod vendors;

/// Creates the API router with all routes.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(organizations::routes())
        .merge(transactions::routes())
        .merge(budgets::routes())
        .merge(vendors::routes())
}

/// Maps a finance error to its HTTP response.
///
/// Validation failures carry the full message list; infrastructure errors
/// are logged and answered with a generic message.
pub(crate) fn error_response(e: &FinanceError) -> Response {
    let status =
        StatusCode::from_u16(e.http_status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    let body = match e {
        FinanceError::ValidationFailed(errors) => json!({
            "error": e.error_code(),
            "message": "Validation failed",
            "errors": errors,
        }),
        FinanceError::Database(_) => {
            error!(error = %e, "Request failed");
            json!({
                "error": e.error_code(),
                "message": "An error occurred",
            })
        }
        _ => json!({
            "error": e.error_code(),
            "message": e.to_string(),
        }),
    };

    (status, Json(body)).into_response()
}

/// Maps an application error to its HTTP response.
pub(crate) fn app_error_response(e: &AppError) -> Response {
    let status =
        StatusCode::from_u16(e.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    let body = match e {
        AppError::Database(_) | AppError::ExternalService(_) | AppError::Internal(_) => {
            error!(error = %e, "Request failed");
            json!({
                "error": e.error_code(),
                "message": "An error occurred",
            })
        }
        _ => json!({
            "error": e.error_code(),
            "message": e.to_string(),
        }),
    };

    (status, Json(body)).into_response()
}

/// Consults the policy-decision service, mapping deny to 403 and an
/// unreachable service to 500.
pub(crate) async fn check_policy(
    state: &AppState,
    auth: AuthUser,
    organization_id: Uuid,
    action: &str,
) -> Result<(), Response> {
    match state
        .policy
        .authorize(auth.user_id(), organization_id, action)
        .await
    {
        Ok(()) => Ok(()),
        Err(PolicyError::Denied(action)) => Err((
            StatusCode::FORBIDDEN,
            Json(json!({
                "error": "FORBIDDEN",
                "message": format!("Not allowed to perform {action}"),
            })),
        )
            .into_response()),
        Err(e @ PolicyError::Unavailable(_)) => {
            error!(error = %e, "Policy check failed");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": "EXTERNAL_SERVICE_ERROR",
                    "message": "An error occurred",
                })),
            )
                .into_response())
        }
    }
}
