//! Budget routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::routes::{check_policy, error_response};
use crate::{AppState, middleware::AuthUser};
use leaguehq_core::finance::{FinanceError, available_budget, parse_monetary_amount};
use leaguehq_db::BudgetRepository;
use leaguehq_db::entities::budgets;
use leaguehq_db::repositories::budget::{CreateBudgetInput, figures};

/// Creates the budget routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/organizations/{org_id}/budgets", get(list_budgets))
        .route("/organizations/{org_id}/budgets", post(create_budget))
        .route("/organizations/{org_id}/budgets/{budget_id}", get(get_budget))
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request body for creating a budget.
#[derive(Debug, Deserialize)]
pub struct CreateBudgetRequest {
    /// Display name.
    pub name: Option<String>,
    /// Budget category.
    pub category: Option<String>,
    /// Period start date.
    pub period_start: Option<NaiveDate>,
    /// Period end date.
    pub period_end: Option<NaiveDate>,
    /// Allocated amount (number or numeric string).
    pub allocated_amount: Option<Value>,
    /// Reserved amount (number or numeric string).
    pub reserved_amount: Option<Value>,
}

/// Response for a budget, including the computed available figure.
#[derive(Debug, Serialize)]
pub struct BudgetResponse {
    /// Budget ID.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Budget category.
    pub category: Option<String>,
    /// Period start date.
    pub period_start: String,
    /// Period end date.
    pub period_end: String,
    /// Allocated amount.
    pub allocated_amount: String,
    /// Actual spent.
    pub actual_spent: String,
    /// Committed amount.
    pub committed_amount: String,
    /// Reserved amount.
    pub reserved_amount: String,
    /// Available headroom (allocated - spent - committed - reserved).
    pub available: String,
    /// Created at timestamp.
    pub created_at: String,
    /// Updated at timestamp.
    pub updated_at: String,
}

impl From<budgets::Model> for BudgetResponse {
    fn from(model: budgets::Model) -> Self {
        let available = available_budget(&figures(&model));
        Self {
            id: model.id,
            name: model.name,
            category: model.category,
            period_start: model.period_start.to_string(),
            period_end: model.period_end.to_string(),
            allocated_amount: model.allocated_amount.to_string(),
            actual_spent: model.actual_spent.to_string(),
            committed_amount: model.committed_amount.to_string(),
            reserved_amount: model.reserved_amount.to_string(),
            available: available.to_string(),
            created_at: model.created_at.to_rfc3339(),
            updated_at: model.updated_at.to_rfc3339(),
        }
    }
}

/// Validates a budget creation request, returning every failed rule.
fn validate_budget_request(request: &CreateBudgetRequest) -> Vec<String> {
    let mut errors = Vec::new();

    if !request
        .name
        .as_deref()
        .is_some_and(|n| !n.trim().is_empty())
    {
        errors.push("Budget name is required".to_string());
    }

    match (request.period_start, request.period_end) {
        (Some(start), Some(end)) if end < start => {
            errors.push("Budget period end must not precede start".to_string());
        }
        (Some(_), Some(_)) => {}
        _ => errors.push("Budget period is required".to_string()),
    }

    let allocated = request
        .allocated_amount
        .as_ref()
        .map_or(Decimal::ZERO, parse_monetary_amount);
    if allocated < Decimal::ZERO {
        errors.push("Allocated amount must not be negative".to_string());
    }

    let reserved = request
        .reserved_amount
        .as_ref()
        .map_or(Decimal::ZERO, parse_monetary_amount);
    if reserved < Decimal::ZERO {
        errors.push("Reserved amount must not be negative".to_string());
    }

    errors
}

// ============================================================================
// Route Handlers
// ============================================================================

/// POST `/organizations/{org_id}/budgets` - Create a budget.
async fn create_budget(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(org_id): Path<Uuid>,
    Json(request): Json<CreateBudgetRequest>,
) -> impl IntoResponse {
    if let Err(response) = check_policy(&state, auth, org_id, "budget:create").await {
        return response;
    }

    let errors = validate_budget_request(&request);
    if !errors.is_empty() {
        return error_response(&FinanceError::ValidationFailed(errors));
    }

    let (Some(name), Some(period_start), Some(period_end)) =
        (request.name, request.period_start, request.period_end)
    else {
        return error_response(&FinanceError::ValidationFailed(vec![
            "Budget name is required".to_string(),
        ]));
    };

    let repo = BudgetRepository::new((*state.db).clone());
    let input = CreateBudgetInput {
        organization_id: org_id,
        name: name.trim().to_string(),
        category: request.category,
        period_start,
        period_end,
        allocated_amount: request
            .allocated_amount
            .as_ref()
            .map_or(Decimal::ZERO, parse_monetary_amount),
        reserved_amount: request
            .reserved_amount
            .as_ref()
            .map_or(Decimal::ZERO, parse_monetary_amount),
    };

    match repo.create_budget(input).await {
        Ok(model) => (StatusCode::CREATED, Json(BudgetResponse::from(model))).into_response(),
        Err(e) => error_response(&e),
    }
}

/// GET `/organizations/{org_id}/budgets` - List budgets.
async fn list_budgets(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(org_id): Path<Uuid>,
) -> impl IntoResponse {
    if let Err(response) = check_policy(&state, auth, org_id, "budget:read").await {
        return response;
    }

    let repo = BudgetRepository::new((*state.db).clone());
    match repo.list_budgets(org_id).await {
        Ok(models) => {
            let items: Vec<BudgetResponse> =
                models.into_iter().map(BudgetResponse::from).collect();
            (StatusCode::OK, Json(items)).into_response()
        }
        Err(e) => error_response(&e),
    }
}

/// GET `/organizations/{org_id}/budgets/{budget_id}` - Fetch one budget.
async fn get_budget(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((org_id, budget_id)): Path<(Uuid, Uuid)>,
) -> impl IntoResponse {
    if let Err(response) = check_policy(&state, auth, org_id, "budget:read").await {
        return response;
    }

    let repo = BudgetRepository::new((*state.db).clone());
    match repo.get_budget(org_id, budget_id).await {
        Ok(model) => (StatusCode::OK, Json(BudgetResponse::from(model))).into_response(),
        Err(e) => error_response(&e),
    }
}
