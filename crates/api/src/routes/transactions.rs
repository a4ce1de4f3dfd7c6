//! Transaction lifecycle routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::routes::{check_policy, error_response};
use crate::{AppState, middleware::AuthUser};
use leaguehq_core::finance::{
    self, FinanceError, RawListQuery, TransactionPayload, parse_monetary_amount,
    parse_query_params, validate_transaction_data,
};
use leaguehq_db::{TransactionRepository, entities::transactions};
use leaguehq_db::repositories::transaction::CreateTransactionInput;
use leaguehq_shared::types::PageResponse;

/// Creates the transaction routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/organizations/{org_id}/transactions", get(list_transactions))
        .route("/organizations/{org_id}/transactions", post(create_transaction))
        .route(
            "/organizations/{org_id}/transactions/{transaction_id}",
            get(get_transaction),
        )
        .route(
            "/organizations/{org_id}/transactions/{transaction_id}/status",
            post(change_status),
        )
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request body for creating a transaction.
///
/// The payload fields arrive loosely typed and go through the collect-all
/// validator before anything is parsed for real.
#[derive(Debug, Deserialize)]
pub struct CreateTransactionRequest {
    /// Candidate transaction fields.
    #[serde(flatten)]
    pub payload: TransactionPayload,
    /// Submit straight to approval instead of starting in draft.
    #[serde(default)]
    pub submit_for_approval: bool,
}

/// Request body for a status change.
#[derive(Debug, Deserialize)]
pub struct ChangeStatusRequest {
    /// Target status.
    pub status: String,
}

/// Response for a transaction.
#[derive(Debug, Serialize)]
pub struct TransactionResponse {
    /// Transaction ID.
    pub id: Uuid,
    /// Generated transaction number.
    pub transaction_number: String,
    /// Transaction type.
    pub transaction_type: &'static str,
    /// Monetary amount as a decimal string.
    pub amount: String,
    /// Description.
    pub description: String,
    /// Transaction date.
    pub transaction_date: String,
    /// Lifecycle status.
    pub status: &'static str,
    /// Budget charged, if any.
    pub budget_id: Option<Uuid>,
    /// Vendor reference, if any.
    pub vendor_id: Option<Uuid>,
    /// Created by user ID.
    pub created_by: Uuid,
    /// Created at timestamp.
    pub created_at: String,
    /// Updated at timestamp.
    pub updated_at: String,
}

impl From<transactions::Model> for TransactionResponse {
    fn from(model: transactions::Model) -> Self {
        let transaction_type: finance::TransactionType = model.transaction_type.into();
        let status: finance::TransactionStatus = model.status.into();
        Self {
            id: model.id,
            transaction_number: model.transaction_number,
            transaction_type: transaction_type.as_str(),
            amount: model.amount.to_string(),
            description: model.description,
            transaction_date: model.transaction_date.to_string(),
            status: status.as_str(),
            budget_id: model.budget_id,
            vendor_id: model.vendor_id,
            created_by: model.created_by,
            created_at: model.created_at.to_rfc3339(),
            updated_at: model.updated_at.to_rfc3339(),
        }
    }
}

// ============================================================================
// Route Handlers
// ============================================================================

/// POST `/organizations/{org_id}/transactions` - Create a transaction.
async fn create_transaction(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(org_id): Path<Uuid>,
    Json(request): Json<CreateTransactionRequest>,
) -> impl IntoResponse {
    if let Err(response) = check_policy(&state, auth, org_id, "transaction:create").await {
        return response;
    }

    let errors = validate_transaction_data(&request.payload);
    if !errors.is_empty() {
        return error_response(&FinanceError::ValidationFailed(errors));
    }

    // Past the validator these parses cannot fail for type and IDs; the
    // date format is the one rule the validator does not cover.
    let Some(transaction_type) = request
        .payload
        .transaction_type
        .as_deref()
        .and_then(finance::TransactionType::parse)
    else {
        return error_response(&FinanceError::ValidationFailed(vec![
            "Invalid transaction type".to_string(),
        ]));
    };
    let Some(transaction_date) = request
        .payload
        .transaction_date
        .as_deref()
        .and_then(|d| d.trim().parse().ok())
    else {
        return error_response(&FinanceError::ValidationFailed(vec![
            "Invalid transaction date format".to_string(),
        ]));
    };
    let amount = request
        .payload
        .amount
        .as_ref()
        .map_or(rust_decimal::Decimal::ZERO, parse_monetary_amount);
    let budget_id = request
        .payload
        .budget_id
        .as_deref()
        .and_then(|id| Uuid::parse_str(id).ok());
    let vendor_id = request
        .payload
        .vendor_id
        .as_deref()
        .and_then(|id| Uuid::parse_str(id).ok());

    let repo = TransactionRepository::new((*state.db).clone());
    let input = CreateTransactionInput {
        organization_id: org_id,
        transaction_type,
        amount,
        description: request.payload.description.unwrap_or_default(),
        transaction_date,
        submit_for_approval: request.submit_for_approval,
        budget_id,
        vendor_id,
        created_by: auth.user_id(),
    };

    match repo.create_transaction(input).await {
        Ok(model) => (
            StatusCode::CREATED,
            Json(TransactionResponse::from(model)),
        )
            .into_response(),
        Err(e) => error_response(&e),
    }
}

/// GET `/organizations/{org_id}/transactions` - List with filters.
async fn list_transactions(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(org_id): Path<Uuid>,
    Query(raw): Query<RawListQuery>,
) -> impl IntoResponse {
    if let Err(response) = check_policy(&state, auth, org_id, "transaction:read").await {
        return response;
    }

    let query = parse_query_params(&raw);
    let repo = TransactionRepository::new((*state.db).clone());

    match repo.list_transactions(org_id, &query).await {
        Ok((rows, total)) => {
            let items: Vec<TransactionResponse> =
                rows.into_iter().map(TransactionResponse::from).collect();
            (
                StatusCode::OK,
                Json(PageResponse::new(items, query.page, query.limit, total)),
            )
                .into_response()
        }
        Err(e) => error_response(&e),
    }
}

/// GET `/organizations/{org_id}/transactions/{transaction_id}` - Fetch one.
async fn get_transaction(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((org_id, transaction_id)): Path<(Uuid, Uuid)>,
) -> impl IntoResponse {
    if let Err(response) = check_policy(&state, auth, org_id, "transaction:read").await {
        return response;
    }

    let repo = TransactionRepository::new((*state.db).clone());
    match repo.get_transaction(org_id, transaction_id).await {
        Ok(model) => (StatusCode::OK, Json(TransactionResponse::from(model))).into_response(),
        Err(e) => error_response(&e),
    }
}

/// POST `/organizations/{org_id}/transactions/{transaction_id}/status` -
/// Apply a lifecycle transition.
async fn change_status(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((org_id, transaction_id)): Path<(Uuid, Uuid)>,
    Json(request): Json<ChangeStatusRequest>,
) -> impl IntoResponse {
    if let Err(response) = check_policy(&state, auth, org_id, "transaction:transition").await {
        return response;
    }

    let Some(to) = finance::TransactionStatus::parse(&request.status) else {
        return error_response(&FinanceError::UnknownStatus(request.status));
    };

    let repo = TransactionRepository::new((*state.db).clone());
    match repo.transition_status(org_id, transaction_id, to).await {
        Ok(model) => (StatusCode::OK, Json(TransactionResponse::from(model))).into_response(),
        Err(e) => error_response(&e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};
    use leaguehq_db::entities::sea_orm_active_enums;
    use rust_decimal_macros::dec;
    use serde_json::json;

    fn model() -> transactions::Model {
        let now = Utc::now();
        transactions::Model {
            id: Uuid::new_v4(),
            organization_id: Uuid::new_v4(),
            transaction_number: "EXP-2024-000007".to_string(),
            transaction_type: sea_orm_active_enums::TransactionType::Expense,
            amount: dec!(150.25),
            description: "Field rental".to_string(),
            transaction_date: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
            status: sea_orm_active_enums::TransactionStatus::PendingApproval,
            budget_id: None,
            vendor_id: None,
            created_by: Uuid::new_v4(),
            created_at: now.into(),
            updated_at: now.into(),
        }
    }

    #[test]
    fn test_response_uses_wire_names() {
        let response = TransactionResponse::from(model());
        assert_eq!(response.transaction_type, "expense");
        assert_eq!(response.status, "pending_approval");
        assert_eq!(response.amount, "150.25");
        assert_eq!(response.transaction_date, "2024-03-15");
    }

    #[test]
    fn test_create_request_flattens_payload() {
        let request: CreateTransactionRequest = serde_json::from_value(json!({
            "transaction_type": "expense",
            "amount": "99.99",
            "description": "Referee fees",
            "transaction_date": "2024-03-15",
            "submit_for_approval": true
        }))
        .unwrap();

        assert!(request.submit_for_approval);
        assert_eq!(request.payload.transaction_type.as_deref(), Some("expense"));
        assert!(validate_transaction_data(&request.payload).is_empty());
    }

    #[test]
    fn test_submit_flag_defaults_to_false() {
        let request: CreateTransactionRequest = serde_json::from_value(json!({
            "transaction_type": "expense",
            "amount": 10,
            "description": "x",
            "transaction_date": "2024-03-15"
        }))
        .unwrap();
        assert!(!request.submit_for_approval);
    }
}
