//! Field-level business rule validation for inbound payloads.
//!
//! Validators collect every failed rule instead of short-circuiting: the
//! result is an ordered list of human-readable messages, and an empty list
//! means the payload is acceptable. All rules are independent predicates.

use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;
use uuid::Uuid;
use validator::ValidateEmail;

use super::amount::parse_monetary_amount;
use super::types::is_valid_transaction_type;

/// Candidate transaction payload, as received on the wire.
///
/// `amount` is kept as a raw JSON value so that numeric strings from older
/// clients flow through the tolerant parser instead of failing
/// deserialization.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TransactionPayload {
    /// Transaction type string.
    pub transaction_type: Option<String>,
    /// Monetary amount (number or numeric string).
    pub amount: Option<Value>,
    /// Human-readable description.
    pub description: Option<String>,
    /// Transaction date (ISO 8601 date).
    pub transaction_date: Option<String>,
    /// Budget to charge, if any.
    pub budget_id: Option<String>,
    /// Vendor reference, if any.
    pub vendor_id: Option<String>,
}

/// Candidate vendor payload.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VendorPayload {
    /// Vendor display name.
    pub name: Option<String>,
    /// Contact email.
    pub email: Option<String>,
    /// Contact phone.
    pub phone: Option<String>,
}

/// Maximum accepted vendor name length.
pub const VENDOR_NAME_MAX_LEN: usize = 200;

/// Validates a transaction payload, returning every failed rule.
#[must_use]
pub fn validate_transaction_data(payload: &TransactionPayload) -> Vec<String> {
    let mut errors = Vec::new();

    if !payload
        .transaction_type
        .as_deref()
        .is_some_and(is_valid_transaction_type)
    {
        errors.push("Invalid transaction type".to_string());
    }

    let amount = payload
        .amount
        .as_ref()
        .map_or(Decimal::ZERO, parse_monetary_amount);
    if amount <= Decimal::ZERO {
        errors.push("Amount must be greater than 0".to_string());
    }

    if !payload
        .description
        .as_deref()
        .is_some_and(|d| !d.trim().is_empty())
    {
        errors.push("Description is required".to_string());
    }

    if payload.transaction_date.is_none() {
        errors.push("Transaction date is required".to_string());
    }

    if let Some(budget_id) = payload.budget_id.as_deref()
        && Uuid::parse_str(budget_id).is_err()
    {
        errors.push("Invalid budget ID format".to_string());
    }

    if let Some(vendor_id) = payload.vendor_id.as_deref()
        && Uuid::parse_str(vendor_id).is_err()
    {
        errors.push("Invalid vendor ID format".to_string());
    }

    errors
}

/// Validates a vendor payload, returning every failed rule.
#[must_use]
pub fn validate_vendor_data(payload: &VendorPayload) -> Vec<String> {
    let mut errors = Vec::new();

    match payload.name.as_deref().map(str::trim) {
        None | Some("") => errors.push("Vendor name is required".to_string()),
        Some(name) if name.chars().count() > VENDOR_NAME_MAX_LEN => {
            errors.push("Vendor name cannot exceed 200 characters".to_string());
        }
        Some(_) => {}
    }

    if let Some(email) = payload.email.as_deref()
        && !email.validate_email()
    {
        errors.push("Invalid email format".to_string());
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_transaction() -> TransactionPayload {
        TransactionPayload {
            transaction_type: Some("expense".to_string()),
            amount: Some(json!(100.5)),
            description: Some("Test".to_string()),
            transaction_date: Some("2024-01-15".to_string()),
            budget_id: None,
            vendor_id: None,
        }
    }

    #[test]
    fn test_valid_transaction_has_no_errors() {
        assert!(validate_transaction_data(&valid_transaction()).is_empty());
    }

    #[test]
    fn test_negative_amount() {
        let mut payload = valid_transaction();
        payload.amount = Some(json!(-100));
        let errors = validate_transaction_data(&payload);
        assert!(errors.contains(&"Amount must be greater than 0".to_string()));
    }

    #[test]
    fn test_unparseable_amount_rejected_as_non_positive() {
        let mut payload = valid_transaction();
        payload.amount = Some(json!("not a number"));
        let errors = validate_transaction_data(&payload);
        assert!(errors.contains(&"Amount must be greater than 0".to_string()));
    }

    #[test]
    fn test_empty_description() {
        let mut payload = valid_transaction();
        payload.description = Some("   ".to_string());
        let errors = validate_transaction_data(&payload);
        assert!(errors.contains(&"Description is required".to_string()));
    }

    #[test]
    fn test_missing_date() {
        let mut payload = valid_transaction();
        payload.transaction_date = None;
        let errors = validate_transaction_data(&payload);
        assert!(errors.contains(&"Transaction date is required".to_string()));
    }

    #[test]
    fn test_invalid_type_is_case_sensitive() {
        let mut payload = valid_transaction();
        payload.transaction_type = Some("EXPENSE".to_string());
        let errors = validate_transaction_data(&payload);
        assert!(errors.contains(&"Invalid transaction type".to_string()));
    }

    #[test]
    fn test_malformed_budget_id() {
        let mut payload = valid_transaction();
        payload.budget_id = Some("not-a-uuid".to_string());
        let errors = validate_transaction_data(&payload);
        assert!(errors.contains(&"Invalid budget ID format".to_string()));
    }

    #[test]
    fn test_well_formed_budget_id_accepted() {
        let mut payload = valid_transaction();
        payload.budget_id = Some(Uuid::new_v4().to_string());
        assert!(validate_transaction_data(&payload).is_empty());
    }

    #[test]
    fn test_all_rules_are_collected() {
        let errors = validate_transaction_data(&TransactionPayload::default());
        assert_eq!(
            errors,
            vec![
                "Invalid transaction type".to_string(),
                "Amount must be greater than 0".to_string(),
                "Description is required".to_string(),
                "Transaction date is required".to_string(),
            ]
        );
    }

    #[test]
    fn test_vendor_name_required() {
        let errors = validate_vendor_data(&VendorPayload::default());
        assert_eq!(errors, vec!["Vendor name is required".to_string()]);
    }

    #[test]
    fn test_vendor_name_too_long() {
        let payload = VendorPayload {
            name: Some("x".repeat(201)),
            ..Default::default()
        };
        let errors = validate_vendor_data(&payload);
        assert_eq!(
            errors,
            vec!["Vendor name cannot exceed 200 characters".to_string()]
        );
    }

    #[test]
    fn test_vendor_name_at_limit_accepted() {
        let payload = VendorPayload {
            name: Some("x".repeat(200)),
            ..Default::default()
        };
        assert!(validate_vendor_data(&payload).is_empty());
    }

    #[test]
    fn test_vendor_invalid_email() {
        let payload = VendorPayload {
            name: Some("Acme Field Services".to_string()),
            email: Some("not-an-email".to_string()),
            ..Default::default()
        };
        let errors = validate_vendor_data(&payload);
        assert_eq!(errors, vec!["Invalid email format".to_string()]);
    }

    #[test]
    fn test_vendor_valid_email() {
        let payload = VendorPayload {
            name: Some("Acme Field Services".to_string()),
            email: Some("billing@acme.example".to_string()),
            phone: Some("+1 555 0100".to_string()),
        };
        assert!(validate_vendor_data(&payload).is_empty());
    }
}
