//! Client for the external policy-decision service.
//!
//! Authorization decisions are delegated: handlers describe the caller,
//! the organization, and the action, and the service answers allow or
//! deny. Policy evaluation itself lives outside this codebase.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use uuid::Uuid;

use leaguehq_shared::config::PolicyConfig;

/// Errors from consulting the policy-decision service.
#[derive(Debug, Error)]
pub enum PolicyError {
    /// The service denied the action.
    #[error("Action denied by policy: {0}")]
    Denied(String),

    /// The service could not be reached or answered malformed.
    #[error("Policy service unavailable: {0}")]
    Unavailable(String),
}

/// Request body for a policy check.
#[derive(Debug, Serialize)]
struct CheckRequest<'a> {
    subject_id: Uuid,
    organization_id: Uuid,
    action: &'a str,
}

/// Response body from a policy check.
#[derive(Debug, Deserialize)]
struct CheckResponse {
    allow: bool,
}

/// Policy-decision service client.
#[derive(Debug, Clone)]
pub struct PolicyClient {
    client: reqwest::Client,
    check_url: String,
}

impl PolicyClient {
    /// Builds a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(config: &PolicyConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()?;
        Ok(Self {
            client,
            check_url: format!("{}/check", config.url.trim_end_matches('/')),
        })
    }

    /// Asks the service whether `subject` may perform `action` within the
    /// organization. Unreachable or malformed answers are failures, not
    /// implicit allows.
    ///
    /// # Errors
    ///
    /// Returns `PolicyError::Denied` on a deny decision and
    /// `PolicyError::Unavailable` when no decision could be obtained.
    pub async fn authorize(
        &self,
        subject_id: Uuid,
        organization_id: Uuid,
        action: &str,
    ) -> Result<(), PolicyError> {
        let request = CheckRequest {
            subject_id,
            organization_id,
            action,
        };

        let response = self
            .client
            .post(&self.check_url)
            .json(&request)
            .send()
            .await
            .map_err(|e| PolicyError::Unavailable(e.to_string()))?;

        let decision: CheckResponse = response
            .error_for_status()
            .map_err(|e| PolicyError::Unavailable(e.to_string()))?
            .json()
            .await
            .map_err(|e| PolicyError::Unavailable(e.to_string()))?;

        if decision.allow {
            Ok(())
        } else {
            Err(PolicyError::Denied(action.to_string()))
        }
    }
}
