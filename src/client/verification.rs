//! Client for the external email verification API (ZeroBounce v2).
//!
//! One GET per address, no retries. Every failure mode is reported as a
//! `VerificationError` so the validator can decide to fall back.

use crate::config::{Config, DEFAULT_VERIFICATION_API_URL};
use crate::domain::EmailAddress;
use crate::error::{VerificationError, VerificationResult};
use crate::models::{EmailStatus, EmailValidationResult};
use async_trait::async_trait;
use serde::{Deserialize, Deserializer};
use std::sync::Arc;
use std::time::Duration;

/// The provider sends `""` for absent diagnostics; treat those as missing.
fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}

/// Body of a successful `/validate` response.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct VerificationResponse {
    pub status: EmailStatus,

    #[serde(default, deserialize_with = "empty_as_none")]
    pub sub_status: Option<String>,

    #[serde(default, deserialize_with = "empty_as_none")]
    pub account: Option<String>,

    #[serde(default, deserialize_with = "empty_as_none")]
    pub domain: Option<String>,

    #[serde(default, deserialize_with = "empty_as_none")]
    pub did_you_mean: Option<String>,

    #[serde(default)]
    pub disposable: Option<bool>,

    #[serde(default)]
    pub toxic: Option<bool>,

    #[serde(default, rename = "firstname", deserialize_with = "empty_as_none")]
    pub first_name: Option<String>,

    #[serde(default, rename = "lastname", deserialize_with = "empty_as_none")]
    pub last_name: Option<String>,

    #[serde(default, deserialize_with = "empty_as_none")]
    pub gender: Option<String>,

    #[serde(default, deserialize_with = "empty_as_none")]
    pub location: Option<String>,

    #[serde(default)]
    pub credits_used: Option<u32>,
}

impl From<VerificationResponse> for EmailValidationResult {
    fn from(response: VerificationResponse) -> Self {
        Self {
            is_valid: response.status.is_deliverable(),
            status: response.status,
            sub_status: response.sub_status,
            account: response.account,
            domain: response.domain,
            did_you_mean: response.did_you_mean,
            disposable: response.disposable,
            toxic: response.toxic,
            first_name: response.first_name,
            last_name: response.last_name,
            gender: response.gender,
            location: response.location,
            credits_used: response.credits_used,
            error: None,
        }
    }
}

/// Blocking HTTP client for the verification endpoint.
#[derive(Clone)]
pub struct VerificationClient {
    base_url: String,
    agent: Arc<ureq::Agent>,
}

impl VerificationClient {
    pub fn new(config: &Config) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(config.request_timeout))
            .build();

        Self {
            base_url: config.verification_api_url.clone(),
            agent: Arc::new(agent),
        }
    }

    /// Create a VerificationClient with a custom base URL (useful for testing).
    #[doc(hidden)]
    pub fn with_base_url(base_url: String) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(10))
            .build();

        Self {
            base_url,
            agent: Arc::new(agent),
        }
    }

    /// Validate one address. A single attempt is made.
    pub fn validate(&self, email: &str, api_key: &str) -> VerificationResult<VerificationResponse> {
        let url = format!(
            "{}/validate?api_key={}&email={}",
            self.base_url.trim_end_matches('/'),
            urlencoding::encode(api_key),
            urlencoding::encode(email)
        );
        // The key travels in the query string; keep it out of the logs.
        tracing::debug!("GET {}/validate for {}", self.base_url, email);

        let response = self
            .agent
            .get(&url)
            .set("Content-Type", "application/json")
            .call()
            .map_err(|e| match e {
                ureq::Error::Status(code, _) => VerificationError::Status(code),
                ureq::Error::Transport(transport) => {
                    VerificationError::Transport(transport.to_string())
                }
            })?;

        let body = response
            .into_string()
            .map_err(|e| VerificationError::Transport(e.to_string()))?;

        serde_json::from_str(&body).map_err(|e| VerificationError::MalformedResponse(e.to_string()))
    }
}

impl Default for VerificationClient {
    fn default() -> Self {
        Self::with_base_url(DEFAULT_VERIFICATION_API_URL.to_string())
    }
}

/// External deliverability check.
///
/// Implementations must surface every failure as `Err`; the caller owns the
/// fallback policy.
#[async_trait]
pub trait EmailVerifier: Send + Sync {
    async fn verify(
        &self,
        email: &EmailAddress,
        api_key: &str,
    ) -> VerificationResult<EmailValidationResult>;
}

/// `EmailVerifier` backed by the ZeroBounce HTTP API.
#[derive(Clone)]
pub struct ZeroBounceVerifier {
    client: Arc<VerificationClient>,
}

impl ZeroBounceVerifier {
    pub fn new(client: VerificationClient) -> Self {
        Self {
            client: Arc::new(client),
        }
    }
}

#[async_trait]
impl EmailVerifier for ZeroBounceVerifier {
    async fn verify(
        &self,
        email: &EmailAddress,
        api_key: &str,
    ) -> VerificationResult<EmailValidationResult> {
        let client = self.client.clone();
        let email = email.as_str().to_string();
        let api_key = api_key.to_string();

        let response = tokio::task::spawn_blocking(move || client.validate(&email, &api_key))
            .await
            .map_err(|e| VerificationError::Task(e.to_string()))??;

        Ok(response.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_maps_one_to_one() {
        let json = r#"{
            "address": "john@example.com",
            "status": "valid",
            "sub_status": "",
            "account": "john",
            "domain": "example.com",
            "did_you_mean": null,
            "disposable": false,
            "toxic": false,
            "firstname": "John",
            "lastname": "",
            "gender": "male",
            "location": null,
            "credits_used": 1
        }"#;
        let response: VerificationResponse = serde_json::from_str(json).unwrap();
        let result = EmailValidationResult::from(response);

        assert!(result.is_valid);
        assert_eq!(result.status, EmailStatus::Valid);
        assert!(result.sub_status.is_none());
        assert_eq!(result.account.as_deref(), Some("john"));
        assert_eq!(result.first_name.as_deref(), Some("John"));
        assert!(result.last_name.is_none());
        assert_eq!(result.credits_used, Some(1));
        assert!(result.error.is_none());
    }

    #[test]
    fn test_non_valid_status_is_not_deliverable() {
        let json = r#"{"status": "catch-all", "sub_status": "role_based", "did_you_mean": "a@gmail.com"}"#;
        let response: VerificationResponse = serde_json::from_str(json).unwrap();
        let result = EmailValidationResult::from(response);

        assert!(!result.is_valid);
        assert_eq!(result.status, EmailStatus::CatchAll);
        assert_eq!(result.sub_status.as_deref(), Some("role_based"));
        assert_eq!(result.did_you_mean.as_deref(), Some("a@gmail.com"));
    }

    #[test]
    fn test_error_body_is_malformed() {
        let json = r#"{"error": "Invalid API Key or your account ran out of credits"}"#;
        let result: Result<VerificationResponse, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }
}
