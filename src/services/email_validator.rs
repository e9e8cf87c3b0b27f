//! Layered email validation.
//!
//! Order of checks: format gate, disposable-provider denylist, then either the
//! external verification API (when a credential is supplied) or the local
//! heuristics. Any failure of the external call falls back to the heuristics;
//! it is never surfaced to the caller.

use crate::client::EmailVerifier;
use crate::domain::EmailAddress;
use crate::metrics::Metrics;
use crate::models::{EmailStatus, EmailValidationResult};
use futures::future::join_all;
use std::sync::Arc;
use tracing::{debug, warn};

/// Throwaway-inbox providers. Matched case-insensitively on the domain.
pub const DISPOSABLE_DOMAINS: &[&str] = &[
    "10minutemail.com",
    "guerrillamail.com",
    "tempmail.org",
    "mailinator.com",
    "yopmail.com",
    "temp-mail.org",
    "throwaway.email",
    "getnada.com",
    "maildrop.cc",
    "sharklasers.com",
    "trashmail.com",
    "dispostable.com",
    "tempinbox.com",
    "mailcatch.com",
    "emailondeck.com",
];

/// Major consumer providers considered deliverable without a lookup.
pub const WELL_KNOWN_DOMAINS: &[&str] = &[
    "gmail.com",
    "yahoo.com",
    "hotmail.com",
    "outlook.com",
    "icloud.com",
];

/// Common domain misspellings and their corrections.
const DOMAIN_TYPOS: &[(&str, &str)] = &[
    ("gmial.com", "gmail.com"),
    ("gmai.com", "gmail.com"),
    ("gmail.co", "gmail.com"),
    ("yahooo.com", "yahoo.com"),
    ("yaho.com", "yahoo.com"),
    ("hotmial.com", "hotmail.com"),
    ("hotmai.com", "hotmail.com"),
    ("outlok.com", "outlook.com"),
    ("outloo.com", "outlook.com"),
];

/// True if the address belongs to a disposable-email provider.
pub fn is_disposable(email: &str) -> bool {
    email
        .rsplit_once('@')
        .map(|(_, domain)| domain.to_lowercase())
        .is_some_and(|domain| DISPOSABLE_DOMAINS.contains(&domain.as_str()))
}

/// Suggest a corrected address for a known domain typo.
///
/// The local part is kept exactly as typed. Returns `None` when the input has
/// no `@` or its domain is not a recognized misspelling.
///
/// ```
/// use stockdesk::services::suggest_correction;
///
/// assert_eq!(suggest_correction("a@gmial.com").as_deref(), Some("a@gmail.com"));
/// assert_eq!(suggest_correction("a@gmail.com"), None);
/// ```
pub fn suggest_correction(email: &str) -> Option<String> {
    let mut parts = email.split('@');
    let local_part = parts.next()?;
    let domain = parts.next()?.to_lowercase();

    DOMAIN_TYPOS
        .iter()
        .find(|(typo, _)| *typo == domain)
        .map(|(_, corrected)| format!("{}@{}", local_part, corrected))
}

/// Heuristic verdict for a well-formed address.
fn classify_locally(email: &EmailAddress) -> EmailValidationResult {
    let domain = email.domain_lowercase();

    if DISPOSABLE_DOMAINS.contains(&domain.as_str()) {
        return EmailValidationResult::disposable();
    }

    let status = if WELL_KNOWN_DOMAINS.contains(&domain.as_str()) {
        EmailStatus::Valid
    } else {
        // Unrecognized domains are accepted but flagged as uncertain.
        EmailStatus::Unknown
    };

    EmailValidationResult::heuristic(status, email.local_part(), email.domain())
}

/// Validate using only the local checks: format, denylist, allowlist.
pub fn validate_basic(email: &str) -> EmailValidationResult {
    match EmailAddress::new(email) {
        Ok(address) => classify_locally(&address),
        Err(_) => EmailValidationResult::invalid_format(),
    }
}

/// Email validator with optional external verification.
#[derive(Clone)]
pub struct EmailValidator {
    verifier: Arc<dyn EmailVerifier>,
    metrics: Metrics,
}

impl EmailValidator {
    pub fn new(verifier: Arc<dyn EmailVerifier>) -> Self {
        Self {
            verifier,
            metrics: Metrics::new(),
        }
    }

    /// Share an existing metrics collector.
    pub fn with_metrics(mut self, metrics: Metrics) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Classify an address.
    ///
    /// With `api_key` absent or blank only local heuristics run. With a key,
    /// the verification API is called once; on any failure the heuristics
    /// answer instead. Malformed and disposable addresses never reach the
    /// network.
    pub async fn validate(&self, email: &str, api_key: Option<&str>) -> EmailValidationResult {
        let address = match EmailAddress::new(email) {
            Ok(address) => address,
            Err(e) => {
                debug!("{}", e);
                return EmailValidationResult::invalid_format();
            }
        };

        if is_disposable(address.as_str()) {
            debug!("Rejecting disposable address domain {}", address.domain());
            return EmailValidationResult::disposable();
        }

        let Some(api_key) = api_key.filter(|key| !key.trim().is_empty()) else {
            debug!("No verification key configured, using local heuristics");
            return classify_locally(&address);
        };

        self.metrics.record_verification_call();
        match self.verifier.verify(&address, api_key).await {
            Ok(result) => result,
            Err(e) => {
                warn!("Email verification failed, falling back to heuristics: {}", e);
                self.metrics.record_verification_fallback();
                classify_locally(&address)
            }
        }
    }

    /// Validate several addresses concurrently. Results keep input order.
    pub async fn validate_many(
        &self,
        emails: &[String],
        api_key: Option<&str>,
    ) -> Vec<EmailValidationResult> {
        let handles = emails.iter().map(|email| {
            let validator = self.clone();
            let email = email.clone();
            let api_key = api_key.map(str::to_string);
            tokio::spawn(async move { validator.validate(&email, api_key.as_deref()).await })
        });

        join_all(handles)
            .await
            .into_iter()
            .map(|joined| {
                joined.unwrap_or_else(|e| {
                    EmailValidationResult::processing_failure(format!(
                        "email validation could not be completed: {}",
                        e
                    ))
                })
            })
            .collect()
    }
}
