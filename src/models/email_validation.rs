//! Email validation verdicts.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Deliverability status of an email address.
///
/// Values follow the verification provider's vocabulary. The provider spells
/// the catch-all status with a hyphen; both spellings are accepted on input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmailStatus {
    Valid,
    Invalid,
    #[serde(alias = "catch-all")]
    CatchAll,
    Unknown,
    Spamtrap,
    Abuse,
    DoNotMail,
}

impl EmailStatus {
    /// Only a `valid` verdict counts as deliverable on the external path.
    pub fn is_deliverable(self) -> bool {
        matches!(self, EmailStatus::Valid)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EmailStatus::Valid => "valid",
            EmailStatus::Invalid => "invalid",
            EmailStatus::CatchAll => "catch_all",
            EmailStatus::Unknown => "unknown",
            EmailStatus::Spamtrap => "spamtrap",
            EmailStatus::Abuse => "abuse",
            EmailStatus::DoNotMail => "do_not_mail",
        }
    }
}

impl fmt::Display for EmailStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of validating one email address.
///
/// Produced fresh per call and never mutated afterwards. `error` is only set
/// for a format failure, a disposable rejection, or a processing fault.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmailValidationResult {
    pub is_valid: bool,
    pub status: EmailStatus,

    /// Verbatim diagnostic from the verification provider
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_status: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub account: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,

    /// Suggested correction from the verification provider
    #[serde(skip_serializing_if = "Option::is_none")]
    pub did_you_mean: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub disposable: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub toxic: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    /// Credits the provider charged for this lookup
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credits_used: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl EmailValidationResult {
    fn bare(is_valid: bool, status: EmailStatus) -> Self {
        Self {
            is_valid,
            status,
            sub_status: None,
            account: None,
            domain: None,
            did_you_mean: None,
            disposable: None,
            toxic: None,
            first_name: None,
            last_name: None,
            gender: None,
            location: None,
            credits_used: None,
            error: None,
        }
    }

    /// Syntactically invalid address.
    pub fn invalid_format() -> Self {
        Self {
            error: Some("invalid format".to_string()),
            ..Self::bare(false, EmailStatus::Invalid)
        }
    }

    /// Address on a throwaway-inbox provider.
    pub fn disposable() -> Self {
        Self {
            disposable: Some(true),
            error: Some("disposable address rejected".to_string()),
            ..Self::bare(false, EmailStatus::DoNotMail)
        }
    }

    /// Verdict of the local heuristics. Unknown domains are accepted but
    /// flagged with `status=unknown`.
    pub fn heuristic(status: EmailStatus, account: &str, domain: &str) -> Self {
        Self {
            account: Some(account.to_string()),
            domain: Some(domain.to_string()),
            ..Self::bare(status != EmailStatus::Invalid, status)
        }
    }

    /// Validation could not be completed at all.
    pub fn processing_failure(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            ..Self::bare(false, EmailStatus::Unknown)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_accepts_both_catch_all_spellings() {
        let hyphen: EmailStatus = serde_json::from_str("\"catch-all\"").unwrap();
        let underscore: EmailStatus = serde_json::from_str("\"catch_all\"").unwrap();
        assert_eq!(hyphen, EmailStatus::CatchAll);
        assert_eq!(underscore, EmailStatus::CatchAll);
        assert_eq!(serde_json::to_string(&hyphen).unwrap(), "\"catch_all\"");
    }

    #[test]
    fn test_status_rejects_unknown_value() {
        let result: Result<EmailStatus, _> = serde_json::from_str("\"maybe\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_format_result() {
        let result = EmailValidationResult::invalid_format();
        assert!(!result.is_valid);
        assert_eq!(result.status, EmailStatus::Invalid);
        assert_eq!(result.error.as_deref(), Some("invalid format"));
        assert!(result.account.is_none());
    }

    #[test]
    fn test_disposable_result() {
        let result = EmailValidationResult::disposable();
        assert!(!result.is_valid);
        assert_eq!(result.status, EmailStatus::DoNotMail);
        assert_eq!(result.disposable, Some(true));
        assert!(result.error.is_some());
    }

    #[test]
    fn test_heuristic_result_has_no_error() {
        let result = EmailValidationResult::heuristic(EmailStatus::Unknown, "user", "corp.io");
        assert!(result.is_valid);
        assert!(result.error.is_none());
        assert_eq!(result.account.as_deref(), Some("user"));
        assert_eq!(result.domain.as_deref(), Some("corp.io"));
    }

    #[test]
    fn test_serialization_skips_empty_fields() {
        let result = EmailValidationResult::heuristic(EmailStatus::Valid, "user", "gmail.com");
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["status"], "valid");
        assert!(json.get("did_you_mean").is_none());
        assert!(json.get("error").is_none());
    }
}
