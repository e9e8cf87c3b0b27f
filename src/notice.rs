//! User-facing notices.
//!
//! Maps service outcomes to the short title/description pairs a front end
//! shows as toasts. Nothing here performs I/O; callers decide how to render.

use crate::error::{MembershipError, ProductError};
use crate::models::{EmailStatus, EmailValidationResult, Organization, Product};
use crate::services::{suggest_correction, JoinOutcome};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Error,
}

/// A message ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub description: String,
    pub severity: Severity,
}

impl Notice {
    fn new(severity: Severity, title: &str, description: impl Into<String>) -> Self {
        Self {
            title: title.to_string(),
            description: description.into(),
            severity,
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.title, self.description)
    }
}

/// Notice for an email validation verdict.
pub fn validation_notice(result: &EmailValidationResult) -> Notice {
    if result.is_valid {
        return Notice::new(
            Severity::Success,
            "Valid email",
            "The email address was verified and is valid.",
        );
    }

    let mut description = match result.status {
        EmailStatus::Invalid => "The email address format is invalid.".to_string(),
        EmailStatus::DoNotMail if result.disposable == Some(true) => {
            "Disposable email addresses are not accepted. Please use a permanent address."
                .to_string()
        }
        EmailStatus::DoNotMail => "Mail cannot be sent to this address.".to_string(),
        EmailStatus::Spamtrap => "This address was detected as a spam trap.".to_string(),
        EmailStatus::Abuse => "This address is known for filing abuse reports.".to_string(),
        EmailStatus::CatchAll => {
            "This domain accepts all mail, so the address cannot be confirmed.".to_string()
        }
        EmailStatus::Unknown => "The validity of this address could not be determined.".to_string(),
        EmailStatus::Valid => result
            .error
            .clone()
            .unwrap_or_else(|| "The email address is invalid.".to_string()),
    };

    let suggestion = result.did_you_mean.clone().or_else(|| {
        match (result.account.as_deref(), result.domain.as_deref()) {
            (Some(account), Some(domain)) => suggest_correction(&format!("{}@{}", account, domain)),
            _ => None,
        }
    });
    if let Some(suggestion) = suggestion {
        description.push_str(&format!(" Did you mean {}?", suggestion));
    }

    Notice::new(Severity::Error, "Invalid email", description)
}

/// Notice for the outcome of a join request.
pub fn join_notice(outcome: &JoinOutcome, code: &str) -> Notice {
    match outcome {
        JoinOutcome::AlreadyMember(org) => Notice::new(
            Severity::Info,
            "Already a member",
            format!("You already belong to {}.", org.name),
        ),
        JoinOutcome::Joined(org) => Notice::new(
            Severity::Success,
            "Joined",
            format!("You have joined {}.", org.name),
        ),
        JoinOutcome::NotFound => Notice::new(
            Severity::Error,
            "Not found",
            format!(
                "No organization found with code \"{}\". Please check the code.",
                code.trim()
            ),
        ),
    }
}

/// Notice for a freshly created organization.
pub fn created_notice(org: &Organization) -> Notice {
    Notice::new(
        Severity::Success,
        "Organization created",
        format!("{} was created. Organization code: {}", org.name, org.code),
    )
}

/// Notice for a failed membership action.
pub fn membership_error_notice(error: &MembershipError) -> Notice {
    let description = match error {
        MembershipError::Unauthenticated => "Please sign in to continue.".to_string(),
        MembershipError::EmptyName => "Please enter an organization name.".to_string(),
        MembershipError::Store(_) => {
            "Something went wrong while saving. Please try again.".to_string()
        }
    };
    Notice::new(Severity::Error, "Error", description)
}

/// Notice after a product form was saved.
pub fn product_saved_notice(product: &Product, created: bool) -> Notice {
    let verb = if created { "added" } else { "updated" };
    Notice::new(
        Severity::Success,
        "Saved",
        format!("Product {} was {}.", product.name, verb),
    )
}

pub fn product_deleted_notice() -> Notice {
    Notice::new(Severity::Success, "Deleted", "The product was deleted.")
}

/// Notice for a rejected form or a failed product write.
pub fn product_error_notice(error: &ProductError) -> Notice {
    let description = match error {
        ProductError::Unauthenticated => "User not found. Please sign in.".to_string(),
        ProductError::EmptyName => "Product name is required.".to_string(),
        ProductError::InvalidQuantity { field, .. } if *field == "stock_quantity" => {
            "Order quantity must be a valid number.".to_string()
        }
        ProductError::InvalidQuantity { .. } => {
            "Production quantity must be a valid number.".to_string()
        }
        ProductError::UnknownFabricStatus(status) => format!(
            "Unknown fabric status \"{}\". Use ordered, arrived, cutting or ready.",
            status
        ),
        ProductError::Store(_) => {
            "Something went wrong while saving the product. Please try again.".to_string()
        }
    };
    Notice::new(Severity::Error, "Error", description)
}
