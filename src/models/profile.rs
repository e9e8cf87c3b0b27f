//! User profile records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A user profile as stored in the `profiles` table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Profile {
    pub id: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,

    /// Organization membership (API field: company_id)
    #[serde(rename = "company_id")]
    pub organization_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Profile {
    /// Membership reference, ignoring blank values the store may hand back.
    pub fn organization_id(&self) -> Option<&str> {
        self.organization_id
            .as_deref()
            .filter(|id| !id.trim().is_empty())
    }
}

/// Patch payload that moves a profile into an organization.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ProfileOrganizationUpdate {
    pub company_id: String,
}
