//! Organization code resolution and join idempotence.
//!
//! Lookups materialize the full organization listing and scan it in memory:
//! an exact pass, then a case-insensitive pass. This is O(n) in the number of
//! organizations and needs nothing from the store beyond a bulk list. A
//! store-side case-insensitive index could replace the scan as long as exact
//! matches still take precedence.

use crate::domain::CompanyCode;
use crate::error::{StoreError, StoreResult};
use crate::models::{NewOrganization, Organization, Profile};
use crate::repositories::OrganizationRepository;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Result of a join request.
#[derive(Debug, Clone, PartialEq)]
pub enum JoinOutcome {
    /// The profile already belongs to the organization with this code. Nothing
    /// needs to be written.
    AlreadyMember(Organization),

    /// The code resolved to an organization; the caller must persist the
    /// profile's new organization reference.
    Joined(Organization),

    /// No organization has this code.
    NotFound,
}

impl JoinOutcome {
    /// Whether the caller has to write the membership.
    pub fn requires_write(&self) -> bool {
        matches!(self, JoinOutcome::Joined(_))
    }

    pub fn organization(&self) -> Option<&Organization> {
        match self {
            JoinOutcome::AlreadyMember(org) | JoinOutcome::Joined(org) => Some(org),
            JoinOutcome::NotFound => None,
        }
    }
}

/// Two-pass selection over a listing: exact match first, then case-insensitive.
///
/// Ties within a pass go to the first record in listing order.
pub fn select_by_code<'a>(
    organizations: &'a [Organization],
    code: &CompanyCode,
) -> Option<&'a Organization> {
    if let Some(exact) = organizations
        .iter()
        .find(|org| code.matches_exact(&org.code))
    {
        debug!("Exact code match: {} ({})", exact.name, exact.id);
        return Some(exact);
    }

    debug!("No exact match for {}, trying case-insensitive", code);
    organizations
        .iter()
        .find(|org| code.matches_ignore_case(&org.code))
}

/// Resolves organization codes against the record store.
#[derive(Clone)]
pub struct CompanyResolver {
    organizations: Arc<dyn OrganizationRepository>,
}

impl CompanyResolver {
    pub fn new(organizations: Arc<dyn OrganizationRepository>) -> Self {
        Self { organizations }
    }

    /// Find the organization for a human-entered code.
    ///
    /// Blank input resolves to `None` without touching the store.
    pub async fn find_by_code(&self, code: &str) -> StoreResult<Option<Organization>> {
        let Ok(code) = CompanyCode::new(code) else {
            debug!("Empty organization code provided");
            return Ok(None);
        };

        let organizations = self.organizations.list_all().await?;
        let found = select_by_code(&organizations, &code).cloned();

        if found.is_none() {
            debug!(
                "No organization with code {} among {} records",
                code,
                organizations.len()
            );
        }
        Ok(found)
    }

    /// Decide what joining `code` means for `profile`.
    ///
    /// Re-submitting the code of the profile's current organization yields
    /// `AlreadyMember` and performs no lookup of other organizations.
    pub async fn join_organization(&self, profile: &Profile, code: &str) -> StoreResult<JoinOutcome> {
        let Ok(requested) = CompanyCode::new(code) else {
            return Ok(JoinOutcome::NotFound);
        };

        if let Some(current_id) = profile.organization_id() {
            match self.organizations.get(current_id).await {
                Ok(current) if requested.matches_ignore_case(&current.code) => {
                    debug!("Profile {} already belongs to {}", profile.id, current.id);
                    return Ok(JoinOutcome::AlreadyMember(current));
                }
                Ok(_) => {}
                Err(StoreError::NotFound(_)) => {
                    warn!(
                        "Profile {} references missing organization {}",
                        profile.id, current_id
                    );
                }
                Err(e) => return Err(e),
            }
        }

        match self.find_by_code(requested.as_str()).await? {
            Some(org) => {
                info!("Profile {} can join organization {}", profile.id, org.id);
                Ok(JoinOutcome::Joined(org))
            }
            None => Ok(JoinOutcome::NotFound),
        }
    }

    /// Create an organization with a store-generated code.
    pub async fn create_organization(&self, name: &str, creator_id: &str) -> StoreResult<Organization> {
        let code = self.organizations.generate_code().await?;
        let new_org = NewOrganization {
            name: name.trim().to_string(),
            code,
            created_by: creator_id.to_string(),
        };

        let org = self.organizations.create(&new_org).await?;
        info!("Created organization {} with code {}", org.id, org.code);
        Ok(org)
    }
}
