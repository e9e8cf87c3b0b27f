//! Membership service layer.
//!
//! Attributes create/join actions to a user and persists the profile's
//! organization reference when the resolver says a write is needed.

use crate::error::{MembershipError, MembershipResult, StoreError};
use crate::models::{Organization, Profile};
use crate::repositories::{OrganizationRepository, ProfileRepository};
use crate::services::company_resolver::{CompanyResolver, JoinOutcome};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

/// A profile together with its current organization, if any.
#[derive(Debug, Clone, PartialEq)]
pub struct Membership {
    pub profile: Profile,
    pub organization: Option<Organization>,
}

/// Membership operations for an (optionally) authenticated user.
#[async_trait]
pub trait MembershipService: Send + Sync {
    /// Load the user's profile and the organization it points at.
    async fn current_membership(&self, user_id: Option<&str>) -> MembershipResult<Membership>;

    /// Create an organization and make the user a member of it.
    async fn create_organization(
        &self,
        user_id: Option<&str>,
        name: &str,
    ) -> MembershipResult<Organization>;

    /// Join the organization with `code`, writing the membership only when needed.
    async fn join(&self, user_id: Option<&str>, code: &str) -> MembershipResult<JoinOutcome>;
}

/// Default implementation of MembershipService.
pub struct MembershipServiceImpl {
    resolver: CompanyResolver,
    organizations: Arc<dyn OrganizationRepository>,
    profiles: Arc<dyn ProfileRepository>,
}

impl MembershipServiceImpl {
    pub fn new(
        organizations: Arc<dyn OrganizationRepository>,
        profiles: Arc<dyn ProfileRepository>,
    ) -> Self {
        Self {
            resolver: CompanyResolver::new(organizations.clone()),
            organizations,
            profiles,
        }
    }

    /// Actions must be attributable to a user; a missing id is a hard failure.
    fn require_user(user_id: Option<&str>) -> MembershipResult<&str> {
        user_id
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .ok_or(MembershipError::Unauthenticated)
    }
}

#[async_trait]
impl MembershipService for MembershipServiceImpl {
    async fn current_membership(&self, user_id: Option<&str>) -> MembershipResult<Membership> {
        let user_id = Self::require_user(user_id)?;
        let profile = self.profiles.get(user_id).await?;

        let organization = match profile.organization_id() {
            Some(org_id) => match self.organizations.get(org_id).await {
                Ok(org) => Some(org),
                Err(StoreError::NotFound(_)) => None,
                Err(e) => return Err(e.into()),
            },
            None => None,
        };

        Ok(Membership {
            profile,
            organization,
        })
    }

    async fn create_organization(
        &self,
        user_id: Option<&str>,
        name: &str,
    ) -> MembershipResult<Organization> {
        let user_id = Self::require_user(user_id)?;
        if name.trim().is_empty() {
            return Err(MembershipError::EmptyName);
        }

        let org = self.resolver.create_organization(name, user_id).await?;
        self.profiles.set_organization(user_id, &org.id).await?;

        info!("User {} created organization {}", user_id, org.id);
        Ok(org)
    }

    async fn join(&self, user_id: Option<&str>, code: &str) -> MembershipResult<JoinOutcome> {
        let user_id = Self::require_user(user_id)?;
        let profile = self.profiles.get(user_id).await?;

        let outcome = self.resolver.join_organization(&profile, code).await?;
        if let JoinOutcome::Joined(org) = &outcome {
            self.profiles.set_organization(user_id, &org.id).await?;
            info!("User {} joined organization {}", user_id, org.id);
        }

        Ok(outcome)
    }
}
