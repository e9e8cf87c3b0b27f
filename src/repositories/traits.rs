use crate::error::StoreResult;
use crate::models::{NewOrganization, NewProduct, Organization, Product, Profile};
use async_trait::async_trait;

/// Repository for organization records.
///
/// Provides abstraction over organization storage and retrieval,
/// enabling different implementations (API client, mock, cached).
#[async_trait]
pub trait OrganizationRepository: Send + Sync {
    /// Retrieve a single organization by ID.
    async fn get(&self, id: &str) -> StoreResult<Organization>;

    /// Retrieve every organization, in the store's listing order.
    async fn list_all(&self) -> StoreResult<Vec<Organization>>;

    /// Insert a new organization.
    async fn create(&self, organization: &NewOrganization) -> StoreResult<Organization>;

    /// Obtain a fresh code guaranteed unique by the store.
    async fn generate_code(&self) -> StoreResult<String>;
}

/// Repository for user profiles.
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Retrieve a single profile by ID.
    async fn get(&self, id: &str) -> StoreResult<Profile>;

    /// Set the profile's organization reference.
    async fn set_organization(&self, profile_id: &str, organization_id: &str) -> StoreResult<()>;
}

/// Repository for a user's product inventory.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Products owned by `user_id`, newest first.
    async fn list_for_user(&self, user_id: &str) -> StoreResult<Vec<Product>>;

    async fn create(&self, product: &NewProduct) -> StoreResult<Product>;

    /// Replace the editable fields of product `id`.
    async fn update(&self, id: &str, product: &NewProduct) -> StoreResult<Product>;

    async fn delete(&self, id: &str) -> StoreResult<()>;
}
