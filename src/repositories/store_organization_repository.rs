use crate::client::AsyncStoreClient;
use crate::error::StoreResult;
use crate::models::{NewOrganization, Organization};
use crate::repositories::traits::OrganizationRepository;
use async_trait::async_trait;
use std::sync::Arc;

/// Organization repository backed by the hosted record store.
pub struct StoreOrganizationRepository {
    client: Arc<dyn AsyncStoreClient>,
}

impl StoreOrganizationRepository {
    /// Create a new StoreOrganizationRepository with the given client.
    pub fn new(client: Arc<dyn AsyncStoreClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl OrganizationRepository for StoreOrganizationRepository {
    async fn get(&self, id: &str) -> StoreResult<Organization> {
        self.client.get_organization(id).await
    }

    async fn list_all(&self) -> StoreResult<Vec<Organization>> {
        self.client.list_organizations().await
    }

    async fn create(&self, organization: &NewOrganization) -> StoreResult<Organization> {
        self.client.create_organization(organization).await
    }

    async fn generate_code(&self) -> StoreResult<String> {
        self.client.generate_organization_code().await
    }
}
