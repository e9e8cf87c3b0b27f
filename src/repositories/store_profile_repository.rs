use crate::client::AsyncStoreClient;
use crate::error::StoreResult;
use crate::models::Profile;
use crate::repositories::traits::ProfileRepository;
use async_trait::async_trait;
use std::sync::Arc;

/// Profile repository backed by the hosted record store.
pub struct StoreProfileRepository {
    client: Arc<dyn AsyncStoreClient>,
}

impl StoreProfileRepository {
    /// Create a new StoreProfileRepository with the given client.
    pub fn new(client: Arc<dyn AsyncStoreClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ProfileRepository for StoreProfileRepository {
    async fn get(&self, id: &str) -> StoreResult<Profile> {
        self.client.get_profile(id).await
    }

    async fn set_organization(&self, profile_id: &str, organization_id: &str) -> StoreResult<()> {
        self.client
            .update_profile_organization(profile_id, organization_id)
            .await
    }
}
