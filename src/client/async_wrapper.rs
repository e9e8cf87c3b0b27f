//! Async wrapper around the synchronous StoreClient.
//!
//! Runs the blocking HTTP calls on tokio's blocking thread pool so callers on
//! the async runtime are never stalled by network I/O.

use crate::client::StoreClient;
use crate::error::{StoreError, StoreResult};
use crate::models::{NewOrganization, NewProduct, Organization, Product, Profile};
use async_trait::async_trait;
use std::sync::Arc;

/// Async interface to the record store.
#[async_trait]
pub trait AsyncStoreClient: Send + Sync {
    async fn list_organizations(&self) -> StoreResult<Vec<Organization>>;
    async fn get_organization(&self, id: &str) -> StoreResult<Organization>;
    async fn create_organization(&self, organization: &NewOrganization)
        -> StoreResult<Organization>;
    async fn generate_organization_code(&self) -> StoreResult<String>;

    async fn get_profile(&self, id: &str) -> StoreResult<Profile>;
    async fn update_profile_organization(
        &self,
        profile_id: &str,
        organization_id: &str,
    ) -> StoreResult<()>;

    async fn list_products(&self, user_id: &str) -> StoreResult<Vec<Product>>;
    async fn create_product(&self, product: &NewProduct) -> StoreResult<Product>;
    async fn update_product(&self, id: &str, product: &NewProduct) -> StoreResult<Product>;
    async fn delete_product(&self, id: &str) -> StoreResult<()>;
}

/// Async wrapper around synchronous StoreClient.
#[derive(Clone)]
pub struct AsyncStoreClientImpl {
    client: Arc<StoreClient>,
}

impl AsyncStoreClientImpl {
    pub fn new(client: StoreClient) -> Self {
        Self {
            client: Arc::new(client),
        }
    }
}

fn join_error(e: tokio::task::JoinError) -> StoreError {
    StoreError::HttpError(format!("Task join error: {}", e))
}

#[async_trait]
impl AsyncStoreClient for AsyncStoreClientImpl {
    async fn list_organizations(&self) -> StoreResult<Vec<Organization>> {
        let client = self.client.clone();

        tokio::task::spawn_blocking(move || client.list_organizations())
            .await
            .map_err(join_error)?
    }

    async fn get_organization(&self, id: &str) -> StoreResult<Organization> {
        let client = self.client.clone();
        let id = id.to_string();

        tokio::task::spawn_blocking(move || client.get_organization(&id))
            .await
            .map_err(join_error)?
    }

    async fn create_organization(
        &self,
        organization: &NewOrganization,
    ) -> StoreResult<Organization> {
        let client = self.client.clone();
        let organization = organization.clone();

        tokio::task::spawn_blocking(move || client.create_organization(&organization))
            .await
            .map_err(join_error)?
    }

    async fn generate_organization_code(&self) -> StoreResult<String> {
        let client = self.client.clone();

        tokio::task::spawn_blocking(move || client.generate_organization_code())
            .await
            .map_err(join_error)?
    }

    async fn get_profile(&self, id: &str) -> StoreResult<Profile> {
        let client = self.client.clone();
        let id = id.to_string();

        tokio::task::spawn_blocking(move || client.get_profile(&id))
            .await
            .map_err(join_error)?
    }

    async fn update_profile_organization(
        &self,
        profile_id: &str,
        organization_id: &str,
    ) -> StoreResult<()> {
        let client = self.client.clone();
        let profile_id = profile_id.to_string();
        let organization_id = organization_id.to_string();

        tokio::task::spawn_blocking(move || {
            client.update_profile_organization(&profile_id, &organization_id)
        })
        .await
        .map_err(join_error)?
    }

    async fn list_products(&self, user_id: &str) -> StoreResult<Vec<Product>> {
        let client = self.client.clone();
        let user_id = user_id.to_string();

        tokio::task::spawn_blocking(move || client.list_products(&user_id))
            .await
            .map_err(join_error)?
    }

    async fn create_product(&self, product: &NewProduct) -> StoreResult<Product> {
        let client = self.client.clone();
        let product = product.clone();

        tokio::task::spawn_blocking(move || client.create_product(&product))
            .await
            .map_err(join_error)?
    }

    async fn update_product(&self, id: &str, product: &NewProduct) -> StoreResult<Product> {
        let client = self.client.clone();
        let id = id.to_string();
        let product = product.clone();

        tokio::task::spawn_blocking(move || client.update_product(&id, &product))
            .await
            .map_err(join_error)?
    }

    async fn delete_product(&self, id: &str) -> StoreResult<()> {
        let client = self.client.clone();
        let id = id.to_string();

        tokio::task::spawn_blocking(move || client.delete_product(&id))
            .await
            .map_err(join_error)?
    }
}
