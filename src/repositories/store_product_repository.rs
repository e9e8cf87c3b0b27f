use crate::client::AsyncStoreClient;
use crate::error::StoreResult;
use crate::models::{NewProduct, Product};
use crate::repositories::traits::ProductRepository;
use async_trait::async_trait;
use std::sync::Arc;

/// Product repository backed by the `products` table.
pub struct StoreProductRepository {
    client: Arc<dyn AsyncStoreClient>,
}

impl StoreProductRepository {
    pub fn new(client: Arc<dyn AsyncStoreClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ProductRepository for StoreProductRepository {
    async fn list_for_user(&self, user_id: &str) -> StoreResult<Vec<Product>> {
        self.client.list_products(user_id).await
    }

    async fn create(&self, product: &NewProduct) -> StoreResult<Product> {
        self.client.create_product(product).await
    }

    async fn update(&self, id: &str, product: &NewProduct) -> StoreResult<Product> {
        self.client.update_product(id, product).await
    }

    async fn delete(&self, id: &str) -> StoreResult<()> {
        self.client.delete_product(id).await
    }
}
