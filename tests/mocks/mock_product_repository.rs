use async_trait::async_trait;
use chrono::{Duration, TimeZone, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use stockdesk::error::{StoreError, StoreResult};
use stockdesk::models::{NewProduct, Product};
use stockdesk::repositories::ProductRepository;

/// In-memory product table. Rows get increasing `created_at` stamps so
/// listing order is deterministic.
#[allow(dead_code)]
#[derive(Clone)]
pub struct MockProductRepository {
    products: Arc<Mutex<Vec<Product>>>,
    created_by: Arc<Mutex<HashMap<String, Option<String>>>>,
    fail_writes: Arc<Mutex<bool>>,
    call_counts: Arc<Mutex<HashMap<String, usize>>>,
}

#[allow(dead_code)]
impl MockProductRepository {
    pub fn new() -> Self {
        Self {
            products: Arc::new(Mutex::new(Vec::new())),
            created_by: Arc::new(Mutex::new(HashMap::new())),
            fail_writes: Arc::new(Mutex::new(false)),
            call_counts: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn product(&self, id: &str) -> Option<Product> {
        self.products
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id == id)
            .cloned()
    }

    /// `created_by` as sent on the most recent write for `id`.
    pub fn last_created_by(&self, id: &str) -> Option<String> {
        self.created_by.lock().unwrap().get(id).cloned().flatten()
    }

    pub fn fail_writes(&self) {
        *self.fail_writes.lock().unwrap() = true;
    }

    pub fn get_call_count(&self, method: &str) -> usize {
        let counts = self.call_counts.lock().unwrap();
        *counts.get(method).unwrap_or(&0)
    }

    fn track_call(&self, method: &str) {
        let mut counts = self.call_counts.lock().unwrap();
        *counts.entry(method.to_string()).or_insert(0) += 1;
    }

    fn check_writable(&self) -> StoreResult<()> {
        if *self.fail_writes.lock().unwrap() {
            return Err(StoreError::ApiError {
                status: 500,
                message: "write failed".to_string(),
            });
        }
        Ok(())
    }

    fn apply(product: &mut Product, payload: &NewProduct) {
        product.user_id = Some(payload.user_id.clone());
        product.name = payload.name.clone();
        product.model = payload.model.clone();
        product.stock_quantity = Some(payload.stock_quantity);
        product.min_stock_level = payload.min_stock_level;
        product.color = payload.color.clone();
        product.order_number = payload.order_number.clone();
        product.ordering_brand = payload.ordering_brand.clone();
        product.fabric_number = payload.fabric_number.clone();
        product.fabric_status = payload.fabric_status;
    }
}

impl Default for MockProductRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProductRepository for MockProductRepository {
    async fn list_for_user(&self, user_id: &str) -> StoreResult<Vec<Product>> {
        self.track_call("list_for_user");

        let mut products: Vec<Product> = self
            .products
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.user_id.as_deref() == Some(user_id))
            .cloned()
            .collect();
        products.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(products)
    }

    async fn create(&self, payload: &NewProduct) -> StoreResult<Product> {
        self.track_call("create");
        self.check_writable()?;

        let mut products = self.products.lock().unwrap();
        let n = products.len() as i64 + 1;
        let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();

        let mut product = Product {
            id: format!("prod-{}", n),
            created_at: Some(base + Duration::minutes(n)),
            ..Default::default()
        };
        Self::apply(&mut product, payload);
        products.push(product.clone());

        self.created_by
            .lock()
            .unwrap()
            .insert(product.id.clone(), payload.created_by.clone());
        Ok(product)
    }

    async fn update(&self, id: &str, payload: &NewProduct) -> StoreResult<Product> {
        self.track_call("update");
        self.check_writable()?;

        let mut products = self.products.lock().unwrap();
        let product = products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| StoreError::NotFound(format!("Product {} not found", id)))?;
        Self::apply(product, payload);

        self.created_by
            .lock()
            .unwrap()
            .insert(id.to_string(), payload.created_by.clone());
        Ok(product.clone())
    }

    async fn delete(&self, id: &str) -> StoreResult<()> {
        self.track_call("delete");
        self.check_writable()?;

        let mut products = self.products.lock().unwrap();
        let before = products.len();
        products.retain(|p| p.id != id);
        if products.len() == before {
            return Err(StoreError::NotFound(format!("Product {} not found", id)));
        }
        Ok(())
    }
}
