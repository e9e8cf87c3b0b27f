//! Product inventory service.
//!
//! Turns raw form input into store payloads and scopes every operation to the
//! signed-in user.

use crate::error::{ProductError, ProductResult};
use crate::models::{FabricStatus, NewProduct, Product, ProductForm};
use crate::repositories::ProductRepository;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

fn require_user(user_id: Option<&str>) -> ProductResult<&str> {
    user_id
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .ok_or(ProductError::Unauthenticated)
}

fn optional_text(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

fn parse_quantity(field: &'static str, value: &str) -> ProductResult<i64> {
    value
        .trim()
        .parse::<i64>()
        .ok()
        .filter(|n| *n >= 0)
        .ok_or_else(|| ProductError::InvalidQuantity {
            field,
            value: value.to_string(),
        })
}

/// Check a product form and build the store payload.
///
/// Checks run in order: signed-in user, non-blank name, ordered quantity,
/// then the optional produced quantity and fabric status. Blank optional
/// fields become `None`. `created_by` is only set when `creating`.
pub fn validate_form(
    user_id: Option<&str>,
    form: &ProductForm,
    creating: bool,
) -> ProductResult<NewProduct> {
    let user_id = require_user(user_id)?;

    let name = form.name.trim();
    if name.is_empty() {
        return Err(ProductError::EmptyName);
    }

    let stock_quantity = parse_quantity("stock_quantity", &form.stock_quantity)?;
    let min_stock_level = match optional_text(&form.min_stock_level) {
        Some(value) => Some(parse_quantity("min_stock_level", &value)?),
        None => None,
    };
    let fabric_status = match optional_text(&form.fabric_status) {
        Some(value) => Some(
            value
                .parse::<FabricStatus>()
                .map_err(ProductError::UnknownFabricStatus)?,
        ),
        None => None,
    };

    Ok(NewProduct {
        user_id: user_id.to_string(),
        name: name.to_string(),
        model: optional_text(&form.model),
        stock_quantity,
        min_stock_level,
        color: optional_text(&form.color),
        order_number: optional_text(&form.order_number),
        ordering_brand: optional_text(&form.ordering_brand),
        fabric_number: optional_text(&form.fabric_number),
        fabric_status,
        updated_by: user_id.to_string(),
        created_by: creating.then(|| user_id.to_string()),
    })
}

/// Case-insensitive substring match on name, model or ordering brand.
///
/// A blank term matches everything. Input order is kept.
pub fn filter_products<'a>(products: &'a [Product], term: &str) -> Vec<&'a Product> {
    let term = term.trim().to_lowercase();
    let contains = |field: Option<&str>| field.is_some_and(|f| f.to_lowercase().contains(&term));

    products
        .iter()
        .filter(|p| {
            term.is_empty()
                || contains(Some(p.name.as_str()))
                || contains(p.model.as_deref())
                || contains(p.ordering_brand.as_deref())
        })
        .collect()
}

#[async_trait]
pub trait ProductService: Send + Sync {
    /// The user's products, newest first.
    async fn list_for_user(&self, user_id: Option<&str>) -> ProductResult<Vec<Product>>;

    /// The user's products filtered by [`filter_products`].
    async fn search(&self, user_id: Option<&str>, term: &str) -> ProductResult<Vec<Product>>;

    /// Insert a new product, or update `existing` in place.
    async fn save(
        &self,
        user_id: Option<&str>,
        form: &ProductForm,
        existing: Option<&Product>,
    ) -> ProductResult<Product>;

    async fn delete(&self, user_id: Option<&str>, product_id: &str) -> ProductResult<()>;
}

pub struct ProductServiceImpl {
    products: Arc<dyn ProductRepository>,
}

impl ProductServiceImpl {
    pub fn new(products: Arc<dyn ProductRepository>) -> Self {
        Self { products }
    }
}

#[async_trait]
impl ProductService for ProductServiceImpl {
    async fn list_for_user(&self, user_id: Option<&str>) -> ProductResult<Vec<Product>> {
        let user_id = require_user(user_id)?;
        Ok(self.products.list_for_user(user_id).await?)
    }

    async fn search(&self, user_id: Option<&str>, term: &str) -> ProductResult<Vec<Product>> {
        let products = self.list_for_user(user_id).await?;
        Ok(filter_products(&products, term)
            .into_iter()
            .cloned()
            .collect())
    }

    async fn save(
        &self,
        user_id: Option<&str>,
        form: &ProductForm,
        existing: Option<&Product>,
    ) -> ProductResult<Product> {
        let payload = validate_form(user_id, form, existing.is_none())?;

        let saved = match existing {
            Some(product) => self.products.update(&product.id, &payload).await?,
            None => self.products.create(&payload).await?,
        };

        info!(
            "User {} {} product {}",
            payload.user_id,
            if existing.is_some() { "updated" } else { "created" },
            saved.id
        );
        Ok(saved)
    }

    async fn delete(&self, user_id: Option<&str>, product_id: &str) -> ProductResult<()> {
        let user_id = require_user(user_id)?;
        self.products.delete(product_id).await?;
        info!("User {} deleted product {}", user_id, product_id);
        Ok(())
    }
}
