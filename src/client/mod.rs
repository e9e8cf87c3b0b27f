//! HTTP clients for the hosted record store and the email verification API.
//!
//! Both clients are synchronous (`ureq`) and are called from async contexts
//! via `tokio::task::spawn_blocking`. The store speaks a PostgREST-style API:
//! tables are paths, filters are `column=eq.value` query parameters, and
//! server-side routines live under `/rpc/`.

mod async_wrapper;
mod verification;

pub use async_wrapper::{AsyncStoreClient, AsyncStoreClientImpl};
pub use verification::{
    EmailVerifier, VerificationClient, VerificationResponse, ZeroBounceVerifier,
};

use crate::config::Config;
use crate::error::{StoreError, StoreResult};
use crate::metrics::Metrics;
use crate::models::{
    NewOrganization, NewProduct, Organization, Product, Profile, ProfileOrganizationUpdate,
};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;

const ORGANIZATIONS_TABLE: &str = "companies";
const PROFILES_TABLE: &str = "profiles";
const PRODUCTS_TABLE: &str = "products";
const GENERATE_CODE_RPC: &str = "generate_unique_company_code";

/// Asks the store to answer a write with the affected rows.
const RETURN_REPRESENTATION: &str = "return=representation";

/// HTTP client for the hosted record store.
#[derive(Clone)]
pub struct StoreClient {
    /// Base URL of the REST endpoint
    base_url: String,

    /// API key for authentication
    api_key: String,

    /// HTTP client agent
    agent: Arc<ureq::Agent>,

    /// Metrics collector
    metrics: Metrics,
}

impl StoreClient {
    /// Create a new StoreClient from configuration.
    pub fn new(config: &Config) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(config.request_timeout))
            .build();

        Self {
            base_url: config.store_api_url.clone(),
            api_key: config.store_api_key.clone(),
            agent: Arc::new(agent),
            metrics: Metrics::new(),
        }
    }

    /// Create a StoreClient with a custom base URL (useful for testing).
    #[doc(hidden)]
    pub fn with_base_url(base_url: String, api_key: String) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(10))
            .build();

        Self {
            base_url,
            api_key,
            agent: Arc::new(agent),
            metrics: Metrics::new(),
        }
    }

    /// Record into a shared metrics collector.
    pub fn with_metrics(mut self, metrics: Metrics) -> Self {
        self.metrics = metrics;
        self
    }

    /// Get a reference to the metrics collector.
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Build a full URL from a path.
    fn build_url(&self, path: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{}/{}", base, path)
    }

    fn authorized(&self, method: &str, url: &str) -> ureq::Request {
        self.agent
            .request(method, url)
            .set("apikey", &self.api_key)
            .set("Authorization", &format!("Bearer {}", self.api_key))
            .set("Content-Type", "application/json")
    }

    /// Send a request, timing it and mapping failures to `StoreError`.
    fn send(
        &self,
        method: &str,
        path: &str,
        body: Option<&serde_json::Value>,
        prefer: Option<&str>,
    ) -> StoreResult<ureq::Response> {
        let timer = self.metrics.start_request();
        let url = self.build_url(path);
        tracing::debug!("{} {}", method, url);

        let mut request = self.authorized(method, &url);
        if let Some(prefer) = prefer {
            request = request.set("Prefer", prefer);
        }

        let result = match body {
            Some(body) => request.send_json(body),
            None => request.call(),
        }
        .map_err(|e| self.map_error(e));

        if let Err(e) = &result {
            tracing::error!("{} {} - Error: {:?}", method, url, e);
        }
        timer.finish(result.is_ok());

        result
    }

    /// Send a write that must touch at least one row and return the first one.
    fn write_returning<T: DeserializeOwned>(
        &self,
        method: &str,
        path: &str,
        body: &serde_json::Value,
    ) -> StoreResult<T> {
        let response = self.send(method, path, Some(body), Some(RETURN_REPRESENTATION))?;
        let rows: Vec<T> = Self::read_json(response)?;
        rows.into_iter()
            .next()
            .ok_or_else(|| StoreError::NotFound(format!("{} matched no rows", path)))
    }

    fn read_json<T: DeserializeOwned>(response: ureq::Response) -> StoreResult<T> {
        let body = response
            .into_string()
            .map_err(|e| StoreError::HttpError(e.to_string()))?;
        serde_json::from_str(&body).map_err(StoreError::JsonError)
    }

    /// Map a ureq error to a StoreError.
    fn map_error(&self, error: ureq::Error) -> StoreError {
        match error {
            ureq::Error::Status(code, response) => {
                let message = response
                    .into_string()
                    .unwrap_or_else(|_| "Unknown error".to_string());

                match code {
                    401 | 403 => StoreError::Unauthorized,
                    404 => StoreError::NotFound(message),
                    409 => StoreError::Conflict(message),
                    429 => StoreError::RateLimitExceeded,
                    _ => StoreError::ApiError {
                        status: code,
                        message,
                    },
                }
            }
            ureq::Error::Transport(transport) => {
                if transport.kind() == ureq::ErrorKind::ConnectionFailed {
                    StoreError::HttpError("Connection failed".to_string())
                } else if transport.kind() == ureq::ErrorKind::Io {
                    StoreError::Timeout
                } else {
                    StoreError::HttpError(transport.to_string())
                }
            }
        }
    }

    fn id_filter(table: &str, id: &str) -> String {
        format!("/{}?id=eq.{}", table, urlencoding::encode(id))
    }

    /// Fetch exactly one row from a `table?id=eq.{id}` filter.
    fn get_row<T: DeserializeOwned>(&self, table: &str, id: &str) -> StoreResult<T> {
        let path = format!("/{}?select=*&id=eq.{}", table, urlencoding::encode(id));
        let rows: Vec<T> = Self::read_json(self.send("GET", &path, None, None)?)?;
        rows.into_iter()
            .next()
            .ok_or_else(|| StoreError::NotFound(format!("{} {}", table, id)))
    }

    // ========================= Organization Operations =========================

    /// List every organization, in the store's listing order.
    pub fn list_organizations(&self) -> StoreResult<Vec<Organization>> {
        let path = format!("/{}?select=*", ORGANIZATIONS_TABLE);
        let organizations: Vec<Organization> =
            Self::read_json(self.send("GET", &path, None, None)?)?;
        self.metrics
            .record_organizations_fetched(organizations.len());
        Ok(organizations)
    }

    /// Get a single organization by ID.
    pub fn get_organization(&self, id: &str) -> StoreResult<Organization> {
        let organization = self.get_row(ORGANIZATIONS_TABLE, id)?;
        self.metrics.record_organizations_fetched(1);
        Ok(organization)
    }

    /// Insert a new organization and return the stored row.
    pub fn create_organization(&self, organization: &NewOrganization) -> StoreResult<Organization> {
        let body = serde_json::to_value(organization).map_err(StoreError::JsonError)?;
        self.write_returning("POST", &format!("/{}", ORGANIZATIONS_TABLE), &body)
    }

    /// Ask the store for a fresh, unused organization code.
    pub fn generate_organization_code(&self) -> StoreResult<String> {
        let path = format!("/rpc/{}", GENERATE_CODE_RPC);
        let code: String =
            Self::read_json(self.send("POST", &path, Some(&serde_json::json!({})), None)?)?;
        tracing::debug!("Generated organization code: {}", code);
        Ok(code)
    }

    // ========================= Profile Operations =========================

    /// Get a single profile by ID.
    pub fn get_profile(&self, id: &str) -> StoreResult<Profile> {
        self.get_row(PROFILES_TABLE, id)
    }

    /// Point a profile at an organization. Fails with `NotFound` when no
    /// profile row was updated.
    pub fn update_profile_organization(
        &self,
        profile_id: &str,
        organization_id: &str,
    ) -> StoreResult<()> {
        let update = ProfileOrganizationUpdate {
            company_id: organization_id.to_string(),
        };
        let body = serde_json::to_value(&update).map_err(StoreError::JsonError)?;
        let path = Self::id_filter(PROFILES_TABLE, profile_id);
        let _: Profile = self.write_returning("PATCH", &path, &body)?;
        Ok(())
    }

    // ========================= Product Operations =========================

    /// List a user's products, newest first.
    pub fn list_products(&self, user_id: &str) -> StoreResult<Vec<Product>> {
        let path = format!(
            "/{}?select=*&user_id=eq.{}&order=created_at.desc",
            PRODUCTS_TABLE,
            urlencoding::encode(user_id)
        );
        let products: Vec<Product> = Self::read_json(self.send("GET", &path, None, None)?)?;
        self.metrics.record_products_fetched(products.len());
        Ok(products)
    }

    /// Insert a product and return the stored row.
    pub fn create_product(&self, product: &NewProduct) -> StoreResult<Product> {
        let body = serde_json::to_value(product).map_err(StoreError::JsonError)?;
        self.write_returning("POST", &format!("/{}", PRODUCTS_TABLE), &body)
    }

    /// Overwrite a product's fields and return the updated row.
    pub fn update_product(&self, id: &str, product: &NewProduct) -> StoreResult<Product> {
        let body = serde_json::to_value(product).map_err(StoreError::JsonError)?;
        self.write_returning("PATCH", &Self::id_filter(PRODUCTS_TABLE, id), &body)
    }

    /// Delete a product by ID.
    pub fn delete_product(&self, id: &str) -> StoreResult<()> {
        let path = Self::id_filter(PRODUCTS_TABLE, id);
        let response = self.send("DELETE", &path, None, Some(RETURN_REPRESENTATION))?;
        let rows: Vec<serde_json::Value> = Self::read_json(response)?;
        if rows.is_empty() {
            return Err(StoreError::NotFound(format!("{} {}", PRODUCTS_TABLE, id)));
        }
        Ok(())
    }
}
