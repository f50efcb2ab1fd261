//! # HTTP Product Service
//!
//! [`ProductService`] over the catalog REST API, built on `reqwest`.
//!
//! ## Endpoints
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        REST Endpoints                                   │
//! │                                                                         │
//! │  fetch_all         GET     {base}{products_path}                       │
//! │  fetch_categories  GET     {base}{categories_path}                     │
//! │  create            POST    {base}{products_path}         (no id)       │
//! │  update            PUT     {base}{products_path}/{id}                  │
//! │  delete            DELETE  {base}{products_path}/{id}                  │
//! │                                                                         │
//! │  Non-2xx           → ClientError::Status                               │
//! │  No response       → ClientError::Request (includes timeouts)          │
//! │  Unexpected body   → ClientError::Decode                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::time::Duration;

use async_trait::async_trait;
use catalog_core::{Category, Product};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

use crate::error::{ClientError, ClientResult};
use crate::service::ProductService;

// =============================================================================
// Client Configuration
// =============================================================================

/// Default API root.
pub const DEFAULT_BASE_URL: &str = "https://fakestoreapi.com";

/// Default products collection path.
pub const DEFAULT_PRODUCTS_PATH: &str = "/products";

/// Default categories path.
pub const DEFAULT_CATEGORIES_PATH: &str = "/products/categories";

/// Connection settings for [`HttpProductService`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API root, e.g. `https://fakestoreapi.com`.
    pub base_url: String,

    /// Path of the products collection.
    pub products_path: String,

    /// Path of the category list.
    pub categories_path: String,

    /// Whole-request timeout.
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            base_url: DEFAULT_BASE_URL.to_string(),
            products_path: DEFAULT_PRODUCTS_PATH.to_string(),
            categories_path: DEFAULT_CATEGORIES_PATH.to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

impl ClientConfig {
    /// Creates a config for the given API root with default paths.
    pub fn new(base_url: impl Into<String>) -> Self {
        ClientConfig {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn join(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    /// Full URL of the products collection.
    pub fn products_url(&self) -> String {
        self.join(&self.products_path)
    }

    /// Full URL of the category list.
    pub fn categories_url(&self) -> String {
        self.join(&self.categories_path)
    }

    /// Full URL of a single product.
    pub fn product_url(&self, id: u64) -> String {
        format!("{}/{}", self.products_url(), id)
    }
}

// =============================================================================
// HTTP Product Service
// =============================================================================

/// Product service that talks JSON over HTTP.
#[derive(Debug, Clone)]
pub struct HttpProductService {
    http: Client,
    config: ClientConfig,
}

impl HttpProductService {
    /// Builds the service.
    ///
    /// ## Errors
    /// `InvalidConfig` if the base URL is not an http(s) URL or the
    /// underlying client cannot be constructed.
    pub fn new(config: ClientConfig) -> ClientResult<Self> {
        let base = Url::parse(&config.base_url)
            .map_err(|e| ClientError::InvalidConfig(format!("base URL: {e}")))?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(ClientError::InvalidConfig(format!(
                "base URL must be http or https, got {}",
                base.scheme()
            )));
        }

        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ClientError::InvalidConfig(e.to_string()))?;

        Ok(HttpProductService { http, config })
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Sends a request and decodes a JSON body.
    async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        url: &str,
    ) -> ClientResult<T> {
        let response = self.send(request, url).await?;

        let body = response.bytes().await.map_err(|source| ClientError::Request {
            url: url.to_string(),
            source,
        })?;

        serde_json::from_slice(&body).map_err(|source| {
            warn!(url = %url, error = %source, "Unexpected response body");
            ClientError::Decode {
                url: url.to_string(),
                source,
            }
        })
    }

    /// Sends a request and checks the status.
    async fn send(&self, request: RequestBuilder, url: &str) -> ClientResult<reqwest::Response> {
        let response = request.send().await.map_err(|source| {
            warn!(url = %url, error = %source, "Request failed");
            ClientError::Request {
                url: url.to_string(),
                source,
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!(url = %url, status = status.as_u16(), "Request returned error status");
            return Err(ClientError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        Ok(response)
    }
}

#[async_trait]
impl ProductService for HttpProductService {
    async fn fetch_all(&self) -> ClientResult<Vec<Product>> {
        let url = self.config.products_url();
        debug!(url = %url, "Fetching products");

        let products: Vec<Product> = self.send_json(self.http.get(&url), &url).await?;
        Ok(products
            .into_iter()
            .map(Product::with_default_image)
            .collect())
    }

    async fn fetch_categories(&self) -> ClientResult<Vec<Category>> {
        let url = self.config.categories_url();
        debug!(url = %url, "Fetching categories");

        self.send_json(self.http.get(&url), &url).await
    }

    async fn create(&self, product: &Product) -> ClientResult<Product> {
        let url = self.config.products_url();
        debug!(url = %url, title = %product.title, "Creating product");

        let mut body = product.clone();
        body.id = None;
        self.send_json(self.http.post(&url).json(&body), &url).await
    }

    async fn update(&self, product: &Product) -> ClientResult<Product> {
        let id = product.id.ok_or(ClientError::MissingId)?;
        let url = self.config.product_url(id);
        debug!(url = %url, "Updating product");

        self.send_json(self.http.put(&url).json(product), &url).await
    }

    async fn delete(&self, id: u64) -> ClientResult<()> {
        let url = self.config.product_url(id);
        debug!(url = %url, "Deleting product");

        self.send(self.http.delete(&url), &url).await?;
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
