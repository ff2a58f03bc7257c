//! REST API client for the shop backend.
//!
//! # Architecture
//!
//! - The backend is the source of truth - no local sync, direct API calls
//! - Every response crosses the schema-validated parse step in [`raw`]
//! - Catalog reads are cached in-memory via `moka` (5 minute TTL);
//!   mutations are never cached
//! - The bearer token from the current [`Session`] is attached to every
//!   request; a `401` purges the session and surfaces
//!   [`ApiError::Unauthorized`] so the caller can route to login
//!
//! Requests are not deduplicated or cancelled: a superseded in-flight
//! read can still resolve after a newer one. Callers that navigate
//! quickly must tolerate stale data.
//!
//! # Example
//!
//! ```rust,ignore
//! use velours_storefront::api::ApiClient;
//!
//! let api = ApiClient::new(&config, session);
//! let products = api.products(Some("unisexe")).await?;
//! let best = api.best_products(Some(4)).await?;
//! ```

pub mod raw;

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use secrecy::ExposeSecret;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, instrument};
use url::Url;

use velours_core::{OrderId, Product, ProductId, User};

use crate::checkout::OrderPayload;
use crate::config::StorefrontConfig;
use crate::session::Session;
use crate::storage::StorageError;

pub use raw::ParseError;

/// Errors that can occur when talking to the backend.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP transport failure.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend rejected the bearer token. The session has already
    /// been purged; the caller should route to login.
    #[error("unauthorized, session cleared")]
    Unauthorized,

    /// Non-success status with the backend's message body.
    #[error("API returned {status}: {message}")]
    Status {
        /// HTTP status code.
        status: reqwest::StatusCode,
        /// Response body, truncated.
        message: String,
    },

    /// A payload failed the schema-validated parse step.
    #[error("invalid payload: {0}")]
    Parse(#[from] ParseError),

    /// Persisting session state failed.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Successful login payload.
#[derive(Debug, Deserialize)]
struct LoginResponse {
    token: String,
    user: User,
}

/// Acknowledgement returned by order placement.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderConfirmation {
    /// Backend id of the created order, when provided.
    #[serde(default, alias = "_id")]
    pub id: Option<OrderId>,
}

/// Cached catalog responses.
#[derive(Clone)]
enum CacheValue {
    Listing(Arc<Vec<Product>>),
    One(Arc<Product>),
}

// =============================================================================
// ApiClient
// =============================================================================

/// Client for the shop's REST API.
///
/// Cheap to clone; all clones share the HTTP pool, cache, and session.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    http: reqwest::Client,
    api_base: Url,
    assets_base: Url,
    session: Session,
    cache: Cache<String, CacheValue>,
}

impl ApiClient {
    /// Create a new API client.
    #[must_use]
    pub fn new(config: &StorefrontConfig, session: Session) -> Self {
        let cache = Cache::builder()
            .max_capacity(1000)
            .time_to_live(Duration::from_secs(300)) // 5 minutes
            .build();

        Self {
            inner: Arc::new(ApiClientInner {
                http: reqwest::Client::new(),
                api_base: config.api_base(),
                assets_base: config.assets_base(),
                session,
                cache,
            }),
        }
    }

    /// The session this client authenticates with.
    #[must_use]
    pub fn session(&self) -> &Session {
        &self.inner.session
    }

    /// Build an endpoint URL under the API base.
    fn endpoint(&self, path: &str) -> Url {
        self.inner
            .api_base
            .join(path)
            .unwrap_or_else(|_| self.inner.api_base.clone())
    }

    /// Send a request with the bearer token attached.
    ///
    /// A `401` purges the session before surfacing
    /// [`ApiError::Unauthorized`]; any other non-success status is
    /// converted to [`ApiError::Status`] with the body text.
    async fn send(&self, request: reqwest::RequestBuilder) -> Result<reqwest::Response, ApiError> {
        let request = match self.inner.session.token() {
            Some(token) => request.bearer_auth(token.expose_secret()),
            None => request,
        };

        let response = request.send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED {
            if let Err(e) = self.inner.session.clear() {
                tracing::warn!(error = %e, "failed to purge session after 401");
            }
            return Err(ApiError::Unauthorized);
        }

        if !status.is_success() {
            let message: String = response.text().await?.chars().take(200).collect();
            return Err(ApiError::Status { status, message });
        }

        Ok(response)
    }

    // =========================================================================
    // Auth
    // =========================================================================

    /// Exchange credentials for a bearer token and persist the session.
    ///
    /// # Errors
    ///
    /// Returns an error on bad credentials, transport failure, or if the
    /// session cannot be persisted.
    #[instrument(skip(self, password), fields(email = %email))]
    pub async fn login(&self, email: &str, password: &str) -> Result<User, ApiError> {
        let body = serde_json::json!({ "email": email, "password": password });
        let response = self
            .send(self.inner.http.post(self.endpoint("auth/login")).json(&body))
            .await?;

        let login: LoginResponse = response.json().await?;
        self.inner.session.store(&login.token, &login.user)?;
        Ok(login.user)
    }

    /// Drop the stored token and profile.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the session keys cannot be removed.
    pub fn logout(&self) -> Result<(), StorageError> {
        self.inner.session.clear()
    }

    // =========================================================================
    // Products
    // =========================================================================

    /// Fetch the product listing, optionally scoped to a backend category.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or any record fails the
    /// parse step.
    #[instrument(skip(self))]
    pub async fn products(&self, category: Option<&str>) -> Result<Vec<Product>, ApiError> {
        let cache_key = format!("products:{}", category.unwrap_or("all"));

        if let Some(CacheValue::Listing(products)) = self.inner.cache.get(&cache_key).await {
            debug!("cache hit for product listing");
            return Ok(products.as_ref().clone());
        }

        let mut request = self.inner.http.get(self.endpoint("products"));
        if let Some(category) = category {
            request = request.query(&[("category", category)]);
        }

        let raw: Vec<raw::RawProduct> = self.send(request).await?.json().await?;
        let products = raw::parse_products(raw, &self.inner.assets_base)?;

        self.inner
            .cache
            .insert(cache_key, CacheValue::Listing(Arc::new(products.clone())))
            .await;
        Ok(products)
    }

    /// Fetch a single product by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the product is missing or fails the parse step.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn product(&self, id: &ProductId) -> Result<Product, ApiError> {
        let cache_key = format!("product:{id}");

        if let Some(CacheValue::One(product)) = self.inner.cache.get(&cache_key).await {
            debug!("cache hit for product");
            return Ok(product.as_ref().clone());
        }

        let request = self
            .inner
            .http
            .get(self.endpoint(&format!("products/{id}")));
        let raw: raw::RawProduct = self.send(request).await?.json().await?;
        let product = raw.into_product(&self.inner.assets_base)?;

        self.inner
            .cache
            .insert(cache_key, CacheValue::One(Arc::new(product.clone())))
            .await;
        Ok(product)
    }

    /// Fetch the best-seller shelf.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or any record fails the
    /// parse step.
    #[instrument(skip(self))]
    pub async fn best_products(&self, limit: Option<u32>) -> Result<Vec<Product>, ApiError> {
        let cache_key = format!("best:{}", limit.map_or_else(|| "default".into(), |l| l.to_string()));

        if let Some(CacheValue::Listing(products)) = self.inner.cache.get(&cache_key).await {
            debug!("cache hit for best products");
            return Ok(products.as_ref().clone());
        }

        let mut request = self.inner.http.get(self.endpoint("products/best"));
        if let Some(limit) = limit {
            request = request.query(&[("limit", limit)]);
        }

        let raw: Vec<raw::RawProduct> = self.send(request).await?.json().await?;
        let products = raw::parse_products(raw, &self.inner.assets_base)?;

        self.inner
            .cache
            .insert(cache_key, CacheValue::Listing(Arc::new(products.clone())))
            .await;
        Ok(products)
    }

    // =========================================================================
    // Orders
    // =========================================================================

    /// Submit a validated order payload.
    ///
    /// Never cached and never retried: on failure the caller keeps the
    /// cart intact and may resubmit.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the order or the request
    /// fails.
    #[instrument(skip(self, payload), fields(lines = payload.items.len()))]
    pub async fn place_order(&self, payload: &OrderPayload) -> Result<OrderConfirmation, ApiError> {
        let request = self.inner.http.post(self.endpoint("orders")).json(payload);
        let confirmation = self.send(request).await?.json().await?;
        Ok(confirmation)
    }
}
