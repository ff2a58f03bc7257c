//! Back-office API client.

use std::sync::{Arc, RwLock};

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tracing::instrument;
use url::Url;

use velours_core::{Order, OrderId, ProductId, User, UserId};

use crate::config::AdminConfig;
use crate::error::AdminError;
use crate::raw;
use crate::types::{AdminStats, AdminUserUpdate, NewAdminUser, ProductForm};

/// Successful admin login payload.
#[derive(Debug, Deserialize)]
struct LoginResponse {
    token: String,
    user: raw::RawUser,
}

/// Client for the privileged back-office endpoints.
///
/// The bearer token lives in memory for the client's lifetime: call
/// [`AdminClient::login`] once, then drive the management endpoints. A
/// `401` drops the token and every later call fails with
/// [`AdminError::NotLoggedIn`] until the next login.
///
/// Cheap to clone; all clones share the HTTP pool and token.
#[derive(Clone)]
pub struct AdminClient {
    inner: Arc<AdminClientInner>,
}

struct AdminClientInner {
    http: reqwest::Client,
    api_base: Url,
    token: RwLock<Option<SecretString>>,
}

impl AdminClient {
    /// Create a new back-office client.
    #[must_use]
    pub fn new(config: &AdminConfig) -> Self {
        Self {
            inner: Arc::new(AdminClientInner {
                http: reqwest::Client::new(),
                api_base: config.api_base(),
                token: RwLock::new(None),
            }),
        }
    }

    /// Whether a login token is currently held.
    #[must_use]
    pub fn is_logged_in(&self) -> bool {
        self.read_token().is_some()
    }

    fn read_token(&self) -> Option<SecretString> {
        self.inner
            .token
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }

    fn write_token(&self, token: Option<SecretString>) {
        *self
            .inner
            .token
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner) = token;
    }

    fn endpoint(&self, path: &str) -> Url {
        self.inner
            .api_base
            .join(path)
            .unwrap_or_else(|_| self.inner.api_base.clone())
    }

    /// Send an authenticated request.
    ///
    /// Fails fast with [`AdminError::NotLoggedIn`] when no token is held;
    /// a `401` from the backend drops the token before surfacing
    /// [`AdminError::Unauthorized`].
    async fn send(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<reqwest::Response, AdminError> {
        let token = self.read_token().ok_or(AdminError::NotLoggedIn)?;
        let response = request.bearer_auth(token.expose_secret()).send().await?;
        self.check(response).await
    }

    /// Convert non-success statuses into errors.
    async fn check(&self, response: reqwest::Response) -> Result<reqwest::Response, AdminError> {
        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED {
            self.write_token(None);
            return Err(AdminError::Unauthorized);
        }

        if !status.is_success() {
            let message: String = response.text().await?.chars().take(200).collect();
            return Err(AdminError::Status { status, message });
        }

        Ok(response)
    }

    // =========================================================================
    // Auth
    // =========================================================================

    /// Exchange admin credentials for a bearer token.
    ///
    /// # Errors
    ///
    /// Returns an error on bad credentials or transport failure.
    #[instrument(skip(self, password), fields(email = %email))]
    pub async fn login(&self, email: &str, password: &str) -> Result<User, AdminError> {
        let body = serde_json::json!({ "email": email, "password": password });
        let response = self
            .inner
            .http
            .post(self.endpoint("admin/login"))
            .json(&body)
            .send()
            .await?;
        let response = self.check(response).await?;

        let login: LoginResponse = response.json().await?;
        let user = login.user.into_user()?;
        self.write_token(Some(SecretString::from(login.token)));
        Ok(user)
    }

    /// Drop the held token.
    pub fn logout(&self) {
        self.write_token(None);
    }

    // =========================================================================
    // Dashboard
    // =========================================================================

    /// Fetch the dashboard statistics.
    ///
    /// # Errors
    ///
    /// Returns an error if not logged in or the request fails.
    #[instrument(skip(self))]
    pub async fn stats(&self) -> Result<AdminStats, AdminError> {
        let response = self
            .send(self.inner.http.get(self.endpoint("admin/stats")))
            .await?;
        Ok(response.json().await?)
    }

    // =========================================================================
    // Orders
    // =========================================================================

    /// Fetch every order, newest first as the backend returns them.
    ///
    /// # Errors
    ///
    /// Returns an error if not logged in, the request fails, or any
    /// record fails the parse step.
    #[instrument(skip(self))]
    pub async fn orders(&self) -> Result<Vec<Order>, AdminError> {
        let response = self
            .send(self.inner.http.get(self.endpoint("orders")))
            .await?;
        let raw: Vec<raw::RawOrder> = response.json().await?;
        Ok(raw::parse_orders(raw)?)
    }

    /// Approve a pending order.
    ///
    /// # Errors
    ///
    /// Returns an error if not logged in or the backend rejects the
    /// transition.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn approve_order(&self, id: &OrderId) -> Result<(), AdminError> {
        self.send(
            self.inner
                .http
                .post(self.endpoint(&format!("orders/{id}/approve"))),
        )
        .await?;
        Ok(())
    }

    /// Reject a pending order.
    ///
    /// # Errors
    ///
    /// Returns an error if not logged in or the backend rejects the
    /// transition.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn reject_order(&self, id: &OrderId) -> Result<(), AdminError> {
        self.send(
            self.inner
                .http
                .post(self.endpoint(&format!("orders/{id}/reject"))),
        )
        .await?;
        Ok(())
    }

    /// Delete an order.
    ///
    /// # Errors
    ///
    /// Returns an error if not logged in or the request fails.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn delete_order(&self, id: &OrderId) -> Result<(), AdminError> {
        self.send(
            self.inner
                .http
                .delete(self.endpoint(&format!("orders/{id}"))),
        )
        .await?;
        Ok(())
    }

    /// Download an order's PDF receipt.
    ///
    /// # Errors
    ///
    /// Returns an error if not logged in or the request fails.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn order_pdf(&self, id: &OrderId) -> Result<Vec<u8>, AdminError> {
        let response = self
            .send(
                self.inner
                    .http
                    .get(self.endpoint(&format!("orders/{id}/pdf"))),
            )
            .await?;
        Ok(response.bytes().await?.to_vec())
    }

    // =========================================================================
    // Admin users
    // =========================================================================

    /// List the admin accounts.
    ///
    /// # Errors
    ///
    /// Returns an error if not logged in, the request fails, or any
    /// record fails the parse step.
    #[instrument(skip(self))]
    pub async fn users(&self) -> Result<Vec<User>, AdminError> {
        let response = self
            .send(self.inner.http.get(self.endpoint("admin/users")))
            .await?;
        let raw: Vec<raw::RawUser> = response.json().await?;
        Ok(raw::parse_users(raw)?)
    }

    /// Create an admin account.
    ///
    /// # Errors
    ///
    /// Returns an error if not logged in or the backend rejects the
    /// payload.
    #[instrument(skip(self, user), fields(email = %user.email))]
    pub async fn create_user(&self, user: &NewAdminUser) -> Result<User, AdminError> {
        let response = self
            .send(
                self.inner
                    .http
                    .post(self.endpoint("admin/users"))
                    .json(user),
            )
            .await?;
        let raw: raw::RawUser = response.json().await?;
        Ok(raw.into_user()?)
    }

    /// Update an admin account.
    ///
    /// # Errors
    ///
    /// Returns an error if not logged in or the backend rejects the
    /// payload.
    #[instrument(skip(self, update), fields(id = %id))]
    pub async fn update_user(
        &self,
        id: &UserId,
        update: &AdminUserUpdate,
    ) -> Result<(), AdminError> {
        self.send(
            self.inner
                .http
                .put(self.endpoint(&format!("admin/users/{id}")))
                .json(update),
        )
        .await?;
        Ok(())
    }

    /// Approve a pending admin account.
    ///
    /// # Errors
    ///
    /// Returns an error if not logged in or the request fails.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn approve_user(&self, id: &UserId) -> Result<(), AdminError> {
        self.send(
            self.inner
                .http
                .post(self.endpoint(&format!("admin/users/{id}/approve"))),
        )
        .await?;
        Ok(())
    }

    /// Delete an admin account.
    ///
    /// # Errors
    ///
    /// Returns an error if not logged in or the request fails.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn delete_user(&self, id: &UserId) -> Result<(), AdminError> {
        self.send(
            self.inner
                .http
                .delete(self.endpoint(&format!("admin/users/{id}"))),
        )
        .await?;
        Ok(())
    }

    // =========================================================================
    // Products
    // =========================================================================

    /// Create a product from a validated form.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::Validation`] without touching the network if
    /// the form is invalid, or an API error otherwise.
    #[instrument(skip(self, form), fields(name = %form.name))]
    pub async fn create_product(&self, form: ProductForm) -> Result<(), AdminError> {
        let multipart = form.into_multipart()?;
        self.send(
            self.inner
                .http
                .post(self.endpoint("products"))
                .multipart(multipart),
        )
        .await?;
        Ok(())
    }

    /// Update a product from a validated form.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::Validation`] without touching the network if
    /// the form is invalid, or an API error otherwise.
    #[instrument(skip(self, form), fields(id = %id))]
    pub async fn update_product(
        &self,
        id: &ProductId,
        form: ProductForm,
    ) -> Result<(), AdminError> {
        let multipart = form.into_multipart()?;
        self.send(
            self.inner
                .http
                .put(self.endpoint(&format!("products/{id}")))
                .multipart(multipart),
        )
        .await?;
        Ok(())
    }

    /// Delete a product.
    ///
    /// # Errors
    ///
    /// Returns an error if not logged in or the request fails.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn delete_product(&self, id: &ProductId) -> Result<(), AdminError> {
        self.send(
            self.inner
                .http
                .delete(self.endpoint(&format!("products/{id}"))),
        )
        .await?;
        Ok(())
    }
}
