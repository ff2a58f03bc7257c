//! Back-office configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `VELOURS_API_URL` - Backend origin (default: <http://localhost:5000>).
//!   Shared with the storefront; the back office talks to the same API.

use thiserror::Error;
use url::Url;

/// Default backend origin for local development.
const DEFAULT_API_ORIGIN: &str = "http://localhost:5000";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Back-office client configuration.
#[derive(Debug, Clone)]
pub struct AdminConfig {
    /// Backend origin (scheme + host + port, no path).
    pub origin: Url,
}

impl AdminConfig {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `VELOURS_API_URL` is present but not a
    /// valid absolute URL.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();

        let origin = std::env::var("VELOURS_API_URL")
            .unwrap_or_else(|_| DEFAULT_API_ORIGIN.to_owned());
        let origin = Url::parse(&origin)
            .map_err(|e| ConfigError::InvalidEnvVar("VELOURS_API_URL".to_owned(), e.to_string()))?;

        Ok(Self { origin })
    }

    /// REST API base URL (`{origin}/api/`), trailing slash kept for
    /// `Url::join`.
    #[must_use]
    pub fn api_base(&self) -> Url {
        self.origin
            .join("api/")
            .unwrap_or_else(|_| self.origin.clone())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_api_base_joins_admin_endpoints() {
        let config = AdminConfig {
            origin: Url::parse("https://shop.example.com").unwrap(),
        };
        let url = config.api_base().join("admin/stats").unwrap();
        assert_eq!(url.as_str(), "https://shop.example.com/api/admin/stats");
    }
}
