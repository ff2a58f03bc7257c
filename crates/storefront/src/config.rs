//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `VELOURS_API_URL` - Backend origin (default: <http://localhost:5000>).
//!   The REST base is `{origin}/api` and uploaded assets are served from
//!   `{origin}/uploads`.
//! - `VELOURS_DATA_DIR` - Directory for locally persisted state (cart,
//!   favorites, session). Default: `.velours` in the working directory.

use std::path::PathBuf;

use thiserror::Error;
use url::Url;

/// Default backend origin for local development.
const DEFAULT_API_ORIGIN: &str = "http://localhost:5000";

/// Default directory for locally persisted state.
const DEFAULT_DATA_DIR: &str = ".velours";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront client configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Backend origin (scheme + host + port, no path).
    pub origin: Url,
    /// Directory for locally persisted state.
    pub data_dir: PathBuf,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `VELOURS_API_URL` is present but not a
    /// valid absolute URL.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let origin = get_env_or_default("VELOURS_API_URL", DEFAULT_API_ORIGIN);
        let origin = Url::parse(&origin)
            .map_err(|e| ConfigError::InvalidEnvVar("VELOURS_API_URL".to_owned(), e.to_string()))?;

        let data_dir = PathBuf::from(get_env_or_default("VELOURS_DATA_DIR", DEFAULT_DATA_DIR));

        Ok(Self { origin, data_dir })
    }

    /// REST API base URL (`{origin}/api/`).
    ///
    /// Kept with a trailing slash so `Url::join` appends rather than
    /// replaces path segments.
    #[must_use]
    pub fn api_base(&self) -> Url {
        join_origin(&self.origin, "api/")
    }

    /// Base URL for uploaded assets (`{origin}/`).
    ///
    /// Backend image paths are rooted (`/uploads/...`), so joining them
    /// against the origin yields the absolute URL.
    #[must_use]
    pub fn assets_base(&self) -> Url {
        self.origin.clone()
    }
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_owned())
}

/// Join a relative path onto an origin URL.
///
/// The origin was validated at load time, so joining a static suffix
/// cannot fail.
fn join_origin(origin: &Url, suffix: &str) -> Url {
    origin.join(suffix).unwrap_or_else(|_| origin.clone())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn config_with_origin(origin: &str) -> StorefrontConfig {
        StorefrontConfig {
            origin: Url::parse(origin).unwrap(),
            data_dir: PathBuf::from(".velours"),
        }
    }

    #[test]
    fn test_api_base_appends_api_path() {
        let config = config_with_origin("http://localhost:5000");
        assert_eq!(config.api_base().as_str(), "http://localhost:5000/api/");
    }

    #[test]
    fn test_api_base_joins_endpoints() {
        let config = config_with_origin("https://shop.example.com");
        let url = config.api_base().join("products/best").unwrap();
        assert_eq!(url.as_str(), "https://shop.example.com/api/products/best");
    }

    #[test]
    fn test_assets_base_resolves_rooted_paths() {
        let config = config_with_origin("https://shop.example.com");
        let url = config.assets_base().join("/uploads/veste.jpg").unwrap();
        assert_eq!(url.as_str(), "https://shop.example.com/uploads/veste.jpg");
    }
}
