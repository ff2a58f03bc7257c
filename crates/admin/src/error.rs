//! Unified error handling for the back-office client.

use thiserror::Error;

use crate::raw::ParseError;
use crate::types::FormError;

/// Errors that can occur when driving the back-office API.
#[derive(Debug, Error)]
pub enum AdminError {
    /// HTTP transport failure.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend rejected the bearer token. The in-memory session has
    /// been dropped; log in again.
    #[error("unauthorized, session dropped")]
    Unauthorized,

    /// No login has happened yet.
    #[error("not logged in")]
    NotLoggedIn,

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

    /// A form failed client-side validation; nothing was sent.
    #[error("validation failed: {0}")]
    Validation(#[from] FormError),
}
