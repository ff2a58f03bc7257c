//! Authenticated session state.
//!
//! The bearer token and user profile live under their own storage keys and
//! survive restarts, matching the browser client's `localStorage` layout.
//! The token is exposed to callers only as a [`SecretString`].

use std::sync::Arc;

use secrecy::SecretString;
use tracing::warn;

use velours_core::User;

use crate::storage::{StorageBackend, StorageError, keys};

/// Handle to the persisted auth session.
///
/// Cheap to clone; all clones share the same storage backend.
#[derive(Clone)]
pub struct Session {
    storage: Arc<dyn StorageBackend>,
}

impl Session {
    /// Create a session handle over a storage backend.
    #[must_use]
    pub fn new(storage: Arc<dyn StorageBackend>) -> Self {
        Self { storage }
    }

    /// Persist the credentials returned by a successful login.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if either key cannot be written.
    pub fn store(&self, token: &str, user: &User) -> Result<(), StorageError> {
        self.storage.set(keys::TOKEN, token)?;
        let profile = serde_json::to_string(user).unwrap_or_else(|e| {
            // A User always serializes; keep the token usable regardless.
            warn!(error = %e, "failed to serialize user profile");
            String::from("null")
        });
        self.storage.set(keys::USER_INFO, &profile)
    }

    /// The stored bearer token, if any.
    #[must_use]
    pub fn token(&self) -> Option<SecretString> {
        match self.storage.get(keys::TOKEN) {
            Ok(token) => token.map(SecretString::from),
            Err(e) => {
                warn!(error = %e, "failed to read session token");
                None
            }
        }
    }

    /// The stored user profile, if any.
    ///
    /// A profile that no longer deserializes is discarded (with a warning)
    /// rather than surfaced as an error.
    #[must_use]
    pub fn current_user(&self) -> Option<User> {
        let raw = match self.storage.get(keys::USER_INFO) {
            Ok(raw) => raw?,
            Err(e) => {
                warn!(error = %e, "failed to read user profile");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                warn!(error = %e, "discarding unreadable user profile");
                let _ = self.storage.remove(keys::USER_INFO);
                None
            }
        }
    }

    /// Whether a token is currently stored.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    /// Purge the token and profile.
    ///
    /// Called on explicit logout and whenever the backend answers `401`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if either key cannot be removed.
    pub fn clear(&self) -> Result<(), StorageError> {
        self.storage.remove(keys::TOKEN)?;
        self.storage.remove(keys::USER_INFO)
    }
}
