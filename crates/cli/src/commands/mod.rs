//! CLI command implementations.

// User-facing CLI output goes to stdout by design.
#![allow(clippy::print_stdout)]

pub mod admin;
pub mod cart;
pub mod favorites;
pub mod order;
pub mod products;

use std::error::Error;
use std::sync::Arc;

use velours_storefront::api::ApiClient;
use velours_storefront::config::StorefrontConfig;
use velours_storefront::session::Session;
use velours_storefront::storage::{FileStorage, StorageBackend};

/// Shared handles for storefront commands.
pub struct Context {
    pub storage: Arc<dyn StorageBackend>,
    pub api: ApiClient,
}

/// Build the storefront context from the environment.
pub fn context() -> Result<Context, Box<dyn Error>> {
    let config = StorefrontConfig::from_env()?;
    let storage: Arc<dyn StorageBackend> = Arc::new(FileStorage::new(&config.data_dir)?);
    let session = Session::new(Arc::clone(&storage));
    let api = ApiClient::new(&config, session);
    Ok(Context { storage, api })
}
