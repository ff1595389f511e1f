use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tracing::info;

use super::{file_store::FileStore, memory_store::MemoryStore};
use crate::config::{StoreBackend, StoreConfig};

/// Key under which the short-lived access token is kept.
pub const ACCESS_TOKEN_KEY: &str = "access";
/// Key under which the refresh token is kept.
pub const REFRESH_TOKEN_KEY: &str = "refresh";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("token store I/O error on '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("token store file '{path}' is corrupt: {source}")]
    Corrupt {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("no location for the token store: set store.path in the config")]
    NoLocation,
}

/// The TokenStore trait abstracts credential storage as a small key-value map.
///
/// Callers must not cache values across requests: every read goes back to the store
/// so a token written by one request is seen by the next.
#[async_trait]
pub trait TokenStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
    async fn remove(&self, key: &str) -> Result<(), StoreError>;
    fn is_persistent(&self) -> bool {
        true
    }
}

/// Creates a concrete store implementation based on the StoreConfig.
/// If `store.persistent = false`, returns a MemoryStore. Otherwise, picks the specified backend.
pub fn create_store(config: &StoreConfig) -> Result<Arc<dyn TokenStore>, StoreError> {
    if !config.persistent {
        info!("Token store is not persistent. Using MemoryStore.");
        return Ok(Arc::new(MemoryStore::new()));
    }

    match &config.backend {
        Some(StoreBackend::File(file_config)) => {
            let path = match &file_config.path {
                Some(path) => path.clone(),
                None => FileStore::default_path().ok_or(StoreError::NoLocation)?,
            };
            info!("Using file token store at '{}'", path.display());
            Ok(Arc::new(FileStore::new(path)))
        }
        None => {
            info!("Store is persistent but no backend is configured; using the default file store.");
            let path = FileStore::default_path().ok_or(StoreError::NoLocation)?;
            Ok(Arc::new(FileStore::new(path)))
        }
    }
}
