//! Application startup.
//!
//! Wires the token store, the token endpoint, the transport and the gateway
//! together from the loaded configuration.

use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use crate::api::ApiClient;
use crate::auth::{HttpTokenEndpoint, Session, TokenEndpoint};
use crate::config::ConfigV1;
use crate::gateway::{build_client, AuthGateway, HttpTransport};
use crate::state::AppState;
use crate::store::{create_store, StoreError, TokenStore};

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("could not open token store: {0}")]
    Store(#[from] StoreError),
    #[error("could not build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Build the application state with the store selected in the configuration.
pub fn init(config: ConfigV1) -> Result<AppState, StartupError> {
    let store = create_store(&config.store)?;
    init_with_store(config, store)
}

/// Build the application state around an existing token store.
pub fn init_with_store(
    config: ConfigV1,
    store: Arc<dyn TokenStore>,
) -> Result<AppState, StartupError> {
    let config = Arc::new(config);
    let client = build_client(&config.api)?;

    let endpoint: Arc<dyn TokenEndpoint> = Arc::new(HttpTokenEndpoint::new(
        client.clone(),
        config.api.base_url.clone(),
    ));
    let transport = Arc::new(HttpTransport::new(client, config.api.base_url.clone()));
    let gateway = Arc::new(AuthGateway::new(transport, store.clone(), endpoint.clone()));

    info!("Using API at {}", config.api.base_url);

    Ok(AppState {
        session: Arc::new(Session::new(store.clone(), endpoint)),
        api: ApiClient::new(gateway),
        store,
        config,
    })
}
