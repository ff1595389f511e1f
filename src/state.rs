//! Shared application state.
//!
//! Contains everything a command needs: the configuration, the token store,
//! the login session and the typed API client built on the gateway.

use crate::api::ApiClient;
use crate::auth::Session;
use crate::config::ConfigV1;
use crate::store::TokenStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded at startup.
    pub config: Arc<ConfigV1>,
    /// Where the access and refresh tokens live.
    pub store: Arc<dyn TokenStore>,
    /// Login and logout against the token endpoint.
    pub session: Arc<Session>,
    /// Catalog calls, all routed through the authenticated gateway.
    pub api: ApiClient,
}
