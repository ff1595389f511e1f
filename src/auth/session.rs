use std::sync::Arc;

use tracing::{info, warn};

use super::endpoint::{AuthError, TokenEndpoint};
use crate::models::TokenPair;
use crate::store::{StoreError, TokenStore, ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY};

/// Login state of this client installation, backed by the token store.
pub struct Session {
    store: Arc<dyn TokenStore>,
    endpoint: Arc<dyn TokenEndpoint>,
}

impl Session {
    pub fn new(store: Arc<dyn TokenStore>, endpoint: Arc<dyn TokenEndpoint>) -> Self {
        Self { store, endpoint }
    }

    /// Exchange credentials for a token pair and store both tokens.
    pub async fn login(&self, username: &str, password: &str) -> Result<(), AuthError> {
        let pair = self.endpoint.obtain(username, password).await?;
        if let Err(e) = self.store_pair(&pair).await {
            // both tokens or neither
            if let Err(cleanup) = clear_credentials(self.store.as_ref()).await {
                warn!(error = %cleanup, "Failed to erase partially written tokens");
            }
            return Err(e.into());
        }
        info!(username, "Logged in");
        Ok(())
    }

    async fn store_pair(&self, pair: &TokenPair) -> Result<(), StoreError> {
        self.store.set(ACCESS_TOKEN_KEY, &pair.access).await?;
        self.store.set(REFRESH_TOKEN_KEY, &pair.refresh).await
    }

    /// Forget both tokens.
    pub async fn logout(&self) -> Result<(), StoreError> {
        clear_credentials(self.store.as_ref()).await?;
        info!("Logged out");
        Ok(())
    }

    /// The stored pair, or `None` unless both tokens are present.
    pub async fn tokens(&self) -> Result<Option<TokenPair>, StoreError> {
        let access = self.store.get(ACCESS_TOKEN_KEY).await?;
        let refresh = self.store.get(REFRESH_TOKEN_KEY).await?;
        Ok(match (access, refresh) {
            (Some(access), Some(refresh)) => Some(TokenPair { access, refresh }),
            _ => None,
        })
    }

    pub async fn is_authenticated(&self) -> Result<bool, StoreError> {
        Ok(self.tokens().await?.is_some())
    }
}

/// Erase both tokens. Both removals are attempted even if the first fails.
pub async fn clear_credentials(store: &dyn TokenStore) -> Result<(), StoreError> {
    let access = store.remove(ACCESS_TOKEN_KEY).await;
    let refresh = store.remove(REFRESH_TOKEN_KEY).await;
    access.and(refresh)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::HttpTokenEndpoint;
    use crate::store::MemoryStore;
    use mockito::Server;

    fn session_with(store: Arc<MemoryStore>, base_url: String) -> Session {
        Session::new(
            store,
            Arc::new(HttpTokenEndpoint::new(reqwest::Client::new(), base_url)),
        )
    }

    #[tokio::test]
    async fn login_writes_both_tokens() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("POST", "/api/token/")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"access": "A1", "refresh": "R1"}"#)
            .create_async()
            .await;

        let store = Arc::new(MemoryStore::new());
        let session = session_with(store.clone(), server.url());

        assert!(!session.is_authenticated().await.unwrap());
        session.login("admin", "pw").await.unwrap();

        assert_eq!(store.get(ACCESS_TOKEN_KEY).await.unwrap().as_deref(), Some("A1"));
        assert_eq!(store.get(REFRESH_TOKEN_KEY).await.unwrap().as_deref(), Some("R1"));
        assert!(session.is_authenticated().await.unwrap());
    }

    #[tokio::test]
    async fn failed_login_leaves_store_untouched() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("POST", "/api/token/")
            .with_status(401)
            .with_body(r#"{"detail": "No active account found with the given credentials"}"#)
            .create_async()
            .await;

        let store = Arc::new(MemoryStore::new());
        let session = session_with(store.clone(), server.url());

        let err = session.login("admin", "wrong").await.unwrap_err();
        assert!(matches!(err, AuthError::Rejected { .. }));
        assert_eq!(store.get(ACCESS_TOKEN_KEY).await.unwrap(), None);
    }

    /// Accepts the access token but fails to persist the refresh token.
    struct RefreshWriteFails(MemoryStore);

    #[async_trait::async_trait]
    impl TokenStore for RefreshWriteFails {
        async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
            self.0.get(key).await
        }

        async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
            if key == REFRESH_TOKEN_KEY {
                return Err(StoreError::Io {
                    path: "tokens.json".to_string(),
                    source: std::io::Error::new(std::io::ErrorKind::Other, "disk full"),
                });
            }
            self.0.set(key, value).await
        }

        async fn remove(&self, key: &str) -> Result<(), StoreError> {
            self.0.remove(key).await
        }
    }

    #[tokio::test]
    async fn half_written_login_is_rolled_back() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("POST", "/api/token/")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"access": "A1", "refresh": "R1"}"#)
            .create_async()
            .await;

        let store = Arc::new(RefreshWriteFails(MemoryStore::new()));
        let session = Session::new(
            store.clone(),
            Arc::new(HttpTokenEndpoint::new(reqwest::Client::new(), server.url())),
        );

        let err = session.login("admin", "pw").await.unwrap_err();

        assert!(matches!(err, AuthError::Store(StoreError::Io { .. })));
        assert_eq!(store.get(ACCESS_TOKEN_KEY).await.unwrap(), None);
        assert_eq!(store.get(REFRESH_TOKEN_KEY).await.unwrap(), None);
    }

    #[tokio::test]
    async fn partial_state_is_not_authenticated() {
        let store = Arc::new(MemoryStore::new());
        store.set(ACCESS_TOKEN_KEY, "A1").await.unwrap();
        let session = session_with(store, "http://127.0.0.1:1".to_string());

        assert!(session.tokens().await.unwrap().is_none());
        assert!(!session.is_authenticated().await.unwrap());
    }

    #[tokio::test]
    async fn logout_erases_both_tokens() {
        let store = Arc::new(MemoryStore::new());
        store.set(ACCESS_TOKEN_KEY, "A1").await.unwrap();
        store.set(REFRESH_TOKEN_KEY, "R1").await.unwrap();
        let session = session_with(store.clone(), "http://127.0.0.1:1".to_string());

        session.logout().await.unwrap();

        assert_eq!(store.get(ACCESS_TOKEN_KEY).await.unwrap(), None);
        assert_eq!(store.get(REFRESH_TOKEN_KEY).await.unwrap(), None);
    }
}
