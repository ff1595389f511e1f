use async_trait::async_trait;
use http::StatusCode;
use thiserror::Error;
use tracing::debug;

use crate::models::{LoginRequest, RefreshRequest, RefreshResponse, TokenPair};
use crate::store::StoreError;
use crate::utils::join_url;

pub const LOGIN_PATH: &str = "/api/token/";
pub const REFRESH_PATH: &str = "/api/token/refresh/";

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("token endpoint rejected the request with {status}: {body}")]
    Rejected { status: StatusCode, body: String },
    #[error("failed to reach token endpoint: {0}")]
    Transport(String),
    #[error("unexpected token endpoint response: {0}")]
    InvalidResponse(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// The remote side of credential handling: minting a token pair at login, and a
/// fresh access token from a refresh token.
#[async_trait]
pub trait TokenEndpoint: Send + Sync {
    async fn obtain(&self, username: &str, password: &str) -> Result<TokenPair, AuthError>;
    async fn refresh(&self, refresh_token: &str) -> Result<String, AuthError>;
}

/// TokenEndpoint over HTTP. Uses its own client rather than the gateway, so a
/// failing refresh can never trigger another refresh.
pub struct HttpTokenEndpoint {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTokenEndpoint {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, AuthError>
    where
        B: serde::Serialize + ?Sized + Sync,
        T: serde::de::DeserializeOwned,
    {
        let url = join_url(&self.base_url, path);
        let resp = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| AuthError::Transport(format!("POST {}: {}", url, e)))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            debug!(%status, %url, "Token endpoint returned an error status");
            return Err(AuthError::Rejected { status, body });
        }

        resp.json::<T>()
            .await
            .map_err(|e| AuthError::InvalidResponse(e.to_string()))
    }
}

#[async_trait]
impl TokenEndpoint for HttpTokenEndpoint {
    async fn obtain(&self, username: &str, password: &str) -> Result<TokenPair, AuthError> {
        debug!(username, "Requesting a token pair");
        self.post(LOGIN_PATH, &LoginRequest { username, password })
            .await
    }

    async fn refresh(&self, refresh_token: &str) -> Result<String, AuthError> {
        debug!("Exchanging refresh token for a new access token");
        let resp: RefreshResponse = self
            .post(
                REFRESH_PATH,
                &RefreshRequest {
                    refresh: refresh_token,
                },
            )
            .await?;
        Ok(resp.access)
    }
}
