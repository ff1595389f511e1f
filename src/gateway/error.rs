use http::{Method, StatusCode};
use thiserror::Error;

use super::transport::TransportError;
use crate::auth::AuthError;
use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum GatewayError {
    /// The API answered with a non-2xx status. Covers a 401 that could not be
    /// refreshed as well as whatever the single retry returned.
    #[error("{method} {path} returned {status}")]
    Status {
        method: Method,
        path: String,
        status: StatusCode,
        body: String,
    },
    #[error(transparent)]
    Transport(#[from] TransportError),
    /// The refresh after a 401 failed; stored credentials have been erased.
    #[error("session expired and could not be renewed: {0}")]
    Refresh(#[source] AuthError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("stored access token is not a valid header value")]
    InvalidHeader(#[from] http::header::InvalidHeaderValue),
    #[error("could not encode request body: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("unexpected response body from {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

impl GatewayError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            GatewayError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(StatusCode::UNAUTHORIZED)
    }

    /// Whether the caller should treat the user as logged out.
    pub fn requires_login(&self) -> bool {
        self.is_unauthorized() || matches!(self, GatewayError::Refresh(_))
    }
}
