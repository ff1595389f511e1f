use serde::{Deserialize, Serialize};

/// Access and refresh token as issued together at login.
#[derive(Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

// Credentials never show up in logs or panic messages.
impl std::fmt::Debug for TokenPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenPair")
            .field("access", &"<redacted>")
            .field("refresh", &"<redacted>")
            .finish()
    }
}

/// Body of `POST /api/token/`.
#[derive(Serialize, Debug)]
pub struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

/// Body of `POST /api/token/refresh/`.
#[derive(Serialize, Debug)]
pub struct RefreshRequest<'a> {
    pub refresh: &'a str,
}

/// Successful refresh response; only a new access token is minted.
#[derive(Deserialize)]
pub struct RefreshResponse {
    pub access: String,
}
