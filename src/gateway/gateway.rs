use std::sync::Arc;

use http::StatusCode;
use serde::de::DeserializeOwned;
use tracing::{debug, error, info, warn};

use super::error::GatewayError;
use super::request::{ApiRequest, ApiResponse, RequestContext};
use super::transport::Transport;
use crate::auth::{clear_credentials, TokenEndpoint};
use crate::store::{TokenStore, ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY};

/// Terminal states of a single `send`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Success,
    RetriedSuccess,
    RetriedFailed,
    PropagatedFailure,
}

impl Outcome {
    fn as_str(&self) -> &'static str {
        match self {
            Outcome::Success => "success",
            Outcome::RetriedSuccess => "retried_success",
            Outcome::RetriedFailed => "retried_failed",
            Outcome::PropagatedFailure => "propagated_failure",
        }
    }
}

/// Mediates every call to the API: attaches the stored access token and, on a
/// 401, renews it once through the refresh endpoint and resends the request.
///
/// Concurrent 401s each run their own refresh; the last token written wins.
pub struct AuthGateway {
    transport: Arc<dyn Transport>,
    store: Arc<dyn TokenStore>,
    endpoint: Arc<dyn TokenEndpoint>,
}

impl AuthGateway {
    pub fn new(
        transport: Arc<dyn Transport>,
        store: Arc<dyn TokenStore>,
        endpoint: Arc<dyn TokenEndpoint>,
    ) -> Self {
        Self {
            transport,
            store,
            endpoint,
        }
    }

    pub fn store(&self) -> &Arc<dyn TokenStore> {
        &self.store
    }

    /// Send `request`, returning the response only for a 2xx status.
    pub async fn send(&self, request: ApiRequest) -> Result<ApiResponse, GatewayError> {
        let mut ctx = RequestContext::new(request);

        loop {
            let response = self.dispatch(&mut ctx).await?;

            if response.status.is_success() {
                let outcome = if ctx.retried() {
                    Outcome::RetriedSuccess
                } else {
                    Outcome::Success
                };
                self.record(&ctx, outcome, response.status);
                return Ok(response);
            }

            if response.status != StatusCode::UNAUTHORIZED || ctx.retried() {
                let outcome = if ctx.retried() {
                    Outcome::RetriedFailed
                } else {
                    Outcome::PropagatedFailure
                };
                self.record(&ctx, outcome, response.status);
                return Err(status_error(&ctx.request, response));
            }

            ctx.mark_retried();
            if !self.renew_access_token().await? {
                self.record(&ctx, Outcome::PropagatedFailure, response.status);
                return Err(status_error(&ctx.request, response));
            }
        }
    }

    /// `send` and decode a JSON body.
    pub async fn send_json<T: DeserializeOwned>(
        &self,
        request: ApiRequest,
    ) -> Result<T, GatewayError> {
        let path = request.path.clone();
        let response = self.send(request).await?;
        response
            .json()
            .map_err(|source| GatewayError::Decode { path, source })
    }

    /// Attach whatever access token is stored right now and hand the request to the transport.
    async fn dispatch(&self, ctx: &mut RequestContext) -> Result<ApiResponse, GatewayError> {
        let token = self.store.get(ACCESS_TOKEN_KEY).await?;
        ctx.apply_access_token(token.as_deref())?;
        Ok(self.transport.execute(&ctx.request).await?)
    }

    /// Returns `Ok(false)` when there is no refresh token to try.
    /// A failed refresh erases both tokens and is returned as `GatewayError::Refresh`.
    async fn renew_access_token(&self) -> Result<bool, GatewayError> {
        let Some(refresh_token) = self.store.get(REFRESH_TOKEN_KEY).await? else {
            warn!(
                event_name = "gateway.refresh.skipped",
                event_domain = "auth",
                "Got 401 but no refresh token is stored"
            );
            // a lone access token is useless without its refresh token
            self.discard_credentials().await;
            return Ok(false);
        };

        match self.endpoint.refresh(&refresh_token).await {
            Ok(access) => {
                self.store.set(ACCESS_TOKEN_KEY, &access).await?;
                info!(
                    event_name = "gateway.refresh.succeeded",
                    event_domain = "auth",
                    "Access token renewed"
                );
                Ok(true)
            }
            Err(e) => {
                warn!(
                    event_name = "gateway.refresh.failed",
                    event_domain = "auth",
                    error = %e,
                    "Access token refresh failed; clearing stored credentials"
                );
                self.discard_credentials().await;
                Err(GatewayError::Refresh(e))
            }
        }
    }

    async fn discard_credentials(&self) {
        if let Err(e) = clear_credentials(self.store.as_ref()).await {
            error!(error = %e, "Failed to erase stored credentials");
        }
    }

    fn record(&self, ctx: &RequestContext, outcome: Outcome, status: StatusCode) {
        debug!(
            event_name = "gateway.request.completed",
            event_domain = "http",
            method = %ctx.request.method,
            path = ctx.request.path.as_str(),
            status = status.as_u16(),
            outcome = outcome.as_str(),
            "Request finished"
        );
    }
}

fn status_error(request: &ApiRequest, response: ApiResponse) -> GatewayError {
    GatewayError::Status {
        method: request.method.clone(),
        path: request.path.clone(),
        status: response.status,
        body: response.text(),
    }
}
