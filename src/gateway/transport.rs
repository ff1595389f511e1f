use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use thiserror::Error;
use tracing::debug;

use super::request::{ApiRequest, ApiResponse, RequestBody};
use crate::config::ApiConfig;
use crate::utils::join_url;

/// Network-level failure: nothing usable came back from the server.
#[derive(Debug, Error)]
#[error("{method} {url} failed: {message}")]
pub struct TransportError {
    pub method: String,
    pub url: String,
    pub message: String,
}

/// The plain send primitive the gateway is wrapped around. Implementations
/// return a response for every status; only network trouble is an error.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: &ApiRequest) -> Result<ApiResponse, TransportError>;
}

/// Build the shared HTTP client from `api` settings.
pub fn build_client(config: &ApiConfig) -> Result<reqwest::Client, reqwest::Error> {
    let mut builder = reqwest::Client::builder();
    if let Some(ms) = config.timeout_in_ms {
        builder = builder.timeout(Duration::from_millis(ms));
    }
    builder.build()
}

/// Transport over `reqwest`, resolving request paths against the API base URL.
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(&self, request: &ApiRequest) -> Result<ApiResponse, TransportError> {
        let url = join_url(&self.base_url, &request.path);
        let fail = |message: String| TransportError {
            method: request.method.to_string(),
            url: url.clone(),
            message,
        };

        let mut builder = self
            .client
            .request(request.method.clone(), &url)
            .headers(request.headers.clone());
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        builder = match &request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(value),
            RequestBody::Multipart(file) => {
                let part = Part::bytes(file.bytes.clone())
                    .file_name(file.file_name.clone())
                    .mime_str(&file.mime)
                    .map_err(|e| fail(e.to_string()))?;
                builder.multipart(Form::new().part(file.field_name.clone(), part))
            }
        };

        debug!(method = %request.method, %url, "Sending request");
        let resp = builder.send().await.map_err(|e| fail(e.to_string()))?;

        let status = resp.status();
        let headers = resp.headers().clone();
        let body = resp.bytes().await.map_err(|e| fail(e.to_string()))?;
        debug!(method = %request.method, %url, %status, "Received response");

        Ok(ApiResponse {
            status,
            headers,
            body: body.to_vec(),
        })
    }
}
