//! Typed calls to the catalog API. All of them go through the `AuthGateway`.

pub mod books;
pub mod reservations;
pub mod uploads;

use std::sync::Arc;

use serde::Serialize;

use crate::gateway::{ApiRequest, AuthGateway, GatewayError};

pub use books::BookPager;
pub use uploads::UploadError;

#[derive(Clone)]
pub struct ApiClient {
    gateway: Arc<AuthGateway>,
}

impl ApiClient {
    pub fn new(gateway: Arc<AuthGateway>) -> Self {
        Self { gateway }
    }

    pub fn gateway(&self) -> &AuthGateway {
        &self.gateway
    }
}

fn json_request<T: Serialize + ?Sized>(
    request: ApiRequest,
    body: &T,
) -> Result<ApiRequest, GatewayError> {
    request.with_json(body).map_err(GatewayError::Encode)
}
