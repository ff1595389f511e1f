//! The authenticated request gateway: every API call goes through here.

pub mod error;
pub mod gateway;
pub mod request;
pub mod transport;

pub use error::GatewayError;
pub use gateway::AuthGateway;
pub use request::{ApiRequest, ApiResponse, FilePart, RequestBody, RequestContext};
pub use transport::{build_client, HttpTransport, Transport, TransportError};
