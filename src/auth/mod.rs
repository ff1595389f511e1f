pub mod endpoint;
pub mod session;

pub use endpoint::{AuthError, HttpTokenEndpoint, TokenEndpoint, LOGIN_PATH, REFRESH_PATH};
pub use session::{clear_credentials, Session};
