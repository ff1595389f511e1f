pub mod logger;

/// Append an absolute API path (`/api/...`) to the configured base URL.
pub fn join_url(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
