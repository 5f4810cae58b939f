//! API utilities for frontend-backend communication
//!
//! Provides helper functions for constructing API URLs.

use super::config::app_config;

/// Get the base URL for API requests, e.g. "http://localhost:8000/api"
pub fn api_base() -> String {
    app_config().api_url
}

/// Build a full API URL from a path.
///
/// Absolute URLs (pagination `next` links) are returned unchanged.
///
/// # Example
/// ```no_run
/// use frontend::shared::api_utils::api_url;
///
/// let url = api_url("/financeiro/contas-pagar/");
/// ```
pub fn api_url(path: &str) -> String {
    join_url(&api_base(), path)
}

pub fn join_url(base: &str, path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") {
        return path.to_string();
    }
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Encodes `key=value` pairs into a query string without the leading `?`.
pub fn query_string(params: &[(&str, String)]) -> String {
    params
        .iter()
        .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}
