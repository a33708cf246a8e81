//! Client identity for admission

use axum::http::HeaderMap;

/// Identifier used when no origin header is present
pub const UNKNOWN_CLIENT: &str = "unknown";

/// Origin headers, checked in priority order
pub const CLIENT_ID_HEADERS: [&str; 3] = ["x-forwarded-for", "x-client-ip", "cf-connecting-ip"];

/// Derive the client identifier from request headers
///
/// `x-forwarded-for` may list a proxy chain; the first hop is the client.
pub fn client_id_from_headers(headers: &HeaderMap) -> String {
    CLIENT_ID_HEADERS
        .iter()
        .filter_map(|name| headers.get(*name))
        .filter_map(|value| value.to_str().ok())
        .filter_map(|value| value.split(',').next())
        .map(str::trim)
        .find(|value| !value.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| UNKNOWN_CLIENT.to_string())
}
