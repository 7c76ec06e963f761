//! Composition of public short URLs from request headers.

use crate::AppError;
use crate::domain::ShortCode;
use axum::http::{HeaderMap, header};
use serde_json::json;
use url::Url;

const FORWARDED_PROTO: &str = "x-forwarded-proto";

/// Builds the origin (`scheme://host/`) the client used to reach the service.
///
/// - Host comes from the `Host` header, port included
/// - Scheme comes from the first `X-Forwarded-Proto` value when it is `http`
///   or `https`, otherwise `http`
///
/// # Errors
///
/// Returns [`AppError::Validation`] if:
/// - The `Host` header is missing
/// - The header value contains invalid UTF-8
/// - The header is not a bare `host[:port]`
///
/// # Examples
///
/// ```ignore
/// let mut headers = HeaderMap::new();
/// headers.insert(header::HOST, "s.example.com".parse().unwrap());
/// headers.insert("x-forwarded-proto", "https".parse().unwrap());
///
/// let base = request_base_url(&headers).unwrap();
/// assert_eq!(base.as_str(), "https://s.example.com/");
/// ```
pub fn request_base_url(headers: &HeaderMap) -> Result<Url, AppError> {
    let host = headers
        .get(header::HOST)
        .ok_or_else(|| AppError::bad_request("Missing Host header", json!({})))?
        .to_str()
        .map_err(|_| AppError::bad_request("Invalid Host header", json!({})))?
        .trim();

    let scheme = headers
        .get(FORWARDED_PROTO)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(|v| v.trim().to_ascii_lowercase())
        .filter(|v| v == "http" || v == "https")
        .unwrap_or_else(|| "http".to_string());

    let invalid_host = || AppError::bad_request("Invalid Host header", json!({ "host": host }));

    if host.is_empty() || host.contains(['/', '?', '#', '@', '\\']) {
        return Err(invalid_host());
    }

    Url::parse(&format!("{scheme}://{host}/")).map_err(|_| invalid_host())
}

/// Appends `code` to `base`, which must end with a slash.
///
/// # Errors
///
/// Returns [`AppError::Internal`] if the result is not a valid URL.
pub fn compose_short_url(base: &Url, code: &ShortCode) -> Result<String, AppError> {
    base.join(code.as_str())
        .map(String::from)
        .map_err(|e| {
            AppError::internal(
                "Failed to build short URL",
                json!({ "reason": e.to_string() }),
            )
        })
}
