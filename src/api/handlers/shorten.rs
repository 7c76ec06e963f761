//! Handler for link shortening endpoint.

use axum::{Json, extract::State, http::HeaderMap};
use validator::Validate;

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::short_url::{compose_short_url, request_base_url};

/// Creates a short URL for a long URL.
///
/// # Endpoint
///
/// `POST /api/shorten`
///
/// # Request Body
///
/// ```json
/// {
///   "longUrl": "https://example.com/some/very/long/path",
///   "customCode": "my-link"
/// }
/// ```
///
/// `customCode` is optional. Characters outside `[A-Za-z0-9_-]` are
/// stripped; if nothing remains a random 4-character code is generated.
///
/// # Response
///
/// ```json
/// {
///   "shortUrl": "https://s.example.com/my-link",
///   "code": "my-link"
/// }
/// ```
///
/// The origin is `PUBLIC_BASE_URL` when configured, otherwise it is taken
/// from the `X-Forwarded-Proto` and `Host` headers.
///
/// # Errors
///
/// - 400 `validation_error` - missing/invalid long URL or Host header
/// - 400 `code_taken` - the custom code is already in use
/// - 500 `internal_error` - storage failure or no free code found
pub async fn shorten_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<ShortenRequest>,
) -> Result<Json<ShortenResponse>, AppError> {
    payload.validate()?;

    // Resolved up front so a bad Host header never leaves an entry behind.
    let base_url = match &state.public_base_url {
        Some(url) => url.clone(),
        None => request_base_url(&headers)?,
    };

    let code = state
        .allocator
        .allocate(&payload.long_url, payload.custom_code.as_deref())
        .await?;

    let short_url = compose_short_url(&base_url, &code)?;

    Ok(Json(ShortenResponse {
        short_url,
        code: code.into_inner(),
    }))
}
