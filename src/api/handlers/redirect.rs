//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::HeaderValue,
    response::{IntoResponse, Redirect, Response},
};
use serde_json::json;
use tracing::debug;

use crate::application::services::Resolution;
use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// Always answers `307 Temporary Redirect`, never a permanent one, so
/// clients keep asking the service.
///
/// # Errors
///
/// - 404 `not_found` - no entry for the code (exact, case-sensitive match)
/// - 500 `internal_error` - the store could not be queried
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    match state.resolver.resolve(&code).await? {
        Resolution::Redirect { target } => {
            if HeaderValue::from_str(&target).is_err() {
                return Err(AppError::internal(
                    "Stored target is not a valid redirect location",
                    json!({ "code": code }),
                ));
            }

            debug!(code = %code, "Redirecting");
            Ok(Redirect::temporary(&target).into_response())
        }
        Resolution::NotFound => Err(AppError::not_found(
            "Short link not found",
            json!({ "code": code }),
        )),
    }
}
