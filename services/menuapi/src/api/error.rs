//! API error types and helpers.
//!
//! # Purpose and responsibility
//! Centralizes HTTP error response construction to keep error shapes uniform
//! across menu endpoints.
//!
//! # Where it fits
//! Handlers return [`ApiError`] directly, or convert a [`FavoritesError`] into
//! one, which picks the status code for each favorites rule.
//!
//! # Key invariants and assumptions
//! - Error responses carry a stable `code` and a human-readable `error` text.
//! - Status codes must align with the error category.
//!
//! # Security considerations
//! - Internal errors log details server-side but return generic messages.
use crate::api::types::ErrorResponse;
use crate::favorites::FavoritesError;
use crate::store::StoreError;
use axum::Json;
use axum::http::StatusCode;
use axum::response::IntoResponse;

/// Structured API error returned by handlers.
///
/// # What it does
/// Couples an HTTP status code with a JSON error body.
///
/// # Invariants
/// - `status` must match the semantics of `body.code`.
///
/// # Example
/// ```rust
/// use axum::http::StatusCode;
/// use menuapi::api::error::ApiError;
/// use menuapi::api::types::ErrorResponse;
///
/// let err = ApiError {
///     status: StatusCode::NOT_FOUND,
///     body: ErrorResponse {
///         code: "dish_not_found".to_string(),
///         error: "Prato não encontrado".to_string(),
///         request_id: None,
///     },
/// };
/// ```
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub body: ErrorResponse,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status, Json(self.body)).into_response()
    }
}

fn api_error(status: StatusCode, code: &str, message: &str) -> ApiError {
    ApiError {
        status,
        body: ErrorResponse {
            code: code.to_string(),
            error: message.to_string(),
            request_id: None,
        },
    }
}

/// Build a 400 Bad Request error.
pub fn api_bad_request(code: &str, message: &str) -> ApiError {
    api_error(StatusCode::BAD_REQUEST, code, message)
}

/// Build a 404 Not Found error.
pub fn api_not_found(code: &str, message: &str) -> ApiError {
    api_error(StatusCode::NOT_FOUND, code, message)
}

/// Build a 409 Conflict error.
///
/// # What it does
/// Returns an `ApiError` with a caller-provided conflict code.
pub fn api_conflict(code: &str, message: &str) -> ApiError {
    api_error(StatusCode::CONFLICT, code, message)
}

/// Build a 500 Internal Server Error from a store error.
///
/// # What it does
/// Logs the store error and returns a generic internal error response.
pub fn api_internal(message: &str, err: &StoreError) -> ApiError {
    // Log internal details server-side for debugging; return generic message.
    tracing::error!(error = ?err, "menu storage error");
    api_error(StatusCode::INTERNAL_SERVER_ERROR, "internal", message)
}

impl From<FavoritesError> for ApiError {
    fn from(err: FavoritesError) -> Self {
        let code = err.code();
        let message = err.to_string();
        match err {
            FavoritesError::MissingUserId
            | FavoritesError::InvalidOrder
            | FavoritesError::InvalidIds(_) => api_bad_request(code, &message),
            FavoritesError::UserNotFound | FavoritesError::DishNotFound => {
                api_not_found(code, &message)
            }
            FavoritesError::DuplicateFavorite | FavoritesError::FavoriteNotPresent => {
                api_conflict(code, &message)
            }
            FavoritesError::Store(err) => api_internal("failed to access favorites", &err),
        }
    }
}
