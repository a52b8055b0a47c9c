//! Menu HTTP API module.
//!
//! # Purpose
//! Exposes route handler modules and the shared request-body helper.
pub mod error;
pub mod favorites;
pub mod openapi;
pub mod system;
pub mod types;

use crate::api::error::{ApiError, api_bad_request};
use crate::favorites::record_rejection;
use axum::body::Bytes;
use serde::de::DeserializeOwned;

/// Decode an optional JSON body. An empty body decodes to `T::default()`.
///
/// Only favorites routes read bodies, so a malformed one counts as a rejected
/// favorites request.
pub(crate) fn parse_body<T>(body: &Bytes) -> Result<T, ApiError>
where
    T: DeserializeOwned + Default,
{
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }
    serde_json::from_slice(body).map_err(|err| {
        tracing::debug!(error = %err, "rejecting malformed request body");
        record_rejection("invalid_json");
        api_bad_request("invalid_json", "corpo da requisição inválido")
    })
}
