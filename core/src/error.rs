//! Errors returned by `TodoClient` build and parse methods.
//!
//! `NotFound` and `Validation` carry the server's `detail` message so callers
//! can surface it unchanged. Any other unexpected status lands in
//! `HttpError` with the raw body.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// 404: no todo with the requested id.
    #[error("not found: {detail}")]
    NotFound { detail: String },

    /// 422: the payload was rejected.
    #[error("validation failed: {detail}")]
    Validation { detail: String },

    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    #[error("deserialization failed")]
    Deserialization(#[source] serde_json::Error),

    #[error("serialization failed")]
    Serialization(#[source] serde_json::Error),
}
