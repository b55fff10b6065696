//! Domain errors and their HTTP rendering.
//!
//! The store only ever produces `NotFound`; `Validation` comes from the
//! request boundary. `IntoResponse` is the single place where either one is
//! turned into a status code.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TodoError {
    /// No record with this id is in the store.
    #[error("Todo with ID {0} not found")]
    NotFound(String),

    /// The request payload broke a field constraint or was not valid JSON.
    #[error("{0}")]
    Validation(String),
}

impl TodoError {
    pub fn status(&self) -> StatusCode {
        match self {
            TodoError::NotFound(_) => StatusCode::NOT_FOUND,
            TodoError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }
}

/// JSON body of every error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub detail: String,
}

impl ErrorBody {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}

impl IntoResponse for TodoError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            TodoError::NotFound(id) => tracing::debug!(%id, "todo not found"),
            TodoError::Validation(reason) => tracing::debug!(%reason, "rejected todo payload"),
        }
        (status, Json(ErrorBody::new(self.to_string()))).into_response()
    }
}
