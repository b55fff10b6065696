//! Request builder and response parser for the todo API.
//!
//! # Design
//! `TodoClient` holds only the base URL (scheme, host and API prefix) and
//! keeps no state between calls. Each operation is a `build_*` method that
//! produces an `HttpRequest` and a `parse_*` method that consumes the
//! matching `HttpResponse`.

use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{ErrorDetail, Todo, TodoInput};

const JSON_CONTENT_TYPE: (&str, &str) = ("content-type", "application/json");

#[derive(Debug, Clone)]
pub struct TodoClient {
    base_url: String,
}

impl TodoClient {
    /// `base_url` includes the API prefix, e.g. `http://localhost:8000/api`.
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn collection_url(&self) -> String {
        format!("{}/todos/", self.base_url)
    }

    // ids are placed in the path verbatim
    fn item_url(&self, id: &str) -> String {
        format!("{}/todos/{id}", self.base_url)
    }

    pub fn build_list_todos(&self) -> HttpRequest {
        bodyless(HttpMethod::Get, self.collection_url())
    }

    pub fn build_get_todo(&self, id: &str) -> HttpRequest {
        bodyless(HttpMethod::Get, self.item_url(id))
    }

    pub fn build_create_todo(&self, input: &TodoInput) -> Result<HttpRequest, ApiError> {
        with_json_body(HttpMethod::Post, self.collection_url(), input)
    }

    pub fn build_update_todo(&self, id: &str, input: &TodoInput) -> Result<HttpRequest, ApiError> {
        with_json_body(HttpMethod::Put, self.item_url(id), input)
    }

    pub fn build_delete_todo(&self, id: &str) -> HttpRequest {
        bodyless(HttpMethod::Delete, self.item_url(id))
    }

    pub fn parse_list_todos(&self, response: HttpResponse) -> Result<Vec<Todo>, ApiError> {
        parse_json(response, 200)
    }

    pub fn parse_get_todo(&self, response: HttpResponse) -> Result<Todo, ApiError> {
        parse_json(response, 200)
    }

    pub fn parse_create_todo(&self, response: HttpResponse) -> Result<Todo, ApiError> {
        parse_json(response, 201)
    }

    pub fn parse_update_todo(&self, response: HttpResponse) -> Result<Todo, ApiError> {
        parse_json(response, 200)
    }

    pub fn parse_delete_todo(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response, 204)
    }
}

fn bodyless(method: HttpMethod, path: String) -> HttpRequest {
    HttpRequest {
        method,
        path,
        headers: Vec::new(),
        body: None,
    }
}

fn with_json_body(
    method: HttpMethod,
    path: String,
    input: &TodoInput,
) -> Result<HttpRequest, ApiError> {
    let body = serde_json::to_string(input).map_err(ApiError::Serialization)?;
    Ok(HttpRequest {
        method,
        path,
        headers: vec![(JSON_CONTENT_TYPE.0.to_string(), JSON_CONTENT_TYPE.1.to_string())],
        body: Some(body),
    })
}

fn parse_json<T: DeserializeOwned>(response: HttpResponse, expected: u16) -> Result<T, ApiError> {
    check_status(&response, expected)?;
    serde_json::from_str(&response.body).map_err(ApiError::Deserialization)
}

/// Maps an unexpected status to the matching `ApiError`. 404 and 422 bodies
/// are read for their `detail`; a body without one is passed through as is.
fn check_status(response: &HttpResponse, expected: u16) -> Result<(), ApiError> {
    if response.status == expected {
        return Ok(());
    }
    match response.status {
        404 => Err(ApiError::NotFound {
            detail: detail_of(&response.body),
        }),
        422 => Err(ApiError::Validation {
            detail: detail_of(&response.body),
        }),
        status => Err(ApiError::HttpError {
            status,
            body: response.body.clone(),
        }),
    }
}

fn detail_of(body: &str) -> String {
    serde_json::from_str::<ErrorDetail>(body)
        .map(|error| error.detail)
        .unwrap_or_else(|_| body.to_string())
}
