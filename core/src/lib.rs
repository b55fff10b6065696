//! Synchronous client core for the todo service.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network. The caller executes the HTTP round-trip, so the
//! crate stays deterministic and works with any HTTP stack.
//!
//! # Design
//! - `TodoClient` is stateless; it holds only the base URL.
//! - Each CRUD operation is split into `build_*` and `parse_*`.
//! - Error responses are decoded from the server's `{"detail": ...}` body.

pub mod client;
pub mod error;
pub mod http;
pub mod types;

pub use client::TodoClient;
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use types::{ErrorDetail, Todo, TodoInput};
