//! Todo record and its request payload.

use serde::{Deserialize, Serialize};

use crate::error::TodoError;

pub const TITLE_MAX_CHARS: usize = 100;
pub const DESCRIPTION_MAX_CHARS: usize = 1000;

/// A stored todo item as returned by every endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: String,
    pub title: String,
    pub description: String,
    pub done: bool,
}

impl Todo {
    /// Builds a record from a store-generated id and a validated payload.
    pub fn new(id: String, input: TodoInput) -> Self {
        Self {
            id,
            title: input.title,
            description: input.description,
            done: input.done,
        }
    }
}

/// Body of `POST /todos/` and `PUT /todos/{id}`. Updates replace every
/// field, so both operations share this shape.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoInput {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub done: bool,
}

impl TodoInput {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            done: false,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_done(mut self, done: bool) -> Self {
        self.done = done;
        self
    }

    /// Checks the length bounds on `title` and `description`.
    ///
    /// Lengths are counted in characters, not bytes.
    pub fn validate(&self) -> Result<(), TodoError> {
        let title_len = self.title.chars().count();
        if title_len == 0 {
            return Err(TodoError::Validation(
                "title must contain at least 1 character".to_string(),
            ));
        }
        if title_len > TITLE_MAX_CHARS {
            return Err(TodoError::Validation(format!(
                "title must contain at most {TITLE_MAX_CHARS} characters, got {title_len}"
            )));
        }

        let description_len = self.description.chars().count();
        if description_len > DESCRIPTION_MAX_CHARS {
            return Err(TodoError::Validation(format!(
                "description must contain at most {DESCRIPTION_MAX_CHARS} characters, got {description_len}"
            )));
        }

        Ok(())
    }
}
