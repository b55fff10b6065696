//! In-memory record store.
//!
//! `TodoStore` is a cheap handle around a shared map; clones see the same
//! records. Every operation takes the lock exactly once, so each call is
//! atomic with respect to the others. Nothing is persisted.

use std::{collections::HashMap, sync::Arc};

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::TodoError;
use crate::models::{Todo, TodoInput};

#[derive(Clone, Debug, Default)]
pub struct TodoStore {
    todos: Arc<RwLock<HashMap<String, Todo>>>,
}

impl TodoStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a new record under a freshly generated UUID v4.
    ///
    /// The input is assumed to have passed [`TodoInput::validate`].
    pub async fn create(&self, input: TodoInput) -> Todo {
        let todo = Todo::new(Uuid::new_v4().to_string(), input);
        self.todos
            .write()
            .await
            .insert(todo.id.clone(), todo.clone());
        tracing::debug!(id = %todo.id, "todo created");
        todo
    }

    pub async fn get(&self, id: &str) -> Result<Todo, TodoError> {
        let todos = self.todos.read().await;
        todos
            .get(id)
            .cloned()
            .ok_or_else(|| TodoError::NotFound(id.to_string()))
    }

    /// All records, in no particular order.
    pub async fn list(&self) -> Vec<Todo> {
        let todos = self.todos.read().await;
        todos.values().cloned().collect()
    }

    /// Replaces title, description and done of an existing record.
    pub async fn update(&self, id: &str, input: TodoInput) -> Result<Todo, TodoError> {
        let mut todos = self.todos.write().await;
        let slot = todos
            .get_mut(id)
            .ok_or_else(|| TodoError::NotFound(id.to_string()))?;
        *slot = Todo::new(id.to_string(), input);
        tracing::debug!(%id, "todo updated");
        Ok(slot.clone())
    }

    pub async fn delete(&self, id: &str) -> Result<(), TodoError> {
        let mut todos = self.todos.write().await;
        if todos.remove(id).is_none() {
            return Err(TodoError::NotFound(id.to_string()));
        }
        tracing::debug!(%id, "todo deleted");
        Ok(())
    }

    pub async fn len(&self) -> usize {
        self.todos.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.todos.read().await.is_empty()
    }
}
