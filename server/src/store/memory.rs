use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{StoreError, Todo, TodoStore};

/// In-process `TodoStore` used by tests and `todo-server --memory`.
///
/// Ids come from a counter that only moves forward, so a deleted id is never
/// handed out again, matching a `BIGSERIAL` column.
#[derive(Debug, Default)]
pub struct MemoryTodoStore {
    inner: RwLock<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    last_id: i64,
    todos: BTreeMap<i64, Todo>,
}

impl MemoryTodoStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TodoStore for MemoryTodoStore {
    async fn list_all(&self) -> Result<Vec<Todo>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.todos.values().cloned().collect())
    }

    async fn create(&self, text: &str) -> Result<Todo, StoreError> {
        let mut inner = self.inner.write().await;
        inner.last_id += 1;
        let todo = Todo {
            id: inner.last_id,
            text: text.to_string(),
            completed: false,
        };
        inner.todos.insert(todo.id, todo.clone());
        Ok(todo)
    }

    async fn set_completed(&self, id: i64, completed: bool) -> Result<Option<Todo>, StoreError> {
        let mut inner = self.inner.write().await;
        Ok(inner.todos.get_mut(&id).map(|todo| {
            todo.completed = completed;
            todo.clone()
        }))
    }

    async fn delete(&self, id: i64) -> Result<bool, StoreError> {
        let mut inner = self.inner.write().await;
        Ok(inner.todos.remove(&id).is_some())
    }
}
