//! Data access for the single `todos` table.
//!
//! # Design
//! `TodoStore` is the seam between the HTTP layer and persistence. The router
//! only ever sees `Arc<dyn TodoStore>`, so handlers are tested against
//! `MemoryTodoStore` while production wires in `PgTodoStore` with an injected
//! connection pool. Every operation touches at most one row and runs as a
//! single statement.

mod memory;
mod postgres;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use memory::MemoryTodoStore;
pub use postgres::{connect_pool, PgTodoStore};

/// Maximum length of a todo's text, in characters.
pub const MAX_TEXT_LEN: usize = 255;

/// A persisted todo item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Todo {
    pub id: i64,
    pub text: String,
    pub completed: bool,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[async_trait]
pub trait TodoStore: Send + Sync {
    /// All todos ordered by ascending id. Empty when the table is empty.
    async fn list_all(&self) -> Result<Vec<Todo>, StoreError>;

    /// Insert a new, not yet completed todo and return it with its assigned id.
    /// Callers validate `text` beforehand.
    async fn create(&self, text: &str) -> Result<Todo, StoreError>;

    /// Update the completion flag. `None` when no row has this id.
    async fn set_completed(&self, id: i64, completed: bool) -> Result<Option<Todo>, StoreError>;

    /// Remove the row. `false` when no row has this id.
    async fn delete(&self, id: i64) -> Result<bool, StoreError>;
}
