use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use super::{StoreError, Todo, TodoStore};
use crate::config::DatabaseConfig;

/// Open the connection pool for the target database. The pool bounds
/// concurrent statements; excess requests wait for a free connection.
pub async fn connect_pool(config: &DatabaseConfig) -> Result<PgPool, StoreError> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect_with(config.connect_options())
        .await?;
    Ok(pool)
}

/// `TodoStore` backed by a PostgreSQL connection pool.
///
/// Each call acquires a pooled connection for exactly one statement; sqlx
/// returns it to the pool on every exit path.
#[derive(Debug, Clone)]
pub struct PgTodoStore {
    pool: PgPool,
}

impl PgTodoStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TodoStore for PgTodoStore {
    async fn list_all(&self) -> Result<Vec<Todo>, StoreError> {
        let todos =
            sqlx::query_as::<_, Todo>("SELECT id, text, completed FROM todos ORDER BY id ASC")
                .fetch_all(&self.pool)
                .await?;
        Ok(todos)
    }

    async fn create(&self, text: &str) -> Result<Todo, StoreError> {
        let todo = sqlx::query_as::<_, Todo>(
            "INSERT INTO todos (text, completed) VALUES ($1, FALSE) RETURNING id, text, completed",
        )
        .bind(text)
        .fetch_one(&self.pool)
        .await?;
        Ok(todo)
    }

    async fn set_completed(&self, id: i64, completed: bool) -> Result<Option<Todo>, StoreError> {
        let todo = sqlx::query_as::<_, Todo>(
            "UPDATE todos SET completed = $1 WHERE id = $2 RETURNING id, text, completed",
        )
        .bind(completed)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(todo)
    }

    async fn delete(&self, id: i64) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM todos WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
