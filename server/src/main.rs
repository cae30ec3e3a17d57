use std::sync::Arc;

use todo_server::{schema, store, Config, MemoryTodoStore, PgTodoStore, SharedStore};
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    todo_server::init_tracing();

    let config = Config::from_env()?;
    let addr = config.api_addr()?;
    let in_memory = std::env::args().skip(1).any(|arg| arg == "--memory");

    let pool = if in_memory {
        info!("using in-memory store");
        None
    } else {
        schema::ensure_database(&config.database).await?;
        let pool = store::connect_pool(&config.database).await?;
        schema::ensure_table(&pool).await?;
        Some(pool)
    };

    let store: SharedStore = match &pool {
        Some(pool) => Arc::new(PgTodoStore::new(pool.clone())),
        None => Arc::new(MemoryTodoStore::new()),
    };

    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "todo api listening");
    axum::serve(listener, todo_server::app(store))
        .with_graceful_shutdown(todo_server::shutdown_signal())
        .await?;

    if let Some(pool) = pool {
        pool.close().await;
    }
    Ok(())
}
