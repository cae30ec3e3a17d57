//! Standalone schema initializer: creates the database and the `todos`
//! table, then exits. Any failure other than "database already exists"
//! exits non-zero.

use todo_server::{schema, store, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    todo_server::init_tracing();

    let config = Config::from_env()?;
    schema::ensure_database(&config.database).await?;
    let pool = store::connect_pool(&config.database).await?;
    schema::ensure_table(&pool).await?;
    pool.close().await;
    Ok(())
}
