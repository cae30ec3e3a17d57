//! Schema initializer: makes sure the target database and the `todos` table
//! exist before the API accepts traffic.
//!
//! Safe to run on every start. A database that already exists is reported as
//! such; any other failure is returned and aborts startup.

use sqlx::postgres::PgConnectOptions;
use sqlx::{Connection, PgConnection, PgPool};
use thiserror::Error;
use tracing::info;

use crate::config::DatabaseConfig;

/// SQLSTATE `duplicate_database`.
const DUPLICATE_DATABASE: &str = "42P04";

pub const CREATE_TODOS_TABLE: &str = "CREATE TABLE IF NOT EXISTS todos (
    id BIGSERIAL PRIMARY KEY,
    text VARCHAR(255) NOT NULL CHECK (btrim(text) <> ''),
    completed BOOLEAN NOT NULL DEFAULT FALSE
)";

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("failed to connect to administrative database {database:?}: {source}")]
    AdminConnect {
        database: String,
        #[source]
        source: sqlx::Error,
    },

    #[error("failed to create database {database:?}: {source}")]
    CreateDatabase {
        database: String,
        #[source]
        source: sqlx::Error,
    },

    #[error("failed to create todos table: {0}")]
    CreateTable(#[source] sqlx::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseStatus {
    Created,
    AlreadyExists,
}

/// Create the target database through the administrative database.
pub async fn ensure_database(config: &DatabaseConfig) -> Result<DatabaseStatus, SchemaError> {
    create_database(&config.admin_connect_options(), &config.name).await
}

/// Issue `CREATE DATABASE name` over a connection made with `admin`.
pub async fn create_database(
    admin: &PgConnectOptions,
    name: &str,
) -> Result<DatabaseStatus, SchemaError> {
    let mut conn = PgConnection::connect_with(admin)
        .await
        .map_err(|source| SchemaError::AdminConnect {
            database: admin.get_database().unwrap_or_default().to_string(),
            source,
        })?;

    let statement = format!("CREATE DATABASE {}", quote_ident(name));
    let outcome = sqlx::raw_sql(&statement).execute(&mut conn).await;
    // Closing is best effort; the outcome of CREATE DATABASE is what matters.
    let _ = conn.close().await;

    match outcome {
        Ok(_) => {
            info!(database = %name, "created database");
            Ok(DatabaseStatus::Created)
        }
        Err(err) if is_duplicate_database(&err) => {
            info!(database = %name, "database already exists");
            Ok(DatabaseStatus::AlreadyExists)
        }
        Err(source) => Err(SchemaError::CreateDatabase {
            database: name.to_string(),
            source,
        }),
    }
}

/// Create the `todos` table if it is absent.
pub async fn ensure_table(pool: &PgPool) -> Result<(), SchemaError> {
    sqlx::query(CREATE_TODOS_TABLE)
        .execute(pool)
        .await
        .map_err(SchemaError::CreateTable)?;
    info!("todos table ready");
    Ok(())
}

fn is_duplicate_database(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.code().as_deref() == Some(DUPLICATE_DATABASE),
        _ => false,
    }
}

/// Quote a PostgreSQL identifier. `CREATE DATABASE` takes no bind parameters.
pub fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
