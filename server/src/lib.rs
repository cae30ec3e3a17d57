//! Todo API service, schema initializer, store and reverse proxy.
//!
//! # Overview
//! - `config`: environment variables → typed `Config`.
//! - `schema`: creates the database and the `todos` table on startup.
//! - `store`: the `TodoStore` trait with PostgreSQL and in-memory backends.
//! - `api`: axum handlers for `/api/todos`, validating before touching the store.
//! - `proxy`: forwards `/api/*` upstream and serves the client's static assets.
//!
//! # Design
//! The store is constructed by the caller and injected into `app`, so the pool
//! lifecycle belongs to `main` and tests can swap in `MemoryTodoStore`.

pub mod api;
pub mod config;
pub mod error;
pub mod proxy;
pub mod schema;
pub mod store;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

pub use api::SharedStore;
pub use config::Config;
pub use error::{AppError, ErrorBody};
pub use store::{MemoryTodoStore, PgTodoStore, StoreError, Todo, TodoStore};

/// The API router with request tracing.
pub fn app(store: SharedStore) -> Router {
    api::router(store).layer(TraceLayer::new_for_http())
}

pub async fn run(listener: TcpListener, store: SharedStore) -> Result<(), std::io::Error> {
    axum::serve(listener, app(store)).await
}

/// Install the global `tracing` subscriber. `RUST_LOG` overrides the
/// default `info` level.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Resolves on Ctrl-C or, on Unix, SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("shutdown signal received");
}
