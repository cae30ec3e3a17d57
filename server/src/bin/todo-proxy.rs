use todo_server::{proxy, Config};
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    todo_server::init_tracing();

    let config = Config::from_env()?;
    let addr = config.proxy_addr()?;
    let app = proxy::router(&config.api_url, &config.static_dir);

    let listener = TcpListener::bind(addr).await?;
    info!(
        %addr,
        upstream = %config.api_url,
        static_dir = %config.static_dir.display(),
        "proxy listening"
    );
    axum::serve(listener, app)
        .with_graceful_shutdown(todo_server::shutdown_signal())
        .await?;
    Ok(())
}
