use std::net::SocketAddr;

use todo_api::application::todo_service::TodoServiceImpl;
use todo_api::domain::store::TodoStore;
use todo_api::http::routing::{self, todos};
use todo_api::infrastructure::sqlite_store::SqliteTodoStore;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let database_url =
        std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://todos.db".to_string());
    // Ensure the SQLite file can be created/opened for file-backed URLs.
    prepare_sqlite_file(&database_url)?;
    let store = SqliteTodoStore::connect(&database_url).await?;
    store.init().await?;
    let service = TodoServiceImpl::new(store);
    let router = routing::app(todos::router(todos::AppState { service }));

    let addr: SocketAddr = std::env::var("BIND_ADDR")
        .unwrap_or_else(|_| "127.0.0.1:3000".to_string())
        .parse()?;
    tracing::info!(%addr, "listening");
    axum::serve(tokio::net::TcpListener::bind(addr).await?, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    use tokio::signal::ctrl_c;
    let _ = ctrl_c().await;
    tracing::info!("shutdown");
}

fn prepare_sqlite_file(database_url: &str) -> anyhow::Result<()> {
    if database_url.starts_with("sqlite::memory:") {
        return Ok(());
    }
    if let Some(path) = database_url.strip_prefix("sqlite://") {
        use std::fs::{self, OpenOptions};
        use std::path::Path;
        let p = Path::new(path);
        if let Some(parent) = p.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        if !p.exists() {
            let _ = OpenOptions::new().create(true).append(true).open(p)?;
        }
    }
    Ok(())
}
