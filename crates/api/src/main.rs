use std::sync::Arc;

use anyhow::Context;
use tokio::signal;
use tracing::info;

use vendo_infra::{Config, SqliteVendingStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    vendo_observability::init();

    let config = Config::from_env();

    let store = SqliteVendingStore::connect(&config.database)
        .await
        .with_context(|| format!("failed to open database {}", config.database.url))?;
    store
        .bootstrap()
        .await
        .context("failed to bootstrap database")?;

    let app = vendo_api::app::build_app(Arc::new(store), &config)
        .context("failed to load page templates")?;

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
        info!("received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
                info!("received terminate signal, shutting down");
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {e}");
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
}
