//! # Kasir API server
//!
//! ```text
//! load config ──► init tracing ──► open database (+ migrations) ──► serve
//!                                        │                            │
//!                                        ▼                            ▼
//!                                  fail fast, exit 1          Ctrl+C / SIGTERM
//!                                                             → graceful shutdown
//! ```

use tokio::net::TcpListener;
use tracing::info;

use kasir_api::{build_app, init_tracing, ApiConfig, AppState};
use kasir_db::Database;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = ApiConfig::load()?;
    init_tracing();

    info!("Starting Kasir API server...");
    info!(
        host = %config.host,
        port = config.port,
        database_url = %config.database_url,
        "Configuration loaded"
    );

    let addr = config.bind_addr()?;

    // Connect to database; refusing to start beats serving 500s.
    let db = Database::new(config.db_config()).await?;
    db.ping().await?;
    info!("Database ready");

    let app = build_app(AppState::new(db.clone()));

    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db.close().await;
    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
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

    info!("Shutdown signal received, starting graceful shutdown...");
}
