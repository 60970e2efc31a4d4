//! # Kasir API
//!
//! JSON-over-HTTP server for the Kasir point-of-sale backend.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Kasir API                                      │
//! │                                                                         │
//! │  HTTP request                                                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌────────────────┐   ┌────────────────────┐   ┌────────────────────┐  │
//! │  │  routes        │   │  services          │   │  kasir-db          │  │
//! │  │                │   │                    │   │                    │  │
//! │  │ • resource<R>  │──►│ • Transaction      │──►│ • Resource repos   │  │
//! │  │ • checkout     │   │ • Report           │   │ • Transactions     │  │
//! │  │ • report       │   │ • Health           │   │ • Reports          │  │
//! │  │ • health       │   │                    │   │                    │  │
//! │  └────────────────┘   └────────────────────┘   └────────────────────┘  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ApiError ──► { "code": "...", "message": "..." }                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration
//! Environment variables (an optional `.env` file is loaded first):
//! - `HOST` - bind address (default: 0.0.0.0)
//! - `PORT` - HTTP port (default: 8080)
//! - `DATABASE_URL` - SQLite path or `sqlite://` URL (default: kasir.db)
//! - `DB_MAX_CONNECTIONS` - pool size (default: 5)
//! - `RUST_LOG` - log filter (default: info,kasir=debug,sqlx=warn)

use tracing_subscriber::EnvFilter;

pub mod config;
pub mod error;
pub mod routes;
pub mod services;
pub mod state;

// Re-exports
pub use config::{ApiConfig, ConfigError};
pub use error::{ApiError, ApiResult, ErrorCode};
pub use routes::build_app;
pub use state::AppState;

/// Default log filter when `RUST_LOG` is not set.
pub const DEFAULT_LOG_FILTER: &str = "info,kasir=debug,sqlx=warn";

/// Initializes the tracing subscriber.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Verbose logging
/// - `RUST_LOG=info` - Normal logging
/// - `RUST_LOG=kasir_db=trace` - Trace database operations
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();
}
