//! # HTTP Routes
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  GET    /health                    health::check                        │
//! │                                                                         │
//! │  GET    /api/produk                ┐                                    │
//! │  POST   /api/produk                │  resource::router::<Product>()     │
//! │  GET    /api/produk/{id}           │                                    │
//! │  PUT    /api/produk/{id}           │                                    │
//! │  DELETE /api/produk/{id}           ┘                                    │
//! │  ...    /api/kategori[/{id}]       resource::router::<Category>()       │
//! │                                                                         │
//! │  POST   /api/checkout[?lock=true]  checkout::checkout                   │
//! │  GET    /api/report?start=&end=    report::sales_report                 │
//! │  GET    /api/report/hari-ini       report::today                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Routing dispatches on method, so a wrong method on a known path is
//! answered with 405 by axum itself.

use axum::Router;
use tower_http::trace::TraceLayer;

use kasir_core::{Category, Product};

use crate::state::AppState;

pub mod checkout;
pub mod health;
pub mod report;
pub mod resource;

/// Build a router with all routes registered (no middleware, no state).
pub fn build_router() -> Router<AppState> {
    Router::new()
        .nest("/api/produk", resource::router::<Product>())
        .nest("/api/kategori", resource::router::<Category>())
        .merge(checkout::router())
        .merge(report::router())
        .merge(health::router())
}

/// Build the fully configured application.
///
/// Used by both the server binary and the integration tests.
pub fn build_app(state: AppState) -> Router {
    build_router()
        // Request tracing (logs at INFO level)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
