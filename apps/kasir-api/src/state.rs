//! Shared application state.

use kasir_db::Database;

use crate::services::{HealthService, ReportService, TransactionService};

/// State handed to every handler through axum's `State` extractor.
///
/// Cloning is cheap: `Database` is a pooled handle.
#[derive(Debug, Clone)]
pub struct AppState {
    pub db: Database,
}

impl AppState {
    /// Create state from an open database.
    pub fn new(db: Database) -> Self {
        AppState { db }
    }

    /// Checkout service.
    pub fn transactions(&self) -> TransactionService {
        TransactionService::new(self.db.clone())
    }

    /// Sales report service.
    pub fn reports(&self) -> ReportService {
        ReportService::new(self.db.clone())
    }

    /// Health service.
    pub fn health(&self) -> HealthService {
        HealthService::new(self.db.clone())
    }
}
