//! Health check service.
//!
//! The backing store is the only dependency, so "healthy" means the pool
//! answers a ping.

use axum::http::StatusCode;
use kasir_db::Database;
use serde::Serialize;
use tracing::warn;

/// Whether the service can take requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ServingStatus {
    #[serde(rename = "OK")]
    Serving,
    #[serde(rename = "ERROR")]
    NotServing,
}

/// Body of `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthReport {
    pub status: ServingStatus,
    pub message: String,
}

impl HealthReport {
    /// HTTP status to answer with.
    pub fn http_status(&self) -> StatusCode {
        match self.status {
            ServingStatus::Serving => StatusCode::OK,
            ServingStatus::NotServing => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

/// Health service implementation.
#[derive(Debug, Clone)]
pub struct HealthService {
    db: Database,
}

impl HealthService {
    /// Create a new health service.
    pub fn new(db: Database) -> Self {
        HealthService { db }
    }

    /// Check overall health.
    pub async fn check(&self) -> HealthReport {
        match self.db.ping().await {
            Ok(()) => HealthReport {
                status: ServingStatus::Serving,
                message: "API running".to_string(),
            },
            Err(e) => {
                warn!(error = %e, "Health check failed");
                HealthReport {
                    status: ServingStatus::NotServing,
                    message: "Database unavailable".to_string(),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kasir_db::DbConfig;

    #[tokio::test]
    async fn test_healthy_database() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let report = HealthService::new(db).check().await;

        assert_eq!(report.status, ServingStatus::Serving);
        assert_eq!(report.http_status(), StatusCode::OK);
        assert_eq!(
            serde_json::to_value(&report).unwrap(),
            serde_json::json!({ "status": "OK", "message": "API running" })
        );
    }

    #[tokio::test]
    async fn test_closed_database() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.close().await;

        let report = HealthService::new(db).check().await;
        assert_eq!(report.status, ServingStatus::NotServing);
        assert_eq!(report.http_status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
