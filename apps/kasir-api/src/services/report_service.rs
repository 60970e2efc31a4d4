//! Sales report service.
//!
//! Turns the raw `start` / `end` query strings into a [`ReportWindow`]
//! (defaulting to today on the local clock) and asks the store for the
//! aggregates.

use chrono::{Local, NaiveDate};
use tracing::debug;

use kasir_core::{ReportWindow, SalesReport};
use kasir_db::Database;

use crate::error::ApiResult;

/// Sales report service.
#[derive(Debug, Clone)]
pub struct ReportService {
    db: Database,
}

impl ReportService {
    /// Create a new report service.
    pub fn new(db: Database) -> Self {
        ReportService { db }
    }

    /// Report for `[start, end]`, or for today when either is missing.
    pub async fn sales_report(
        &self,
        start: Option<&str>,
        end: Option<&str>,
    ) -> ApiResult<SalesReport> {
        self.sales_report_on(start, end, Local::now().date_naive())
            .await
    }

    /// Report for today.
    pub async fn today(&self) -> ApiResult<SalesReport> {
        self.sales_report(None, None).await
    }

    /// Same as [`sales_report`](Self::sales_report) with an explicit "today".
    pub async fn sales_report_on(
        &self,
        start: Option<&str>,
        end: Option<&str>,
        today: NaiveDate,
    ) -> ApiResult<SalesReport> {
        let window = ReportWindow::resolve(start, end, today)?;
        debug!(start = %window.start, end = %window.end, "Computing sales report");

        Ok(self.db.reports().sales_report(&window).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use kasir_core::{CheckoutItem, ProductInput};
    use kasir_db::DbConfig;

    async fn db_with_sale(on: NaiveDate) -> Database {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let product = db
            .products()
            .create(&ProductInput {
                name: "KitKat".to_string(),
                price: 8000,
                stock: 28,
            })
            .await
            .unwrap();
        db.transactions()
            .create(
                &[CheckoutItem {
                    product_id: product.id,
                    quantity: 2,
                }],
                on.and_hms_opt(12, 0, 0).unwrap(),
                false,
            )
            .await
            .unwrap();
        db
    }

    #[tokio::test]
    async fn test_blank_dates_use_today() {
        let today = NaiveDate::from_ymd_opt(2026, 1, 31).unwrap();
        let service = ReportService::new(db_with_sale(today).await);

        let report = service
            .sales_report_on(Some(""), Some(""), today)
            .await
            .unwrap();
        assert_eq!(report.total_transactions, 1);
        assert_eq!(report.total_revenue, 16000);
        assert_eq!(report.best_seller.name, "KitKat");

        let tomorrow = today.succ_opt().unwrap();
        let report = service.sales_report_on(None, None, tomorrow).await.unwrap();
        assert_eq!(report, SalesReport::empty());
    }

    #[tokio::test]
    async fn test_bad_date_is_validation_error() {
        let today = NaiveDate::from_ymd_opt(2026, 1, 31).unwrap();
        let service = ReportService::new(db_with_sale(today).await);

        let err = service
            .sales_report_on(Some("31/01/2026"), Some("2026-01-31"), today)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }
}
