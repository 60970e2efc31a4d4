//! # Report Repository
//!
//! Sales aggregates over an inclusive timestamp window.
//!
//! Both queries filter on `transactions.created_at BETWEEN start AND end`.
//! Timestamps are stored as `YYYY-MM-DD HH:MM:SS` text, so the range
//! comparison is a plain string comparison served by
//! `idx_transactions_created_at`.

use sqlx::SqlitePool;
use tracing::debug;

use kasir_core::{BestSeller, ReportWindow, SalesReport};

use crate::error::DbResult;

/// Repository for sales reports.
#[derive(Debug, Clone)]
pub struct ReportRepository {
    pool: SqlitePool,
}

impl ReportRepository {
    /// Creates a new ReportRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ReportRepository { pool }
    }

    /// Revenue, transaction count and best seller within `window`.
    ///
    /// An empty window yields zeros and the `"-"` best seller.
    pub async fn sales_report(&self, window: &ReportWindow) -> DbResult<SalesReport> {
        let (total_revenue, total_transactions): (i64, i64) = sqlx::query_as(
            r#"
            SELECT COALESCE(SUM(total_amount), 0), COUNT(id)
            FROM transactions
            WHERE created_at BETWEEN ?1 AND ?2
            "#,
        )
        .bind(window.start)
        .bind(window.end)
        .fetch_one(&self.pool)
        .await?;

        let best_seller = self.best_seller(window).await?;

        debug!(
            start = %window.start,
            end = %window.end,
            total_revenue,
            total_transactions,
            "Sales report computed"
        );

        Ok(SalesReport {
            total_revenue,
            total_transactions,
            best_seller,
        })
    }

    /// Product with the most units sold in `window`.
    ///
    /// Ties go to the name that sorts first.
    pub async fn best_seller(&self, window: &ReportWindow) -> DbResult<BestSeller> {
        let row: Option<(String, i64)> = sqlx::query_as(
            r#"
            SELECT p.name, SUM(td.quantity) AS total_qty
            FROM transaction_details td
            JOIN transactions t ON t.id = td.transaction_id
            JOIN product p ON p.id = td.product_id
            WHERE t.created_at BETWEEN ?1 AND ?2
            GROUP BY p.name
            ORDER BY total_qty DESC, p.name ASC
            LIMIT 1
            "#,
        )
        .bind(window.start)
        .bind(window.end)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row
            .map(|(name, quantity_sold)| BestSeller {
                name,
                quantity_sold,
            })
            .unwrap_or_else(BestSeller::none))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use chrono::{NaiveDate, NaiveDateTime};
    use kasir_core::{CheckoutItem, Product, ProductInput};

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, d).unwrap()
    }

    fn at(d: u32, h: u32, m: u32, s: u32) -> NaiveDateTime {
        day(d).and_hms_opt(h, m, s).unwrap()
    }

    async fn setup() -> (Database, Vec<Product>) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let mut products = Vec::new();
        for (name, price) in [("Indomie", 1500), ("KitKat", 8000), ("LifeBoy", 5000)] {
            let input = ProductInput {
                name: name.to_string(),
                price,
                stock: 100,
            };
            products.push(db.products().create(&input).await.unwrap());
        }
        (db, products)
    }

    async fn sell(db: &Database, when: NaiveDateTime, lines: &[(i64, i64)]) {
        let items: Vec<CheckoutItem> = lines
            .iter()
            .map(|&(product_id, quantity)| CheckoutItem {
                product_id,
                quantity,
            })
            .collect();
        db.transactions().create(&items, when, false).await.unwrap();
    }

    #[tokio::test]
    async fn test_empty_window() {
        let (db, _) = setup().await;
        let report = db
            .reports()
            .sales_report(&ReportWindow::for_day(day(31)))
            .await
            .unwrap();
        assert_eq!(report, SalesReport::empty());
    }

    #[tokio::test]
    async fn test_report_aggregates_window() {
        let (db, p) = setup().await;

        sell(&db, at(30, 9, 0, 0), &[(p[0].id, 2), (p[1].id, 1)]).await;
        sell(&db, at(31, 12, 0, 0), &[(p[0].id, 3)]).await;
        sell(&db, at(29, 23, 59, 59), &[(p[2].id, 50)]).await;

        let report = db
            .reports()
            .sales_report(&ReportWindow::between(day(30), day(31)))
            .await
            .unwrap();

        assert_eq!(report.total_transactions, 2);
        assert_eq!(report.total_revenue, 2 * 1500 + 8000 + 3 * 1500);
        assert_eq!(
            report.best_seller,
            BestSeller {
                name: "Indomie".to_string(),
                quantity_sold: 5
            }
        );
    }

    #[tokio::test]
    async fn test_window_bounds_are_inclusive() {
        let (db, p) = setup().await;

        sell(&db, at(31, 0, 0, 0), &[(p[0].id, 1)]).await;
        sell(&db, at(31, 23, 59, 59), &[(p[1].id, 1)]).await;

        let report = db
            .reports()
            .sales_report(&ReportWindow::for_day(day(31)))
            .await
            .unwrap();
        assert_eq!(report.total_transactions, 2);
        assert_eq!(report.total_revenue, 1500 + 8000);
    }

    #[tokio::test]
    async fn test_best_seller_tie_breaks_by_name() {
        let (db, p) = setup().await;

        sell(&db, at(31, 10, 0, 0), &[(p[2].id, 4), (p[1].id, 4)]).await;

        let best = db
            .reports()
            .best_seller(&ReportWindow::for_day(day(31)))
            .await
            .unwrap();
        assert_eq!(best.name, "KitKat");
        assert_eq!(best.quantity_sold, 4);
    }
}
