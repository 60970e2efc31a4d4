//! Checkout service.
//!
//! ```text
//! POST /api/checkout ──► validate_checkout_items() ──► TransactionRepository::create()
//!                             │                              │
//!                             ▼                              ▼
//!                        400, nothing written        header + details + stock,
//!                                                    one SQLite transaction
//! ```

use chrono::{Local, NaiveDateTime, SubsecRound};
use tracing::info;

use kasir_core::validation::validate_checkout_items;
use kasir_core::{CheckoutItem, Transaction};
use kasir_db::Database;

use crate::error::ApiResult;

/// Checkout service.
#[derive(Debug, Clone)]
pub struct TransactionService {
    db: Database,
}

impl TransactionService {
    /// Create a new transaction service.
    pub fn new(db: Database) -> Self {
        TransactionService { db }
    }

    /// Validates and records a checkout stamped with the local time.
    pub async fn checkout(&self, items: &[CheckoutItem], use_lock: bool) -> ApiResult<Transaction> {
        self.checkout_at(items, use_lock, Local::now().naive_local())
            .await
    }

    /// Same as [`checkout`](Self::checkout) with an explicit timestamp.
    pub async fn checkout_at(
        &self,
        items: &[CheckoutItem],
        use_lock: bool,
        now: NaiveDateTime,
    ) -> ApiResult<Transaction> {
        validate_checkout_items(items)?;

        let transaction = self
            .db
            .transactions()
            .create(items, now.trunc_subsecs(0), use_lock)
            .await?;

        info!(
            id = transaction.id,
            total_amount = transaction.total_amount,
            use_lock,
            "Checkout completed"
        );
        Ok(transaction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use chrono::NaiveDate;
    use kasir_core::ProductInput;
    use kasir_db::DbConfig;

    async fn setup() -> (TransactionService, Database, i64) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let product = db
            .products()
            .create(&ProductInput {
                name: "Indomie".to_string(),
                price: 1500,
                stock: 10,
            })
            .await
            .unwrap();
        (TransactionService::new(db.clone()), db, product.id)
    }

    #[tokio::test]
    async fn test_empty_checkout_is_rejected() {
        let (service, db, _) = setup().await;

        let err = service.checkout(&[], false).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(db.transactions().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_non_positive_quantity_is_rejected() {
        let (service, db, id) = setup().await;

        let err = service
            .checkout(&[CheckoutItem { product_id: id, quantity: 0 }], true)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(db.transactions().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_timestamp_is_truncated_to_seconds() {
        let (service, _, id) = setup().await;
        let now = NaiveDate::from_ymd_opt(2026, 1, 31)
            .unwrap()
            .and_hms_milli_opt(10, 15, 30, 750)
            .unwrap();

        let tx = service
            .checkout_at(&[CheckoutItem { product_id: id, quantity: 3 }], false, now)
            .await
            .unwrap();

        assert_eq!(tx.total_amount, 4500);
        assert_eq!(
            tx.created_at,
            NaiveDate::from_ymd_opt(2026, 1, 31)
                .unwrap()
                .and_hms_opt(10, 15, 30)
                .unwrap()
        );
    }
}
