//! # Transaction Repository
//!
//! Writes a checkout as one atomic SQLite transaction.
//!
//! ## Checkout Write Path
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  BEGIN IMMEDIATE  ◄── write lock taken here, before any read            │
//! │    │                                                                    │
//! │    ├── (lock mode) reserve stock: UPDATE ... WHERE stock >= qty         │
//! │    │                                                                    │
//! │    ├── read products referenced by the items                            │
//! │    ├── plan_checkout(): unit price × qty, total                         │
//! │    ├── INSERT transactions (header)                                     │
//! │    ├── INSERT transaction_details (one per line)                        │
//! │    │                                                                    │
//! │    ├── (default mode) decrement stock: UPDATE ... WHERE stock >= qty    │
//! │    │                                                                    │
//! │  COMMIT  ◄── any error before this point rolls everything back          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Locking
//! Every checkout opens with `BEGIN IMMEDIATE`. A deferred transaction
//! would read under a shared snapshot and then fail with `SQLITE_BUSY`
//! when it tried to write after another checkout committed; `busy_timeout`
//! does not retry that case. Taking the write lock up front makes
//! concurrent checkouts queue on `busy_timeout` instead.
//!
//! `use_lock` only picks the statement order inside that transaction:
//! reserve stock first and skip the snapshot check, or read and check
//! first and decrement last. The decrement carries `stock >= qty` in both
//! orders, so stock can never go negative.

use std::collections::HashMap;

use chrono::NaiveDateTime;
use sqlx::{SqliteConnection, SqlitePool};
use tracing::{debug, info, warn};

use kasir_core::checkout::{check_stock, plan_checkout};
use kasir_core::{CheckoutItem, CoreError, Product, Transaction, TransactionDetail};

use crate::error::{DbError, DbResult};

/// Repository for checkout transactions.
#[derive(Debug, Clone)]
pub struct TransactionRepository {
    pool: SqlitePool,
}

impl TransactionRepository {
    /// Creates a new TransactionRepository.
    pub fn new(pool: SqlitePool) -> Self {
        TransactionRepository { pool }
    }

    /// Records a checkout: header, details and stock decrements, all or
    /// nothing.
    ///
    /// ## Arguments
    /// * `items` - Checkout lines, already validated
    /// * `created_at` - Timestamp stored on the header
    /// * `use_lock` - Reserve stock before reading prices (see module docs)
    ///
    /// Concurrent calls serialize on the SQLite write lock.
    ///
    /// ## Errors
    /// * `DbError::Checkout(ProductNotFound)` - Unknown product id
    /// * `DbError::Checkout(InsufficientStock)` - Not enough stock
    /// * `DbError::Checkout(AmountOverflow)` - Total does not fit
    ///
    /// Nothing is written when an error is returned.
    pub async fn create(
        &self,
        items: &[CheckoutItem],
        created_at: NaiveDateTime,
        use_lock: bool,
    ) -> DbResult<Transaction> {
        debug!(lines = items.len(), use_lock, "Recording checkout");

        let mut tx = self.pool.begin_with("BEGIN IMMEDIATE").await?;

        if use_lock {
            decrement_stock(&mut tx, items).await?;
        }

        let products = load_products(&mut tx, items).await?;
        if !use_lock {
            check_stock(items, &products)?;
        }
        let plan = plan_checkout(items, &products)?;

        let transaction_id = sqlx::query(
            "INSERT INTO transactions (total_amount, created_at) VALUES (?1, ?2)",
        )
        .bind(plan.total.minor())
        .bind(created_at)
        .execute(&mut *tx)
        .await?
        .last_insert_rowid();

        let mut details = Vec::with_capacity(plan.lines.len());
        for line in &plan.lines {
            let detail_id = sqlx::query(
                r#"
                INSERT INTO transaction_details
                    (transaction_id, product_id, quantity, unit_price, subtotal)
                VALUES (?1, ?2, ?3, ?4, ?5)
                "#,
            )
            .bind(transaction_id)
            .bind(line.product_id)
            .bind(line.quantity)
            .bind(line.unit_price.minor())
            .bind(line.subtotal.minor())
            .execute(&mut *tx)
            .await?
            .last_insert_rowid();

            details.push(TransactionDetail {
                id: detail_id,
                transaction_id,
                product_id: line.product_id,
                quantity: line.quantity,
                unit_price: line.unit_price.minor(),
                subtotal: line.subtotal.minor(),
            });
        }

        if !use_lock {
            decrement_stock(&mut tx, items).await?;
        }

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        info!(
            id = transaction_id,
            total = %plan.total,
            lines = details.len(),
            "Checkout recorded"
        );

        Ok(Transaction {
            id: transaction_id,
            total_amount: plan.total.minor(),
            created_at,
            details,
        })
    }

    /// Gets a transaction header with its details.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Transaction>> {
        let header = sqlx::query_as::<_, Transaction>(
            "SELECT id, total_amount, created_at FROM transactions WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(mut transaction) = header else {
            return Ok(None);
        };

        transaction.details = self.get_details(id).await?;
        Ok(Some(transaction))
    }

    /// Gets the details of a transaction in insertion order.
    pub async fn get_details(&self, transaction_id: i64) -> DbResult<Vec<TransactionDetail>> {
        let details = sqlx::query_as::<_, TransactionDetail>(
            r#"
            SELECT id, transaction_id, product_id, quantity, unit_price, subtotal
            FROM transaction_details
            WHERE transaction_id = ?1
            ORDER BY id
            "#,
        )
        .bind(transaction_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(details)
    }

    /// Counts all recorded transactions.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM transactions")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

// =============================================================================
// Statements run inside the checkout transaction
// =============================================================================

/// Reads every distinct product referenced by `items`.
async fn load_products(
    conn: &mut SqliteConnection,
    items: &[CheckoutItem],
) -> DbResult<HashMap<i64, Product>> {
    let mut products = HashMap::with_capacity(items.len());

    for item in items {
        if products.contains_key(&item.product_id) {
            continue;
        }

        let product = sqlx::query_as::<_, Product>(
            "SELECT id, name, price, stock FROM product WHERE id = ?1",
        )
        .bind(item.product_id)
        .fetch_optional(&mut *conn)
        .await?
        .ok_or(CoreError::ProductNotFound(item.product_id))?;

        products.insert(product.id, product);
    }

    Ok(products)
}

/// Conditionally decrements stock for every line.
///
/// A line that matches no row is either an unknown product or short on
/// stock; the follow-up read tells which.
async fn decrement_stock(conn: &mut SqliteConnection, items: &[CheckoutItem]) -> DbResult<()> {
    for item in items {
        let result = sqlx::query("UPDATE product SET stock = stock - ?2 WHERE id = ?1 AND stock >= ?2")
            .bind(item.product_id)
            .bind(item.quantity)
            .execute(&mut *conn)
            .await?;

        if result.rows_affected() == 1 {
            continue;
        }

        let available: Option<i64> = sqlx::query_scalar("SELECT stock FROM product WHERE id = ?1")
            .bind(item.product_id)
            .fetch_optional(&mut *conn)
            .await?;

        let err = match available {
            None => CoreError::ProductNotFound(item.product_id),
            Some(available) => CoreError::InsufficientStock {
                product_id: item.product_id,
                available,
                requested: item.quantity,
            },
        };
        warn!(error = %err, "Checkout rejected");
        return Err(err.into());
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
