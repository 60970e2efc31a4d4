//! # Resource Repository
//!
//! Generic CRUD over flat tables with an `INTEGER PRIMARY KEY` id.
//!
//! Products and categories have the same lifecycle (list, get, create,
//! replace, delete) and differ only in table name, columns and how an
//! input binds to those columns. That difference lives in [`Resource`];
//! the SQL lives once, in [`ResourceRepository`].
//!
//! ```text
//! ┌──────────────────────────────┐      ┌──────────────────────────────────┐
//! │ impl Resource for Product    │      │ ResourceRepository<R>            │
//! │   TABLE   = "product"        │ ───► │   list()   SELECT ... ORDER BY id│
//! │   COLUMNS = [name,price,...] │      │   get(id)  SELECT ... WHERE id   │
//! │   bind_input(query, input)   │      │   create() INSERT + re-read      │
//! └──────────────────────────────┘      │   update() UPDATE ... WHERE id   │
//!                                       │   delete() DELETE ... WHERE id   │
//!                                       └──────────────────────────────────┘
//! ```

use std::marker::PhantomData;

use sqlx::query::Query;
use sqlx::sqlite::{SqliteArguments, SqliteRow};
use sqlx::{FromRow, Sqlite, SqlitePool};
use tracing::debug;

use kasir_core::validation::{validate_name, validate_price, validate_stock, ValidationResult};
use kasir_core::{Category, CategoryInput, Product, ProductInput};

use crate::error::{DbError, DbResult};

/// An untyped SQLite query with bound arguments.
pub type SqliteQuery<'q> = Query<'q, Sqlite, SqliteArguments<'q>>;

// =============================================================================
// Resource Trait
// =============================================================================

/// A catalog entity that [`ResourceRepository`] can store.
///
/// `COLUMNS` excludes `id`, and `bind_input` must bind exactly those
/// columns, in that order.
pub trait Resource: for<'r> FromRow<'r, SqliteRow> + Send + Unpin + 'static {
    /// Request body for create and replace.
    type Input: Send + Sync;

    /// Human readable entity name used in errors and logs.
    const ENTITY: &'static str;

    /// Table name.
    const TABLE: &'static str;

    /// Writable columns, in bind order.
    const COLUMNS: &'static [&'static str];

    /// Checks an input before it is written.
    fn validate(input: &Self::Input) -> ValidationResult<()>;

    /// Binds the input's values for `COLUMNS`.
    fn bind_input<'q>(query: SqliteQuery<'q>, input: &'q Self::Input) -> SqliteQuery<'q>;
}

impl Resource for Product {
    type Input = ProductInput;

    const ENTITY: &'static str = "Product";
    const TABLE: &'static str = "product";
    const COLUMNS: &'static [&'static str] = &["name", "price", "stock"];

    fn validate(input: &ProductInput) -> ValidationResult<()> {
        validate_name("nama", &input.name)?;
        validate_price(input.price)?;
        validate_stock(input.stock)
    }

    fn bind_input<'q>(query: SqliteQuery<'q>, input: &'q ProductInput) -> SqliteQuery<'q> {
        query
            .bind(input.name.trim())
            .bind(input.price)
            .bind(input.stock)
    }
}

impl Resource for Category {
    type Input = CategoryInput;

    const ENTITY: &'static str = "Category";
    const TABLE: &'static str = "category";
    const COLUMNS: &'static [&'static str] = &["name", "description"];

    fn validate(input: &CategoryInput) -> ValidationResult<()> {
        validate_name("nama", &input.name)
    }

    fn bind_input<'q>(query: SqliteQuery<'q>, input: &'q CategoryInput) -> SqliteQuery<'q> {
        query
            .bind(input.name.trim())
            .bind(input.description.as_str())
    }
}

// =============================================================================
// Repository
// =============================================================================

/// CRUD repository for any [`Resource`].
///
/// ## Usage
/// ```rust,ignore
/// let repo: ResourceRepository<Product> = db.products();
///
/// let created = repo.create(&input).await?;
/// let found = repo.get(created.id).await?;
/// ```
#[derive(Debug)]
pub struct ResourceRepository<R> {
    pool: SqlitePool,
    _resource: PhantomData<fn() -> R>,
}

impl<R> Clone for ResourceRepository<R> {
    fn clone(&self) -> Self {
        ResourceRepository::new(self.pool.clone())
    }
}

impl<R> ResourceRepository<R> {
    /// Creates a new repository over the pool.
    pub fn new(pool: SqlitePool) -> Self {
        ResourceRepository {
            pool,
            _resource: PhantomData,
        }
    }
}

impl<R: Resource> ResourceRepository<R> {
    fn select_sql() -> String {
        format!("SELECT id, {} FROM {}", R::COLUMNS.join(", "), R::TABLE)
    }

    /// Lists every row, ordered by id.
    pub async fn list(&self) -> DbResult<Vec<R>> {
        let sql = format!("{} ORDER BY id", Self::select_sql());
        let rows = sqlx::query_as::<_, R>(&sql).fetch_all(&self.pool).await?;

        debug!(entity = R::ENTITY, count = rows.len(), "Listed rows");
        Ok(rows)
    }

    /// Gets a row by id.
    ///
    /// ## Returns
    /// * `Ok(Some(row))` - Row found
    /// * `Ok(None)` - No row with that id
    pub async fn get(&self, id: i64) -> DbResult<Option<R>> {
        let sql = format!("{} WHERE id = ?1", Self::select_sql());
        let row = sqlx::query_as::<_, R>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row)
    }

    /// Inserts a row and returns it with the assigned id.
    pub async fn create(&self, input: &R::Input) -> DbResult<R> {
        let placeholders = (1..=R::COLUMNS.len())
            .map(|i| format!("?{}", i))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            R::TABLE,
            R::COLUMNS.join(", "),
            placeholders
        );

        let result = R::bind_input(sqlx::query(&sql), input)
            .execute(&self.pool)
            .await?;
        let id = result.last_insert_rowid();

        debug!(entity = R::ENTITY, id, "Created row");

        self.get(id)
            .await?
            .ok_or_else(|| DbError::not_found(R::ENTITY, id))
    }

    /// Replaces every writable column of an existing row.
    ///
    /// ## Errors
    /// * `DbError::NotFound` - No row with that id
    pub async fn update(&self, id: i64, input: &R::Input) -> DbResult<R> {
        let assignments = R::COLUMNS
            .iter()
            .enumerate()
            .map(|(i, column)| format!("{} = ?{}", column, i + 1))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!(
            "UPDATE {} SET {} WHERE id = ?{}",
            R::TABLE,
            assignments,
            R::COLUMNS.len() + 1
        );

        let result = R::bind_input(sqlx::query(&sql), input)
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found(R::ENTITY, id));
        }

        debug!(entity = R::ENTITY, id, "Updated row");

        self.get(id)
            .await?
            .ok_or_else(|| DbError::not_found(R::ENTITY, id))
    }

    /// Deletes a row by id.
    ///
    /// ## Errors
    /// * `DbError::NotFound` - No row with that id
    /// * `DbError::ForeignKeyViolation` - Row is still referenced
    pub async fn delete(&self, id: i64) -> DbResult<()> {
        let sql = format!("DELETE FROM {} WHERE id = ?1", R::TABLE);
        let result = sqlx::query(&sql).bind(id).execute(&self.pool).await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found(R::ENTITY, id));
        }

        debug!(entity = R::ENTITY, id, "Deleted row");
        Ok(())
    }

    /// Counts all rows.
    pub async fn count(&self) -> DbResult<i64> {
        let sql = format!("SELECT COUNT(*) FROM {}", R::TABLE);
        let count: i64 = sqlx::query_scalar(&sql).fetch_one(&self.pool).await?;
        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
