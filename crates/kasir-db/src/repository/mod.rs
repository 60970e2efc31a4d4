//! # Repository Module
//!
//! Database repository implementations for Kasir POS.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  HTTP handler                                                           │
//! │       │                                                                 │
//! │       │  db.products().get(1)                                           │
//! │       │  db.transactions().create(&items, now, false)                   │
//! │       ▼                                                                 │
//! │  ResourceRepository<Product>     TransactionRepository                  │
//! │  ResourceRepository<Category>    ReportRepository                       │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`ResourceRepository`](resource::ResourceRepository) - Generic CRUD for products and categories
//! - [`TransactionRepository`](transaction::TransactionRepository) - Atomic checkout writes
//! - [`ReportRepository`](report::ReportRepository) - Sales aggregates

pub mod report;
pub mod resource;
pub mod transaction;
