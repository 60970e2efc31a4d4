//! # Domain Types
//!
//! Core domain types used throughout the Kasir backend.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────────┐   │
//! │  │    Product      │   │  Transaction    │   │ TransactionDetail   │   │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────────  │   │
//! │  │  id             │   │  id             │   │  transaction_id(FK) │   │
//! │  │  nama           │   │  total_amount   │◄──│  product_id (FK)    │   │
//! │  │  harga          │   │  created_at     │   │  quantity           │   │
//! │  │  stok           │   └─────────────────┘   │  unit_price         │   │
//! │  └─────────────────┘                         └─────────────────────┘   │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────────┐   │
//! │  │    Category     │   │  CheckoutItem   │   │   SalesReport       │   │
//! │  │  id, nama,      │   │  (input only)   │   │   (derived only)    │   │
//! │  │  description    │   │  product_id,qty │   │   revenue, count,   │   │
//! │  └─────────────────┘   └─────────────────┘   │   best seller       │   │
//! │                                              └─────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Names
//! Field names are English in Rust. The JSON keys keep the cashier app's
//! established Indonesian contract (`nama`, `harga`, `stok`, `total_transaksi`,
//! `produk_terlaris`, `qty_terjual`) through serde renames, so existing
//! clients keep working.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::NO_SALES_PLACEHOLDER;

// =============================================================================
// Product
// =============================================================================

/// A product available for sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Product {
    /// Unique identifier, assigned by the store on creation.
    pub id: i64,

    /// Display name shown to the cashier.
    #[serde(rename = "nama")]
    pub name: String,

    /// Unit price in the smallest currency unit.
    #[serde(rename = "harga")]
    pub price: i64,

    /// Units currently in stock.
    #[serde(rename = "stok")]
    pub stock: i64,
}

impl Product {
    /// Returns the price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_minor(self.price)
    }

    /// Checks if the requested quantity is available.
    pub fn can_sell(&self, quantity: i64) -> bool {
        self.stock >= quantity
    }
}

/// Request body for creating or replacing a product.
///
/// Any `id` sent by the client is ignored; the path decides which row
/// is written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProductInput {
    #[serde(rename = "nama")]
    pub name: String,

    #[serde(rename = "harga")]
    pub price: i64,

    #[serde(rename = "stok")]
    pub stock: i64,
}

// =============================================================================
// Category
// =============================================================================

/// A product category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Category {
    pub id: i64,

    #[serde(rename = "nama")]
    pub name: String,

    /// Free-text description.
    pub description: String,
}

/// Request body for creating or replacing a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CategoryInput {
    #[serde(rename = "nama")]
    pub name: String,

    #[serde(default)]
    pub description: String,
}

// =============================================================================
// Checkout
// =============================================================================

/// One line of a checkout request. Never persisted as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CheckoutItem {
    pub product_id: i64,
    pub quantity: i64,
}

/// Body of `POST /api/checkout`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CheckoutRequest {
    pub items: Vec<CheckoutItem>,
}

// =============================================================================
// Transaction
// =============================================================================

/// A completed checkout. Immutable once written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Transaction {
    pub id: i64,

    /// Sum of `unit_price × quantity` over all details.
    pub total_amount: i64,

    /// Local wall-clock time of the checkout, second precision.
    #[ts(as = "String")]
    pub created_at: NaiveDateTime,

    /// Line details, loaded separately from the header row.
    #[cfg_attr(feature = "sqlx", sqlx(skip))]
    #[serde(default)]
    pub details: Vec<TransactionDetail>,
}

impl Transaction {
    /// Returns the total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_minor(self.total_amount)
    }

    /// Recomputes the total from the detail rows.
    pub fn details_total(&self) -> Money {
        self.details.iter().map(TransactionDetail::subtotal).sum()
    }
}

/// A line item of a transaction.
///
/// The unit price is frozen at the time of sale so later price edits do
/// not rewrite history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct TransactionDetail {
    pub id: i64,
    pub transaction_id: i64,
    pub product_id: i64,
    pub quantity: i64,
    pub unit_price: i64,
    pub subtotal: i64,
}

impl TransactionDetail {
    /// Returns the line subtotal as Money.
    #[inline]
    pub fn subtotal(&self) -> Money {
        Money::from_minor(self.subtotal)
    }
}

// =============================================================================
// Sales Report
// =============================================================================

/// The product that sold the most units within a report window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct BestSeller {
    #[serde(rename = "nama")]
    pub name: String,

    #[serde(rename = "qty_terjual")]
    pub quantity_sold: i64,
}

impl BestSeller {
    /// Sentinel used when the window has no sales.
    pub fn none() -> Self {
        BestSeller {
            name: NO_SALES_PLACEHOLDER.to_string(),
            quantity_sold: 0,
        }
    }
}

impl Default for BestSeller {
    fn default() -> Self {
        BestSeller::none()
    }
}

/// Sales summary over a date window. Recomputed on every request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SalesReport {
    pub total_revenue: i64,

    #[serde(rename = "total_transaksi")]
    pub total_transactions: i64,

    #[serde(rename = "produk_terlaris")]
    pub best_seller: BestSeller,
}

impl SalesReport {
    /// Report for a window without any transaction.
    pub fn empty() -> Self {
        SalesReport {
            total_revenue: 0,
            total_transactions: 0,
            best_seller: BestSeller::none(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
