//! # Checkout Pricing
//!
//! Turns checkout lines plus a snapshot of the referenced products into a
//! priced plan that the database layer writes verbatim.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  [CheckoutItem]  +  {product_id → Product}                              │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  check_stock()    ← snapshot stock short? → CoreError::InsufficientStock│
//! │  plan_checkout()  ← THIS MODULE                                         │
//! │        ├── unknown product?      → CoreError::ProductNotFound           │
//! │        ├── price × qty overflow? → CoreError::AmountOverflow            │
//! │        ▼                                                                │
//! │  CheckoutPlan { lines: [LinePlan], total }                              │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  kasir-db writes header + one detail per line in one transaction        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `check_stock` only gives an early, descriptive error. The
//! conditional `UPDATE ... WHERE stock >= ?` in the database layer is what
//! actually guarantees stock never goes negative.

use std::collections::HashMap;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{CheckoutItem, Product};

/// A priced checkout line, in request order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinePlan {
    pub product_id: i64,
    pub quantity: i64,
    pub unit_price: Money,
    pub subtotal: Money,
}

/// The full priced checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutPlan {
    pub lines: Vec<LinePlan>,
    pub total: Money,
}

/// Prices every line against the product snapshot.
///
/// Lines that reference the same product stay separate lines.
///
/// ## Example
/// ```rust
/// use std::collections::HashMap;
/// use kasir_core::checkout::plan_checkout;
/// use kasir_core::{CheckoutItem, Money, Product};
///
/// let mut products = HashMap::new();
/// products.insert(1, Product { id: 1, name: "Indomie".into(), price: 1500, stock: 10 });
///
/// let plan = plan_checkout(&[CheckoutItem { product_id: 1, quantity: 3 }], &products).unwrap();
/// assert_eq!(plan.total, Money::from_minor(4500));
/// ```
pub fn plan_checkout(
    items: &[CheckoutItem],
    products: &HashMap<i64, Product>,
) -> CoreResult<CheckoutPlan> {
    let mut lines = Vec::with_capacity(items.len());
    let mut total = Money::zero();

    for item in items {
        let product = products
            .get(&item.product_id)
            .ok_or(CoreError::ProductNotFound(item.product_id))?;

        let overflow = || CoreError::AmountOverflow {
            product_id: product.id,
        };
        let subtotal = product.price().checked_mul(item.quantity).ok_or_else(overflow)?;
        total = total.checked_add(subtotal).ok_or_else(overflow)?;

        lines.push(LinePlan {
            product_id: product.id,
            quantity: item.quantity,
            unit_price: product.price(),
            subtotal,
        });
    }

    Ok(CheckoutPlan { lines, total })
}

/// Checks the snapshot has enough stock for every product.
///
/// Quantities of lines that reference the same product are added up.
pub fn check_stock(items: &[CheckoutItem], products: &HashMap<i64, Product>) -> CoreResult<()> {
    let mut requested: HashMap<i64, i64> = HashMap::new();

    for item in items {
        let product = products
            .get(&item.product_id)
            .ok_or(CoreError::ProductNotFound(item.product_id))?;

        let wanted = requested.entry(product.id).or_insert(0);
        *wanted = wanted.saturating_add(item.quantity);
        if !product.can_sell(*wanted) {
            return Err(CoreError::InsufficientStock {
                product_id: product.id,
                available: product.stock,
                requested: *wanted,
            });
        }
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
