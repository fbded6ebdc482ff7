//! # Domain Types
//!
//! The product record and the key it is stored under.
//!
//! ## Identity
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Product { name: "Chess" }   ──► ProductKey("chess")                   │
//! │  Product { name: "CHESS" }   ──► ProductKey("chess")   same record     │
//! │  get("cHeSs")                ──► ProductKey("chess")                   │
//! │                                                                         │
//! │  The display name keeps its original casing; only the key is folded.   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::money::Money;

// =============================================================================
// Product Key
// =============================================================================

/// Case-insensitive identity of a product: its lowercased name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ProductKey(String);

impl ProductKey {
    /// Folds a product name into its key.
    pub fn new(name: &str) -> Self {
        ProductKey(name.to_lowercase())
    }

    /// Returns the lowercased name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ProductKey {
    fn from(name: &str) -> Self {
        ProductKey::new(name)
    }
}

impl fmt::Display for ProductKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product held in the inventory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Free-form type tag ("Game", "Subscription", "Boardgame", ...).
    pub category: String,

    /// Display name. Unique within an inventory, compared case-insensitively.
    pub name: String,

    /// Free text shown in listings.
    pub description: String,

    /// Unit price.
    pub price: Money,

    /// Units on hand. Can go negative through unchecked cancellations.
    pub quantity: i64,
}

impl Product {
    /// Creates a product record.
    pub fn new(
        category: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        price: Money,
        quantity: i64,
    ) -> Self {
        Product {
            category: category.into(),
            name: name.into(),
            description: description.into(),
            price,
            quantity,
        }
    }

    /// Returns the key this product is stored under.
    #[inline]
    pub fn key(&self) -> ProductKey {
        ProductKey::new(&self.name)
    }

    /// Checks if `quantity` units can be taken from stock.
    #[inline]
    pub fn can_sell(&self, quantity: i64) -> bool {
        self.quantity >= quantity
    }

    /// Price of all units on hand, or `None` if it does not fit in an `i64`.
    #[inline]
    pub fn stock_value(&self) -> Option<Money> {
        self.price.checked_multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
