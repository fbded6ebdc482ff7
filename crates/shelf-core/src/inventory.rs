//! # Inventory
//!
//! The in-memory collection of products, keyed by lowercased name.
//!
//! ## Stock Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Quantity Changes                                   │
//! │                                                                         │
//! │  purchase(name, n)         stock >= n ? stock - n : InsufficientStock   │
//! │  cancel_purchase(name, n)  stock + n   (n may be negative)              │
//! │  remove_quantity(name, n)  n > 0 and stock >= n ? stock - n : Err       │
//! │                                                                         │
//! │  A result outside i64 fails with QuantityOverflow.                      │
//! │                                                                         │
//! │  remove(product, n)        deletes the whole record, n is ignored       │
//! │  delete(name)              deletes the whole record                     │
//! │                                                                         │
//! │  Every Err leaves the inventory untouched.                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Records are kept ordered by key so listings and saved files are stable.

use std::collections::BTreeMap;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::table::InventoryTable;
use crate::types::{Product, ProductKey};
use crate::validation::validate_quantity;

/// Keyed collection of products.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inventory {
    products: BTreeMap<ProductKey, Product>,
}

impl Inventory {
    /// Creates an empty inventory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct products.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Returns true when no product is held.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Checks whether a product exists (case-insensitive).
    pub fn contains(&self, name: &str) -> bool {
        self.products.contains_key(&ProductKey::new(name))
    }

    /// Iterates over the records in key order.
    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.products.values()
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Returns a snapshot of every record.
    ///
    /// The returned vector is a copy; changing it does not touch the inventory.
    pub fn get_all(&self) -> Vec<Product> {
        self.products.values().cloned().collect()
    }

    /// Looks a product up by name, ignoring case.
    pub fn get(&self, name: &str) -> Option<&Product> {
        self.products.get(&ProductKey::new(name))
    }

    /// Sum of all quantities on hand, or `None` if it overflows.
    pub fn total_quantity(&self) -> Option<i64> {
        self.products
            .values()
            .try_fold(0i64, |total, p| total.checked_add(p.quantity))
    }

    /// Value of all stock at unit price, or `None` if it overflows.
    pub fn total_value(&self) -> Option<Money> {
        self.products
            .values()
            .try_fold(Money::zero(), |total, p| total.checked_add(p.stock_value()?))
    }

    /// Renders the inventory as a fixed-width table.
    pub fn table(&self) -> InventoryTable<'_> {
        InventoryTable::new(self)
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Inserts a product, replacing any record with the same lowercased name.
    ///
    /// Returns the replaced record, if any. Fields are not validated.
    pub fn add(&mut self, product: Product) -> Option<Product> {
        self.products.insert(product.key(), product)
    }

    /// Removes the product's record entirely.
    ///
    /// `_requested_quantity` is accepted for callers that think in units but
    /// has no effect: the whole record goes. Use [`Inventory::remove_quantity`]
    /// to take a number of units out instead.
    pub fn remove(&mut self, product: &Product, _requested_quantity: i64) -> Option<Product> {
        self.delete(&product.name)
    }

    /// Deletes the record stored under `name` (case-insensitive).
    pub fn delete(&mut self, name: &str) -> Option<Product> {
        self.products.remove(&ProductKey::new(name))
    }

    /// Takes `quantity` units out of stock, keeping the record even at zero.
    ///
    /// ## Errors
    /// - `Validation` if `quantity` is not positive
    /// - `ProductNotFound` if no record matches
    /// - `InsufficientStock` if fewer than `quantity` units are on hand
    pub fn remove_quantity(&mut self, name: &str, quantity: i64) -> CoreResult<i64> {
        validate_quantity(quantity)?;
        self.take(name, quantity)
    }

    /// Sells `quantity` units and returns the remaining stock.
    ///
    /// ## Errors
    /// - `ProductNotFound` if no record matches
    /// - `InsufficientStock` if fewer than `quantity` units are on hand
    /// - `QuantityOverflow` if a negative `quantity` pushes stock past `i64::MAX`
    ///
    /// ## Example
    /// ```rust
    /// use shelf_core::{Inventory, Money, Product};
    ///
    /// let mut inventory = Inventory::new();
    /// inventory.add(Product::new("Game", "Chess", "", Money::from_cents(1999), 5));
    ///
    /// assert_eq!(inventory.purchase("chess", 3), Ok(2));
    /// assert!(inventory.purchase("chess", 10).is_err());
    /// assert_eq!(inventory.get("Chess").unwrap().quantity, 2);
    /// ```
    pub fn purchase(&mut self, name: &str, quantity: i64) -> CoreResult<i64> {
        self.take(name, quantity)
    }

    /// Returns `quantity` units to stock and returns the new stock level.
    ///
    /// The sign of the amount is not checked: a negative value is added as-is.
    ///
    /// ## Errors
    /// - `ProductNotFound` if no record matches
    /// - `QuantityOverflow` if the new stock does not fit in an `i64`
    pub fn cancel_purchase(&mut self, name: &str, quantity: i64) -> CoreResult<i64> {
        let product = self.get_mut(name)?;
        let Some(updated) = product.quantity.checked_add(quantity) else {
            return Err(overflow(product, quantity));
        };

        product.quantity = updated;
        Ok(updated)
    }

    fn take(&mut self, name: &str, quantity: i64) -> CoreResult<i64> {
        let product = self.get_mut(name)?;
        if !product.can_sell(quantity) {
            return Err(CoreError::InsufficientStock {
                name: product.name.clone(),
                available: product.quantity,
                requested: quantity,
            });
        }

        let Some(remaining) = product.quantity.checked_sub(quantity) else {
            return Err(overflow(product, quantity));
        };

        product.quantity = remaining;
        Ok(remaining)
    }

    fn get_mut(&mut self, name: &str) -> CoreResult<&mut Product> {
        self.products
            .get_mut(&ProductKey::new(name))
            .ok_or_else(|| CoreError::ProductNotFound(name.to_string()))
    }
}

fn overflow(product: &Product, requested: i64) -> CoreError {
    CoreError::QuantityOverflow {
        name: product.name.clone(),
        quantity: product.quantity,
        requested,
    }
}

impl FromIterator<Product> for Inventory {
    /// Later products replace earlier ones with the same lowercased name.
    fn from_iter<I: IntoIterator<Item = Product>>(iter: I) -> Self {
        let mut inventory = Inventory::new();
        inventory.extend(iter);
        inventory
    }
}

impl Extend<Product> for Inventory {
    fn extend<I: IntoIterator<Item = Product>>(&mut self, iter: I) {
        for product in iter {
            self.add(product);
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
