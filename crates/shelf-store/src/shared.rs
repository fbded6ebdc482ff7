//! # Shared Store
//!
//! An [`InventoryStore`] that several threads can hold at once.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Shared Store Operations                              │
//! │                                                                         │
//! │  thread A ──► purchase("chess", 2) ──┐                                 │
//! │                                      ├──► Mutex<InventoryStore> ──► file│
//! │  thread B ──► cancel_purchase(...) ──┘                                 │
//! │                                                                         │
//! │  Every operation, reads included, holds the lock for its whole         │
//! │  duration. save() writes under the same lock, so no mutation can       │
//! │  interleave with a write.                                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex};

use shelf_core::Product;
use tracing::error;

use crate::error::{StoreError, StoreResult};
use crate::storage::{FileStorage, Storage};
use crate::store::InventoryStore;

/// Cloneable handle to one [`InventoryStore`].
///
/// A thread that panics while holding the lock poisons it; every later call
/// then fails with [`StoreError::LockPoisoned`].
#[derive(Debug)]
pub struct SharedStore<S: Storage = FileStorage> {
    store: Arc<Mutex<InventoryStore<S>>>,
}

impl<S: Storage> Clone for SharedStore<S> {
    fn clone(&self) -> Self {
        SharedStore {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: Storage> From<InventoryStore<S>> for SharedStore<S> {
    fn from(store: InventoryStore<S>) -> Self {
        SharedStore::new(store)
    }
}

impl<S: Storage> SharedStore<S> {
    /// Wraps a loaded store.
    pub fn new(store: InventoryStore<S>) -> Self {
        SharedStore {
            store: Arc::new(Mutex::new(store)),
        }
    }

    /// Runs `f` with read access to the store.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let count = shared.with_store(|store| store.inventory().len())?;
    /// ```
    pub fn with_store<F, R>(&self, f: F) -> StoreResult<R>
    where
        F: FnOnce(&InventoryStore<S>) -> R,
    {
        let store = self.store.lock().map_err(|_| poisoned())?;
        Ok(f(&store))
    }

    /// Runs `f` with write access to the store.
    pub fn with_store_mut<F, R>(&self, f: F) -> StoreResult<R>
    where
        F: FnOnce(&mut InventoryStore<S>) -> R,
    {
        let mut store = self.store.lock().map_err(|_| poisoned())?;
        Ok(f(&mut store))
    }

    // =========================================================================
    // Operations
    // =========================================================================

    /// Snapshot of every record.
    pub fn get_all(&self) -> StoreResult<Vec<Product>> {
        self.with_store(|store| store.get_all())
    }

    /// Case-insensitive lookup; returns a copy of the record.
    pub fn get(&self, name: &str) -> StoreResult<Option<Product>> {
        self.with_store(|store| store.get(name).cloned())
    }

    /// Inserts or replaces a product; returns the replaced record.
    pub fn add(&self, product: Product) -> StoreResult<Option<Product>> {
        self.with_store_mut(|store| store.add(product))
    }

    /// Removes the whole record; `requested_quantity` has no effect.
    pub fn remove(&self, product: &Product, requested_quantity: i64) -> StoreResult<Option<Product>> {
        self.with_store_mut(|store| store.remove(product, requested_quantity))
    }

    /// Deletes the record stored under `name`.
    pub fn delete(&self, name: &str) -> StoreResult<Option<Product>> {
        self.with_store_mut(|store| store.delete(name))
    }

    /// Takes `quantity` units out of stock and returns the stock left.
    pub fn remove_quantity(&self, name: &str, quantity: i64) -> StoreResult<i64> {
        Ok(self.with_store_mut(|store| store.remove_quantity(name, quantity))??)
    }

    /// Sells `quantity` units and returns the stock left.
    pub fn purchase(&self, name: &str, quantity: i64) -> StoreResult<i64> {
        Ok(self.with_store_mut(|store| store.purchase(name, quantity))??)
    }

    /// Returns `quantity` units to stock and returns the new stock.
    pub fn cancel_purchase(&self, name: &str, quantity: i64) -> StoreResult<i64> {
        Ok(self.with_store_mut(|store| store.cancel_purchase(name, quantity))??)
    }

    /// Rendered inventory table.
    pub fn display(&self) -> StoreResult<String> {
        self.with_store(|store| store.display().to_string())
    }

    /// Writes the inventory to its file while holding the lock.
    pub fn save(&self) -> StoreResult<()> {
        self.with_store_mut(|store| store.save())?
    }
}

fn poisoned() -> StoreError {
    error!("Inventory lock poisoned");
    StoreError::LockPoisoned
}

// =============================================================================
// Unit Tests
// =============================================================================
