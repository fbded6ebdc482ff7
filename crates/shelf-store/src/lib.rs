//! # shelf-store: Flat-File Persistence for Shelf
//!
//! Binds a [`shelf_core::Inventory`] to a delimited text file.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Shelf Data Flow                                  │
//! │                                                                         │
//! │  Caller (menu, script, seed binary)                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   shelf-store (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │ InventoryStore│    │    Storage    │    │ StoreConfig  │  │   │
//! │  │   │  (store.rs)   │───►│ (storage.rs)  │    │ (config.rs)  │  │   │
//! │  │   │               │    │               │    │              │  │   │
//! │  │   │ load / save   │    │ FileStorage   │    │ shelf.toml   │  │   │
//! │  │   │ SharedStore   │    │ MemoryStorage │    │ SHELF_* env  │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     inventory.txt                               │   │
//! │  │   Type: Game|Name: Chess|Description: ...|Price: 19.99|...     │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`store`] - Load-once, save-on-demand inventory store
//! - [`shared`] - Mutex-guarded handle for multi-threaded callers
//! - [`storage`] - Whole-file read/write adapters
//! - [`config`] - File and environment configuration
//! - [`error`] - Store error types
//!
//! ## Usage
//!
//! ```rust,no_run
//! use shelf_store::InventoryStore;
//!
//! let mut store = InventoryStore::open("inventory.txt");
//! if let Ok(left) = store.purchase("chess", 2) {
//!     println!("{} left", left);
//! }
//! store.save()?;
//! # Ok::<(), shelf_store::StoreError>(())
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod error;
pub mod shared;
pub mod storage;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::{LoadPolicy, StoreConfig};
pub use error::{StoreError, StoreResult};
pub use shared::SharedStore;
pub use storage::{FileStorage, MemoryStorage, Storage};
pub use store::{InventoryStore, LoadReport, SkippedLine};
