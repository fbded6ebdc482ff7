//! # shelf-core: Pure Inventory Logic for Shelf
//!
//! This crate is the **heart** of Shelf. It owns the product record, the
//! in-memory inventory and the flat-file line format, all as pure code with
//! zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Shelf Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                shelf-store (InventoryStore)                     │   │
//! │  │      open(path) ──► load ──► mutate ──► save(path)             │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ shelf-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   codec   │  │ inventory │  │   │
//! │  │   │  Product  │  │   Money   │  │ parse_line│  │ purchase  │  │   │
//! │  │   │ ProductKey│  │  cents    │  │ format_   │  │ cancel    │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO FILES • NO LOGGING SETUP • PURE FUNCTIONS        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Product record and its case-insensitive key
//! - [`money`] - Money type with integer cents (no floating point!)
//! - [`codec`] - `Type: …|Name: …|…` line format
//! - [`inventory`] - The keyed collection and its operations
//! - [`table`] - Fixed-width text rendering of an inventory
//! - [`error`] - Domain error types
//! - [`validation`] - Field validation
//!
//! ## Example Usage
//!
//! ```rust
//! use shelf_core::{codec, Inventory};
//!
//! let mut inventory = Inventory::new();
//! let line = "Type: Game|Name: Chess|Description: Classic|Price: 19.99|Quantity: 5";
//! inventory.add(codec::parse_line(line).unwrap());
//!
//! assert_eq!(inventory.purchase("CHESS", 3).unwrap(), 2);
//! assert!(inventory.purchase("chess", 10).is_err());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod codec;
pub mod error;
pub mod inventory;
pub mod money;
pub mod table;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ParseError, ParseResult, ValidationError};
pub use inventory::Inventory;
pub use money::Money;
pub use table::InventoryTable;
pub use types::{Product, ProductKey};

// =============================================================================
// Line Format Constants
// =============================================================================

/// Separator between the five fields of a record line.
pub const FIELD_DELIMITER: char = '|';

/// Separator between records in a blob.
pub const RECORD_DELIMITER: char = '\n';

/// Number of fields every record line carries.
pub const FIELD_COUNT: usize = 5;

/// Field labels in the order they appear on a line.
pub const FIELD_LABELS: [&str; FIELD_COUNT] = ["Type", "Name", "Description", "Price", "Quantity"];
