//! # Store Error Types
//!
//! Error types for inventory persistence.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  std::io::Error ─────────────► StoreError::Io { path }                 │
//! │  shelf_core::ParseError ─────► StoreError::Parse { line }              │
//! │  shelf_core::ValidationError ► StoreError::Encode   (save)             │
//! │  shelf_core::CoreError ──────► StoreError::Core                        │
//! │  toml errors ────────────────► StoreError::Config*                     │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Severity
//! ```text
//! ignorable    missing inventory file on load (empty inventory)
//! reportable   I/O failures, skipped lines, stock/lookup failures
//! fatal        strict-load parse failure, unencodable record, bad config
//! ```

use std::io;
use std::path::PathBuf;

use shelf_core::{CoreError, ParseError, ValidationError};
use thiserror::Error;

/// Result type alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Store error type covering every persistence failure.
#[derive(Debug, Error)]
pub enum StoreError {
    // =========================================================================
    // Storage Errors
    // =========================================================================
    /// Reading or writing the inventory file failed.
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    // =========================================================================
    // Format Errors
    // =========================================================================
    /// A line of the inventory file could not be decoded.
    #[error("line {line}: {source}")]
    Parse {
        line: usize,
        #[source]
        source: ParseError,
    },

    /// A record cannot be written in the line format.
    #[error("cannot encode record: {0}")]
    Encode(#[from] ValidationError),

    // =========================================================================
    // Domain Errors
    // =========================================================================
    /// A business rule rejected the operation.
    #[error(transparent)]
    Core(#[from] CoreError),

    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Invalid store configuration.
    #[error("Invalid store configuration: {0}")]
    InvalidConfig(String),

    /// Failed to load config file.
    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    /// Failed to save config file.
    #[error("Failed to save config: {0}")]
    ConfigSaveFailed(String),

    // =========================================================================
    // Internal Errors
    // =========================================================================
    /// A thread panicked while holding the shared store.
    #[error("Inventory lock poisoned")]
    LockPoisoned,
}

// =============================================================================
// Constructors
// =============================================================================

impl StoreError {
    /// Wraps an I/O error with the path it happened on.
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        StoreError::Io {
            path: path.into(),
            source,
        }
    }

    /// Attaches a line number to a decode failure.
    pub fn parse(line: usize, source: ParseError) -> Self {
        StoreError::Parse { line, source }
    }
}

// =============================================================================
// Error Conversions
// =============================================================================

impl From<toml::de::Error> for StoreError {
    fn from(err: toml::de::Error) -> Self {
        StoreError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::ser::Error> for StoreError {
    fn from(err: toml::ser::Error) -> Self {
        StoreError::ConfigSaveFailed(err.to_string())
    }
}

// =============================================================================
// Error Categorization
// =============================================================================

impl StoreError {
    /// Returns true if the inventory file simply does not exist yet.
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::Io { source, .. } if source.kind() == io::ErrorKind::NotFound)
    }

    /// Returns true if the caller can report this error and keep going.
    ///
    /// ## Recoverable Errors
    /// - I/O failures (retry, pick another path)
    /// - Individual line failures under a lenient load
    /// - Stock and lookup failures
    ///
    /// ## Non-Recoverable Errors
    /// - Records that cannot be encoded
    /// - Configuration errors
    /// - Poisoned lock
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            StoreError::Io { .. } | StoreError::Parse { .. } | StoreError::Core(_)
        )
    }

    /// Returns true if this error indicates a configuration problem.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            StoreError::InvalidConfig(_)
                | StoreError::ConfigLoadFailed(_)
                | StoreError::ConfigSaveFailed(_)
        )
    }
}
