//! # Error Types
//!
//! Domain-specific error types for shelf-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  shelf-core errors (this file)                                         │
//! │  ├── CoreError        - Business rule failures (stock, lookup)         │
//! │  ├── ParseError       - One record line could not be decoded           │
//! │  └── ValidationError  - Field value failures                           │
//! │                                                                         │
//! │  shelf-store errors (separate crate)                                   │
//! │  └── StoreError       - I/O, load policy, config                       │
//! │                                                                         │
//! │  Flow: ValidationError → ParseError → StoreError::Parse { line }        │
//! │        ValidationError → CoreError  → StoreError::Core                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (name, field, raw value)
//! 3. Errors are enum variants, never String
//! 4. Business rule failures are `Err` values, never `bool`

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These errors represent business rule violations on the inventory.
/// None of them change state: an operation that returns one of these left the
/// inventory exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// No record exists under the requested name (case-insensitive).
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Insufficient stock to complete a purchase or removal.
    ///
    /// ## User Workflow
    /// ```text
    /// purchase("Chess", 5)
    ///      │
    ///      ▼
    /// Check stock: available=3
    ///      │
    ///      ▼
    /// InsufficientStock { name: "Chess", available: 3, requested: 5 }
    /// ```
    #[error("Insufficient stock for {name}: available {available}, requested {requested}")]
    InsufficientStock {
        name: String,
        available: i64,
        requested: i64,
    },

    /// The resulting stock level does not fit in an `i64`.
    #[error("Quantity overflow for {name}: stock {quantity}, change {requested}")]
    QuantityOverflow {
        name: String,
        quantity: i64,
        requested: i64,
    },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Parse Error
// =============================================================================

/// Failure to decode a single record line.
///
/// Each variant describes one line; the line number is attached by whoever
/// iterates the blob (see `shelf_store::StoreError::Parse`).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The line does not split into exactly five `|`-separated fields.
    #[error("expected {expected} fields, found {found}")]
    FieldCount { expected: usize, found: usize },

    /// A field does not start with the label required at its position.
    #[error("field {position} must start with '{expected}:', found '{found}'")]
    MissingLabel {
        position: usize,
        expected: &'static str,
        found: String,
    },

    /// The price is not a decimal number.
    #[error("invalid price '{value}'")]
    InvalidPrice { value: String },

    /// The quantity is not an integer.
    #[error("invalid quantity '{value}'")]
    InvalidQuantity { value: String },

    /// The field parsed but its value is not acceptable.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Field validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., delimiter inside a text field).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

/// Convenience type alias for single-line decode results.
pub type ParseResult<T> = Result<T, ParseError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::InsufficientStock {
            name: "Chess".to_string(),
            available: 3,
            requested: 5,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient stock for Chess: available 3, requested 5"
        );
        assert_eq!(
            CoreError::ProductNotFound("ghost".into()).to_string(),
            "Product not found: ghost"
        );

        let err = CoreError::QuantityOverflow {
            name: "Chess".to_string(),
            quantity: i64::MAX,
            requested: 1,
        };
        assert_eq!(
            err.to_string(),
            "Quantity overflow for Chess: stock 9223372036854775807, change 1"
        );
    }

    #[test]
    fn test_parse_error_messages() {
        let err = ParseError::FieldCount {
            expected: 5,
            found: 3,
        };
        assert_eq!(err.to_string(), "expected 5 fields, found 3");

        let err = ParseError::MissingLabel {
            position: 2,
            expected: "Name",
            found: "Title: Chess".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "field 2 must start with 'Name:', found 'Title: Chess'"
        );
    }

    #[test]
    fn test_validation_converts() {
        let validation_err = ValidationError::Required {
            field: "name".to_string(),
        };
        let core_err: CoreError = validation_err.clone().into();
        assert!(matches!(core_err, CoreError::Validation(_)));

        let parse_err: ParseError = validation_err.into();
        assert_eq!(parse_err.to_string(), "name is required");
    }
}
