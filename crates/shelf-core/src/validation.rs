//! # Validation Module
//!
//! Field validators shared by the line codec and the inventory.
//!
//! ## Where Validation Runs
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Points                                  │
//! │                                                                         │
//! │  Loading a line  ──► validate_product_name, validate_price             │
//! │                      (a bad value rejects that line only)              │
//! │                                                                         │
//! │  Saving a record ──► validate_field_text                               │
//! │                      (a delimiter inside a field would split the line) │
//! │                                                                         │
//! │  remove_quantity ──► validate_quantity                                 │
//! │                                                                         │
//! │  add / purchase / cancel_purchase do NOT validate.                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::{FIELD_DELIMITER, RECORD_DELIMITER};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product name.
///
/// ## Rules
/// - Must not be empty after trimming
///
/// ```rust
/// use shelf_core::validation::validate_product_name;
///
/// assert!(validate_product_name("Chess").is_ok());
/// assert!(validate_product_name("  ").is_err());
/// ```
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    if name.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    Ok(())
}

/// Validates that a text field survives a trip through the line format.
///
/// ## Rules
/// - No field delimiter (`|`)
/// - No line break (`\n` or `\r`)
/// - No leading or trailing whitespace (decoding trims it away)
pub fn validate_field_text(field: &str, value: &str) -> ValidationResult<()> {
    if value.contains(FIELD_DELIMITER) {
        return Err(ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: format!("must not contain '{}'", FIELD_DELIMITER),
        });
    }

    if value.contains(RECORD_DELIMITER) || value.contains('\r') {
        return Err(ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: "must not contain line breaks".to_string(),
        });
    }

    if value.trim() != value {
        return Err(ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: "must not start or end with whitespace".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a unit price.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (free items)
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates a quantity to take out of stock.
///
/// ## Rules
/// - Must be positive (> 0)
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_product_name() {
        assert!(validate_product_name("Chess").is_ok());
        assert!(validate_product_name("").is_err());
        assert!(validate_product_name("   ").is_err());
    }

    #[test]
    fn test_validate_field_text() {
        assert!(validate_field_text("description", "Two players, one board").is_ok());
        assert!(validate_field_text("description", "").is_ok());

        let err = validate_field_text("name", "Rock|Paper").unwrap_err();
        assert_eq!(err.to_string(), "name has invalid format: must not contain '|'");

        assert!(validate_field_text("description", "line one\nline two").is_err());
        assert!(validate_field_text("description", "windows\r").is_err());

        let err = validate_field_text("name", " Chess ").unwrap_err();
        assert_eq!(
            err.to_string(),
            "name has invalid format: must not start or end with whitespace"
        );
        assert!(validate_field_text("type", "Game\t").is_err());
    }

    #[test]
    fn test_validate_price() {
        assert!(validate_price(Money::zero()).is_ok());
        assert!(validate_price(Money::from_cents(1099)).is_ok());
        assert!(validate_price(Money::from_cents(-1)).is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-3).is_err());
    }
}
