//! # Line Codec
//!
//! Converts between [`Product`] records and the inventory file's line format.
//!
//! ## Line Format
//! ```text
//! Type: Game|Name: Chess|Description: Classic|Price: 19.99|Quantity: 5
//! └─┬──────┘ └───┬─────┘ └────────┬────────┘ └────┬─────┘ └────┬─────┘
//!   field 1     field 2         field 3          field 4      field 5
//!
//! • exactly 5 fields separated by '|'
//! • each field is "<Label>: <value>", labels in the order above
//! • surrounding whitespace of a field and of its value is ignored
//! • Price is written with 2 decimal places, Quantity as an integer
//! ```
//!
//! ## Blob Layout
//! One record per line, every line terminated by `\n`. Blank lines are ignored
//! when decoding so the trailing newline never produces a diagnostic.

use crate::error::{ParseError, ParseResult};
use crate::money::Money;
use crate::types::Product;
use crate::validation::{
    validate_field_text, validate_price, validate_product_name, ValidationResult,
};
use crate::{FIELD_COUNT, FIELD_DELIMITER, FIELD_LABELS, RECORD_DELIMITER};

// =============================================================================
// Decoding
// =============================================================================

/// Parses one record line.
///
/// ## Example
/// ```rust
/// use shelf_core::codec::parse_line;
///
/// let product = parse_line("Type: Game|Name: Chess|Description: Classic|Price: 19.99|Quantity: 5").unwrap();
/// assert_eq!(product.name, "Chess");
/// assert_eq!(product.price.cents(), 1999);
///
/// assert!(parse_line("Type: Game|Name: Chess|Description: Classic").is_err());
/// ```
pub fn parse_line(line: &str) -> ParseResult<Product> {
    let fields: Vec<&str> = line.split(FIELD_DELIMITER).collect();
    if fields.len() != FIELD_COUNT {
        return Err(ParseError::FieldCount {
            expected: FIELD_COUNT,
            found: fields.len(),
        });
    }

    let mut values = [""; FIELD_COUNT];
    for (position, (field, label)) in fields.iter().zip(FIELD_LABELS).enumerate() {
        values[position] = field_value(position + 1, field, label)?;
    }
    let [category, name, description, price, quantity] = values;

    validate_product_name(name)?;

    let price: Money = price.parse().map_err(|_| ParseError::InvalidPrice {
        value: price.to_string(),
    })?;
    validate_price(price)?;

    let quantity: i64 = quantity.parse().map_err(|_| ParseError::InvalidQuantity {
        value: quantity.to_string(),
    })?;

    Ok(Product::new(category, name, description, price, quantity))
}

/// Strips `<label>:` from a field and returns the trimmed value.
fn field_value<'a>(position: usize, field: &'a str, label: &'static str) -> ParseResult<&'a str> {
    let field = field.trim();
    field
        .strip_prefix(label)
        .and_then(|rest| rest.strip_prefix(':'))
        .map(str::trim)
        .ok_or_else(|| ParseError::MissingLabel {
            position,
            expected: label,
            found: field.to_string(),
        })
}

/// Decodes a whole blob line by line.
///
/// Yields `(line_number, result)` for every non-blank line; line numbers start
/// at 1. The caller decides whether a failed line is skipped or fatal.
pub fn decode(blob: &str) -> impl Iterator<Item = (usize, ParseResult<Product>)> + '_ {
    blob.split(RECORD_DELIMITER)
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| (index + 1, parse_line(line)))
}

// =============================================================================
// Encoding
// =============================================================================

/// Formats one record as a line (without the trailing newline).
///
/// Applies the same rules as [`parse_line`], so every line written here
/// decodes back to an equal record. Fails when:
/// - a text field contains `|` or a line break
/// - a text field has leading or trailing whitespace
/// - the name is empty
/// - the price is negative
pub fn format_line(product: &Product) -> ValidationResult<String> {
    validate_field_text("type", &product.category)?;
    validate_field_text("name", &product.name)?;
    validate_field_text("description", &product.description)?;
    validate_product_name(&product.name)?;
    validate_price(product.price)?;

    let values = [
        product.category.clone(),
        product.name.clone(),
        product.description.clone(),
        product.price.to_decimal_string(),
        product.quantity.to_string(),
    ];

    let fields: Vec<String> = FIELD_LABELS
        .iter()
        .zip(values)
        .map(|(label, value)| format!("{}: {}", label, value))
        .collect();

    let delimiter = FIELD_DELIMITER.to_string();
    Ok(fields.join(delimiter.as_str()))
}

/// Encodes records into a blob, one `\n`-terminated line per record.
pub fn encode<'a, I>(products: I) -> ValidationResult<String>
where
    I: IntoIterator<Item = &'a Product>,
{
    let mut blob = String::new();
    for product in products {
        blob.push_str(&format_line(product)?);
        blob.push(RECORD_DELIMITER);
    }
    Ok(blob)
}

// =============================================================================
// Unit Tests
// =============================================================================
