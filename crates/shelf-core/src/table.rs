//! # Inventory Table
//!
//! Fixed-width text rendering of an inventory. Presentation only: nothing
//! here is read back.
//!
//! ```text
//! Current Inventory:
//! Type       Name            Description                    Price      Quantity
//! Game       Chess           Classic strategy               $19.99     5
//! ```

use std::fmt;

use crate::inventory::Inventory;

/// Column widths: Type, Name, Description, Price, Quantity.
const WIDTHS: [usize; 5] = [10, 15, 30, 10, 8];

/// Heading printed above the column header.
pub const TABLE_TITLE: &str = "Current Inventory:";

/// Borrowed view that renders an [`Inventory`] via `Display`.
#[derive(Debug, Clone, Copy)]
pub struct InventoryTable<'a> {
    inventory: &'a Inventory,
}

impl<'a> InventoryTable<'a> {
    /// Wraps an inventory for rendering.
    pub fn new(inventory: &'a Inventory) -> Self {
        InventoryTable { inventory }
    }
}

impl fmt::Display for InventoryTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [w_type, w_name, w_desc, w_price, w_qty] = WIDTHS;

        writeln!(f, "{}", TABLE_TITLE)?;
        writeln!(
            f,
            "{:<w_type$} {:<w_name$} {:<w_desc$} {:<w_price$} {:<w_qty$}",
            "Type", "Name", "Description", "Price", "Quantity"
        )?;

        for product in self.inventory.iter() {
            // The '$' takes one column of the price cell.
            writeln!(
                f,
                "{:<w_type$} {:<w_name$} {:<w_desc$} ${:<w_amount$} {:<w_qty$}",
                product.category,
                product.name,
                product.description,
                product.price.to_decimal_string(),
                product.quantity,
                w_amount = w_price - 1,
            )?;
        }

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;
    use crate::types::Product;

    #[test]
    fn test_empty_table_has_header_only() {
        let inventory = Inventory::new();
        let rendered = inventory.table().to_string();
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], TABLE_TITLE);
        assert!(lines[1].starts_with("Type       Name            Description"));
    }

    #[test]
    fn test_row_layout() {
        let mut inventory = Inventory::new();
        inventory.add(Product::new(
            "Game",
            "Chess",
            "Classic strategy",
            Money::from_cents(1999),
            5,
        ));

        let rendered = inventory.table().to_string();
        let row = rendered.lines().nth(2).unwrap();

        assert_eq!(
            row,
            format!(
                "{:<10} {:<15} {:<30} {:<10} {:<8}",
                "Game", "Chess", "Classic strategy", "$19.99", "5"
            )
        );
    }
}
