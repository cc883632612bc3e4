// 🛍️ Shopping Cart - The in-progress selection
// One line per item name; adding an already-present item merges into the
// existing line. The unit price is captured at first add and only changes
// through an explicit re-sync.

use crate::error::{GroceryError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ============================================================================
// CART LINE
// ============================================================================

/// One cart line: unit price captured at add-time plus accumulated quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    pub unit_price: f64,
    pub quantity: u32,
}

impl CartLine {
    pub fn subtotal(&self) -> f64 {
        self.unit_price * self.quantity as f64
    }
}

// ============================================================================
// CART
// ============================================================================

/// Keyed by item name; quantities are always ≥ 1 (removal deletes the line
/// rather than leaving a zero-quantity entry).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Cart {
    lines: BTreeMap<String, CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Cart {
            lines: BTreeMap::new(),
        }
    }

    /// Add `quantity` of an item. Merges into an existing line, keeping the
    /// price captured at first insertion.
    pub fn add(&mut self, name: &str, unit_price: f64, quantity: u32) -> Result<()> {
        if quantity < 1 {
            return Err(GroceryError::InvalidQuantity {
                quantity: quantity as i64,
            });
        }
        match self.lines.get_mut(name) {
            Some(line) => line.quantity += quantity,
            None => {
                self.lines.insert(
                    name.to_string(),
                    CartLine {
                        unit_price,
                        quantity,
                    },
                );
            }
        }
        Ok(())
    }

    /// Delete a line. No-op (not an error) if absent.
    pub fn remove(&mut self, name: &str) {
        self.lines.remove(name);
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Sum of unit_price × quantity over all lines; 0.0 when empty.
    pub fn total(&self) -> f64 {
        self.lines
            .values()
            .map(|line| line.subtotal())
            .fold(0.0, |acc, subtotal| acc + subtotal)
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn total_quantity(&self) -> u32 {
        self.lines.values().map(|line| line.quantity).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.lines.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&CartLine> {
        self.lines.get(name)
    }

    /// Lines in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &CartLine)> {
        self.lines.iter().map(|(name, line)| (name.as_str(), line))
    }

    /// Explicitly re-capture a line's unit price after a catalog price
    /// change. A catalog edit never reaches the cart on its own.
    pub fn sync_price(&mut self, name: &str, new_price: f64) -> Result<()> {
        match self.lines.get_mut(name) {
            Some(line) => {
                line.unit_price = new_price;
                Ok(())
            }
            None => Err(GroceryError::UnknownItem {
                name: name.to_string(),
            }),
        }
    }

    /// Follow a catalog rename. No-op if the item is not in the cart.
    pub fn rename(&mut self, old_name: &str, new_name: &str) {
        if let Some(line) = self.lines.remove(old_name) {
            self.lines.insert(new_name.to_string(), line);
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
