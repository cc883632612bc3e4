// 📈 Purchase History - Append-only log of completed carts
// A Purchase is an immutable snapshot taken at "complete purchase"; the
// source cart is cleared in the same call. Statistics are recomputed in
// full from the log on every read, so there is no incremental state to
// drift out of sync.

use crate::cart::Cart;
use crate::category::{CategoryTag, Classifier};
use crate::error::{GroceryError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ============================================================================
// PURCHASE
// ============================================================================

/// One line of a completed purchase, copied out of the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseLine {
    pub name: String,
    pub unit_price: f64,
    pub quantity: u32,
}

impl PurchaseLine {
    pub fn subtotal(&self) -> f64 {
        self.unit_price * self.quantity as f64
    }
}

/// Immutable record of a finalized cart. Never mutated after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Purchase {
    pub completed_at: DateTime<Utc>,
    pub lines: Vec<PurchaseLine>,
    pub total: f64,
}

impl Purchase {
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn contains(&self, item_name: &str) -> bool {
        self.lines.iter().any(|line| line.name == item_name)
    }
}

// ============================================================================
// ITEM FREQUENCY
// ============================================================================

/// How often an item shows up across purchases. `times_purchased` counts one
/// occurrence per Purchase containing the item, not per cart-add action.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemFrequency {
    pub times_purchased: u32,
    pub total_quantity: u32,
}

impl ItemFrequency {
    pub fn average_quantity(&self) -> f64 {
        if self.times_purchased == 0 {
            0.0
        } else {
            self.total_quantity as f64 / self.times_purchased as f64
        }
    }
}

// ============================================================================
// PURCHASE HISTORY
// ============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PurchaseHistory {
    purchases: Vec<Purchase>,
}

impl PurchaseHistory {
    pub fn new() -> Self {
        PurchaseHistory {
            purchases: Vec::new(),
        }
    }

    /// Snapshot the cart into a new Purchase and clear it. Rejects an empty
    /// cart before touching any state, so the operation is atomic from the
    /// caller's perspective.
    pub fn record(&mut self, cart: &mut Cart) -> Result<&Purchase> {
        self.record_at(cart, Utc::now())
    }

    /// Clock-injected variant of `record()`.
    pub fn record_at(&mut self, cart: &mut Cart, now: DateTime<Utc>) -> Result<&Purchase> {
        if cart.is_empty() {
            return Err(GroceryError::EmptyCart);
        }

        let lines: Vec<PurchaseLine> = cart
            .iter()
            .map(|(name, line)| PurchaseLine {
                name: name.to_string(),
                unit_price: line.unit_price,
                quantity: line.quantity,
            })
            .collect();

        let purchase = Purchase {
            completed_at: now,
            total: cart.total(),
            lines,
        };

        self.purchases.push(purchase);
        cart.clear();

        tracing::debug!(
            purchases = self.purchases.len(),
            "purchase recorded"
        );

        Ok(self.purchases.last().expect("pushed above"))
    }

    pub fn len(&self) -> usize {
        self.purchases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.purchases.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Purchase> {
        self.purchases.iter()
    }

    /// Newest-first slice of the most recent purchases.
    pub fn recent(&self, count: usize) -> Vec<&Purchase> {
        self.purchases.iter().rev().take(count).collect()
    }

    /// Wipe the log (the app's "clear history" action).
    pub fn clear(&mut self) {
        self.purchases.clear();
    }

    pub fn total_spent(&self) -> f64 {
        self.purchases.iter().map(|p| p.total).sum()
    }

    /// Mean purchase total; 0.0 on an empty history.
    pub fn average_purchase(&self) -> f64 {
        if self.purchases.is_empty() {
            0.0
        } else {
            self.total_spent() / self.purchases.len() as f64
        }
    }

    /// Spend per category over the whole history, classifying each line with
    /// the caller's current classifier. Recomputed in full on each call.
    pub fn category_totals(&self, classifier: &Classifier) -> BTreeMap<CategoryTag, f64> {
        let mut totals: BTreeMap<CategoryTag, f64> = BTreeMap::new();
        for purchase in &self.purchases {
            for line in &purchase.lines {
                *totals.entry(classifier.classify(&line.name)).or_insert(0.0) +=
                    line.subtotal();
            }
        }
        totals
    }

    /// Occurrence count and summed quantity per item, in name order.
    pub fn item_frequency(&self) -> BTreeMap<String, ItemFrequency> {
        let mut frequency: BTreeMap<String, ItemFrequency> = BTreeMap::new();
        for purchase in &self.purchases {
            for line in &purchase.lines {
                let entry = frequency.entry(line.name.clone()).or_default();
                entry.times_purchased += 1;
                entry.total_quantity += line.quantity;
            }
        }
        frequency
    }
}

// ============================================================================
// TESTS
// ============================================================================
