// 🧺 Grocery Session - One user's complete state
// Catalog + Cart + PurchaseHistory + Classifier, owned by a single
// explicitly-constructed value. Nothing here is process-global: a host
// serving several users creates one GrocerySession per user and never
// shares it.

use crate::cart::Cart;
use crate::catalog::Catalog;
use crate::category::{CategoryTag, Classifier};
use crate::error::{GroceryError, Result};
use crate::history::{Purchase, PurchaseHistory};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrocerySession {
    pub catalog: Catalog,
    pub cart: Cart,
    pub history: PurchaseHistory,
    pub classifier: Classifier,
}

impl GrocerySession {
    /// Empty session: no catalog items, standard keyword table.
    pub fn new() -> Self {
        GrocerySession {
            catalog: Catalog::new(),
            cart: Cart::new(),
            history: PurchaseHistory::new(),
            classifier: Classifier::new(),
        }
    }

    /// Session pre-loaded with the stock grocery catalog.
    pub fn with_default_catalog() -> Self {
        GrocerySession {
            catalog: Catalog::with_defaults(),
            ..Self::new()
        }
    }

    /// Add a catalog item to the cart at its current catalog price.
    pub fn add_to_cart(&mut self, name: &str, quantity: u32) -> Result<()> {
        let price = self
            .catalog
            .get(name)
            .ok_or_else(|| GroceryError::UnknownItem {
                name: name.to_string(),
            })?;
        self.cart.add(name, price, quantity)
    }

    /// Add every item of a category to the cart at the given quantity
    /// (the app's "add all X items" button). Returns how many lines were
    /// touched.
    pub fn add_category_to_cart(&mut self, category: CategoryTag, quantity: u32) -> Result<usize> {
        if quantity < 1 {
            return Err(GroceryError::InvalidQuantity {
                quantity: quantity as i64,
            });
        }
        let names: Vec<String> = self
            .catalog
            .items_in(category, &self.classifier)
            .into_iter()
            .map(|name| name.to_string())
            .collect();
        for name in &names {
            self.add_to_cart(name, quantity)?;
        }
        Ok(names.len())
    }

    /// Finalize the cart into the history and clear it.
    pub fn complete_purchase(&mut self) -> Result<&Purchase> {
        self.history.record(&mut self.cart)
    }

    /// Remove an item everywhere: catalog, cart, and category override.
    pub fn remove_item(&mut self, name: &str) {
        self.catalog.remove(name);
        self.cart.remove(name);
        self.classifier.clear_category(name);
    }

    /// Rename an item and carry the cart line and category override along.
    /// Purchase history keeps the old name; snapshots are immutable.
    pub fn rename_item(&mut self, old_name: &str, new_name: &str) -> Result<()> {
        self.catalog.rename(old_name, new_name)?;
        self.cart.rename(old_name, new_name);
        self.classifier.rename(old_name, new_name);
        Ok(())
    }

    /// Update a catalog price and re-sync the cart line if the item is
    /// currently in the cart, so the editor's view stays consistent.
    pub fn update_price(&mut self, name: &str, new_price: f64) -> Result<()> {
        self.catalog.set_price(name, new_price)?;
        if self.cart.contains(name) {
            self.cart.sync_price(name, new_price)?;
        }
        Ok(())
    }

    /// Move every item of one category to another via overrides.
    pub fn move_category(&mut self, from: CategoryTag, to: CategoryTag) -> usize {
        let names: Vec<String> = self
            .catalog
            .items_in(from, &self.classifier)
            .into_iter()
            .map(|name| name.to_string())
            .collect();
        self.classifier
            .move_all(names.iter().map(|n| n.as_str()), to);
        names.len()
    }
}

impl Default for GrocerySession {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_add_to_cart_uses_catalog_price() {
        let mut session = GrocerySession::with_default_catalog();

        session.add_to_cart("Basmati Rice (5kg)", 2).unwrap();
        session.add_to_cart("Fresh Milk (1L)", 1).unwrap();

        assert!((session.cart.total() - 56.00).abs() < EPS);

        let err = session.add_to_cart("Durian (1pc)", 1).unwrap_err();
        assert!(matches!(err, GroceryError::UnknownItem { .. }));
    }

    #[test]
    fn test_complete_purchase_round_trip() {
        let mut session = GrocerySession::with_default_catalog();
        session.add_to_cart("Basmati Rice (5kg)", 2).unwrap();
        session.add_to_cart("Fresh Milk (1L)", 1).unwrap();

        let total = session.complete_purchase().unwrap().total;
        assert!((total - 56.00).abs() < EPS);
        assert!(session.cart.is_empty());
        assert_eq!(session.history.len(), 1);

        // Empty cart now: completing again is rejected, history unchanged.
        let err = session.complete_purchase().unwrap_err();
        assert_eq!(err, GroceryError::EmptyCart);
        assert_eq!(session.history.len(), 1);
    }

    #[test]
    fn test_add_category_to_cart() {
        let mut session = GrocerySession::with_default_catalog();

        let added = session
            .add_category_to_cart(CategoryTag::Dairy, 1)
            .unwrap();
        assert_eq!(added, 5);
        assert_eq!(session.cart.line_count(), 5);

        // Repeat merges quantities rather than duplicating lines.
        session.add_category_to_cart(CategoryTag::Dairy, 2).unwrap();
        assert_eq!(session.cart.line_count(), 5);
        assert_eq!(session.cart.get("Fresh Milk (1L)").unwrap().quantity, 3);

        let err = session.add_category_to_cart(CategoryTag::Dairy, 0).unwrap_err();
        assert!(matches!(err, GroceryError::InvalidQuantity { .. }));
    }

    #[test]
    fn test_remove_item_everywhere() {
        let mut session = GrocerySession::with_default_catalog();
        session.add_to_cart("Tofu (500g)", 2).unwrap();
        session
            .classifier
            .set_category("Tofu (500g)", CategoryTag::Other);

        session.remove_item("Tofu (500g)");

        assert!(!session.catalog.contains("Tofu (500g)"));
        assert!(!session.cart.contains("Tofu (500g)"));
        assert_eq!(session.classifier.override_for("Tofu (500g)"), None);
    }

    #[test]
    fn test_rename_item_carries_state() {
        let mut session = GrocerySession::with_default_catalog();
        session.add_to_cart("Bread (White)", 2).unwrap();
        session
            .classifier
            .set_category("Bread (White)", CategoryTag::Pantry);

        session.rename_item("Bread (White)", "White Bread (400g)").unwrap();

        assert_eq!(session.catalog.get("White Bread (400g)"), Some(2.50));
        assert_eq!(session.cart.get("White Bread (400g)").unwrap().quantity, 2);
        assert_eq!(
            session.classifier.override_for("White Bread (400g)"),
            Some(CategoryTag::Pantry)
        );
    }

    #[test]
    fn test_rename_does_not_rewrite_history() {
        let mut session = GrocerySession::with_default_catalog();
        session.add_to_cart("Bread (White)", 1).unwrap();
        session.complete_purchase().unwrap();

        session.rename_item("Bread (White)", "White Bread (400g)").unwrap();

        let purchase = session.history.iter().next().unwrap();
        assert!(purchase.contains("Bread (White)"));
        assert!(!purchase.contains("White Bread (400g)"));
    }

    #[test]
    fn test_update_price_resyncs_cart() {
        let mut session = GrocerySession::with_default_catalog();
        session.add_to_cart("Sugar (1kg)", 2).unwrap();

        session.update_price("Sugar (1kg)", 2.90).unwrap();

        assert_eq!(session.catalog.get("Sugar (1kg)"), Some(2.90));
        assert!((session.cart.get("Sugar (1kg)").unwrap().unit_price - 2.90).abs() < EPS);
    }

    #[test]
    fn test_move_category() {
        let mut session = GrocerySession::with_default_catalog();

        let moved = session.move_category(CategoryTag::Beverages, CategoryTag::Pantry);
        assert_eq!(moved, 4);

        assert!(session
            .catalog
            .items_in(CategoryTag::Beverages, &session.classifier)
            .is_empty());
        assert_eq!(
            session.classifier.classify("Coffee (200g)"),
            CategoryTag::Pantry
        );
    }
}
