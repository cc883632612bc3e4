// 🛒 Catalog - Master name→price list
// Unique item names, non-negative MYR prices, plus the search and
// per-category views the price-checker UI is built on.

use crate::category::{CategoryTag, Classifier};
use crate::error::{GroceryError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ============================================================================
// CATALOG
// ============================================================================

/// Master list of purchasable items. BTreeMap keeps iteration in name order,
/// which every listing in the app relies on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Catalog {
    items: BTreeMap<String, f64>,
}

impl Catalog {
    pub fn new() -> Self {
        Catalog {
            items: BTreeMap::new(),
        }
    }

    /// The stock Malaysian grocery catalog (prices in MYR).
    pub fn with_defaults() -> Self {
        let defaults: &[(&str, f64)] = &[
            // Rice & Grains
            ("Basmati Rice (5kg)", 25.90),
            ("Jasmine Rice (10kg)", 42.00),
            ("Brown Rice (2kg)", 18.50),
            ("Instant Oats (1kg)", 12.80),
            ("Bread (White)", 2.50),
            ("Wholemeal Bread", 3.20),
            // Proteins
            ("Chicken Breast (1kg)", 18.90),
            ("Chicken Thigh (1kg)", 12.50),
            ("Beef (1kg)", 32.00),
            ("Fish - Mackerel (1kg)", 15.00),
            ("Fish - Salmon (500g)", 28.00),
            ("Eggs (30pcs)", 12.50),
            ("Tofu (500g)", 3.50),
            // Dairy
            ("Fresh Milk (1L)", 4.20),
            ("UHT Milk (1L)", 3.80),
            ("Yogurt (500g)", 8.90),
            ("Cheese Slices (200g)", 7.50),
            ("Butter (250g)", 6.80),
            // Vegetables
            ("Potatoes (1kg)", 4.50),
            ("Onions (1kg)", 5.20),
            ("Carrots (1kg)", 6.80),
            ("Cabbage (1pc)", 3.50),
            ("Tomatoes (1kg)", 7.20),
            ("Cucumbers (1kg)", 4.80),
            ("Spinach (bunch)", 2.50),
            ("Broccoli (500g)", 5.90),
            // Fruits
            ("Bananas (1kg)", 4.20),
            ("Apples (1kg)", 8.90),
            ("Oranges (1kg)", 6.50),
            ("Watermelon (1pc)", 8.00),
            ("Papaya (1pc)", 5.50),
            ("Mangoes (1kg)", 12.00),
            // Pantry Staples
            ("Cooking Oil (2L)", 12.90),
            ("Soy Sauce (500ml)", 4.50),
            ("Salt (1kg)", 1.80),
            ("Sugar (1kg)", 2.60),
            ("Flour (1kg)", 3.20),
            ("Garlic (500g)", 8.00),
            ("Ginger (500g)", 6.50),
            // Beverages
            ("Coffee (200g)", 15.80),
            ("Tea Bags (25pcs)", 4.90),
            ("Fruit Juice (1L)", 5.50),
            ("Mineral Water (1.5L)", 1.20),
            // Household
            ("Dishwashing Liquid", 4.80),
            ("Laundry Detergent", 18.50),
            ("Toilet Paper (12 rolls)", 15.90),
            ("Shampoo (400ml)", 12.80),
        ];

        let mut catalog = Catalog::new();
        for (name, price) in defaults {
            catalog.items.insert(name.to_string(), *price);
        }
        catalog
    }

    /// Add a new item. Names are unique keys.
    pub fn insert(&mut self, name: &str, price: f64) -> Result<()> {
        if price < 0.0 {
            return Err(GroceryError::InvalidPrice { price });
        }
        if self.items.contains_key(name) {
            return Err(GroceryError::DuplicateItem {
                name: name.to_string(),
            });
        }
        self.items.insert(name.to_string(), price);
        Ok(())
    }

    /// Update the price of an existing item.
    pub fn set_price(&mut self, name: &str, price: f64) -> Result<()> {
        if price < 0.0 {
            return Err(GroceryError::InvalidPrice { price });
        }
        match self.items.get_mut(name) {
            Some(entry) => {
                *entry = price;
                Ok(())
            }
            None => Err(GroceryError::UnknownItem {
                name: name.to_string(),
            }),
        }
    }

    /// Remove an item, returning its price. None if absent (not an error).
    pub fn remove(&mut self, name: &str) -> Option<f64> {
        self.items.remove(name)
    }

    /// Rename an item in place, keeping its price.
    pub fn rename(&mut self, old_name: &str, new_name: &str) -> Result<()> {
        if self.items.contains_key(new_name) {
            return Err(GroceryError::DuplicateItem {
                name: new_name.to_string(),
            });
        }
        match self.items.remove(old_name) {
            Some(price) => {
                self.items.insert(new_name.to_string(), price);
                Ok(())
            }
            None => Err(GroceryError::UnknownItem {
                name: old_name.to_string(),
            }),
        }
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.items.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.items.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.items.iter().map(|(name, price)| (name.as_str(), *price))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.items.keys().map(|name| name.as_str())
    }

    /// Case-insensitive substring search over item names, in name order.
    pub fn search(&self, term: &str) -> Vec<&str> {
        let term_lower = term.to_lowercase();
        self.items
            .keys()
            .filter(|name| name.to_lowercase().contains(&term_lower))
            .map(|name| name.as_str())
            .collect()
    }

    /// All items classifying into `category`, in name order.
    pub fn items_in(&self, category: CategoryTag, classifier: &Classifier) -> Vec<&str> {
        self.items
            .keys()
            .filter(|name| classifier.classify(name) == category)
            .map(|name| name.as_str())
            .collect()
    }

    /// Item count / total catalog value / average price per category.
    pub fn category_overview(&self, classifier: &Classifier) -> BTreeMap<CategoryTag, CategorySummary> {
        let mut overview: BTreeMap<CategoryTag, CategorySummary> = BTreeMap::new();
        for (name, price) in &self.items {
            let summary = overview.entry(classifier.classify(name)).or_default();
            summary.item_count += 1;
            summary.total_value += price;
        }
        overview
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-category rollup of catalog contents.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategorySummary {
    pub item_count: usize,
    pub total_value: f64,
}

impl CategorySummary {
    pub fn average_price(&self) -> f64 {
        if self.item_count == 0 {
            0.0
        } else {
            self.total_value / self.item_count as f64
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
