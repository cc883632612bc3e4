// 🏷️ Category Classifier - Rules as Data
// Keyword-substring classification with manual overrides
//
// Order matters: an item name can contain keywords from several
// categories ("Rice Water (1L)" matches both RiceGrains and Beverages),
// so the rule table is walked in a fixed priority order and the first
// match wins. Explicit overrides always beat keyword inference.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ============================================================================
// CATEGORY TAG
// ============================================================================

/// The fixed set of grocery classification labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CategoryTag {
    RiceGrains,
    Proteins,
    Dairy,
    Vegetables,
    Fruits,
    Pantry,
    Beverages,
    Household,
    /// Fallback when no keyword matches and no override exists
    Other,
}

impl CategoryTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryTag::RiceGrains => "Rice & Grains",
            CategoryTag::Proteins => "Proteins",
            CategoryTag::Dairy => "Dairy",
            CategoryTag::Vegetables => "Vegetables",
            CategoryTag::Fruits => "Fruits",
            CategoryTag::Pantry => "Pantry",
            CategoryTag::Beverages => "Beverages",
            CategoryTag::Household => "Household",
            CategoryTag::Other => "Other",
        }
    }

    /// All tags in classification priority order (Other last, never matched
    /// by keyword).
    pub fn all() -> [CategoryTag; 9] {
        [
            CategoryTag::RiceGrains,
            CategoryTag::Proteins,
            CategoryTag::Dairy,
            CategoryTag::Vegetables,
            CategoryTag::Fruits,
            CategoryTag::Pantry,
            CategoryTag::Beverages,
            CategoryTag::Household,
            CategoryTag::Other,
        ]
    }
}

impl std::fmt::Display for CategoryTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// KEYWORD TABLE
// ============================================================================

/// One ordered classification rule: the first rule with a matching keyword
/// decides the category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordRule {
    pub tag: CategoryTag,
    pub keywords: Vec<String>,
}

impl KeywordRule {
    /// Case-insensitive substring match against any keyword.
    pub fn matches(&self, name_lower: &str) -> bool {
        self.keywords.iter().any(|kw| name_lower.contains(kw.as_str()))
    }
}

/// Ordered rule table. Data, not code: deployments can add or move keywords
/// without touching the classifier (opinions differ on where "flour"
/// belongs, for instance).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordTable {
    rules: Vec<KeywordRule>,
}

impl KeywordTable {
    /// Empty table: everything classifies as Other until rules are added.
    pub fn empty() -> Self {
        KeywordTable { rules: Vec::new() }
    }

    pub fn from_rules(rules: Vec<KeywordRule>) -> Self {
        KeywordTable { rules }
    }

    /// Default keyword sets. "flour" sits with the grains by default.
    pub fn standard() -> Self {
        fn rule(tag: CategoryTag, keywords: &[&str]) -> KeywordRule {
            KeywordRule {
                tag,
                keywords: keywords.iter().map(|s| s.to_string()).collect(),
            }
        }

        KeywordTable {
            rules: vec![
                rule(CategoryTag::RiceGrains, &["rice", "bread", "oats", "flour"]),
                rule(
                    CategoryTag::Proteins,
                    &["chicken", "beef", "fish", "eggs", "tofu"],
                ),
                rule(CategoryTag::Dairy, &["milk", "yogurt", "cheese", "butter"]),
                rule(
                    CategoryTag::Vegetables,
                    &[
                        "potatoes", "onions", "carrots", "cabbage", "tomatoes",
                        "cucumber", "spinach", "broccoli",
                    ],
                ),
                rule(
                    CategoryTag::Fruits,
                    &["banana", "apple", "orange", "watermelon", "papaya", "mango"],
                ),
                rule(
                    CategoryTag::Pantry,
                    &["oil", "sauce", "salt", "sugar", "garlic", "ginger"],
                ),
                rule(CategoryTag::Beverages, &["coffee", "tea", "juice", "water"]),
                rule(
                    CategoryTag::Household,
                    &["dish", "detergent", "toilet", "shampoo"],
                ),
            ],
        }
    }

    /// First matching rule's tag, else Other. Total: never fails.
    pub fn classify(&self, item_name: &str) -> CategoryTag {
        let name_lower = item_name.to_lowercase();
        for rule in &self.rules {
            if rule.matches(&name_lower) {
                return rule.tag;
            }
        }
        CategoryTag::Other
    }

    /// Append a keyword to a category's list, creating the rule (at lowest
    /// priority) if the category has none yet.
    pub fn add_keyword(&mut self, tag: CategoryTag, keyword: &str) {
        let keyword = keyword.to_lowercase();
        match self.rules.iter_mut().find(|r| r.tag == tag) {
            Some(rule) => {
                if !rule.keywords.contains(&keyword) {
                    rule.keywords.push(keyword);
                }
            }
            None => self.rules.push(KeywordRule {
                tag,
                keywords: vec![keyword],
            }),
        }
    }

    /// Remove a keyword from a category's list. No-op if absent.
    pub fn remove_keyword(&mut self, tag: CategoryTag, keyword: &str) {
        let keyword = keyword.to_lowercase();
        if let Some(rule) = self.rules.iter_mut().find(|r| r.tag == tag) {
            rule.keywords.retain(|kw| *kw != keyword);
        }
    }

    pub fn keywords_for(&self, tag: CategoryTag) -> &[String] {
        self.rules
            .iter()
            .find(|r| r.tag == tag)
            .map(|r| r.keywords.as_slice())
            .unwrap_or(&[])
    }

    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }
}

impl Default for KeywordTable {
    fn default() -> Self {
        Self::standard()
    }
}

// ============================================================================
// CLASSIFIER
// ============================================================================

/// Keyword table plus a sparse override map. Overrides win unconditionally;
/// clearing one reverts the item to keyword inference.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Classifier {
    table: KeywordTable,
    overrides: HashMap<String, CategoryTag>,
}

impl Classifier {
    pub fn new() -> Self {
        Classifier {
            table: KeywordTable::standard(),
            overrides: HashMap::new(),
        }
    }

    pub fn with_table(table: KeywordTable) -> Self {
        Classifier {
            table,
            overrides: HashMap::new(),
        }
    }

    /// Resolve an item name to exactly one tag. Total function.
    pub fn classify(&self, item_name: &str) -> CategoryTag {
        if let Some(tag) = self.overrides.get(item_name) {
            return *tag;
        }
        self.table.classify(item_name)
    }

    /// Pin an item to a category, bypassing keyword inference.
    pub fn set_category(&mut self, item_name: &str, tag: CategoryTag) {
        self.overrides.insert(item_name.to_string(), tag);
    }

    /// Drop an override, reverting to keyword inference. No-op if absent.
    pub fn clear_category(&mut self, item_name: &str) {
        self.overrides.remove(item_name);
    }

    pub fn override_for(&self, item_name: &str) -> Option<CategoryTag> {
        self.overrides.get(item_name).copied()
    }

    pub fn override_count(&self) -> usize {
        self.overrides.len()
    }

    /// Rename follow-up: carry an override across an item rename.
    pub fn rename(&mut self, old_name: &str, new_name: &str) {
        if let Some(tag) = self.overrides.remove(old_name) {
            self.overrides.insert(new_name.to_string(), tag);
        }
    }

    /// Bulk move: pin every name in `items` to `to`. Used for
    /// "move all items from category A to B".
    pub fn move_all<'a, I>(&mut self, items: I, to: CategoryTag)
    where
        I: IntoIterator<Item = &'a str>,
    {
        for name in items {
            self.set_category(name, to);
        }
    }

    pub fn table(&self) -> &KeywordTable {
        &self.table
    }

    pub fn table_mut(&mut self) -> &mut KeywordTable {
        &mut self.table
    }
}

impl Default for Classifier {
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

    #[test]
    fn test_keyword_classification() {
        let classifier = Classifier::new();

        assert_eq!(classifier.classify("Basmati Rice (5kg)"), CategoryTag::RiceGrains);
        assert_eq!(classifier.classify("Fresh Milk (1L)"), CategoryTag::Dairy);
        assert_eq!(classifier.classify("Chicken Breast (1kg)"), CategoryTag::Proteins);
        assert_eq!(classifier.classify("Tomatoes (1kg)"), CategoryTag::Vegetables);
        assert_eq!(classifier.classify("Mangoes (1kg)"), CategoryTag::Fruits);
        assert_eq!(classifier.classify("Soy Sauce (500ml)"), CategoryTag::Pantry);
        assert_eq!(classifier.classify("Coffee (200g)"), CategoryTag::Beverages);
        assert_eq!(classifier.classify("Shampoo (400ml)"), CategoryTag::Household);
    }

    #[test]
    fn test_classification_is_total() {
        let classifier = Classifier::new();

        assert_eq!(classifier.classify("Mystery Box"), CategoryTag::Other);
        assert_eq!(classifier.classify(""), CategoryTag::Other);
        assert_eq!(classifier.classify("🛒"), CategoryTag::Other);
    }

    #[test]
    fn test_priority_order() {
        let classifier = Classifier::new();

        // Contains both "rice" (RiceGrains) and "water" (Beverages):
        // priority order resolves to RiceGrains.
        assert_eq!(classifier.classify("Rice Water (1L)"), CategoryTag::RiceGrains);

        // "Mineral Water" only matches Beverages.
        assert_eq!(
            classifier.classify("Mineral Water (1.5L)"),
            CategoryTag::Beverages
        );
    }

    #[test]
    fn test_override_beats_keywords() {
        let mut classifier = Classifier::new();

        assert_eq!(classifier.classify("Coconut Oil (1L)"), CategoryTag::Pantry);

        classifier.set_category("Coconut Oil (1L)", CategoryTag::Household);
        assert_eq!(classifier.classify("Coconut Oil (1L)"), CategoryTag::Household);

        classifier.clear_category("Coconut Oil (1L)");
        assert_eq!(classifier.classify("Coconut Oil (1L)"), CategoryTag::Pantry);
    }

    #[test]
    fn test_clear_absent_override_is_noop() {
        let mut classifier = Classifier::new();
        classifier.clear_category("never set");
        assert_eq!(classifier.override_count(), 0);
    }

    #[test]
    fn test_flour_is_configurable() {
        // Default: flour lives with the grains.
        let mut table = KeywordTable::standard();
        assert_eq!(table.classify("Flour (1kg)"), CategoryTag::RiceGrains);

        // A deployment that wants flour in Pantry just edits the table.
        table.remove_keyword(CategoryTag::RiceGrains, "flour");
        table.add_keyword(CategoryTag::Pantry, "flour");
        assert_eq!(table.classify("Flour (1kg)"), CategoryTag::Pantry);
    }

    #[test]
    fn test_empty_table_classifies_everything_as_other() {
        let classifier = Classifier::with_table(KeywordTable::empty());
        assert_eq!(classifier.classify("Basmati Rice (5kg)"), CategoryTag::Other);
    }

    #[test]
    fn test_move_all() {
        let mut classifier = Classifier::new();
        classifier.move_all(
            ["Coffee (200g)", "Tea Bags (25pcs)"],
            CategoryTag::Pantry,
        );

        assert_eq!(classifier.classify("Coffee (200g)"), CategoryTag::Pantry);
        assert_eq!(classifier.classify("Tea Bags (25pcs)"), CategoryTag::Pantry);
        // Unpinned beverages are untouched.
        assert_eq!(classifier.classify("Fruit Juice (1L)"), CategoryTag::Beverages);
    }

    #[test]
    fn test_tag_display_names() {
        assert_eq!(CategoryTag::RiceGrains.as_str(), "Rice & Grains");
        assert_eq!(CategoryTag::Other.as_str(), "Other");
        assert_eq!(CategoryTag::all().len(), 9);
    }
}
