// ⚠️ Error Taxonomy - Local, recoverable failures
// Every variant is something the caller can recover from in-place;
// nothing here should terminate an interactive session.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GroceryError {
    /// Cart add with a non-positive quantity
    #[error("invalid quantity {quantity}: must be at least 1")]
    InvalidQuantity { quantity: i64 },

    /// Catalog insert/update with a negative price
    #[error("invalid price {price:.2}: must be non-negative")]
    InvalidPrice { price: f64 },

    /// Completing a purchase with nothing in the cart
    #[error("cannot complete purchase: cart is empty")]
    EmptyCart,

    /// Item name not present in the catalog
    #[error("unknown item: {name}")]
    UnknownItem { name: String },

    /// Catalog insert/rename colliding with an existing name
    #[error("item already exists: {name}")]
    DuplicateItem { name: String },

    /// Network or parse failure fetching the exchange-rate table.
    /// Swallowed inside the converter; callers see "no rates available".
    #[error("exchange rate fetch failed: {0}")]
    RateFetchFailure(String),
}

pub type Result<T> = std::result::Result<T, GroceryError>;
