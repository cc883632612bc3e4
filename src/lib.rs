// Grocery Ledger - Core Library
// Cart/catalog/purchase-history data model for a grocery price tracker,
// with keyword category classification, cached currency conversion, and
// text/HTML shopping-list export.

pub mod error;
pub mod category;
pub mod catalog;
pub mod cart;
pub mod currency;
pub mod history;
pub mod export;
pub mod session;

// Re-export commonly used types
pub use error::{GroceryError, Result};
pub use category::{CategoryTag, Classifier, KeywordRule, KeywordTable};
pub use catalog::{Catalog, CategorySummary};
pub use cart::{Cart, CartLine};
pub use currency::{
    convert, currency_name, format_amount, CurrencyConverter, ExchangeRateTable,
    HttpRateSource, RateSource, BASE_CURRENCY, POPULAR_CURRENCIES, RATES_ENDPOINT,
};
pub use history::{ItemFrequency, Purchase, PurchaseHistory, PurchaseLine};
pub use export::{render_html, render_text, suggested_filename, ExportFormat};
pub use session::GrocerySession;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
