// 💱 Currency Converter - Cached MYR exchange rates
// Fetches a rate table from exchangerate-api.com, caches it for 30 minutes,
// and degrades to "no rates available" on any failure. A fetch failure must
// never surface as a hard error: every price display falls back to MYR-only.

use crate::error::{GroceryError, Result};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Free-tier endpoint, base currency MYR.
pub const RATES_ENDPOINT: &str = "https://api.exchangerate-api.com/v4/latest/MYR";

pub const BASE_CURRENCY: &str = "MYR";

/// Sidebar ordering for currency pickers.
pub const POPULAR_CURRENCIES: [&str; 10] = [
    "USD", "EUR", "GBP", "SGD", "THB", "IDR", "JPY", "CNY", "AUD", "INR",
];

// ============================================================================
// RATE TABLE
// ============================================================================

/// Snapshot of conversion multipliers relative to MYR.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExchangeRateTable {
    pub base: String,
    pub rates: HashMap<String, f64>,
    pub fetched_at: DateTime<Utc>,
}

impl ExchangeRateTable {
    pub fn new(rates: HashMap<String, f64>, fetched_at: DateTime<Utc>) -> Self {
        ExchangeRateTable {
            base: BASE_CURRENCY.to_string(),
            rates,
            fetched_at,
        }
    }

    pub fn rate(&self, currency_code: &str) -> Option<f64> {
        self.rates.get(currency_code).copied()
    }

    pub fn age(&self, now: DateTime<Utc>) -> Duration {
        now - self.fetched_at
    }
}

/// MYR amount × target rate. None when the code is absent from the table.
pub fn convert(amount_myr: f64, target_code: &str, table: &ExchangeRateTable) -> Option<f64> {
    table.rate(target_code).map(|rate| amount_myr * rate)
}

// ============================================================================
// FORMATTING
// ============================================================================

fn currency_symbol(currency_code: &str) -> Option<&'static str> {
    match currency_code {
        "USD" => Some("$"),
        "EUR" => Some("€"),
        "GBP" => Some("£"),
        "SGD" => Some("S$"),
        "THB" => Some("฿"),
        "IDR" => Some("Rp"),
        "JPY" => Some("¥"),
        "CNY" => Some("¥"),
        "AUD" => Some("A$"),
        "CAD" => Some("C$"),
        "INR" => Some("₹"),
        _ => None,
    }
}

/// Human name for the popular currencies, for display tables.
pub fn currency_name(currency_code: &str) -> Option<&'static str> {
    match currency_code {
        "USD" => Some("US Dollar"),
        "EUR" => Some("Euro"),
        "GBP" => Some("British Pound"),
        "SGD" => Some("Singapore Dollar"),
        "THB" => Some("Thai Baht"),
        "IDR" => Some("Indonesian Rupiah"),
        "JPY" => Some("Japanese Yen"),
        "CNY" => Some("Chinese Yuan"),
        "AUD" => Some("Australian Dollar"),
        "INR" => Some("Indian Rupee"),
        _ => None,
    }
}

/// Symbol plus decimal-places rule: JPY and IDR render without minor units,
/// everything else with two decimals. Unknown codes print "CODE amount".
pub fn format_amount(amount: f64, currency_code: &str) -> String {
    let symbol = match currency_symbol(currency_code) {
        Some(symbol) => symbol.to_string(),
        None => format!("{} ", currency_code),
    };

    if currency_code == "JPY" || currency_code == "IDR" {
        format!("{}{:.0}", symbol, amount)
    } else {
        format!("{}{:.2}", symbol, amount)
    }
}

// ============================================================================
// RATE SOURCE
// ============================================================================

/// Network seam. Production uses `HttpRateSource`; tests inject stubs.
pub trait RateSource {
    fn fetch(&self) -> Result<HashMap<String, f64>>;
}

#[derive(Debug, Deserialize)]
struct RatesResponse {
    rates: HashMap<String, f64>,
}

/// Blocking GET against the exchangerate-api endpoint, 5-second timeout.
/// Any transport error, non-200 status, or parse failure becomes
/// `RateFetchFailure`.
pub struct HttpRateSource {
    url: String,
    timeout: std::time::Duration,
}

impl HttpRateSource {
    pub fn new() -> Self {
        HttpRateSource {
            url: RATES_ENDPOINT.to_string(),
            timeout: std::time::Duration::from_secs(5),
        }
    }

    pub fn with_url(url: &str) -> Self {
        HttpRateSource {
            url: url.to_string(),
            timeout: std::time::Duration::from_secs(5),
        }
    }
}

impl Default for HttpRateSource {
    fn default() -> Self {
        Self::new()
    }
}

impl RateSource for HttpRateSource {
    fn fetch(&self) -> Result<HashMap<String, f64>> {
        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| GroceryError::RateFetchFailure(e.to_string()))?;

        let response = client
            .get(&self.url)
            .send()
            .map_err(|e| GroceryError::RateFetchFailure(e.to_string()))?;

        if !response.status().is_success() {
            return Err(GroceryError::RateFetchFailure(format!(
                "unexpected status {}",
                response.status()
            )));
        }

        let body = response
            .text()
            .map_err(|e| GroceryError::RateFetchFailure(e.to_string()))?;
        let parsed: RatesResponse = serde_json::from_str(&body)
            .map_err(|e| GroceryError::RateFetchFailure(e.to_string()))?;

        Ok(parsed.rates)
    }
}

// ============================================================================
// CONVERTER
// ============================================================================

/// Caching wrapper over a `RateSource`.
///
/// Cache policy:
/// - a table younger than the refresh TTL (30 min) is served as-is
/// - past the TTL a refetch is attempted; success replaces the table
/// - a failed refetch keeps serving the previous table until it is older
///   than TTL + retry window (another 30 min), after which `rates()`
///   reports unavailable
pub struct CurrencyConverter<S: RateSource> {
    source: S,
    cached: Option<ExchangeRateTable>,
    refresh_ttl: Duration,
    retry_window: Duration,
}

impl CurrencyConverter<HttpRateSource> {
    pub fn new() -> Self {
        Self::with_source(HttpRateSource::new())
    }
}

impl Default for CurrencyConverter<HttpRateSource> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: RateSource> CurrencyConverter<S> {
    pub fn with_source(source: S) -> Self {
        CurrencyConverter {
            source,
            cached: None,
            refresh_ttl: Duration::minutes(30),
            retry_window: Duration::minutes(30),
        }
    }

    /// Current rate table, refetching if expired. None means "no rates
    /// available" and callers show MYR-only prices.
    pub fn rates(&mut self) -> Option<&ExchangeRateTable> {
        self.rates_at(Utc::now())
    }

    /// Clock-injected variant of `rates()`.
    pub fn rates_at(&mut self, now: DateTime<Utc>) -> Option<&ExchangeRateTable> {
        let fresh = self
            .cached
            .as_ref()
            .map(|table| table.age(now) < self.refresh_ttl)
            .unwrap_or(false);

        if !fresh {
            self.refetch(now);
        }
        self.cached.as_ref()
    }

    /// Manual refresh, ignoring the TTL. Returns whether the fetch
    /// succeeded; on failure the stale-serving policy applies as usual.
    pub fn force_refresh(&mut self) -> bool {
        self.force_refresh_at(Utc::now())
    }

    pub fn force_refresh_at(&mut self, now: DateTime<Utc>) -> bool {
        matches!(self.try_fetch(now), FetchOutcome::Replaced)
    }

    /// Convert through the current table; None if rates are unavailable or
    /// the code is unknown.
    pub fn convert_now(&mut self, amount_myr: f64, target_code: &str) -> Option<f64> {
        let table = self.rates()?;
        convert(amount_myr, target_code, table)
    }

    fn refetch(&mut self, now: DateTime<Utc>) {
        if let FetchOutcome::Failed = self.try_fetch(now) {
            let within_retry_window = self
                .cached
                .as_ref()
                .map(|table| table.age(now) < self.refresh_ttl + self.retry_window)
                .unwrap_or(false);
            if !within_retry_window {
                self.cached = None;
            }
        }
    }

    fn try_fetch(&mut self, now: DateTime<Utc>) -> FetchOutcome {
        match self.source.fetch() {
            Ok(rates) => {
                tracing::debug!(currencies = rates.len(), "exchange rates refreshed");
                self.cached = Some(ExchangeRateTable::new(rates, now));
                FetchOutcome::Replaced
            }
            Err(err) => {
                tracing::warn!(error = %err, "exchange rate fetch failed");
                FetchOutcome::Failed
            }
        }
    }
}

enum FetchOutcome {
    Replaced,
    Failed,
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    /// Scriptable rate source: pops the next canned outcome per fetch.
    struct StubSource {
        outcomes: RefCell<Vec<Result<HashMap<String, f64>>>>,
    }

    impl StubSource {
        fn new(mut outcomes: Vec<Result<HashMap<String, f64>>>) -> Self {
            outcomes.reverse();
            StubSource {
                outcomes: RefCell::new(outcomes),
            }
        }
    }

    impl RateSource for StubSource {
        fn fetch(&self) -> Result<HashMap<String, f64>> {
            self.outcomes
                .borrow_mut()
                .pop()
                .unwrap_or_else(|| Err(GroceryError::RateFetchFailure("exhausted".into())))
        }
    }

    fn rates_usd(rate: f64) -> HashMap<String, f64> {
        let mut rates = HashMap::new();
        rates.insert("USD".to_string(), rate);
        rates
    }

    #[test]
    fn test_convert() {
        let table = ExchangeRateTable::new(rates_usd(0.21), Utc::now());

        let converted = convert(10.00, "USD", &table).unwrap();
        assert!((converted - 2.10).abs() < 1e-9);

        assert_eq!(convert(10.00, "XYZ", &table), None);
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(2.10, "USD"), "$2.10");
        assert_eq!(format_amount(1234.5, "EUR"), "€1234.50");
        assert_eq!(format_amount(33333.4, "JPY"), "¥33333");
        assert_eq!(format_amount(35000.6, "IDR"), "Rp35001");
        assert_eq!(format_amount(9.876, "XYZ"), "XYZ 9.88");
    }

    #[test]
    fn test_currency_tables() {
        assert_eq!(currency_name("SGD"), Some("Singapore Dollar"));
        assert_eq!(currency_name("XYZ"), None);
        assert_eq!(POPULAR_CURRENCIES.len(), 10);
    }

    #[test]
    fn test_fresh_table_is_served_without_refetch() {
        let source = StubSource::new(vec![Ok(rates_usd(0.21))]);
        let mut converter = CurrencyConverter::with_source(source);

        let t0 = Utc::now();
        assert!(converter.rates_at(t0).is_some());

        // 10 minutes later: still fresh, no second fetch (the stub would
        // fail if asked again).
        let t1 = t0 + Duration::minutes(10);
        let table = converter.rates_at(t1).unwrap();
        assert_eq!(table.rate("USD"), Some(0.21));
    }

    #[test]
    fn test_expired_table_refetches() {
        let source = StubSource::new(vec![Ok(rates_usd(0.21)), Ok(rates_usd(0.22))]);
        let mut converter = CurrencyConverter::with_source(source);

        let t0 = Utc::now();
        converter.rates_at(t0);

        let t1 = t0 + Duration::minutes(31);
        let table = converter.rates_at(t1).unwrap();
        assert_eq!(table.rate("USD"), Some(0.22));
        assert_eq!(table.fetched_at, t1);
    }

    #[test]
    fn test_failed_refetch_serves_stale_within_retry_window() {
        let source = StubSource::new(vec![
            Ok(rates_usd(0.21)),
            Err(GroceryError::RateFetchFailure("timeout".into())),
        ]);
        let mut converter = CurrencyConverter::with_source(source);

        let t0 = Utc::now();
        converter.rates_at(t0);

        // TTL expired, refetch fails: previous table still served.
        let t1 = t0 + Duration::minutes(40);
        let table = converter.rates_at(t1).unwrap();
        assert_eq!(table.rate("USD"), Some(0.21));
    }

    #[test]
    fn test_failed_refetch_past_retry_window_is_unavailable() {
        let source = StubSource::new(vec![
            Ok(rates_usd(0.21)),
            Err(GroceryError::RateFetchFailure("timeout".into())),
        ]);
        let mut converter = CurrencyConverter::with_source(source);

        let t0 = Utc::now();
        converter.rates_at(t0);

        // Past TTL + retry window: stale table is dropped, not served.
        let t1 = t0 + Duration::minutes(61);
        assert!(converter.rates_at(t1).is_none());
    }

    #[test]
    fn test_initial_fetch_failure_is_unavailable_not_error() {
        let source = StubSource::new(vec![Err(GroceryError::RateFetchFailure(
            "no network".into(),
        ))]);
        let mut converter = CurrencyConverter::with_source(source);

        assert!(converter.rates().is_none());
        assert_eq!(converter.convert_now(10.0, "USD"), None);
    }

    #[test]
    fn test_recovery_after_outage() {
        let source = StubSource::new(vec![
            Err(GroceryError::RateFetchFailure("down".into())),
            Ok(rates_usd(0.21)),
        ]);
        let mut converter = CurrencyConverter::with_source(source);

        let t0 = Utc::now();
        assert!(converter.rates_at(t0).is_none());

        // Next read retries (no cached table to be fresh) and succeeds.
        let t1 = t0 + Duration::minutes(1);
        assert!(converter.rates_at(t1).is_some());
    }

    #[test]
    fn test_force_refresh() {
        let source = StubSource::new(vec![Ok(rates_usd(0.21)), Ok(rates_usd(0.25))]);
        let mut converter = CurrencyConverter::with_source(source);

        let t0 = Utc::now();
        converter.rates_at(t0);

        // Manual refresh ignores freshness.
        assert!(converter.force_refresh_at(t0 + Duration::minutes(1)));
        let table = converter.rates_at(t0 + Duration::minutes(2)).unwrap();
        assert_eq!(table.rate("USD"), Some(0.25));
    }
}
