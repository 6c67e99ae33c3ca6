//! Currency conversion
//!
//! Static exchange-rate table keyed by ISO currency code. Rates are expressed
//! as units of the currency per one US dollar, so converting *from* USD is a
//! multiplication and converting *to* USD is a division. Unknown codes fall
//! back to a 1:1 rate.

use std::collections::HashMap;
use std::sync::OnceLock;
use tracing::warn;

/// Built-in rates (units per 1 USD)
const DEFAULT_RATES: &[(&str, f64)] = &[
    ("USD", 1.0),
    ("EUR", 0.92),
    ("GBP", 0.79),
    ("JPY", 149.5),
    ("CAD", 1.36),
    ("AUD", 1.53),
    ("CHF", 0.88),
    ("CNY", 7.24),
    ("INR", 83.1),
    ("SGD", 1.34),
];

/// Display symbols; codes without one are rendered as a suffix
const SYMBOLS: &[(&str, &str)] = &[
    ("USD", "$"),
    ("EUR", "€"),
    ("GBP", "£"),
    ("JPY", "¥"),
    ("CNY", "¥"),
    ("INR", "₹"),
    ("CAD", "CA$"),
    ("AUD", "A$"),
    ("SGD", "S$"),
];

static SHARED_TABLE: OnceLock<RateTable> = OnceLock::new();

/// Exchange-rate table
#[derive(Debug, Clone, PartialEq)]
pub struct RateTable {
    rates: HashMap<String, f64>,
}

impl Default for RateTable {
    fn default() -> Self {
        Self {
            rates: DEFAULT_RATES
                .iter()
                .map(|(code, rate)| (code.to_string(), *rate))
                .collect(),
        }
    }
}

impl RateTable {
    /// The built-in table, initialized once per process
    pub fn shared() -> &'static RateTable {
        SHARED_TABLE.get_or_init(RateTable::default)
    }

    /// Layer configured rates over this table.
    ///
    /// Rates that are not finite or not positive are ignored with a warning.
    pub fn with_overrides(mut self, overrides: &HashMap<String, f64>) -> Self {
        for (code, rate) in overrides {
            if !rate.is_finite() || *rate <= 0.0 {
                warn!("Ignoring invalid rate {} for currency {}", rate, code);
                continue;
            }
            self.rates.insert(code.to_ascii_uppercase(), *rate);
        }
        self
    }

    /// Rate for a currency code (case-insensitive), 1.0 when unknown
    pub fn rate(&self, code: &str) -> f64 {
        self.rates
            .get(&code.trim().to_ascii_uppercase())
            .copied()
            .unwrap_or(1.0)
    }

    /// Whether the table has an explicit rate for this code
    pub fn is_known(&self, code: &str) -> bool {
        self.rates.contains_key(&code.trim().to_ascii_uppercase())
    }

    /// Convert an amount in `from_currency` to USD
    pub fn to_usd(&self, amount: f64, from_currency: &str) -> f64 {
        amount / self.rate(from_currency)
    }

    /// Convert a USD amount to `to_currency`
    pub fn from_usd(&self, amount_usd: f64, to_currency: &str) -> f64 {
        amount_usd * self.rate(to_currency)
    }

    /// Known currency codes, sorted
    pub fn codes(&self) -> Vec<&str> {
        let mut codes: Vec<&str> = self.rates.keys().map(String::as_str).collect();
        codes.sort_unstable();
        codes
    }
}

/// Convert `amount` of `from_currency` to USD using the built-in table
pub fn convert_to_usd(amount: f64, from_currency: &str) -> f64 {
    RateTable::shared().to_usd(amount, from_currency)
}

/// Convert `amount_usd` to `to_currency` using the built-in table
pub fn convert_currency(amount_usd: f64, to_currency: &str) -> f64 {
    RateTable::shared().from_usd(amount_usd, to_currency)
}

/// Display symbol for a currency code, if it has one
pub fn currency_symbol(code: &str) -> Option<&'static str> {
    let code = code.trim().to_ascii_uppercase();
    SYMBOLS
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, symbol)| *symbol)
}

/// Format an amount compactly in the given currency: `$5M`, `€1.5K`, `2.5B CHF`
pub fn format_compact(amount: f64, code: &str) -> String {
    let number = compact_number(amount);
    match currency_symbol(code) {
        Some(symbol) => format!("{}{}", symbol, number),
        None => format!("{} {}", number, code.trim().to_ascii_uppercase()),
    }
}

const UNITS: [(f64, &str); 3] = [(1e3, "K"), (1e6, "M"), (1e9, "B")];

fn compact_number(amount: f64) -> String {
    let whole = format!("{:.0}", amount);
    if !reaches_thousand(&whole) {
        return whole;
    }

    // Step up while the rounded value would still read 1000 or more
    let mut text = String::new();
    let mut suffix = "";
    for (scale, unit) in UNITS {
        text = format!("{:.1}", amount / scale);
        suffix = unit;
        if !reaches_thousand(&text) {
            break;
        }
    }

    if text.ends_with(".0") {
        text.truncate(text.len() - 2);
    }
    text.push_str(suffix);
    text
}

fn reaches_thousand(formatted: &str) -> bool {
    formatted
        .trim_start_matches('-')
        .parse::<f64>()
        .is_ok_and(|value| value >= 1e3)
}
