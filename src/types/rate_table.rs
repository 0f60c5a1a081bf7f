use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::collections::HashMap;
use std::str::FromStr;
use tracing::warn;

/// Exchange rates relative to a base currency.
///
/// Each entry holds the units of that currency per one unit of the base currency, so converting
/// into the base currency is a division by the rate.
#[derive(Debug, Clone, Default)]
pub struct RateTable {
    rates: HashMap<String, Decimal>
}

impl RateTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, currency: impl Into<String>, rate: Decimal) {
        self.rates.insert(currency.into(), rate);
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    /// Returns the usable rate for a currency. A zero rate is treated as missing.
    pub fn rate(&self, currency: &str) -> Option<Decimal> {
        self.rates.get(currency).copied().filter(|rate| !rate.is_zero())
    }

    /// Converts an amount into the base currency.
    ///
    /// An empty currency, an unknown currency, or a zero rate leaves the amount unchanged. The
    /// division never panics: an overflowing quotient also falls back to the original amount.
    pub fn convert(&self, amount: Decimal, currency: &str) -> Decimal {
        if currency.is_empty() {
            return amount;
        }

        match self.rate(currency) {
            Some(rate) => amount.checked_div(rate).unwrap_or(amount),
            None => amount
        }
    }
}

impl FromIterator<(String, Decimal)> for RateTable {
    fn from_iter<I: IntoIterator<Item = (String, Decimal)>>(iter: I) -> Self {
        Self { rates: iter.into_iter().collect() }
    }
}

/// Reads a `{ CODE: number }` object one entry at a time.
///
/// Entries that are not numbers, or do not fit a decimal, or are negative are left out with a
/// warning, so one bad rate only makes its own currency unknown.
impl<'de> Deserialize<'de> for RateTable {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let entries = HashMap::<String, Value>::deserialize(deserializer)?;

        Ok(entries.into_iter()
            .filter_map(|(currency, value)| match decimal_rate(&value) {
                Some(rate) => Some((currency, rate)),
                None => {
                    warn!("Ignoring unusable exchange rate for [{currency}]: {value}");
                    None
                }
            })
            .collect())
    }
}

fn decimal_rate(value: &Value) -> Option<Decimal> {
    let Value::Number(number) = value else {
        return None;
    };

    let text = number.to_string();

    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .ok()
        .filter(|rate| !rate.is_sign_negative())
}
