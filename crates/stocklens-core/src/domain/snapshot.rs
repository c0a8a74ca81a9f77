use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Snapshot field names, in the provider's wire spellings.
///
/// The snapshot is deliberately loose: providers return whichever subset
/// they know, and readers substitute documented defaults for the rest.
pub mod fields {
    pub const CURRENT_PRICE: &str = "currentPrice";
    pub const MARKET_CAP: &str = "marketCap";
    pub const TRAILING_PE: &str = "trailingPE";
    pub const PRICE_TO_BOOK: &str = "priceToBook";
    pub const FORWARD_PE: &str = "forwardPE";
    pub const DIVIDEND_YIELD: &str = "dividendYield";
    pub const DIVIDEND_RATE: &str = "dividendRate";
    pub const PAYOUT_RATIO: &str = "payoutRatio";
    pub const FIFTY_TWO_WEEK_HIGH: &str = "fiftyTwoWeekHigh";
    pub const FIFTY_TWO_WEEK_LOW: &str = "fiftyTwoWeekLow";
    pub const FIFTY_TWO_WEEK_CHANGE: &str = "52WeekChange";
    pub const TRAILING_EPS: &str = "trailingEps";
    pub const FORWARD_EPS: &str = "forwardEps";
    pub const REVENUE_GROWTH: &str = "revenueGrowth";

    // Presentation-only reads.
    pub const LONG_NAME: &str = "longName";
    pub const CURRENCY: &str = "currency";
}

/// Point-in-time bundle of fundamental data fields for a security.
///
/// A loosely-typed mapping from provider field name to JSON value. Many
/// fields are optional and may be absent for any given ticker.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FundamentalsSnapshot {
    fields: BTreeMap<String, Value>,
}

impl FundamentalsSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a field, overwriting any previous value under the same name.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(name.into(), value.into());
    }

    /// Insert only when the field is not already present.
    pub fn insert_if_absent(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.fields.entry(name.into()).or_insert_with(|| value.into());
    }

    /// Builder-style insert for fixtures and tests.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn raw(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Read a field as a finite number. Accepts JSON numbers and numeric
    /// strings; anything else (including NaN/inf) reads as absent.
    pub fn number(&self, name: &str) -> Option<f64> {
        let value = match self.fields.get(name)? {
            Value::Number(number) => number.as_f64()?,
            Value::String(text) => text.trim().parse::<f64>().ok()?,
            _ => return None,
        };

        value.is_finite().then_some(value)
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        match self.fields.get(name)? {
            Value::String(text) => Some(text.as_str()),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
