use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// USD price of a single token.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub struct TokenPrice {
    /// Provider token id (e.g. "ethereum")
    pub token_id: String,

    /// Spot price in USD
    pub usd: Decimal,

    /// Percentage change over the last 24 hours
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usd_24h_change: Option<f64>,

    /// Market capitalisation in USD
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usd_market_cap: Option<Decimal>,

    /// Source of the price (COINGECKO, FALLBACK, ...)
    pub source: String,

    /// When the price was observed
    pub timestamp: DateTime<Utc>,
}

impl TokenPrice {
    /// Create a price with only the required fields.
    pub fn new(token_id: impl Into<String>, usd: Decimal, source: impl Into<String>) -> Self {
        Self {
            token_id: token_id.into(),
            usd,
            usd_24h_change: None,
            usd_market_cap: None,
            source: source.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn with_change(mut self, change: Option<f64>) -> Self {
        self.usd_24h_change = change;
        self
    }

    pub fn with_market_cap(mut self, market_cap: Option<Decimal>) -> Self {
        self.usd_market_cap = market_cap;
        self
    }
}
