//! Portfolio models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A simulated position valued at the latest (or fallback) price.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Holding {
    pub token_id: String,
    pub symbol: String,
    pub amount: f64,
    /// USD price per unit
    pub price: f64,
    /// USD value of the position
    pub value: f64,
    /// 24h price change in percent, when the provider reports it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub change_24h: Option<f64>,
    pub price_source: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PerformanceSummary {
    /// Percentage (0-100) of execution attempts that produced a profit
    pub success_rate: f64,
    pub total_trades: usize,
    pub profitable_trades: usize,
    pub failed_trades: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PortfolioSnapshot {
    pub total_value: f64,
    pub total_profit: f64,
    pub daily_profit: f64,
    #[serde(rename = "assets")]
    pub holdings: Vec<Holding>,
    pub performance: PerformanceSummary,
    pub updated_at: DateTime<Utc>,
}

impl PortfolioSnapshot {
    pub fn holdings_value(&self) -> f64 {
        self.holdings.iter().map(|h| h.value).sum()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AllocationEntry {
    pub symbol: String,
    pub value: f64,
    /// Share of the holdings value (0-100)
    pub percentage: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PortfolioOverview {
    pub total_value: f64,
    pub holdings_value: f64,
    pub total_profit: f64,
    pub daily_profit: f64,
    /// Value-weighted 24h change of the holdings, in percent
    pub change_24h: f64,
    pub allocation: Vec<AllocationEntry>,
    pub active_opportunities: usize,
    pub performance: PerformanceSummary,
    pub timestamp: DateTime<Utc>,
}
