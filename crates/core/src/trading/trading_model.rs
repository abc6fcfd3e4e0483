//! Trading domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OpportunityStatus {
    Detected,
    Executed,
    Failed,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    High,
    Medium,
}

/// Price gap between two venues for the same pair.
///
/// `profit_potential` is the spread as a fraction (0.012 = 1.2 %).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Opportunity {
    pub id: String,
    pub token_pair: String,
    pub buy_exchange: String,
    pub sell_exchange: String,
    pub buy_price: f64,
    pub sell_price: f64,
    pub profit_potential: f64,
    pub estimated_profit: f64,
    pub confidence: Confidence,
    /// Estimated gas cost in ETH
    pub gas_cost: f64,
    pub expires_at: DateTime<Utc>,
    pub status: OpportunityStatus,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub executed_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_profit: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tx_hash: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Opportunity {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// Detected, unexpired and above `min_spread`.
    pub fn is_executable(&self, now: DateTime<Utc>, min_spread: f64) -> bool {
        self.status == OpportunityStatus::Detected
            && !self.is_expired(now)
            && self.profit_potential > min_spread
    }
}

/// Two same-pair opportunities combined under a simulated flash loan.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FlashLoanOpportunity {
    pub id: String,
    pub token_pair: String,
    pub combined_profit: f64,
    pub estimated_profit: f64,
    pub loan_amount: f64,
    /// Ids of the two underlying opportunities
    pub opportunities: Vec<String>,
    pub confidence: Confidence,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TradeKind {
    Arbitrage,
    FlashLoan,
}

/// A successfully "executed" trade.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TradeRecord {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: TradeKind,
    pub token_pair: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buy_exchange: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sell_exchange: Option<String>,
    pub actual_profit: f64,
    pub tx_hash: String,
    pub executed_at: DateTime<Utc>,
}

impl TradeRecord {
    pub fn from_arbitrage(
        opportunity: &Opportunity,
        profit: f64,
        tx_hash: String,
        executed_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: opportunity.id.clone(),
            kind: TradeKind::Arbitrage,
            token_pair: opportunity.token_pair.clone(),
            buy_exchange: Some(opportunity.buy_exchange.clone()),
            sell_exchange: Some(opportunity.sell_exchange.clone()),
            actual_profit: profit,
            tx_hash,
            executed_at,
        }
    }

    pub fn from_flash_loan(
        opportunity: &FlashLoanOpportunity,
        profit: f64,
        tx_hash: String,
        executed_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: opportunity.id.clone(),
            kind: TradeKind::FlashLoan,
            token_pair: opportunity.token_pair.clone(),
            buy_exchange: None,
            sell_exchange: None,
            actual_profit: profit,
            tx_hash,
            executed_at,
        }
    }

    pub fn is_profitable(&self) -> bool {
        self.actual_profit > 0.0
    }
}

/// Result of a simulated execution.
#[derive(Debug, Clone, PartialEq)]
pub enum ExecutionOutcome {
    Success {
        profit: f64,
        tx_hash: String,
        /// Gas spent in ETH, when the executor reports it
        gas_used: Option<f64>,
    },
    Failure {
        error: String,
    },
}
