//! Simulated trade execution.
//!
//! No transaction is ever built: an execution is a weighted coin flip
//! followed by a profit drawn around the estimate.

use super::trading_model::{ExecutionOutcome, FlashLoanOpportunity, Opportunity};
use crate::simulation::SharedRng;

/// Reasons reported for failed executions.
pub const FAILURE_REASONS: [&str; 4] = [
    "Slippage too high",
    "Insufficient liquidity",
    "Gas price spike",
    "MEV attack detected",
];

pub trait TradeExecutor: Send + Sync {
    fn execute_arbitrage(&self, opportunity: &Opportunity) -> ExecutionOutcome;

    fn execute_flash_loan(&self, opportunity: &FlashLoanOpportunity) -> ExecutionOutcome;
}

/// Success probabilities and realised-profit ranges (as multiples of the
/// estimated profit).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExecutionConfig {
    pub arbitrage_success_rate: f64,
    pub arbitrage_profit_range: (f64, f64),
    pub flash_loan_success_rate: f64,
    pub flash_loan_profit_range: (f64, f64),
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self {
            arbitrage_success_rate: 0.85,
            arbitrage_profit_range: (0.8, 1.2),
            flash_loan_success_rate: 0.75,
            flash_loan_profit_range: (0.7, 1.1),
        }
    }
}

#[derive(Clone)]
pub struct SimulatedExecutor {
    config: ExecutionConfig,
    rng: SharedRng,
}

impl SimulatedExecutor {
    pub fn new(rng: SharedRng) -> Self {
        Self::with_config(ExecutionConfig::default(), rng)
    }

    pub fn with_config(config: ExecutionConfig, rng: SharedRng) -> Self {
        Self { config, rng }
    }

    pub fn config(&self) -> &ExecutionConfig {
        &self.config
    }

    fn attempt(
        &self,
        estimated_profit: f64,
        success_rate: f64,
        range: (f64, f64),
    ) -> ExecutionOutcome {
        if self.rng.chance(success_rate) {
            ExecutionOutcome::Success {
                profit: estimated_profit * self.rng.uniform(range.0, range.1),
                tx_hash: self.rng.tx_hash(),
                gas_used: None,
            }
        } else {
            let error = self
                .rng
                .pick(&FAILURE_REASONS)
                .copied()
                .unwrap_or(FAILURE_REASONS[0]);
            ExecutionOutcome::Failure {
                error: error.to_string(),
            }
        }
    }
}

impl TradeExecutor for SimulatedExecutor {
    fn execute_arbitrage(&self, opportunity: &Opportunity) -> ExecutionOutcome {
        match self.attempt(
            opportunity.estimated_profit,
            self.config.arbitrage_success_rate,
            self.config.arbitrage_profit_range,
        ) {
            ExecutionOutcome::Success { profit, tx_hash, .. } => ExecutionOutcome::Success {
                profit,
                tx_hash,
                gas_used: Some(opportunity.gas_cost),
            },
            failure => failure,
        }
    }

    fn execute_flash_loan(&self, opportunity: &FlashLoanOpportunity) -> ExecutionOutcome {
        self.attempt(
            opportunity.estimated_profit,
            self.config.flash_loan_success_rate,
            self.config.flash_loan_profit_range,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trading::{Confidence, OpportunityStatus};
    use chrono::{Duration, Utc};

    fn opportunity(estimated_profit: f64) -> Opportunity {
        let now = Utc::now();
        Opportunity {
            id: "arb_eth_1".to_string(),
            token_pair: "ETH/USDC".to_string(),
            buy_exchange: "coingecko".to_string(),
            sell_exchange: "1inch".to_string(),
            buy_price: 2000.0,
            sell_price: 2030.0,
            profit_potential: 0.015,
            estimated_profit,
            confidence: Confidence::Medium,
            gas_cost: 0.0007,
            expires_at: now + Duration::minutes(5),
            status: OpportunityStatus::Detected,
            created_at: now,
            executed_at: None,
            actual_profit: None,
            tx_hash: None,
            error: None,
        }
    }

    fn always(success: bool) -> ExecutionConfig {
        let rate = if success { 1.0 } else { 0.0 };
        ExecutionConfig {
            arbitrage_success_rate: rate,
            flash_loan_success_rate: rate,
            ..ExecutionConfig::default()
        }
    }

    #[test]
    fn test_successful_profit_within_range() {
        let executor = SimulatedExecutor::with_config(always(true), SharedRng::seeded(5));
        for _ in 0..100 {
            match executor.execute_arbitrage(&opportunity(150.0)) {
                ExecutionOutcome::Success {
                    profit,
                    tx_hash,
                    gas_used,
                } => {
                    assert!((120.0..180.0).contains(&profit));
                    assert_eq!(tx_hash.len(), 66);
                    assert_eq!(gas_used, Some(0.0007));
                }
                other => panic!("expected success, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_failure_uses_known_reason() {
        let executor = SimulatedExecutor::with_config(always(false), SharedRng::seeded(5));
        match executor.execute_arbitrage(&opportunity(150.0)) {
            ExecutionOutcome::Failure { error } => {
                assert!(FAILURE_REASONS.contains(&error.as_str()))
            }
            other => panic!("expected failure, got {:?}", other),
        }
    }

    #[test]
    fn test_flash_loan_profit_range() {
        let executor = SimulatedExecutor::with_config(always(true), SharedRng::seeded(8));
        let flash = FlashLoanOpportunity {
            id: "flash_1".to_string(),
            token_pair: "ETH/USDC".to_string(),
            combined_profit: 0.09,
            estimated_profit: 4500.0,
            loan_amount: 50_000.0,
            opportunities: vec!["a".to_string(), "b".to_string()],
            confidence: Confidence::High,
            created_at: Utc::now(),
        };
        for _ in 0..100 {
            match executor.execute_flash_loan(&flash) {
                ExecutionOutcome::Success { profit, .. } => {
                    assert!((3150.0..4950.0).contains(&profit))
                }
                other => panic!("expected success, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_default_rates() {
        let config = ExecutionConfig::default();
        assert_eq!(config.arbitrage_success_rate, 0.85);
        assert_eq!(config.flash_loan_success_rate, 0.75);
    }
}
