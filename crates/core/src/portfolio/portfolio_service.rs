use std::sync::Arc;

use chrono::{Duration, Utc};
use log::{debug, warn};
use num_traits::ToPrimitive;

use super::portfolio_model::{
    AllocationEntry, Holding, PerformanceSummary, PortfolioOverview, PortfolioSnapshot,
};
use crate::constants::{DEFAULT_SUCCESS_RATE, PORTFOLIO_BASE_VALUE_USD};
use crate::prices::PriceService;
use crate::tokens::symbol_for;
use crate::trading::TradingState;

/// Positions held by the simulated portfolio: (token id, amount).
pub const SIMULATED_HOLDINGS: [(&str, f64); 3] =
    [("ethereum", 2.5), ("bitcoin", 0.1), ("solana", 15.0)];

/// Percentage of attempts that were profitable. With no attempts the
/// default rate is reported.
pub fn success_rate(profitable: usize, attempts: usize) -> f64 {
    if attempts == 0 {
        return DEFAULT_SUCCESS_RATE;
    }
    profitable as f64 / attempts as f64 * 100.0
}

pub struct PortfolioService {
    prices: Arc<PriceService>,
    state: Arc<TradingState>,
}

impl PortfolioService {
    pub fn new(prices: Arc<PriceService>, state: Arc<TradingState>) -> Self {
        Self { prices, state }
    }

    /// Revalue holdings, recompute performance and store the snapshot.
    pub async fn refresh(&self) -> PortfolioSnapshot {
        let now = Utc::now();
        let holdings = self.value_holdings().await;

        let trades = self.state.trades();
        let failed = self.state.failed_executions();
        let profitable = trades.iter().filter(|t| t.is_profitable()).count();
        let total_profit = self.state.total_profit();
        let daily_profit = self.state.profit_since(now, Duration::hours(24));

        let snapshot = PortfolioSnapshot {
            total_value: PORTFOLIO_BASE_VALUE_USD + total_profit,
            total_profit,
            daily_profit,
            holdings,
            performance: PerformanceSummary {
                success_rate: success_rate(profitable, trades.len() + failed),
                total_trades: trades.len(),
                profitable_trades: profitable,
                failed_trades: failed,
            },
            updated_at: now,
        };
        debug!(
            "Portfolio refreshed: value ${:.2}, profit ${:.2}",
            snapshot.total_value, snapshot.total_profit
        );
        self.state.set_portfolio(snapshot.clone());
        snapshot
    }

    /// Latest stored snapshot, computing one if none exists yet.
    pub async fn snapshot(&self) -> PortfolioSnapshot {
        match self.state.portfolio() {
            Some(snapshot) => snapshot,
            None => self.refresh().await,
        }
    }

    pub async fn overview(&self) -> PortfolioOverview {
        let snapshot = self.snapshot().await;
        let holdings_value = snapshot.holdings_value();

        let allocation = snapshot
            .holdings
            .iter()
            .map(|h| AllocationEntry {
                symbol: h.symbol.clone(),
                value: h.value,
                percentage: if holdings_value > 0.0 {
                    h.value / holdings_value * 100.0
                } else {
                    0.0
                },
            })
            .collect();

        let change_24h = if holdings_value > 0.0 {
            snapshot
                .holdings
                .iter()
                .map(|h| h.value * h.change_24h.unwrap_or(0.0))
                .sum::<f64>()
                / holdings_value
        } else {
            0.0
        };

        PortfolioOverview {
            total_value: snapshot.total_value,
            holdings_value,
            total_profit: snapshot.total_profit,
            daily_profit: snapshot.daily_profit,
            change_24h,
            allocation,
            active_opportunities: self.state.opportunity_count(),
            performance: snapshot.performance,
            timestamp: Utc::now(),
        }
    }

    async fn value_holdings(&self) -> Vec<Holding> {
        let mut holdings = Vec::with_capacity(SIMULATED_HOLDINGS.len());
        for (token_id, amount) in SIMULATED_HOLDINGS {
            let Some(price) = self.prices.price_or_fallback(token_id).await else {
                warn!("No price available for {}, leaving it out", token_id);
                continue;
            };
            let usd = price.usd.to_f64().unwrap_or(0.0);
            holdings.push(Holding {
                token_id: token_id.to_string(),
                symbol: symbol_for(token_id),
                amount,
                price: usd,
                value: usd * amount,
                change_24h: price.usd_24h_change,
                price_source: price.source,
            });
        }
        holdings
    }
}
