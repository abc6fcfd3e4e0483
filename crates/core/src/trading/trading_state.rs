//! Shared in-memory trading state.
//!
//! One instance is shared (via `Arc`) by the worker tasks and the HTTP
//! handlers. Nothing is persisted.

use std::collections::{HashSet, VecDeque};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Duration, Utc};
use lootos_market_data::GasPrices;
use log::warn;

use super::trading_model::{FlashLoanOpportunity, Opportunity, OpportunityStatus, TradeRecord};
use crate::constants::MAX_TRADE_HISTORY;
use crate::mev::MevReport;
use crate::portfolio::PortfolioSnapshot;

#[derive(Default)]
struct Inner {
    opportunities: Vec<Opportunity>,
    flash_loans: Vec<FlashLoanOpportunity>,
    /// Oldest first
    trades: VecDeque<TradeRecord>,
    failed_executions: usize,
    executed_flash_legs: HashSet<(String, String)>,
    gas_prices: Option<GasPrices>,
    portfolio: Option<PortfolioSnapshot>,
    mev_report: Option<MevReport>,
}

pub struct TradingState {
    inner: RwLock<Inner>,
    max_trades: usize,
}

impl TradingState {
    pub fn new() -> Self {
        Self::with_trade_capacity(MAX_TRADE_HISTORY)
    }

    pub fn with_trade_capacity(max_trades: usize) -> Self {
        Self {
            inner: RwLock::new(Inner::default()),
            max_trades: max_trades.max(1),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, Inner> {
        self.inner.read().unwrap_or_else(|poisoned| {
            warn!("Trading state lock was poisoned, recovering");
            poisoned.into_inner()
        })
    }

    fn write(&self) -> RwLockWriteGuard<'_, Inner> {
        self.inner.write().unwrap_or_else(|poisoned| {
            warn!("Trading state lock was poisoned, recovering");
            poisoned.into_inner()
        })
    }

    // ── Opportunities ───────────────────────────────────────────────────

    pub fn add_opportunities(&self, opportunities: impl IntoIterator<Item = Opportunity>) {
        self.write().opportunities.extend(opportunities);
    }

    /// Drop opportunities created before `cutoff`. Returns how many were removed.
    pub fn prune_opportunities(&self, cutoff: DateTime<Utc>) -> usize {
        let mut inner = self.write();
        let before = inner.opportunities.len();
        inner.opportunities.retain(|o| o.created_at > cutoff);
        before - inner.opportunities.len()
    }

    pub fn opportunities(&self) -> Vec<Opportunity> {
        self.read().opportunities.clone()
    }

    pub fn opportunity_count(&self) -> usize {
        self.read().opportunities.len()
    }

    /// Up to `limit` executable opportunities, widest spread first.
    pub fn executable_opportunities(
        &self,
        now: DateTime<Utc>,
        min_spread: f64,
        limit: usize,
    ) -> Vec<Opportunity> {
        let mut candidates: Vec<Opportunity> = self
            .read()
            .opportunities
            .iter()
            .filter(|o| o.is_executable(now, min_spread))
            .cloned()
            .collect();
        candidates.sort_by(|a, b| b.profit_potential.total_cmp(&a.profit_potential));
        candidates.truncate(limit);
        candidates
    }

    /// Mark a detected opportunity executed and append the trade to
    /// history. Returns false if the opportunity is gone or already settled
    /// by another pass.
    pub fn mark_executed(&self, id: &str, trade: TradeRecord) -> bool {
        let mut inner = self.write();
        let Some(opportunity) = find_detected(&mut inner.opportunities, id) else {
            return false;
        };
        opportunity.status = OpportunityStatus::Executed;
        opportunity.executed_at = Some(trade.executed_at);
        opportunity.actual_profit = Some(trade.actual_profit);
        opportunity.tx_hash = Some(trade.tx_hash.clone());
        push_trade(&mut inner, trade, self.max_trades);
        true
    }

    /// Same settlement rule as [`TradingState::mark_executed`].
    pub fn mark_failed(&self, id: &str, error: &str) -> bool {
        let mut inner = self.write();
        let Some(opportunity) = find_detected(&mut inner.opportunities, id) else {
            return false;
        };
        opportunity.status = OpportunityStatus::Failed;
        opportunity.error = Some(error.to_string());
        inner.failed_executions += 1;
        true
    }

    // ── Flash loans ─────────────────────────────────────────────────────

    pub fn set_flash_loans(&self, flash_loans: Vec<FlashLoanOpportunity>) {
        self.write().flash_loans = flash_loans;
    }

    pub fn flash_loans(&self) -> Vec<FlashLoanOpportunity> {
        self.read().flash_loans.clone()
    }

    /// Claim a leg pair for execution. Returns false if it was already claimed.
    pub fn claim_flash_legs(&self, legs: &[String]) -> bool {
        let key = match legs {
            [a, b] if a <= b => (a.clone(), b.clone()),
            [a, b] => (b.clone(), a.clone()),
            _ => return false,
        };
        self.write().executed_flash_legs.insert(key)
    }

    pub fn record_trade(&self, trade: TradeRecord) {
        let mut inner = self.write();
        push_trade(&mut inner, trade, self.max_trades);
    }

    pub fn record_failed_execution(&self) {
        self.write().failed_executions += 1;
    }

    // ── Trade history ───────────────────────────────────────────────────

    /// Newest first.
    pub fn recent_trades(&self, limit: usize) -> Vec<TradeRecord> {
        self.read().trades.iter().rev().take(limit).cloned().collect()
    }

    pub fn trades(&self) -> Vec<TradeRecord> {
        self.read().trades.iter().cloned().collect()
    }

    pub fn trade_count(&self) -> usize {
        self.read().trades.len()
    }

    pub fn failed_executions(&self) -> usize {
        self.read().failed_executions
    }

    pub fn total_profit(&self) -> f64 {
        self.read().trades.iter().map(|t| t.actual_profit).sum()
    }

    /// Profit of trades executed after `now - window`.
    pub fn profit_since(&self, now: DateTime<Utc>, window: Duration) -> f64 {
        let cutoff = now - window;
        self.read()
            .trades
            .iter()
            .filter(|t| t.executed_at > cutoff)
            .map(|t| t.actual_profit)
            .sum()
    }

    // ── Monitors ────────────────────────────────────────────────────────

    pub fn set_gas_prices(&self, gas: GasPrices) {
        self.write().gas_prices = Some(gas);
    }

    pub fn gas_prices(&self) -> Option<GasPrices> {
        self.read().gas_prices.clone()
    }

    pub fn set_portfolio(&self, snapshot: PortfolioSnapshot) {
        self.write().portfolio = Some(snapshot);
    }

    pub fn portfolio(&self) -> Option<PortfolioSnapshot> {
        self.read().portfolio.clone()
    }

    pub fn set_mev_report(&self, report: MevReport) {
        self.write().mev_report = Some(report);
    }

    pub fn mev_report(&self) -> Option<MevReport> {
        self.read().mev_report.clone()
    }
}

impl Default for TradingState {
    fn default() -> Self {
        Self::new()
    }
}

fn find_detected<'a>(
    opportunities: &'a mut [Opportunity],
    id: &str,
) -> Option<&'a mut Opportunity> {
    opportunities
        .iter_mut()
        .find(|o| o.id == id && o.status == OpportunityStatus::Detected)
}

fn push_trade(inner: &mut Inner, trade: TradeRecord, max_trades: usize) {
    inner.trades.push_back(trade);
    while inner.trades.len() > max_trades {
        inner.trades.pop_front();
    }
}
