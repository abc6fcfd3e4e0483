use std::sync::Arc;

use chrono::{Duration, Utc};
use log::{debug, error, info, warn};
use num_traits::ToPrimitive;

use super::task_registry::TaskRegistry;
use super::worker_model::{TaskDetails, TaskReport, TaskStats, WorkerHealth, WorkerTask};
use crate::constants::{
    FLASH_LOAN_MIN_EXECUTION_SPREAD, MAX_EXECUTIONS_PER_PASS, MIN_EXECUTION_SPREAD,
    OPPORTUNITY_RETENTION_MINUTES, RECENT_PROFIT_WINDOW,
};
use crate::errors::Result;
use crate::events::{TradingEvent, TradingEventSink};
use crate::gas::{gas_cost_eth, GasMonitor};
use crate::mev::check_mev_protection;
use crate::portfolio::PortfolioService;
use crate::prices::PriceService;
use crate::simulation::SharedRng;
use crate::trading::{
    evaluate_route, find_flash_loan_opportunities, ArbitrageRoute, ExecutionOutcome, TradeExecutor,
    TradeRecord, TradingState, DEFAULT_ROUTES,
};

/// Everything the worker needs, wired by the caller.
pub struct WorkerDeps {
    pub worker_id: String,
    pub prices: Arc<PriceService>,
    pub state: Arc<TradingState>,
    pub gas: Arc<GasMonitor>,
    pub portfolio: Arc<PortfolioService>,
    pub executor: Arc<dyn TradeExecutor>,
    pub events: Arc<dyn TradingEventSink>,
    pub rng: SharedRng,
}

/// Runs the periodic trading tasks against the shared state.
pub struct Worker {
    worker_id: String,
    prices: Arc<PriceService>,
    state: Arc<TradingState>,
    gas: Arc<GasMonitor>,
    portfolio: Arc<PortfolioService>,
    executor: Arc<dyn TradeExecutor>,
    events: Arc<dyn TradingEventSink>,
    rng: SharedRng,
    routes: Vec<ArbitrageRoute>,
    registry: TaskRegistry,
}

impl Worker {
    pub fn new(deps: WorkerDeps) -> Self {
        Self {
            worker_id: deps.worker_id,
            prices: deps.prices,
            state: deps.state,
            gas: deps.gas,
            portfolio: deps.portfolio,
            executor: deps.executor,
            events: deps.events,
            rng: deps.rng,
            routes: DEFAULT_ROUTES.to_vec(),
            registry: TaskRegistry::new(),
        }
    }

    pub fn with_routes(mut self, routes: Vec<ArbitrageRoute>) -> Self {
        self.routes = routes;
        self
    }

    pub fn worker_id(&self) -> &str {
        &self.worker_id
    }

    pub fn state(&self) -> &Arc<TradingState> {
        &self.state
    }

    pub fn task_stats(&self) -> Vec<TaskStats> {
        self.registry.all()
    }

    pub fn task_stats_for(&self, task: WorkerTask) -> TaskStats {
        self.registry.get(task)
    }

    /// Run one task, record its outcome and publish it.
    pub async fn run(&self, task: WorkerTask) -> TaskReport {
        debug!("Running worker task {}", task);
        let result = match task {
            WorkerTask::ScanArbitrageOpportunities => self.scan_arbitrage_opportunities().await,
            WorkerTask::ExecuteProfitableTrades => self.execute_profitable_trades().await,
            WorkerTask::ScanFlashLoanOpportunities => self.scan_flash_loan_opportunities().await,
            WorkerTask::UpdatePortfolioData => self.update_portfolio_data().await,
            WorkerTask::MonitorGasPrices => self.monitor_gas_prices().await,
            WorkerTask::CheckMevProtection => self.check_mev_protection().await,
        };

        let report = match result {
            Ok(details) => TaskReport::success(task, details),
            Err(e) => {
                error!("Worker task {} failed: {}", task, e);
                TaskReport::failure(task, e.to_string())
            }
        };
        self.registry.record(&report);
        self.events.emit(TradingEvent::task_completed(report.clone()));
        report
    }

    pub async fn scan_arbitrage_opportunities(&self) -> Result<TaskDetails> {
        let now = Utc::now();
        let gas_cost = gas_cost_eth(self.state.gas_prices().as_ref());

        let mut found = Vec::new();
        for route in &self.routes {
            let Some(price) = self.prices.price_or_fallback(route.token_id).await else {
                warn!("No reference price for {}, skipping route", route.pair);
                continue;
            };
            let Some(reference) = price.usd.to_f64().filter(|p| *p > 0.0) else {
                warn!("Unusable reference price for {}, skipping route", route.pair);
                continue;
            };
            let counter = route.draw_counter_price(reference, &self.rng);
            if let Some(opportunity) = evaluate_route(route, reference, counter, gas_cost, now) {
                info!(
                    "Arbitrage opportunity {}: {:.2}% spread, est. ${:.2}",
                    opportunity.token_pair,
                    opportunity.profit_potential * 100.0,
                    opportunity.estimated_profit
                );
                found.push(opportunity);
            }
        }

        let opportunities_found = found.len();
        self.events.emit_batch(
            found
                .iter()
                .cloned()
                .map(TradingEvent::opportunity_detected)
                .collect(),
        );
        self.state.add_opportunities(found);
        self.state
            .prune_opportunities(now - Duration::minutes(OPPORTUNITY_RETENTION_MINUTES));

        let total_active = self.state.opportunity_count();
        info!(
            "Arbitrage scan complete: {} new, {} active",
            opportunities_found, total_active
        );
        Ok(TaskDetails::ArbitrageScan {
            opportunities_found,
            total_active,
        })
    }

    pub async fn execute_profitable_trades(&self) -> Result<TaskDetails> {
        if self.state.opportunity_count() == 0 {
            debug!("No trading opportunities available");
            return Ok(TaskDetails::NothingToDo {
                message: "No opportunities to execute".to_string(),
            });
        }

        let now = Utc::now();
        let candidates = self.state.executable_opportunities(
            now,
            MIN_EXECUTION_SPREAD,
            MAX_EXECUTIONS_PER_PASS,
        );

        let mut trades_executed = 0;
        for opportunity in candidates {
            match self.executor.execute_arbitrage(&opportunity) {
                ExecutionOutcome::Success {
                    profit, tx_hash, ..
                } => {
                    let trade =
                        TradeRecord::from_arbitrage(&opportunity, profit, tx_hash, Utc::now());
                    if self.state.mark_executed(&opportunity.id, trade.clone()) {
                        trades_executed += 1;
                        info!("Executed {} for ${:.2} profit", trade.token_pair, profit);
                        self.events.emit(TradingEvent::trade_executed(trade));
                    }
                }
                ExecutionOutcome::Failure { error } => {
                    warn!("Execution of {} failed: {}", opportunity.token_pair, error);
                    self.state.mark_failed(&opportunity.id, &error);
                }
            }
        }

        let total_profit: f64 = self
            .state
            .recent_trades(RECENT_PROFIT_WINDOW)
            .iter()
            .map(|t| t.actual_profit)
            .sum();
        info!("Trade execution complete: {} executed", trades_executed);
        Ok(TaskDetails::TradeExecution {
            trades_executed,
            total_profit,
        })
    }

    pub async fn scan_flash_loan_opportunities(&self) -> Result<TaskDetails> {
        let now = Utc::now();
        let flash_loans = find_flash_loan_opportunities(&self.state.opportunities(), now);

        let mut executed_flash_loans = 0;
        for flash in &flash_loans {
            if flash.combined_profit <= FLASH_LOAN_MIN_EXECUTION_SPREAD {
                continue;
            }
            if !self.state.claim_flash_legs(&flash.opportunities) {
                debug!("Flash loan legs {:?} already executed", flash.opportunities);
                continue;
            }
            match self.executor.execute_flash_loan(flash) {
                ExecutionOutcome::Success {
                    profit, tx_hash, ..
                } => {
                    let trade = TradeRecord::from_flash_loan(flash, profit, tx_hash, Utc::now());
                    self.state.record_trade(trade.clone());
                    executed_flash_loans += 1;
                    info!("Flash loan on {} executed: ${:.2} profit", flash.token_pair, profit);
                    self.events.emit(TradingEvent::flash_loan_executed(trade));
                }
                ExecutionOutcome::Failure { error } => {
                    warn!("Flash loan on {} failed: {}", flash.token_pair, error);
                    self.state.record_failed_execution();
                }
            }
        }

        let flash_opportunities = flash_loans.len();
        self.state.set_flash_loans(flash_loans);
        info!(
            "Flash loan scan complete: {} found, {} executed",
            flash_opportunities, executed_flash_loans
        );
        Ok(TaskDetails::FlashLoanScan {
            flash_opportunities,
            executed_flash_loans,
        })
    }

    pub async fn update_portfolio_data(&self) -> Result<TaskDetails> {
        let snapshot = self.portfolio.refresh().await;
        info!(
            "Portfolio updated: ${:.2} total value, ${:.2} profit",
            snapshot.total_value, snapshot.total_profit
        );
        Ok(TaskDetails::PortfolioUpdate {
            portfolio_value: snapshot.total_value,
            total_profit: snapshot.total_profit,
        })
    }

    pub async fn monitor_gas_prices(&self) -> Result<TaskDetails> {
        let gas_prices = self.gas.current().await;
        info!(
            "Gas prices updated: {:.1} gwei standard ({:?})",
            gas_prices.standard, gas_prices.source
        );
        self.state.set_gas_prices(gas_prices.clone());
        Ok(TaskDetails::GasUpdate { gas_prices })
    }

    pub async fn check_mev_protection(&self) -> Result<TaskDetails> {
        let report = check_mev_protection(&self.rng);
        if report.threats_detected > 0 {
            info!(
                "MEV threats detected: {}, protected trades: {}",
                report.threats_detected, report.protected_trades
            );
        }
        self.state.set_mev_report(report.clone());
        Ok(TaskDetails::MevCheck {
            mev_threats_detected: report.threats_detected,
            protected_trades: report.protected_trades,
            protection_active: report.protection_active,
        })
    }

    pub fn health(&self) -> WorkerHealth {
        WorkerHealth {
            status: "healthy".to_string(),
            worker_id: self.worker_id.clone(),
            active_opportunities: self.state.opportunity_count(),
            executed_trades: self.state.trade_count(),
            total_profit: self.state.total_profit(),
            timestamp: Utc::now(),
        }
    }
}
