//! Simulated trading - opportunity models, shared state, scanning and
//! execution.

mod arbitrage;
mod executor;
mod flash_loans;
mod trading_model;
mod trading_state;

pub use arbitrage::{evaluate_route, spread, ArbitrageRoute, DEFAULT_ROUTES};
pub use executor::{ExecutionConfig, SimulatedExecutor, TradeExecutor, FAILURE_REASONS};
pub use flash_loans::find_flash_loan_opportunities;
pub use trading_model::{
    Confidence, ExecutionOutcome, FlashLoanOpportunity, Opportunity, OpportunityStatus,
    TradeKind, TradeRecord,
};
pub use trading_state::TradingState;
