//! Trading event types.

use serde::{Deserialize, Serialize};

use crate::trading::{Opportunity, TradeRecord};
use crate::worker::TaskReport;

/// Facts emitted by the worker after it changes trading state.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TradingEvent {
    /// A scan recorded a new arbitrage opportunity.
    OpportunityDetected { opportunity: Opportunity },

    /// An arbitrage opportunity was executed successfully.
    TradeExecuted { trade: TradeRecord },

    /// A flash-loan pair was executed successfully.
    FlashLoanExecuted { trade: TradeRecord },

    /// A worker task finished (successfully or not).
    TaskCompleted { report: TaskReport },
}

impl TradingEvent {
    pub fn opportunity_detected(opportunity: Opportunity) -> Self {
        Self::OpportunityDetected { opportunity }
    }

    pub fn trade_executed(trade: TradeRecord) -> Self {
        Self::TradeExecuted { trade }
    }

    pub fn flash_loan_executed(trade: TradeRecord) -> Self {
        Self::FlashLoanExecuted { trade }
    }

    pub fn task_completed(report: TaskReport) -> Self {
        Self::TaskCompleted { report }
    }

    /// Event name used as the SSE event type.
    pub fn name(&self) -> &'static str {
        match self {
            Self::OpportunityDetected { .. } => "opportunity_detected",
            Self::TradeExecuted { .. } => "trade_executed",
            Self::FlashLoanExecuted { .. } => "flash_loan_executed",
            Self::TaskCompleted { .. } => "task_completed",
        }
    }
}
