//! Worker task and report models.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use chrono::{DateTime, Utc};
use lootos_market_data::GasPrices;
use serde::{Deserialize, Serialize};

use crate::errors::Error;

/// Periodic background tasks, with their beat schedule.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum WorkerTask {
    ScanArbitrageOpportunities,
    ExecuteProfitableTrades,
    UpdatePortfolioData,
    MonitorGasPrices,
    CheckMevProtection,
    ScanFlashLoanOpportunities,
}

impl WorkerTask {
    pub const ALL: [WorkerTask; 6] = [
        WorkerTask::ScanArbitrageOpportunities,
        WorkerTask::ExecuteProfitableTrades,
        WorkerTask::UpdatePortfolioData,
        WorkerTask::MonitorGasPrices,
        WorkerTask::CheckMevProtection,
        WorkerTask::ScanFlashLoanOpportunities,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::ScanArbitrageOpportunities => "scan_arbitrage_opportunities",
            Self::ExecuteProfitableTrades => "execute_profitable_trades",
            Self::UpdatePortfolioData => "update_portfolio_data",
            Self::MonitorGasPrices => "monitor_gas_prices",
            Self::CheckMevProtection => "check_mev_protection",
            Self::ScanFlashLoanOpportunities => "scan_flash_loan_opportunities",
        }
    }

    /// Entry name in the beat schedule.
    pub fn schedule_name(&self) -> &'static str {
        match self {
            Self::ScanArbitrageOpportunities => "scan-arbitrage-opportunities",
            Self::ExecuteProfitableTrades => "execute-profitable-trades",
            Self::UpdatePortfolioData => "update-portfolio-data",
            Self::MonitorGasPrices => "monitor-gas-prices",
            Self::CheckMevProtection => "check-mev-protection",
            Self::ScanFlashLoanOpportunities => "flash-loan-scanner",
        }
    }

    pub fn interval(&self) -> Duration {
        let secs = match self {
            Self::ScanArbitrageOpportunities => 15,
            Self::ExecuteProfitableTrades => 30,
            Self::UpdatePortfolioData => 60,
            Self::MonitorGasPrices => 45,
            Self::CheckMevProtection => 20,
            Self::ScanFlashLoanOpportunities => 25,
        };
        Duration::from_secs(secs)
    }
}

impl fmt::Display for WorkerTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for WorkerTask {
    type Err = Error;

    /// Accepts the task name or its schedule name, with `-` or `_`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        WorkerTask::ALL
            .into_iter()
            .find(|t| t.name() == normalized || t.schedule_name().replace('-', "_") == normalized)
            .ok_or_else(|| Error::NotFound(format!("Unknown worker task '{}'", s)))
    }
}

/// Task-specific payload of a successful run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum TaskDetails {
    ArbitrageScan {
        opportunities_found: usize,
        total_active: usize,
    },
    TradeExecution {
        trades_executed: usize,
        total_profit: f64,
    },
    NothingToDo {
        message: String,
    },
    FlashLoanScan {
        flash_opportunities: usize,
        executed_flash_loans: usize,
    },
    PortfolioUpdate {
        portfolio_value: f64,
        total_profit: f64,
    },
    GasUpdate {
        gas_prices: GasPrices,
    },
    MevCheck {
        mev_threats_detected: u32,
        protected_trades: u32,
        protection_active: bool,
    },
}

/// Outcome of one task run: `{ success, ...details, timestamp }` on the wire.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TaskReport {
    pub task: WorkerTask,
    pub success: bool,
    #[serde(flatten)]
    pub details: Option<TaskDetails>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl TaskReport {
    pub fn success(task: WorkerTask, details: TaskDetails) -> Self {
        Self {
            task,
            success: true,
            details: Some(details),
            error: None,
            timestamp: Utc::now(),
        }
    }

    pub fn failure(task: WorkerTask, error: impl Into<String>) -> Self {
        Self {
            task,
            success: false,
            details: None,
            error: Some(error.into()),
            timestamp: Utc::now(),
        }
    }
}

/// Worker liveness summary.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WorkerHealth {
    pub status: String,
    pub worker_id: String,
    pub active_opportunities: usize,
    pub executed_trades: usize,
    pub total_profit: f64,
    pub timestamp: DateTime<Utc>,
}

/// Run statistics of one task.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TaskStats {
    pub task: WorkerTask,
    pub schedule_name: String,
    pub interval_secs: u64,
    pub runs: u64,
    pub failures: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_run: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_report: Option<TaskReport>,
}

impl TaskStats {
    pub fn new(task: WorkerTask) -> Self {
        Self {
            task,
            schedule_name: task.schedule_name().to_string(),
            interval_secs: task.interval().as_secs(),
            runs: 0,
            failures: 0,
            last_run: None,
            last_report: None,
        }
    }

    pub fn last_succeeded(&self) -> Option<bool> {
        self.last_report.as_ref().map(|r| r.success)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_task_names() {
        assert_eq!(
            "scan_arbitrage_opportunities".parse::<WorkerTask>().unwrap(),
            WorkerTask::ScanArbitrageOpportunities
        );
        assert_eq!(
            "flash-loan-scanner".parse::<WorkerTask>().unwrap(),
            WorkerTask::ScanFlashLoanOpportunities
        );
        assert_eq!(
            "Monitor-Gas-Prices".parse::<WorkerTask>().unwrap(),
            WorkerTask::MonitorGasPrices
        );
        assert!(matches!(
            "reboot".parse::<WorkerTask>(),
            Err(Error::NotFound(_))
        ));
    }

    #[test]
    fn test_beat_schedule() {
        let secs: Vec<u64> = WorkerTask::ALL.iter().map(|t| t.interval().as_secs()).collect();
        assert_eq!(secs, vec![15, 30, 60, 45, 20, 25]);
    }

    #[test]
    fn test_report_flattens_details() {
        let report = TaskReport::success(
            WorkerTask::ScanArbitrageOpportunities,
            TaskDetails::ArbitrageScan {
                opportunities_found: 2,
                total_active: 5,
            },
        );
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["task"], "scan_arbitrage_opportunities");
        assert_eq!(json["success"], true);
        assert_eq!(json["opportunities_found"], 2);
        assert_eq!(json["total_active"], 5);
        assert!(json.get("error").is_none());
    }

    #[test]
    fn test_failure_report() {
        let report = TaskReport::failure(WorkerTask::MonitorGasPrices, "boom");
        let json = serde_json::to_value(report).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["error"], "boom");
    }
}
