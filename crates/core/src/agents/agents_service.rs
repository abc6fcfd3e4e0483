use chrono::{DateTime, Utc};

use super::agents_model::{Agent, AgentStatus, AgentTemplate, RiskLevel};
use crate::worker::{TaskStats, WorkerTask};

/// Agents whose task has not run within this many intervals are idle.
const STALE_AFTER_INTERVALS: u32 = 3;

struct AgentDef {
    id: &'static str,
    name: &'static str,
    description: &'static str,
    task: WorkerTask,
}

const AGENTS: [AgentDef; 6] = [
    AgentDef {
        id: "arbitrage-scanner",
        name: "Arbitrage Scanner",
        description: "Compares reference prices against DEX quotes for ETH, BTC and SOL",
        task: WorkerTask::ScanArbitrageOpportunities,
    },
    AgentDef {
        id: "trade-executor",
        name: "Trade Executor",
        description: "Executes the most profitable detected opportunities",
        task: WorkerTask::ExecuteProfitableTrades,
    },
    AgentDef {
        id: "flash-loan-hunter",
        name: "Flash Loan Hunter",
        description: "Combines same-pair opportunities into flash-loan trades",
        task: WorkerTask::ScanFlashLoanOpportunities,
    },
    AgentDef {
        id: "gas-optimizer",
        name: "Gas Optimizer",
        description: "Tracks network gas prices for execution cost estimates",
        task: WorkerTask::MonitorGasPrices,
    },
    AgentDef {
        id: "mev-guardian",
        name: "MEV Guardian",
        description: "Watches for MEV threats against pending trades",
        task: WorkerTask::CheckMevProtection,
    },
    AgentDef {
        id: "portfolio-manager",
        name: "Portfolio Manager",
        description: "Revalues holdings and tracks trading performance",
        task: WorkerTask::UpdatePortfolioData,
    },
];

/// Status of a task's agent at `now`.
pub fn agent_status(stats: &TaskStats, now: DateTime<Utc>) -> AgentStatus {
    let Some(last_run) = stats.last_run else {
        return AgentStatus::Idle;
    };
    if stats.last_succeeded() == Some(false) {
        return AgentStatus::Error;
    }
    let window = stats.task.interval() * STALE_AFTER_INTERVALS;
    let window = chrono::Duration::from_std(window).unwrap_or_else(|_| chrono::Duration::days(1));
    if now - last_run <= window {
        AgentStatus::Active
    } else {
        AgentStatus::Idle
    }
}

/// One agent per worker task.
pub fn list_agents(stats: &[TaskStats], now: DateTime<Utc>) -> Vec<Agent> {
    AGENTS
        .iter()
        .map(|def| {
            let task_stats = stats
                .iter()
                .find(|s| s.task == def.task)
                .cloned()
                .unwrap_or_else(|| TaskStats::new(def.task));
            Agent {
                id: def.id.to_string(),
                name: def.name.to_string(),
                description: def.description.to_string(),
                task: def.task,
                status: agent_status(&task_stats, now),
                runs: task_stats.runs,
                failures: task_stats.failures,
                last_run: task_stats.last_run,
                last_error: task_stats
                    .last_report
                    .as_ref()
                    .and_then(|r| r.error.clone()),
            }
        })
        .collect()
}

pub fn agent_templates() -> Vec<AgentTemplate> {
    vec![
        AgentTemplate {
            id: "conservative-arbitrage".to_string(),
            name: "Conservative Arbitrage".to_string(),
            description: "Executes only wide ETH/USDC spreads with full MEV protection"
                .to_string(),
            category: "arbitrage".to_string(),
            risk_level: RiskLevel::Low,
            min_capital: 1_000.0,
            tasks: vec![
                WorkerTask::ScanArbitrageOpportunities,
                WorkerTask::ExecuteProfitableTrades,
                WorkerTask::CheckMevProtection,
            ],
        },
        AgentTemplate {
            id: "multi-dex-arbitrage".to_string(),
            name: "Multi-DEX Arbitrage".to_string(),
            description: "Scans ETH, BTC and SOL pairs across DEX venues".to_string(),
            category: "arbitrage".to_string(),
            risk_level: RiskLevel::Medium,
            min_capital: 5_000.0,
            tasks: vec![
                WorkerTask::ScanArbitrageOpportunities,
                WorkerTask::ExecuteProfitableTrades,
                WorkerTask::MonitorGasPrices,
            ],
        },
        AgentTemplate {
            id: "flash-loan-hunter".to_string(),
            name: "Flash Loan Hunter".to_string(),
            description: "Combines opportunities into $50k flash-loan trades".to_string(),
            category: "flash_loans".to_string(),
            risk_level: RiskLevel::High,
            min_capital: 0.0,
            tasks: vec![
                WorkerTask::ScanArbitrageOpportunities,
                WorkerTask::ScanFlashLoanOpportunities,
            ],
        },
        AgentTemplate {
            id: "portfolio-tracker".to_string(),
            name: "Portfolio Tracker".to_string(),
            description: "Keeps holdings valued and reports trading performance".to_string(),
            category: "portfolio".to_string(),
            risk_level: RiskLevel::Low,
            min_capital: 0.0,
            tasks: vec![WorkerTask::UpdatePortfolioData, WorkerTask::MonitorGasPrices],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::worker::{TaskDetails, TaskReport};
    use chrono::Duration;

    fn ran(task: WorkerTask, report: TaskReport) -> TaskStats {
        let mut stats = TaskStats::new(task);
        stats.runs = 1;
        stats.last_run = Some(report.timestamp);
        if !report.success {
            stats.failures = 1;
        }
        stats.last_report = Some(report);
        stats
    }

    #[test]
    fn test_status_transitions() {
        let task = WorkerTask::ScanArbitrageOpportunities;
        let now = Utc::now();
        assert_eq!(agent_status(&TaskStats::new(task), now), AgentStatus::Idle);

        let ok = ran(
            task,
            TaskReport::success(
                task,
                TaskDetails::ArbitrageScan {
                    opportunities_found: 0,
                    total_active: 0,
                },
            ),
        );
        assert_eq!(agent_status(&ok, now), AgentStatus::Active);
        // Three 15 s intervals later the agent is stale.
        assert_eq!(
            agent_status(&ok, now + Duration::seconds(50)),
            AgentStatus::Idle
        );

        let failed = ran(task, TaskReport::failure(task, "boom"));
        assert_eq!(agent_status(&failed, now), AgentStatus::Error);
    }

    #[test]
    fn test_one_agent_per_task() {
        let agents = list_agents(&[], Utc::now());
        assert_eq!(agents.len(), 6);
        assert!(agents.iter().all(|a| a.status == AgentStatus::Idle));
        for task in WorkerTask::ALL {
            assert!(agents.iter().any(|a| a.task == task));
        }
        assert_eq!(agents[0].name, "Arbitrage Scanner");
    }

    #[test]
    fn test_failed_agent_reports_error() {
        let task = WorkerTask::MonitorGasPrices;
        let stats = vec![ran(task, TaskReport::failure(task, "rpc down"))];
        let agents = list_agents(&stats, Utc::now());
        let gas = agents.iter().find(|a| a.task == task).unwrap();
        assert_eq!(gas.status, AgentStatus::Error);
        assert_eq!(gas.last_error.as_deref(), Some("rpc down"));
    }

    #[test]
    fn test_templates_are_stable() {
        let templates = agent_templates();
        assert_eq!(templates.len(), 4);
        assert!(templates.iter().all(|t| !t.tasks.is_empty()));
    }
}
