//! Agent status and template models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::worker::WorkerTask;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AgentStatus {
    Active,
    Idle,
    Error,
}

/// Status of one agent, derived from the run history of its worker task.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Agent {
    pub id: String,
    pub name: String,
    pub description: String,
    pub task: WorkerTask,
    pub status: AgentStatus,
    pub runs: u64,
    pub failures: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_run: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_error: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

/// Preset agent configuration offered to users.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AgentTemplate {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: String,
    pub risk_level: RiskLevel,
    /// Suggested starting capital, in USD
    pub min_capital: f64,
    pub tasks: Vec<WorkerTask>,
}
