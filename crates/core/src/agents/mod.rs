//! Agents module - status records for the worker tasks and a template catalog.

mod agents_model;
mod agents_service;

pub use agents_model::{Agent, AgentStatus, AgentTemplate, RiskLevel};
pub use agents_service::{agent_status, agent_templates, list_agents};
