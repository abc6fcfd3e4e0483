use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use chrono::Utc;
use lootos_core::agents::{agent_templates, list_agents, AgentStatus};
use serde_json::{json, Value};

use super::envelope;
use crate::main_lib::AppState;

#[utoipa::path(
    get,
    path = "/api/agents",
    responses((status = 200, description = "Agents backed by worker tasks"))
)]
pub async fn get_agents(State(state): State<Arc<AppState>>) -> Json<Value> {
    let agents = list_agents(&state.worker.task_stats(), Utc::now());
    let active = agents
        .iter()
        .filter(|a| a.status == AgentStatus::Active)
        .count();
    envelope(json!({
        "total_agents": agents.len(),
        "active_agents": active,
        "agents": agents,
    }))
}

#[utoipa::path(
    get,
    path = "/api/agents/templates",
    responses((status = 200, description = "Agent templates"))
)]
pub async fn get_agent_templates() -> Json<Value> {
    envelope(json!({ "templates": agent_templates() }))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/agents", get(get_agents))
        .route("/api/agents/templates", get(get_agent_templates))
}
