use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use chrono::Utc;
use lootos_core::{tokens::SUPPORTED_TOKENS, worker::WorkerTask};
use serde_json::{json, Value};

use super::envelope;
use crate::main_lib::AppState;

const SERVICE_NAME: &str = "LootOS";

#[utoipa::path(get, path = "/", responses((status = 200, description = "Service banner")))]
pub async fn home() -> Json<Value> {
    envelope(json!({
        "message": "Welcome to LootOS",
        "status": "online",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

#[utoipa::path(get, path = "/api/health", responses((status = 200, description = "Health")))]
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<Value> {
    let uptime = (Utc::now() - state.started_at).num_seconds().max(0);
    envelope(json!({
        "status": "healthy",
        "service": SERVICE_NAME,
        "message": "API is running successfully",
        "uptime_secs": uptime,
        "worker": state.worker.health(),
    }))
}

/// Public feature flags. Secrets and URLs are never included.
#[utoipa::path(
    get,
    path = "/api/config",
    responses((status = 200, description = "Public configuration"))
)]
pub async fn public_config(State(state): State<Arc<AppState>>) -> Json<Value> {
    let config = &state.config;
    let schedule: Vec<Value> = WorkerTask::ALL
        .iter()
        .map(|task| {
            json!({
                "task": task,
                "schedule_name": task.schedule_name(),
                "interval_secs": task.interval().as_secs(),
            })
        })
        .collect();

    envelope(json!({
        "config": {
            "service": SERVICE_NAME,
            "version": env!("CARGO_PKG_VERSION"),
            "price_source": state.prices.primary_source(),
            "coingecko_pro": config.coingecko_api_key.is_some(),
            "blockchain_rpc": state.chain.is_some(),
            "backend_notifications": config.backend_url.is_some(),
            "worker_enabled": config.worker_enabled,
            "price_cache_ttl_secs": config.price_cache_ttl.as_secs(),
            "simulated_trading": true,
            "supported_tokens": SUPPORTED_TOKENS,
            "schedule": schedule,
        }
    }))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(home))
        .route("/api/health", get(health_check))
        .route("/api/config", get(public_config))
}
