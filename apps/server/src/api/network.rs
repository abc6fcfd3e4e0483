use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use lootos_core::constants::DEFAULT_CHAIN_ID;
use serde_json::{json, Value};

use super::envelope;
use crate::main_lib::AppState;

/// Latest gas prices. Fetched (and stored) on demand before the first
/// monitor run.
#[utoipa::path(
    get,
    path = "/api/gas-prices",
    responses((status = 200, description = "Gas price tiers in gwei"))
)]
pub async fn get_gas_prices(State(state): State<Arc<AppState>>) -> Json<Value> {
    let gas_prices = match state.trading.gas_prices() {
        Some(gas) => gas,
        None => {
            let gas = state.gas.current().await;
            state.trading.set_gas_prices(gas.clone());
            gas
        }
    };
    envelope(json!({ "gas_prices": gas_prices }))
}

#[utoipa::path(
    get,
    path = "/api/blockchain/status",
    responses((status = 200, description = "Chain RPC status"))
)]
pub async fn get_blockchain_status(State(state): State<Arc<AppState>>) -> Json<Value> {
    let Some(chain) = &state.chain else {
        return envelope(json!({
            "network": "ethereum",
            "chain_id": DEFAULT_CHAIN_ID,
            "rpc_configured": false,
            "connected": false,
            "block_number": null,
        }));
    };

    match chain.block_number().await {
        Ok(block) => envelope(json!({
            "network": "ethereum",
            "chain_id": DEFAULT_CHAIN_ID,
            "rpc_configured": true,
            "connected": true,
            "block_number": block,
        })),
        Err(e) => {
            tracing::warn!("Block number lookup failed: {}", e);
            envelope(json!({
                "network": "ethereum",
                "chain_id": DEFAULT_CHAIN_ID,
                "rpc_configured": true,
                "connected": false,
                "block_number": null,
                "error": e.to_string(),
            }))
        }
    }
}

/// Report of the last MEV check; `null` until the first check has run.
#[utoipa::path(
    get,
    path = "/api/mev/status",
    responses((status = 200, description = "Latest MEV protection report"))
)]
pub async fn get_mev_status(State(state): State<Arc<AppState>>) -> Json<Value> {
    envelope(json!({ "mev": state.trading.mev_report() }))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/gas-prices", get(get_gas_prices))
        .route("/api/blockchain/status", get(get_blockchain_status))
        .route("/api/mev/status", get(get_mev_status))
}
