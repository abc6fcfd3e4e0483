use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use lootos_core::wallet::{ConnectWalletRequest, DisconnectWalletRequest};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use super::envelope;
use crate::{
    error::{ApiError, ApiResult},
    main_lib::AppState,
};

/// Parse an optional JSON body. An empty body yields the default request.
fn parse_body<T: DeserializeOwned + Default>(body: &Bytes) -> ApiResult<T> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }
    serde_json::from_slice(body)
        .map_err(|e| ApiError::BadRequest(format!("Invalid request body: {}", e)))
}

#[utoipa::path(
    post,
    path = "/api/wallet/connect",
    responses(
        (status = 200, description = "Wallet connected"),
        (status = 400, description = "Missing or malformed address")
    )
)]
pub async fn connect_wallet(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> ApiResult<Json<Value>> {
    let request: ConnectWalletRequest = parse_body(&body)?;
    let wallet = state.wallet.connect(request)?;
    Ok(envelope(json!({
        "message": "Wallet connected successfully",
        "wallet": wallet,
    })))
}

#[utoipa::path(
    post,
    path = "/api/wallet/disconnect",
    responses((status = 200, description = "Wallet disconnected"))
)]
pub async fn disconnect_wallet(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> ApiResult<Json<Value>> {
    let request: DisconnectWalletRequest = parse_body(&body)?;
    let wallet = state.wallet.disconnect(request);
    Ok(envelope(json!({
        "message": "Wallet disconnected successfully",
        "wallet": wallet,
    })))
}

#[utoipa::path(
    get,
    path = "/api/wallet/balance/{address}",
    params(("address" = String, Path, description = "0x-prefixed account address")),
    responses(
        (status = 200, description = "ETH balance valued in USD"),
        (status = 400, description = "Malformed address"),
        (status = 503, description = "Chain RPC not configured")
    )
)]
pub async fn get_wallet_balance(
    Path(address): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Value>> {
    let balance = state.wallet.balance(&address).await?;
    Ok(envelope(json!({ "balance": balance })))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/wallet/connect", post(connect_wallet))
        .route("/api/wallet/disconnect", post(disconnect_wallet))
        .route("/api/wallet/balance/{address}", get(get_wallet_balance))
}
