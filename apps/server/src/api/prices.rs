use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use lootos_core::tokens::default_price_tokens;
use serde::Deserialize;
use serde_json::{json, Value};

use super::envelope;
use crate::{error::ApiResult, main_lib::AppState};

#[utoipa::path(
    get,
    path = "/api/price/{token}",
    params(("token" = String, Path, description = "Token id or symbol")),
    responses(
        (status = 200, description = "Current USD price"),
        (status = 404, description = "Unknown token"),
        (status = 502, description = "Price provider failure")
    )
)]
pub async fn get_price(
    Path(token): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Value>> {
    let price = state.prices.get_price(&token).await?;
    Ok(envelope(json!({ "price": price })))
}

#[derive(Deserialize)]
pub struct MultiPriceQuery {
    tokens: Option<String>,
}

fn requested_tokens(raw: Option<&str>) -> Vec<String> {
    let tokens: Vec<String> = raw
        .unwrap_or_default()
        .split(',')
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect();
    if tokens.is_empty() {
        default_price_tokens()
    } else {
        tokens
    }
}

#[utoipa::path(
    get,
    path = "/api/prices/multi",
    params(
        ("tokens" = Option<String>, Query, description = "Comma-separated token ids or symbols")
    ),
    responses((status = 200, description = "Prices keyed by token id"))
)]
pub async fn get_multiple_prices(
    Query(query): Query<MultiPriceQuery>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Value>> {
    let tokens = requested_tokens(query.tokens.as_deref());
    let prices: BTreeMap<String, _> = state
        .prices
        .get_prices(&tokens)
        .await?
        .into_iter()
        .map(|p| (p.token_id.clone(), p))
        .collect();
    Ok(envelope(json!({ "prices": prices })))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/price/{token}", get(get_price))
        .route("/api/prices/multi", get(get_multiple_prices))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requested_tokens_defaults() {
        assert_eq!(requested_tokens(None), default_price_tokens());
        assert_eq!(requested_tokens(Some(" , ")), default_price_tokens());
        assert_eq!(requested_tokens(Some("eth, btc")), vec!["eth", "btc"]);
    }
}
