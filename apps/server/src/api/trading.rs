use std::sync::Arc;

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use chrono::Utc;
use lootos_core::{constants::MAX_TRADE_HISTORY, portfolio::success_rate};
use serde::Deserialize;
use serde_json::{json, Value};

use super::envelope;
use crate::{
    error::{ApiError, ApiResult},
    main_lib::AppState,
};

const DEFAULT_HISTORY_LIMIT: usize = 50;

#[derive(Deserialize)]
pub struct HistoryQuery {
    limit: Option<String>,
}

fn parse_limit(raw: Option<&str>) -> ApiResult<usize> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(DEFAULT_HISTORY_LIMIT),
        Some(raw) => raw
            .parse::<usize>()
            .map(|n| n.clamp(1, MAX_TRADE_HISTORY))
            .map_err(|_| ApiError::BadRequest(format!("Invalid limit '{}'", raw))),
    }
}

#[utoipa::path(
    get,
    path = "/api/trading/history",
    params(("limit" = Option<usize>, Query, description = "Maximum trades to return (default 50)")),
    responses(
        (status = 200, description = "Executed trades, newest first"),
        (status = 400, description = "Invalid limit")
    )
)]
pub async fn get_trading_history(
    Query(query): Query<HistoryQuery>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Value>> {
    let limit = parse_limit(query.limit.as_deref())?;
    let trading = &state.trading;

    let all = trading.trades();
    let profitable = all.iter().filter(|t| t.is_profitable()).count();
    let failed = trading.failed_executions();
    let attempts = all.len() + failed;

    Ok(envelope(json!({
        "trades": trading.recent_trades(limit),
        "stats": {
            "total_trades": all.len(),
            "profitable_trades": profitable,
            "failed_executions": failed,
            "total_profit": trading.total_profit(),
            "success_rate": success_rate(profitable, attempts),
        }
    })))
}

#[utoipa::path(
    get,
    path = "/api/arbitrage",
    responses((status = 200, description = "Active opportunities and flash loans"))
)]
pub async fn get_arbitrage(State(state): State<Arc<AppState>>) -> Json<Value> {
    let now = Utc::now();
    let mut active: Vec<_> = state
        .trading
        .opportunities()
        .into_iter()
        .filter(|o| !o.is_expired(now))
        .collect();
    active.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    let flash_loans = state.trading.flash_loans();

    envelope(json!({
        "total_opportunities": active.len(),
        "opportunities": active,
        "flash_loans": flash_loans,
    }))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/trading/history", get(get_trading_history))
        .route("/api/arbitrage", get(get_arbitrage))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_limit() {
        assert_eq!(parse_limit(None).unwrap(), DEFAULT_HISTORY_LIMIT);
        assert_eq!(parse_limit(Some("5")).unwrap(), 5);
        assert_eq!(parse_limit(Some("0")).unwrap(), 1);
        assert_eq!(parse_limit(Some("100000")).unwrap(), MAX_TRADE_HISTORY);
        assert!(parse_limit(Some("ten")).is_err());
    }
}
