use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use serde_json::{json, Value};

use super::envelope;
use crate::main_lib::AppState;

#[utoipa::path(
    get,
    path = "/api/portfolio",
    responses((status = 200, description = "Latest portfolio snapshot"))
)]
pub async fn get_portfolio(State(state): State<Arc<AppState>>) -> Json<Value> {
    let portfolio = state.portfolio.snapshot().await;
    envelope(json!({ "portfolio": portfolio }))
}

#[utoipa::path(
    get,
    path = "/api/portfolio-overview",
    responses((status = 200, description = "Allocation and performance overview"))
)]
pub async fn get_portfolio_overview(State(state): State<Arc<AppState>>) -> Json<Value> {
    let overview = state.portfolio.overview().await;
    envelope(json!({ "overview": overview }))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/portfolio", get(get_portfolio))
        .route("/api/portfolio-overview", get(get_portfolio_overview))
}
