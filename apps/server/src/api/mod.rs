mod agents;
mod health;
mod network;
mod portfolio;
mod prices;
mod stream;
mod trading;
mod wallet;
mod worker;

use std::sync::Arc;

use axum::{
    http::{HeaderValue, Method, Uri},
    routing::get,
    Json, Router,
};
use chrono::Utc;
use serde_json::{json, Value};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use utoipa::OpenApi;

use crate::{config::Config, error::ApiError, main_lib::AppState};

/// Wrap a JSON object payload as `{ "success": true, ...payload, "timestamp" }`.
pub(crate) fn envelope(payload: Value) -> Json<Value> {
    let mut body = match payload {
        Value::Object(map) => map,
        Value::Null => serde_json::Map::new(),
        other => {
            let mut map = serde_json::Map::new();
            map.insert("data".to_string(), other);
            map
        }
    };
    body.insert("success".to_string(), Value::Bool(true));
    body.insert("timestamp".to_string(), json!(Utc::now()));
    Json(Value::Object(body))
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::home,
        health::health_check,
        health::public_config,
        prices::get_price,
        prices::get_multiple_prices,
        portfolio::get_portfolio,
        portfolio::get_portfolio_overview,
        trading::get_trading_history,
        trading::get_arbitrage,
        network::get_gas_prices,
        network::get_blockchain_status,
        network::get_mev_status,
        agents::get_agents,
        agents::get_agent_templates,
        wallet::connect_wallet,
        wallet::disconnect_wallet,
        wallet::get_wallet_balance,
        worker::get_worker_status,
        worker::run_worker_task,
    ),
    tags((name = "lootos"))
)]
struct ApiDoc;

pub fn app_router(state: Arc<AppState>, config: &Config) -> Router {
    let origin = if config.cors_allow.iter().any(|o| o == "*") {
        AllowOrigin::from(Any)
    } else {
        let origins = config
            .cors_allow
            .iter()
            .filter_map(|o| match o.parse::<HeaderValue>() {
                Ok(origin) => Some(origin),
                Err(_) => {
                    tracing::warn!("Ignoring invalid CORS origin '{}'", o);
                    None
                }
            })
            .collect::<Vec<_>>();
        AllowOrigin::list(origins)
    };
    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods(Any)
        .allow_headers(Any);

    let openapi = ApiDoc::openapi();

    Router::new()
        .merge(health::router())
        .merge(prices::router())
        .merge(portfolio::router())
        .merge(trading::router())
        .merge(network::router())
        .merge(agents::router())
        .merge(wallet::router())
        .merge(worker::router())
        .merge(stream::router())
        .route("/openapi.json", get(|| async { Json(openapi) }))
        .fallback(route_not_found)
        .method_not_allowed_fallback(method_not_allowed)
        .with_state(state)
        .layer(cors)
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TimeoutLayer::new(config.request_timeout))
        .layer(TraceLayer::new_for_http())
}

async fn route_not_found(uri: Uri) -> ApiError {
    ApiError::NotFound(format!("No route for {}", uri.path()))
}

async fn method_not_allowed(method: Method, uri: Uri) -> ApiError {
    ApiError::MethodNotAllowed(format!("{} is not allowed on {}", method, uri.path()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_wraps_objects() {
        let Json(body) = envelope(json!({ "price": 1 }));
        assert_eq!(body["success"], true);
        assert_eq!(body["price"], 1);
        assert!(body["timestamp"].is_string());
    }

    #[test]
    fn test_envelope_wraps_non_objects() {
        let Json(body) = envelope(json!([1, 2]));
        assert_eq!(body["data"], json!([1, 2]));
        let Json(empty) = envelope(Value::Null);
        assert_eq!(empty.as_object().map(|m| m.len()), Some(2));
    }

    #[test]
    fn test_openapi_lists_routes() {
        let doc = ApiDoc::openapi();
        let paths = &doc.paths.paths;
        assert!(paths.contains_key("/api/price/{token}"));
        assert!(paths.contains_key("/api/worker/tasks/{task}/run"));
    }
}
