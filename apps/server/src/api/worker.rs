use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use lootos_core::worker::WorkerTask;
use serde_json::{json, Value};

use super::envelope;
use crate::{error::ApiResult, main_lib::AppState};

#[utoipa::path(
    get,
    path = "/api/worker/status",
    responses((status = 200, description = "Worker health and task statistics"))
)]
pub async fn get_worker_status(State(state): State<Arc<AppState>>) -> Json<Value> {
    envelope(json!({
        "worker": state.worker.health(),
        "scheduler_enabled": state.config.worker_enabled,
        "tasks": state.worker.task_stats(),
    }))
}

/// Run one worker task immediately. Accepts `scan_arbitrage_opportunities`
/// or its schedule name (`scan-arbitrage-opportunities`).
#[utoipa::path(
    post,
    path = "/api/worker/tasks/{task}/run",
    params(("task" = String, Path, description = "Task name or schedule name")),
    responses(
        (status = 200, description = "Task report"),
        (status = 404, description = "Unknown task")
    )
)]
pub async fn run_worker_task(
    Path(task): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Value>> {
    let task: WorkerTask = task.parse()?;
    tracing::info!("Manual run of worker task {}", task);
    let report = state.worker.run(task).await;
    Ok(envelope(json!({ "report": report })))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/worker/status", get(get_worker_status))
        .route("/api/worker/tasks/{task}/run", post(run_worker_task))
}
