//! Background scheduler for the trading worker.
//!
//! Each worker task runs on its own fixed interval, mirroring the beat
//! schedule of the worker process.

use std::sync::Arc;

use lootos_core::worker::{TaskDetails, TaskReport, WorkerTask};
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::main_lib::AppState;

/// Starts one interval loop per worker task.
pub fn start_worker_scheduler(state: Arc<AppState>) {
    info!(
        "Worker scheduler started for {} ({} tasks)",
        state.worker.worker_id(),
        WorkerTask::ALL.len()
    );
    for task in WorkerTask::ALL {
        let state = state.clone();
        tokio::spawn(async move {
            let period = task.interval();
            // First run happens one period after startup, like a beat schedule.
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                ticker.tick().await;
                let report = state.worker.run(task).await;
                log_report(&report);
            }
        });
    }
}

fn log_report(report: &TaskReport) {
    if !report.success {
        warn!(
            "Scheduled task {} failed: {}",
            report.task.schedule_name(),
            report.error.as_deref().unwrap_or("unknown error")
        );
        return;
    }
    match &report.details {
        Some(TaskDetails::ArbitrageScan {
            opportunities_found,
            total_active,
        }) => info!(
            "Arbitrage scan: {} new, {} active",
            opportunities_found, total_active
        ),
        Some(TaskDetails::TradeExecution {
            trades_executed,
            total_profit,
        }) => info!(
            "Executed {} trades, profit ${:.2}",
            trades_executed, total_profit
        ),
        Some(TaskDetails::FlashLoanScan {
            flash_opportunities,
            executed_flash_loans,
        }) => info!(
            "Flash loan scan: {} found, {} executed",
            flash_opportunities, executed_flash_loans
        ),
        _ => debug!("Scheduled task {} completed", report.task.schedule_name()),
    }
}
