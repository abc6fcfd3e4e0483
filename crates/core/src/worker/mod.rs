//! Worker module - periodic simulated trading tasks.

mod task_registry;
mod worker_model;
mod worker_service;


pub use task_registry::TaskRegistry;
pub use worker_model::{TaskDetails, TaskReport, TaskStats, WorkerHealth, WorkerTask};
pub use worker_service::{Worker, WorkerDeps};
