//! Gas price monitoring.

mod gas_service;

pub use gas_service::{gas_cost_eth, GasMonitor};
