//! Portfolio module - simulated holdings, trading performance and overview.

mod portfolio_model;
mod portfolio_service;

#[cfg(test)]
mod portfolio_service_tests;

pub use portfolio_model::{
    AllocationEntry, Holding, PerformanceSummary, PortfolioOverview, PortfolioSnapshot,
};
pub use portfolio_service::{success_rate, PortfolioService, SIMULATED_HOLDINGS};
