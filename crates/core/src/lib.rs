//! LootOS Core - domain services behind the LootOS backend.
//!
//! Prices, simulated arbitrage and flash-loan trading, gas and MEV
//! monitoring, portfolio valuation, agent status and wallet reads.
//! All trading is simulated: no transaction is ever built or signed.
//! State lives in memory only.

pub mod agents;
pub mod constants;
pub mod errors;
pub mod events;
pub mod gas;
pub mod mev;
pub mod portfolio;
pub mod prices;
pub mod simulation;
pub mod tokens;
pub mod trading;
pub mod wallet;
pub mod worker;

// Re-export error types
pub use errors::Error;
pub use errors::Result;

#[cfg(test)]
mod test_support;
