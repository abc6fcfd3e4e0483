//! LootOS Market Data Crate
//!
//! Upstream data sources for the LootOS backend: token prices and
//! Ethereum chain reads.
//!
//! # Overview
//!
//! - [`PriceProvider`] - async source of USD token prices
//!   ([`CoinGeckoProvider`], [`FallbackPriceProvider`])
//! - [`ChainClient`] - gas price, balance and block height reads
//!   ([`JsonRpcClient`] over Ethereum JSON-RPC)
//! - [`PriceCache`] - short-lived in-memory price cache
//!
//! ```text
//! +-----------------+     +------------------+
//! |   PriceService  | --> |   PriceCache     |
//! +-----------------+     +------------------+
//!          |
//!          v
//! +-----------------+     +------------------+
//! | CoinGecko (1st) | --> | Fallback (2nd)   |
//! +-----------------+     +------------------+
//! ```

pub mod cache;
pub mod chain;
pub mod errors;
pub mod models;
pub mod provider;

pub use cache::PriceCache;
pub use chain::{validate_address, ChainClient, JsonRpcClient};
pub use errors::MarketDataError;
pub use models::{
    parse_hex_quantity, wei_to_eth, wei_to_gwei, GasPrices, GasSource, TokenPrice,
};
pub use provider::coingecko::CoinGeckoProvider;
pub use provider::fallback::FallbackPriceProvider;
pub use provider::PriceProvider;
