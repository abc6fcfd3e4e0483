//! Price provider abstractions and implementations.
//!
//! - The `PriceProvider` trait that all providers implement
//! - `coingecko` - live prices from the CoinGecko simple price API
//! - `fallback` - static reference prices used when live data is missing

mod traits;

pub mod coingecko;
pub mod fallback;

pub use traits::PriceProvider;
