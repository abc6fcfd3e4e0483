//! Market data models
//!
//! - `price` - USD token price as reported by a provider (TokenPrice)
//! - `gas` - Tiered gas price estimate (GasPrices, GasSource)
//! - `units` - Wei/gwei/ether conversions and hex quantity parsing

mod gas;
mod price;
mod units;

pub use gas::{GasPrices, GasSource};
pub use price::TokenPrice;
pub use units::{parse_hex_quantity, wei_to_eth, wei_to_gwei};
