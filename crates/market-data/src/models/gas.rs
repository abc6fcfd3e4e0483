use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

const SAFE_MULTIPLIER: f64 = 0.9;
const FAST_MULTIPLIER: f64 = 1.2;
const INSTANT_MULTIPLIER: f64 = 1.5;

/// Where a gas estimate came from.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum GasSource {
    EthereumNetwork,
    Simulated,
}

/// Tiered gas price estimate, in gwei.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct GasPrices {
    pub safe: f64,
    pub standard: f64,
    pub fast: f64,
    pub instant: f64,
    pub source: GasSource,
    pub timestamp: DateTime<Utc>,
}

impl GasPrices {
    /// Derive all tiers from the standard price.
    pub fn from_standard(standard_gwei: f64, source: GasSource) -> Self {
        Self {
            safe: standard_gwei * SAFE_MULTIPLIER,
            standard: standard_gwei,
            fast: standard_gwei * FAST_MULTIPLIER,
            instant: standard_gwei * INSTANT_MULTIPLIER,
            source,
            timestamp: Utc::now(),
        }
    }

    /// Same tiers rounded to one decimal place.
    pub fn rounded(self) -> Self {
        let round = |v: f64| (v * 10.0).round() / 10.0;
        Self {
            safe: round(self.safe),
            standard: round(self.standard),
            fast: round(self.fast),
            instant: round(self.instant),
            ..self
        }
    }
}
