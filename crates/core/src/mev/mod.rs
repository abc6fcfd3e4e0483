//! Simulated MEV protection report.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::simulation::SharedRng;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MevReport {
    pub threats_detected: u32,
    pub protected_trades: u32,
    pub protection_active: bool,
    pub timestamp: DateTime<Utc>,
}

/// Draw a fresh report: up to 3 threats, up to 5 protected trades.
pub fn check_mev_protection(rng: &SharedRng) -> MevReport {
    MevReport {
        threats_detected: rng.int_inclusive(0, 3),
        protected_trades: rng.int_inclusive(0, 5),
        protection_active: true,
        timestamp: Utc::now(),
    }
}
