//! Randomness used by the simulated venues, executions and monitors.
//!
//! Every random draw goes through [`SharedRng`] so that tests can seed it
//! and get reproducible scans and executions.

use std::sync::{Arc, Mutex};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Cloneable handle to a single seeded RNG.
#[derive(Clone)]
pub struct SharedRng {
    inner: Arc<Mutex<StdRng>>,
}

impl SharedRng {
    pub fn from_entropy() -> Self {
        Self {
            inner: Arc::new(Mutex::new(StdRng::from_entropy())),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            inner: Arc::new(Mutex::new(StdRng::seed_from_u64(seed))),
        }
    }

    /// Run `f` with exclusive access to the RNG.
    pub fn with<R>(&self, f: impl FnOnce(&mut StdRng) -> R) -> R {
        let mut rng = self
            .inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        f(&mut rng)
    }

    /// Uniform draw in `[low, high)`; returns `low` for an empty range.
    pub fn uniform(&self, low: f64, high: f64) -> f64 {
        if high <= low {
            return low;
        }
        self.with(|rng| rng.gen_range(low..high))
    }

    /// True with probability `p`.
    pub fn chance(&self, p: f64) -> bool {
        self.with(|rng| rng.gen::<f64>() < p)
    }

    /// Uniform integer in `[low, high]`.
    pub fn int_inclusive(&self, low: u32, high: u32) -> u32 {
        self.with(|rng| rng.gen_range(low..=high))
    }

    /// Random 32-byte hash rendered as `0x` + 64 hex digits.
    pub fn tx_hash(&self) -> String {
        let bytes: [u8; 32] = self.with(|rng| rng.gen());
        format!("0x{}", hex::encode(bytes))
    }

    /// Pick one element of a non-empty slice.
    pub fn pick<'a, T>(&self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            return None;
        }
        let index = self.with(|rng| rng.gen_range(0..items.len()));
        items.get(index)
    }
}

impl Default for SharedRng {
    fn default() -> Self {
        Self::from_entropy()
    }
}
