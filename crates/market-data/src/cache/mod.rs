//! In-memory price cache with TTL using moka

use moka::future::Cache;
use std::time::Duration;

use crate::models::TokenPrice;

const DEFAULT_TTL: Duration = Duration::from_secs(30);
const DEFAULT_CAPACITY: u64 = 500;

/// Token price cache keyed by provider token id.
#[derive(Clone)]
pub struct PriceCache {
    cache: Cache<String, TokenPrice>,
}

impl PriceCache {
    pub fn new(ttl: Duration) -> Self {
        Self::with_capacity(ttl, DEFAULT_CAPACITY)
    }

    pub fn with_capacity(ttl: Duration, capacity: u64) -> Self {
        Self {
            cache: Cache::builder()
                .time_to_live(ttl)
                .max_capacity(capacity)
                .build(),
        }
    }

    pub async fn get(&self, token_id: &str) -> Option<TokenPrice> {
        self.cache.get(token_id).await
    }

    pub async fn insert(&self, price: TokenPrice) {
        self.cache.insert(price.token_id.clone(), price).await;
    }

    pub async fn invalidate(&self, token_id: &str) {
        self.cache.invalidate(token_id).await;
    }

    pub fn clear(&self) {
        self.cache.invalidate_all();
    }
}

impl Default for PriceCache {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}
