use std::sync::Arc;

use lootos_market_data::{FallbackPriceProvider, PriceCache, PriceProvider, TokenPrice};
use log::{debug, warn};

use crate::errors::Result;
use crate::tokens::resolve_token_id;

/// Token prices from a primary provider, cached, with a fallback
/// provider for callers that need *some* price.
pub struct PriceService {
    primary: Arc<dyn PriceProvider>,
    fallback: Arc<dyn PriceProvider>,
    cache: PriceCache,
}

impl PriceService {
    pub fn new(primary: Arc<dyn PriceProvider>, cache: PriceCache) -> Self {
        Self {
            primary,
            fallback: Arc::new(FallbackPriceProvider::new()),
            cache,
        }
    }

    pub fn with_fallback(mut self, fallback: Arc<dyn PriceProvider>) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn primary_source(&self) -> &'static str {
        self.primary.id()
    }

    /// Latest price from the primary provider. Errors are returned as-is.
    pub async fn get_price(&self, token: &str) -> Result<TokenPrice> {
        let token_id = resolve_token_id(token)?;
        if let Some(hit) = self.cache.get(&token_id).await {
            debug!("Price cache hit for {}", token_id);
            return Ok(hit);
        }

        let price = self.primary.get_price(&token_id).await?;
        self.cache.insert(price.clone()).await;
        Ok(price)
    }

    /// Prices for several tokens, in request order. Unknown tokens are
    /// omitted; duplicates are collapsed.
    pub async fn get_prices(&self, tokens: &[String]) -> Result<Vec<TokenPrice>> {
        let mut token_ids: Vec<String> = Vec::with_capacity(tokens.len());
        for token in tokens {
            let id = resolve_token_id(token)?;
            if !token_ids.contains(&id) {
                token_ids.push(id);
            }
        }

        let mut found: Vec<TokenPrice> = Vec::with_capacity(token_ids.len());
        let mut missing: Vec<String> = Vec::new();
        for id in &token_ids {
            match self.cache.get(id).await {
                Some(hit) => found.push(hit),
                None => missing.push(id.clone()),
            }
        }

        if !missing.is_empty() {
            let fetched = self.primary.get_prices(&missing).await?;
            for price in fetched {
                self.cache.insert(price.clone()).await;
                found.push(price);
            }
        }

        found.sort_by_key(|p| {
            token_ids
                .iter()
                .position(|id| *id == p.token_id)
                .unwrap_or(usize::MAX)
        });
        Ok(found)
    }

    /// Primary price if available, otherwise the fallback price.
    pub async fn price_or_fallback(&self, token: &str) -> Option<TokenPrice> {
        match self.get_price(token).await {
            Ok(price) => Some(price),
            Err(e) => {
                warn!("Using fallback price for {}: {}", token, e);
                let token_id = resolve_token_id(token).ok()?;
                self.fallback.get_price(&token_id).await.ok()
            }
        }
    }
}
