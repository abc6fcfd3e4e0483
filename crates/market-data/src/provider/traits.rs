//! Price provider trait definition.

use async_trait::async_trait;

use crate::errors::MarketDataError;
use crate::models::TokenPrice;

/// Trait for USD token price sources.
///
/// # Example
///
/// ```ignore
/// use async_trait::async_trait;
/// use lootos_market_data::{MarketDataError, PriceProvider, TokenPrice};
///
/// struct MyProvider;
///
/// #[async_trait]
/// impl PriceProvider for MyProvider {
///     fn id(&self) -> &'static str {
///         "MY_PROVIDER"
///     }
///
///     async fn get_price(&self, token_id: &str) -> Result<TokenPrice, MarketDataError> {
///         // ...
///     }
/// }
/// ```
#[async_trait]
pub trait PriceProvider: Send + Sync {
    /// Unique identifier for this provider, used as the price source.
    fn id(&self) -> &'static str;

    /// Fetch the latest USD price for a token id.
    async fn get_price(&self, token_id: &str) -> Result<TokenPrice, MarketDataError>;

    /// Fetch prices for several tokens.
    ///
    /// Tokens the provider does not know are left out of the result.
    /// Default implementation issues one request per token.
    async fn get_prices(&self, token_ids: &[String]) -> Result<Vec<TokenPrice>, MarketDataError> {
        let mut prices = Vec::with_capacity(token_ids.len());
        for token_id in token_ids {
            match self.get_price(token_id).await {
                Ok(price) => prices.push(price),
                Err(MarketDataError::TokenNotFound(_)) => {}
                Err(e) => return Err(e),
            }
        }
        Ok(prices)
    }
}
