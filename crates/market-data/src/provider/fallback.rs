//! Static reference prices.
//!
//! Used when the live provider is unreachable so that portfolio valuation
//! and opportunity scanning still have a price to work from.

use async_trait::async_trait;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::errors::MarketDataError;
use crate::models::TokenPrice;
use crate::provider::PriceProvider;

const PROVIDER_ID: &str = "FALLBACK";

/// Reference prices keyed by CoinGecko token id.
const REFERENCE_PRICES: &[(&str, Decimal)] = &[
    ("ethereum", dec!(2450.0)),
    ("bitcoin", dec!(43500.0)),
    ("solana", dec!(98.5)),
    ("usd-coin", dec!(1.0)),
    ("tether", dec!(1.0)),
    ("matic-network", dec!(0.85)),
    ("chainlink", dec!(14.5)),
    ("arbitrum", dec!(1.2)),
    ("binancecoin", dec!(310.0)),
    ("avalanche-2", dec!(36.0)),
];

#[derive(Clone, Debug, Default)]
pub struct FallbackPriceProvider;

impl FallbackPriceProvider {
    pub fn new() -> Self {
        Self
    }

    pub fn reference_price(token_id: &str) -> Option<Decimal> {
        REFERENCE_PRICES
            .iter()
            .find(|(id, _)| *id == token_id)
            .map(|(_, price)| *price)
    }
}

#[async_trait]
impl PriceProvider for FallbackPriceProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn get_price(&self, token_id: &str) -> Result<TokenPrice, MarketDataError> {
        Self::reference_price(token_id)
            .map(|usd| TokenPrice::new(token_id, usd, PROVIDER_ID))
            .ok_or_else(|| MarketDataError::TokenNotFound(token_id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_known_token() {
        let provider = FallbackPriceProvider::new();
        let price = provider.get_price("ethereum").await.unwrap();
        assert_eq!(price.usd, dec!(2450.0));
        assert_eq!(price.source, "FALLBACK");
    }

    #[tokio::test]
    async fn test_unknown_token() {
        let provider = FallbackPriceProvider::new();
        let err = provider.get_price("not-a-token").await.unwrap_err();
        assert!(matches!(err, MarketDataError::TokenNotFound(_)));
    }

    #[tokio::test]
    async fn test_batch_skips_unknown() {
        let provider = FallbackPriceProvider::new();
        let ids = vec![
            "bitcoin".to_string(),
            "not-a-token".to_string(),
            "solana".to_string(),
        ];
        let prices = provider.get_prices(&ids).await.unwrap();
        let ids: Vec<&str> = prices.iter().map(|p| p.token_id.as_str()).collect();
        assert_eq!(ids, vec!["bitcoin", "solana"]);
    }
}
