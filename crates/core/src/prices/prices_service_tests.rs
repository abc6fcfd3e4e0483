//! Tests for PriceService caching and fallback behaviour.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use lootos_market_data::PriceCache;
    use rust_decimal_macros::dec;

    use crate::errors::Error;
    use crate::prices::PriceService;
    use crate::test_support::MockPriceProvider;

    fn service(provider: &MockPriceProvider) -> PriceService {
        PriceService::new(Arc::new(provider.clone()), PriceCache::default())
    }

    #[tokio::test]
    async fn test_symbol_resolves_to_provider_id() {
        let provider = MockPriceProvider::with_prices(&[("ethereum", dec!(2500))]);
        let price = service(&provider).get_price("ETH").await.unwrap();
        assert_eq!(price.token_id, "ethereum");
        assert_eq!(price.usd, dec!(2500));
    }

    #[tokio::test]
    async fn test_second_lookup_is_served_from_cache() {
        let provider = MockPriceProvider::with_prices(&[("bitcoin", dec!(43000))]);
        let prices = service(&provider);
        prices.get_price("bitcoin").await.unwrap();
        prices.get_price("btc").await.unwrap();
        assert_eq!(provider.calls(), 1);
    }

    #[tokio::test]
    async fn test_unknown_token_is_an_error() {
        let provider = MockPriceProvider::new();
        let err = service(&provider).get_price("pepe").await.unwrap_err();
        assert!(matches!(
            err,
            Error::MarketData(lootos_market_data::MarketDataError::TokenNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_malformed_token_is_rejected_before_provider() {
        let provider = MockPriceProvider::new();
        let err = service(&provider).get_price("a/b").await.unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        assert_eq!(provider.calls(), 0);
    }

    #[tokio::test]
    async fn test_batch_keeps_request_order_and_skips_unknown() {
        let provider = MockPriceProvider::with_prices(&[
            ("ethereum", dec!(2500)),
            ("solana", dec!(100)),
        ]);
        let prices = service(&provider);
        // Warm the cache for one token so the batch mixes hits and misses.
        prices.get_price("solana").await.unwrap();

        let batch = prices
            .get_prices(&[
                "SOL".to_string(),
                "pepe".to_string(),
                "ethereum".to_string(),
                "eth".to_string(),
            ])
            .await
            .unwrap();
        let ids: Vec<&str> = batch.iter().map(|p| p.token_id.as_str()).collect();
        assert_eq!(ids, vec!["solana", "ethereum"]);
    }

    #[tokio::test]
    async fn test_fallback_when_provider_fails() {
        let provider = MockPriceProvider::with_prices(&[("ethereum", dec!(2500))]);
        provider.set_failing(true);
        let price = service(&provider)
            .price_or_fallback("ethereum")
            .await
            .unwrap();
        assert_eq!(price.usd, dec!(2450.0));
        assert_eq!(price.source, "FALLBACK");
    }

    #[tokio::test]
    async fn test_fallback_has_no_price_for_unknown_token() {
        let provider = MockPriceProvider::new();
        assert!(service(&provider).price_or_fallback("pepe").await.is_none());
    }
}
