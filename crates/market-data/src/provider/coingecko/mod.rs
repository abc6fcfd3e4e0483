//! CoinGecko provider for crypto spot prices.
//!
//! Uses the `simple/price` endpoint. With an API key the pro endpoint is
//! used and the key is sent in the `x-cg-pro-api-key` header; without one
//! the public endpoint is used.

use async_trait::async_trait;
use log::debug;
use num_traits::FromPrimitive;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

use crate::errors::MarketDataError;
use crate::models::TokenPrice;
use crate::provider::PriceProvider;

/// Provider ID constant
const PROVIDER_ID: &str = "COINGECKO";

const PUBLIC_BASE_URL: &str = "https://api.coingecko.com/api/v3";
const PRO_BASE_URL: &str = "https://pro-api.coingecko.com/api/v3";
const API_KEY_HEADER: &str = "x-cg-pro-api-key";

/// Default HTTP request timeout
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// One entry of the `simple/price` response, keyed by token id.
#[derive(Debug, Deserialize)]
struct SimplePriceEntry {
    usd: Option<f64>,
    usd_24h_change: Option<f64>,
    usd_market_cap: Option<f64>,
}

/// CoinGecko price provider.
///
/// # Example
///
/// ```ignore
/// use lootos_market_data::CoinGeckoProvider;
///
/// let provider = CoinGeckoProvider::new(Some("your_api_key".to_string()));
/// ```
pub struct CoinGeckoProvider {
    client: Client,
    api_key: Option<String>,
    base_url: String,
}

impl CoinGeckoProvider {
    /// Create a provider; the API key selects the pro endpoint.
    pub fn new(api_key: Option<String>) -> Self {
        let api_key = api_key.filter(|k| !k.trim().is_empty());
        let base_url = if api_key.is_some() {
            PRO_BASE_URL
        } else {
            PUBLIC_BASE_URL
        };
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            api_key,
            base_url: base_url.to_string(),
        }
    }

    /// Point the provider at a different base URL (proxies, test servers).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn fetch_simple_prices(
        &self,
        token_ids: &[String],
    ) -> Result<HashMap<String, SimplePriceEntry>, MarketDataError> {
        let url = format!("{}/simple/price", self.base_url);
        let ids = token_ids.join(",");
        debug!("CoinGecko simple/price request for [{}]", ids);

        let mut request = self.client.get(&url).query(&[
            ("ids", ids.as_str()),
            ("vs_currencies", "usd"),
            ("include_24hr_change", "true"),
            ("include_market_cap", "true"),
        ]);
        if let Some(key) = &self.api_key {
            request = request.header(API_KEY_HEADER, key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: format!("HTTP {}", status.as_u16()),
            });
        }

        response
            .json()
            .await
            .map_err(|e| MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: e.to_string(),
            })
    }
}

/// Convert a raw response entry into a [`TokenPrice`].
///
/// Entries without a USD price are treated as unknown tokens.
fn to_token_price(token_id: &str, entry: &SimplePriceEntry) -> Option<TokenPrice> {
    let usd = entry.usd.and_then(Decimal::from_f64)?;
    let market_cap = entry
        .usd_market_cap
        .and_then(Decimal::from_f64)
        .map(|d| d.round_dp(0));
    Some(
        TokenPrice::new(token_id, usd, PROVIDER_ID)
            .with_change(entry.usd_24h_change)
            .with_market_cap(market_cap),
    )
}

#[async_trait]
impl PriceProvider for CoinGeckoProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn get_price(&self, token_id: &str) -> Result<TokenPrice, MarketDataError> {
        let ids = [token_id.to_string()];
        let body = self.fetch_simple_prices(&ids).await?;
        body.get(token_id)
            .and_then(|entry| to_token_price(token_id, entry))
            .ok_or_else(|| MarketDataError::TokenNotFound(token_id.to_string()))
    }

    async fn get_prices(&self, token_ids: &[String]) -> Result<Vec<TokenPrice>, MarketDataError> {
        if token_ids.is_empty() {
            return Ok(Vec::new());
        }
        let body = self.fetch_simple_prices(token_ids).await?;
        Ok(token_ids
            .iter()
            .filter_map(|id| body.get(id).and_then(|entry| to_token_price(id, entry)))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_public_endpoint_without_key() {
        let provider = CoinGeckoProvider::new(None);
        assert!(!provider.has_api_key());
        assert_eq!(provider.base_url(), PUBLIC_BASE_URL);
    }

    #[test]
    fn test_blank_key_uses_public_endpoint() {
        let provider = CoinGeckoProvider::new(Some("  ".to_string()));
        assert!(!provider.has_api_key());
        assert_eq!(provider.base_url(), PUBLIC_BASE_URL);
    }

    #[test]
    fn test_pro_endpoint_with_key() {
        let provider = CoinGeckoProvider::new(Some("cg-key".to_string()));
        assert!(provider.has_api_key());
        assert_eq!(provider.base_url(), PRO_BASE_URL);
    }

    #[test]
    fn test_base_url_override_trims_slash() {
        let provider = CoinGeckoProvider::new(None).with_base_url("http://localhost:9000/");
        assert_eq!(provider.base_url(), "http://localhost:9000");
    }

    #[test]
    fn test_deserialize_simple_price() {
        let json = r#"{
            "ethereum": {"usd": 2450.5, "usd_24h_change": -1.25, "usd_market_cap": 294000000000.4},
            "bitcoin": {"usd": 43500}
        }"#;
        let body: HashMap<String, SimplePriceEntry> = serde_json::from_str(json).unwrap();

        let eth = to_token_price("ethereum", &body["ethereum"]).unwrap();
        assert_eq!(eth.usd, dec!(2450.5));
        assert_eq!(eth.usd_24h_change, Some(-1.25));
        assert_eq!(eth.usd_market_cap, Some(dec!(294000000000)));
        assert_eq!(eth.source, "COINGECKO");

        let btc = to_token_price("bitcoin", &body["bitcoin"]).unwrap();
        assert_eq!(btc.usd, dec!(43500));
        assert_eq!(btc.usd_24h_change, None);
        assert_eq!(btc.usd_market_cap, None);
    }

    #[test]
    fn test_entry_without_usd_is_unknown() {
        let json = r#"{"mystery": {"eur": 1.0}}"#;
        let body: HashMap<String, SimplePriceEntry> = serde_json::from_str(json).unwrap();
        assert!(to_token_price("mystery", &body["mystery"]).is_none());
    }
}
