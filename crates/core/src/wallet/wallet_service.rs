use std::sync::Arc;

use chrono::Utc;
use log::{debug, warn};
use lootos_market_data::{validate_address, wei_to_eth, ChainClient, MarketDataError};
use rust_decimal::Decimal;

use super::wallet_model::{
    ConnectWalletRequest, DisconnectWalletRequest, WalletBalance, WalletConnection,
};
use crate::constants::DEFAULT_CHAIN_ID;
use crate::errors::{Error, Result, ValidationError};
use crate::prices::PriceService;

pub struct WalletService {
    chain: Option<Arc<dyn ChainClient>>,
    prices: Arc<PriceService>,
}

impl WalletService {
    pub fn new(chain: Option<Arc<dyn ChainClient>>, prices: Arc<PriceService>) -> Self {
        Self { chain, prices }
    }

    pub fn has_chain(&self) -> bool {
        self.chain.is_some()
    }

    pub fn connect(&self, request: ConnectWalletRequest) -> Result<WalletConnection> {
        let address = request
            .address
            .filter(|a| !a.trim().is_empty())
            .ok_or_else(|| {
                Error::Validation(ValidationError::MissingField("address".to_string()))
            })?;
        let address = validate_address(&address)?;
        debug!("Wallet connected: {}", address);
        Ok(WalletConnection {
            address: Some(address),
            chain_id: Some(request.chain_id.unwrap_or(DEFAULT_CHAIN_ID)),
            connected: true,
            timestamp: Utc::now(),
        })
    }

    pub fn disconnect(&self, request: DisconnectWalletRequest) -> WalletConnection {
        let address = request
            .address
            .filter(|a| !a.trim().is_empty())
            .map(|a| validate_address(&a).unwrap_or(a));
        WalletConnection {
            address,
            chain_id: None,
            connected: false,
            timestamp: Utc::now(),
        }
    }

    /// ETH balance of `address`, valued at the current ETH price.
    pub async fn balance(&self, address: &str) -> Result<WalletBalance> {
        let address = validate_address(address)?;
        let chain = self
            .chain
            .as_ref()
            .ok_or(Error::MarketData(MarketDataError::ChainUnavailable))?;

        let wei = chain.balance_wei(&address).await?;
        let balance_eth = wei_to_eth(wei).ok_or_else(|| {
            Error::Unexpected(format!("Balance of {} wei does not fit a decimal", wei))
        })?;
        let block_number = match chain.block_number().await {
            Ok(block) => Some(block),
            Err(e) => {
                warn!("Could not read block number: {}", e);
                None
            }
        };
        let eth_price = self
            .prices
            .price_or_fallback("ethereum")
            .await
            .map(|p| p.usd)
            .unwrap_or(Decimal::ZERO);

        Ok(WalletBalance {
            address,
            balance_wei: wei.to_string(),
            balance_eth,
            eth_price,
            balance_usd: (balance_eth * eth_price).round_dp(2),
            block_number,
        })
    }
}
