//! Mock upstreams shared by the service tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{Duration, Utc};
use lootos_market_data::{ChainClient, MarketDataError, PriceProvider, TokenPrice};
use rust_decimal::Decimal;

use crate::trading::{
    Confidence, ExecutionOutcome, FlashLoanOpportunity, Opportunity, OpportunityStatus,
    TradeExecutor,
};

// =========================================================================
// Mock PriceProvider
// =========================================================================

#[derive(Clone, Default)]
pub struct MockPriceProvider {
    prices: Arc<Mutex<HashMap<String, Decimal>>>,
    calls: Arc<AtomicUsize>,
    failing: Arc<AtomicBool>,
}

impl MockPriceProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_prices(prices: &[(&str, Decimal)]) -> Self {
        let provider = Self::new();
        for (id, price) in prices {
            provider.set_price(id, *price);
        }
        provider
    }

    pub fn set_price(&self, token_id: &str, price: Decimal) {
        self.prices
            .lock()
            .unwrap()
            .insert(token_id.to_string(), price);
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PriceProvider for MockPriceProvider {
    fn id(&self) -> &'static str {
        "MOCK"
    }

    async fn get_price(&self, token_id: &str) -> Result<TokenPrice, MarketDataError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            return Err(MarketDataError::ProviderError {
                provider: "MOCK".to_string(),
                message: "upstream unavailable".to_string(),
            });
        }
        self.prices
            .lock()
            .unwrap()
            .get(token_id)
            .map(|usd| TokenPrice::new(token_id, *usd, "MOCK").with_change(Some(2.0)))
            .ok_or_else(|| MarketDataError::TokenNotFound(token_id.to_string()))
    }
}

// =========================================================================
// Mock ChainClient
// =========================================================================

#[derive(Clone, Default)]
pub struct MockChainClient {
    gas_price_wei: Arc<Mutex<Option<u128>>>,
    balances: Arc<Mutex<HashMap<String, u128>>>,
    block: u64,
}

impl MockChainClient {
    pub fn new() -> Self {
        Self {
            block: 19_000_000,
            ..Self::default()
        }
    }

    pub fn with_gas_price(self, wei: u128) -> Self {
        *self.gas_price_wei.lock().unwrap() = Some(wei);
        self
    }

    pub fn with_balance(self, address: &str, wei: u128) -> Self {
        self.balances
            .lock()
            .unwrap()
            .insert(address.to_ascii_lowercase(), wei);
        self
    }
}

#[async_trait]
impl ChainClient for MockChainClient {
    async fn gas_price_wei(&self) -> Result<u128, MarketDataError> {
        self.gas_price_wei
            .lock()
            .unwrap()
            .ok_or_else(|| MarketDataError::Rpc {
                method: "eth_gasPrice".to_string(),
                message: "node offline".to_string(),
            })
    }

    async fn balance_wei(&self, address: &str) -> Result<u128, MarketDataError> {
        let address = lootos_market_data::validate_address(address)?;
        Ok(self
            .balances
            .lock()
            .unwrap()
            .get(&address)
            .copied()
            .unwrap_or(0))
    }

    async fn block_number(&self) -> Result<u64, MarketDataError> {
        Ok(self.block)
    }
}

// =========================================================================
// Scripted TradeExecutor
// =========================================================================

/// Executor that always succeeds with `estimated * multiplier`, or always
/// fails with a fixed reason.
#[derive(Clone)]
pub struct ScriptedExecutor {
    profit_multiplier: Option<f64>,
    calls: Arc<AtomicUsize>,
}

impl ScriptedExecutor {
    pub fn succeeding(profit_multiplier: f64) -> Self {
        Self {
            profit_multiplier: Some(profit_multiplier),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn failing() -> Self {
        Self {
            profit_multiplier: None,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn outcome(&self, estimated_profit: f64) -> ExecutionOutcome {
        let n = self.calls.fetch_add(1, Ordering::SeqCst);
        match self.profit_multiplier {
            Some(multiplier) => ExecutionOutcome::Success {
                profit: estimated_profit * multiplier,
                tx_hash: format!("0x{:064x}", n),
                gas_used: None,
            },
            None => ExecutionOutcome::Failure {
                error: "Insufficient liquidity".to_string(),
            },
        }
    }
}

impl TradeExecutor for ScriptedExecutor {
    fn execute_arbitrage(&self, opportunity: &Opportunity) -> ExecutionOutcome {
        self.outcome(opportunity.estimated_profit)
    }

    fn execute_flash_loan(&self, opportunity: &FlashLoanOpportunity) -> ExecutionOutcome {
        self.outcome(opportunity.estimated_profit)
    }
}

// =========================================================================
// Fixtures
// =========================================================================

/// A detected ETH/USDC-style opportunity created now.
pub fn detected_opportunity(id: &str, pair: &str, spread: f64) -> Opportunity {
    let now = Utc::now();
    Opportunity {
        id: id.to_string(),
        token_pair: pair.to_string(),
        buy_exchange: "coingecko".to_string(),
        sell_exchange: "dex".to_string(),
        buy_price: 100.0,
        sell_price: 100.0 * (1.0 + spread),
        profit_potential: spread,
        estimated_profit: spread * 10_000.0,
        confidence: Confidence::Medium,
        gas_cost: 0.001,
        expires_at: now + Duration::minutes(5),
        status: OpportunityStatus::Detected,
        created_at: now,
        executed_at: None,
        actual_profit: None,
        tx_hash: None,
        error: None,
    }
}
