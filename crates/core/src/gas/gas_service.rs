use std::sync::Arc;

use log::{debug, warn};
use lootos_market_data::{wei_to_gwei, ChainClient, GasPrices, GasSource};

use crate::constants::{
    DEFAULT_GAS_COST_ETH, SIMULATED_GAS_MAX_GWEI, SIMULATED_GAS_MIN_GWEI, TRANSFER_GAS_UNITS,
};
use crate::simulation::SharedRng;

/// Reads gas prices from the chain when an RPC endpoint is configured,
/// otherwise simulates them.
pub struct GasMonitor {
    chain: Option<Arc<dyn ChainClient>>,
    rng: SharedRng,
}

impl GasMonitor {
    pub fn new(chain: Option<Arc<dyn ChainClient>>, rng: SharedRng) -> Self {
        Self { chain, rng }
    }

    pub fn has_chain(&self) -> bool {
        self.chain.is_some()
    }

    /// Current gas prices. RPC failures fall back to simulated prices, so
    /// this never fails.
    pub async fn current(&self) -> GasPrices {
        if let Some(chain) = &self.chain {
            match chain.gas_price_wei().await {
                Ok(wei) => {
                    let gwei = wei_to_gwei(wei);
                    debug!("Network gas price: {:.2} gwei", gwei);
                    return GasPrices::from_standard(gwei, GasSource::EthereumNetwork);
                }
                Err(e) => warn!("Gas price RPC failed, simulating instead: {}", e),
            }
        }
        self.simulated()
    }

    fn simulated(&self) -> GasPrices {
        let standard = self
            .rng
            .uniform(SIMULATED_GAS_MIN_GWEI, SIMULATED_GAS_MAX_GWEI);
        GasPrices::from_standard(standard, GasSource::Simulated).rounded()
    }
}

/// Cost of a plain transfer in ETH at the standard gas price.
pub fn gas_cost_eth(gas: Option<&GasPrices>) -> f64 {
    match gas {
        Some(gas) => gas.standard * TRANSFER_GAS_UNITS / 1e9,
        None => DEFAULT_GAS_COST_ETH,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::MockChainClient;

    #[tokio::test]
    async fn test_network_gas_price() {
        let chain = MockChainClient::new().with_gas_price(30_000_000_000);
        let monitor = GasMonitor::new(Some(Arc::new(chain)), SharedRng::seeded(1));
        let gas = monitor.current().await;
        assert_eq!(gas.source, GasSource::EthereumNetwork);
        assert!((gas.standard - 30.0).abs() < 1e-9);
        assert!((gas.instant - 45.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_simulated_without_chain() {
        let monitor = GasMonitor::new(None, SharedRng::seeded(2));
        let gas = monitor.current().await;
        assert_eq!(gas.source, GasSource::Simulated);
        assert!((20.0..=50.0).contains(&gas.standard));
        assert_eq!(gas.standard, (gas.standard * 10.0).round() / 10.0);
    }

    #[tokio::test]
    async fn test_rpc_failure_falls_back_to_simulation() {
        let monitor = GasMonitor::new(Some(Arc::new(MockChainClient::new())), SharedRng::seeded(3));
        assert_eq!(monitor.current().await.source, GasSource::Simulated);
    }

    #[test]
    fn test_gas_cost() {
        assert_eq!(gas_cost_eth(None), 0.001);
        let gas = GasPrices::from_standard(30.0, GasSource::Simulated);
        assert!((gas_cost_eth(Some(&gas)) - 0.00063).abs() < 1e-12);
    }
}
