use std::sync::Arc;

use chrono::{DateTime, Utc};
use lootos_core::{
    events::{BackendNotifier, CompositeEventSink, TradingEventSink},
    gas::GasMonitor,
    portfolio::PortfolioService,
    prices::PriceService,
    simulation::SharedRng,
    trading::{SimulatedExecutor, TradingState},
    wallet::WalletService,
    worker::{Worker, WorkerDeps},
};
use lootos_market_data::{ChainClient, CoinGeckoProvider, JsonRpcClient, PriceCache, PriceProvider};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::events::{EventBus, EventBusSink};

const EVENT_BUS_CAPACITY: usize = 256;

pub struct AppState {
    pub config: Config,
    pub prices: Arc<PriceService>,
    pub trading: Arc<TradingState>,
    pub portfolio: Arc<PortfolioService>,
    pub gas: Arc<GasMonitor>,
    pub wallet: Arc<WalletService>,
    pub worker: Arc<Worker>,
    pub chain: Option<Arc<dyn ChainClient>>,
    pub event_bus: EventBus,
    pub started_at: DateTime<Utc>,
}

/// Upstream clients used to assemble the state. Tests pass mocks here.
pub struct Upstreams {
    pub price_provider: Arc<dyn PriceProvider>,
    pub chain: Option<Arc<dyn ChainClient>>,
    pub rng: SharedRng,
}

pub fn init_tracing() {
    let log_format = std::env::var("LOOTOS_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let mut coingecko = CoinGeckoProvider::new(config.coingecko_api_key.clone());
    if let Some(base_url) = &config.coingecko_base_url {
        coingecko = coingecko.with_base_url(base_url.clone());
    }
    tracing::info!(
        "Price provider: CoinGecko at {} ({})",
        coingecko.base_url(),
        if coingecko.has_api_key() { "pro" } else { "public" }
    );

    let chain = config.ethereum_rpc_url.as_ref().map(|url| {
        tracing::info!("Ethereum RPC configured");
        Arc::new(JsonRpcClient::new(url.clone())) as Arc<dyn ChainClient>
    });
    if chain.is_none() {
        tracing::info!("ETHEREUM_RPC_URL not set: gas prices are simulated, balances unavailable");
    }

    build_state_with(
        config,
        Upstreams {
            price_provider: Arc::new(coingecko),
            chain,
            rng: SharedRng::from_entropy(),
        },
    )
    .await
}

pub async fn build_state_with(
    config: &Config,
    upstreams: Upstreams,
) -> anyhow::Result<Arc<AppState>> {
    let Upstreams {
        price_provider,
        chain,
        rng,
    } = upstreams;

    let cache = PriceCache::new(config.price_cache_ttl);
    let prices = Arc::new(PriceService::new(price_provider, cache));
    let trading = Arc::new(TradingState::new());
    let portfolio = Arc::new(PortfolioService::new(prices.clone(), trading.clone()));
    let gas = Arc::new(GasMonitor::new(chain.clone(), rng.clone()));
    let wallet = Arc::new(WalletService::new(chain.clone(), prices.clone()));
    let event_bus = EventBus::new(EVENT_BUS_CAPACITY);

    let bus_sink: Arc<dyn TradingEventSink> = Arc::new(EventBusSink::new(event_bus.clone()));
    let mut sinks = CompositeEventSink::new(vec![bus_sink]);
    if let Some(backend_url) = &config.backend_url {
        tracing::info!("Forwarding trading events to {}", backend_url);
        sinks.push(Arc::new(BackendNotifier::new(backend_url.clone())));
    }
    let events: Arc<dyn TradingEventSink> = Arc::new(sinks);

    let worker = Arc::new(Worker::new(WorkerDeps {
        worker_id: config.worker_id.clone(),
        prices: prices.clone(),
        state: trading.clone(),
        gas: gas.clone(),
        portfolio: portfolio.clone(),
        executor: Arc::new(SimulatedExecutor::new(rng.clone())),
        events,
        rng,
    }));

    Ok(Arc::new(AppState {
        config: config.clone(),
        prices,
        trading,
        portfolio,
        gas,
        wallet,
        worker,
        chain,
        event_bus,
        started_at: Utc::now(),
    }))
}
