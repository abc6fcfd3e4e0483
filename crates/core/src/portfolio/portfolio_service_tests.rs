use std::sync::Arc;

use chrono::{Duration, Utc};
use lootos_market_data::PriceCache;
use rust_decimal_macros::dec;

use crate::portfolio::{success_rate, PortfolioService};
use crate::prices::PriceService;
use crate::test_support::MockPriceProvider;
use crate::trading::{TradeKind, TradeRecord, TradingState};

fn trade(id: &str, profit: f64, hours_ago: i64) -> TradeRecord {
    TradeRecord {
        id: id.to_string(),
        kind: TradeKind::Arbitrage,
        token_pair: "ETH/USDC".to_string(),
        buy_exchange: Some("coingecko".to_string()),
        sell_exchange: Some("1inch".to_string()),
        actual_profit: profit,
        tx_hash: "0x00".to_string(),
        executed_at: Utc::now() - Duration::hours(hours_ago),
    }
}

fn service(provider: MockPriceProvider, state: Arc<TradingState>) -> PortfolioService {
    let prices = PriceService::new(Arc::new(provider), PriceCache::default());
    PortfolioService::new(Arc::new(prices), state)
}

#[test]
fn test_success_rate_defaults_without_attempts() {
    assert_eq!(success_rate(0, 0), 85.0);
    assert_eq!(success_rate(3, 4), 75.0);
}

#[tokio::test]
async fn test_refresh_values_holdings_and_profit() {
    let provider = MockPriceProvider::with_prices(&[
        ("ethereum", dec!(2000)),
        ("bitcoin", dec!(40000)),
        ("solana", dec!(100)),
    ]);
    let state = Arc::new(TradingState::new());
    state.record_trade(trade("a", 120.0, 1));
    state.record_trade(trade("b", 80.0, 30));
    state.record_failed_execution();

    let snapshot = service(provider, state.clone()).refresh().await;

    assert_eq!(snapshot.holdings.len(), 3);
    assert_eq!(snapshot.holdings[0].symbol, "ETH");
    assert_eq!(snapshot.holdings[0].value, 5000.0);
    assert!((snapshot.holdings_value() - 10_500.0).abs() < 1e-6);
    assert_eq!(snapshot.total_profit, 200.0);
    assert_eq!(snapshot.daily_profit, 120.0);
    assert_eq!(snapshot.total_value, 15_200.0);
    assert_eq!(snapshot.performance.total_trades, 2);
    assert_eq!(snapshot.performance.failed_trades, 1);
    assert!((snapshot.performance.success_rate - 200.0 / 3.0).abs() < 1e-9);
    assert_eq!(state.portfolio(), Some(snapshot));
}

#[tokio::test]
async fn test_holdings_use_fallback_prices_when_provider_fails() {
    let provider = MockPriceProvider::new();
    provider.set_failing(true);
    let snapshot = service(provider, Arc::new(TradingState::new())).refresh().await;

    assert_eq!(snapshot.holdings.len(), 3);
    assert_eq!(snapshot.holdings[0].price, 2450.0);
    assert_eq!(snapshot.holdings[0].price_source, "FALLBACK");
    assert_eq!(snapshot.performance.success_rate, 85.0);
    assert_eq!(snapshot.total_value, 15_000.0);
}

#[tokio::test]
async fn test_overview_allocation_and_weighted_change() {
    let provider = MockPriceProvider::with_prices(&[
        ("ethereum", dec!(2000)),
        ("bitcoin", dec!(40000)),
        ("solana", dec!(100)),
    ]);
    let overview = service(provider, Arc::new(TradingState::new()))
        .overview()
        .await;

    assert!((overview.holdings_value - 10_500.0).abs() < 1e-6);
    let total_pct: f64 = overview.allocation.iter().map(|a| a.percentage).sum();
    assert!((total_pct - 100.0).abs() < 1e-9);
    // Every mock price reports +2 %.
    assert!((overview.change_24h - 2.0).abs() < 1e-9);
    assert_eq!(overview.active_opportunities, 0);
}

#[tokio::test]
async fn test_snapshot_reuses_stored_value() {
    let provider = MockPriceProvider::with_prices(&[("ethereum", dec!(2000))]);
    let state = Arc::new(TradingState::new());
    let portfolio = service(provider.clone(), state);
    let first = portfolio.snapshot().await;
    let calls = provider.calls();
    let second = portfolio.snapshot().await;
    assert_eq!(first, second);
    assert_eq!(provider.calls(), calls);
}
