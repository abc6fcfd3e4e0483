use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use super::trading_model::{Confidence, Opportunity, OpportunityStatus};
use crate::constants::{PRIMARY_ROUTE_NOTIONAL_USD, SECONDARY_ROUTE_NOTIONAL_USD};
use crate::simulation::SharedRng;

/// Venue whose price comes from the price provider.
pub const REFERENCE_VENUE: &str = "coingecko";

/// A token pair watched for a price gap between the reference venue and a
/// simulated counter venue.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArbitrageRoute {
    /// Price provider id of the base token
    pub token_id: &'static str,
    pub pair: &'static str,
    pub counter_venue: &'static str,
    /// Counter venue price is drawn within `reference * (1 ± price_band)`
    pub price_band: f64,
    /// Spreads at or below this are ignored
    pub min_spread: f64,
    pub notional: f64,
    pub ttl_minutes: i64,
    /// Spreads above this are rated high confidence; `None` means always medium
    pub high_confidence_spread: Option<f64>,
}

pub const DEFAULT_ROUTES: [ArbitrageRoute; 3] = [
    ArbitrageRoute {
        token_id: "ethereum",
        pair: "ETH/USDC",
        counter_venue: "1inch",
        price_band: 0.01,
        min_spread: 0.005,
        notional: PRIMARY_ROUTE_NOTIONAL_USD,
        ttl_minutes: 5,
        high_confidence_spread: Some(0.015),
    },
    ArbitrageRoute {
        token_id: "bitcoin",
        pair: "BTC/USDC",
        counter_venue: "dex",
        price_band: 0.02,
        min_spread: 0.008,
        notional: SECONDARY_ROUTE_NOTIONAL_USD,
        ttl_minutes: 3,
        high_confidence_spread: None,
    },
    ArbitrageRoute {
        token_id: "solana",
        pair: "SOL/USDC",
        counter_venue: "dex",
        price_band: 0.02,
        min_spread: 0.008,
        notional: SECONDARY_ROUTE_NOTIONAL_USD,
        ttl_minutes: 3,
        high_confidence_spread: None,
    },
];

impl ArbitrageRoute {
    /// Simulated counter venue quote around the reference price.
    pub fn draw_counter_price(&self, reference: f64, rng: &SharedRng) -> f64 {
        reference * (1.0 + rng.uniform(-self.price_band, self.price_band))
    }

    fn confidence(&self, spread: f64) -> Confidence {
        match self.high_confidence_spread {
            Some(threshold) if spread > threshold => Confidence::High,
            _ => Confidence::Medium,
        }
    }

    fn base_symbol(&self) -> &'static str {
        self.pair.split('/').next().unwrap_or(self.pair)
    }
}

/// Relative gap between two prices: `|a - b| / min(a, b)`.
pub fn spread(a: f64, b: f64) -> f64 {
    let low = a.min(b);
    if low <= 0.0 || !low.is_finite() {
        return 0.0;
    }
    (a - b).abs() / low
}

/// Build an opportunity when the two quotes differ by more than the
/// route's threshold. Buys on the cheaper venue, sells on the dearer one.
pub fn evaluate_route(
    route: &ArbitrageRoute,
    reference_price: f64,
    counter_price: f64,
    gas_cost: f64,
    now: DateTime<Utc>,
) -> Option<Opportunity> {
    let gap = spread(reference_price, counter_price);
    if gap <= route.min_spread {
        return None;
    }

    let (buy_exchange, buy_price, sell_exchange, sell_price) = if reference_price <= counter_price
    {
        (REFERENCE_VENUE, reference_price, route.counter_venue, counter_price)
    } else {
        (route.counter_venue, counter_price, REFERENCE_VENUE, reference_price)
    };

    Some(Opportunity {
        id: format!(
            "arb_{}_{}",
            route.base_symbol().to_ascii_lowercase(),
            Uuid::new_v4().simple()
        ),
        token_pair: route.pair.to_string(),
        buy_exchange: buy_exchange.to_string(),
        sell_exchange: sell_exchange.to_string(),
        buy_price,
        sell_price,
        profit_potential: gap,
        estimated_profit: gap * route.notional,
        confidence: route.confidence(gap),
        gas_cost,
        expires_at: now + Duration::minutes(route.ttl_minutes),
        status: OpportunityStatus::Detected,
        created_at: now,
        executed_at: None,
        actual_profit: None,
        tx_hash: None,
        error: None,
    })
}
