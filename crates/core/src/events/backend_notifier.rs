//! Mirrors opportunities and trades to an external backend.

use std::time::Duration;

use log::{debug, warn};
use serde::Serialize;

use super::{TradingEvent, TradingEventSink};

const NOTIFY_TIMEOUT: Duration = Duration::from_secs(5);

/// POSTs detected opportunities to `{base}/api/internal/opportunity` and
/// executed trades to `{base}/api/internal/trade`.
///
/// Delivery is best effort: requests run on a spawned task and failures
/// are only logged.
#[derive(Clone)]
pub struct BackendNotifier {
    client: reqwest::Client,
    base_url: String,
}

impl BackendNotifier {
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(NOTIFY_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Endpoint an event is mirrored to, if any.
    pub fn endpoint_for(&self, event: &TradingEvent) -> Option<String> {
        let path = match event {
            TradingEvent::OpportunityDetected { .. } => "opportunity",
            TradingEvent::TradeExecuted { .. } | TradingEvent::FlashLoanExecuted { .. } => "trade",
            TradingEvent::TaskCompleted { .. } => return None,
        };
        Some(format!("{}/api/internal/{}", self.base_url, path))
    }

    fn post<T: Serialize + Send + Sync + 'static>(&self, url: String, body: T) {
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            warn!("No async runtime available, dropping notification to {}", url);
            return;
        };
        let client = self.client.clone();
        runtime.spawn(async move {
            match client.post(&url).json(&body).send().await {
                Ok(response) if response.status().is_success() => {
                    debug!("Notified backend at {}", url);
                }
                Ok(response) => {
                    warn!("Backend at {} answered {}", url, response.status());
                }
                Err(e) => warn!("Failed to notify backend at {}: {}", url, e),
            }
        });
    }
}

impl TradingEventSink for BackendNotifier {
    fn emit(&self, event: TradingEvent) {
        let Some(url) = self.endpoint_for(&event) else {
            return;
        };
        match event {
            TradingEvent::OpportunityDetected { opportunity } => self.post(url, opportunity),
            TradingEvent::TradeExecuted { trade } | TradingEvent::FlashLoanExecuted { trade } => {
                self.post(url, trade)
            }
            TradingEvent::TaskCompleted { .. } => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trading::{TradeKind, TradeRecord};
    use chrono::Utc;

    fn trade() -> TradeRecord {
        TradeRecord {
            id: "t".to_string(),
            kind: TradeKind::FlashLoan,
            token_pair: "SOL/USDC".to_string(),
            buy_exchange: None,
            sell_exchange: None,
            actual_profit: 1.0,
            tx_hash: "0x02".to_string(),
            executed_at: Utc::now(),
        }
    }

    #[test]
    fn test_endpoints() {
        let notifier = BackendNotifier::new("http://backend:8000/");
        assert_eq!(notifier.base_url(), "http://backend:8000");
        assert_eq!(
            notifier
                .endpoint_for(&TradingEvent::flash_loan_executed(trade()))
                .as_deref(),
            Some("http://backend:8000/api/internal/trade")
        );
    }

    #[test]
    fn test_emit_without_runtime_is_dropped() {
        let notifier = BackendNotifier::new("http://127.0.0.1:9");
        notifier.emit(TradingEvent::trade_executed(trade()));
    }

    #[tokio::test]
    async fn test_emit_to_unreachable_backend_does_not_fail() {
        let notifier = BackendNotifier::new("http://127.0.0.1:9");
        notifier.emit(TradingEvent::trade_executed(trade()));
    }
}
