use lootos_core::events::{TradingEvent, TradingEventSink};
use serde_json::Value;
use tokio::sync::broadcast;

/// Serializable envelope that carries event names and optional payloads.
#[derive(Clone, Debug)]
pub struct ServerEvent {
    pub name: &'static str,
    pub payload: Option<Value>,
}

impl ServerEvent {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            payload: None,
        }
    }

    pub fn with_payload(name: &'static str, payload: Value) -> Self {
        Self {
            name,
            payload: Some(payload),
        }
    }
}

/// Lightweight broadcast bus that fans out events to any connected clients.
#[derive(Clone)]
pub struct EventBus {
    sender: broadcast::Sender<ServerEvent>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _receiver) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ServerEvent> {
        self.sender.subscribe()
    }

    pub fn publish(&self, event: ServerEvent) {
        // Lagging listeners are ignored to avoid blocking producers.
        let _ = self.sender.send(event);
    }
}

/// Forwards trading events from the worker onto the SSE bus.
pub struct EventBusSink {
    bus: EventBus,
}

impl EventBusSink {
    pub fn new(bus: EventBus) -> Self {
        Self { bus }
    }
}

impl TradingEventSink for EventBusSink {
    fn emit(&self, event: TradingEvent) {
        let name = event.name();
        match serde_json::to_value(&event) {
            Ok(payload) => self.bus.publish(ServerEvent::with_payload(name, payload)),
            Err(err) => {
                tracing::error!("Failed to serialize {} event: {}", name, err);
                self.bus.publish(ServerEvent::new(name));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lootos_core::worker::{TaskDetails, TaskReport, WorkerTask};

    #[tokio::test]
    async fn test_sink_publishes_named_events() {
        let bus = EventBus::new(8);
        let mut rx = bus.subscribe();
        let sink = EventBusSink::new(bus);

        let report = TaskReport::success(
            WorkerTask::MonitorGasPrices,
            TaskDetails::NothingToDo {
                message: "idle".to_string(),
            },
        );
        sink.emit(TradingEvent::task_completed(report));

        let event = rx.recv().await.unwrap();
        assert_eq!(event.name, "task_completed");
        let payload = event.payload.unwrap();
        assert_eq!(payload["type"], "task_completed");
        assert_eq!(payload["report"]["task"], "monitor_gas_prices");
        assert!(payload["report"]["timestamp"].as_str().is_some());
    }

    #[test]
    fn test_publish_without_listeners_is_ignored() {
        let bus = EventBus::new(1);
        bus.publish(ServerEvent::new("task_completed"));
    }
}
