//! Trading event sink trait and implementations.

use std::sync::{Arc, Mutex};

use super::TradingEvent;

/// Receives trading events.
///
/// `emit()` must not block: implementations that do I/O hand the event
/// off to a background task. Failing to deliver an event never affects
/// the trading state.
pub trait TradingEventSink: Send + Sync {
    fn emit(&self, event: TradingEvent);

    fn emit_batch(&self, events: Vec<TradingEvent>) {
        for event in events {
            self.emit(event);
        }
    }
}

/// Discards every event.
#[derive(Clone, Default)]
pub struct NoOpEventSink;

impl TradingEventSink for NoOpEventSink {
    fn emit(&self, _event: TradingEvent) {}
}

/// Forwards each event to every inner sink.
#[derive(Clone, Default)]
pub struct CompositeEventSink {
    sinks: Vec<Arc<dyn TradingEventSink>>,
}

impl CompositeEventSink {
    pub fn new(sinks: Vec<Arc<dyn TradingEventSink>>) -> Self {
        Self { sinks }
    }

    pub fn push(&mut self, sink: Arc<dyn TradingEventSink>) {
        self.sinks.push(sink);
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }
}

impl TradingEventSink for CompositeEventSink {
    fn emit(&self, event: TradingEvent) {
        for sink in &self.sinks {
            sink.emit(event.clone());
        }
    }
}

/// Mock sink for testing - collects emitted events.
#[derive(Clone, Default)]
pub struct MockEventSink {
    events: Arc<Mutex<Vec<TradingEvent>>>,
}

impl MockEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<TradingEvent> {
        self.events.lock().unwrap().clone()
    }

    /// Names of the collected events, in emission order.
    pub fn names(&self) -> Vec<&'static str> {
        self.events.lock().unwrap().iter().map(|e| e.name()).collect()
    }

    pub fn clear(&self) {
        self.events.lock().unwrap().clear();
    }

    pub fn len(&self) -> usize {
        self.events.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.lock().unwrap().is_empty()
    }
}

impl TradingEventSink for MockEventSink {
    fn emit(&self, event: TradingEvent) {
        self.events.lock().unwrap().push(event);
    }
}
