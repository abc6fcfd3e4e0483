//! Trading events module.
//!
//! Worker tasks emit events through [`TradingEventSink`] after state
//! changes. The server forwards them to SSE subscribers; the optional
//! [`BackendNotifier`] mirrors opportunities and trades to another backend.

mod backend_notifier;
mod sink;
mod trading_event;

pub use backend_notifier::BackendNotifier;
pub use sink::*;
pub use trading_event::TradingEvent;
