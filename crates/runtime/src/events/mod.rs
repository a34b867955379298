//! Topic-based event bus for encounter events.
//!
//! The engine's log is the source of truth; the bus only fans log entries out
//! to async consumers as the runner observes them.

mod bus;

pub use bus::{EventBus, Topic};
