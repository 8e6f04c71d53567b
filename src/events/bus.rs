//! Event delivery.
//!
//! The `EventBus` keeps the full ordered history (an `im::Vector`, so
//! handing a copy to a caller is O(1)) and forwards each event to every
//! subscribed sink the moment it is published, before the engine asks the
//! next question.

use im::Vector;

use crate::core::GameState;

use super::event::GameEvent;

/// Receives events as they happen.
pub trait EventSink {
    /// Called once per event, in publication order. `state` reflects the
    /// table right after the event.
    fn on_event(&mut self, event: &GameEvent, state: &GameState);
}

/// Ordered event history plus subscribers.
#[derive(Default)]
pub struct EventBus {
    history: Vector<GameEvent>,
    sinks: Vec<Box<dyn EventSink>>,
}

impl EventBus {
    /// Create a bus with no subscribers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a subscriber.
    pub fn subscribe(&mut self, sink: Box<dyn EventSink>) {
        self.sinks.push(sink);
    }

    /// Record an event and deliver it to every subscriber.
    pub fn publish(&mut self, event: GameEvent, state: &GameState) {
        tracing::trace!(?event, "event");
        for sink in &mut self.sinks {
            sink.on_event(&event, state);
        }
        self.history.push_back(event);
    }

    /// Everything published so far.
    #[must_use]
    pub fn history(&self) -> &Vector<GameEvent> {
        &self.history
    }

    /// Number of events published.
    #[must_use]
    pub fn len(&self) -> usize {
        self.history.len()
    }

    /// Whether nothing has been published.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("events", &self.history.len())
            .field("sinks", &self.sinks.len())
            .finish()
    }
}
