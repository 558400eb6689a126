//! Event Log Adapter
//!
//! Implements `EventPublisher` port by appending to an in-memory log.

use crate::domain::RelayEvent;
use crate::ports::outbound::EventPublisher;
use parking_lot::RwLock;
use tracing::debug;

/// In-memory audit log.
#[derive(Default)]
pub struct InMemoryEventLog {
    events: RwLock<Vec<RelayEvent>>,
}

impl InMemoryEventLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// All events in emission order.
    pub fn events(&self) -> Vec<RelayEvent> {
        self.events.read().clone()
    }

    /// Number of `MessageSent` events.
    pub fn sent_count(&self) -> usize {
        self.events
            .read()
            .iter()
            .filter(|e| matches!(e, RelayEvent::MessageSent { .. }))
            .count()
    }

    /// Number of `MessageReceived` events.
    pub fn received_count(&self) -> usize {
        self.events
            .read()
            .iter()
            .filter(|e| matches!(e, RelayEvent::MessageReceived { .. }))
            .count()
    }
}

impl EventPublisher for InMemoryEventLog {
    fn publish(&self, event: RelayEvent) {
        debug!(?event, "[qc-15] Event published");
        self.events.write().push(event);
    }
}
