//! Change notifications
//!
//! The store publishes one event per successful save. Delivery is
//! fire-and-forget: a bus with no subscribers drops the event.

use tokio::sync::broadcast;

use crate::model::Configuration;

/// Default buffer size of an [`EventBus`].
pub const DEFAULT_CAPACITY: usize = 1024;

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigEvent {
    /// The document was written to its location.
    Saved(Box<Configuration>),
}

impl ConfigEvent {
    pub fn topic(&self) -> &'static str {
        match self {
            Self::Saved(_) => "ConfigSaved",
        }
    }
}

/// Receiver of configuration events.
pub trait EventSink: Send + Sync {
    fn publish(&self, event: ConfigEvent);
}

/// Broadcast bus backed by `tokio::sync::broadcast`.
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<ConfigEvent>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ConfigEvent> {
        self.sender.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl EventSink for EventBus {
    fn publish(&self, event: ConfigEvent) {
        tracing::trace!(topic = event.topic(), subscribers = self.subscriber_count(), "publishing");
        // No subscribers is not an error.
        let _ = self.sender.send(event);
    }
}

/// Sink that drops every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn publish(&self, _event: ConfigEvent) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subscribers_receive_published_events() {
        let bus = EventBus::default();
        let mut rx = bus.subscribe();

        bus.publish(ConfigEvent::Saved(Box::default()));

        let event = rx.try_recv().unwrap();
        assert_eq!(event.topic(), "ConfigSaved");
    }

    #[test]
    fn publishing_without_subscribers_is_silent() {
        let bus = EventBus::new(4);
        assert_eq!(bus.subscriber_count(), 0);
        bus.publish(ConfigEvent::Saved(Box::default()));
    }

    #[test]
    fn clones_share_the_channel() {
        let bus = EventBus::default();
        let mut rx = bus.subscribe();
        bus.clone().publish(ConfigEvent::Saved(Box::default()));
        assert!(rx.try_recv().is_ok());
    }
}
