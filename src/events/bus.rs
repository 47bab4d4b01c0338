//! # Event bus for broadcasting effect lifecycle events.
//!
//! [`Bus`] is a thin wrapper around [`tokio::sync::broadcast`]. The registry and the
//! runtime publish; the runtime's listener fans events out to the
//! [`SubscriberSet`](crate::SubscriberSet), and tests may subscribe directly.
//!
//! ```text
//! Publishers:                          Receivers:
//!   EffectRegistry ──┐
//!   expiry callback ─┼──► Bus ──┬──► runtime listener ──► SubscriberSet
//!   Glowvisor ───────┘          └──► ad-hoc receivers (tests, hosts)
//! ```
//!
//! ## Rules
//! - `publish()` never blocks and never fails; with no receivers the event is dropped.
//! - One shared ring buffer; slow receivers see `RecvError::Lagged(n)`.
//! - No persistence.

use tokio::sync::broadcast;

use super::event::Event;

/// Broadcast channel for runtime events.
///
/// Cheap to clone (internally an `Arc`-backed sender).
#[derive(Clone, Debug)]
pub struct Bus {
    tx: broadcast::Sender<Event>,
}

impl Bus {
    /// Creates a new bus with the given channel capacity (minimum 1).
    pub fn new(capacity: usize) -> Self {
        let (tx, _rx) = broadcast::channel::<Event>(capacity.max(1));
        Self { tx }
    }

    /// Publishes an event to all active receivers (fire-and-forget).
    pub fn publish(&self, ev: Event) {
        let _ = self.tx.send(ev);
    }

    /// Creates a new receiver that observes events sent after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.tx.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EventKind;

    #[tokio::test]
    async fn test_publish_without_receivers_is_silent() {
        let bus = Bus::new(0);
        bus.publish(Event::new(EventKind::ShutdownRequested));

        let mut rx = bus.subscribe();
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_receiver_sees_later_events_only() {
        let bus = Bus::new(8);
        bus.publish(Event::new(EventKind::ShutdownRequested));
        let mut rx = bus.subscribe();
        bus.publish(Event::new(EventKind::RegistryDrained).with_count(2));

        let ev = rx.recv().await.expect("event");
        assert_eq!(ev.kind, EventKind::RegistryDrained);
        assert_eq!(ev.count, Some(2));
    }
}
