//! # Runtime events emitted by the effect registry and the runtime.
//!
//! The [`EventKind`] enum classifies event types across three categories:
//! - **Effect events**: grant, revoke, expiry and the no-op of a superseded timer
//! - **Failure events**: rejected grants and presenter failures
//! - **Runtime events**: shutdown, drain, subscriber health
//!
//! The [`Event`] struct carries the pair, color, duration and a free-form reason.
//!
//! ## Ordering guarantees
//! Each event has a globally unique sequence number (`seq`) that increases monotonically.
//! Use `seq` to restore the exact order when events are delivered out of order.
//!
//! ## Example
//! ```rust
//! use std::time::Duration;
//! use glowvisor::{Color, Event, EventKind, PairKey};
//!
//! let ev = Event::new(EventKind::EffectGranted)
//!     .with_pair(&PairKey::new("alex", "steve"))
//!     .with_color(Some(Color::Gold))
//!     .with_duration(Duration::from_secs(3));
//!
//! assert_eq!(ev.kind, EventKind::EffectGranted);
//! assert_eq!(ev.subject.as_ref().map(|s| s.as_str()), Some("steve"));
//! assert_eq!(ev.duration_ms, Some(3000));
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::time::{Duration, SystemTime};

use crate::core::{EntityId, PairKey};
use crate::presenter::Color;

/// Global sequence counter for event ordering.
static EVENT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Classification of runtime events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    // === Effect events ===
    /// A highlight was enabled and recorded.
    ///
    /// Sets:
    /// - `observer`, `subject`: the pair
    /// - `color`: requested color
    /// - `duration_ms`: expiry delay (absent for permanent grants)
    /// - `reason`: `"replaced"` when an earlier entry was superseded
    EffectGranted,

    /// A highlight was explicitly revoked (entry removed, presenter disabled).
    ///
    /// Sets:
    /// - `observer`, `subject`: the pair
    /// - `reason`: presenter failure message, if the disable call failed
    EffectRevoked,

    /// A timed highlight reached its deadline and was reverted.
    ///
    /// Sets:
    /// - `observer`, `subject`: the pair
    EffectExpired,

    /// An expiry callback landed for an entry that was already replaced or removed.
    ///
    /// Sets:
    /// - `observer`, `subject`: the pair
    ExpirySuperseded,

    // === Failure events ===
    /// A grant was refused before touching the presenter.
    ///
    /// Sets:
    /// - `observer`, `subject`: the pair (may be blank)
    /// - `reason`: error label
    GrantRejected,

    /// The presenter failed while enabling a highlight; nothing was recorded.
    ///
    /// Sets:
    /// - `observer`, `subject`: the pair
    /// - `reason`: presenter failure message
    BackendFailed,

    // === Runtime events ===
    /// Shutdown requested (OS signal or explicit call).
    ShutdownRequested,

    /// Registry drained: all timers cancelled, entries discarded.
    ///
    /// Sets:
    /// - `count`: number of entries discarded
    RegistryDrained,

    /// Subscriber panicked during event processing.
    ///
    /// Sets:
    /// - `reason`: `subscriber=<name> info=<panic>`
    SubscriberPanicked,

    /// Subscriber dropped an event (queue full or worker closed).
    ///
    /// Sets:
    /// - `reason`: `subscriber=<name> reason=<full|closed>`
    SubscriberOverflow,
}

/// Runtime event with optional metadata.
///
/// - `seq`: monotonic global sequence for ordering
/// - `at`: wall-clock timestamp (for logs)
/// - other optional fields are set depending on the [`EventKind`]
#[derive(Clone, Debug)]
pub struct Event {
    /// Globally unique, monotonically increasing sequence number.
    pub seq: u64,
    /// Wall-clock timestamp.
    pub at: SystemTime,
    /// Event classification.
    pub kind: EventKind,

    /// Observer half of the pair, if applicable.
    pub observer: Option<EntityId>,
    /// Subject half of the pair, if applicable.
    pub subject: Option<EntityId>,
    /// Highlight color, if applicable.
    pub color: Option<Color>,
    /// Expiry delay in milliseconds (compact).
    pub duration_ms: Option<u32>,
    /// Number of affected entries (drain).
    pub count: Option<u32>,
    /// Human-readable reason (errors, overflow details, etc.).
    pub reason: Option<Arc<str>>,
}

impl Event {
    /// Creates a new event of the given kind with current timestamp and next sequence number.
    pub fn new(kind: EventKind) -> Self {
        Self {
            seq: EVENT_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            at: SystemTime::now(),
            kind,
            observer: None,
            subject: None,
            color: None,
            duration_ms: None,
            count: None,
            reason: None,
        }
    }

    /// Attaches both halves of a pair.
    #[inline]
    pub fn with_pair(mut self, key: &PairKey) -> Self {
        self.observer = Some(key.observer.clone());
        self.subject = Some(key.subject.clone());
        self
    }

    /// Attaches a color.
    #[inline]
    pub fn with_color(mut self, color: Option<Color>) -> Self {
        self.color = color;
        self
    }

    /// Attaches an expiry delay (stored as milliseconds).
    #[inline]
    pub fn with_duration(mut self, d: Duration) -> Self {
        let ms = d.as_millis().min(u128::from(u32::MAX)) as u32;
        self.duration_ms = Some(ms);
        self
    }

    /// Attaches an entry count.
    #[inline]
    pub fn with_count(mut self, n: usize) -> Self {
        self.count = Some(u32::try_from(n).unwrap_or(u32::MAX));
        self
    }

    /// Attaches a human-readable reason.
    #[inline]
    pub fn with_reason(mut self, reason: impl Into<Arc<str>>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Creates a subscriber overflow event.
    #[inline]
    pub fn subscriber_overflow(subscriber: &'static str, reason: &'static str) -> Self {
        Event::new(EventKind::SubscriberOverflow)
            .with_reason(format!("subscriber={subscriber} reason={reason}"))
    }

    /// Creates a subscriber panic event.
    #[inline]
    pub fn subscriber_panicked(subscriber: &'static str, info: String) -> Self {
        Event::new(EventKind::SubscriberPanicked)
            .with_reason(format!("subscriber={subscriber} info={info}"))
    }

    /// True for events that describe the health of the subscriber pipeline itself.
    #[inline]
    pub fn is_subscriber_health(&self) -> bool {
        matches!(
            self.kind,
            EventKind::SubscriberOverflow | EventKind::SubscriberPanicked
        )
    }
}
