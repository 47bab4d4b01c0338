//! # Core subscriber trait
//!
//! `Subscribe` is the extension point for observing the effect registry: audit
//! trails, metrics, operator feedback. Each subscriber is driven by a dedicated
//! worker loop fed by a bounded queue owned by the
//! [`SubscriberSet`](crate::subscribers::SubscriberSet).
//!
//! ## Contract
//! - Implementations may be slow; they never block the registry nor other subscribers.
//! - Each subscriber declares its queue capacity via [`Subscribe::queue_capacity`].
//!   On overflow, events for that subscriber are **dropped** (warn).
//!
//! ## Example
//! ```rust
//! use glowvisor::{Event, EventKind, Subscribe};
//!
//! struct ExpiryAudit;
//!
//! #[async_trait::async_trait]
//! impl Subscribe for ExpiryAudit {
//!     async fn on_event(&self, ev: &Event) {
//!         if ev.kind == EventKind::EffectExpired {
//!             // write audit record...
//!         }
//!     }
//!     fn name(&self) -> &'static str { "expiry-audit" }
//!     fn queue_capacity(&self) -> usize { 256 }
//! }
//! ```

use crate::events::Event;
use async_trait::async_trait;

/// Contract for event subscribers.
///
/// Called from a subscriber-dedicated worker task. Implementations should avoid
/// blocking the async runtime.
#[async_trait]
pub trait Subscribe: Send + Sync + 'static {
    /// Handle a single event for this subscriber.
    async fn on_event(&self, event: &Event);

    /// Human-readable name (for logs/metrics).
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Preferred capacity of this subscriber's queue.
    fn queue_capacity(&self) -> usize {
        1024
    }
}
