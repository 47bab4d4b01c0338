//! # Timer facility: one-shot, cancellable callbacks.
//!
//! The registry schedules exactly one expiry callback per timed entry through a
//! [`Timer`]. The facility is a seam: production uses [`TokioTimer`], tests can
//! plug in a manually driven clock.
//!
//! ## Contract
//! - `schedule_once(delay, cb)` runs `cb` once, no earlier than `delay` from now,
//!   unless the returned handle is cancelled first.
//! - [`TimerHandle::cancel`] is idempotent and safe after the callback fired.
//! - Cancellation may lose the race against a callback that already started.

mod handle;
mod tokio_timer;

use std::sync::Arc;
use std::time::Duration;

use futures::future::BoxFuture;

pub use handle::TimerHandle;
pub use tokio_timer::TokioTimer;

/// Schedules one-shot callbacks.
pub trait Timer: Send + Sync + 'static {
    /// Schedules `callback` to run once after `delay`.
    fn schedule_once(&self, delay: Duration, callback: BoxFuture<'static, ()>) -> TimerHandle;
}

/// Shared handle to a timer facility.
pub type TimerRef = Arc<dyn Timer>;
