//! # Tokio-backed timer facility.
//!
//! [`TokioTimer`] spawns one lightweight task per scheduled callback:
//!
//! ```text
//! schedule_once(delay, cb)
//!   └─► tokio::spawn
//!         select! {
//!           token.cancelled() → drop cb          (cancelled before deadline)
//!           sleep(delay)      → cb.await          (fired)
//!         }
//! ```
//!
//! Each callback gets its own token; cancelling one handle never touches another.
//! Bulk cancellation is the registry's job ([`EffectRegistry::drain`](crate::EffectRegistry::drain)).
//!
//! Must be used from inside a tokio runtime.

use std::time::Duration;

use futures::future::BoxFuture;
use tokio_util::sync::CancellationToken;

use super::{Timer, TimerHandle};

/// Timer facility backed by `tokio::time::sleep`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioTimer;

impl TokioTimer {
    /// Creates a timer.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Timer for TokioTimer {
    fn schedule_once(&self, delay: Duration, callback: BoxFuture<'static, ()>) -> TimerHandle {
        let token = CancellationToken::new();
        let watch = token.clone();

        tokio::spawn(async move {
            tokio::select! {
                biased;
                _ = watch.cancelled() => {}
                _ = tokio::time::sleep(delay) => callback.await,
            }
        });

        TimerHandle::new(token)
    }
}
