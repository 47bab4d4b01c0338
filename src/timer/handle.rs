//! # Cancellable handle to a scheduled callback.
//!
//! A [`TimerHandle`] is owned by exactly one registry entry. Cancelling it is
//! idempotent and safe after the callback has already fired. Cancellation is
//! **best effort**: a callback that already started keeps running, which is why
//! the registry re-checks the entry token when the callback lands.

use tokio_util::sync::CancellationToken;

/// Ownership-exclusive handle to a pending one-shot callback.
///
/// Deliberately not `Clone`: there is one owner, the entry that scheduled it.
#[derive(Debug)]
pub struct TimerHandle {
    token: CancellationToken,
}

impl TimerHandle {
    /// Wraps the token the timer implementation watches for cancellation.
    pub fn new(token: CancellationToken) -> Self {
        Self { token }
    }

    /// Requests cancellation of the pending callback.
    ///
    /// Idempotent. Has no effect once the callback has started.
    #[inline]
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// True once [`cancel`](Self::cancel) has been called (or the timer's parent
    /// token was cancelled).
    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancel_is_idempotent() {
        let h = TimerHandle::new(CancellationToken::new());
        assert!(!h.is_cancelled());
        h.cancel();
        h.cancel();
        assert!(h.is_cancelled());
    }
}
