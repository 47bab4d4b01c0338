//! # Registry entries and their generation tokens.
//!
//! Every grant creates a fresh [`Entry`] stamped with a new [`EntryToken`]. The
//! expiry callback scheduled for that entry carries the same token; when it lands,
//! the registry compares tokens and ignores callbacks for entries that no longer
//! exist or were replaced.

use std::time::Duration;

use crate::presenter::Color;
use crate::timer::TimerHandle;

/// Generation marker identifying one entry instance.
///
/// Tokens come from a registry-wide monotonic counter, so two entries installed
/// for the same pair never share a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryToken(pub(crate) u64);

impl EntryToken {
    /// Raw generation number (for logs).
    #[inline]
    pub fn get(self) -> u64 {
        self.0
    }
}

/// Live record of an enabled highlight.
#[derive(Debug)]
pub(crate) struct Entry {
    pub(crate) token: EntryToken,
    pub(crate) color: Option<Color>,
    pub(crate) duration: Option<Duration>,
    /// Pending expiry; `None` for permanent grants.
    pub(crate) timer: Option<TimerHandle>,
}

impl Entry {
    /// Cancels the pending expiry, if any. Idempotent.
    #[inline]
    pub(crate) fn cancel_timer(&self) {
        if let Some(t) = &self.timer {
            t.cancel();
        }
    }

    pub(crate) fn info(&self) -> EffectInfo {
        EffectInfo {
            token: self.token,
            color: self.color,
            duration: self.duration,
            timer_pending: self.timer.as_ref().is_some_and(|t| !t.is_cancelled()),
        }
    }
}

/// Read-only view of a registry entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectInfo {
    /// Generation of this entry instance.
    pub token: EntryToken,
    /// Color the highlight was enabled with.
    pub color: Option<Color>,
    /// Requested expiry delay; `None` for permanent grants.
    pub duration: Option<Duration>,
    /// True while an uncancelled expiry timer is attached.
    pub timer_pending: bool,
}

impl EffectInfo {
    /// True for grants without an expiry.
    #[inline]
    pub fn is_permanent(&self) -> bool {
        self.duration.is_none()
    }
}
