//! # LogWriter: tracing-backed event printer
//!
//! A minimal subscriber that turns incoming [`Event`]s into `tracing` records under
//! the `glowvisor` target. Install any `tracing` subscriber in the host to see them.
//!
//! ## Example output (with `tracing_subscriber::fmt`)
//! ```text
//! INFO glowvisor: granted observer=alex subject=steve color=gold duration_ms=3000
//! INFO glowvisor: expired observer=alex subject=steve
//! DEBUG glowvisor: superseded expiry ignored observer=alex subject=steve
//! WARN glowvisor: presenter failed observer=alex subject=steve reason="offline"
//! INFO glowvisor: registry drained count=4
//! ```

use crate::events::{Event, EventKind};
use crate::subscribers::Subscribe;
use async_trait::async_trait;

/// Event writer subscriber.
#[derive(Default)]
pub struct LogWriter;

impl LogWriter {
    /// Construct a new [`LogWriter`].
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

fn field(id: &Option<crate::EntityId>) -> &str {
    id.as_ref().map(|v| v.as_str()).unwrap_or("-")
}

#[async_trait]
impl Subscribe for LogWriter {
    async fn on_event(&self, e: &Event) {
        let observer = field(&e.observer);
        let subject = field(&e.subject);
        let reason = e.reason.as_deref().unwrap_or("");

        match e.kind {
            EventKind::EffectGranted => {
                let color = e.color.map(|c| c.name()).unwrap_or("none");
                tracing::info!(target: "glowvisor", observer, subject, color, duration_ms = ?e.duration_ms, reason, "granted");
            }
            EventKind::EffectRevoked => {
                tracing::info!(target: "glowvisor", observer, subject, reason, "revoked");
            }
            EventKind::EffectExpired => {
                tracing::info!(target: "glowvisor", observer, subject, "expired");
            }
            EventKind::ExpirySuperseded => {
                tracing::debug!(target: "glowvisor", observer, subject, "superseded expiry ignored");
            }
            EventKind::GrantRejected => {
                tracing::debug!(target: "glowvisor", observer, subject, reason, "grant rejected");
            }
            EventKind::BackendFailed => {
                tracing::warn!(target: "glowvisor", observer, subject, reason, "presenter failed");
            }
            EventKind::ShutdownRequested => {
                tracing::info!(target: "glowvisor", "shutdown requested");
            }
            EventKind::RegistryDrained => {
                tracing::info!(target: "glowvisor", count = ?e.count, "registry drained");
            }
            EventKind::SubscriberOverflow => {
                tracing::warn!(target: "glowvisor", reason, "subscriber overflow");
            }
            EventKind::SubscriberPanicked => {
                tracing::warn!(target: "glowvisor", reason, "subscriber panicked");
            }
        }
    }

    fn name(&self) -> &'static str {
        "LogWriter"
    }
}
