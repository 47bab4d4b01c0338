//! # Glowvisor: owns the registry, event fan-out and shutdown.
//!
//! The [`Glowvisor`] wires the pieces a host needs around the
//! [`EffectRegistry`]:
//!
//! ```text
//! Glowvisor::builder(cfg, presenter).build()
//!   ├─► Bus (broadcast)
//!   ├─► EffectRegistry (presenter + timer + bus)
//!   └─► listener: Bus.subscribe() ─► SubscriberSet::emit(&Event)   (fire-and-forget)
//!
//! run():
//!   wait_for_shutdown(signal | shutdown())
//!     └─► Bus.publish(ShutdownRequested)
//!     └─► registry.drain()          → cancels every timer, no presenter calls
//!     └─► stop listener, flush subscribers within cfg.grace
//! ```
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use glowvisor::{BackendError, Color, Config, EntityId, Glowvisor, PresenterFn};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let presenter = PresenterFn::arc("noop", |_o: &EntityId, _s: &EntityId, _on: bool, _c: Option<Color>| {
//!         Ok::<_, BackendError>(())
//!     });
//!     let gv = Glowvisor::builder(Config::default(), presenter).build();
//!
//!     gv.registry()
//!         .grant(&"alex".into(), &"steve".into(), Some(Color::Gold), None)
//!         .await?;
//!
//!     gv.shutdown();
//!     gv.run().await?;
//!     assert!(gv.registry().is_empty().await);
//!     Ok(())
//! }
//! ```

use std::sync::Arc;

use tokio::sync::Mutex;
use tokio::sync::broadcast::error::{RecvError, TryRecvError};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::command::{CommandSurface, DirectoryRef};
use crate::core::shutdown::{self, ShutdownCause};
use crate::core::{Config, EffectRegistry, GlowvisorBuilder};
use crate::error::RuntimeError;
use crate::events::{Bus, Event, EventKind};
use crate::presenter::PresenterRef;
use crate::subscribers::SubscriberSet;

/// Host-facing runtime around one [`EffectRegistry`].
pub struct Glowvisor {
    cfg: Config,
    bus: Bus,
    registry: Arc<EffectRegistry>,
    requested: CancellationToken,
    listener_stop: CancellationToken,
    listener: Mutex<Option<JoinHandle<()>>>,
}

impl Glowvisor {
    /// Starts building a runtime around `presenter`.
    pub fn builder(cfg: Config, presenter: PresenterRef) -> GlowvisorBuilder {
        GlowvisorBuilder::new(cfg, presenter)
    }

    pub(crate) fn new_internal(
        cfg: Config,
        bus: Bus,
        registry: Arc<EffectRegistry>,
        subs: SubscriberSet,
    ) -> Self {
        let listener_stop = CancellationToken::new();
        let listener = spawn_listener(bus.clone(), subs, listener_stop.clone());
        Self {
            cfg,
            bus,
            registry,
            requested: CancellationToken::new(),
            listener_stop,
            listener: Mutex::new(Some(listener)),
        }
    }

    /// The effect registry.
    pub fn registry(&self) -> &Arc<EffectRegistry> {
        &self.registry
    }

    /// The event bus (subscribe here for ad-hoc observation).
    pub fn bus(&self) -> &Bus {
        &self.bus
    }

    /// Runtime configuration.
    pub fn config(&self) -> &Config {
        &self.cfg
    }

    /// Builds a command surface bound to this runtime's registry.
    pub fn commands(&self, directory: DirectoryRef) -> CommandSurface {
        CommandSurface::new(Arc::clone(&self.registry), directory, self.cfg.clone())
    }

    /// Requests shutdown; [`run`](Self::run) returns after draining.
    pub fn shutdown(&self) {
        self.requested.cancel();
    }

    /// Waits for an OS termination signal or [`shutdown`](Self::shutdown), then
    /// drains the registry and flushes subscribers.
    ///
    /// Returns what triggered the shutdown.
    pub async fn run(&self) -> Result<ShutdownCause, RuntimeError> {
        let cause = shutdown::wait_for_shutdown(&self.requested).await?;
        self.bus.publish(
            Event::new(EventKind::ShutdownRequested).with_reason(cause.to_string()),
        );

        let drained = self.registry.drain().await;
        tracing::info!(%cause, drained, "glowvisor drained");

        self.stop_listener().await?;
        Ok(cause)
    }

    /// Stops the fan-out listener and waits up to [`Config::grace`] for subscribers.
    async fn stop_listener(&self) -> Result<(), RuntimeError> {
        self.listener_stop.cancel();
        let Some(handle) = self.listener.lock().await.take() else {
            return Ok(());
        };

        let grace = self.cfg.grace;
        match tokio::time::timeout(grace, handle).await {
            Ok(_) => Ok(()),
            Err(_) => {
                tracing::warn!(?grace, "subscribers did not flush within grace");
                Err(RuntimeError::GraceExceeded { grace })
            }
        }
    }
}

/// Forwards bus events to the subscriber set until `stop` is cancelled, then
/// flushes what is already buffered and shuts the set down.
fn spawn_listener(bus: Bus, subs: SubscriberSet, stop: CancellationToken) -> JoinHandle<()> {
    let mut rx = bus.subscribe();
    tokio::spawn(async move {
        loop {
            tokio::select! {
                _ = stop.cancelled() => break,
                msg = rx.recv() => match msg {
                    Ok(ev) => subs.emit(&ev),
                    Err(RecvError::Lagged(n)) => {
                        tracing::warn!(skipped = n, "event listener lagged");
                    }
                    Err(RecvError::Closed) => break,
                }
            }
        }

        loop {
            match rx.try_recv() {
                Ok(ev) => subs.emit(&ev),
                Err(TryRecvError::Lagged(_)) => continue,
                Err(TryRecvError::Empty | TryRecvError::Closed) => break,
            }
        }
        subs.shutdown().await;
    })
}
