//! # glowvisor
//!
//! **Glowvisor** grants and revokes per-observer, per-subject timed highlights
//! ("show `subject` glowing `gold` to `observer` for 3 seconds").
//!
//! Its core is the [`EffectRegistry`]: a concurrent map that keeps **at most one**
//! active effect per `(observer, subject)` pair. A new grant atomically supersedes
//! the old one and cancels its pending expiry; an expiry that lost the race to a
//! newer grant is a no-op; shutdown drains everything without leaking a timer.
//!
//! ## Architecture
//! ```text
//!   operator line ──► CommandSurface ──► EffectRegistry ──► Presenter (enable / disable)
//!                          │                  │    ▲
//!                     Directory               │    │ expire_if_current(pair, token)
//!                   (names, roster)           ▼    │
//!                                           Timer (schedule_once / cancel)
//!                                             │
//!                     Bus ◄── events ─────────┘
//!                      └──► Glowvisor listener ──► SubscriberSet ──► LogWriter, custom ...
//! ```
//!
//! ### Lifecycle of one pair
//! ```text
//! grant(o, s, red, 10)     ─► entry{token=1, timer=T1}
//! grant(o, s, blue, 20)    ─► cancel T1 ─► entry{token=2, timer=T2}
//! T1 fires (lost the race) ─► token 1 ≠ 2 ─► no-op (ExpirySuperseded)
//! T2 fires                 ─► token 2 = 2 ─► remove entry ─► presenter disable
//! ```
//!
//! ## Features
//! | Area              | Description                                                  | Key types / traits                         |
//! |-------------------|--------------------------------------------------------------|--------------------------------------------|
//! | **Registry**      | One effect per pair, cancel-on-regrant, token-checked expiry | [`EffectRegistry`], [`EntryToken`]         |
//! | **Collaborators** | Rendering and scheduling seams                               | [`Presenter`], [`Timer`], [`Directory`]    |
//! | **Commands**      | `effect` / `cancel` / `cancelall` for operators              | [`CommandSurface`], [`Command`]            |
//! | **Events**        | Observe grants, revokes, expiries and failures               | [`Event`], [`EventKind`], [`Subscribe`]    |
//! | **Runtime**       | Signal handling and shutdown drain                           | [`Glowvisor`], [`Config`]                  |
//! | **Errors**        | Typed errors with stable labels                              | [`EffectError`], [`CommandError`]          |
//!
//! ## Optional features
//! - `logging`: exports a `tracing`-backed [`LogWriter`] subscriber.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use std::time::Duration;
//! use glowvisor::{
//!     BackendError, Color, Config, EffectRegistry, EntityId, PresenterFn, TokioTimer, Bus,
//! };
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let presenter = PresenterFn::arc("stdout", |o: &EntityId, s: &EntityId, on: bool, c: Option<Color>| {
//!         println!("{o} sees {s}: glowing={on} color={c:?}");
//!         Ok::<_, BackendError>(())
//!     });
//!
//!     let registry = EffectRegistry::new(
//!         &Config::default(),
//!         presenter,
//!         Arc::new(TokioTimer::new()),
//!         Bus::new(64),
//!     );
//!
//!     let (alex, steve) = (EntityId::from("alex"), EntityId::from("steve"));
//!     registry.grant(&alex, &steve, Some(Color::Gold), Some(Duration::from_millis(20))).await?;
//!     assert!(registry.contains(&alex, &steve).await);
//!
//!     tokio::time::sleep(Duration::from_millis(50)).await;
//!     assert!(!registry.contains(&alex, &steve).await);
//!     Ok(())
//! }
//! ```
mod command;
mod core;
mod error;
mod events;
mod presenter;
mod subscribers;
mod timer;

// ---- Public re-exports ----

pub use command::{Command, CommandSurface, Directory, DirectoryRef, MemoryDirectory, Sender};
pub use crate::core::{
    Config, EffectInfo, EffectRegistry, EntityId, EntryToken, Glowvisor, GlowvisorBuilder,
    PairKey, ShutdownCause,
};
pub use error::{BackendError, CommandError, EffectError, RuntimeError};
pub use events::{Bus, Event, EventKind};
pub use presenter::{Color, Presenter, PresenterFn, PresenterRef, UnknownColor};
pub use subscribers::{Subscribe, SubscriberSet};
pub use timer::{Timer, TimerHandle, TimerRef, TokioTimer};

// Optional: expose a tracing-backed logger subscriber.
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use subscribers::LogWriter;
