//! Runtime events: types and broadcast bus.
//!
//! This module groups the event **data model** and the **bus** used to publish and
//! observe what the effect registry does.
//!
//! ## Contents
//! - [`EventKind`], [`Event`] event classification and payload metadata
//! - [`Bus`] thin wrapper over `tokio::sync::broadcast`
//!
//! ## Quick reference
//! - **Publishers**: `EffectRegistry` (grant/revoke/expire/drain), `Glowvisor`
//!   (shutdown), `SubscriberSet` workers (overflow/panic).
//! - **Consumers**: `Glowvisor`'s listener (fans out to `SubscriberSet`) and any
//!   receiver obtained through [`Bus::subscribe`].

mod bus;
mod event;

pub use bus::Bus;
pub use event::{Event, EventKind};
