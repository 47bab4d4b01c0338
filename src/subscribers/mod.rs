//! # Event subscribers for the glowvisor runtime.
//!
//! This module provides the [`Subscribe`] trait, the [`SubscriberSet`] fan-out and
//! an optional built-in [`LogWriter`].
//!
//! ## Architecture
//! ```text
//! EffectRegistry ── publish(Event) ──► Bus ──► Glowvisor listener ──► SubscriberSet::emit
//!                                                                    ┌──────┼──────┐
//!                                                                    ▼      ▼      ▼
//!                                                               LogWriter Audit  Custom
//! ```

mod set;
mod subscribe;

#[cfg(feature = "logging")]
mod log;

#[cfg(feature = "logging")]
pub use log::LogWriter;
pub use set::SubscriberSet;
pub use subscribe::Subscribe;
