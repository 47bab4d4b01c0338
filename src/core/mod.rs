//! Runtime core: the effect registry and its lifecycle.
//!
//! Public API from this module: [`EffectRegistry`], [`Glowvisor`] (+ builder),
//! [`Config`], the identifier types and the entry views.
//!
//! Internal modules:
//! - [`registry`]: per-pair exclusion, cancel-on-regrant, token-checked expiry, drain;
//! - [`entry`]: entries and generation tokens;
//! - [`key`]: entity identifiers and pair keys;
//! - [`runtime`]: event fan-out and shutdown orchestration;
//! - [`shutdown`]: cross-platform shutdown signal handling.

mod builder;
mod config;
mod entry;
mod key;
mod registry;
mod runtime;
mod shutdown;

pub use builder::GlowvisorBuilder;
pub use config::Config;
pub use entry::{EffectInfo, EntryToken};
pub use key::{EntityId, PairKey};
pub use registry::EffectRegistry;
pub use runtime::Glowvisor;
pub use shutdown::ShutdownCause;
