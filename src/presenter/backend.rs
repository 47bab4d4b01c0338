//! # Presentation backend abstraction.
//!
//! A [`Presenter`] applies or reverts the visible highlight of one subject as seen
//! by one observer. It is the only place where the registry touches the outside
//! world, and it is called **synchronously** inside the registry's per-pair
//! critical section, so implementations must be fast and must not block on other
//! registry operations.
//!
//! # Example
//! ```
//! use glowvisor::{BackendError, Color, EntityId, Presenter};
//!
//! struct Stdout;
//!
//! impl Presenter for Stdout {
//!     fn set_highlight(
//!         &self,
//!         observer: &EntityId,
//!         subject: &EntityId,
//!         enabled: bool,
//!         color: Option<Color>,
//!     ) -> Result<(), BackendError> {
//!         println!("{observer} sees {subject}: enabled={enabled} color={color:?}");
//!         Ok(())
//!     }
//! }
//! ```

use std::sync::Arc;

use crate::core::EntityId;
use crate::error::BackendError;
use crate::presenter::Color;

/// # Applies or reverts a highlight on a remote viewer.
///
/// Must be safe to call concurrently for different pairs; the registry serializes
/// calls for the same pair.
pub trait Presenter: Send + Sync + 'static {
    /// Enables (`enabled = true`, with `color`) or disables the highlight of
    /// `subject` for `observer`.
    ///
    /// `color` is only meaningful when enabling; the registry always passes `None`
    /// when disabling.
    fn set_highlight(
        &self,
        observer: &EntityId,
        subject: &EntityId,
        enabled: bool,
        color: Option<Color>,
    ) -> Result<(), BackendError>;

    /// Human-readable name (for logs).
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

/// Shared handle to a presenter.
pub type PresenterRef = Arc<dyn Presenter>;
