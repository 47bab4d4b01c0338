//! # Function-backed presenter (`PresenterFn`)
//!
//! [`PresenterFn`] wraps a closure `F: Fn(&EntityId, &EntityId, bool, Option<Color>) -> Result<(), BackendError>`
//! so small hosts and tests do not need a dedicated type.
//!
//! ## Example
//! ```rust
//! use glowvisor::{BackendError, Color, EntityId, PresenterFn, PresenterRef};
//!
//! let p: PresenterRef = PresenterFn::arc(
//!     "noop",
//!     |_o: &EntityId, _s: &EntityId, _on: bool, _c: Option<Color>| Ok::<_, BackendError>(()),
//! );
//! assert!(p.set_highlight(&"a".into(), &"b".into(), true, Some(Color::Red)).is_ok());
//! ```

use std::borrow::Cow;
use std::sync::Arc;

use crate::core::EntityId;
use crate::error::BackendError;
use crate::presenter::{Color, Presenter};

/// Function-backed presenter implementation.
#[derive(Debug)]
pub struct PresenterFn<F> {
    name: Cow<'static, str>,
    f: F,
}

impl<F> PresenterFn<F> {
    /// Creates a new function-backed presenter.
    ///
    /// Prefer [`PresenterFn::arc`] when you immediately need a [`PresenterRef`](crate::PresenterRef).
    pub fn new(name: impl Into<Cow<'static, str>>, f: F) -> Self {
        Self {
            name: name.into(),
            f,
        }
    }

    /// Creates the presenter and returns it as a shared handle.
    pub fn arc(name: impl Into<Cow<'static, str>>, f: F) -> Arc<Self> {
        Arc::new(Self::new(name, f))
    }

}

impl<F> Presenter for PresenterFn<F>
where
    F: Fn(&EntityId, &EntityId, bool, Option<Color>) -> Result<(), BackendError>
        + Send
        + Sync
        + 'static,
{
    fn set_highlight(
        &self,
        observer: &EntityId,
        subject: &EntityId,
        enabled: bool,
        color: Option<Color>,
    ) -> Result<(), BackendError> {
        (self.f)(observer, subject, enabled, color)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
