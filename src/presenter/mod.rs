//! # Presentation backend: the outward-facing side of an effect.
//!
//! - [`Presenter`] - trait the registry calls to apply/revert a highlight
//! - [`PresenterFn`] - closure-backed presenter
//! - [`PresenterRef`] - shared handle (`Arc<dyn Presenter>`)
//! - [`Color`] - the named highlight palette

mod backend;
mod color;
mod presenter_fn;

pub use backend::{Presenter, PresenterRef};
pub use color::{Color, UnknownColor};
pub use presenter_fn::PresenterFn;
