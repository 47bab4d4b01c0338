//! Error types used by the glowvisor runtime, the effect registry and the command surface.
//!
//! This module defines the error enums:
//!
//! - [`EffectError`]: errors reported by [`EffectRegistry`](crate::EffectRegistry) operations.
//! - [`BackendError`]: failures reported by a [`Presenter`](crate::Presenter).
//! - [`CommandError`]: errors raised while parsing or dispatching operator commands.
//! - [`RuntimeError`]: errors raised by the runtime itself (signals, shutdown).
//!
//! All of them provide `as_label` (stable snake_case for logs/metrics) and `as_message`.

use std::time::Duration;
use thiserror::Error;

/// # Failure reported by a presentation backend.
///
/// The registry never inspects the message; it only propagates the failure.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("presenter failed: {reason}")]
pub struct BackendError {
    /// Backend-specific description of what went wrong.
    pub reason: String,
}

impl BackendError {
    /// Creates a backend error from any displayable reason.
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// # Errors produced by effect registry operations.
///
/// "Nothing to revoke" is **not** an error: revoking an absent pair succeeds.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EffectError {
    /// Observer or subject identifier was empty; rejected without side effects.
    #[error("invalid argument: {what}")]
    InvalidArgument {
        /// Which argument was rejected.
        what: &'static str,
    },

    /// The presenter call failed; registry state was left consistent.
    #[error(transparent)]
    Backend(#[from] BackendError),

    /// The registry is draining; no new grants are accepted.
    #[error("registry is shutting down")]
    ShuttingDown,
}

impl EffectError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use glowvisor::{BackendError, EffectError};
    ///
    /// let err = EffectError::Backend(BackendError::new("observer offline"));
    /// assert_eq!(err.as_label(), "effect_backend_failed");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            EffectError::InvalidArgument { .. } => "effect_invalid_argument",
            EffectError::Backend(_) => "effect_backend_failed",
            EffectError::ShuttingDown => "effect_shutting_down",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            EffectError::InvalidArgument { what } => format!("invalid argument: {what}"),
            EffectError::Backend(e) => format!("backend: {}", e.reason),
            EffectError::ShuttingDown => "registry is shutting down".to_string(),
        }
    }
}

/// # Errors produced by the command surface.
///
/// The surface absorbs these toward the operator; they exist so that callers
/// embedding the surface (and tests) can see why a command did nothing.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// The sender is not an operator.
    #[error("permission denied")]
    PermissionDenied,

    /// Missing subcommand, unknown subcommand or too few arguments.
    #[error("usage: {usage}")]
    Usage {
        /// Expected usage for the attempted subcommand.
        usage: &'static str,
    },

    /// A player name did not resolve to a live entity.
    #[error("unknown player: {name}")]
    UnknownPlayer {
        /// The name as typed by the operator.
        name: String,
    },

    /// A color name is not in the color table.
    #[error("unknown color: {name}")]
    UnknownColor {
        /// The name as typed by the operator.
        name: String,
    },

    /// The registry rejected the resulting operation.
    #[error(transparent)]
    Effect(#[from] EffectError),
}

impl CommandError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            CommandError::PermissionDenied => "command_permission_denied",
            CommandError::Usage { .. } => "command_usage",
            CommandError::UnknownPlayer { .. } => "command_unknown_player",
            CommandError::UnknownColor { .. } => "command_unknown_color",
            CommandError::Effect(e) => e.as_label(),
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            CommandError::Effect(e) => e.as_message(),
            other => other.to_string(),
        }
    }
}

/// # Errors produced by the glowvisor runtime.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum RuntimeError {
    /// Registering OS signal handlers failed.
    #[error("failed to install shutdown signal handlers: {0}")]
    Signal(#[from] std::io::Error),

    /// Subscriber workers did not finish flushing within the grace period.
    #[error("subscriber flush exceeded grace {grace:?}")]
    GraceExceeded {
        /// The configured grace duration.
        grace: Duration,
    },
}

impl RuntimeError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use glowvisor::RuntimeError;
    /// use std::time::Duration;
    ///
    /// let err = RuntimeError::GraceExceeded { grace: Duration::from_secs(5) };
    /// assert_eq!(err.as_label(), "runtime_grace_exceeded");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            RuntimeError::Signal(_) => "runtime_signal_failed",
            RuntimeError::GraceExceeded { .. } => "runtime_grace_exceeded",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            RuntimeError::Signal(e) => format!("signal registration failed: {e}"),
            RuntimeError::GraceExceeded { grace } => format!("grace exceeded after {grace:?}"),
        }
    }
}
