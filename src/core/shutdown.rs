//! # Shutdown triggers.
//!
//! [`wait_for_shutdown`] completes when the process receives a termination signal
//! or when the runtime's own shutdown token is cancelled, and reports which one.
//!
//! **Unix:** `SIGINT`, `SIGTERM`, `SIGQUIT`. **Elsewhere:** Ctrl-C.

use std::fmt;

use tokio_util::sync::CancellationToken;

/// What ended the wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownCause {
    /// Ctrl-C / SIGINT.
    Interrupt,
    /// SIGTERM.
    Terminate,
    /// SIGQUIT.
    Quit,
    /// [`Glowvisor::shutdown`](crate::Glowvisor::shutdown) was called.
    Requested,
}

impl fmt::Display for ShutdownCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ShutdownCause::Interrupt => "interrupt",
            ShutdownCause::Terminate => "terminate",
            ShutdownCause::Quit => "quit",
            ShutdownCause::Requested => "requested",
        })
    }
}

/// Waits for a termination signal or for `requested` to be cancelled.
///
/// Each call installs independent signal listeners. Fails only if listener
/// registration fails.
#[cfg(unix)]
pub async fn wait_for_shutdown(requested: &CancellationToken) -> std::io::Result<ShutdownCause> {
    use tokio::signal::unix::{SignalKind, signal};

    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sigquit = signal(SignalKind::quit())?;

    let cause = tokio::select! {
        _ = requested.cancelled() => ShutdownCause::Requested,
        _ = sigint.recv()  => ShutdownCause::Interrupt,
        _ = sigterm.recv() => ShutdownCause::Terminate,
        _ = sigquit.recv() => ShutdownCause::Quit,
    };
    Ok(cause)
}

/// Waits for Ctrl-C or for `requested` to be cancelled.
#[cfg(not(unix))]
pub async fn wait_for_shutdown(requested: &CancellationToken) -> std::io::Result<ShutdownCause> {
    tokio::select! {
        _ = requested.cancelled() => Ok(ShutdownCause::Requested),
        res = tokio::signal::ctrl_c() => res.map(|_| ShutdownCause::Interrupt),
    }
}
