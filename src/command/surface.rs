//! # Command surface: operator text → registry calls.
//!
//! ```text
//! handle(sender, line)
//!   └─► dispatch
//!         ├─► operator check            (PermissionDenied)
//!         ├─► Command::parse            (Usage / UnknownColor)
//!         └─► execute
//!               ├─ Effect    → resolve names → registry.grant(o, s, color, ticks × tick)
//!               ├─ Cancel    → resolve names → registry.revoke(o, s)
//!               └─ CancelAll → resolve (or sender) → registry.revoke_all(o, directory.online())
//! ```
//!
//! [`CommandSurface::handle`] gives operators no feedback: every error is logged at
//! debug level and dropped. Use [`CommandSurface::dispatch`] to see the outcome.

use std::sync::Arc;

use crate::command::parse::{CANCELALL_USAGE, Command};
use crate::command::DirectoryRef;
use crate::core::{Config, EffectRegistry, EntityId};
use crate::error::CommandError;

/// Who issued a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sender {
    /// The sender's own entity, if the sender is a player.
    pub id: Option<EntityId>,
    /// Only operators may run commands.
    pub operator: bool,
}

impl Sender {
    /// The server console: an operator with no entity of its own.
    pub fn console() -> Self {
        Self {
            id: None,
            operator: true,
        }
    }

    /// A player sender.
    pub fn player(id: impl Into<EntityId>, operator: bool) -> Self {
        Self {
            id: Some(id.into()),
            operator,
        }
    }
}

/// Parses operator commands and applies them to an [`EffectRegistry`].
pub struct CommandSurface {
    registry: Arc<EffectRegistry>,
    directory: DirectoryRef,
    cfg: Config,
}

impl CommandSurface {
    /// Creates a surface over `registry`, resolving names through `directory`.
    pub fn new(registry: Arc<EffectRegistry>, directory: DirectoryRef, cfg: Config) -> Self {
        Self {
            registry,
            directory,
            cfg,
        }
    }

    /// Runs one command line and swallows any failure.
    pub async fn handle(&self, sender: &Sender, line: &str) {
        if let Err(e) = self.dispatch(sender, line).await {
            tracing::debug!(label = e.as_label(), msg = %e.as_message(), line, "command ignored");
        }
    }

    /// Runs one command line and reports the outcome.
    pub async fn dispatch(&self, sender: &Sender, line: &str) -> Result<(), CommandError> {
        if !sender.operator {
            return Err(CommandError::PermissionDenied);
        }
        let args: Vec<&str> = line.split_whitespace().collect();
        let cmd = Command::parse(&args)?;
        self.execute(sender, cmd).await
    }

    /// Applies an already parsed command.
    pub async fn execute(&self, sender: &Sender, cmd: Command) -> Result<(), CommandError> {
        match cmd {
            Command::Effect {
                observer,
                subject,
                color,
                ticks,
            } => {
                let observer = self.resolve(&observer)?;
                let subject = self.resolve(&subject)?;
                let duration = match ticks {
                    Some(t) => self.cfg.ticks_to_duration(t),
                    None => self.cfg.default_duration(),
                };
                self.registry
                    .grant(&observer, &subject, Some(color), duration)
                    .await?;
            }
            Command::Cancel { observer, subject } => {
                let observer = self.resolve(&observer)?;
                let subject = self.resolve(&subject)?;
                self.registry.revoke(&observer, &subject).await?;
            }
            Command::CancelAll { observer } => {
                let observer = match observer {
                    Some(name) => self.resolve(&name)?,
                    None => sender.id.clone().ok_or(CommandError::Usage {
                        usage: CANCELALL_USAGE,
                    })?,
                };
                let roster = self.directory.online();
                self.registry.revoke_all(&observer, &roster).await;
            }
        }
        Ok(())
    }

    fn resolve(&self, name: &str) -> Result<EntityId, CommandError> {
        self.directory
            .resolve(name)
            .ok_or_else(|| CommandError::UnknownPlayer {
                name: name.to_string(),
            })
    }
}
