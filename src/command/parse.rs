//! # Operator command grammar.
//!
//! ```text
//! effect    <observer> <subject> <color> [ticks]
//! cancel    <observer> <subject>
//! cancelall [observer]
//! ```
//!
//! Subcommands are case-insensitive. Extra trailing tokens are ignored.
//!
//! `ticks` is lenient: an empty, unparsable or negative value means `0`
//! (permanent) rather than an error. Leaving it out entirely defers to
//! [`Config::default_ticks`](crate::Config::default_ticks).

use crate::error::CommandError;
use crate::presenter::Color;

pub(crate) const EFFECT_USAGE: &str = "effect <observer> <subject> <color> [ticks]";
pub(crate) const CANCEL_USAGE: &str = "cancel <observer> <subject>";
pub(crate) const CANCELALL_USAGE: &str = "cancelall [observer]";
const ROOT_USAGE: &str = "<effect|cancel|cancelall> ...";

/// Parsed operator command. Names are still unresolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Highlight `subject` for `observer`.
    Effect {
        /// Name of the player who will see the highlight.
        observer: String,
        /// Name of the player to highlight.
        subject: String,
        /// Requested highlight color.
        color: Color,
        /// `None` when the operator gave no tick count.
        ticks: Option<u32>,
    },
    /// Remove `observer`'s highlight on `subject`.
    Cancel {
        /// Name of the player who sees the highlight.
        observer: String,
        /// Name of the highlighted player.
        subject: String,
    },
    /// Remove every highlight `observer` sees.
    CancelAll {
        /// Name of the observer; `None` means the sender.
        observer: Option<String>,
    },
}

impl Command {
    /// Parses whitespace-split tokens.
    ///
    /// # Example
    /// ```
    /// use glowvisor::{Color, Command};
    ///
    /// let cmd = Command::parse(&["effect", "alex", "steve", "RED", "40"]).unwrap();
    /// assert_eq!(cmd, Command::Effect {
    ///     observer: "alex".into(),
    ///     subject: "steve".into(),
    ///     color: Color::Red,
    ///     ticks: Some(40),
    /// });
    /// ```
    pub fn parse(args: &[&str]) -> Result<Self, CommandError> {
        let Some(sub) = args.first() else {
            return Err(CommandError::Usage { usage: ROOT_USAGE });
        };

        match sub.to_ascii_lowercase().as_str() {
            "effect" => {
                let [_, observer, subject, color, rest @ ..] = args else {
                    return Err(CommandError::Usage {
                        usage: EFFECT_USAGE,
                    });
                };
                let color = color
                    .parse::<Color>()
                    .map_err(|e| CommandError::UnknownColor { name: e.0 })?;
                Ok(Command::Effect {
                    observer: observer.to_string(),
                    subject: subject.to_string(),
                    color,
                    ticks: rest.first().map(|t| parse_ticks(t)),
                })
            }
            "cancel" => {
                let [_, observer, subject, ..] = args else {
                    return Err(CommandError::Usage {
                        usage: CANCEL_USAGE,
                    });
                };
                Ok(Command::Cancel {
                    observer: observer.to_string(),
                    subject: subject.to_string(),
                })
            }
            "cancelall" => Ok(Command::CancelAll {
                observer: args.get(1).map(|s| s.to_string()),
            }),
            _ => Err(CommandError::Usage { usage: ROOT_USAGE }),
        }
    }
}

/// Lenient tick parsing: anything that is not a non-negative `i32` becomes `0`.
fn parse_ticks(raw: &str) -> u32 {
    raw.trim()
        .parse::<i32>()
        .map(|n| n.max(0).unsigned_abs())
        .unwrap_or(0)
}
