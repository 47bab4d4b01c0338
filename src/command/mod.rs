//! # Operator command surface.
//!
//! Thin glue in front of the registry:
//! - [`Command`] - parsed `effect` / `cancel` / `cancelall`
//! - [`CommandSurface`] - permission check, name resolution, registry calls
//! - [`Directory`] - name → entity lookup and the online roster
//! - [`Sender`] - who issued the command

mod directory;
mod parse;
mod surface;

pub use directory::{Directory, DirectoryRef, MemoryDirectory};
pub use parse::Command;
pub use surface::{CommandSurface, Sender};
