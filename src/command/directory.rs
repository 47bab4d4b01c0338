//! # Subject directory: who is around, and what are they called.
//!
//! The command surface speaks in player names; the registry speaks in
//! [`EntityId`]s. A [`Directory`] bridges the two and supplies the current roster
//! for `cancelall`.

use std::collections::HashMap;
use std::sync::Arc;

use crate::core::EntityId;

/// Host lookup of live entities.
pub trait Directory: Send + Sync + 'static {
    /// Resolves a name to a live, reachable entity. `None` if unknown or offline.
    fn resolve(&self, name: &str) -> Option<EntityId>;

    /// Every entity currently online.
    fn online(&self) -> Vec<EntityId>;
}

/// Shared handle to a directory.
pub type DirectoryRef = Arc<dyn Directory>;

/// Fixed, in-memory directory. Names match case-insensitively.
#[derive(Debug, Default, Clone)]
pub struct MemoryDirectory {
    by_name: HashMap<String, EntityId>,
}

impl MemoryDirectory {
    /// Builds a directory from `(name, id)` pairs.
    pub fn new<N, I>(entries: impl IntoIterator<Item = (N, I)>) -> Self
    where
        N: AsRef<str>,
        I: Into<EntityId>,
    {
        let by_name = entries
            .into_iter()
            .map(|(n, id)| (n.as_ref().to_ascii_lowercase(), id.into()))
            .collect();
        Self { by_name }
    }
}

impl Directory for MemoryDirectory {
    fn resolve(&self, name: &str) -> Option<EntityId> {
        self.by_name.get(&name.to_ascii_lowercase()).cloned()
    }

    fn online(&self) -> Vec<EntityId> {
        let mut ids: Vec<EntityId> = self.by_name.values().cloned().collect();
        ids.sort_unstable();
        ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_ignores_case() {
        let dir = MemoryDirectory::new([("Alex", "id-a"), ("steve", "id-s")]);
        assert_eq!(dir.resolve("ALEX"), Some(EntityId::from("id-a")));
        assert_eq!(dir.resolve("herobrine"), None);
        assert_eq!(dir.online(), vec![EntityId::from("id-a"), EntityId::from("id-s")]);
    }
}
