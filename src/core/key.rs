//! # Entity identifiers and pair keys.
//!
//! [`EntityId`] is an opaque, stable identifier handed out by the host environment
//! (a UUID string, a session id, ...). The registry never interprets it beyond
//! rejecting empty values.
//!
//! A [`PairKey`] names one potential highlight relationship: `subject` as seen by
//! `observer`. `(a, b)` and `(b, a)` are different keys.

use std::fmt;
use std::sync::Arc;

/// Opaque identifier of an entity known to the host environment.
///
/// Cheap to clone (`Arc<str>`).
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(Arc<str>);

impl EntityId {
    /// Wraps a host identifier.
    pub fn new(id: impl Into<Arc<str>>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True if the identifier is empty (or whitespace only).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl From<&str> for EntityId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for EntityId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// `(observer, subject)` tuple identifying one highlight relationship.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PairKey {
    /// The viewer who sees the highlight.
    pub observer: EntityId,
    /// The entity being highlighted.
    pub subject: EntityId,
}

impl PairKey {
    /// Builds a key from its two halves.
    pub fn new(observer: impl Into<EntityId>, subject: impl Into<EntityId>) -> Self {
        Self {
            observer: observer.into(),
            subject: subject.into(),
        }
    }
}

impl fmt::Display for PairKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}->{}", self.observer, self.subject)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_ids_are_empty() {
        assert!(EntityId::from("").is_empty());
        assert!(EntityId::from("   ").is_empty());
        assert!(!EntityId::from("steve").is_empty());
    }

    #[test]
    fn test_pair_key_is_ordered() {
        let ab = PairKey::new("a", "b");
        let ba = PairKey::new("b", "a");
        assert_ne!(ab, ba);
        assert_eq!(ab.to_string(), "a->b");
    }
}
