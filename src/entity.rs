//! Core entity types.
//!
//! Every entity in a synthesized universe is a URI of the form
//! `{base}/entity_{i}` and is identified by a dense [`EntityId`]. A
//! [`NodeSet`] is the O(1) membership view over a subset of ids used when
//! projecting a dataset onto one split.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Dense integer identifier of an entity, assigned in universe order from 0.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
#[repr(transparent)]
pub struct EntityId(u32);

impl EntityId {
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Get the underlying `u32` value.
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl From<u32> for EntityId {
    fn from(raw: u32) -> Self {
        Self(raw)
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Build the URI of the `index`-th entity under `base`.
pub fn entity_uri(base: &str, index: u32) -> String {
    format!("{}/entity_{index}", base.trim_end_matches('/'))
}

/// The last `/`-separated segment of an entity URI (`entity_3` for
/// `http://example.com/entity_3`).
pub fn local_name(uri: &str) -> &str {
    uri.rsplit('/').next().unwrap_or(uri)
}

/// Set of entity ids with constant-time membership.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeSet {
    members: HashSet<EntityId>,
}

impl NodeSet {
    pub fn contains(&self, id: EntityId) -> bool {
        self.members.contains(&id)
    }

    /// True when both endpoints of an edge are members.
    pub fn contains_edge(&self, subject: EntityId, object: EntityId) -> bool {
        self.contains(subject) && self.contains(object)
    }
}

impl FromIterator<EntityId> for NodeSet {
    fn from_iter<I: IntoIterator<Item = EntityId>>(iter: I) -> Self {
        Self {
            members: iter.into_iter().collect(),
        }
    }
}

impl<'a> FromIterator<&'a EntityId> for NodeSet {
    fn from_iter<I: IntoIterator<Item = &'a EntityId>>(iter: I) -> Self {
        iter.into_iter().copied().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uri_and_local_name() {
        let uri = entity_uri("http://example.com", 3);
        assert_eq!(uri, "http://example.com/entity_3");
        assert_eq!(local_name(&uri), "entity_3");
    }

    #[test]
    fn trailing_slash_in_base_is_ignored() {
        assert_eq!(
            entity_uri("http://example.com/", 0),
            "http://example.com/entity_0"
        );
    }

    #[test]
    fn local_name_without_slash_is_whole_string() {
        assert_eq!(local_name("entity_9"), "entity_9");
    }

    #[test]
    fn node_set_edge_membership() {
        let set: NodeSet = [0, 1, 3].into_iter().map(EntityId::new).collect();
        assert!(set.contains(EntityId::new(3)));
        assert!(set.contains_edge(EntityId::new(0), EntityId::new(1)));
        assert!(!set.contains_edge(EntityId::new(1), EntityId::new(2)));
        assert!(!set.contains_edge(EntityId::new(4), EntityId::new(3)));
    }

    #[test]
    fn entity_id_serializes_as_plain_integer() {
        let json = serde_json::to_string(&EntityId::new(42)).unwrap();
        assert_eq!(json, "42");
    }
}
