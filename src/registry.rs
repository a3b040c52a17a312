//! Entity registry: bidirectional URI ↔ ID mapping.
//!
//! The [`EntityRegistry`] provides lookups in both directions using two
//! ordered maps. The full registry assigns dense ids in universe order; a
//! restricted registry (see [`EntityRegistry::restrict`]) keeps the original
//! ids of the entities it retains.

use std::collections::BTreeMap;

use crate::entity::{EntityId, NodeSet, entity_uri};
use crate::error::{RegistryError, SynthResult};

/// Bidirectional registry mapping entity URIs to ids and back.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntityRegistry {
    /// Forward map: entity URI → id.
    e2i: BTreeMap<String, EntityId>,
    /// Reverse map: id → entity URI.
    i2e: BTreeMap<EntityId, String>,
}

impl EntityRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign sequential ids to `entities` in input order.
    ///
    /// Errors if any URI appears twice.
    pub fn from_entities<I, S>(entities: I) -> SynthResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut registry = Self::new();
        for (index, entity) in entities.into_iter().enumerate() {
            let raw = u32::try_from(index).map_err(|_| RegistryError::TooLarge {
                size: index.saturating_add(1),
            })?;
            registry.insert(entity.into(), EntityId::new(raw))?;
        }
        Ok(registry)
    }

    /// Build the registry of a generated universe `{base}/entity_{i}`, `i < size`.
    pub fn synthesize(base: &str, size: usize) -> SynthResult<Self> {
        let size = u32::try_from(size).map_err(|_| RegistryError::TooLarge { size })?;
        Self::from_entities((0..size).map(|i| entity_uri(base, i)))
    }

    fn insert(&mut self, entity: String, id: EntityId) -> SynthResult<()> {
        if let Some(existing) = self.e2i.get(&entity) {
            return Err(RegistryError::DuplicateEntity {
                entity,
                existing_id: existing.get(),
            }
            .into());
        }
        self.i2e.insert(id, entity.clone());
        self.e2i.insert(entity, id);
        Ok(())
    }

    /// Look up the id of an entity URI.
    pub fn id_of(&self, entity: &str) -> Option<EntityId> {
        self.e2i.get(entity).copied()
    }

    /// Look up the entity URI of an id.
    pub fn entity_of(&self, id: EntityId) -> Option<&str> {
        self.i2e.get(&id).map(String::as_str)
    }

    /// All ids in ascending order.
    pub fn ids(&self) -> Vec<EntityId> {
        self.i2e.keys().copied().collect()
    }

    /// `(id, uri)` pairs in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &str)> {
        self.i2e.iter().map(|(id, uri)| (*id, uri.as_str()))
    }

    pub fn e2i(&self) -> &BTreeMap<String, EntityId> {
        &self.e2i
    }

    pub fn i2e(&self) -> &BTreeMap<EntityId, String> {
        &self.i2e
    }

    /// Number of registered entities.
    pub fn len(&self) -> usize {
        self.i2e.len()
    }

    pub fn is_empty(&self) -> bool {
        self.i2e.is_empty()
    }

    /// Keep only the entries whose id is in `nodes`. Ids are preserved.
    pub fn restrict(&self, nodes: &NodeSet) -> Self {
        let i2e: BTreeMap<EntityId, String> = self
            .i2e
            .iter()
            .filter(|(id, _)| nodes.contains(**id))
            .map(|(id, uri)| (*id, uri.clone()))
            .collect();
        let e2i = i2e.iter().map(|(id, uri)| (uri.clone(), *id)).collect();
        Self { e2i, i2e }
    }
}
