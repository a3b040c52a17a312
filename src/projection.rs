//! Subset projection: the self-contained slice of a dataset seen by one split.
//!
//! A projection keeps exactly the registry entries, attributes and triples
//! that live entirely inside the target node set. Edges with one endpoint
//! outside the set are dropped from every projection. Ids in the target set
//! that the full registry does not know never match anything and are
//! silently left out of the derived fields; `nodes` itself is kept as given.

use crate::attributes::AttributeMaps;
use crate::entity::{EntityId, NodeSet};
use crate::graph::Triple;
use crate::registry::EntityRegistry;

/// A dataset restricted to one node subset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectedDataset {
    pub registry: EntityRegistry,
    pub triples: Vec<Triple>,
    pub attributes: AttributeMaps,
    pub nodes: Vec<EntityId>,
}

/// Per-field sizes of a projection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProjectionSummary {
    pub nodes: usize,
    pub entities: usize,
    pub triples: usize,
    pub texts: usize,
    pub images: usize,
    pub labels: usize,
}

impl ProjectedDataset {
    pub fn summary(&self) -> ProjectionSummary {
        ProjectionSummary {
            nodes: self.nodes.len(),
            entities: self.registry.len(),
            triples: self.triples.len(),
            texts: self.attributes.texts.len(),
            images: self.attributes.images.len(),
            labels: self.attributes.labels.len(),
        }
    }
}

/// Project the full dataset onto `nodes`.
///
/// Triples are kept in their original order and only when both endpoints
/// are members of `nodes`.
pub fn project(
    registry: &EntityRegistry,
    triples: &[Triple],
    attributes: &AttributeMaps,
    nodes: &[EntityId],
) -> ProjectedDataset {
    let members: NodeSet = nodes.iter().collect();

    let triples: Vec<Triple> = triples
        .iter()
        .filter(|t| members.contains_edge(t.subject, t.object))
        .cloned()
        .collect();

    ProjectedDataset {
        registry: registry.restrict(&members),
        triples,
        attributes: attributes.restrict(&members),
        nodes: nodes.to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(raw: u32) -> EntityId {
        EntityId::new(raw)
    }

    fn five_entity_fixture() -> (EntityRegistry, Vec<Triple>, AttributeMaps) {
        let registry = EntityRegistry::synthesize("http://example.com", 5).unwrap();
        let triples = vec![
            Triple::new(id(0), "related_to", id(1)),
            Triple::new(id(1), "part_of", id(2)),
            Triple::new(id(2), "related_to", id(0)),
            Triple::new(id(3), "has_property", id(4)),
        ];
        let mut attributes = AttributeMaps::default();
        attributes.texts.insert(id(0), "Description of entity_0 with 7 words.".into());
        attributes.texts.insert(id(2), "Description of entity_2 with 9 words.".into());
        attributes.images.insert(id(3), "http://example.com/images/3.jpg".into());
        attributes.labels.insert(id(1), 1);
        attributes.labels.insert(id(4), 0);
        (registry, triples, attributes)
    }

    #[test]
    fn keeps_only_interior_triples() {
        let (registry, triples, attributes) = five_entity_fixture();
        let projected = project(&registry, &triples, &attributes, &[id(0), id(1), id(3)]);

        assert_eq!(projected.triples, vec![Triple::new(id(0), "related_to", id(1))]);
    }

    #[test]
    fn restricts_registry_and_attributes() {
        let (registry, triples, attributes) = five_entity_fixture();
        let projected = project(&registry, &triples, &attributes, &[id(0), id(1), id(3)]);

        assert_eq!(projected.registry.ids(), vec![id(0), id(1), id(3)]);
        assert_eq!(
            projected.registry.entity_of(id(3)),
            Some("http://example.com/entity_3")
        );
        assert_eq!(projected.attributes.texts.keys().copied().collect::<Vec<_>>(), vec![id(0)]);
        assert_eq!(projected.attributes.images.keys().copied().collect::<Vec<_>>(), vec![id(3)]);
        assert_eq!(projected.attributes.labels.get(&id(1)), Some(&1));
        assert!(!projected.attributes.labels.contains_key(&id(4)));
    }

    #[test]
    fn nodes_are_kept_verbatim() {
        let (registry, triples, attributes) = five_entity_fixture();
        let nodes = vec![id(3), id(0), id(1)];
        let projected = project(&registry, &triples, &attributes, &nodes);
        assert_eq!(projected.nodes, nodes);
    }

    #[test]
    fn unknown_ids_are_silently_excluded() {
        let (registry, triples, attributes) = five_entity_fixture();
        let nodes = vec![id(0), id(1), id(99)];
        let projected = project(&registry, &triples, &attributes, &nodes);

        assert_eq!(projected.registry.len(), 2);
        assert!(projected.registry.entity_of(id(99)).is_none());
        assert_eq!(projected.nodes, nodes);
        assert_eq!(projected.triples.len(), 1);
    }

    #[test]
    fn empty_subset_projects_to_empty_dataset() {
        let (registry, triples, attributes) = five_entity_fixture();
        let projected = project(&registry, &triples, &attributes, &[]);
        assert_eq!(projected, ProjectedDataset::default());
    }

    #[test]
    fn summary_counts_fields() {
        let (registry, triples, attributes) = five_entity_fixture();
        let summary = project(&registry, &triples, &attributes, &[id(0), id(1), id(3)]).summary();
        assert_eq!(
            summary,
            ProjectionSummary {
                nodes: 3,
                entities: 3,
                triples: 1,
                texts: 1,
                images: 1,
                labels: 1,
            }
        );
    }
}
