//! Dataset facade: the full synthesized dataset and its per-split projections.
//!
//! A [`Dataset`] is built once, never mutated afterwards, and shared by
//! reference with the partitioner and the projector.

use rand::{Rng, SeedableRng};

use crate::attributes::{AttributeMaps, AttributeSpec};
use crate::config::SynthConfig;
use crate::entity::EntityId;
use crate::error::SynthResult;
use crate::graph::{PredicateVocabulary, Triple, generate_triples};
use crate::partition::{Partition, Partitioner, Split};
use crate::projection::{ProjectedDataset, project};
use crate::registry::EntityRegistry;

/// The full synthesized dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dataset {
    registry: EntityRegistry,
    triples: Vec<Triple>,
    attributes: AttributeMaps,
}

impl Dataset {
    /// Assemble a dataset from parts.
    pub fn from_parts(
        registry: EntityRegistry,
        triples: Vec<Triple>,
        attributes: AttributeMaps,
    ) -> Self {
        Self {
            registry,
            triples,
            attributes,
        }
    }

    /// Synthesize the dataset described by `config`, seeding a fresh RNG
    /// from `config.seed`.
    pub fn synthesize(config: &SynthConfig) -> SynthResult<Self> {
        config.validate()?;
        tracing::info!(
            entities = config.universe.size,
            triples = config.graph.triples,
            seed = config.seed,
            "synthesizing dataset"
        );
        let mut rng = rand::rngs::StdRng::seed_from_u64(config.seed);
        let registry = EntityRegistry::synthesize(&config.universe.base_uri, config.universe.size)?;
        let vocabulary = config.vocabulary()?;
        Self::generate(
            registry,
            &vocabulary,
            config.graph.triples,
            &config.attribute_spec(),
            &mut rng,
        )
    }

    /// Generate triples then attributes over `registry` using `rng`.
    pub fn generate<R: Rng + ?Sized>(
        registry: EntityRegistry,
        vocabulary: &PredicateVocabulary,
        triple_count: usize,
        spec: &AttributeSpec,
        rng: &mut R,
    ) -> SynthResult<Self> {
        spec.validate()?;
        let ids = registry.ids();
        let triples = generate_triples(&ids, vocabulary, triple_count, &mut *rng);
        let attributes = AttributeMaps::generate(&registry, spec, rng)?;
        let dataset = Self::from_parts(registry, triples, attributes);
        tracing::info!(
            entities = dataset.registry.len(),
            triples = dataset.triples.len(),
            texts = dataset.attributes.texts.len(),
            images = dataset.attributes.images.len(),
            labels = dataset.attributes.labels.len(),
            "dataset generated"
        );
        Ok(dataset)
    }

    pub fn registry(&self) -> &EntityRegistry {
        &self.registry
    }

    pub fn triples(&self) -> &[Triple] {
        &self.triples
    }

    pub fn attributes(&self) -> &AttributeMaps {
        &self.attributes
    }

    /// All entity ids in ascending order.
    pub fn ids(&self) -> Vec<EntityId> {
        self.registry.ids()
    }

    /// Split the entity ids with `partitioner`.
    pub fn partition(&self, partitioner: &Partitioner) -> SynthResult<Partition> {
        Ok(partitioner.partition(&self.ids())?)
    }

    /// Project onto an arbitrary node subset.
    pub fn project(&self, nodes: &[EntityId]) -> ProjectedDataset {
        project(&self.registry, &self.triples, &self.attributes, nodes)
    }

    /// Project onto each split of `partition`, in output order.
    pub fn project_splits<'a>(
        &'a self,
        partition: &'a Partition,
    ) -> impl Iterator<Item = (Split, ProjectedDataset)> + 'a {
        partition.iter().map(move |(split, nodes)| {
            let projected = self.project(nodes);
            tracing::debug!(
                %split,
                nodes = projected.nodes.len(),
                triples = projected.triples.len(),
                "projected split"
            );
            (split, projected)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{AttributeError, SynthError};

    fn small_config() -> SynthConfig {
        let mut config = SynthConfig::default();
        config.universe.size = 40;
        config.graph.triples = 120;
        config
    }

    #[test]
    fn synthesize_default_shape() {
        let dataset = Dataset::synthesize(&SynthConfig::default()).unwrap();
        assert_eq!(dataset.registry().len(), 100);
        assert!(dataset.triples().len() <= 200);
        assert!(dataset.triples().len() > 150);
        assert!(dataset.triples().iter().all(|t| !t.is_self_loop()));
    }

    #[test]
    fn synthesize_is_reproducible() {
        let a = Dataset::synthesize(&small_config()).unwrap();
        let b = Dataset::synthesize(&small_config()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn seed_changes_content() {
        let mut other = small_config();
        other.seed = 43;
        let a = Dataset::synthesize(&small_config()).unwrap();
        let b = Dataset::synthesize(&other).unwrap();
        assert_ne!(a.triples(), b.triples());
    }

    #[test]
    fn project_splits_covers_every_split() {
        let config = small_config();
        let dataset = Dataset::synthesize(&config).unwrap();
        let partitioner = Partitioner::new(config.split_ratios(), config.split.seed).unwrap();
        let partition = dataset.partition(&partitioner).unwrap();

        let projected: Vec<_> = dataset.project_splits(&partition).collect();
        assert_eq!(
            projected.iter().map(|(s, _)| *s).collect::<Vec<_>>(),
            Split::ALL.to_vec()
        );
        let nodes: usize = projected.iter().map(|(_, p)| p.nodes.len()).sum();
        assert_eq!(nodes, 40);
    }

    #[test]
    fn generate_rejects_inverted_word_range() {
        let registry = EntityRegistry::synthesize("http://example.com", 10).unwrap();
        let spec = AttributeSpec {
            word_range: 50..=5,
            ..Default::default()
        };
        let mut rng = rand::rngs::StdRng::seed_from_u64(42);
        let result = Dataset::generate(
            registry,
            &PredicateVocabulary::default(),
            20,
            &spec,
            &mut rng,
        );
        assert!(matches!(
            result,
            Err(SynthError::Attribute(AttributeError::EmptyWordRange { .. }))
        ));
    }

    #[test]
    fn singleton_universe_has_no_triples() {
        let mut config = SynthConfig::default();
        config.universe.size = 1;
        config.graph.triples = 500;
        let dataset = Dataset::synthesize(&config).unwrap();
        assert!(dataset.triples().is_empty());
        assert_eq!(dataset.registry().len(), 1);
    }
}
