//! Sparse per-entity attributes: text descriptions, image references and
//! binary labels.
//!
//! Every map is generated independently. For each entity, in id order, one
//! Bernoulli trial decides inclusion and only then is a value drawn, so an
//! entity may carry any combination of the three attributes.

use std::collections::BTreeMap;
use std::ops::RangeInclusive;

use rand::Rng;

use crate::entity::{EntityId, NodeSet, local_name};
use crate::error::{AttributeError, SynthResult};
use crate::registry::EntityRegistry;

/// Parameters for attribute synthesis.
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeSpec {
    /// Probability an entity receives a text description.
    pub text_probability: f64,
    /// Probability an entity receives an image reference.
    pub image_probability: f64,
    /// Probability an entity receives a label.
    pub label_probability: f64,
    /// Word-count range quoted in text descriptions.
    pub word_range: RangeInclusive<u32>,
    /// Prefix for image URLs (`{image_base}/{id}.jpg`).
    pub image_base: String,
}

impl Default for AttributeSpec {
    fn default() -> Self {
        Self {
            text_probability: 0.7,
            image_probability: 0.7,
            label_probability: 0.8,
            word_range: 5..=50,
            image_base: "http://example.com/images".into(),
        }
    }
}

impl AttributeSpec {
    /// Reject probabilities outside [0, 1] and an empty word range.
    pub fn validate(&self) -> SynthResult<()> {
        for (name, value) in [
            ("attributes.text_probability", self.text_probability),
            ("attributes.image_probability", self.image_probability),
            ("attributes.label_probability", self.label_probability),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(AttributeError::InvalidProbability {
                    name: name.into(),
                    value,
                }
                .into());
            }
        }
        if self.word_range.is_empty() {
            return Err(AttributeError::EmptyWordRange {
                min: *self.word_range.start(),
                max: *self.word_range.end(),
            }
            .into());
        }
        Ok(())
    }
}

/// The three sparse attribute maps of a dataset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeMaps {
    pub texts: BTreeMap<EntityId, String>,
    pub images: BTreeMap<EntityId, String>,
    pub labels: BTreeMap<EntityId, u8>,
}

impl AttributeMaps {
    /// Draw all three maps for the entities of `registry`.
    ///
    /// Maps are drawn in the order texts, images, labels. Fails before
    /// drawing anything if `spec` does not validate.
    pub fn generate<R: Rng + ?Sized>(
        registry: &EntityRegistry,
        spec: &AttributeSpec,
        rng: &mut R,
    ) -> SynthResult<Self> {
        spec.validate()?;
        let texts = sparse_map(registry, spec.text_probability, &mut *rng, |rng, _, uri| {
            let words = rng.gen_range(spec.word_range.clone());
            format!("Description of {} with {words} words.", local_name(uri))
        });
        let base = spec.image_base.trim_end_matches('/');
        let images = sparse_map(registry, spec.image_probability, &mut *rng, |_, id, _| {
            format!("{base}/{id}.jpg")
        });
        let labels = sparse_map(registry, spec.label_probability, &mut *rng, |rng, _, _| {
            rng.gen_range(0..=1u8)
        });

        tracing::debug!(
            texts = texts.len(),
            images = images.len(),
            labels = labels.len(),
            "generated attributes"
        );
        Ok(Self {
            texts,
            images,
            labels,
        })
    }

    /// Keep only the entries whose key is in `nodes`.
    pub fn restrict(&self, nodes: &NodeSet) -> Self {
        Self {
            texts: restrict_map(&self.texts, nodes),
            images: restrict_map(&self.images, nodes),
            labels: restrict_map(&self.labels, nodes),
        }
    }
}

fn sparse_map<R, V, F>(
    registry: &EntityRegistry,
    probability: f64,
    rng: &mut R,
    mut value: F,
) -> BTreeMap<EntityId, V>
where
    R: Rng + ?Sized,
    F: FnMut(&mut R, EntityId, &str) -> V,
{
    let mut map = BTreeMap::new();
    for (id, uri) in registry.iter() {
        if rng.r#gen::<f64>() < probability {
            map.insert(id, value(&mut *rng, id, uri));
        }
    }
    map
}

fn restrict_map<V: Clone>(map: &BTreeMap<EntityId, V>, nodes: &NodeSet) -> BTreeMap<EntityId, V> {
    map.iter()
        .filter(|(id, _)| nodes.contains(**id))
        .map(|(id, v)| (*id, v.clone()))
        .collect()
}
