//! Relationship graph: labeled directed triples over entity ids.
//!
//! - [`Triple`]: one `(subject, predicate, object)` edge, serialized as a
//!   three-element array `[subject, "predicate", object]`
//! - [`PredicateVocabulary`]: the fixed label set predicates are drawn from
//! - [`generate`]: random triple synthesis that drops self-loops

pub mod generate;

use serde::{Deserialize, Serialize};

use crate::entity::EntityId;
use crate::error::{GraphError, SynthResult};

pub use generate::generate_triples;

/// Labels used when no vocabulary is configured.
pub const DEFAULT_PREDICATES: [&str; 3] = ["related_to", "part_of", "has_property"];

/// A directed, labeled edge between two entities.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(
    from = "(EntityId, String, EntityId)",
    into = "(EntityId, String, EntityId)"
)]
pub struct Triple {
    pub subject: EntityId,
    pub predicate: String,
    pub object: EntityId,
}

impl Triple {
    pub fn new(subject: EntityId, predicate: impl Into<String>, object: EntityId) -> Self {
        Self {
            subject,
            predicate: predicate.into(),
            object,
        }
    }

    pub fn is_self_loop(&self) -> bool {
        self.subject == self.object
    }
}

impl From<(EntityId, String, EntityId)> for Triple {
    fn from((subject, predicate, object): (EntityId, String, EntityId)) -> Self {
        Self {
            subject,
            predicate,
            object,
        }
    }
}

impl From<Triple> for (EntityId, String, EntityId) {
    fn from(t: Triple) -> Self {
        (t.subject, t.predicate, t.object)
    }
}

/// Non-empty set of predicate labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PredicateVocabulary {
    labels: Vec<String>,
}

impl PredicateVocabulary {
    /// Build a vocabulary. Errors if `labels` is empty.
    pub fn new<I, S>(labels: I) -> SynthResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let labels: Vec<String> = labels.into_iter().map(Into::into).collect();
        if labels.is_empty() {
            return Err(GraphError::EmptyVocabulary.into());
        }
        Ok(Self { labels })
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }
}

impl Default for PredicateVocabulary {
    fn default() -> Self {
        Self {
            labels: DEFAULT_PREDICATES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SynthError;

    #[test]
    fn triple_serializes_as_array() {
        let t = Triple::new(EntityId::new(0), "related_to", EntityId::new(1));
        let json = serde_json::to_string(&t).unwrap();
        assert_eq!(json, r#"[0,"related_to",1]"#);

        let back: Triple = serde_json::from_str(&json).unwrap();
        assert_eq!(back, t);
    }

    #[test]
    fn self_loop_detection() {
        assert!(Triple::new(EntityId::new(2), "part_of", EntityId::new(2)).is_self_loop());
        assert!(!Triple::new(EntityId::new(2), "part_of", EntityId::new(3)).is_self_loop());
    }

    #[test]
    fn empty_vocabulary_rejected() {
        let err = PredicateVocabulary::new(Vec::<String>::new()).unwrap_err();
        assert!(matches!(err, SynthError::Graph(GraphError::EmptyVocabulary)));
    }

    #[test]
    fn default_vocabulary() {
        let vocab = PredicateVocabulary::default();
        assert_eq!(vocab.labels(), &["related_to", "part_of", "has_property"]);
    }
}
