//! Random triple synthesis.
//!
//! Each of the `count` rounds samples a subject, a predicate and an object
//! uniformly with replacement. Rounds where subject and object coincide are
//! discarded rather than resampled, so the result holds at most `count`
//! triples and its length varies with the universe size.

use rand::Rng;
use rand::seq::SliceRandom;

use super::{PredicateVocabulary, Triple};
use crate::entity::EntityId;

/// Generate up to `count` triples over `universe`.
///
/// An empty universe produces no triples. A universe of one entity also
/// produces none, since every sampled pair is a self-loop.
pub fn generate_triples<R: Rng + ?Sized>(
    universe: &[EntityId],
    vocabulary: &PredicateVocabulary,
    count: usize,
    rng: &mut R,
) -> Vec<Triple> {
    if universe.is_empty() {
        return Vec::new();
    }

    let mut triples = Vec::with_capacity(count);
    let mut dropped = 0usize;
    for _ in 0..count {
        let (Some(&subject), Some(predicate), Some(&object)) = (
            universe.choose(rng),
            vocabulary.labels().choose(rng),
            universe.choose(rng),
        ) else {
            continue;
        };

        if subject == object {
            dropped += 1;
            continue;
        }
        triples.push(Triple::new(subject, predicate.clone(), object));
    }

    tracing::debug!(
        requested = count,
        realized = triples.len(),
        self_loops_dropped = dropped,
        "generated triples"
    );
    triples
}
