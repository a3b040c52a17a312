//! Train/validation/test partitioning of the entity-id set.
//!
//! Partitioning runs in two seeded stages: the full id list is split into
//! `train` and a held-out remainder, and the remainder is split into `valid`
//! and `test`. Both stages use [`train_test_split`], which shuffles with an
//! RNG seeded from the configured seed, so the same ids and seed always
//! yield the same three lists in the same order.

use rand::SeedableRng;
use rand::seq::SliceRandom;

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::entity::EntityId;

/// Tolerance when checking that split ratios sum to one.
const RATIO_EPSILON: f64 = 1e-6;

/// Relative error below which a held-out size counts as an exact integer.
const ROUNDING_NOISE: f64 = 1e-12;

/// Errors from partition operations.
#[derive(Debug, Error, Diagnostic)]
pub enum SplitError {
    #[error("invalid split ratios: {message}")]
    #[diagnostic(
        code(mmkg::split::invalid_ratios),
        help(
            "Ratios must each lie in [0, 1], sum to 1, and give the train split \
             a positive share, e.g. train = 0.8, valid = 0.1, test = 0.1."
        )
    )]
    InvalidRatios { message: String },

    #[error("split \"{split}\" is empty for a universe of {universe} entities")]
    #[diagnostic(
        code(mmkg::split::empty),
        help(
            "Increase `universe.size`, rebalance the split ratios, or set \
             `split.allow_empty_splits = true` if empty splits are acceptable."
        )
    )]
    EmptySplit { split: String, universe: usize },
}

pub type SplitResult<T> = std::result::Result<T, SplitError>;

/// Name of one of the three partitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Split {
    Train,
    Valid,
    Test,
}

impl Split {
    /// All splits in output order.
    pub const ALL: [Split; 3] = [Split::Train, Split::Valid, Split::Test];

    pub fn as_str(self) -> &'static str {
        match self {
            Split::Train => "train",
            Split::Valid => "valid",
            Split::Test => "test",
        }
    }
}

impl std::fmt::Display for Split {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fractions of the universe assigned to each split.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplitRatios {
    pub train: f64,
    pub valid: f64,
    pub test: f64,
}

impl Default for SplitRatios {
    fn default() -> Self {
        Self {
            train: 0.8,
            valid: 0.1,
            test: 0.1,
        }
    }
}

impl SplitRatios {
    pub fn validate(&self) -> SplitResult<()> {
        for (name, value) in [
            ("train", self.train),
            ("valid", self.valid),
            ("test", self.test),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(SplitError::InvalidRatios {
                    message: format!("{name} ratio {value} is outside [0, 1]"),
                });
            }
        }
        let sum = self.train + self.valid + self.test;
        if (sum - 1.0).abs() > RATIO_EPSILON {
            return Err(SplitError::InvalidRatios {
                message: format!("ratios sum to {sum}, expected 1"),
            });
        }
        if self.train <= 0.0 {
            return Err(SplitError::InvalidRatios {
                message: "train ratio must be positive".into(),
            });
        }
        Ok(())
    }

    /// Fraction held out of the first stage (`valid + test`).
    fn held_out(&self) -> f64 {
        self.valid + self.test
    }

    /// Fraction of the held-out remainder that goes to `test`.
    fn test_share_of_held_out(&self) -> f64 {
        let held_out = self.held_out();
        if held_out <= 0.0 {
            0.0
        } else {
            self.test / held_out
        }
    }
}

/// Reproducibly split `items` into `(kept, held_out)`.
///
/// A copy of `items` is shuffled with an RNG seeded from `seed`; the first
/// `ceil(test_fraction * n)` shuffled items form the held-out side and the
/// rest the kept side. Both sides keep their shuffled order.
pub fn train_test_split<T: Clone>(items: &[T], test_fraction: f64, seed: u64) -> (Vec<T>, Vec<T>) {
    let mut shuffled = items.to_vec();
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
    shuffled.shuffle(&mut rng);

    let n_test = held_out_len(items.len(), test_fraction);
    let kept = shuffled.split_off(n_test);
    (kept, shuffled)
}

fn held_out_len(n: usize, fraction: f64) -> usize {
    let raw = fraction.clamp(0.0, 1.0) * n as f64;
    let nearest = raw.round();
    // Float noise just above a positive integer, e.g. 0.07 * 100.
    let size = if nearest >= 1.0 && raw >= nearest && raw - nearest <= raw * ROUNDING_NOISE {
        nearest
    } else {
        raw.ceil()
    };
    (size as usize).min(n)
}

/// The three disjoint id lists covering the universe.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Partition {
    pub train: Vec<EntityId>,
    pub valid: Vec<EntityId>,
    pub test: Vec<EntityId>,
}

impl Partition {
    pub fn get(&self, split: Split) -> &[EntityId] {
        match split {
            Split::Train => &self.train,
            Split::Valid => &self.valid,
            Split::Test => &self.test,
        }
    }

    /// `(split, nodes)` pairs in output order.
    pub fn iter(&self) -> impl Iterator<Item = (Split, &[EntityId])> {
        Split::ALL.into_iter().map(move |s| (s, self.get(s)))
    }

    /// Total number of ids across the three splits.
    pub fn len(&self) -> usize {
        self.train.len() + self.valid.len() + self.test.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Two-stage seeded partitioner.
#[derive(Debug, Clone)]
pub struct Partitioner {
    ratios: SplitRatios,
    seed: u64,
    allow_empty: bool,
}

impl Partitioner {
    /// Create a partitioner. Errors on invalid ratios.
    pub fn new(ratios: SplitRatios, seed: u64) -> SplitResult<Self> {
        ratios.validate()?;
        Ok(Self {
            ratios,
            seed,
            allow_empty: false,
        })
    }

    /// Accept empty splits instead of failing.
    pub fn allow_empty(mut self, allow: bool) -> Self {
        self.allow_empty = allow;
        self
    }

    /// Partition `ids` into train, valid and test.
    pub fn partition(&self, ids: &[EntityId]) -> SplitResult<Partition> {
        let (train, temp) = train_test_split(ids, self.ratios.held_out(), self.seed);
        let (valid, test) =
            train_test_split(&temp, self.ratios.test_share_of_held_out(), self.seed);
        let partition = Partition { train, valid, test };

        for (split, nodes) in partition.iter() {
            if !nodes.is_empty() {
                continue;
            }
            if !self.allow_empty {
                return Err(SplitError::EmptySplit {
                    split: split.to_string(),
                    universe: ids.len(),
                });
            }
            tracing::warn!(%split, universe = ids.len(), "split is empty");
        }

        tracing::info!(
            train = partition.train.len(),
            valid = partition.valid.len(),
            test = partition.test.len(),
            seed = self.seed,
            "partitioned entities"
        );
        Ok(partition)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    fn ids(n: u32) -> Vec<EntityId> {
        (0..n).map(EntityId::new).collect()
    }

    #[test]
    fn default_ratios_on_hundred_entities() {
        let p = Partitioner::new(SplitRatios::default(), 42).unwrap();
        let part = p.partition(&ids(100)).unwrap();
        assert_eq!(part.train.len(), 80);
        assert_eq!(part.valid.len(), 10);
        assert_eq!(part.test.len(), 10);
    }

    #[test]
    fn splits_are_disjoint_and_cover_universe() {
        let p = Partitioner::new(SplitRatios::default(), 7).unwrap();
        let universe = ids(57);
        let part = p.partition(&universe).unwrap();

        let train: HashSet<_> = part.train.iter().collect();
        let valid: HashSet<_> = part.valid.iter().collect();
        let test: HashSet<_> = part.test.iter().collect();
        assert!(train.is_disjoint(&valid));
        assert!(train.is_disjoint(&test));
        assert!(valid.is_disjoint(&test));

        let union: HashSet<_> = train.union(&valid).chain(test.iter()).copied().collect();
        assert_eq!(union, universe.iter().collect());
        assert_eq!(part.len(), universe.len());
    }

    #[test]
    fn same_seed_same_partition() {
        let p = Partitioner::new(SplitRatios::default(), 42).unwrap();
        let a = p.partition(&ids(100)).unwrap();
        let b = p.partition(&ids(100)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn different_seed_reorders() {
        let a = Partitioner::new(SplitRatios::default(), 1)
            .unwrap()
            .partition(&ids(100))
            .unwrap();
        let b = Partitioner::new(SplitRatios::default(), 2)
            .unwrap()
            .partition(&ids(100))
            .unwrap();
        assert_ne!(a.train, b.train);
    }

    #[test]
    fn split_is_shuffled_not_sliced() {
        let (kept, held) = train_test_split(&ids(100), 0.2, 42);
        assert_eq!(held.len(), 20);
        assert_eq!(kept.len(), 80);
        assert_ne!(kept, ids(80));
    }

    #[test]
    fn held_out_len_rounds_up() {
        assert_eq!(held_out_len(100, 0.2), 20);
        assert_eq!(held_out_len(100, 1.0 - 0.8), 20);
        assert_eq!(held_out_len(20, 0.5), 10);
        assert_eq!(held_out_len(5, 0.5), 3);
        assert_eq!(held_out_len(3, 0.0), 0);
        assert_eq!(held_out_len(3, 1.0), 3);
    }

    #[test]
    fn tiny_positive_fraction_holds_out_one() {
        assert_eq!(held_out_len(10, 5e-8), 1);
        assert_eq!(held_out_len(10, 0.1 + 5e-8), 2);
        assert_eq!(held_out_len(3, 0.1), 1);
        assert_eq!(held_out_len(100, 0.07), 7);

        let items: Vec<u32> = (0..10).collect();
        let (kept, held) = train_test_split(&items, 5e-8, 1);
        assert_eq!(held.len(), 1);
        assert_eq!(kept.len(), 9);
    }

    #[test]
    fn tiny_universe_fails_fast() {
        let p = Partitioner::new(SplitRatios::default(), 42).unwrap();
        let err = p.partition(&ids(2)).unwrap_err();
        assert!(matches!(err, SplitError::EmptySplit { .. }));
    }

    #[test]
    fn tiny_universe_allowed_when_opted_in() {
        let p = Partitioner::new(SplitRatios::default(), 42)
            .unwrap()
            .allow_empty(true);
        let part = p.partition(&ids(2)).unwrap();
        assert_eq!(part.len(), 2);
    }

    #[test]
    fn invalid_ratios_rejected() {
        let bad_sum = SplitRatios {
            train: 0.5,
            valid: 0.1,
            test: 0.1,
        };
        assert!(Partitioner::new(bad_sum, 42).is_err());

        let negative = SplitRatios {
            train: 1.2,
            valid: -0.1,
            test: -0.1,
        };
        assert!(Partitioner::new(negative, 42).is_err());

        let no_train = SplitRatios {
            train: 0.0,
            valid: 0.5,
            test: 0.5,
        };
        assert!(Partitioner::new(no_train, 42).is_err());
    }

    #[test]
    fn split_names() {
        assert_eq!(Split::Train.to_string(), "train");
        assert_eq!(Split::Valid.as_str(), "valid");
        assert_eq!(
            serde_json::to_string(&Split::Test).unwrap(),
            "\"test\""
        );
    }
}
