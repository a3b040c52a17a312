// thiserror's #[error("...{field}...")] format strings reference struct fields,
// but the compiler doesn't see through the derive macro and reports false positives.
#![allow(unused_assignments)]

//! # mmkg-synth
//!
//! Synthetic multi-modal knowledge-graph datasets for downstream experiments:
//! URI-identified entities, labeled directed triples, sparse text/image
//! attributes and binary labels, partitioned into train/valid/test splits
//! that are each written with their own slice of the graph.
//!
//! ## Architecture
//!
//! - **Registry** (`registry`): dense, stable entity ids with forward and backward lookup
//! - **Graph** (`graph`): random triple synthesis that drops self-loops
//! - **Attributes** (`attributes`): independent sparse text, image and label maps
//! - **Partition** (`partition`): reproducible two-stage seeded split
//! - **Projection** (`projection`): per-split dataset keeping only interior edges
//! - **Export** (`export`): JSON split files, one per partition
//!
//! ## Library usage
//!
//! ```no_run
//! use mmkg_synth::config::SynthConfig;
//! use mmkg_synth::dataset::Dataset;
//! use mmkg_synth::export::{JsonDirWriter, write_splits};
//! use mmkg_synth::partition::Partitioner;
//!
//! let config = SynthConfig::default();
//! let dataset = Dataset::synthesize(&config).unwrap();
//! let partitioner = Partitioner::new(config.split_ratios(), config.split.seed).unwrap();
//! let partition = dataset.partition(&partitioner).unwrap();
//! let writer = JsonDirWriter::create(&config.output.dir).unwrap();
//! let report = write_splits(&writer, dataset.project_splits(&partition));
//! assert!(report.is_success());
//! ```

pub mod attributes;
pub mod config;
pub mod dataset;
pub mod entity;
pub mod error;
pub mod export;
pub mod graph;
pub mod partition;
pub mod projection;
pub mod registry;
