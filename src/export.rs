//! Split serialization.
//!
//! Each projected split is written as one self-describing JSON record with
//! the fields `e2i`, `i2e`, `triples`, `texts`, `images`, `labels` and
//! `nodes`. Maps are ordered by key, so identical datasets serialize to
//! identical bytes.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::entity::EntityId;
use crate::graph::Triple;
use crate::partition::Split;
use crate::projection::ProjectedDataset;

/// Errors from writing split files.
#[derive(Debug, Error, Diagnostic)]
pub enum ExportError {
    #[error("failed to create output directory: {path}")]
    #[diagnostic(
        code(mmkg::export::create_dir),
        help("Check that the parent directory exists and you have write permissions.")
    )]
    CreateDir {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {path}")]
    #[diagnostic(
        code(mmkg::export::write),
        help("Check write permissions and free disk space in the output directory.")
    )]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize split \"{split}\": {message}")]
    #[diagnostic(code(mmkg::export::serialize))]
    Serialize { split: String, message: String },
}

pub type ExportResult<T> = std::result::Result<T, ExportError>;

/// Borrowed on-disk layout of one split.
#[derive(Debug, Serialize)]
pub struct SplitRecord<'a> {
    pub e2i: &'a BTreeMap<String, EntityId>,
    pub i2e: &'a BTreeMap<EntityId, String>,
    pub triples: &'a [Triple],
    pub texts: &'a BTreeMap<EntityId, String>,
    pub images: &'a BTreeMap<EntityId, String>,
    pub labels: &'a BTreeMap<EntityId, u8>,
    pub nodes: &'a [EntityId],
}

impl<'a> From<&'a ProjectedDataset> for SplitRecord<'a> {
    fn from(p: &'a ProjectedDataset) -> Self {
        Self {
            e2i: p.registry.e2i(),
            i2e: p.registry.i2e(),
            triples: &p.triples,
            texts: &p.attributes.texts,
            images: &p.attributes.images,
            labels: &p.attributes.labels,
            nodes: &p.nodes,
        }
    }
}

/// Exported summary of one written split.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitSummary {
    pub split: Split,
    /// Path of the written file.
    pub file: String,
    pub nodes: usize,
    pub entities: usize,
    pub triples: usize,
    pub texts: usize,
    pub images: usize,
    pub labels: usize,
}

impl SplitSummary {
    pub fn new(split: Split, file: &Path, dataset: &ProjectedDataset) -> Self {
        let s = dataset.summary();
        Self {
            split,
            file: file.display().to_string(),
            nodes: s.nodes,
            entities: s.entities,
            triples: s.triples,
            texts: s.texts,
            images: s.images,
            labels: s.labels,
        }
    }
}

/// Sink for projected splits.
pub trait DatasetWriter {
    /// Persist one split and return where it went.
    fn write(&self, split: Split, dataset: &ProjectedDataset) -> ExportResult<PathBuf>;
}

/// Writes `{dir}/{split}.json`, pretty-printed with four-space indentation.
#[derive(Debug, Clone)]
pub struct JsonDirWriter {
    dir: PathBuf,
}

impl JsonDirWriter {
    /// Create the writer, creating `dir` (and parents) if absent.
    pub fn create(dir: impl Into<PathBuf>) -> ExportResult<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir).map_err(|e| ExportError::CreateDir {
            path: dir.display().to_string(),
            source: e,
        })?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, split: Split) -> PathBuf {
        self.dir.join(format!("{split}.json"))
    }
}

/// Render a split as pretty JSON bytes.
pub fn to_json_bytes(split: Split, dataset: &ProjectedDataset) -> ExportResult<Vec<u8>> {
    let record = SplitRecord::from(dataset);
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    record
        .serialize(&mut ser)
        .map_err(|e| ExportError::Serialize {
            split: split.to_string(),
            message: e.to_string(),
        })?;
    Ok(buf)
}

impl DatasetWriter for JsonDirWriter {
    fn write(&self, split: Split, dataset: &ProjectedDataset) -> ExportResult<PathBuf> {
        let bytes = to_json_bytes(split, dataset)?;
        let path = self.path_for(split);
        std::fs::write(&path, bytes).map_err(|e| ExportError::Write {
            path: path.display().to_string(),
            source: e,
        })?;
        Ok(path)
    }
}

/// Outcome of writing every split.
#[derive(Debug, Default)]
pub struct WriteReport {
    pub written: Vec<SplitSummary>,
    pub failed: Vec<(Split, ExportError)>,
}

impl WriteReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    /// Serializable view listing both written and failed splits.
    pub fn summary(&self) -> ReportSummary<'_> {
        ReportSummary {
            written: &self.written,
            failed: self
                .failed
                .iter()
                .map(|(split, e)| FailedSplit {
                    split: *split,
                    error: e.to_string(),
                })
                .collect(),
        }
    }
}

/// A split that could not be written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedSplit {
    pub split: Split,
    pub error: String,
}

/// Machine-readable outcome of [`write_splits`].
#[derive(Debug, Serialize)]
pub struct ReportSummary<'a> {
    pub written: &'a [SplitSummary],
    pub failed: Vec<FailedSplit>,
}

/// Write every split, continuing past individual failures.
pub fn write_splits<W, I>(writer: &W, splits: I) -> WriteReport
where
    W: DatasetWriter + ?Sized,
    I: IntoIterator<Item = (Split, ProjectedDataset)>,
{
    let mut report = WriteReport::default();
    for (split, dataset) in splits {
        match writer.write(split, &dataset) {
            Ok(path) => {
                tracing::info!(
                    %split,
                    path = %path.display(),
                    nodes = dataset.nodes.len(),
                    triples = dataset.triples.len(),
                    "wrote split"
                );
                report.written.push(SplitSummary::new(split, &path, &dataset));
            }
            Err(e) => {
                tracing::error!(%split, error = %e, "failed to write split");
                report.failed.push((split, e));
            }
        }
    }
    report
}
