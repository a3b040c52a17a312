//! Synthesis configuration, persisted as TOML.
//!
//! Every field has a serde default, so an empty file (or no file at all)
//! reproduces the stock dataset: 100 entities, 200 sampled triples, an
//! 80/10/10 split and seed 42, written under `dmg777k/`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::attributes::AttributeSpec;
use crate::error::{ConfigError, SynthResult};
use crate::graph::{DEFAULT_PREDICATES, PredicateVocabulary};
use crate::partition::SplitRatios;

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SynthConfig {
    /// Seed for the generation RNG (graph and attributes).
    #[serde(default = "default_seed")]
    pub seed: u64,
    #[serde(default)]
    pub universe: UniverseConfig,
    #[serde(default)]
    pub graph: GraphConfig,
    #[serde(default)]
    pub attributes: AttributeConfig,
    #[serde(default)]
    pub split: SplitConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UniverseConfig {
    /// Number of entities.
    #[serde(default = "default_universe_size")]
    pub size: usize,
    /// URI prefix; entities are `{base_uri}/entity_{i}`.
    #[serde(default = "default_base_uri")]
    pub base_uri: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphConfig {
    /// Number of sampling rounds; self-loops are dropped, so fewer may survive.
    #[serde(default = "default_triples")]
    pub triples: usize,
    #[serde(default = "default_predicates")]
    pub predicates: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeConfig {
    #[serde(default = "default_text_probability")]
    pub text_probability: f64,
    #[serde(default = "default_image_probability")]
    pub image_probability: f64,
    #[serde(default = "default_label_probability")]
    pub label_probability: f64,
    #[serde(default = "default_min_words")]
    pub min_words: u32,
    #[serde(default = "default_max_words")]
    pub max_words: u32,
    #[serde(default = "default_image_base")]
    pub image_base: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SplitConfig {
    #[serde(default = "default_train")]
    pub train: f64,
    #[serde(default = "default_valid")]
    pub valid: f64,
    #[serde(default = "default_test")]
    pub test: f64,
    /// Seed for both split stages.
    #[serde(default = "default_seed")]
    pub seed: u64,
    /// Accept empty splits instead of failing.
    #[serde(default)]
    pub allow_empty_splits: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,
}

fn default_seed() -> u64 {
    42
}
fn default_universe_size() -> usize {
    100
}
fn default_base_uri() -> String {
    "http://example.com".into()
}
fn default_triples() -> usize {
    200
}
fn default_predicates() -> Vec<String> {
    DEFAULT_PREDICATES.iter().map(|s| s.to_string()).collect()
}
fn default_text_probability() -> f64 {
    0.7
}
fn default_image_probability() -> f64 {
    0.7
}
fn default_label_probability() -> f64 {
    0.8
}
fn default_min_words() -> u32 {
    5
}
fn default_max_words() -> u32 {
    50
}
fn default_image_base() -> String {
    "http://example.com/images".into()
}
fn default_train() -> f64 {
    0.8
}
fn default_valid() -> f64 {
    0.1
}
fn default_test() -> f64 {
    0.1
}
fn default_output_dir() -> PathBuf {
    PathBuf::from("dmg777k")
}

impl Default for SynthConfig {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            universe: UniverseConfig::default(),
            graph: GraphConfig::default(),
            attributes: AttributeConfig::default(),
            split: SplitConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

impl Default for UniverseConfig {
    fn default() -> Self {
        Self {
            size: default_universe_size(),
            base_uri: default_base_uri(),
        }
    }
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            triples: default_triples(),
            predicates: default_predicates(),
        }
    }
}

impl Default for AttributeConfig {
    fn default() -> Self {
        Self {
            text_probability: default_text_probability(),
            image_probability: default_image_probability(),
            label_probability: default_label_probability(),
            min_words: default_min_words(),
            max_words: default_max_words(),
            image_base: default_image_base(),
        }
    }
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            train: default_train(),
            valid: default_valid(),
            test: default_test(),
            seed: default_seed(),
            allow_empty_splits: false,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
        }
    }
}

impl SynthConfig {
    /// Load from a TOML file.
    pub fn load(path: &Path) -> SynthResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::from_toml_str(&content, &path.display().to_string())
    }

    /// Parse TOML text; `origin` names the source in error messages.
    pub fn from_toml_str(content: &str, origin: &str) -> SynthResult<Self> {
        let config: Self = toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: origin.to_string(),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Render as pretty TOML.
    pub fn to_toml_string(&self) -> SynthResult<String> {
        toml::to_string_pretty(self).map_err(|e| {
            ConfigError::Serialize {
                message: e.to_string(),
            }
            .into()
        })
    }

    /// Save to a TOML file, creating parent directories.
    pub fn save(&self, path: &Path) -> SynthResult<()> {
        let content = self.to_toml_string()?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::Write {
                path: parent.display().to_string(),
                source: e,
            })?;
        }
        std::fs::write(path, content).map_err(|e| {
            ConfigError::Write {
                path: path.display().to_string(),
                source: e,
            }
            .into()
        })
    }

    /// Check value ranges that serde cannot express.
    pub fn validate(&self) -> SynthResult<()> {
        self.attribute_spec().validate()?;
        if self.graph.predicates.is_empty() {
            return Err(invalid("graph.predicates must not be empty".into()));
        }
        self.split_ratios().validate()?;
        Ok(())
    }

    pub fn split_ratios(&self) -> SplitRatios {
        SplitRatios {
            train: self.split.train,
            valid: self.split.valid,
            test: self.split.test,
        }
    }

    pub fn attribute_spec(&self) -> AttributeSpec {
        let a = &self.attributes;
        AttributeSpec {
            text_probability: a.text_probability,
            image_probability: a.image_probability,
            label_probability: a.label_probability,
            word_range: a.min_words..=a.max_words,
            image_base: a.image_base.clone(),
        }
    }

    pub fn vocabulary(&self) -> SynthResult<PredicateVocabulary> {
        PredicateVocabulary::new(self.graph.predicates.iter().cloned())
    }
}

fn invalid(message: String) -> crate::error::SynthError {
    ConfigError::Invalid { message }.into()
}
