//! Rich diagnostic error types for mmkg-synth.
//!
//! Each subsystem defines its own error type with miette `#[diagnostic]` derives,
//! providing error codes and help text so a failed run says what went wrong and
//! which configuration value to change.

use miette::Diagnostic;
use thiserror::Error;

use crate::export::ExportError;
use crate::partition::SplitError;

/// Top-level error type for dataset synthesis.
///
/// Each variant wraps a subsystem-specific error, preserving the full diagnostic
/// chain (error codes, help text) through to the user.
#[derive(Debug, Error, Diagnostic)]
pub enum SynthError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Graph(#[from] GraphError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Attribute(#[from] AttributeError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Split(#[from] SplitError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Export(#[from] ExportError),
}

// ---------------------------------------------------------------------------
// Registry errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum RegistryError {
    #[error("duplicate entity: \"{entity}\" already has id {existing_id}")]
    #[diagnostic(
        code(mmkg::registry::duplicate_entity),
        help(
            "Entity URIs must be distinct for the id mapping to be a bijection. \
             Generated universes are distinct by construction; if you built the \
             entity list by hand, remove the repeated URI."
        )
    )]
    DuplicateEntity { entity: String, existing_id: u32 },

    #[error("universe of {size} entities does not fit in 32-bit ids")]
    #[diagnostic(
        code(mmkg::registry::too_large),
        help("Reduce `universe.size` in the configuration.")
    )]
    TooLarge { size: usize },
}

// ---------------------------------------------------------------------------
// Graph errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum GraphError {
    #[error("predicate vocabulary is empty")]
    #[diagnostic(
        code(mmkg::graph::empty_vocabulary),
        help("Add at least one label to `graph.predicates`, e.g. [\"related_to\"].")
    )]
    EmptyVocabulary,
}

// ---------------------------------------------------------------------------
// Attribute errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum AttributeError {
    #[error("{name} must lie in [0, 1], got {value}")]
    #[diagnostic(
        code(mmkg::attributes::probability),
        help("Inclusion probabilities are Bernoulli parameters; use a value between 0 and 1.")
    )]
    InvalidProbability { name: String, value: f64 },

    #[error("word range {min}..={max} is empty")]
    #[diagnostic(
        code(mmkg::attributes::word_range),
        help("Set `attributes.min_words` no larger than `attributes.max_words`.")
    )]
    EmptyWordRange { min: u32, max: u32 },
}

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("failed to read config: {path}")]
    #[diagnostic(
        code(mmkg::config::read),
        help("Ensure the config file exists and is readable.")
    )]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {message}")]
    #[diagnostic(
        code(mmkg::config::parse),
        help("Check the TOML syntax. `mmkg-synth config` prints a valid default file.")
    )]
    Parse { path: String, message: String },

    #[error("failed to serialize config: {message}")]
    #[diagnostic(code(mmkg::config::serialize))]
    Serialize { message: String },

    #[error("failed to write config: {path}")]
    #[diagnostic(
        code(mmkg::config::write),
        help("Ensure you have write permissions to the target directory.")
    )]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration: {message}")]
    #[diagnostic(code(mmkg::config::invalid), help("{message}"))]
    Invalid { message: String },
}

/// Convenience alias for functions returning mmkg-synth results.
pub type SynthResult<T> = std::result::Result<T, SynthError>;
