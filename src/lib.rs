//! # Rulesync - AI assistant rule synchronization
//!
//! Scans project-local rule directories (Cursor `.mdc` rules, `.code_review`
//! guidelines, ...), normalizes each file into a [`RuleRecord`], and splices a
//! rendered summary into documentation files such as `AGENTS.md` between
//! marker lines.
//!
//! Rulesync provides:
//! - Pluggable parsers and generators behind the [`RuleParser`] and
//!   [`RuleGenerator`] traits
//! - A factory table that builds named pipelines from `plugins.yaml`
//! - A directory scanner with category derivation
//! - An idempotent marker-delimited document merger

pub mod rule;
pub mod parser;
pub mod generator;
pub mod registry;
pub mod scanner;
pub mod merger;
pub mod sync;
pub mod config;
pub mod output;
pub mod ui;

// Re-exports for convenient access
pub use rule::{ParseContext, RuleRecord};
pub use parser::RuleParser;
pub use generator::{GeneratorOptions, GroupedRules, RuleGenerator};
pub use registry::{Pipeline, PipelineRegistry, PluginRegistry};
pub use merger::{MergeAction, MergeOutcome};
pub use sync::{SyncOptions, SyncReport};

use std::path::PathBuf;

/// Result type alias for Rulesync operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for Rulesync operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("IO error at {path:?}: {source}")]
    IoAt {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Unknown parser: {module}.{class}")]
    UnknownParser { module: String, class: String },

    #[error("Unknown generator: {module}.{class}")]
    UnknownGenerator { module: String, class: String },

    #[error("Malformed document {path:?}: found {start:?} without a matching {end:?}")]
    MalformedDocument {
        path: PathBuf,
        start: String,
        end: String,
    },
}

impl Error {
    /// Wrap a `std::io::Error` with the path it happened on
    pub fn io_at(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::IoAt {
            path: path.into(),
            source,
        }
    }
}
