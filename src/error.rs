//! Error types for chartlint.
//!
//! Fatal problems (bad arguments, unloadable charts, malformed values) are
//! `ChartLintError`s and abort the command. Problems found while linting a
//! single scope are never errors: they are recorded in a `LintOutcome`.

use thiserror::Error;

use crate::analyzer::values::ValuesError;

/// Errors that abort a chartlint command.
#[derive(Debug, Error)]
pub enum ChartLintError {
    /// Wrong number or shape of positional arguments
    #[error("invalid call, expected path to a single chart, got: {0:?}")]
    InvalidArguments(Vec<String>),

    /// `--kube-version` could not be parsed
    #[error("invalid kube version '{input}': {reason}")]
    InvalidKubeVersion { input: String, reason: String },

    /// The root chart could not be loaded
    #[error("cannot load chart, due to: {reason}")]
    ChartLoad { path: String, reason: String },

    /// A chart below the root's `charts/` directory could not be loaded
    #[error("cannot load sub-charts, due to: cannot load sub-chart from {path}, due to: {reason}")]
    SubchartLoad { path: String, reason: String },

    /// A chart archive could not be unpacked
    #[error("cannot extract chart archive {path}: {reason}")]
    Archive { path: String, reason: String },

    /// Value overrides could not be read or merged
    #[error(transparent)]
    Values(#[from] ValuesError),

    /// Configuration file problems
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// One or more scopes produced raw errors
    #[error("{summary}")]
    LintFailed { summary: String },
}

/// Errors raised while loading an explicitly requested configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    NotFound(String),

    #[error("failed to read {path}: {reason}")]
    ReadFailed { path: String, reason: String },

    #[error("failed to parse {path}: {reason}")]
    ParsingFailed { path: String, reason: String },
}

pub type Result<T> = std::result::Result<T, ChartLintError>;
