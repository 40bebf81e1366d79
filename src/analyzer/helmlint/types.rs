//! Core types for the chart linter.
//!
//! - `Severity` - message severity levels
//! - `LintMessage` - a single structured finding
//! - `LintOutcome` - everything one engine run produced for one chart

use std::fmt;

/// Severity levels for lint messages.
///
/// Ordered from least to most severe: `Info < Warning < Error`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Severity {
    /// Informational, never fails a chart
    #[default]
    Info,
    /// Convention or recommendation broken
    Warning,
    /// The chart will fail to install
    Error,
}

impl Severity {
    /// Label used in rendered messages.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Info => "INFO",
            Self::Warning => "WARNING",
            Self::Error => "ERROR",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A structured lint finding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LintMessage {
    pub severity: Severity,
    /// Chart-relative path the finding is about (e.g. `templates/`).
    pub path: String,
    pub text: String,
}

impl LintMessage {
    pub fn new(severity: Severity, path: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            severity,
            path: path.into(),
            text: text.into(),
        }
    }

    pub fn error(path: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(Severity::Error, path, text)
    }

    pub fn warning(path: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(Severity::Warning, path, text)
    }

    pub fn info(path: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(Severity::Info, path, text)
    }
}

impl fmt::Display for LintMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.severity, self.path, self.text)
    }
}

/// Result of linting one chart.
///
/// `errors` holds raw engine errors: failures severe enough to count the
/// chart as failed. When the engine could not even load the chart, `errors`
/// is populated and `messages` is empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LintOutcome {
    pub messages: Vec<LintMessage>,
    pub errors: Vec<String>,
}

impl LintOutcome {
    pub fn new() -> Self {
        Self::default()
    }

    /// Outcome for a chart the engine could not load at all.
    pub fn load_failure(reason: impl Into<String>) -> Self {
        Self {
            messages: Vec::new(),
            errors: vec![reason.into()],
        }
    }

    /// True if any message is above Info or any raw error exists.
    pub fn has_warnings_or_errors(&self) -> bool {
        !self.errors.is_empty() || self.messages.iter().any(|m| m.severity > Severity::Info)
    }

    /// True if the chart counts as failed.
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Highest severity among the messages.
    pub fn max_severity(&self) -> Option<Severity> {
        self.messages.iter().map(|m| m.severity).max()
    }
}
