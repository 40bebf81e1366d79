//! Report rendering and the pass/fail verdict.

use std::fmt::Write as _;

use crate::analyzer::helmlint::types::Severity;
use crate::analyzer::multichart::orchestrator::ScopeRun;
use crate::error::{ChartLintError, Result};

/// Accumulates per-scope results into the lint report.
#[derive(Debug, Default)]
pub struct ReportAggregator {
    quiet: bool,
    body: String,
    total: usize,
    failed: usize,
    noisy: usize,
}

/// Final counts and rendered text of a lint run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportSummary {
    pub body: String,
    /// Every scope linted, printed or not.
    pub total: usize,
    /// Scopes with at least one raw error.
    pub failed: usize,
    /// Scopes with a warning, an error or a raw error.
    pub noisy: usize,
    pub summary_line: String,
    quiet: bool,
}

impl ReportAggregator {
    pub fn new(quiet: bool) -> Self {
        Self {
            quiet,
            ..Default::default()
        }
    }

    /// Add one scope's block to the report.
    pub fn record(&mut self, run: &ScopeRun) {
        self.total += 1;

        let outcome = &run.outcome;
        let noisy = outcome.has_warnings_or_errors();
        if noisy {
            self.noisy += 1;
        }
        if self.quiet && !noisy {
            return;
        }

        // Writing to a String cannot fail.
        let _ = writeln!(
            self.body,
            "==> Linting chart: name={}, scope={}, path={}",
            run.chart.name(),
            run.scope,
            run.chart.path.display()
        );

        // Raw errors duplicate messages when both exist.
        if outcome.messages.is_empty() {
            for err in &outcome.errors {
                let _ = writeln!(self.body, "Error {}", err);
            }
        }

        for message in &outcome.messages {
            if !self.quiet || message.severity > Severity::Info {
                let _ = writeln!(self.body, "{}", message);
            }
        }

        if outcome.has_errors() {
            self.failed += 1;
        }

        self.body.push('\n');
    }

    pub fn finish(self) -> ReportSummary {
        ReportSummary {
            summary_line: format!(
                "{} chart(s) linted, {} chart(s) failed",
                self.total, self.failed
            ),
            body: self.body,
            total: self.total,
            failed: self.failed,
            noisy: self.noisy,
            quiet: self.quiet,
        }
    }
}

impl ReportSummary {
    /// Build a summary from every run in order.
    pub fn from_runs(runs: &[ScopeRun], quiet: bool) -> Self {
        let mut aggregator = ReportAggregator::new(quiet);
        for run in runs {
            aggregator.record(run);
        }
        aggregator.finish()
    }

    /// Whether the summary line is printed after a successful run.
    pub fn shows_summary(&self) -> bool {
        self.failed == 0 && (!self.quiet || self.noisy > 0)
    }

    /// `Err(LintFailed)` carrying the summary line when any scope failed.
    pub fn into_result(self) -> Result<()> {
        if self.failed > 0 {
            Err(ChartLintError::LintFailed {
                summary: self.summary_line,
            })
        } else {
            Ok(())
        }
    }
}
