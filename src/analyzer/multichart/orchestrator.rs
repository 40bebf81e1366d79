//! Runs the lint engine once per scope.

use std::path::Path;

use serde_yaml::Mapping;

use crate::analyzer::helmlint::types::LintOutcome;
use crate::analyzer::multichart::chart::ScopedChart;
use crate::analyzer::multichart::discovery::ScopeSet;
use crate::analyzer::multichart::scope::resolve;

/// A validation engine that lints one chart against a set of values.
///
/// Problems with the chart are reported in the outcome, never as a panic or
/// an early return, so one broken chart cannot stop the others.
pub trait LintEngine {
    fn lint(&self, chart_path: &Path, values: &Mapping) -> LintOutcome;
}

/// The engine's verdict for one scope.
#[derive(Debug, Clone)]
pub struct ScopeRun {
    pub scope: String,
    pub chart: ScopedChart,
    pub outcome: LintOutcome,
}

/// Lints every scope of a [`ScopeSet`] with one engine.
pub struct LintOrchestrator<'a, E: LintEngine + ?Sized> {
    engine: &'a E,
}

impl<'a, E: LintEngine + ?Sized> LintOrchestrator<'a, E> {
    pub fn new(engine: &'a E) -> Self {
        Self { engine }
    }

    /// Lint each scope with its resolved values, in scope-set order.
    pub fn run(&self, scopes: &ScopeSet, values: &Mapping) -> Vec<ScopeRun> {
        scopes
            .iter()
            .map(|(scope, chart)| {
                let scoped_values = resolve(scope, values);
                log::debug!(
                    "Linting scope '{}' ({}) at {}",
                    scope,
                    chart.name(),
                    chart.path.display()
                );
                let outcome = self.engine.lint(&chart.path, &scoped_values);
                log::debug!(
                    "Scope '{}': {} message(s), {} error(s)",
                    scope,
                    outcome.messages.len(),
                    outcome.errors.len()
                );

                ScopeRun {
                    scope: scope.to_string(),
                    chart: chart.clone(),
                    outcome,
                }
            })
            .collect()
    }
}
