//! Sub-chart discovery.
//!
//! Walks the root chart's `charts/` directory, loads every chart found there
//! (unpacked directories and packaged archives) and admits the ones that
//! match a dependency declared by the root chart.

use std::path::Path;

use walkdir::WalkDir;

use crate::analyzer::multichart::chart::{ChartNode, ScopedChart, load_chart};
use crate::common::archive::is_chart_archive;
use crate::error::{ChartLintError, Result};

/// Scope key of the root chart.
pub const ROOT_SCOPE: &str = ".";

/// Insertion-ordered mapping from scope key to chart.
///
/// Inserting an existing key replaces the chart in place, keeping the
/// original position.
#[derive(Debug, Clone)]
pub struct ScopeSet {
    entries: Vec<(String, ScopedChart)>,
}

impl ScopeSet {
    /// A set holding only the root scope.
    pub fn with_root(root: ScopedChart) -> Self {
        Self {
            entries: vec![(ROOT_SCOPE.to_string(), root)],
        }
    }

    /// Insert or replace; returns the replaced chart, if any.
    pub fn insert(&mut self, scope: impl Into<String>, chart: ScopedChart) -> Option<ScopedChart> {
        let scope = scope.into();
        match self.entries.iter_mut().find(|(key, _)| *key == scope) {
            Some((_, existing)) => Some(std::mem::replace(existing, chart)),
            None => {
                self.entries.push((scope, chart));
                None
            }
        }
    }

    pub fn get(&self, scope: &str) -> Option<&ScopedChart> {
        self.entries
            .iter()
            .find(|(key, _)| key == scope)
            .map(|(_, chart)| chart)
    }

    pub fn contains(&self, scope: &str) -> bool {
        self.get(scope).is_some()
    }

    /// Number of scopes, root included; never zero.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ScopedChart)> {
        self.entries.iter().map(|(key, chart)| (key.as_str(), chart))
    }
}

/// Add every sub-chart of `root` that satisfies one of its declared
/// dependencies to `scopes`.
///
/// A candidate matching several dependencies is admitted once per matching
/// dependency. Later candidates overwrite earlier ones under the same key.
/// Any candidate that fails to load aborts discovery.
pub fn discover_subcharts(root_path: &Path, root: &ChartNode, scopes: &mut ScopeSet) -> Result<()> {
    let candidates = collect_candidates(root_path)?;
    log::debug!(
        "Found {} sub-chart candidate(s) under {}",
        candidates.len(),
        root_path.join("charts").display()
    );

    for candidate in candidates {
        let mut admitted = false;
        for dependency in root.dependencies() {
            if !candidate.chart.satisfies(dependency) {
                continue;
            }
            admitted = true;

            let scope = dependency.scope_key();
            log::debug!(
                "Admitting {} {} as scope '{}'",
                candidate.name(),
                candidate.chart.version(),
                scope
            );
            if let Some(replaced) = scopes.insert(scope, candidate.clone()) {
                log::warn!(
                    "Scope '{}' is claimed by both {} and {}; only {} will be linted",
                    scope,
                    replaced.path.display(),
                    candidate.path.display(),
                    candidate.path.display()
                );
            }
        }

        if !admitted {
            log::debug!(
                "Skipping {}: no dependency of {} matches {} {}",
                candidate.path.display(),
                root.name(),
                candidate.name(),
                candidate.chart.version()
            );
        }
    }

    Ok(())
}

/// Build the full scope set: the root chart plus, when requested, its
/// admitted sub-charts.
pub fn discover(root_path: &Path, root: ChartNode, with_subcharts: bool) -> Result<ScopeSet> {
    let mut scopes = ScopeSet::with_root(ScopedChart::new(root.clone(), root_path));
    if with_subcharts {
        discover_subcharts(root_path, &root, &mut scopes)?;
    }
    Ok(scopes)
}

/// Load every chart below `charts/`, in walk order.
fn collect_candidates(root_path: &Path) -> Result<Vec<ScopedChart>> {
    let charts_dir = root_path.join("charts");
    if !charts_dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut candidates = Vec::new();
    for entry in WalkDir::new(&charts_dir).sort_by_file_name() {
        let entry = entry.map_err(|e| ChartLintError::SubchartLoad {
            path: e.path().unwrap_or(charts_dir.as_path()).display().to_string(),
            reason: e.to_string(),
        })?;
        let entry_path = entry.path();

        let chart_path = if entry.file_name() == "Chart.yaml" {
            match entry_path.parent() {
                Some(dir) => dir,
                None => continue,
            }
        } else if entry.file_type().is_file() && is_chart_archive(entry_path) {
            entry_path
        } else {
            continue;
        };

        let chart = load_chart(chart_path).map_err(|e| ChartLintError::SubchartLoad {
            path: entry_path.display().to_string(),
            reason: match e {
                ChartLintError::ChartLoad { reason, .. } => reason,
                other => other.to_string(),
            },
        })?;
        candidates.push(ScopedChart::new(chart, chart_path));
    }

    Ok(candidates)
}
