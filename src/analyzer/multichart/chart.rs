//! Loaded charts and their scoped form.

use std::path::{Path, PathBuf};

use serde_yaml::Mapping;

use crate::analyzer::helmlint::parser::chart::{ChartMetadata, Dependency, parse_chart_yaml};
use crate::analyzer::helmlint::parser::values::parse_values_yaml;
use crate::common::archive::ChartSource;
use crate::error::{ChartLintError, Result};

/// A chart loaded from a directory or a packaged archive.
#[derive(Debug, Clone)]
pub struct ChartNode {
    pub metadata: ChartMetadata,
    /// The chart's own values.yaml, empty when absent.
    pub values: Mapping,
    /// Directory or archive the chart was loaded from.
    pub location: PathBuf,
}

impl ChartNode {
    pub fn name(&self) -> &str {
        &self.metadata.name
    }

    pub fn version(&self) -> &str {
        &self.metadata.version
    }

    /// Dependencies declared in this chart's Chart.yaml.
    pub fn dependencies(&self) -> &[Dependency] {
        &self.metadata.dependencies
    }

    /// Exact `(name, version)` match against a declared dependency.
    pub fn satisfies(&self, dependency: &Dependency) -> bool {
        dependency.name == self.name() && dependency.version.as_deref() == Some(self.version())
    }
}

/// A chart admitted to the lint run, with the path handed to the engine.
#[derive(Debug, Clone)]
pub struct ScopedChart {
    pub chart: ChartNode,
    pub path: PathBuf,
}

impl ScopedChart {
    pub fn new(chart: ChartNode, path: impl Into<PathBuf>) -> Self {
        Self {
            chart,
            path: path.into(),
        }
    }

    pub fn name(&self) -> &str {
        self.chart.name()
    }
}

/// Load a chart from a directory or a `.tgz` / `.tar.gz` archive.
///
/// Every failure is reported as [`ChartLintError::ChartLoad`] naming `path`.
pub fn load_chart(path: &Path) -> Result<ChartNode> {
    let load_error = |reason: String| ChartLintError::ChartLoad {
        path: path.display().to_string(),
        reason,
    };

    let source = ChartSource::open(path).map_err(|e| load_error(e.to_string()))?;
    let root = source.root();

    let chart_file = root.join("Chart.yaml");
    let content = std::fs::read_to_string(&chart_file).map_err(|e| {
        load_error(format!("unable to read {}: {}", chart_file.display(), e))
    })?;
    let metadata = parse_chart_yaml(&content)
        .map_err(|e| load_error(format!("Chart.yaml: {}", e)))?;
    metadata.validate().map_err(load_error)?;

    let values_file = root.join("values.yaml");
    let values = if values_file.is_file() {
        let content = std::fs::read_to_string(&values_file)
            .map_err(|e| load_error(format!("values.yaml: {}", e)))?;
        parse_values_yaml(&content).map_err(|e| load_error(format!("values.yaml: {}", e)))?
    } else {
        Mapping::new()
    };

    log::debug!(
        "Loaded chart {} {} from {}",
        metadata.name,
        metadata.version,
        path.display()
    );

    Ok(ChartNode {
        metadata,
        values,
        location: path.to_path_buf(),
    })
}
