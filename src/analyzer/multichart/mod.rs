//! Multi-chart lint orchestration.
//!
//! A lint run covers the root chart and, with `--with-subcharts`, every
//! sub-chart under `charts/` that the root declares as a dependency. Each
//! chart is linted under a *scope* (`.` for the root, else the dependency's
//! alias or name) with the slice of the values that scope would see at
//! install time.
//!
//! ```text
//! discover ──► ScopeSet ──► LintOrchestrator::run ──► ReportAggregator
//!                               │ resolve(scope, values)
//!                               └─► LintEngine::lint
//! ```

pub mod chart;
pub mod discovery;
pub mod orchestrator;
pub mod report;
pub mod scope;

pub use chart::{ChartNode, ScopedChart, load_chart};
pub use discovery::{ROOT_SCOPE, ScopeSet, discover, discover_subcharts};
pub use orchestrator::{LintEngine, LintOrchestrator, ScopeRun};
pub use report::{ReportAggregator, ReportSummary};
pub use scope::{GLOBAL_KEY, resolve};
