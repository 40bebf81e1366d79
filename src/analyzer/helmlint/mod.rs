//! Native Helm chart linter.
//!
//! The engine behind `chartlint lint`: it checks one chart at a time against
//! a set of values, without rendering templates or talking to a cluster.
//!
//! # Example
//!
//! ```rust,no_run
//! use chartlint::analyzer::helmlint::{ChartLinter, LinterConfig};
//! use std::path::Path;
//!
//! let linter = ChartLinter::new(LinterConfig::default().with_strict(true));
//! let outcome = linter.lint_chart(Path::new("./my-chart"), &serde_yaml::Mapping::new());
//!
//! for message in &outcome.messages {
//!     println!("{}", message);
//! }
//! ```
//!
//! # Rules
//!
//! | Group | File | Checks |
//! |-------|------|--------|
//! | Chart.yaml | `rules::chartfile` | parseable, name, SemVer version, apiVersion, icon, dependencies |
//! | values.yaml | `rules::values` | present, parses to a mapping |
//! | Templates | `rules::templates` | syntax, `required` values, deprecated APIs, hard-coded namespaces |

pub mod config;
pub mod k8s;
pub mod kube_version;
pub mod lint;
pub mod parser;
pub mod rules;
pub mod types;

pub use config::LinterConfig;
pub use kube_version::{DEFAULT_KUBE_VERSION, KubeVersion};
pub use lint::ChartLinter;
pub use types::{LintMessage, LintOutcome, Severity};
