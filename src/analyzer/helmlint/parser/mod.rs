//! Parsers for Helm chart components.
//!
//! - Chart.yaml metadata
//! - values.yaml configuration
//! - Go templates (tokenization and static analysis)

pub mod chart;
pub mod template;
pub mod values;

pub use chart::{ChartMetadata, ChartType, Dependency, Maintainer, parse_chart_yaml};
pub use template::{ParsedTemplate, parse_template};
pub use values::{ValuesFile, parse_values_yaml};
