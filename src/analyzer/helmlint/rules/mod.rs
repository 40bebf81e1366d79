//! Rule system for the chart linter.
//!
//! Rules are grouped by the chart file they look at:
//!
//! - `chartfile`: Chart.yaml
//! - `values`: values.yaml
//! - `templates`: templates/ and the coalesced values they consume

pub mod chartfile;
pub mod templates;
pub mod values;

use serde_yaml::Mapping;

use crate::analyzer::helmlint::config::LinterConfig;
use crate::analyzer::helmlint::parser::chart::{ChartMetadata, ChartParseError};
use crate::analyzer::helmlint::parser::template::ParsedTemplate;
use crate::analyzer::helmlint::parser::values::ValuesFile;
use crate::analyzer::helmlint::types::{LintMessage, Severity};

/// Everything the rules see of one chart.
#[derive(Debug)]
pub struct LintContext<'a> {
    /// Parsed Chart.yaml, or why it could not be parsed.
    pub chart: std::result::Result<&'a ChartMetadata, &'a ChartParseError>,
    pub values_file: &'a ValuesFile,
    /// Chart defaults with the caller's values coalesced over them.
    pub values: &'a Mapping,
    /// `None` when the chart has no templates/ directory.
    pub templates: Option<&'a [ParsedTemplate]>,
    pub config: &'a LinterConfig,
}

impl<'a> LintContext<'a> {
    /// Parsed metadata, if Chart.yaml was readable.
    pub fn metadata(&self) -> Option<&'a ChartMetadata> {
        self.chart.ok()
    }

    /// Renderable templates, partials excluded.
    pub fn manifests(&self) -> impl Iterator<Item = &'a ParsedTemplate> {
        self.templates
            .unwrap_or_default()
            .iter()
            .filter(|t| !t.is_partial())
    }
}

/// A lint rule that can check Helm charts.
pub trait Rule: Send + Sync {
    /// Short kebab-case name, used in debug logs.
    fn name(&self) -> &'static str;

    /// Severity of the messages this rule emits.
    fn severity(&self) -> Severity;

    /// Run the rule and return any findings.
    fn check(&self, ctx: &LintContext) -> Vec<LintMessage>;
}

/// Get all available rules, in reporting order.
pub fn all_rules() -> Vec<Box<dyn Rule>> {
    let mut rules: Vec<Box<dyn Rule>> = Vec::new();
    rules.extend(chartfile::rules());
    rules.extend(values::rules());
    rules.extend(templates::rules());
    rules
}
