//! Chart.yaml rules.

use crate::analyzer::helmlint::parser::chart::is_valid_semver;
use crate::analyzer::helmlint::rules::{LintContext, Rule};
use crate::analyzer::helmlint::types::{LintMessage, Severity};

const CHARTFILE: &str = "Chart.yaml";

/// Get all Chart.yaml rules.
pub fn rules() -> Vec<Box<dyn Rule>> {
    vec![
        Box::new(ChartfileParseable),
        Box::new(NameRequired),
        Box::new(VersionIsSemver),
        Box::new(ApiVersionValid),
        Box::new(IconRecommended),
        Box::new(DependenciesNeedV2),
        Box::new(DependencyVersionRequired),
    ]
}

/// Chart.yaml must be valid YAML.
pub struct ChartfileParseable;

impl Rule for ChartfileParseable {
    fn name(&self) -> &'static str {
        "chartfile-parseable"
    }

    fn severity(&self) -> Severity {
        Severity::Error
    }

    fn check(&self, ctx: &LintContext) -> Vec<LintMessage> {
        match ctx.chart {
            Ok(_) => vec![],
            Err(e) => vec![LintMessage::error(
                CHARTFILE,
                format!("unable to parse YAML: {}", e),
            )],
        }
    }
}

pub struct NameRequired;

impl Rule for NameRequired {
    fn name(&self) -> &'static str {
        "chartfile-name"
    }

    fn severity(&self) -> Severity {
        Severity::Error
    }

    fn check(&self, ctx: &LintContext) -> Vec<LintMessage> {
        match ctx.metadata() {
            Some(chart) if chart.name.trim().is_empty() => {
                vec![LintMessage::error(CHARTFILE, "name is required")]
            }
            _ => vec![],
        }
    }
}

/// `version` is required and must be SemVer.
pub struct VersionIsSemver;

impl Rule for VersionIsSemver {
    fn name(&self) -> &'static str {
        "chartfile-version"
    }

    fn severity(&self) -> Severity {
        Severity::Error
    }

    fn check(&self, ctx: &LintContext) -> Vec<LintMessage> {
        let Some(chart) = ctx.metadata() else {
            return vec![];
        };

        if chart.version.is_empty() {
            vec![LintMessage::error(CHARTFILE, "version is required")]
        } else if !is_valid_semver(&chart.version) {
            vec![LintMessage::error(
                CHARTFILE,
                format!("version '{}' is not a valid SemVer", chart.version),
            )]
        } else {
            vec![]
        }
    }
}

pub struct ApiVersionValid;

impl Rule for ApiVersionValid {
    fn name(&self) -> &'static str {
        "chartfile-api-version"
    }

    fn severity(&self) -> Severity {
        Severity::Error
    }

    fn check(&self, ctx: &LintContext) -> Vec<LintMessage> {
        let Some(chart) = ctx.metadata() else {
            return vec![];
        };

        if chart.api_version.is_empty() {
            vec![LintMessage::error(
                CHARTFILE,
                "apiVersion is required. The value must be either \"v1\" or \"v2\"",
            )]
        } else if !chart.has_valid_api_version() {
            vec![LintMessage::error(
                CHARTFILE,
                format!(
                    "apiVersion '{}' is not valid. The value must be either \"v1\" or \"v2\"",
                    chart.api_version
                ),
            )]
        } else {
            vec![]
        }
    }
}

pub struct IconRecommended;

impl Rule for IconRecommended {
    fn name(&self) -> &'static str {
        "chartfile-icon"
    }

    fn severity(&self) -> Severity {
        Severity::Info
    }

    fn check(&self, ctx: &LintContext) -> Vec<LintMessage> {
        match ctx.metadata() {
            Some(chart) if chart.icon.as_deref().is_none_or(str::is_empty) => {
                vec![LintMessage::info(CHARTFILE, "icon is recommended")]
            }
            _ => vec![],
        }
    }
}

/// `dependencies` belong in a v2 Chart.yaml (requirements.yaml in v1).
pub struct DependenciesNeedV2;

impl Rule for DependenciesNeedV2 {
    fn name(&self) -> &'static str {
        "chartfile-dependencies-v1"
    }

    fn severity(&self) -> Severity {
        Severity::Warning
    }

    fn check(&self, ctx: &LintContext) -> Vec<LintMessage> {
        match ctx.metadata() {
            Some(chart) if chart.is_v1() && !chart.dependencies.is_empty() => {
                vec![LintMessage::warning(
                    CHARTFILE,
                    "dependencies are not valid in the Chart file with apiVersion 'v1'. They are valid in apiVersion 'v2'",
                )]
            }
            _ => vec![],
        }
    }
}

pub struct DependencyVersionRequired;

impl Rule for DependencyVersionRequired {
    fn name(&self) -> &'static str {
        "chartfile-dependency-version"
    }

    fn severity(&self) -> Severity {
        Severity::Warning
    }

    fn check(&self, ctx: &LintContext) -> Vec<LintMessage> {
        let Some(chart) = ctx.metadata() else {
            return vec![];
        };

        chart
            .dependencies
            .iter()
            .filter(|dep| dep.version.is_none())
            .map(|dep| {
                LintMessage::warning(
                    CHARTFILE,
                    format!("dependency '{}' has no version", dep.name),
                )
            })
            .collect()
    }
}
