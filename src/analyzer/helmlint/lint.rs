//! The built-in chart linter.
//!
//! Loads one chart (directory or archive), parses its Chart.yaml, values.yaml
//! and templates, runs every rule and folds the findings into a
//! [`LintOutcome`].

use std::path::Path;

use serde_yaml::Mapping;

use crate::analyzer::helmlint::config::LinterConfig;
use crate::analyzer::helmlint::parser::chart::parse_chart_yaml;
use crate::analyzer::helmlint::parser::template::{ParsedTemplate, parse_template};
use crate::analyzer::helmlint::parser::values::{ValuesFile, coalesce, parse_values_yaml};
use crate::analyzer::helmlint::rules::{LintContext, all_rules};
use crate::analyzer::helmlint::types::{LintMessage, LintOutcome};
use crate::analyzer::multichart::LintEngine;
use crate::common::archive::ChartSource;

/// Lints a single chart against a set of values.
#[derive(Debug, Clone, Default)]
pub struct ChartLinter {
    config: LinterConfig,
}

impl ChartLinter {
    pub fn new(config: LinterConfig) -> Self {
        Self { config }
    }

    /// Lint the chart at `path` (directory or packaged archive).
    pub fn lint_chart(&self, path: &Path, values: &Mapping) -> LintOutcome {
        let source = match ChartSource::open(path) {
            Ok(source) => source,
            Err(e) => return load_failure(e),
        };

        let root = source.root();
        let chart_file = root.join("Chart.yaml");
        let chart_content = match std::fs::read_to_string(&chart_file) {
            Ok(content) => content,
            Err(e) => return load_failure(format!("{}: {}", chart_file.display(), e)),
        };

        let chart = parse_chart_yaml(&chart_content);
        let values_file = read_values_file(root);
        let values = coalesce(&values_file.defaults(), values);
        let templates = match read_templates(root) {
            Ok(templates) => templates,
            Err(e) => return load_failure(e),
        };

        let ctx = LintContext {
            chart: chart.as_ref(),
            values_file: &values_file,
            values: &values,
            templates: templates.as_deref(),
            config: &self.config,
        };

        let mut messages = Vec::new();
        for rule in all_rules() {
            let found = rule.check(&ctx);
            if !found.is_empty() {
                log::debug!(
                    "{}: rule {} ({}) reported {} message(s)",
                    path.display(),
                    rule.name(),
                    rule.severity(),
                    found.len()
                );
            }
            messages.extend(found);
        }

        self.outcome(messages)
    }

    /// Messages at or above the failure threshold become raw errors.
    fn outcome(&self, messages: Vec<LintMessage>) -> LintOutcome {
        let threshold = self.config.failure_threshold();
        let errors = messages
            .iter()
            .filter(|m| m.severity >= threshold)
            .map(ToString::to_string)
            .collect();
        LintOutcome { messages, errors }
    }
}

impl LintEngine for ChartLinter {
    fn lint(&self, chart_path: &Path, values: &Mapping) -> LintOutcome {
        self.lint_chart(chart_path, values)
    }
}

fn load_failure(reason: impl std::fmt::Display) -> LintOutcome {
    LintOutcome::load_failure(format!(
        "unable to check Chart.yaml file in chart: {}",
        reason
    ))
}

fn read_values_file(root: &Path) -> ValuesFile {
    let path = root.join("values.yaml");
    if !path.is_file() {
        return ValuesFile::Missing;
    }
    match std::fs::read_to_string(&path) {
        Ok(content) => match parse_values_yaml(&content) {
            Ok(map) => ValuesFile::Parsed(map),
            Err(e) => ValuesFile::Invalid(e),
        },
        Err(e) => ValuesFile::Invalid(e.to_string()),
    }
}

/// Scan every file below templates/, sorted by path.
///
/// `Ok(None)` when the chart has no templates/ directory.
fn read_templates(root: &Path) -> Result<Option<Vec<ParsedTemplate>>, String> {
    let templates_dir = root.join("templates");
    if !templates_dir.is_dir() {
        return Ok(None);
    }

    let mut templates = Vec::new();
    for entry in walkdir::WalkDir::new(&templates_dir).sort_by_file_name() {
        let entry = entry.map_err(|e| e.to_string())?;
        if !entry.file_type().is_file() {
            continue;
        }

        let file_path = entry.path();
        let relative_path = file_path
            .strip_prefix(root)
            .unwrap_or(file_path)
            .to_string_lossy()
            .replace('\\', "/");

        let extension = file_path.extension().and_then(|e| e.to_str());
        if !matches!(extension, Some("yaml" | "yml" | "tpl" | "txt" | "json")) {
            continue;
        }

        let content = std::fs::read_to_string(file_path)
            .map_err(|e| format!("{}: {}", relative_path, e))?;
        templates.push(parse_template(&content, &relative_path));
    }

    Ok(Some(templates))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::helmlint::kube_version::KubeVersion;
    use crate::analyzer::helmlint::types::Severity;
    use std::fs;
    use tempfile::TempDir;

    fn create_test_chart(dir: &Path) {
        fs::create_dir_all(dir.join("templates")).unwrap();

        fs::write(
            dir.join("Chart.yaml"),
            r#"apiVersion: v2
name: test-chart
version: 1.0.0
description: A test chart
icon: https://example.com/icon.png
"#,
        )
        .unwrap();

        fs::write(
            dir.join("values.yaml"),
            r#"replicaCount: 1
image:
  repository: nginx
  tag: "1.25"
"#,
        )
        .unwrap();

        fs::write(
            dir.join("templates/deployment.yaml"),
            r#"apiVersion: apps/v1
kind: Deployment
metadata:
  name: {{ .Release.Name }}
spec:
  replicas: {{ .Values.replicaCount }}
  template:
    spec:
      containers:
        - image: {{ required "image.repository is required" .Values.image.repository }}
"#,
        )
        .unwrap();
    }

    fn values(yaml: &str) -> Mapping {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn test_lint_valid_chart() {
        let temp_dir = TempDir::new().unwrap();
        create_test_chart(temp_dir.path());

        let outcome = ChartLinter::default().lint_chart(temp_dir.path(), &Mapping::new());
        assert_eq!(outcome, LintOutcome::default());
    }

    #[test]
    fn test_lint_nonexistent_path() {
        let outcome = ChartLinter::default().lint_chart(Path::new("/nonexistent/path"), &Mapping::new());
        assert!(outcome.messages.is_empty());
        assert_eq!(outcome.errors.len(), 1);
        assert!(outcome.errors[0].starts_with("unable to check Chart.yaml file in chart"));
    }

    #[test]
    fn test_missing_chart_yaml_is_load_failure() {
        let temp_dir = TempDir::new().unwrap();
        let outcome = ChartLinter::default().lint_chart(temp_dir.path(), &Mapping::new());
        assert!(outcome.messages.is_empty());
        assert!(outcome.has_errors());
    }

    #[test]
    fn test_supplied_null_removes_required_default() {
        let temp_dir = TempDir::new().unwrap();
        create_test_chart(temp_dir.path());

        let outcome = ChartLinter::default()
            .lint_chart(temp_dir.path(), &values("image:\n  repository: null\n"));
        assert_eq!(
            outcome.messages,
            vec![LintMessage::error(
                "templates/deployment.yaml",
                "execution error: image.repository is required"
            )]
        );
        assert_eq!(
            outcome.errors,
            vec!["[ERROR] templates/deployment.yaml: execution error: image.repository is required"]
        );
    }

    #[test]
    fn test_strict_promotes_warnings() {
        let temp_dir = TempDir::new().unwrap();
        create_test_chart(temp_dir.path());
        fs::remove_dir_all(temp_dir.path().join("templates")).unwrap();

        let lenient = ChartLinter::default().lint_chart(temp_dir.path(), &Mapping::new());
        assert_eq!(lenient.max_severity(), Some(Severity::Warning));
        assert!(lenient.errors.is_empty());
        assert!(lenient.has_warnings_or_errors());

        let strict = ChartLinter::new(LinterConfig::new().with_strict(true))
            .lint_chart(temp_dir.path(), &Mapping::new());
        assert_eq!(strict.errors, vec!["[WARNING] templates/: directory not found"]);
    }

    #[test]
    fn test_missing_values_file_is_info_only() {
        let temp_dir = TempDir::new().unwrap();
        create_test_chart(temp_dir.path());
        fs::remove_file(temp_dir.path().join("values.yaml")).unwrap();

        let outcome = ChartLinter::default().lint_chart(
            temp_dir.path(),
            &values("image:\n  repository: nginx\n"),
        );
        assert_eq!(
            outcome.messages,
            vec![LintMessage::info("values.yaml", "file does not exist")]
        );
        assert!(!outcome.has_warnings_or_errors());
    }

    #[test]
    fn test_kube_version_reaches_rules() {
        let temp_dir = TempDir::new().unwrap();
        create_test_chart(temp_dir.path());
        fs::write(
            temp_dir.path().join("templates/cronjob.yaml"),
            "apiVersion: batch/v1beta1\nkind: CronJob\nmetadata:\n  name: backup\n",
        )
        .unwrap();

        let config = LinterConfig::new().with_kube_version(KubeVersion::new(1, 25));
        let outcome = ChartLinter::new(config).lint_chart(temp_dir.path(), &Mapping::new());
        assert_eq!(outcome.errors.len(), 1);
        assert!(outcome.errors[0].contains("templates/cronjob.yaml"));
    }
}
