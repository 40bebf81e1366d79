use std::io::Write;
use std::path::PathBuf;

use crate::analyzer::helmlint::{ChartLinter, KubeVersion, LinterConfig};
use crate::analyzer::helmlint::config::DEFAULT_NAMESPACE;
use crate::analyzer::multichart::{LintOrchestrator, ReportSummary, discover, load_chart};
use crate::analyzer::values::ValueOptions;
use crate::config::types::LintConfig;
use crate::error::{ChartLintError, Result};

/// Environment variable consulted for the release namespace.
pub const NAMESPACE_ENV: &str = "HELM_NAMESPACE";

/// Arguments of `chartlint lint` as given on the command line.
#[derive(Debug, Clone, Default)]
pub struct LintArgs {
    pub paths: Vec<PathBuf>,
    pub strict: bool,
    pub with_subcharts: bool,
    pub quiet: bool,
    pub kube_version: Option<String>,
    pub namespace: Option<String>,
    pub values: ValueOptions,
}

impl LintArgs {
    /// Fill unset options from the config file and the environment.
    ///
    /// Flags win over the file, the file wins over `HELM_NAMESPACE`.
    pub fn with_defaults(mut self, config: &LintConfig, env_namespace: Option<String>) -> Self {
        self.strict |= config.strict;
        self.with_subcharts |= config.with_subcharts;
        self.quiet |= config.quiet;
        if self.kube_version.is_none() {
            self.kube_version = config.kube_version.clone();
        }
        if self.namespace.is_none() {
            self.namespace = config
                .namespace
                .clone()
                .or(env_namespace)
                .filter(|ns| !ns.is_empty());
        }
        self
    }

    /// The single chart path; the current directory when none is given.
    pub fn chart_path(&self) -> Result<PathBuf> {
        match self.paths.as_slice() {
            [] => Ok(PathBuf::from(".")),
            [path] => Ok(path.clone()),
            paths => Err(ChartLintError::InvalidArguments(
                paths.iter().map(|p| p.display().to_string()).collect(),
            )),
        }
    }

    fn linter_config(&self) -> Result<LinterConfig> {
        let mut config = LinterConfig::new()
            .with_strict(self.strict)
            .with_namespace(self.namespace.as_deref().unwrap_or(DEFAULT_NAMESPACE));
        if let Some(input) = self.kube_version.as_deref().filter(|v| !v.is_empty()) {
            config = config.with_kube_version(KubeVersion::parse(input)?);
        }
        Ok(config)
    }
}

/// Lint a chart and, if requested, its sub-charts, writing the report to `out`.
///
/// Fatal problems return before anything is written. When a scope fails the
/// full report is written first and the summary comes back as the error.
pub fn handle_lint<W: Write>(args: LintArgs, out: &mut W) -> Result<()> {
    let chart_path = args.chart_path()?;
    let linter = ChartLinter::new(args.linter_config()?);

    let root = load_chart(&chart_path)?;
    log::info!("Loaded chart {} {} from {}", root.name(), root.version(), chart_path.display());

    let base_values = root.values.clone();
    let scopes = discover(&chart_path, root, args.with_subcharts)?;
    log::info!("Linting {} scope(s)", scopes.len());

    let values = args.values.merge_values_with_base(&base_values)?;

    let runs = LintOrchestrator::new(&linter).run(&scopes, &values);
    let summary = ReportSummary::from_runs(&runs, args.quiet);

    out.write_all(summary.body.as_bytes())?;
    if summary.shows_summary() {
        writeln!(out, "{}", summary.summary_line)?;
    }
    out.flush()?;

    summary.into_result()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn write_chart(dir: &Path, chart_yaml: &str, values: &str) {
        fs::create_dir_all(dir.join("templates")).unwrap();
        fs::write(dir.join("Chart.yaml"), chart_yaml).unwrap();
        fs::write(dir.join("values.yaml"), values).unwrap();
        fs::write(
            dir.join("templates/configmap.yaml"),
            "apiVersion: v1\nkind: ConfigMap\nmetadata:\n  name: {{ .Release.Name }}\n",
        )
        .unwrap();
    }

    fn shop(tmp: &TempDir) -> PathBuf {
        let root = tmp.path().join("shop");
        write_chart(
            &root,
            "apiVersion: v2\nname: shop\nversion: 1.0.0\nicon: https://example.com/i.png\n\
             dependencies:\n  - name: db\n    version: 1.0.0\n    alias: database\n",
            "database:\n  host: localhost\n",
        );
        write_chart(
            &root.join("charts/db"),
            "apiVersion: v2\nname: db\nversion: 1.0.0\nicon: https://example.com/i.png\n",
            "",
        );
        fs::write(
            root.join("charts/db/templates/secret.yaml"),
            "apiVersion: v1\nkind: Secret\nmetadata:\n  name: db\ndata:\n  host: {{ required \"host is required\" .Values.host }}\n",
        )
        .unwrap();
        root
    }

    fn run(args: LintArgs) -> (Result<()>, String) {
        let mut out = Vec::new();
        let result = handle_lint(args, &mut out);
        (result, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_root_only() {
        let tmp = TempDir::new().unwrap();
        let root = shop(&tmp);
        let (result, out) = run(LintArgs {
            paths: vec![root.clone()],
            ..Default::default()
        });

        assert!(result.is_ok());
        assert_eq!(
            out,
            format!(
                "==> Linting chart: name=shop, scope=., path={}\n\n1 chart(s) linted, 0 chart(s) failed\n",
                root.display()
            )
        );
    }

    #[test]
    fn test_subchart_gets_its_scoped_values() {
        let tmp = TempDir::new().unwrap();
        let root = shop(&tmp);
        let (result, out) = run(LintArgs {
            paths: vec![root],
            with_subcharts: true,
            ..Default::default()
        });

        assert!(result.is_ok(), "{}", out);
        assert!(out.contains("scope=database"));
        assert!(out.ends_with("2 chart(s) linted, 0 chart(s) failed\n"));
    }

    #[test]
    fn test_null_override_fails_subchart() {
        let tmp = TempDir::new().unwrap();
        let root = shop(&tmp);
        let (result, out) = run(LintArgs {
            paths: vec![root],
            with_subcharts: true,
            quiet: true,
            values: ValueOptions {
                values: vec!["database.host=null".to_string()],
                ..Default::default()
            },
            ..Default::default()
        });

        let err = result.unwrap_err();
        assert_eq!(err.to_string(), "2 chart(s) linted, 1 chart(s) failed");
        assert!(!out.contains("scope=.,"));
        assert!(out.contains("scope=database"));
        assert!(out.contains("execution error: host is required"));
        assert!(!out.contains("chart(s) linted"));
    }

    #[test]
    fn test_subchart_errors_reported_before_value_errors() {
        let tmp = TempDir::new().unwrap();
        let root = shop(&tmp);
        fs::write(root.join("charts/db/Chart.yaml"), "name: [unclosed\n").unwrap();

        let (result, out) = run(LintArgs {
            paths: vec![root],
            with_subcharts: true,
            values: ValueOptions {
                values: vec!["novalue".to_string()],
                ..Default::default()
            },
            ..Default::default()
        });
        assert!(matches!(result, Err(ChartLintError::SubchartLoad { .. })));
        assert!(out.is_empty());
    }

    #[test]
    fn test_too_many_paths() {
        let (result, out) = run(LintArgs {
            paths: vec![PathBuf::from("a"), PathBuf::from("b")],
            ..Default::default()
        });
        assert!(matches!(result, Err(ChartLintError::InvalidArguments(_))));
        assert!(out.is_empty());
    }

    #[test]
    fn test_bad_kube_version_fails_before_loading() {
        let (result, out) = run(LintArgs {
            paths: vec![PathBuf::from("/nonexistent/chart")],
            kube_version: Some("one.two".to_string()),
            ..Default::default()
        });
        assert!(matches!(result, Err(ChartLintError::InvalidKubeVersion { .. })));
        assert!(out.is_empty());
    }

    #[test]
    fn test_missing_root_is_fatal() {
        let (result, out) = run(LintArgs {
            paths: vec![PathBuf::from("/nonexistent/chart")],
            ..Default::default()
        });
        assert!(matches!(result, Err(ChartLintError::ChartLoad { .. })));
        assert!(out.is_empty());
    }

    #[test]
    fn test_defaults_precedence() {
        let config = LintConfig {
            strict: true,
            namespace: Some("from-file".to_string()),
            kube_version: Some("1.25".to_string()),
            ..Default::default()
        };

        let args = LintArgs {
            kube_version: Some("1.28".to_string()),
            ..Default::default()
        }
        .with_defaults(&config, Some("from-env".to_string()));
        assert!(args.strict);
        assert_eq!(args.kube_version.as_deref(), Some("1.28"));
        assert_eq!(args.namespace.as_deref(), Some("from-file"));

        let args = LintArgs::default().with_defaults(&LintConfig::default(), Some("from-env".to_string()));
        assert_eq!(args.namespace.as_deref(), Some("from-env"));

        let config = args.linter_config().unwrap();
        assert_eq!(config.namespace, "from-env");
        assert!(config.kube_version.is_none());
    }
}
