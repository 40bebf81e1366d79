//! Template rules.
//!
//! Templates are never rendered: these rules look at the scanned actions and
//! at literal resource headers, and check `required` calls against the
//! coalesced values.

use crate::analyzer::helmlint::k8s::{ApiStatus, api_status};
use crate::analyzer::helmlint::parser::values::lookup;
use crate::analyzer::helmlint::rules::{LintContext, Rule};
use crate::analyzer::helmlint::types::{LintMessage, Severity};

/// Get all template rules.
pub fn rules() -> Vec<Box<dyn Rule>> {
    vec![
        Box::new(TemplatesDirPresent),
        Box::new(TemplateSyntax),
        Box::new(RequiredValues),
        Box::new(DeprecatedApis),
        Box::new(HardcodedNamespace),
    ]
}

pub struct TemplatesDirPresent;

impl Rule for TemplatesDirPresent {
    fn name(&self) -> &'static str {
        "templates-dir"
    }

    fn severity(&self) -> Severity {
        Severity::Warning
    }

    fn check(&self, ctx: &LintContext) -> Vec<LintMessage> {
        match ctx.templates {
            None => vec![LintMessage::warning("templates/", "directory not found")],
            Some(_) => vec![],
        }
    }
}

/// Unclosed actions and unbalanced control blocks.
pub struct TemplateSyntax;

impl Rule for TemplateSyntax {
    fn name(&self) -> &'static str {
        "template-syntax"
    }

    fn severity(&self) -> Severity {
        Severity::Error
    }

    fn check(&self, ctx: &LintContext) -> Vec<LintMessage> {
        ctx.templates
            .unwrap_or_default()
            .iter()
            .flat_map(|template| {
                template.errors.iter().map(|e| {
                    LintMessage::error(
                        template.path.as_str(),
                        format!("parse error at line {}: {}", e.line, e.message),
                    )
                })
            })
            .collect()
    }
}

/// `required` on a value that is absent or null after coalescing.
pub struct RequiredValues;

impl Rule for RequiredValues {
    fn name(&self) -> &'static str {
        "template-required"
    }

    fn severity(&self) -> Severity {
        Severity::Error
    }

    fn check(&self, ctx: &LintContext) -> Vec<LintMessage> {
        let mut messages = Vec::new();
        for template in ctx.manifests() {
            for required in &template.required_values {
                if lookup(ctx.values, &required.path).is_none() {
                    messages.push(LintMessage::error(
                        template.path.as_str(),
                        format!("execution error: {}", required.message),
                    ));
                }
            }
        }
        messages
    }
}

/// API versions deprecated or removed in the target Kubernetes version.
pub struct DeprecatedApis;

impl Rule for DeprecatedApis {
    fn name(&self) -> &'static str {
        "template-deprecated-api"
    }

    fn severity(&self) -> Severity {
        Severity::Warning
    }

    fn check(&self, ctx: &LintContext) -> Vec<LintMessage> {
        let target = ctx.config.target_kube_version();
        let mut messages = Vec::new();

        for template in ctx.manifests() {
            for resource in &template.resources {
                let Some(api_version) = resource.api_version.as_deref() else {
                    continue;
                };
                let kind = resource.kind.as_deref();
                let kind_label = kind.unwrap_or("resource");

                match api_status(api_version, kind, target) {
                    ApiStatus::Removed(api) => messages.push(LintMessage::error(
                        template.path.as_str(),
                        format!(
                            "{} \"{}\" is removed in Kubernetes {}: use \"{}\" (target {})",
                            kind_label, api_version, api.removed_in, api.replacement, target
                        ),
                    )),
                    ApiStatus::Deprecated(api) if ctx.config.kube_version.is_some() => {
                        messages.push(LintMessage::warning(
                            template.path.as_str(),
                            format!(
                                "{} \"{}\" is deprecated since Kubernetes {} and removed in {}: use \"{}\"",
                                kind_label,
                                api_version,
                                api.deprecated_in,
                                api.removed_in,
                                api.replacement
                            ),
                        ))
                    }
                    _ => {}
                }
            }
        }
        messages
    }
}

/// Literal `metadata.namespace` that differs from the release namespace.
pub struct HardcodedNamespace;

impl Rule for HardcodedNamespace {
    fn name(&self) -> &'static str {
        "template-hardcoded-namespace"
    }

    fn severity(&self) -> Severity {
        Severity::Info
    }

    fn check(&self, ctx: &LintContext) -> Vec<LintMessage> {
        ctx.manifests()
            .flat_map(|template| {
                template
                    .resources
                    .iter()
                    .filter_map(|r| r.namespace.as_deref())
                    .filter(|ns| *ns != ctx.config.namespace)
                    .map(|ns| {
                        LintMessage::info(
                            template.path.as_str(),
                            format!(
                                "hard-coded namespace \"{}\" differs from release namespace \"{}\"",
                                ns, ctx.config.namespace
                            ),
                        )
                    })
                    .collect::<Vec<_>>()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::helmlint::config::LinterConfig;
    use crate::analyzer::helmlint::kube_version::KubeVersion;
    use crate::analyzer::helmlint::parser::chart::parse_chart_yaml;
    use crate::analyzer::helmlint::parser::template::{ParsedTemplate, parse_template};
    use crate::analyzer::helmlint::parser::values::ValuesFile;
    use serde_yaml::Mapping;

    fn check_all(
        templates: Option<&[ParsedTemplate]>,
        values: &str,
        config: &LinterConfig,
    ) -> Vec<LintMessage> {
        let chart = parse_chart_yaml("apiVersion: v2\nname: x\nversion: 1.0.0\n");
        let values: Mapping = serde_yaml::from_str(values).unwrap();
        let ctx = LintContext {
            chart: chart.as_ref(),
            values_file: &ValuesFile::Missing,
            values: &values,
            templates,
            config,
        };
        rules().iter().flat_map(|r| r.check(&ctx)).collect()
    }

    #[test]
    fn test_missing_templates_dir() {
        let msgs = check_all(None, "{}", &LinterConfig::default());
        assert_eq!(msgs, vec![LintMessage::warning("templates/", "directory not found")]);
    }

    #[test]
    fn test_required_value() {
        let templates = vec![parse_template(
            "host: {{ required \"ingress.host is required\" .Values.ingress.host }}\n",
            "templates/ingress.yaml",
        )];

        let msgs = check_all(Some(templates.as_slice()), "{}", &LinterConfig::default());
        assert_eq!(
            msgs,
            vec![LintMessage::error(
                "templates/ingress.yaml",
                "execution error: ingress.host is required"
            )]
        );

        let msgs = check_all(
            Some(&templates),
            "ingress:\n  host: shop.example.com\n",
            &LinterConfig::default(),
        );
        assert!(msgs.is_empty(), "{:?}", msgs);
    }

    #[test]
    fn test_required_ignored_in_partials() {
        let templates = vec![parse_template(
            "{{ define \"x\" }}{{ required \"nope\" .Values.a }}{{ end }}",
            "templates/_helpers.tpl",
        )];
        assert!(check_all(Some(templates.as_slice()), "{}", &LinterConfig::default()).is_empty());
    }

    #[test]
    fn test_syntax_error() {
        let templates = vec![parse_template("{{ if .Values.a }}\nx: 1\n", "templates/cm.yaml")];
        let msgs = check_all(Some(templates.as_slice()), "{}", &LinterConfig::default());
        assert_eq!(msgs.len(), 1);
        assert_eq!(msgs[0].severity, Severity::Error);
        assert_eq!(msgs[0].path, "templates/cm.yaml");
        assert!(msgs[0].text.starts_with("parse error at line 1"));
    }

    #[test]
    fn test_deprecation_depends_on_kube_version() {
        let templates = vec![parse_template(
            "apiVersion: batch/v1beta1\nkind: CronJob\n",
            "templates/cron.yaml",
        )];

        assert!(check_all(Some(templates.as_slice()), "{}", &LinterConfig::default()).is_empty());

        let config = LinterConfig::default().with_kube_version(KubeVersion::new(1, 22));
        let msgs = check_all(Some(templates.as_slice()), "{}", &config);
        assert_eq!(msgs.len(), 1);
        assert_eq!(msgs[0].severity, Severity::Warning);

        let config = LinterConfig::default().with_kube_version(KubeVersion::new(1, 25));
        let msgs = check_all(Some(templates.as_slice()), "{}", &config);
        assert_eq!(msgs[0].severity, Severity::Error);
        assert!(msgs[0].text.contains("use \"batch/v1\""));
    }

    #[test]
    fn test_removed_against_default_version() {
        let templates = vec![parse_template(
            "apiVersion: extensions/v1beta1\nkind: Deployment\n",
            "templates/deploy.yaml",
        )];
        let msgs = check_all(Some(templates.as_slice()), "{}", &LinterConfig::default());
        assert_eq!(msgs.len(), 1);
        assert_eq!(msgs[0].severity, Severity::Error);
    }

    #[test]
    fn test_hardcoded_namespace() {
        let templates = vec![parse_template(
            "apiVersion: v1\nkind: ConfigMap\nmetadata:\n  name: x\n  namespace: monitoring\n",
            "templates/cm.yaml",
        )];

        let msgs = check_all(Some(templates.as_slice()), "{}", &LinterConfig::default());
        assert_eq!(msgs.len(), 1);
        assert_eq!(msgs[0].severity, Severity::Info);

        let config = LinterConfig::default().with_namespace("monitoring");
        assert!(check_all(Some(templates.as_slice()), "{}", &config).is_empty());
    }
}
