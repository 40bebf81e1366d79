//! Chart.yaml parser.
//!
//! Fields are lenient on purpose so that a chart with a missing `name` or
//! `version` still parses and the chartfile rules can report it.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Chart type.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartType {
    #[default]
    Application,
    Library,
}

/// Chart maintainer information.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Maintainer {
    #[serde(default)]
    pub name: String,
    pub email: Option<String>,
    pub url: Option<String>,
}

/// A dependency declared in Chart.yaml.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Dependency {
    pub name: String,
    /// Version or SemVer range
    #[serde(default, deserialize_with = "optional_scalar")]
    pub version: Option<String>,
    pub repository: Option<String>,
    pub condition: Option<String>,
    pub tags: Option<Vec<String>>,
    #[serde(rename = "import-values")]
    pub import_values: Option<Vec<serde_yaml::Value>>,
    /// Scope name used instead of `name` when set
    pub alias: Option<String>,
}

impl Dependency {
    /// Alias when declared and non-empty, else name.
    pub fn scope_key(&self) -> &str {
        match self.alias.as_deref() {
            Some(alias) if !alias.is_empty() => alias,
            _ => &self.name,
        }
    }
}

/// Parsed Chart.yaml metadata.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ChartMetadata {
    /// `v1` (Helm 2) or `v2` (Helm 3)
    #[serde(rename = "apiVersion", default)]
    pub api_version: String,

    #[serde(default)]
    pub name: String,

    /// A SemVer 2 version
    #[serde(default, deserialize_with = "scalar")]
    pub version: String,

    /// Kubernetes version constraint
    #[serde(rename = "kubeVersion")]
    pub kube_version: Option<String>,

    pub description: Option<String>,

    #[serde(rename = "type")]
    pub chart_type: Option<ChartType>,

    #[serde(default)]
    pub keywords: Vec<String>,

    pub home: Option<String>,

    #[serde(default)]
    pub sources: Vec<String>,

    #[serde(default)]
    pub dependencies: Vec<Dependency>,

    #[serde(default)]
    pub maintainers: Vec<Maintainer>,

    pub icon: Option<String>,

    #[serde(rename = "appVersion", default, deserialize_with = "optional_scalar")]
    pub app_version: Option<String>,

    pub deprecated: Option<bool>,

    #[serde(default)]
    pub annotations: HashMap<String, String>,
}

impl ChartMetadata {
    pub fn has_valid_api_version(&self) -> bool {
        matches!(self.api_version.as_str(), "v1" | "v2")
    }

    pub fn is_v1(&self) -> bool {
        self.api_version == "v1"
    }

    /// Problems that make the chart unloadable, in the order a loader
    /// would hit them.
    pub fn validate(&self) -> Result<(), String> {
        if self.api_version.is_empty() {
            return Err("chart.metadata.apiVersion is required".to_string());
        }
        if self.name.is_empty() {
            return Err("chart.metadata.name is required".to_string());
        }
        if self.version.is_empty() {
            return Err("chart.metadata.version is required".to_string());
        }
        if !is_valid_semver(&self.version) {
            return Err(format!("chart.metadata.version {:?} is invalid", self.version));
        }
        Ok(())
    }
}

/// Accept `version: 1.0` (a YAML float) as well as `version: "1.0"`.
fn scalar<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error;

    match serde_yaml::Value::deserialize(deserializer)? {
        serde_yaml::Value::String(s) => Ok(s),
        serde_yaml::Value::Number(n) => Ok(n.to_string()),
        serde_yaml::Value::Bool(b) => Ok(b.to_string()),
        serde_yaml::Value::Null => Ok(String::new()),
        _ => Err(D::Error::custom("expected a scalar value")),
    }
}

fn optional_scalar<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    scalar(deserializer).map(|s| if s.is_empty() { None } else { Some(s) })
}

/// Lenient SemVer check: `[v]MAJOR[.MINOR[.PATCH]][-pre][+build]`.
pub fn is_valid_semver(version: &str) -> bool {
    let version = version.strip_prefix('v').unwrap_or(version);
    let (core, rest) = match version.find(['-', '+']) {
        Some(idx) => version.split_at(idx),
        None => (version, ""),
    };
    if rest == "-" || rest == "+" {
        return false;
    }

    let parts: Vec<&str> = core.split('.').collect();
    (1..=3).contains(&parts.len())
        && parts
            .iter()
            .all(|p| !p.is_empty() && p.chars().all(|c| c.is_ascii_digit()))
}

/// Parse error for Chart.yaml.
#[derive(Debug)]
pub struct ChartParseError {
    pub message: String,
    pub line: Option<u32>,
}

impl std::fmt::Display for ChartParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(line) = self.line {
            write!(f, "line {}: {}", line, self.message)
        } else {
            write!(f, "{}", self.message)
        }
    }
}

impl std::error::Error for ChartParseError {}

/// Parse Chart.yaml content.
pub fn parse_chart_yaml(content: &str) -> Result<ChartMetadata, ChartParseError> {
    serde_yaml::from_str(content).map_err(|e| ChartParseError {
        line: e.location().map(|l| l.line() as u32),
        message: e.to_string(),
    })
}
