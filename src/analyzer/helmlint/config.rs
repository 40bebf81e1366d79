//! Configuration for the built-in chart linter.

use crate::analyzer::helmlint::kube_version::{DEFAULT_KUBE_VERSION, KubeVersion};
use crate::analyzer::helmlint::types::Severity;

/// Namespace assumed when none is configured.
pub const DEFAULT_NAMESPACE: &str = "default";

/// Settings shared by every chart linted in one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinterConfig {
    /// Treat warnings as failures.
    pub strict: bool,

    /// Namespace the chart would be installed into.
    pub namespace: String,

    /// Target Kubernetes version for API deprecation checks.
    ///
    /// When unset only removals relative to `DEFAULT_KUBE_VERSION` are
    /// reported.
    pub kube_version: Option<KubeVersion>,
}

impl Default for LinterConfig {
    fn default() -> Self {
        Self {
            strict: false,
            namespace: DEFAULT_NAMESPACE.to_string(),
            kube_version: None,
        }
    }
}

impl LinterConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable strict mode.
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    /// Set the target Kubernetes version.
    pub fn with_kube_version(mut self, version: KubeVersion) -> Self {
        self.kube_version = Some(version);
        self
    }

    /// Version the deprecation table is checked against.
    pub fn target_kube_version(&self) -> KubeVersion {
        self.kube_version.unwrap_or(DEFAULT_KUBE_VERSION)
    }

    /// Lowest severity that turns a message into a raw lint error.
    pub fn failure_threshold(&self) -> Severity {
        if self.strict {
            Severity::Warning
        } else {
            Severity::Error
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = LinterConfig::default();
        assert!(!config.strict);
        assert_eq!(config.namespace, "default");
        assert_eq!(config.kube_version, None);
        assert_eq!(config.target_kube_version(), DEFAULT_KUBE_VERSION);
        assert_eq!(config.failure_threshold(), Severity::Error);
    }

    #[test]
    fn test_strict_mode() {
        let config = LinterConfig::new()
            .with_strict(true)
            .with_namespace("shop")
            .with_kube_version(KubeVersion::new(1, 28));
        assert_eq!(config.failure_threshold(), Severity::Warning);
        assert_eq!(config.namespace, "shop");
        assert_eq!(config.target_kube_version().to_string(), "v1.28.0");
    }
}
