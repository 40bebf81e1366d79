use serde::{Deserialize, Serialize};

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub lint: LintConfig,
}

/// Defaults for `chartlint lint`; command-line flags take precedence
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LintConfig {
    pub strict: bool,
    pub quiet: bool,
    pub with_subcharts: bool,
    pub kube_version: Option<String>,
    pub namespace: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_lint_table() {
        let config: Config = toml::from_str("[lint]\nstrict = true\nkube_version = \"1.28\"\n").unwrap();
        assert!(config.lint.strict);
        assert!(!config.lint.quiet);
        assert_eq!(config.lint.kube_version.as_deref(), Some("1.28"));
        assert_eq!(config.lint.namespace, None);
    }

    #[test]
    fn test_empty_file_is_default() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_unknown_types_rejected() {
        assert!(toml::from_str::<Config>("[lint]\nstrict = \"yes\"\n").is_err());
    }
}
