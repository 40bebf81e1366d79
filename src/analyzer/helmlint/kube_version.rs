//! Target Kubernetes version for capability and deprecation checks.

use std::fmt;

use crate::error::{ChartLintError, Result};

/// Kubernetes version used when none is given on the command line.
pub const DEFAULT_KUBE_VERSION: KubeVersion = KubeVersion {
    major: 1,
    minor: 20,
    patch: 0,
};

/// A parsed Kubernetes version such as `v1.28.3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct KubeVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl KubeVersion {
    pub const fn new(major: u32, minor: u32) -> Self {
        Self {
            major,
            minor,
            patch: 0,
        }
    }

    /// Parse `1.28`, `v1.28`, `1.28.3` or `v1.28.3-gke.100`.
    ///
    /// Pre-release and build suffixes are accepted and dropped.
    pub fn parse(input: &str) -> Result<Self> {
        let invalid = |reason: &str| ChartLintError::InvalidKubeVersion {
            input: input.to_string(),
            reason: reason.to_string(),
        };

        let trimmed = input.trim();
        let trimmed = trimmed.strip_prefix('v').unwrap_or(trimmed);
        let core = trimmed
            .split(['-', '+'])
            .next()
            .filter(|c| !c.is_empty())
            .ok_or_else(|| invalid("empty version"))?;

        let parts: Vec<&str> = core.split('.').collect();
        if parts.len() < 2 || parts.len() > 3 {
            return Err(invalid("expected MAJOR.MINOR[.PATCH]"));
        }

        let number = |part: &str| {
            part.parse::<u32>()
                .map_err(|_| invalid(&format!("'{}' is not a number", part)))
        };

        Ok(Self {
            major: number(parts[0])?,
            minor: number(parts[1])?,
            patch: match parts.get(2) {
                Some(p) => number(p)?,
                None => 0,
            },
        })
    }
}

impl fmt::Display for KubeVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}.{}.{}", self.major, self.minor, self.patch)
    }
}
