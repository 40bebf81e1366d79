//! Deprecated and removed Kubernetes API versions.

use crate::analyzer::helmlint::kube_version::KubeVersion;

/// A Kubernetes API version that was deprecated and later removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeprecatedApi {
    /// e.g. "extensions/v1beta1"
    pub api_version: &'static str,
    /// `None` applies to every kind in the group version.
    pub kind: Option<&'static str>,
    pub replacement: &'static str,
    pub deprecated_in: KubeVersion,
    pub removed_in: KubeVersion,
}

/// What the target cluster version says about an API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiStatus {
    Supported,
    Deprecated(&'static DeprecatedApi),
    Removed(&'static DeprecatedApi),
}

const fn api(
    api_version: &'static str,
    kind: Option<&'static str>,
    replacement: &'static str,
    deprecated_in: (u32, u32),
    removed_in: (u32, u32),
) -> DeprecatedApi {
    DeprecatedApi {
        api_version,
        kind,
        replacement,
        deprecated_in: KubeVersion::new(deprecated_in.0, deprecated_in.1),
        removed_in: KubeVersion::new(removed_in.0, removed_in.1),
    }
}

static DEPRECATED_APIS: &[DeprecatedApi] = &[
    api("extensions/v1beta1", Some("Deployment"), "apps/v1", (1, 9), (1, 16)),
    api("extensions/v1beta1", Some("DaemonSet"), "apps/v1", (1, 9), (1, 16)),
    api("extensions/v1beta1", Some("ReplicaSet"), "apps/v1", (1, 9), (1, 16)),
    api("extensions/v1beta1", Some("Ingress"), "networking.k8s.io/v1", (1, 14), (1, 22)),
    api("apps/v1beta1", Some("Deployment"), "apps/v1", (1, 9), (1, 16)),
    api("apps/v1beta1", Some("StatefulSet"), "apps/v1", (1, 9), (1, 16)),
    api("apps/v1beta2", None, "apps/v1", (1, 9), (1, 16)),
    api("networking.k8s.io/v1beta1", Some("Ingress"), "networking.k8s.io/v1", (1, 19), (1, 22)),
    api("rbac.authorization.k8s.io/v1beta1", None, "rbac.authorization.k8s.io/v1", (1, 17), (1, 22)),
    api("apiextensions.k8s.io/v1beta1", Some("CustomResourceDefinition"), "apiextensions.k8s.io/v1", (1, 16), (1, 22)),
    api("policy/v1beta1", Some("PodDisruptionBudget"), "policy/v1", (1, 21), (1, 25)),
    api("policy/v1beta1", Some("PodSecurityPolicy"), "none (use Pod Security Admission)", (1, 21), (1, 25)),
    api("batch/v1beta1", Some("CronJob"), "batch/v1", (1, 21), (1, 25)),
    api("autoscaling/v2beta1", Some("HorizontalPodAutoscaler"), "autoscaling/v2", (1, 23), (1, 25)),
    api("autoscaling/v2beta2", Some("HorizontalPodAutoscaler"), "autoscaling/v2", (1, 23), (1, 26)),
];

fn lookup(api_version: &str, kind: Option<&str>) -> Option<&'static DeprecatedApi> {
    DEPRECATED_APIS
        .iter()
        .find(|api| api.api_version == api_version && (api.kind.is_none() || api.kind == kind))
}

/// Classify `api_version`/`kind` against the target cluster version.
pub fn api_status(api_version: &str, kind: Option<&str>, target: KubeVersion) -> ApiStatus {
    let target = KubeVersion::new(target.major, target.minor);
    match lookup(api_version, kind) {
        Some(api) if target >= api.removed_in => ApiStatus::Removed(api),
        Some(api) if target >= api.deprecated_in => ApiStatus::Deprecated(api),
        _ => ApiStatus::Supported,
    }
}
