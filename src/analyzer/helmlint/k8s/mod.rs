//! Kubernetes API version tracking.

pub mod api_versions;

pub use api_versions::{ApiStatus, DeprecatedApi, api_status};
