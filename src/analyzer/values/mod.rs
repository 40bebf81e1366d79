//! User-supplied values.
//!
//! Builds the value tree handed to the linter from the root chart's own
//! values plus `-f/--values` files and the `--set*` flags, in that order.

mod options;
pub mod strvals;

use serde_yaml::{Mapping, Value};
use thiserror::Error;

pub use options::ValueOptions;
pub use strvals::SetKind;

/// Errors raised while reading or merging user values.
#[derive(Debug, Error)]
pub enum ValuesError {
    #[error("failed to read values file {path}: {source}")]
    ReadFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {reason}")]
    ParseFile { path: String, reason: String },

    /// A `--set*` expression could not be parsed
    #[error("failed parsing {flag} data: {reason}")]
    InvalidSet { flag: &'static str, reason: String },
}

/// Deep-merge `src` into `dest`.
///
/// Mappings merge key by key; any other value in `src` replaces the one in
/// `dest`.
pub fn merge_maps(dest: &mut Mapping, src: Mapping) {
    for (key, value) in src {
        match (dest.get_mut(&key), value) {
            (Some(Value::Mapping(existing)), Value::Mapping(incoming)) => {
                merge_maps(existing, incoming);
            }
            (_, value) => {
                dest.insert(key, value);
            }
        }
    }
}
