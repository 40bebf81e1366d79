//! Per-scope value resolution.

use serde_yaml::{Mapping, Value};

use crate::analyzer::multichart::discovery::ROOT_SCOPE;

/// Top-level key shared by every chart in a release.
pub const GLOBAL_KEY: &str = "global";

/// Values visible to the chart linted under `scope`.
///
/// The root scope sees everything. A sub-chart sees the mapping stored under
/// its scope key (or `{global: null}` when there is none) with `global`
/// replaced wholesale by the root's `global`, never merged with it.
pub fn resolve(scope: &str, values: &Mapping) -> Mapping {
    if scope == ROOT_SCOPE {
        return values.clone();
    }

    let mut result = match values.get(scope) {
        Some(Value::Mapping(scoped)) => scoped.clone(),
        _ => {
            let mut skeleton = Mapping::new();
            skeleton.insert(Value::from(GLOBAL_KEY), Value::Null);
            skeleton
        }
    };

    if let Some(global) = values.get(GLOBAL_KEY) {
        result.insert(Value::from(GLOBAL_KEY), global.clone());
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn yaml(s: &str) -> Mapping {
        serde_yaml::from_str(s).unwrap()
    }

    #[test]
    fn test_root_scope_is_identity() {
        let values = yaml("a: 1\nglobal:\n  env: prod\ndb:\n  image: x\n");
        assert_eq!(resolve(".", &values), values);
    }

    #[test]
    fn test_scoped_values_with_global() {
        let values = yaml("database:\n  image: x\nglobal:\n  env: prod\n");
        assert_eq!(
            resolve("database", &values),
            yaml("image: x\nglobal:\n  env: prod\n")
        );
    }

    #[test]
    fn test_absent_scope_gets_skeleton() {
        assert_eq!(resolve("db", &yaml("other: 1\n")), yaml("global: null\n"));
        assert_eq!(
            resolve("db", &yaml("global:\n  env: prod\n")),
            yaml("global:\n  env: prod\n")
        );
    }

    #[test]
    fn test_non_mapping_scope_is_ignored() {
        assert_eq!(resolve("db", &yaml("db: just-a-string\n")), yaml("global: null\n"));
        assert_eq!(resolve("db", &yaml("db: [1, 2]\n")), yaml("global: null\n"));
    }

    #[test]
    fn test_scope_without_root_global_keeps_its_own() {
        let values = yaml("db:\n  global:\n    local: true\n  port: 5432\n");
        assert_eq!(
            resolve("db", &values),
            yaml("global:\n  local: true\nport: 5432\n")
        );
    }

    #[test]
    fn test_root_global_replaces_not_merges() {
        let values = yaml("db:\n  global:\n    local: true\n  port: 5432\nglobal:\n  env: prod\n");
        assert_eq!(
            resolve("db", &values),
            yaml("global:\n  env: prod\nport: 5432\n")
        );
    }

    fn scalar() -> impl Strategy<Value = Value> {
        prop_oneof![
            Just(Value::Null),
            any::<bool>().prop_map(Value::from),
            any::<i64>().prop_map(Value::from),
            "[a-z]{0,8}".prop_map(Value::from),
        ]
    }

    fn value() -> impl Strategy<Value = Value> {
        scalar().prop_recursive(3, 16, 4, |inner| {
            prop::collection::btree_map("[a-z]{1,4}", inner, 0..4).prop_map(|entries| {
                Value::Mapping(
                    entries
                        .into_iter()
                        .map(|(k, v)| (Value::from(k), v))
                        .collect(),
                )
            })
        })
    }

    fn values() -> impl Strategy<Value = Mapping> {
        prop::collection::btree_map(
            prop_oneof![Just("global".to_string()), "[a-z]{1,4}"],
            value(),
            0..6,
        )
        .prop_map(|entries| {
            entries
                .into_iter()
                .map(|(k, v)| (Value::from(k), v))
                .collect()
        })
    }

    proptest! {
        #[test]
        fn prop_root_is_identity(vals in values()) {
            prop_assert_eq!(resolve(ROOT_SCOPE, &vals), vals);
        }

        #[test]
        fn prop_global_always_present_and_from_root(vals in values(), scope in "[a-z]{1,4}") {
            let resolved = resolve(&scope, &vals);
            let expected_global = match vals.get(GLOBAL_KEY) {
                Some(global) => Some(global.clone()),
                None => match vals.get(scope.as_str()) {
                    Some(Value::Mapping(scoped)) => scoped.get(GLOBAL_KEY).cloned(),
                    _ => Some(Value::Null),
                },
            };
            prop_assert_eq!(resolved.get(GLOBAL_KEY).cloned(), expected_global);
        }

        #[test]
        fn prop_non_global_keys_come_from_scope(vals in values(), scope in "[a-z]{1,4}") {
            let resolved = resolve(&scope, &vals);
            let scoped = match vals.get(scope.as_str()) {
                Some(Value::Mapping(scoped)) => scoped.clone(),
                _ => Mapping::new(),
            };
            for (key, value) in &resolved {
                if key.as_str() != Some(GLOBAL_KEY) {
                    prop_assert_eq!(scoped.get(key), Some(value));
                }
            }
            for (key, value) in &scoped {
                if key.as_str() != Some(GLOBAL_KEY) {
                    prop_assert_eq!(resolved.get(key), Some(value));
                }
            }
        }
    }
}
