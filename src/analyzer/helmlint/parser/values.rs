//! values.yaml parser and path lookups.

use serde_yaml::{Mapping, Value};

/// State of a chart's values.yaml.
#[derive(Debug, Clone, PartialEq)]
pub enum ValuesFile {
    /// No values.yaml in the chart.
    Missing,
    /// Present but not a YAML mapping.
    Invalid(String),
    Parsed(Mapping),
}

impl ValuesFile {
    /// Defaults usable for coalescing; empty unless parsed.
    pub fn defaults(&self) -> Mapping {
        match self {
            Self::Parsed(map) => map.clone(),
            _ => Mapping::new(),
        }
    }
}

/// Parse values.yaml content into a mapping.
///
/// An empty document is an empty mapping; any other non-mapping document is
/// an error.
pub fn parse_values_yaml(content: &str) -> Result<Mapping, String> {
    let value: Value = serde_yaml::from_str(content).map_err(|e| e.to_string())?;
    match value {
        Value::Null => Ok(Mapping::new()),
        Value::Mapping(map) => Ok(map),
        other => Err(format!(
            "values must be a YAML mapping, got {}",
            type_name(&other)
        )),
    }
}

pub(crate) fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a list",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}

/// Look up a dotted path such as `image.repository`.
///
/// Null values count as absent, the way templates see them.
pub fn lookup<'a>(values: &'a Mapping, path: &str) -> Option<&'a Value> {
    let mut parts = path.split('.');
    let first = parts.next()?;
    let mut current = values.get(first)?;

    for part in parts {
        current = current.as_mapping()?.get(part)?;
    }

    (!current.is_null()).then_some(current)
}

/// Coalesce caller-supplied values over chart defaults.
///
/// Mappings merge key by key, any other supplied value wins, and a supplied
/// null removes the default.
pub fn coalesce(defaults: &Mapping, supplied: &Mapping) -> Mapping {
    let mut result = defaults.clone();
    for (key, value) in supplied {
        match (result.get_mut(key), value) {
            (_, Value::Null) => {
                result.remove(key);
            }
            (Some(Value::Mapping(base)), Value::Mapping(over)) => {
                *base = coalesce(base, over);
            }
            _ => {
                result.insert(key.clone(), value.clone());
            }
        }
    }
    result
}
