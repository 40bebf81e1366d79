//! Parser for `--set`-style `key=value` expressions.
//!
//! Keys are dotted paths (`image.tag`). A segment may address list indexes
//! (`hosts[1]`, `matrix[0][2]`) up to [`MAX_INDEX`]. A backslash escapes the
//! next character so that `\.` and `\,` can appear inside keys and values.

use std::path::Path;

use serde_yaml::{Mapping, Value};

use crate::analyzer::values::ValuesError;

/// How the right-hand side of an expression is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetKind {
    /// `--set`: booleans, null and integers are typed, the rest are strings.
    Typed,
    /// `--set-string`
    String,
    /// `--set-file`: the value is a path whose contents become a string.
    File,
    /// `--set-json`: the value is a JSON document.
    Json,
    /// `--set-literal`: everything after the first `=` verbatim.
    Literal,
}

impl SetKind {
    pub fn flag(&self) -> &'static str {
        match self {
            Self::Typed => "--set",
            Self::String => "--set-string",
            Self::File => "--set-file",
            Self::Json => "--set-json",
            Self::Literal => "--set-literal",
        }
    }
}

/// Largest list index a key may address.
pub const MAX_INDEX: usize = 65536;

/// One segment of a dotted key: `name`, `name[0]` or `name[0][2]`.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Segment {
    key: String,
    indexes: Vec<usize>,
}

/// Parse `expr` and apply every assignment in it to `dest`.
pub fn parse_into(expr: &str, dest: &mut Mapping, kind: SetKind) -> Result<(), ValuesError> {
    let invalid = |reason: String| ValuesError::InvalidSet {
        flag: kind.flag(),
        reason,
    };

    let pairs = match kind {
        SetKind::Literal | SetKind::Json => vec![expr.to_string()],
        _ => split_unescaped(expr, ','),
    };

    for pair in pairs.iter().filter(|p| !p.is_empty()) {
        let Some(eq) = find_unescaped(pair, '=') else {
            return Err(invalid(format!("key \"{}\" has no value", unescape(pair))));
        };
        let (raw_key, raw_value) = (&pair[..eq], &pair[eq + 1..]);

        let path = parse_key(raw_key).map_err(&invalid)?;
        let value = match kind {
            SetKind::Typed => typed_value(&unescape(raw_value)),
            SetKind::String => Value::String(unescape(raw_value)),
            SetKind::Literal => Value::String(raw_value.to_string()),
            SetKind::File => {
                let file = unescape(raw_value);
                let content = std::fs::read_to_string(Path::new(&file))
                    .map_err(|e| invalid(format!("unable to read file {}: {}", file, e)))?;
                Value::String(content)
            }
            SetKind::Json => {
                let json: serde_json::Value = serde_json::from_str(raw_value).map_err(|e| {
                    invalid(format!("key \"{}\" has an invalid JSON value: {}", raw_key, e))
                })?;
                serde_yaml::to_value(json).map_err(|e| invalid(e.to_string()))?
            }
        };

        set_in_mapping(dest, &path, value);
    }

    Ok(())
}

/// `true`, `false` and `null` keep their type, integers become numbers.
fn typed_value(raw: &str) -> Value {
    match raw {
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        "null" => Value::Null,
        _ => match raw.parse::<i64>() {
            // Leading zeros (`007`) stay strings.
            Ok(n) if !(raw.len() > 1 && raw.starts_with('0')) => Value::from(n),
            _ => Value::String(raw.to_string()),
        },
    }
}

fn split_unescaped(s: &str, sep: char) -> Vec<String> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut escaped = false;

    for c in s.chars() {
        if escaped {
            current.push(c);
            escaped = false;
        } else if c == '\\' {
            current.push(c);
            escaped = true;
        } else if c == sep {
            parts.push(std::mem::take(&mut current));
        } else {
            current.push(c);
        }
    }
    parts.push(current);
    parts
}

fn find_unescaped(s: &str, target: char) -> Option<usize> {
    let mut escaped = false;
    for (idx, c) in s.char_indices() {
        if escaped {
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == target {
            return Some(idx);
        }
    }
    None
}

fn unescape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some(next) => out.push(next),
                None => out.push(c),
            }
        } else {
            out.push(c);
        }
    }
    out
}

fn parse_key(raw: &str) -> Result<Vec<Segment>, String> {
    split_unescaped(raw, '.')
        .into_iter()
        .map(|part| {
            let (name, indexes) = match find_unescaped(&part, '[') {
                Some(open) if part.ends_with(']') => {
                    (&part[..open], parse_indexes(&part[open..], raw)?)
                }
                _ => (part.as_str(), Vec::new()),
            };

            let key = unescape(name);
            if key.is_empty() {
                return Err(format!("key \"{}\" has an empty segment", raw));
            }
            Ok(Segment { key, indexes })
        })
        .collect()
}

/// Parse `[N]` or `[N][M]...`, bounded by [`MAX_INDEX`].
fn parse_indexes(suffix: &str, raw: &str) -> Result<Vec<usize>, String> {
    let invalid = || format!("invalid list index in key \"{}\"", raw);
    let inner = suffix
        .strip_prefix('[')
        .and_then(|s| s.strip_suffix(']'))
        .ok_or_else(invalid)?;

    inner
        .split("][")
        .map(|digits| {
            let index = digits.parse::<usize>().map_err(|_| invalid())?;
            if index > MAX_INDEX {
                return Err(format!(
                    "index of {} is greater than maximum supported index {}",
                    index, MAX_INDEX
                ));
            }
            Ok(index)
        })
        .collect()
}

fn set_in_mapping(map: &mut Mapping, path: &[Segment], value: Value) {
    let Some((segment, rest)) = path.split_first() else {
        return;
    };
    let key = Value::String(segment.key.clone());
    let current = map.remove(&key).unwrap_or_default();

    let updated = if segment.indexes.is_empty() {
        set_in_value(current, rest, value)
    } else {
        set_in_list(current, &segment.indexes, rest, value)
    };
    map.insert(key, updated);
}

/// Place `value` at `rest` below `current`, replacing non-mappings.
fn set_in_value(current: Value, rest: &[Segment], value: Value) -> Value {
    if rest.is_empty() {
        return value;
    }
    let mut child = match current {
        Value::Mapping(map) => map,
        _ => Mapping::new(),
    };
    set_in_mapping(&mut child, rest, value);
    Value::Mapping(child)
}

/// Lists are padded with nulls up to the addressed index.
fn set_in_list(current: Value, indexes: &[usize], rest: &[Segment], value: Value) -> Value {
    let Some((&index, nested)) = indexes.split_first() else {
        return set_in_value(current, rest, value);
    };
    let mut list = match current {
        Value::Sequence(list) => list,
        _ => Vec::new(),
    };
    if list.len() <= index {
        list.resize(index + 1, Value::Null);
    }
    let element = std::mem::take(&mut list[index]);
    list[index] = set_in_list(element, nested, rest, value);
    Value::Sequence(list)
}
