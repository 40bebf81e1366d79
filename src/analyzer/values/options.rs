use std::io::Read;
use std::path::{Path, PathBuf};

use serde_yaml::{Mapping, Value};

use crate::analyzer::values::strvals::{SetKind, parse_into};
use crate::analyzer::values::{ValuesError, merge_maps};

/// Value sources given on the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValueOptions {
    /// `-f/--values`; `-` reads standard input
    pub value_files: Vec<PathBuf>,
    pub json_values: Vec<String>,
    pub values: Vec<String>,
    pub string_values: Vec<String>,
    pub file_values: Vec<String>,
    pub literal_values: Vec<String>,
}

impl ValueOptions {
    /// Merge every source over `base`; later sources win.
    ///
    /// Order: value files, `--set-json`, `--set`, `--set-string`,
    /// `--set-file`, `--set-literal`.
    pub fn merge_values_with_base(&self, base: &Mapping) -> Result<Mapping, ValuesError> {
        let mut result = base.clone();

        for file in &self.value_files {
            let overrides = read_values_file(file)?;
            log::debug!("Merging values from {}", file.display());
            merge_maps(&mut result, overrides);
        }

        let sets = [
            (SetKind::Json, &self.json_values),
            (SetKind::Typed, &self.values),
            (SetKind::String, &self.string_values),
            (SetKind::File, &self.file_values),
            (SetKind::Literal, &self.literal_values),
        ];
        for (kind, exprs) in sets {
            for expr in exprs {
                parse_into(expr, &mut result, kind)?;
            }
        }

        Ok(result)
    }
}

fn read_values_file(path: &Path) -> Result<Mapping, ValuesError> {
    let display = path.display().to_string();
    let read_error = |source| ValuesError::ReadFile {
        path: display.clone(),
        source,
    };

    let content = if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .map_err(read_error)?;
        buf
    } else {
        std::fs::read_to_string(path).map_err(read_error)?
    };

    let parse_error = |reason: String| ValuesError::ParseFile {
        path: display.clone(),
        reason,
    };
    match serde_yaml::from_str::<Value>(&content).map_err(|e| parse_error(e.to_string()))? {
        Value::Null => Ok(Mapping::new()),
        Value::Mapping(map) => Ok(map),
        _ => Err(parse_error("values must be a YAML mapping".to_string())),
    }
}
