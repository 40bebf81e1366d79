pub mod types;

use crate::error::{ConfigError, Result};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE_NAME: &str = ".chartlint.toml";

/// Get the global config file path (~/.chartlint.toml)
pub fn global_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(CONFIG_FILE_NAME))
}

/// Get the local config file path (chart/.chartlint.toml)
pub fn local_config_path(chart_path: &Path) -> PathBuf {
    chart_path.join(CONFIG_FILE_NAME)
}

/// Read and parse one config file
pub fn read_config_file(path: &Path) -> std::result::Result<types::Config, ConfigError> {
    if !path.is_file() {
        return Err(ConfigError::NotFound(path.display().to_string()));
    }
    let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadFailed {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    toml::from_str(&content).map_err(|e| ConfigError::ParsingFailed {
        path: path.display().to_string(),
        reason: e.to_string(),
    })
}

/// Load configuration.
///
/// An explicit file must exist and parse. Otherwise the chart's local
/// config is tried first, then the global one; unreadable implicit files
/// are skipped with a warning.
pub fn load_config(explicit: Option<&Path>, chart_path: Option<&Path>) -> Result<types::Config> {
    if let Some(path) = explicit {
        log::debug!("Using config file {}", path.display());
        return Ok(read_config_file(path)?);
    }

    let candidates = chart_path
        .map(local_config_path)
        .into_iter()
        .chain(global_config_path());

    for candidate in candidates {
        if !candidate.exists() {
            continue;
        }
        match read_config_file(&candidate) {
            Ok(config) => {
                log::debug!("Loaded config from {}", candidate.display());
                return Ok(config);
            }
            Err(e) => log::warn!("Ignoring config file: {}", e),
        }
    }

    Ok(types::Config::default())
}
