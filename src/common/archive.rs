//! Packaged chart archives (`.tgz` / `.tar.gz`).
//!
//! Archives are unpacked with the system `tar` into a temporary directory
//! that lives as long as the returned [`ChartSource`].

use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::common::command_utils::{execute_command, is_command_available};
use crate::error::{ChartLintError, Result};

/// True for file names Helm treats as packaged charts.
pub fn is_chart_archive(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|name| name.ends_with(".tgz") || name.ends_with(".tar.gz"))
}

/// A chart on disk, either as given or unpacked from an archive.
#[derive(Debug)]
pub enum ChartSource {
    Directory(PathBuf),
    Archive {
        root: PathBuf,
        // Keeps the unpacked tree alive.
        _workdir: TempDir,
    },
}

impl ChartSource {
    /// Open `path` as a chart directory, unpacking it first if it is an archive.
    pub fn open(path: &Path) -> Result<Self> {
        if path.is_dir() {
            return Ok(Self::Directory(path.to_path_buf()));
        }
        if is_chart_archive(path) && path.is_file() {
            return extract_chart_archive(path);
        }
        Err(ChartLintError::Archive {
            path: path.display().to_string(),
            reason: "not a chart directory or a .tgz archive".to_string(),
        })
    }

    /// Directory holding the chart's Chart.yaml.
    pub fn root(&self) -> &Path {
        match self {
            Self::Directory(root) | Self::Archive { root, .. } => root,
        }
    }
}

fn extract_chart_archive(archive: &Path) -> Result<ChartSource> {
    let archive_error = |reason: String| ChartLintError::Archive {
        path: archive.display().to_string(),
        reason,
    };

    if !is_command_available("tar") {
        return Err(archive_error("tar is not available in PATH".to_string()));
    }

    let workdir = TempDir::new()?;
    let archive_arg = archive.to_string_lossy().into_owned();
    let target_arg = workdir.path().to_string_lossy().into_owned();
    let output = execute_command(
        "tar",
        &["-xzf", archive_arg.as_str(), "-C", target_arg.as_str()],
    )?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(archive_error(stderr.trim().to_string()));
    }

    let root = find_chart_root(workdir.path())?
        .ok_or_else(|| archive_error("no Chart.yaml found in archive".to_string()))?;
    log::debug!("Extracted {} to {}", archive.display(), root.display());

    Ok(ChartSource::Archive {
        root,
        _workdir: workdir,
    })
}

/// Packaged charts keep everything under a single `<name>/` directory.
fn find_chart_root(dir: &Path) -> Result<Option<PathBuf>> {
    if dir.join("Chart.yaml").is_file() {
        return Ok(Some(dir.to_path_buf()));
    }

    let mut candidates = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() && path.join("Chart.yaml").is_file() {
            candidates.push(path);
        }
    }
    candidates.sort();
    Ok(candidates.into_iter().next())
}
