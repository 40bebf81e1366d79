//! Chart fixtures shared by the binary-level tests.

#![allow(dead_code)]

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const ICON: &str = "icon: https://example.com/icon.png\n";

// Temporary fix for deprecated cargo_bin - will be updated when build-dir issues are resolved
#[allow(deprecated)]
pub fn chartlint_cmd(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("chartlint").unwrap();
    cmd.env("HOME", home)
        .env_remove("HELM_NAMESPACE")
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1");
    cmd
}

/// A chart directory holding Chart.yaml, values.yaml and a ConfigMap.
pub fn write_chart(dir: &Path, chart_yaml: &str, values_yaml: &str) {
    fs::create_dir_all(dir.join("templates")).unwrap();
    fs::write(dir.join("Chart.yaml"), chart_yaml).unwrap();
    fs::write(dir.join("values.yaml"), values_yaml).unwrap();
    fs::write(
        dir.join("templates/configmap.yaml"),
        "apiVersion: v1\nkind: ConfigMap\nmetadata:\n  name: {{ .Release.Name }}\n",
    )
    .unwrap();
}

pub fn write_template(chart: &Path, name: &str, content: &str) {
    fs::write(chart.join("templates").join(name), content).unwrap();
}

/// `shop` depending on `db` 1.0.0 under the alias `database`.
///
/// The `db` sub-chart requires `host`, which `shop` supplies.
pub fn shop_with_database(tmp: &TempDir) -> PathBuf {
    let root = tmp.path().join("shop");
    write_chart(
        &root,
        &format!(
            "apiVersion: v2\nname: shop\nversion: 1.0.0\n{}\
             dependencies:\n  - name: db\n    version: 1.0.0\n    alias: database\n",
            ICON
        ),
        "database:\n  host: localhost\nglobal:\n  env: prod\n",
    );

    let db = root.join("charts/db");
    write_chart(&db, &format!("apiVersion: v2\nname: db\nversion: 1.0.0\n{}", ICON), "");
    write_template(
        &db,
        "secret.yaml",
        "apiVersion: v1\nkind: Secret\nmetadata:\n  name: db\n\
         stringData:\n  host: {{ required \"database host is required\" .Values.host }}\n  \
         env: {{ required \"global env is required\" .Values.global.env }}\n",
    );
    root
}

/// Pack `chart_dir` into `<dest>/<name>` with the system tar.
pub fn package(chart_dir: &Path, dest: &Path, name: &str) -> PathBuf {
    let archive = dest.join(name);
    let parent = chart_dir.parent().unwrap();
    let dir_name = chart_dir.file_name().unwrap();
    let status = std::process::Command::new("tar")
        .arg("-czf")
        .arg(&archive)
        .arg("-C")
        .arg(parent)
        .arg(dir_name)
        .status()
        .unwrap();
    assert!(status.success());
    archive
}
