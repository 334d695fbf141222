use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

/// A config file in its own temporary directory.
pub struct TempConfig {
    pub path: PathBuf,
    _dir: TempDir,
}

impl TempConfig {
    pub fn new(contents: &str) -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("config.toml");
        fs::write(&path, contents).expect("write temp config");
        Self { path, _dir: dir }
    }

    /// Path inside the directory where no file has been written.
    pub fn missing(name: &str) -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join(name);
        Self { path, _dir: dir }
    }

    pub fn path_str(&self) -> &str {
        self.path.to_str().expect("utf-8 temp path")
    }
}
