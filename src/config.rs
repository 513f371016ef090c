use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// User settings, read from an optional JSON file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Where to write logs. Defaults to `metaedit.log` in the temp dir.
    pub log_file: Option<PathBuf>,
    /// `tracing` filter directive; `RUST_LOG` takes precedence.
    pub log_filter: String,
    pub start_in_delete_mode: bool,
    pub show_key_hints: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_file: None,
            log_filter: "info".to_string(),
            start_in_delete_mode: false,
            show_key_hints: true,
        }
    }
}

impl Settings {
    pub fn load(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        serde_json::from_str(&data).with_context(|| format!("invalid config {}", path.display()))
    }

    /// Settings from `path` if given, otherwise the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        path.map_or_else(|| Ok(Self::default()), Self::load)
    }

    pub fn log_path(&self) -> PathBuf {
        self.log_file
            .clone()
            .unwrap_or_else(|| std::env::temp_dir().join("metaedit.log"))
    }
}
