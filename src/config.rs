use anyhow::Context;
use serde::Deserialize;
use std::path::Path;

/// What to do when a single file cannot be read or written
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ErrorPolicy {
    /// Stop the walk on the first per-file failure
    #[default]
    Abort,
    /// Log the failure and go on with the remaining files
    Continue,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub follow_symlinks: bool,
    #[serde(default)]
    pub on_error: ErrorPolicy,
    pub log_level: Option<log::LevelFilter>,
}

impl Config {
    pub fn load(path: &Path) -> anyhow::Result<Config> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.to_string_lossy()))?;
        toml::from_str(&contents).with_context(|| "Failed to parse config TOML")
    }
}
