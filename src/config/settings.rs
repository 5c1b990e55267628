use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Deserialize;

use crate::config::ConfigError;

pub const DEFAULT_SETTINGS_FILE: &str = ".vscode/settings.json";
pub const DEFAULT_MARKER: &str = ".git";
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 2000;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GitTabsConfig {
    #[serde(default)]
    pub settings: SettingsFileConfig,
    #[serde(default)]
    pub status: StatusConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SettingsFileConfig {
    #[serde(default = "default_settings_file")]
    pub file: String,
}

impl Default for SettingsFileConfig {
    fn default() -> Self {
        Self {
            file: default_settings_file(),
        }
    }
}

impl SettingsFileConfig {
    /// Relative paths are taken from the workspace root.
    pub fn path_in(&self, workspace_root: &Path) -> PathBuf {
        let file = Path::new(&self.file);
        if file.is_absolute() {
            file.to_path_buf()
        } else {
            workspace_root.join(file)
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct StatusConfig {
    #[serde(default)]
    pub backend: StatusBackend,
    #[serde(default = "default_marker")]
    pub marker: String,
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

impl Default for StatusConfig {
    fn default() -> Self {
        Self {
            backend: StatusBackend::default(),
            marker: default_marker(),
            poll_interval_ms: default_poll_interval_ms(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusBackend {
    #[default]
    Git,
    Gix,
}

impl FromStr for StatusBackend {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "git" => Ok(Self::Git),
            "gix" => Ok(Self::Gix),
            other => Err(ConfigError::UnknownBackend(other.to_string())),
        }
    }
}

fn default_settings_file() -> String {
    DEFAULT_SETTINGS_FILE.to_string()
}

fn default_marker() -> String {
    DEFAULT_MARKER.to_string()
}

fn default_poll_interval_ms() -> u64 {
    DEFAULT_POLL_INTERVAL_MS
}
