pub mod resolve;
pub mod settings;

pub use settings::{GitTabsConfig, SettingsFileConfig, StatusBackend, StatusConfig};

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    ConfigNotFound(PathBuf),
    #[error("invalid workspace root: {0}")]
    InvalidWorkspace(PathBuf),
    #[error("unknown status backend: {0}")]
    UnknownBackend(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config at {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

pub type Result<T> = std::result::Result<T, ConfigError>;
