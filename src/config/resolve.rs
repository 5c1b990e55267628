use std::env;
use std::path::{Path, PathBuf};

use crate::config::{ConfigError, GitTabsConfig};

pub const CONFIG_FILE_NAME: &str = ".git-tabs.toml";

#[derive(Debug, Clone)]
pub struct ResolvedWorkspace {
    pub root: PathBuf,
    pub config_path: Option<PathBuf>,
    pub config: GitTabsConfig,
}

pub fn resolve_workspace(
    workspace_root: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<ResolvedWorkspace, ConfigError> {
    let root = match workspace_root {
        Some(root) => root,
        None => match env::var("GIT_TABS_WORKSPACE") {
            Ok(path) => PathBuf::from(path),
            Err(_) => env::current_dir()?,
        },
    };
    if !root.is_dir() {
        return Err(ConfigError::InvalidWorkspace(root));
    }
    let root = root.canonicalize()?;

    let config_path = match config_path {
        Some(path) => Some(require_file(path)?),
        None => match env::var("GIT_TABS_CONFIG") {
            Ok(path) => Some(require_file(PathBuf::from(path))?),
            Err(_) => {
                let candidate = root.join(CONFIG_FILE_NAME);
                candidate.is_file().then_some(candidate)
            }
        },
    };

    let mut config = match &config_path {
        Some(path) => load_config(path)?,
        None => GitTabsConfig::default(),
    };
    apply_env_overrides(&mut config)?;

    Ok(ResolvedWorkspace {
        root,
        config_path,
        config,
    })
}

pub fn load_config(path: &Path) -> Result<GitTabsConfig, ConfigError> {
    if !path.is_file() {
        return Err(ConfigError::ConfigNotFound(path.to_path_buf()));
    }

    let contents = std::fs::read_to_string(path)?;
    toml::from_str(&contents).map_err(|source| ConfigError::Toml {
        path: path.to_path_buf(),
        source,
    })
}

fn apply_env_overrides(config: &mut GitTabsConfig) -> Result<(), ConfigError> {
    if let Ok(backend) = env::var("GIT_TABS_BACKEND") {
        config.status.backend = backend.parse()?;
    }
    Ok(())
}

fn require_file(path: PathBuf) -> Result<PathBuf, ConfigError> {
    if path.is_file() {
        Ok(path)
    } else {
        Err(ConfigError::ConfigNotFound(path))
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::time::{SystemTime, UNIX_EPOCH};

    use crate::config::resolve::{load_config, resolve_workspace, CONFIG_FILE_NAME};
    use crate::config::{ConfigError, StatusBackend};

    fn unique_temp_dir(prefix: &str) -> std::path::PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock before epoch")
            .as_nanos();
        let pid = std::process::id();
        std::env::temp_dir().join(format!("git-tabs-{prefix}-{pid}-{nanos}"))
    }

    #[test]
    fn missing_sections_fall_back_to_defaults() {
        let root = unique_temp_dir("config-defaults");
        fs::create_dir_all(&root).expect("create root");
        let path = root.join(CONFIG_FILE_NAME);
        fs::write(&path, "[status]\nbackend = \"gix\"\n").expect("write config");

        let config = load_config(&path).expect("load config");
        assert_eq!(config.status.backend, StatusBackend::Gix);
        assert_eq!(config.status.marker, ".git");
        assert_eq!(config.status.poll_interval_ms, 2000);
        assert_eq!(config.settings.file, ".vscode/settings.json");
        let _ = fs::remove_dir_all(&root);
    }

    #[test]
    fn invalid_toml_reports_path() {
        let root = unique_temp_dir("config-invalid");
        fs::create_dir_all(&root).expect("create root");
        let path = root.join(CONFIG_FILE_NAME);
        fs::write(&path, "[status\nbackend = 1\n").expect("write config");

        let err = load_config(&path).expect_err("parse should fail");
        match err {
            ConfigError::Toml { path: reported, .. } => assert_eq!(reported, path),
            other => panic!("unexpected error: {other}"),
        }
        let _ = fs::remove_dir_all(&root);
    }

    #[test]
    fn explicit_config_must_exist() {
        let root = unique_temp_dir("config-explicit");
        fs::create_dir_all(&root).expect("create root");

        let err = resolve_workspace(Some(root.clone()), Some(root.join("missing.toml")))
            .expect_err("missing explicit config");
        assert!(matches!(err, ConfigError::ConfigNotFound(_)));
        let _ = fs::remove_dir_all(&root);
    }

    #[test]
    fn workspace_root_must_be_a_directory() {
        let root = unique_temp_dir("config-no-root");
        let err = resolve_workspace(Some(root.clone()), None).expect_err("missing root");
        assert!(matches!(err, ConfigError::InvalidWorkspace(path) if path == root));
    }
}
