use std::io;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::core::color::ColorCustomization;
use crate::error::{GitTabsError, Result};
use crate::session::OverlayStore;

pub const COLOR_CUSTOMIZATIONS: &str = "workbench.colorCustomizations";

/// Workspace-scoped editor settings file (`.vscode/settings.json`).
///
/// Only the `workbench.colorCustomizations` entry is touched; every other
/// top-level setting is written back as it was read. The file is read as
/// JSON5 so comments and trailing commas are accepted, but they are not
/// kept when the file is written back.
#[derive(Debug, Clone)]
pub struct JsonSettingsStore {
    path: PathBuf,
}

impl JsonSettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<serde_json::Map<String, Value>> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Ok(serde_json::Map::new());
            }
            Err(err) => return Err(err.into()),
        };
        if contents.trim().is_empty() {
            return Ok(serde_json::Map::new());
        }

        match json5::from_str(&contents) {
            Ok(Value::Object(settings)) => Ok(settings),
            Ok(_) => Err(self.settings_error("top-level value is not an object")),
            Err(err) => Err(self.settings_error(err.to_string())),
        }
    }

    fn settings_error(&self, message: impl Into<String>) -> GitTabsError {
        GitTabsError::Settings {
            path: self.path.clone(),
            message: message.into(),
        }
    }
}

impl OverlayStore for JsonSettingsStore {
    async fn read(&self) -> Result<ColorCustomization> {
        let mut settings = self.load().await?;
        match settings.remove(COLOR_CUSTOMIZATIONS) {
            Some(Value::Object(overlay)) => Ok(overlay),
            _ => Ok(ColorCustomization::new()),
        }
    }

    async fn write(&self, overlay: Option<ColorCustomization>) -> Result<()> {
        let mut settings = self.load().await?;
        match overlay {
            Some(overlay) => {
                settings.insert(COLOR_CUSTOMIZATIONS.to_string(), Value::Object(overlay));
            }
            None => {
                if settings.shift_remove(COLOR_CUSTOMIZATIONS).is_none() && !self.path.exists() {
                    return Ok(());
                }
            }
        }

        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let mut contents = serde_json::to_string_pretty(&Value::Object(settings))
            .map_err(|err| self.settings_error(err.to_string()))?;
        contents.push('\n');
        tokio::fs::write(&self.path, contents).await?;
        log::debug!("updated {}", self.path.display());
        Ok(())
    }
}
