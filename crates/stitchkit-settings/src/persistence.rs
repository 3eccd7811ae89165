//! Settings Persistence
//!
//! Locates the platform configuration directory and loads or saves the
//! configuration file inside it.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{SettingsError, SettingsResult};

const APP_DIR: &str = "stitchkit";
const CONFIG_FILE: &str = "config.toml";

/// Settings persistence layer
#[derive(Debug, Clone)]
pub struct SettingsPersistence {
    path: PathBuf,
    config: Config,
}

impl SettingsPersistence {
    /// Create a persistence layer backed by `path`, starting from defaults
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            config: Config::default(),
        }
    }

    /// Default configuration directory, e.g. `~/.config/stitchkit`
    pub fn config_dir() -> SettingsResult<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or_else(|| {
                SettingsError::ConfigDirectory("no platform config directory".to_string())
            })
    }

    /// Default configuration file path
    pub fn default_path() -> SettingsResult<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE))
    }

    /// Create the configuration directory if missing
    pub fn ensure_config_dir() -> SettingsResult<PathBuf> {
        let dir = Self::config_dir()?;
        std::fs::create_dir_all(&dir)?;
        Ok(dir)
    }

    /// Load settings from `path`
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let config = Config::load_from_file(path)?;
        Ok(Self {
            path: path.to_path_buf(),
            config,
        })
    }

    /// Load settings from `path`, falling back to defaults when the file is
    /// missing or invalid.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            debug!("No config at {}, using defaults", path.display());
            return Self::new(path);
        }

        match Self::load_from_file(path) {
            Ok(persistence) => persistence,
            Err(e) => {
                warn!("Ignoring config at {}: {}", path.display(), e);
                Self::new(path)
            }
        }
    }

    /// Save settings to the backing file, creating parent directories
    pub fn save(&self) -> SettingsResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        self.config.save_to_file(&self.path)
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get reference to config
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get mutable reference to config
    pub fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }
}
