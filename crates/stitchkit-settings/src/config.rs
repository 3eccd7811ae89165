//! Configuration for StitchKit
//!
//! Provides configuration file handling and validation.
//! Supports JSON and TOML file formats, chosen by file extension.
//!
//! Configuration is organized into logical sections:
//! - Canvas settings (zoom limits, drag factor, hint appearance)
//! - Render settings (texture resolution, display mode, symbols)

use std::path::Path;

use serde::{Deserialize, Serialize};
use stitchkit_core::constants::{DEFAULT_SYMBOL_FONT, DRAG_FACTOR, HINT_ALPHA, MAX_ZOOM, MIN_ZOOM};
use stitchkit_core::{Color, DisplayMode};
use tracing::debug;

use crate::error::{ConfigError, ConfigResult, SettingsResult};

/// On-disk format of a configuration file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Toml,
}

impl ConfigFormat {
    /// Picks the format from the file extension.
    pub fn from_path(path: &Path) -> ConfigResult<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Self::Json),
            Some("toml") => Ok(Self::Toml),
            other => Err(ConfigError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )),
        }
    }
}

/// Canvas interaction settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasSettings {
    /// Lowest zoom level
    pub min_zoom: f32,
    /// Highest zoom level
    pub max_zoom: f32,
    /// Pointer-to-world factor while panning
    pub drag_factor: f32,
    /// Relative zoom change per wheel notch
    pub wheel_step: f32,
    /// Alpha of stitch hints
    pub hint_alpha: f32,
}

impl Default for CanvasSettings {
    fn default() -> Self {
        Self {
            min_zoom: MIN_ZOOM,
            max_zoom: MAX_ZOOM,
            drag_factor: DRAG_FACTOR,
            wheel_step: 0.1,
            hint_alpha: HINT_ALPHA,
        }
    }
}

/// Rendering settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    /// Texture pixels per texture unit
    pub resolution: f32,
    /// Display mode used when a pattern does not specify one
    pub display_mode: DisplayMode,
    /// Whether symbols are drawn over stitches
    pub show_symbols: bool,
    /// Symbol font family used when a palette item names none
    pub default_symbol_font: String,
    /// Color behind the fabric
    pub background: Color,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            resolution: 1.0,
            display_mode: DisplayMode::Solid,
            show_symbols: false,
            default_symbol_font: DEFAULT_SYMBOL_FONT.to_string(),
            background: Color::rgb(0xF0, 0xF0, 0xF0),
        }
    }
}

/// Complete configuration
///
/// Aggregates all settings sections and provides file I/O operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Canvas interaction settings
    pub canvas: CanvasSettings,
    /// Rendering settings
    pub render: RenderSettings,
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = ConfigFormat::from_path(path)?;
        let content = std::fs::read_to_string(path)?;
        let config = Self::parse(&content, format)?;
        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Parse and validate config text
    pub fn parse(content: &str, format: ConfigFormat) -> SettingsResult<Self> {
        let config: Self = match format {
            ConfigFormat::Json => serde_json::from_str(content)?,
            ConfigFormat::Toml => toml::from_str(content)?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match ConfigFormat::from_path(path)? {
            ConfigFormat::Json => serde_json::to_string_pretty(self)?,
            ConfigFormat::Toml => toml::to_string_pretty(self)?,
        };

        std::fs::write(path, content)?;
        debug!("Saved config to {}", path.display());
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> ConfigResult<()> {
        let canvas = &self.canvas;
        positive("canvas.min_zoom", canvas.min_zoom)?;
        positive("canvas.max_zoom", canvas.max_zoom)?;
        if canvas.min_zoom >= canvas.max_zoom {
            return Err(ConfigError::Inconsistent(format!(
                "canvas.min_zoom ({}) must be below canvas.max_zoom ({})",
                canvas.min_zoom, canvas.max_zoom
            )));
        }

        positive("canvas.drag_factor", canvas.drag_factor)?;
        positive("canvas.wheel_step", canvas.wheel_step)?;
        if !(0.0..=1.0).contains(&canvas.hint_alpha) {
            return Err(out_of_range("canvas.hint_alpha", canvas.hint_alpha));
        }

        positive("render.resolution", self.render.resolution)?;
        Ok(())
    }
}

fn positive(key: &str, value: f32) -> ConfigResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(out_of_range(key, value))
    }
}

fn out_of_range(key: &str, value: f32) -> ConfigError {
    ConfigError::ValueOutOfRange {
        key: key.to_string(),
        value: value.to_string(),
    }
}
