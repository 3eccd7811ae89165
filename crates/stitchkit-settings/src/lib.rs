//! StitchKit Settings Crate
//!
//! Handles canvas and renderer configuration and its persistence.

pub mod config;
pub mod error;
pub mod persistence;

pub use config::{CanvasSettings, Config, ConfigFormat, RenderSettings};
pub use error::{ConfigError, ConfigResult, SettingsError, SettingsResult};
pub use persistence::SettingsPersistence;
