//! Render context shared by the views and the canvas.

use stitchkit_settings::RenderSettings;

use crate::font_manager::FontManager;
use crate::texture_manager::TextureManager;

/// Owns the resources a view draws with: the texture cache and fonts.
///
/// Created once per canvas and passed by reference to every operation that
/// needs textures. Dropping it while textures are alive is reported.
#[derive(Debug)]
pub struct RenderContext {
    pub textures: TextureManager,
    pub fonts: FontManager,
    settings: RenderSettings,
}

impl RenderContext {
    pub fn new(settings: &RenderSettings) -> Self {
        Self {
            textures: TextureManager::new(settings.resolution),
            fonts: FontManager::new(),
            settings: settings.clone(),
        }
    }

    /// Context without system fonts, used by tests and headless tools.
    pub fn headless(settings: &RenderSettings) -> Self {
        Self {
            fonts: FontManager::without_system_fonts(),
            ..Self::new(settings)
        }
    }

    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }
}

impl Default for RenderContext {
    fn default() -> Self {
        Self::new(&RenderSettings::default())
    }
}
