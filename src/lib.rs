//! # StitchKit
//!
//! Cross-stitch pattern view and canvas rendering engine.
//!
//! ## Architecture
//!
//! StitchKit is organized as a workspace with multiple crates:
//!
//! 1. **stitchkit-core** - Pattern data model, value-keyed map, colors, canvas events
//! 2. **stitchkit-settings** - Canvas and render configuration, persistence
//! 3. **stitchkit-view** - Scene graph, texture and font caches, pattern view, rasterizer
//! 4. **stitchkit-canvas** - Viewport, placement gesture, interactive canvas
//! 5. **stitchkit** - Re-exports and the `stitchkit` preview binary

pub use stitchkit_canvas::{
    CanvasError, CanvasEventSink, CanvasResult, Gesture, GestureState, Modifiers, PatternCanvas,
    PointerInput, Transition, Viewport,
};
pub use stitchkit_core::{
    AddStitchData, AddStitchStage, CanvasEvent, Color, CoreError, DisplayMode, ObjectedMap,
    PatternProject, Point, RemoveStitchData, Stitch,
};
pub use stitchkit_settings::{CanvasSettings, Config, RenderSettings, SettingsPersistence};
pub use stitchkit_view::{
    save_png, FontManager, PatternView, RenderContext, RenderError, Renderer, StageKind,
    TextureManager,
};

pub use stitchkit_core as core;
pub use stitchkit_settings as settings;
pub use stitchkit_view as view;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Console output with pretty formatting
/// - RUST_LOG environment variable support
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_thread_ids(true)
        .with_thread_names(true)
        .with_line_number(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
