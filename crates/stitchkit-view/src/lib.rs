//! # StitchKit View
//!
//! Render-side model of an opened pattern.
//!
//! Provides the retained scene graph, the texture cache for stitch shapes,
//! the [`PatternView`] that keeps stitches and scene nodes in sync, symbol
//! font lookup and a tiny-skia rasterizer for headless previews.

pub mod context;
pub mod error;
pub mod font_manager;
pub mod geometry;
pub mod pattern_view;
pub mod renderer;
pub mod scene;
pub mod texture_manager;

pub use context::RenderContext;
pub use error::{RenderError, Result};
pub use font_manager::FontManager;
pub use pattern_view::{line_stitch_graphics, node_stitch_sprite, PatternView};
pub use renderer::{save_png, Renderer};
pub use scene::{
    Container, DrawCommand, Glyph, Graphics, Node, NodeId, Particle, ParticleContainer, Sprite,
    StageKind, StageRef, StrokeStyle,
};
pub use texture_manager::{Texture, TextureId, TextureManager, TextureStats};
