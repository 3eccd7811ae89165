//! Shared rendering constants.

/// Texture units per stitch-grid cell; stitch textures are drawn at 1/100.
pub const STITCH_SCALE_FACTOR: f32 = 1.0 / 100.0;

/// Border stroke width of line stitches, in cells.
pub const LINE_BORDER_WIDTH: f32 = 0.225;

/// Fill stroke width of line stitches, in cells.
pub const LINE_FILL_WIDTH: f32 = 0.2;

/// Alpha of hint previews.
pub const HINT_ALPHA: f32 = 0.5;

/// Lowest allowed zoom.
pub const MIN_ZOOM: f32 = 1.0;

/// Highest allowed zoom.
pub const MAX_ZOOM: f32 = 100.0;

/// Pointer-to-world factor while dragging the viewport.
pub const DRAG_FACTOR: f32 = 2.0;

/// Font family used for symbols when a palette item names none.
pub const DEFAULT_SYMBOL_FONT: &str = "Ursasoftware";
