//! Pattern data model: stitches, palette and the decoded project payload.

pub mod palette;
pub mod project;
pub mod stitches;

pub use palette::{
    blend_title, palette_item_title, AddedPaletteItemData, Bead, Blend, CompletePaletteItem,
    FontFormat, Formats, LineStitchFormat, LineStitchStyle, NodeStitchFormat,
    PaletteDisplayOptions, PaletteItem, Symbol, SymbolFormat, Symbols,
};
pub use project::{
    DisplayMode, DisplaySettings, Fabric, Grid, GridLineStyle, Pattern, PatternInfo,
    PatternProject,
};
pub use stitches::{
    Coord, CurvedStitch, FullStitch, FullStitchKind, LineStitch, LineStitchKind, NodeStitch,
    NodeStitchKind, PartStitch, PartStitchDirection, PartStitchKind, SpecialStitch,
    SpecialStitchModel, Stitch, StitchKind,
};
