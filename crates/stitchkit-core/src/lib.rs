//! # StitchKit Core
//!
//! Core types and utilities for StitchKit.
//! Provides the pattern data model, the value-keyed `ObjectedMap`,
//! colors, unit conversions and the events the canvas emits.

pub mod color;
pub mod constants;
pub mod error;
pub mod events;
pub mod map;
pub mod pattern;
pub mod units;

pub use color::Color;

pub use error::{ColorError, CoreError, PatternError, Result};

pub use events::{AddStitchData, AddStitchStage, CanvasEvent, Point, RemoveStitchData};

pub use map::ObjectedMap;

pub use pattern::{
    AddedPaletteItemData, Bead, CompletePaletteItem, CurvedStitch, DisplayMode, DisplaySettings,
    Fabric, Formats, FullStitch, FullStitchKind, Grid, GridLineStyle, LineStitch, LineStitchKind,
    NodeStitch, NodeStitchKind, PaletteItem, PartStitch, PartStitchDirection, PartStitchKind,
    Pattern, PatternInfo, PatternProject, SpecialStitch, SpecialStitchModel, Stitch, StitchKind,
    Symbols,
};
