//! Events emitted by the canvas for the command layer.

use serde::{Deserialize, Serialize};

use crate::pattern::Stitch;

/// A point in world (stitch-grid) coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: &Point) -> f32 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

impl From<(f32, f32)> for Point {
    fn from((x, y): (f32, f32)) -> Self {
        Self { x, y }
    }
}

/// Phase of a stitch-placement gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AddStitchStage {
    Start,
    Continue,
    End,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AddStitchData {
    pub stage: AddStitchStage,
    /// Where the gesture began. Unchanged for the whole gesture.
    pub start: Point,
    pub end: Point,
    pub alt: bool,
    pub fixed: bool,
}

/// What a secondary click asks to remove.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum RemoveStitchData {
    /// A specific hit-tested stitch.
    Stitch(Stitch),
    /// Whatever lies under this point.
    Point(Point),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum CanvasEvent {
    AddStitch(AddStitchData),
    RemoveStitch(RemoveStitchData),
}

impl From<AddStitchData> for CanvasEvent {
    fn from(data: AddStitchData) -> Self {
        CanvasEvent::AddStitch(data)
    }
}

impl From<RemoveStitchData> for CanvasEvent {
    fn from(data: RemoveStitchData) -> Self {
        CanvasEvent::RemoveStitch(data)
    }
}
