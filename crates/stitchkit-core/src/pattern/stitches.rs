//! Stitch value records.
//!
//! Stitches carry no identity: two stitches are the same entity iff every
//! field compares equal. `Hash` is implemented by hand so that coordinates
//! hash by bit pattern with `-0.0` folded onto `0.0`, keeping it consistent
//! with the derived `PartialEq`. Coordinates are never NaN, which is what
//! makes the `Eq` impls sound; payloads are checked with
//! [`Stitch::validate_coords`] on load.

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::error::PatternError;

/// A coordinate on the stitch grid. One unit is one fabric cell.
pub type Coord = f32;

fn hash_coord<H: Hasher>(value: Coord, state: &mut H) {
    let value = if value == 0.0 { 0.0 } else { value };
    value.to_bits().hash(state);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FullStitchKind {
    Full,
    Petite,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PartStitchKind {
    Half,
    Quarter,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PartStitchDirection {
    Forward,
    Backward,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LineStitchKind {
    Back,
    Straight,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum NodeStitchKind {
    FrenchKnot,
    Bead,
}

/// Every stitch kind that can carry a symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StitchKind {
    Full,
    Petite,
    Half,
    Quarter,
    FrenchKnot,
    Bead,
}

impl From<FullStitchKind> for StitchKind {
    fn from(kind: FullStitchKind) -> Self {
        match kind {
            FullStitchKind::Full => StitchKind::Full,
            FullStitchKind::Petite => StitchKind::Petite,
        }
    }
}

impl From<PartStitchKind> for StitchKind {
    fn from(kind: PartStitchKind) -> Self {
        match kind {
            PartStitchKind::Half => StitchKind::Half,
            PartStitchKind::Quarter => StitchKind::Quarter,
        }
    }
}

impl From<NodeStitchKind> for StitchKind {
    fn from(kind: NodeStitchKind) -> Self {
        match kind {
            NodeStitchKind::FrenchKnot => StitchKind::FrenchKnot,
            NodeStitchKind::Bead => StitchKind::Bead,
        }
    }
}

impl fmt::Display for FullStitchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FullStitchKind::Full => write!(f, "full"),
            FullStitchKind::Petite => write!(f, "petite"),
        }
    }
}

impl fmt::Display for PartStitchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PartStitchKind::Half => write!(f, "half"),
            PartStitchKind::Quarter => write!(f, "quarter"),
        }
    }
}

impl fmt::Display for LineStitchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LineStitchKind::Back => write!(f, "backstitch"),
            LineStitchKind::Straight => write!(f, "straightstitch"),
        }
    }
}

impl fmt::Display for NodeStitchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeStitchKind::FrenchKnot => write!(f, "knot"),
            NodeStitchKind::Bead => write!(f, "bead"),
        }
    }
}

/// A full or petite cross occupying one cell or one quarter of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FullStitch {
    pub x: Coord,
    pub y: Coord,
    pub palindex: u32,
    pub kind: FullStitchKind,
}

impl Eq for FullStitch {}

impl Hash for FullStitch {
    fn hash<H: Hasher>(&self, state: &mut H) {
        hash_coord(self.x, state);
        hash_coord(self.y, state);
        self.palindex.hash(state);
        self.kind.hash(state);
    }
}

/// A half or quarter stitch, a single diagonal leg.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PartStitch {
    pub x: Coord,
    pub y: Coord,
    pub palindex: u32,
    pub kind: PartStitchKind,
    pub direction: PartStitchDirection,
}

impl Eq for PartStitch {}

impl Hash for PartStitch {
    fn hash<H: Hasher>(&self, state: &mut H) {
        hash_coord(self.x, state);
        hash_coord(self.y, state);
        self.palindex.hash(state);
        self.kind.hash(state);
        self.direction.hash(state);
    }
}

/// A back or straight stitch between two grid points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineStitch {
    /// Start and end X.
    pub x: [Coord; 2],
    /// Start and end Y.
    pub y: [Coord; 2],
    pub palindex: u32,
    pub kind: LineStitchKind,
}

impl LineStitch {
    pub fn start(&self) -> (Coord, Coord) {
        (self.x[0], self.y[0])
    }

    pub fn end(&self) -> (Coord, Coord) {
        (self.x[1], self.y[1])
    }

    pub fn length(&self) -> f32 {
        (self.x[1] - self.x[0]).hypot(self.y[1] - self.y[0])
    }
}

impl Eq for LineStitch {}

impl Hash for LineStitch {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.x.iter().chain(&self.y).for_each(|c| hash_coord(*c, state));
        self.palindex.hash(state);
        self.kind.hash(state);
    }
}

/// A french knot or a bead placed on a grid point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NodeStitch {
    pub x: Coord,
    pub y: Coord,
    pub palindex: u32,
    pub kind: NodeStitchKind,
    /// Beads lie horizontally when rotated.
    #[serde(default)]
    pub rotated: bool,
}

impl Eq for NodeStitch {}

impl Hash for NodeStitch {
    fn hash<H: Hasher>(&self, state: &mut H) {
        hash_coord(self.x, state);
        hash_coord(self.y, state);
        self.palindex.hash(state);
        self.kind.hash(state);
        self.rotated.hash(state);
    }
}

/// A placed instance of a [`SpecialStitchModel`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpecialStitch {
    pub x: Coord,
    pub y: Coord,
    /// Rotation in degrees, 0..=360.
    #[serde(default)]
    pub rotation: u16,
    /// Mirror along X and Y.
    #[serde(default)]
    pub flip: [bool; 2],
    pub palindex: u32,
    pub modindex: u32,
}

/// A polyline inside a special stitch model.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CurvedStitch {
    pub points: Vec<[Coord; 2]>,
}

/// A named composite of lines, curves and nodes placed as one unit.
///
/// Model geometry is expressed relative to the instance origin.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SpecialStitchModel {
    pub unique_name: String,
    pub name: String,
    pub width: f32,
    pub height: f32,
    pub nodestitches: Vec<NodeStitch>,
    pub linestitches: Vec<LineStitch>,
    pub curvedstitches: Vec<CurvedStitch>,
}

/// Any stitch the view can add or remove individually.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stitch {
    Full(FullStitch),
    Part(PartStitch),
    Line(LineStitch),
    Node(NodeStitch),
}

impl Stitch {
    pub fn palindex(&self) -> u32 {
        match self {
            Stitch::Full(s) => s.palindex,
            Stitch::Part(s) => s.palindex,
            Stitch::Line(s) => s.palindex,
            Stitch::Node(s) => s.palindex,
        }
    }

    /// Every grid point the stitch touches.
    pub fn points(&self) -> impl Iterator<Item = (Coord, Coord)> {
        let (first, second) = match self {
            Stitch::Full(s) => ((s.x, s.y), None),
            Stitch::Part(s) => ((s.x, s.y), None),
            Stitch::Line(s) => (s.start(), Some(s.end())),
            Stitch::Node(s) => ((s.x, s.y), None),
        };
        std::iter::once(first).chain(second)
    }

    /// Fails when any coordinate is NaN.
    pub fn validate_coords(&self) -> Result<(), PatternError> {
        if self.points().any(|(x, y)| x.is_nan() || y.is_nan()) {
            return Err(PatternError::NanCoordinate);
        }
        Ok(())
    }

    /// Fails when the stitch leaves the `width` x `height` fabric.
    pub fn validate_bounds(&self, width: u16, height: u16) -> Result<(), PatternError> {
        for (x, y) in self.points() {
            if x < 0.0 || y < 0.0 || x > f32::from(width) || y > f32::from(height) {
                return Err(PatternError::OutOfFabric {
                    x,
                    y,
                    width,
                    height,
                });
            }
        }
        Ok(())
    }
}

impl From<FullStitch> for Stitch {
    fn from(stitch: FullStitch) -> Self {
        Stitch::Full(stitch)
    }
}

impl From<PartStitch> for Stitch {
    fn from(stitch: PartStitch) -> Self {
        Stitch::Part(stitch)
    }
}

impl From<LineStitch> for Stitch {
    fn from(stitch: LineStitch) -> Self {
        Stitch::Line(stitch)
    }
}

impl From<NodeStitch> for Stitch {
    fn from(stitch: NodeStitch) -> Self {
        Stitch::Node(stitch)
    }
}
