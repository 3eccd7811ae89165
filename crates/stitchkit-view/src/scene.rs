//! Retained scene graph.
//!
//! A small set of display primitives the pattern view is built from:
//! - [`Graphics`]: vector draw commands (fabric, grid, lines, special stitches)
//! - [`Sprite`]: a textured quad with pivot, rotation and tint (nodes, hints)
//! - [`Particle`] in a [`ParticleContainer`]: lightweight quads that share
//!   one texture (full and part stitches)
//! - [`Glyph`]: a single symbol character
//!
//! Nodes live in slotmap arenas so that the view can hold stable handles to
//! them and remove them in O(1).

use lyon::path::Path;
use slotmap::{new_key_type, SlotMap};
use stitchkit_core::{Color, Point, Stitch};
use tiny_skia::{LineCap, LineJoin, Transform};

use crate::geometry;
use crate::texture_manager::TextureId;

new_key_type! {
    /// Handle to a node inside a [`Container`].
    pub struct NodeId;
    /// Handle to a particle inside a [`ParticleContainer`].
    pub struct ParticleId;
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeStyle {
    pub width: f32,
    pub color: Color,
    pub cap: LineCap,
    pub join: LineJoin,
}

impl StrokeStyle {
    pub fn new(width: f32, color: Color) -> Self {
        Self {
            width,
            color,
            cap: LineCap::Butt,
            join: LineJoin::Miter,
        }
    }

    pub fn round(mut self) -> Self {
        self.cap = LineCap::Round;
        self.join = LineJoin::Round;
        self
    }
}

#[derive(Debug, Clone)]
pub enum DrawCommand {
    Fill { path: Path, color: Color },
    Stroke { path: Path, style: StrokeStyle },
}

/// Vector graphics node.
#[derive(Debug, Clone)]
pub struct Graphics {
    commands: Vec<DrawCommand>,
    /// Local-to-parent transform.
    pub transform: Transform,
    /// Multiplied into every command color.
    pub tint: Color,
    pub alpha: f32,
    /// The stitch a hit on this node resolves to.
    pub target: Option<Stitch>,
}

impl Default for Graphics {
    fn default() -> Self {
        Self::new()
    }
}

impl Graphics {
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
            transform: Transform::identity(),
            tint: Color::WHITE,
            alpha: 1.0,
            target: None,
        }
    }

    pub fn with_target(target: Stitch) -> Self {
        Self {
            target: Some(target),
            ..Self::new()
        }
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn fill(&mut self, path: Path, color: Color) -> &mut Self {
        self.commands.push(DrawCommand::Fill { path, color });
        self
    }

    pub fn stroke(&mut self, path: Path, style: StrokeStyle) -> &mut Self {
        self.commands.push(DrawCommand::Stroke { path, style });
        self
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Whether the world point `p` lies on any stroke or inside any fill's
    /// bounding box.
    pub fn contains(&self, p: Point) -> bool {
        let Some(inverse) = self.transform.invert() else {
            return false;
        };
        let local = geometry::apply(&inverse, p);

        self.commands.iter().any(|command| match command {
            DrawCommand::Fill { path, .. } => geometry::bounds(path).is_some_and(|(min, max)| {
                local.x >= min.x && local.x <= max.x && local.y >= min.y && local.y <= max.y
            }),
            DrawCommand::Stroke { path, style } => geometry::path_segments(path)
                .any(|(a, b)| geometry::distance_to_segment(local, a, b) <= style.width / 2.0),
        })
    }
}

/// Textured quad.
#[derive(Debug, Clone)]
pub struct Sprite {
    pub texture: TextureId,
    /// Texture size in texture units.
    pub size: (f32, f32),
    pub position: Point,
    /// Point of the texture (in texture units) placed at `position`.
    pub pivot: Point,
    pub scale: (f32, f32),
    /// Rotation in degrees, clockwise.
    pub angle: f32,
    pub tint: Color,
    pub alpha: f32,
    pub target: Option<Stitch>,
}

impl Sprite {
    pub fn new(texture: TextureId, size: (f32, f32)) -> Self {
        Self {
            texture,
            size,
            position: Point::default(),
            pivot: Point::default(),
            scale: (1.0, 1.0),
            angle: 0.0,
            tint: Color::WHITE,
            alpha: 1.0,
            target: None,
        }
    }

    /// Texture-unit to parent transform.
    pub fn transform(&self) -> Transform {
        Transform::from_translate(self.position.x, self.position.y)
            .pre_concat(Transform::from_rotate(self.angle))
            .pre_scale(self.scale.0, self.scale.1)
            .pre_translate(-self.pivot.x, -self.pivot.y)
    }

    pub fn contains(&self, p: Point) -> bool {
        let Some(inverse) = self.transform().invert() else {
            return false;
        };
        let local = geometry::apply(&inverse, p);
        (0.0..=self.size.0).contains(&local.x) && (0.0..=self.size.1).contains(&local.y)
    }
}

/// A batched quad drawn with its container's texture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub scale_x: f32,
    pub scale_y: f32,
    /// Fraction of the texture width placed at `x`.
    pub anchor_x: f32,
    /// Fraction of the texture height placed at `y`.
    pub anchor_y: f32,
    pub tint: Color,
}

impl Particle {
    pub fn new(x: f32, y: f32, scale: f32, tint: Color) -> Self {
        Self {
            x,
            y,
            scale_x: scale,
            scale_y: scale,
            anchor_x: 0.0,
            anchor_y: 0.0,
            tint,
        }
    }

    /// Texture-unit to parent transform for a texture of `size` units.
    pub fn transform(&self, size: (f32, f32)) -> Transform {
        Transform::from_translate(self.x, self.y)
            .pre_scale(self.scale_x, self.scale_y)
            .pre_translate(-self.anchor_x * size.0, -self.anchor_y * size.1)
    }
}

/// Particles sharing one texture. Particles are not hit-testable.
#[derive(Debug, Default)]
pub struct ParticleContainer {
    texture: Option<TextureId>,
    particles: SlotMap<ParticleId, Particle>,
}

impl ParticleContainer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn texture(&self) -> Option<TextureId> {
        self.texture
    }

    pub fn set_texture(&mut self, texture: TextureId) {
        self.texture = Some(texture);
    }

    pub fn add_particle(&mut self, particle: Particle) -> ParticleId {
        self.particles.insert(particle)
    }

    pub fn remove_particle(&mut self, id: ParticleId) -> Option<Particle> {
        self.particles.remove(id)
    }

    pub fn get(&self, id: ParticleId) -> Option<&Particle> {
        self.particles.get(id)
    }

    pub fn particles(&self) -> impl Iterator<Item = &Particle> + '_ {
        self.particles.values()
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Removes every particle. The texture is kept.
    pub fn clear(&mut self) {
        self.particles.clear();
    }
}

/// A symbol character centered on a point.
#[derive(Debug, Clone, PartialEq)]
pub struct Glyph {
    pub ch: char,
    pub family: String,
    pub bold: bool,
    pub italic: bool,
    pub center: Point,
    /// Em size in world units.
    pub size: f32,
    pub color: Color,
}

#[derive(Debug, Clone)]
pub enum Node {
    Graphics(Graphics),
    Sprite(Sprite),
    Glyph(Glyph),
}

impl Node {
    pub fn target(&self) -> Option<Stitch> {
        match self {
            Node::Graphics(g) => g.target,
            Node::Sprite(s) => s.target,
            Node::Glyph(_) => None,
        }
    }

    pub fn contains(&self, p: Point) -> bool {
        match self {
            Node::Graphics(g) => g.contains(p),
            Node::Sprite(s) => s.contains(p),
            Node::Glyph(_) => false,
        }
    }
}

impl From<Graphics> for Node {
    fn from(graphics: Graphics) -> Self {
        Node::Graphics(graphics)
    }
}

impl From<Sprite> for Node {
    fn from(sprite: Sprite) -> Self {
        Node::Sprite(sprite)
    }
}

impl From<Glyph> for Node {
    fn from(glyph: Glyph) -> Self {
        Node::Glyph(glyph)
    }
}

/// Ordered collection of nodes. Later nodes draw on top.
#[derive(Debug, Default)]
pub struct Container {
    nodes: SlotMap<NodeId, (u64, Node)>,
    next_seq: u64,
}

impl Container {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_child(&mut self, node: impl Into<Node>) -> NodeId {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.nodes.insert((seq, node.into()))
    }

    pub fn remove_child(&mut self, id: NodeId) -> Option<Node> {
        self.nodes.remove(id).map(|(_, node)| node)
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id).map(|(_, node)| node)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
    }

    /// Children bottom to top.
    pub fn children(&self) -> Vec<&Node> {
        let mut ordered: Vec<_> = self.nodes.values().collect();
        ordered.sort_unstable_by_key(|(seq, _)| *seq);
        ordered.into_iter().map(|(_, node)| node).collect()
    }

    /// Target of the topmost hit-testable child under `p`.
    pub fn hit_test(&self, p: Point) -> Option<Stitch> {
        self.children()
            .into_iter()
            .rev()
            .filter(|node| node.target().is_some())
            .find(|node| node.contains(p))
            .and_then(Node::target)
    }
}

/// The render stages of a pattern view, bottom to top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StageKind {
    Fabric,
    FullStitches,
    Petites,
    HalfStitches,
    Quarters,
    Symbols,
    Grid,
    SpecialStitches,
    Lines,
    Nodes,
}

impl StageKind {
    pub const ORDER: [StageKind; 10] = [
        StageKind::Fabric,
        StageKind::FullStitches,
        StageKind::Petites,
        StageKind::HalfStitches,
        StageKind::Quarters,
        StageKind::Symbols,
        StageKind::Grid,
        StageKind::SpecialStitches,
        StageKind::Lines,
        StageKind::Nodes,
    ];
}

/// Borrowed view of one stage.
#[derive(Debug, Clone, Copy)]
pub enum StageRef<'a> {
    Graphics(&'a Graphics),
    Particles(&'a ParticleContainer),
    Container(&'a Container),
}
