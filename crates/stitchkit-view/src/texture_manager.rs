//! Texture cache for stitch shapes.
//!
//! Full, petite, half and quarter stitches are drawn as tinted copies of a
//! handful of small white shapes, and so are french knots and beads. The
//! manager synthesizes each shape on first request by rasterizing its vector
//! geometry and keeps it until it is invalidated:
//! - full/part textures are keyed by display mode and kind, and
//!   [`TextureManager::retain_mode`] drops those of every other mode
//! - the french knot texture is shared
//! - bead textures are keyed by bead geometry
//!
//! Textures live in a slotmap arena. Destroying a texture invalidates its id
//! (a later texture never reuses it), so stale handles are detectable.
//!
//! Geometry is in texture units; stitches draw textures at 1/100 scale, so
//! 100 units cover one fabric cell.

use std::collections::HashMap;

use slotmap::{new_key_type, SlotMap};
use stitchkit_core::units::mm_to_px;
use stitchkit_core::{Bead, Color, DisplayMode, FullStitchKind, NodeStitchKind, ObjectedMap, PartStitchKind};
use tiny_skia::{Pixmap, Transform};
use tracing::{debug, warn};

use crate::error::{RenderError, Result};
use crate::geometry;
use crate::renderer::draw_graphics;
use crate::scene::{Graphics, StrokeStyle};

new_key_type! {
    /// Handle to a texture owned by a [`TextureManager`].
    pub struct TextureId;
}

/// Outline width of every shape, in texture units.
const STROKE_WIDTH: f32 = 2.0;

const HALF_POLYGON: [f32; 12] = [99.0, 1.0, 99.0, 35.0, 35.0, 99.0, 1.0, 99.0, 1.0, 65.0, 65.0, 1.0];
const QUARTER_POLYGON: [f32; 12] = [49.0, 1.0, 49.0, 25.0, 25.0, 49.0, 1.0, 49.0, 1.0, 25.0, 25.0, 1.0];

/// A rasterized shape.
#[derive(Debug, Clone)]
pub struct Texture {
    pixmap: Pixmap,
    width: f32,
    height: f32,
}

impl Texture {
    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    /// Size in texture units.
    pub fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    /// Pixels per texture unit.
    pub fn resolution(&self) -> f32 {
        self.pixmap.width() as f32 / self.width
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TextureStats {
    /// Textures currently alive.
    pub live: usize,
    /// Textures synthesized since the manager was created.
    pub synthesized: usize,
}

#[derive(Debug)]
pub struct TextureManager {
    resolution: f32,
    textures: SlotMap<TextureId, Texture>,
    full: HashMap<(DisplayMode, FullStitchKind), TextureId>,
    part: HashMap<(DisplayMode, PartStitchKind), TextureId>,
    knot: Option<TextureId>,
    beads: ObjectedMap<Bead, TextureId>,
    synthesized: usize,
}

impl Default for TextureManager {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl TextureManager {
    /// Creates an empty manager rasterizing at `resolution` pixels per unit.
    pub fn new(resolution: f32) -> Self {
        Self {
            resolution,
            textures: SlotMap::with_key(),
            full: HashMap::new(),
            part: HashMap::new(),
            knot: None,
            beads: ObjectedMap::new(),
            synthesized: 0,
        }
    }

    pub fn resolution(&self) -> f32 {
        self.resolution
    }

    pub fn get(&self, id: TextureId) -> Option<&Texture> {
        self.textures.get(id)
    }

    pub fn is_alive(&self, id: TextureId) -> bool {
        self.textures.contains_key(id)
    }

    pub fn stats(&self) -> TextureStats {
        TextureStats {
            live: self.textures.len(),
            synthesized: self.synthesized,
        }
    }

    /// Texture for a full or petite stitch in `mode`.
    pub fn full_stitch_texture(&mut self, mode: DisplayMode, kind: FullStitchKind) -> Result<TextureId> {
        if let Some(&id) = self.full.get(&(mode, kind)) {
            return Ok(id);
        }
        let (graphics, size) = full_stitch_shape(mode, kind);
        let id = self.synthesize(&graphics, size, &format!("{mode} {kind} stitch"))?;
        self.full.insert((mode, kind), id);
        Ok(id)
    }

    /// Texture for a half or quarter stitch in `mode`.
    pub fn part_stitch_texture(&mut self, mode: DisplayMode, kind: PartStitchKind) -> Result<TextureId> {
        if let Some(&id) = self.part.get(&(mode, kind)) {
            return Ok(id);
        }
        let (graphics, size) = part_stitch_shape(mode, kind);
        let id = self.synthesize(&graphics, size, &format!("{mode} {kind} stitch"))?;
        self.part.insert((mode, kind), id);
        Ok(id)
    }

    /// Texture for a french knot, or for a bead of the given geometry
    /// (the default bead when `bead` is `None`).
    pub fn node_texture(&mut self, kind: NodeStitchKind, bead: Option<&Bead>) -> Result<TextureId> {
        match kind {
            NodeStitchKind::FrenchKnot => {
                if let Some(id) = self.knot {
                    return Ok(id);
                }
                let (graphics, size) = french_knot_shape();
                let id = self.synthesize(&graphics, size, "french knot")?;
                self.knot = Some(id);
                Ok(id)
            }
            NodeStitchKind::Bead => {
                let bead = bead.copied().unwrap_or_default();
                if let Some(&id) = self.beads.get(&bead) {
                    return Ok(id);
                }
                let (graphics, size) = bead_shape(&bead);
                let id = self.synthesize(
                    &graphics,
                    size,
                    &format!("bead {}x{}mm", bead.length, bead.diameter),
                )?;
                self.beads.insert(bead, id);
                Ok(id)
            }
        }
    }

    /// Destroys the full and part stitch textures of every mode but `mode`.
    /// Knot and bead textures are kept.
    pub fn retain_mode(&mut self, mode: DisplayMode) {
        let mut stale = Vec::new();
        self.full.retain(|(m, _), id| {
            let keep = *m == mode;
            if !keep {
                stale.push(*id);
            }
            keep
        });
        self.part.retain(|(m, _), id| {
            let keep = *m == mode;
            if !keep {
                stale.push(*id);
            }
            keep
        });

        for id in &stale {
            self.textures.remove(*id);
        }
        debug!("Destroyed {} stitch textures outside {} mode", stale.len(), mode);
    }

    /// Destroys every texture.
    pub fn clear(&mut self) {
        let count = self.textures.len();
        self.textures.clear();
        self.full.clear();
        self.part.clear();
        self.knot = None;
        self.beads.clear();
        debug!("Destroyed {} textures", count);
    }

    fn synthesize(&mut self, graphics: &Graphics, size: (f32, f32), what: &str) -> Result<TextureId> {
        let width = (size.0 * self.resolution).ceil();
        let height = (size.1 * self.resolution).ceil();
        let (px_width, px_height) = (width.max(0.0) as u32, height.max(0.0) as u32);
        let mut pixmap = Pixmap::new(px_width, px_height).ok_or(RenderError::Allocation {
            width: px_width,
            height: px_height,
        })?;

        draw_graphics(
            &mut pixmap.as_mut(),
            graphics,
            Transform::from_scale(self.resolution, self.resolution),
        );

        self.synthesized += 1;
        debug!("Synthesized {} texture ({}x{} px)", what, px_width, px_height);
        Ok(self.textures.insert(Texture {
            pixmap,
            width: size.0,
            height: size.1,
        }))
    }
}

impl Drop for TextureManager {
    fn drop(&mut self) {
        if !self.textures.is_empty() {
            warn!(
                "TextureManager dropped with {} live textures; call clear() when tearing down a view",
                self.textures.len()
            );
        }
    }
}

fn outline() -> StrokeStyle {
    StrokeStyle::new(STROKE_WIDTH, Color::BLACK)
}

/// Thread strands drawn as a white stroke inside a black border.
fn strands(graphics: &mut Graphics, legs: &[((f32, f32), (f32, f32))], cell: f32) {
    graphics
        .stroke(
            geometry::segments(legs.iter().copied()),
            StrokeStyle::new(cell * 0.24, Color::BLACK).round(),
        )
        .stroke(
            geometry::segments(legs.iter().copied()),
            StrokeStyle::new(cell * 0.2, Color::WHITE).round(),
        );
}

fn full_stitch_shape(mode: DisplayMode, kind: FullStitchKind) -> (Graphics, (f32, f32)) {
    let mut graphics = Graphics::new();
    match kind {
        FullStitchKind::Full => {
            let legs = [((1.0, 1.0), (99.0, 99.0)), ((99.0, 1.0), (1.0, 99.0))];
            match mode {
                DisplayMode::Solid => {
                    graphics.fill(geometry::rect(0.0, 0.0, 100.0, 100.0), Color::WHITE);
                }
                DisplayMode::Stitches => {
                    graphics.stroke(geometry::rect(1.0, 1.0, 98.0, 98.0), outline());
                    strands(&mut graphics, &legs, 100.0);
                }
                DisplayMode::Mixed => {
                    graphics.fill(geometry::rect(0.0, 0.0, 100.0, 100.0), Color::WHITE);
                    strands(&mut graphics, &legs, 100.0);
                }
            }
            (graphics, (100.0, 100.0))
        }
        FullStitchKind::Petite => {
            let square = geometry::rect(1.0, 1.0, 48.0, 48.0);
            let legs = [((1.0, 1.0), (49.0, 49.0)), ((49.0, 1.0), (1.0, 49.0))];
            if mode != DisplayMode::Stitches {
                graphics.fill(square.clone(), Color::WHITE);
            }
            graphics.stroke(square, outline());
            if mode != DisplayMode::Solid {
                strands(&mut graphics, &legs, 50.0);
            }
            (graphics, (50.0, 50.0))
        }
    }
}

fn part_stitch_shape(mode: DisplayMode, kind: PartStitchKind) -> (Graphics, (f32, f32)) {
    let (shape, leg, size) = match kind {
        PartStitchKind::Half => (
            geometry::polygon(&HALF_POLYGON),
            ((99.0, 1.0), (1.0, 99.0)),
            100.0,
        ),
        PartStitchKind::Quarter => (
            geometry::polygon(&QUARTER_POLYGON),
            ((49.0, 1.0), (1.0, 49.0)),
            50.0,
        ),
    };

    let mut graphics = Graphics::new();
    if mode != DisplayMode::Stitches {
        graphics.fill(shape.clone(), Color::WHITE);
    }
    graphics.stroke(shape, outline());
    if mode != DisplayMode::Solid {
        strands(&mut graphics, &[leg], size);
    }
    (graphics, (size, size))
}

fn french_knot_shape() -> (Graphics, (f32, f32)) {
    let mut graphics = Graphics::new();
    let knot = geometry::circle(25.0, 25.0, 24.0);
    graphics.fill(knot.clone(), Color::WHITE).stroke(knot, outline());
    (graphics, (50.0, 50.0))
}

fn bead_shape(bead: &Bead) -> (Graphics, (f32, f32)) {
    let width = mm_to_px(bead.diameter) * 10.0;
    let height = mm_to_px(bead.length) * 10.0;
    let body = geometry::round_rect(1.0, 2.0, width - 2.0, height - 4.0, (width - 2.0) * 0.4);

    let mut graphics = Graphics::new();
    graphics.fill(body.clone(), Color::WHITE).stroke(body, outline());
    (graphics, (width, height))
}
