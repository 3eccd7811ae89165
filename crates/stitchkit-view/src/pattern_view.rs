//! Pattern view: the render-side mirror of an opened pattern.
//!
//! The view keeps every stitch in an [`ObjectedMap`] keyed by the stitch
//! value itself, mapping it to the scene node that draws it. Construction
//! only registers stitches; [`PatternView::attach`] realizes them onto the
//! render stages once a [`RenderContext`] is available. Afterwards stitches
//! can be added and removed one by one without rebuilding the scene.
//!
//! Full and part stitches are batched particles sharing one texture per
//! stage. Line and node stitches are individual nodes and can be hit-tested.

use smallvec::SmallVec;
use stitchkit_core::constants::{
    DEFAULT_SYMBOL_FONT, LINE_BORDER_WIDTH, LINE_FILL_WIDTH, STITCH_SCALE_FACTOR,
};
use stitchkit_core::{
    AddedPaletteItemData, Bead, Color, CompletePaletteItem, DisplayMode, Fabric, FullStitch,
    FullStitchKind, Grid, LineStitch, NodeStitch, NodeStitchKind, ObjectedMap, PartStitch,
    PartStitchDirection, PartStitchKind, PatternInfo, PatternProject, Point, SpecialStitch,
    SpecialStitchModel, Stitch, StitchKind,
};
use tiny_skia::Transform;
use tracing::{debug, info};

use crate::context::RenderContext;
use crate::error::{RenderError, Result};
use crate::geometry;
use crate::scene::{
    Container, Glyph, Graphics, NodeId, Particle, ParticleContainer, ParticleId, Sprite,
    StageKind, StageRef, StrokeStyle,
};
use crate::texture_manager::TextureId;

/// Outline width of special stitch nodes, in cells.
const SPECIAL_NODE_OUTLINE: f32 = 0.05;

/// Scene nodes realizing one full or part stitch.
#[derive(Debug, Clone)]
struct ParticleHandle {
    particle: ParticleId,
    symbols: SmallVec<[NodeId; 2]>,
}

#[derive(Debug, Default)]
struct Stages {
    fabric: Graphics,
    full: ParticleContainer,
    petites: ParticleContainer,
    halves: ParticleContainer,
    quarters: ParticleContainer,
    symbols: Container,
    grid: Graphics,
    special: Container,
    lines: Container,
    nodes: Container,
}

impl Stages {
    fn full_stage(&mut self, kind: FullStitchKind) -> &mut ParticleContainer {
        match kind {
            FullStitchKind::Full => &mut self.full,
            FullStitchKind::Petite => &mut self.petites,
        }
    }

    fn part_stage(&mut self, kind: PartStitchKind) -> &mut ParticleContainer {
        match kind {
            PartStitchKind::Half => &mut self.halves,
            PartStitchKind::Quarter => &mut self.quarters,
        }
    }

    /// Empties every stage that holds stitches.
    fn clear_stitches(&mut self) {
        self.full.clear();
        self.petites.clear();
        self.halves.clear();
        self.quarters.clear();
        self.symbols.clear();
        self.special.clear();
        self.lines.clear();
        self.nodes.clear();
    }
}

#[derive(Debug)]
pub struct PatternView {
    key: String,
    info: PatternInfo,
    palette: Vec<CompletePaletteItem>,
    fabric: Fabric,
    grid: Grid,
    /// `None` until attached when the pattern does not choose a mode.
    display_mode: Option<DisplayMode>,
    show_symbols: bool,
    default_symbol_font: Option<String>,

    fullstitches: ObjectedMap<FullStitch, Option<ParticleHandle>>,
    partstitches: ObjectedMap<PartStitch, Option<ParticleHandle>>,
    linestitches: ObjectedMap<LineStitch, Option<NodeId>>,
    nodestitches: ObjectedMap<NodeStitch, Option<NodeId>>,
    specialstitches: Vec<(SpecialStitch, Option<NodeId>)>,
    special_stitch_models: Vec<SpecialStitchModel>,

    stages: Stages,
    attached: bool,
}

impl PatternView {
    /// Builds a detached view of `project`. Nothing is drawn until
    /// [`attach`](Self::attach) is called.
    pub fn new(project: PatternProject) -> Self {
        let palette = project.complete_palette();
        let PatternProject {
            key,
            pattern,
            display_settings,
        } = project;

        Self {
            key,
            info: pattern.info,
            palette,
            fabric: pattern.fabric,
            grid: display_settings.grid,
            display_mode: display_settings.display_mode,
            show_symbols: display_settings.show_symbols,
            default_symbol_font: display_settings.default_symbol_font,
            fullstitches: ObjectedMap::with_keys(pattern.fullstitches),
            partstitches: ObjectedMap::with_keys(pattern.partstitches),
            linestitches: ObjectedMap::with_keys(pattern.linestitches),
            nodestitches: ObjectedMap::with_keys(pattern.nodestitches),
            specialstitches: pattern
                .specialstitches
                .into_iter()
                .map(|special| (special, None))
                .collect(),
            special_stitch_models: pattern.special_stitch_models,
            stages: Stages::default(),
            attached: false,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn info(&self) -> &PatternInfo {
        &self.info
    }

    pub fn palette(&self) -> &[CompletePaletteItem] {
        &self.palette
    }

    pub fn fabric(&self) -> &Fabric {
        &self.fabric
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn display_mode(&self) -> DisplayMode {
        self.display_mode.unwrap_or_default()
    }

    /// Symbol font used for palette items that name none.
    pub fn default_symbol_font(&self) -> &str {
        self.default_symbol_font
            .as_deref()
            .unwrap_or(DEFAULT_SYMBOL_FONT)
    }

    pub fn show_symbols(&self) -> bool {
        self.show_symbols
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Realizes the view onto its stages. Display mode and symbol font fall
    /// back to the render settings when the pattern leaves them unset.
    ///
    /// On failure the view stays detached with empty stages.
    pub fn attach(&mut self, ctx: &mut RenderContext) -> Result<()> {
        let settings = ctx.settings();
        self.display_mode.get_or_insert(settings.display_mode);
        self.default_symbol_font
            .get_or_insert_with(|| settings.default_symbol_font.clone());

        match self.render(ctx) {
            Ok(()) => {
                self.attached = true;
                Ok(())
            }
            Err(e) => {
                self.reset_scene();
                Err(e)
            }
        }
    }

    /// Redraws fabric and grid and rebuilds every stitch node.
    pub fn render(&mut self, ctx: &mut RenderContext) -> Result<()> {
        self.draw_fabric();
        self.draw_grid();
        self.stages.clear_stitches();
        self.apply_stage_textures(ctx)?;

        let fulls: Vec<FullStitch> = self.fullstitches.keys().copied().collect();
        for stitch in fulls {
            let handle = self.realize_full(&stitch);
            self.fullstitches.insert(stitch, Some(handle));
        }

        let parts: Vec<PartStitch> = self.partstitches.keys().copied().collect();
        for stitch in parts {
            let handle = self.realize_part(&stitch);
            self.partstitches.insert(stitch, Some(handle));
        }

        let lines: Vec<LineStitch> = self.linestitches.keys().copied().collect();
        for stitch in lines {
            let node = self.realize_line(&stitch);
            self.linestitches.insert(stitch, Some(node));
        }

        let nodes: Vec<NodeStitch> = self.nodestitches.keys().copied().collect();
        for stitch in nodes {
            let node = self.realize_node(ctx, &stitch)?;
            self.nodestitches.insert(stitch, Some(node));
        }

        for idx in 0..self.specialstitches.len() {
            let special = self.specialstitches[idx].0;
            let node = self.realize_special(&special);
            self.specialstitches[idx].1 = Some(node);
        }

        info!(
            "Rendered pattern '{}' in {} mode ({} stitches)",
            self.info.title,
            self.display_mode(),
            self.stitch_count()
        );
        Ok(())
    }

    /// Replaces the fabric. Redraws fabric and grid when attached.
    pub fn set_fabric(&mut self, fabric: Fabric) {
        self.fabric = fabric;
        if self.attached {
            self.draw_fabric();
            self.draw_grid();
        }
    }

    /// Replaces the grid settings. Redraws the grid when attached.
    pub fn set_grid(&mut self, grid: Grid) {
        self.grid = grid;
        if self.attached {
            self.draw_grid();
        }
    }

    /// Switches the batched stages to the textures of `mode` and destroys the
    /// textures of the other modes.
    pub fn set_display_mode(&mut self, ctx: &mut RenderContext, mode: DisplayMode) -> Result<()> {
        self.display_mode = Some(mode);
        if self.attached {
            self.apply_stage_textures(ctx)?;
            ctx.textures.retain_mode(mode);
        }
        debug!("Display mode set to {}", mode);
        Ok(())
    }

    pub fn set_show_symbols(&mut self, show: bool) {
        self.show_symbols = show;
    }

    /// Inserts a palette item at `data.palindex`, clamped to the palette
    /// length. Existing stitches keep their color.
    pub fn add_palette_item(&mut self, data: AddedPaletteItemData) {
        let index = (data.palindex as usize).min(self.palette.len());
        let item = CompletePaletteItem::new(data.palitem, data.symbols, data.formats);
        debug!("Added palette item {} at {}", item.title(), index);
        self.palette.insert(index, item);
    }

    /// Removes the palette item at `index`. Existing stitches keep their
    /// color.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn remove_palette_item(&mut self, index: usize) -> CompletePaletteItem {
        assert!(
            index < self.palette.len(),
            "palette index {} is out of range (palette has {} items)",
            index,
            self.palette.len()
        );
        self.palette.remove(index)
    }

    pub fn add_stitch(&mut self, ctx: &mut RenderContext, stitch: Stitch) -> Result<()> {
        match stitch {
            Stitch::Full(s) => {
                self.add_full_stitch(s);
                Ok(())
            }
            Stitch::Part(s) => {
                self.add_part_stitch(s);
                Ok(())
            }
            Stitch::Line(s) => {
                self.add_line_stitch(s);
                Ok(())
            }
            Stitch::Node(s) => self.add_node_stitch(ctx, s),
        }
    }

    /// # Panics
    ///
    /// Panics if the stitch is not in the view.
    pub fn remove_stitch(&mut self, stitch: Stitch) {
        match stitch {
            Stitch::Full(s) => self.remove_full_stitch(&s),
            Stitch::Part(s) => self.remove_part_stitch(&s),
            Stitch::Line(s) => self.remove_line_stitch(&s),
            Stitch::Node(s) => self.remove_node_stitch(&s),
        }
    }

    pub fn add_full_stitch(&mut self, stitch: FullStitch) {
        if let Some(Some(old)) = self.fullstitches.remove(&stitch) {
            self.release_full(&stitch, old);
        }
        let handle = if self.attached {
            Some(self.realize_full(&stitch))
        } else {
            None
        };
        self.fullstitches.insert(stitch, handle);
    }

    pub fn remove_full_stitch(&mut self, stitch: &FullStitch) {
        match self.fullstitches.remove(stitch) {
            Some(handle) => {
                if let Some(handle) = handle {
                    self.release_full(stitch, handle);
                }
            }
            None => panic!("full stitch {stitch:?} is not in the pattern view"),
        }
    }

    pub fn add_part_stitch(&mut self, stitch: PartStitch) {
        if let Some(Some(old)) = self.partstitches.remove(&stitch) {
            self.release_part(&stitch, old);
        }
        let handle = if self.attached {
            Some(self.realize_part(&stitch))
        } else {
            None
        };
        self.partstitches.insert(stitch, handle);
    }

    pub fn remove_part_stitch(&mut self, stitch: &PartStitch) {
        match self.partstitches.remove(stitch) {
            Some(handle) => {
                if let Some(handle) = handle {
                    self.release_part(stitch, handle);
                }
            }
            None => panic!("part stitch {stitch:?} is not in the pattern view"),
        }
    }

    pub fn add_line_stitch(&mut self, stitch: LineStitch) {
        if let Some(Some(old)) = self.linestitches.remove(&stitch) {
            self.stages.lines.remove_child(old);
        }
        let node = if self.attached {
            Some(self.realize_line(&stitch))
        } else {
            None
        };
        self.linestitches.insert(stitch, node);
    }

    pub fn remove_line_stitch(&mut self, stitch: &LineStitch) {
        match self.linestitches.remove(stitch) {
            Some(node) => {
                if let Some(node) = node {
                    self.stages.lines.remove_child(node);
                }
            }
            None => panic!("line stitch {stitch:?} is not in the pattern view"),
        }
    }

    pub fn add_node_stitch(&mut self, ctx: &mut RenderContext, stitch: NodeStitch) -> Result<()> {
        if let Some(Some(old)) = self.nodestitches.remove(&stitch) {
            self.stages.nodes.remove_child(old);
        }
        let node = if self.attached {
            Some(self.realize_node(ctx, &stitch)?)
        } else {
            None
        };
        self.nodestitches.insert(stitch, node);
        Ok(())
    }

    pub fn remove_node_stitch(&mut self, stitch: &NodeStitch) {
        match self.nodestitches.remove(stitch) {
            Some(node) => {
                if let Some(node) = node {
                    self.stages.nodes.remove_child(node);
                }
            }
            None => panic!("node stitch {stitch:?} is not in the pattern view"),
        }
    }

    /// Places an instance of a special stitch model.
    ///
    /// # Panics
    ///
    /// Panics if the model index is out of range.
    pub fn add_special_stitch(&mut self, special: SpecialStitch) {
        assert!(
            (special.modindex as usize) < self.special_stitch_models.len(),
            "special stitch model {} is not in the pattern view",
            special.modindex
        );
        let node = if self.attached {
            Some(self.realize_special(&special))
        } else {
            None
        };
        self.specialstitches.push((special, node));
    }

    /// Topmost hit-testable stitch under `point`. Node stitches are above
    /// line stitches; batched stitches are never hit.
    pub fn hit_test(&self, point: Point) -> Option<Stitch> {
        self.stages
            .nodes
            .hit_test(point)
            .or_else(|| self.stages.lines.hit_test(point))
    }

    /// Tears the scene down and destroys every cached texture. The view can
    /// be attached again afterwards.
    pub fn destroy(&mut self, ctx: &mut RenderContext) {
        self.reset_scene();
        ctx.textures.clear();
        debug!("Destroyed pattern view '{}'", self.key);
    }

    fn reset_scene(&mut self) {
        self.stages = Stages::default();
        self.fullstitches.values_mut().for_each(|v| *v = None);
        self.partstitches.values_mut().for_each(|v| *v = None);
        self.linestitches.values_mut().for_each(|v| *v = None);
        self.nodestitches.values_mut().for_each(|v| *v = None);
        self.specialstitches.iter_mut().for_each(|(_, node)| *node = None);
        self.attached = false;
    }

    /// Render stages bottom to top. The symbol stage is listed only while
    /// symbols are shown.
    pub fn stages(&self) -> Vec<(StageKind, StageRef<'_>)> {
        StageKind::ORDER
            .iter()
            .filter(|kind| self.show_symbols || **kind != StageKind::Symbols)
            .map(|&kind| (kind, self.stage(kind)))
            .collect()
    }

    pub fn stage(&self, kind: StageKind) -> StageRef<'_> {
        let stages = &self.stages;
        match kind {
            StageKind::Fabric => StageRef::Graphics(&stages.fabric),
            StageKind::FullStitches => StageRef::Particles(&stages.full),
            StageKind::Petites => StageRef::Particles(&stages.petites),
            StageKind::HalfStitches => StageRef::Particles(&stages.halves),
            StageKind::Quarters => StageRef::Particles(&stages.quarters),
            StageKind::Symbols => StageRef::Container(&stages.symbols),
            StageKind::Grid => StageRef::Graphics(&stages.grid),
            StageKind::SpecialStitches => StageRef::Container(&stages.special),
            StageKind::Lines => StageRef::Container(&stages.lines),
            StageKind::Nodes => StageRef::Container(&stages.nodes),
        }
    }

    /// Number of stitches in the view, special stitches included.
    pub fn stitch_count(&self) -> usize {
        self.fullstitches.len()
            + self.partstitches.len()
            + self.linestitches.len()
            + self.nodestitches.len()
            + self.specialstitches.len()
    }

    pub fn contains_stitch(&self, stitch: &Stitch) -> bool {
        match stitch {
            Stitch::Full(s) => self.fullstitches.contains_key(s),
            Stitch::Part(s) => self.partstitches.contains_key(s),
            Stitch::Line(s) => self.linestitches.contains_key(s),
            Stitch::Node(s) => self.nodestitches.contains_key(s),
        }
    }

    /// Whether `stitch` currently has a scene node.
    pub fn is_realized(&self, stitch: &Stitch) -> bool {
        match stitch {
            Stitch::Full(s) => matches!(self.fullstitches.get(s), Some(Some(_))),
            Stitch::Part(s) => matches!(self.partstitches.get(s), Some(Some(_))),
            Stitch::Line(s) => matches!(self.linestitches.get(s), Some(Some(_))),
            Stitch::Node(s) => matches!(self.nodestitches.get(s), Some(Some(_))),
        }
    }

    fn palette_item(&self, palindex: u32) -> &CompletePaletteItem {
        self.palette.get(palindex as usize).unwrap_or_else(|| {
            panic!(
                "palette index {} is out of range (palette has {} items)",
                palindex,
                self.palette.len()
            )
        })
    }

    fn palette_color(&self, palindex: u32) -> Color {
        self.palette_item(palindex).color()
    }

    fn apply_stage_textures(&mut self, ctx: &mut RenderContext) -> Result<()> {
        let mode = self.display_mode();
        let textures = &mut ctx.textures;
        self.stages
            .full
            .set_texture(textures.full_stitch_texture(mode, FullStitchKind::Full)?);
        self.stages
            .petites
            .set_texture(textures.full_stitch_texture(mode, FullStitchKind::Petite)?);
        self.stages
            .halves
            .set_texture(textures.part_stitch_texture(mode, PartStitchKind::Half)?);
        self.stages
            .quarters
            .set_texture(textures.part_stitch_texture(mode, PartStitchKind::Quarter)?);
        Ok(())
    }

    fn draw_fabric(&mut self) {
        let Fabric {
            width,
            height,
            color,
            ..
        } = self.fabric;
        let fabric = &mut self.stages.fabric;
        fabric.clear();
        fabric.fill(
            geometry::rect(0.0, 0.0, f32::from(width), f32::from(height)),
            color,
        );
    }

    fn draw_grid(&mut self) {
        let (width, height) = (f32::from(self.fabric.width), f32::from(self.fabric.height));
        let grid = &mut self.stages.grid;
        grid.clear();

        let minor = (1..self.fabric.width)
            .map(|i| ((f32::from(i), 0.0), (f32::from(i), height)))
            .chain((1..self.fabric.height).map(|i| ((0.0, f32::from(i)), (width, f32::from(i)))));
        let style = &self.grid.minor_screen_lines;
        grid.stroke(
            geometry::segments(minor),
            StrokeStyle::new(style.thickness, style.color),
        );

        let interval = f32::from(self.grid.major_lines_interval);
        if interval == 0.0 {
            debug!("Major grid lines disabled");
            return;
        }
        let major_x = (0..=(width / interval).ceil() as u32)
            .map(|i| (i as f32 * interval).min(width))
            .map(|x| ((x, 0.0), (x, height)));
        let major_y = (0..=(height / interval).ceil() as u32)
            .map(|i| (i as f32 * interval).min(height))
            .map(|y| ((0.0, y), (width, y)));
        let style = &self.grid.major_screen_lines;
        grid.stroke(
            geometry::segments(major_x.chain(major_y)),
            StrokeStyle::new(style.thickness, style.color),
        );
    }

    fn realize_full(&mut self, stitch: &FullStitch) -> ParticleHandle {
        let color = self.palette_color(stitch.palindex);
        let particle = self
            .stages
            .full_stage(stitch.kind)
            .add_particle(Particle::new(stitch.x, stitch.y, STITCH_SCALE_FACTOR, color));

        let item = self.palette_item(stitch.palindex);
        let font = item.formats().font.clone();
        let glyphs: SmallVec<[(Point, f32); 2]> = match stitch.kind {
            FullStitchKind::Full => smallvec::smallvec![(
                Point::new(stitch.x + 0.5, stitch.y + 0.5),
                f32::from(font.stitch_size) / 100.0
            )],
            FullStitchKind::Petite => smallvec::smallvec![(
                Point::new(stitch.x + 0.25, stitch.y + 0.25),
                f32::from(font.small_stitch_size) / 100.0 * 0.5
            )],
        };
        let symbols = self.add_symbols(stitch.palindex, stitch.kind.into(), &glyphs);
        ParticleHandle { particle, symbols }
    }

    fn release_full(&mut self, stitch: &FullStitch, handle: ParticleHandle) {
        self.stages
            .full_stage(stitch.kind)
            .remove_particle(handle.particle);
        for id in handle.symbols {
            self.stages.symbols.remove_child(id);
        }
    }

    fn realize_part(&mut self, stitch: &PartStitch) -> ParticleHandle {
        let color = self.palette_color(stitch.palindex);
        let mut particle = Particle::new(stitch.x, stitch.y, STITCH_SCALE_FACTOR, color);
        if stitch.direction == PartStitchDirection::Backward {
            particle.scale_x = -STITCH_SCALE_FACTOR;
            particle.anchor_x = 1.0;
        }
        let particle = self.stages.part_stage(stitch.kind).add_particle(particle);

        let size = f32::from(self.palette_item(stitch.palindex).formats().font.small_stitch_size)
            / 100.0
            * 0.5;
        let (x, y) = (stitch.x, stitch.y);
        let glyphs: SmallVec<[(Point, f32); 2]> = match (stitch.kind, stitch.direction) {
            (PartStitchKind::Half, PartStitchDirection::Forward) => smallvec::smallvec![
                (Point::new(x + 0.25, y + 0.75), size),
                (Point::new(x + 0.75, y + 0.25), size),
            ],
            (PartStitchKind::Half, PartStitchDirection::Backward) => smallvec::smallvec![
                (Point::new(x + 0.25, y + 0.25), size),
                (Point::new(x + 0.75, y + 0.75), size),
            ],
            (PartStitchKind::Quarter, _) => {
                smallvec::smallvec![(Point::new(x + 0.25, y + 0.25), size)]
            }
        };
        let symbols = self.add_symbols(stitch.palindex, stitch.kind.into(), &glyphs);
        ParticleHandle { particle, symbols }
    }

    fn release_part(&mut self, stitch: &PartStitch, handle: ParticleHandle) {
        self.stages
            .part_stage(stitch.kind)
            .remove_particle(handle.particle);
        for id in handle.symbols {
            self.stages.symbols.remove_child(id);
        }
    }

    /// Adds one glyph per `(center, size)` to the symbol stage. Palette items
    /// without a symbol for `kind` add nothing.
    fn add_symbols(
        &mut self,
        palindex: u32,
        kind: StitchKind,
        glyphs: &[(Point, f32)],
    ) -> SmallVec<[NodeId; 2]> {
        let item = self.palette_item(palindex);
        let Some(ch) = item.symbol_for(kind) else {
            return SmallVec::new();
        };
        let font = &item.formats().font;
        let template = Glyph {
            ch,
            family: item.symbol_font(self.default_symbol_font()).to_string(),
            bold: font.bold,
            italic: font.italic,
            center: Point::default(),
            size: 0.0,
            color: item.color().contrast_color(),
        };

        glyphs
            .iter()
            .map(|&(center, size)| {
                self.stages.symbols.add_child(Glyph {
                    center,
                    size,
                    ..template.clone()
                })
            })
            .collect()
    }

    fn realize_line(&mut self, stitch: &LineStitch) -> NodeId {
        let color = self.palette_color(stitch.palindex);
        let mut graphics = line_stitch_graphics(stitch, color);
        graphics.target = Some(Stitch::Line(*stitch));
        self.stages.lines.add_child(graphics)
    }

    fn realize_node(&mut self, ctx: &mut RenderContext, stitch: &NodeStitch) -> Result<NodeId> {
        let item = self.palette_item(stitch.palindex);
        let color = item.color();
        let bead = match stitch.kind {
            NodeStitchKind::Bead => item.bead().copied(),
            NodeStitchKind::FrenchKnot => None,
        };

        let mut sprite = node_stitch_sprite(ctx, stitch, color, bead.as_ref())?;
        sprite.target = Some(Stitch::Node(*stitch));
        Ok(self.stages.nodes.add_child(sprite))
    }

    fn realize_special(&mut self, special: &SpecialStitch) -> NodeId {
        let color = self.palette_color(special.palindex);
        let graphics = special_stitch_graphics(
            &self.special_stitch_models[special.modindex as usize],
            special,
            color,
        );
        self.stages.special.add_child(graphics)
    }
}

fn texture_size(ctx: &RenderContext, texture: TextureId) -> Result<(f32, f32)> {
    ctx.textures
        .get(texture)
        .map(|t| t.size())
        .ok_or_else(|| RenderError::DeadTexture(format!("{texture:?}")))
}

/// Vector drawing of a line stitch in `color`. Not hit-testable until a
/// target is set.
pub fn line_stitch_graphics(stitch: &LineStitch, color: Color) -> Graphics {
    let mut graphics = Graphics::new();
    line_strokes(
        &mut graphics,
        geometry::segments([(stitch.start(), stitch.end())]),
        color,
    );
    graphics
}

/// Sprite of a french knot or bead centered on the stitch point, turned 90
/// degrees when the stitch is rotated.
pub fn node_stitch_sprite(
    ctx: &mut RenderContext,
    stitch: &NodeStitch,
    color: Color,
    bead: Option<&Bead>,
) -> Result<Sprite> {
    let texture = ctx.textures.node_texture(stitch.kind, bead)?;
    let size = texture_size(ctx, texture)?;

    let mut sprite = Sprite::new(texture, size);
    sprite.position = Point::new(stitch.x, stitch.y);
    sprite.pivot = Point::new(size.0 / 2.0, size.1 / 2.0);
    sprite.scale = (STITCH_SCALE_FACTOR, STITCH_SCALE_FACTOR);
    sprite.angle = if stitch.rotated { 90.0 } else { 0.0 };
    sprite.tint = color;
    Ok(sprite)
}

/// Black border stroke under a thinner colored stroke.
fn line_strokes(graphics: &mut Graphics, path: lyon::path::Path, color: Color) {
    graphics
        .stroke(
            path.clone(),
            StrokeStyle::new(LINE_BORDER_WIDTH, Color::BLACK).round(),
        )
        .stroke(path, StrokeStyle::new(LINE_FILL_WIDTH, color).round());
}

/// Vector drawing of a placed special stitch. The model is drawn in white
/// and black and tinted with `color`.
pub(crate) fn special_stitch_graphics(
    model: &SpecialStitchModel,
    special: &SpecialStitch,
    color: Color,
) -> Graphics {
    let mut graphics = Graphics::new();

    for curve in &model.curvedstitches {
        let path = geometry::polyline(curve.points.iter().map(|p| (p[0], p[1])));
        line_strokes(&mut graphics, path, Color::WHITE);
    }

    if !model.linestitches.is_empty() {
        let path = geometry::segments(model.linestitches.iter().map(|l| (l.start(), l.end())));
        line_strokes(&mut graphics, path, Color::WHITE);
    }

    for node in &model.nodestitches {
        let circle = geometry::circle(node.x, node.y, 0.5);
        graphics.fill(circle.clone(), Color::WHITE).stroke(
            circle,
            StrokeStyle::new(SPECIAL_NODE_OUTLINE, Color::BLACK),
        );
    }

    let flip = |mirrored: bool| if mirrored { -1.0 } else { 1.0 };
    graphics.transform = Transform::from_translate(special.x, special.y)
        .pre_concat(Transform::from_rotate(f32::from(special.rotation)))
        .pre_scale(flip(special.flip[0]), flip(special.flip[1]));
    graphics.tint = color;
    graphics
}
