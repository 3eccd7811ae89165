//! Scene rasterizer
//!
//! Renders the stages of a pattern view into an image buffer using tiny-skia.
//!
//! Features:
//! - Anti-aliased vector drawing for fabric, grid and line stitches
//! - Tinted texture blits for particles and sprites, cached per tint
//! - Symbol glyphs drawn with rusttype
//! - PNG export

use std::collections::HashMap;
use std::path::Path;

use image::{ImageFormat, RgbaImage};
use rusttype::{point as rt_point, Scale};
use stitchkit_core::{Color, Point};
use tiny_skia::{
    FillRule, FilterQuality, Paint, Pixmap, PixmapMut, PixmapPaint, PremultipliedColorU8, Stroke,
    Transform,
};
use tracing::debug;

use crate::context::RenderContext;
use crate::error::{RenderError, Result};
use crate::font_manager::FontManager;
use crate::geometry;
use crate::scene::{
    Container, DrawCommand, Glyph, Graphics, Node, ParticleContainer, Sprite, StageKind, StageRef,
};
use crate::texture_manager::{TextureId, TextureManager};

fn skia_color(color: Color, alpha: f32) -> tiny_skia::Color {
    let a = (f32::from(color.a) * alpha.clamp(0.0, 1.0)).round() as u8;
    tiny_skia::Color::from_rgba8(color.r, color.g, color.b, a)
}

/// Draws the commands of `graphics` with `parent` as the world transform.
pub(crate) fn draw_graphics(pixmap: &mut PixmapMut<'_>, graphics: &Graphics, parent: Transform) {
    let transform = parent.pre_concat(graphics.transform);

    for command in graphics.commands() {
        let mut paint = Paint::default();
        paint.anti_alias = true;

        match command {
            DrawCommand::Fill { path, color } => {
                let Some(path) = geometry::to_skia_path(path) else {
                    continue;
                };
                paint.set_color(skia_color(color.multiply(graphics.tint), graphics.alpha));
                pixmap.fill_path(&path, &paint, FillRule::Winding, transform, None);
            }
            DrawCommand::Stroke { path, style } => {
                let Some(path) = geometry::to_skia_path(path) else {
                    continue;
                };
                paint.set_color(skia_color(style.color.multiply(graphics.tint), graphics.alpha));
                let stroke = Stroke {
                    width: style.width,
                    line_cap: style.cap,
                    line_join: style.join,
                    ..Default::default()
                };
                pixmap.stroke_path(&path, &paint, &stroke, transform, None);
            }
        }
    }
}

/// Copy of `source` with every pixel multiplied by `tint`.
fn tint_pixmap(source: &Pixmap, tint: Color) -> Pixmap {
    let mut tinted = source.clone();
    let mul = |v: u8, t: u8| ((u16::from(v) * u16::from(t)) / 255) as u8;

    for pixel in tinted.pixels_mut() {
        let a = mul(pixel.alpha(), tint.a);
        let r = mul(mul(pixel.red(), tint.r), tint.a);
        let g = mul(mul(pixel.green(), tint.g), tint.a);
        let b = mul(mul(pixel.blue(), tint.b), tint.a);
        *pixel = PremultipliedColorU8::from_rgba(r, g, b, a)
            .unwrap_or(PremultipliedColorU8::TRANSPARENT);
    }
    tinted
}

/// Rasterizes view stages through a world-to-screen transform.
///
/// Tinted copies of textures are kept between frames and dropped once their
/// texture is destroyed.
#[derive(Debug, Default)]
pub struct Renderer {
    tinted: HashMap<(TextureId, u32), Pixmap>,
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cached tinted textures.
    pub fn cached_tints(&self) -> usize {
        self.tinted.len()
    }

    pub fn clear_cache(&mut self) {
        self.tinted.clear();
    }

    /// Renders `stages` and an optional `overlay` node on top into a
    /// `width` x `height` image.
    pub fn render(
        &mut self,
        ctx: &mut RenderContext,
        stages: &[(StageKind, StageRef<'_>)],
        overlay: Option<&Node>,
        transform: Transform,
        width: u32,
        height: u32,
    ) -> Result<RgbaImage> {
        let mut target =
            Pixmap::new(width, height).ok_or(RenderError::Allocation { width, height })?;
        target.fill(skia_color(ctx.settings().background, 1.0));

        let textures = &ctx.textures;
        let fonts = &mut ctx.fonts;
        self.tinted.retain(|(id, _), _| textures.is_alive(*id));

        for (kind, stage) in stages {
            match stage {
                StageRef::Graphics(graphics) => {
                    draw_graphics(&mut target.as_mut(), graphics, transform);
                }
                StageRef::Particles(particles) => {
                    self.draw_particles(&mut target, textures, particles, transform)?;
                }
                StageRef::Container(container) => {
                    self.draw_container(&mut target, textures, fonts, container, transform)?;
                }
            }
            debug!("Rasterized {:?} stage", kind);
        }

        if let Some(node) = overlay {
            self.draw_node(&mut target, textures, fonts, node, transform)?;
        }

        to_image(&target)
    }

    fn draw_particles(
        &mut self,
        target: &mut Pixmap,
        textures: &TextureManager,
        particles: &ParticleContainer,
        world: Transform,
    ) -> Result<()> {
        if particles.is_empty() {
            return Ok(());
        }
        let Some(id) = particles.texture() else {
            return Ok(());
        };
        let texture = textures
            .get(id)
            .ok_or_else(|| RenderError::DeadTexture(format!("{id:?}")))?;
        let size = texture.size();
        let res = texture.resolution();

        for particle in particles.particles() {
            let pixmap = self.tinted_texture(textures, id, particle.tint)?;
            let transform = world
                .pre_concat(particle.transform(size))
                .pre_scale(1.0 / res, 1.0 / res);
            target.draw_pixmap(0, 0, pixmap.as_ref(), &pixmap_paint(1.0), transform, None);
        }
        Ok(())
    }

    fn draw_container(
        &mut self,
        target: &mut Pixmap,
        textures: &TextureManager,
        fonts: &mut FontManager,
        container: &Container,
        world: Transform,
    ) -> Result<()> {
        for node in container.children() {
            self.draw_node(target, textures, fonts, node, world)?;
        }
        Ok(())
    }

    fn draw_node(
        &mut self,
        target: &mut Pixmap,
        textures: &TextureManager,
        fonts: &mut FontManager,
        node: &Node,
        world: Transform,
    ) -> Result<()> {
        match node {
            Node::Graphics(graphics) => draw_graphics(&mut target.as_mut(), graphics, world),
            Node::Sprite(sprite) => self.draw_sprite(target, textures, sprite, world)?,
            Node::Glyph(glyph) => draw_glyph(target, fonts, glyph, world),
        }
        Ok(())
    }

    fn draw_sprite(
        &mut self,
        target: &mut Pixmap,
        textures: &TextureManager,
        sprite: &Sprite,
        world: Transform,
    ) -> Result<()> {
        let res = textures
            .get(sprite.texture)
            .map(|t| t.resolution())
            .ok_or_else(|| RenderError::DeadTexture(format!("{:?}", sprite.texture)))?;
        let pixmap = self.tinted_texture(textures, sprite.texture, sprite.tint)?;
        let transform = world
            .pre_concat(sprite.transform())
            .pre_scale(1.0 / res, 1.0 / res);
        target.draw_pixmap(0, 0, pixmap.as_ref(), &pixmap_paint(sprite.alpha), transform, None);
        Ok(())
    }

    fn tinted_texture(
        &mut self,
        textures: &TextureManager,
        id: TextureId,
        tint: Color,
    ) -> Result<&Pixmap> {
        let texture = textures
            .get(id)
            .ok_or_else(|| RenderError::DeadTexture(format!("{id:?}")))?;
        Ok(self
            .tinted
            .entry((id, tint.to_u32()))
            .or_insert_with(|| tint_pixmap(texture.pixmap(), tint)))
    }
}

fn pixmap_paint(opacity: f32) -> PixmapPaint {
    PixmapPaint {
        opacity,
        quality: FilterQuality::Bilinear,
        ..Default::default()
    }
}

/// Draws one glyph centered on its point. Missing fonts skip the glyph.
fn draw_glyph(target: &mut Pixmap, fonts: &mut FontManager, glyph: &Glyph, world: Transform) {
    let Some(font) = fonts.resolve(&glyph.family, glyph.bold, glyph.italic) else {
        return;
    };

    let center = geometry::apply(&world, glyph.center);
    let size = glyph.size * geometry::scale_of(&world);
    if size < 1.0 {
        return;
    }
    let scale = Scale::uniform(size);
    let v_metrics = font.v_metrics(scale);
    let scaled = font.glyph(glyph.ch).scaled(scale);
    let advance = scaled.h_metrics().advance_width;
    let origin = Point::new(
        center.x - advance / 2.0,
        center.y + (v_metrics.ascent + v_metrics.descent) / 2.0,
    );
    let positioned = scaled.positioned(rt_point(origin.x, origin.y));

    let Some(bounding_box) = positioned.pixel_bounding_box() else {
        return;
    };
    let (width, height) = (target.width() as i32, target.height() as i32);
    let pixels = target.pixels_mut();
    let color = glyph.color;

    positioned.draw(|gx, gy, v| {
        let px = gx as i32 + bounding_box.min.x;
        let py = gy as i32 + bounding_box.min.y;
        if px < 0 || px >= width || py < 0 || py >= height {
            return;
        }

        let coverage = v * f32::from(color.a) / 255.0;
        if coverage <= 0.0 {
            return;
        }
        let idx = (py * width + px) as usize;
        let dst = pixels[idx];
        let blend = |src: u8, dst: u8| {
            (f32::from(src) * coverage + f32::from(dst) * (1.0 - coverage)).round() as u8
        };
        let a = blend(255, dst.alpha());
        let r = blend(color.r, dst.red()).min(a);
        let g = blend(color.g, dst.green()).min(a);
        let b = blend(color.b, dst.blue()).min(a);
        if let Some(pixel) = PremultipliedColorU8::from_rgba(r, g, b, a) {
            pixels[idx] = pixel;
        }
    });
}

/// Converts a premultiplied pixmap into a straight-alpha image.
fn to_image(pixmap: &Pixmap) -> Result<RgbaImage> {
    let (width, height) = (pixmap.width(), pixmap.height());
    let mut data = Vec::with_capacity((width * height * 4) as usize);
    for pixel in pixmap.pixels() {
        let c = pixel.demultiply();
        data.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
    }
    RgbaImage::from_raw(width, height, data).ok_or(RenderError::Allocation { width, height })
}

/// Writes `image` as a PNG file.
pub fn save_png(image: &RgbaImage, path: &Path) -> Result<()> {
    image.save_with_format(path, ImageFormat::Png)?;
    debug!("Saved {}x{} preview to {}", image.width(), image.height(), path.display());
    Ok(())
}
