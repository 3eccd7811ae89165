//! Interactive pattern canvas.
//!
//! `PatternCanvas` owns the viewport, the placement gesture and the current
//! [`PatternView`], translates pointer input into [`CanvasEvent`]s for the
//! command layer and draws stitch hints on top of the pattern.

use std::sync::mpsc::Sender;

use image::RgbaImage;
use stitchkit_core::{Bead, CanvasEvent, Color, LineStitch, NodeStitch, Point, RemoveStitchData};
use stitchkit_settings::CanvasSettings;
use stitchkit_view::{
    line_stitch_graphics, node_stitch_sprite, Node, PatternView, RenderContext, Renderer,
};
use tracing::{debug, info, warn};

use crate::error::CanvasResult;
use crate::gesture::{Gesture, Modifiers, Transition};
use crate::viewport::Viewport;

/// Receiver of canvas events.
pub trait CanvasEventSink {
    fn emit(&mut self, event: CanvasEvent);
}

impl CanvasEventSink for Sender<CanvasEvent> {
    fn emit(&mut self, event: CanvasEvent) {
        if self.send(event).is_err() {
            warn!("Canvas event receiver is gone, dropping {:?}", event);
        }
    }
}

impl CanvasEventSink for Vec<CanvasEvent> {
    fn emit(&mut self, event: CanvasEvent) {
        self.push(event);
    }
}

/// A pointer event in screen coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerInput {
    pub x: f32,
    pub y: f32,
    /// Pan modifier.
    pub shift: bool,
    pub ctrl: bool,
}

impl PointerInput {
    pub fn at(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            ..Self::default()
        }
    }

    fn modifiers(&self) -> Modifiers {
        Modifiers {
            pan: self.shift,
            ctrl: self.ctrl,
        }
    }
}

pub struct PatternCanvas<S: CanvasEventSink> {
    viewport: Viewport,
    gesture: Gesture,
    view: Option<PatternView>,
    hint: Option<Node>,
    sink: S,
    settings: CanvasSettings,
    pan_anchor: Option<(f32, f32)>,
    renderer: Renderer,
}

impl<S: CanvasEventSink> PatternCanvas<S> {
    pub fn new(settings: &CanvasSettings, width: f32, height: f32, sink: S) -> Self {
        Self {
            viewport: Viewport::with_settings(settings, width, height),
            gesture: Gesture::new(),
            view: None,
            hint: None,
            sink,
            settings: settings.clone(),
            pan_anchor: None,
            renderer: Renderer::new(),
        }
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    pub fn gesture(&self) -> &Gesture {
        &self.gesture
    }

    pub fn view(&self) -> Option<&PatternView> {
        self.view.as_ref()
    }

    pub fn view_mut(&mut self) -> Option<&mut PatternView> {
        self.view.as_mut()
    }

    pub fn hint(&self) -> Option<&Node> {
        self.hint.as_ref()
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Replaces the displayed pattern. The previous view is destroyed, the
    /// new one is attached, fitted to the screen height and centered.
    pub fn set_pattern_view(
        &mut self,
        ctx: &mut RenderContext,
        mut view: PatternView,
    ) -> CanvasResult<()> {
        if let Some(mut old) = self.view.take() {
            old.destroy(ctx);
        }
        self.hint = None;
        self.gesture = Gesture::new();
        self.renderer.clear_cache();

        view.attach(ctx)?;
        let (width, height) = (f32::from(view.fabric().width), f32::from(view.fabric().height));
        self.viewport.set_world_size(width, height);
        self.viewport.fit_height();
        self.viewport.move_center(width / 2.0, height / 2.0);
        info!("Showing pattern '{}' ({})", view.info().title, self.viewport);

        self.view = Some(view);
        Ok(())
    }

    /// Destroys the current view and its textures.
    pub fn clear_pattern_view(&mut self, ctx: &mut RenderContext) {
        if let Some(mut view) = self.view.take() {
            view.destroy(ctx);
        }
        self.hint = None;
        self.renderer.clear_cache();
    }

    /// Resizes the render surface and the viewport together.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.viewport.resize(width, height);
        debug!("Canvas resized to {}x{}", width, height);
    }

    fn locate(&self, input: &PointerInput) -> (Point, bool) {
        let point = self.viewport.screen_to_world(input.x, input.y);
        (point, !self.viewport.point_is_outside(point))
    }

    fn apply(&mut self, transition: Transition) {
        if transition.clear_hint {
            self.hint = None;
        }
        if let Some(data) = transition.event {
            self.sink.emit(data.into());
        }
    }

    pub fn pointer_down(&mut self, input: PointerInput) {
        self.pan_anchor = input.shift.then_some((input.x, input.y));
        let (point, inside) = self.locate(&input);
        let transition = self.gesture.pointer_down(point, inside, input.modifiers());
        self.apply(transition);
    }

    pub fn pointer_move(&mut self, input: PointerInput) {
        if input.shift {
            if let Some((x, y)) = self.pan_anchor {
                self.viewport.pan_by(input.x - x, input.y - y);
            }
            self.pan_anchor = Some((input.x, input.y));
        } else {
            self.pan_anchor = None;
        }

        let (point, inside) = self.locate(&input);
        let transition = self.gesture.pointer_move(point, inside, input.modifiers());
        self.apply(transition);
    }

    pub fn pointer_up(&mut self, input: PointerInput) {
        self.pan_anchor = None;
        let (point, inside) = self.locate(&input);
        let transition = self.gesture.pointer_up(point, inside, input.modifiers());
        self.apply(transition);
    }

    /// Requests removal of the stitch under the pointer, or of whatever lies
    /// at the pointer when no individual stitch is hit.
    pub fn secondary_click(&mut self, input: PointerInput) {
        if input.shift {
            return;
        }
        let (point, inside) = self.locate(&input);
        let hit = self.view.as_ref().and_then(|view| view.hit_test(point));

        let data = match hit {
            Some(stitch) => RemoveStitchData::Stitch(stitch),
            None if inside => RemoveStitchData::Point(point),
            None => return,
        };
        self.sink.emit(data.into());
    }

    pub fn wheel(&mut self, x: f32, y: f32, notches: f32) {
        self.viewport.wheel(x, y, notches);
    }

    pub fn pinch(&mut self, x: f32, y: f32, scale: f32) {
        self.viewport.pinch(x, y, scale);
    }

    /// Shows a translucent preview of a line stitch.
    pub fn draw_line_hint(&mut self, line: &LineStitch, color: Color) {
        let mut graphics = line_stitch_graphics(line, color);
        graphics.alpha = self.settings.hint_alpha;
        self.hint = Some(graphics.into());
    }

    /// Shows a translucent preview of a french knot or bead.
    pub fn draw_node_hint(
        &mut self,
        ctx: &mut RenderContext,
        node: &NodeStitch,
        color: Color,
        bead: Option<&Bead>,
    ) -> CanvasResult<()> {
        self.hint = None;
        let mut sprite = node_stitch_sprite(ctx, node, color, bead)?;
        sprite.alpha = self.settings.hint_alpha;
        self.hint = Some(sprite.into());
        Ok(())
    }

    pub fn clear_hint(&mut self) {
        self.hint = None;
    }

    /// Rasterizes the current view and hint at the screen size.
    pub fn render(&mut self, ctx: &mut RenderContext) -> CanvasResult<RgbaImage> {
        let (width, height) = self.viewport.screen_size();
        let stages = self
            .view
            .as_ref()
            .map(|view| view.stages())
            .unwrap_or_default();
        let image = self.renderer.render(
            ctx,
            &stages,
            self.hint.as_ref(),
            self.viewport.transform(),
            width.round() as u32,
            height.round() as u32,
        )?;
        Ok(image)
    }
}

impl<S: CanvasEventSink> std::fmt::Debug for PatternCanvas<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PatternCanvas")
            .field("viewport", &self.viewport)
            .field("gesture", &self.gesture)
            .field("view", &self.view.as_ref().map(|v| v.key().to_string()))
            .field("has_hint", &self.hint.is_some())
            .finish()
    }
}
