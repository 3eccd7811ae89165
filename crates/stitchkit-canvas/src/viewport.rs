//! Viewport and coordinate transformation for the pattern canvas.
//!
//! Handles conversion between screen coordinates (pixels, y down) and world
//! coordinates (stitch-grid cells, y down). Manages zoom and pan with the
//! zoom level clamped to the configured range.

use std::fmt;

use stitchkit_core::Point;
use stitchkit_settings::CanvasSettings;
use tiny_skia::Transform;

/// Represents the viewport transformation state (zoom and pan).
///
/// ```text
/// screen_x = world_x * zoom + pan_x
/// screen_y = world_y * zoom + pan_y
/// ```
#[derive(Debug, Clone)]
pub struct Viewport {
    zoom: f32,
    pan_x: f32,
    pan_y: f32,
    screen_width: f32,
    screen_height: f32,
    world_width: f32,
    world_height: f32,
    min_zoom: f32,
    max_zoom: f32,
    drag_factor: f32,
    wheel_step: f32,
}

impl Viewport {
    /// Creates a viewport with default canvas settings.
    pub fn new(screen_width: f32, screen_height: f32) -> Self {
        Self::with_settings(&CanvasSettings::default(), screen_width, screen_height)
    }

    pub fn with_settings(settings: &CanvasSettings, screen_width: f32, screen_height: f32) -> Self {
        Self {
            zoom: settings.min_zoom.max(1.0).min(settings.max_zoom),
            pan_x: 0.0,
            pan_y: 0.0,
            screen_width,
            screen_height,
            world_width: 0.0,
            world_height: 0.0,
            min_zoom: settings.min_zoom,
            max_zoom: settings.max_zoom,
            drag_factor: settings.drag_factor,
            wheel_step: settings.wheel_step,
        }
    }

    /// Gets the current zoom level (screen pixels per cell).
    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    /// Sets the zoom level, clamped to the configured range. NaN is ignored.
    pub fn set_zoom(&mut self, zoom: f32) {
        if !zoom.is_nan() {
            self.zoom = zoom.clamp(self.min_zoom, self.max_zoom);
        }
    }

    pub fn pan(&self) -> (f32, f32) {
        (self.pan_x, self.pan_y)
    }

    pub fn set_pan(&mut self, x: f32, y: f32) {
        self.pan_x = x;
        self.pan_y = y;
    }

    /// Pans by a pointer movement in screen pixels, scaled by the drag factor.
    pub fn pan_by(&mut self, dx: f32, dy: f32) {
        self.pan_x += dx * self.drag_factor;
        self.pan_y += dy * self.drag_factor;
    }

    pub fn screen_size(&self) -> (f32, f32) {
        (self.screen_width, self.screen_height)
    }

    /// Sets the screen dimensions (called when the surface resizes).
    pub fn resize(&mut self, width: f32, height: f32) {
        self.screen_width = width;
        self.screen_height = height;
    }

    pub fn world_size(&self) -> (f32, f32) {
        (self.world_width, self.world_height)
    }

    /// Sets the world dimensions used for bounds checks and fitting.
    pub fn set_world_size(&mut self, width: f32, height: f32) {
        self.world_width = width;
        self.world_height = height;
    }

    /// Converts screen coordinates to world coordinates.
    pub fn screen_to_world(&self, screen_x: f32, screen_y: f32) -> Point {
        Point::new(
            (screen_x - self.pan_x) / self.zoom,
            (screen_y - self.pan_y) / self.zoom,
        )
    }

    /// Converts world coordinates to screen coordinates.
    pub fn world_to_screen(&self, point: Point) -> (f32, f32) {
        (
            point.x * self.zoom + self.pan_x,
            point.y * self.zoom + self.pan_y,
        )
    }

    /// Zooms to `new_zoom` keeping the world point under `screen` fixed.
    /// A NaN zoom leaves the viewport unchanged.
    pub fn zoom_at(&mut self, screen_x: f32, screen_y: f32, new_zoom: f32) {
        if new_zoom.is_nan() {
            return;
        }
        let anchor = self.screen_to_world(screen_x, screen_y);
        self.set_zoom(new_zoom);
        self.pan_x = screen_x - anchor.x * self.zoom;
        self.pan_y = screen_y - anchor.y * self.zoom;
    }

    /// Wheel zoom around the cursor. Positive `notches` zoom in. Non-finite
    /// input is ignored.
    pub fn wheel(&mut self, screen_x: f32, screen_y: f32, notches: f32) {
        let factor = (1.0 + self.wheel_step).powf(notches);
        if notches.is_finite() && factor.is_finite() && factor > 0.0 {
            self.zoom_at(screen_x, screen_y, self.zoom * factor);
        }
    }

    /// Pinch zoom around the gesture center by the relative `scale`.
    pub fn pinch(&mut self, center_x: f32, center_y: f32, scale: f32) {
        if scale.is_finite() && scale > 0.0 {
            self.zoom_at(center_x, center_y, self.zoom * scale);
        }
    }

    /// Zooms so the world height fills the screen height.
    pub fn fit_height(&mut self) {
        if self.world_height > 0.0 {
            self.set_zoom(self.screen_height / self.world_height);
        }
    }

    /// Centers the viewport on a world coordinate.
    pub fn move_center(&mut self, world_x: f32, world_y: f32) {
        self.pan_x = self.screen_width / 2.0 - world_x * self.zoom;
        self.pan_y = self.screen_height / 2.0 - world_y * self.zoom;
    }

    /// World point at the center of the screen.
    pub fn center(&self) -> Point {
        self.screen_to_world(self.screen_width / 2.0, self.screen_height / 2.0)
    }

    /// Whether `point` lies outside the world. Points on the world border
    /// count as outside.
    pub fn point_is_outside(&self, point: Point) -> bool {
        point.x <= 0.0
            || point.y <= 0.0
            || point.x >= self.world_width
            || point.y >= self.world_height
    }

    /// World-to-screen transform for the rasterizer.
    pub fn transform(&self) -> Transform {
        Transform::from_row(self.zoom, 0.0, 0.0, self.zoom, self.pan_x, self.pan_y)
    }
}

impl fmt::Display for Viewport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Zoom: {:.2}x | Pan: ({:.1}, {:.1})",
            self.zoom, self.pan_x, self.pan_y
        )
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1200.0, 800.0)
    }
}
