//! Vector geometry helpers.
//!
//! Shapes are built as `lyon` paths and converted to `tiny-skia` paths at
//! rasterization time.

use lyon::math::{point, Box2D};
use lyon::path::builder::BorderRadii;
use lyon::path::{Event, Path, Polygon, Winding};
use stitchkit_core::Point;
use tiny_skia::{PathBuilder, Transform};

/// Axis-aligned rectangle.
pub fn rect(x: f32, y: f32, width: f32, height: f32) -> Path {
    let mut builder = Path::builder();
    builder.add_rectangle(
        &Box2D::new(point(x, y), point(x + width, y + height)),
        Winding::Positive,
    );
    builder.build()
}

/// Rectangle with equal corner radii.
pub fn round_rect(x: f32, y: f32, width: f32, height: f32, radius: f32) -> Path {
    let mut builder = Path::builder();
    builder.add_rounded_rectangle(
        &Box2D::new(point(x, y), point(x + width, y + height)),
        &BorderRadii::new(radius),
        Winding::Positive,
    );
    builder.build()
}

pub fn circle(cx: f32, cy: f32, radius: f32) -> Path {
    let mut builder = Path::builder();
    builder.add_circle(point(cx, cy), radius, Winding::Positive);
    builder.build()
}

/// Closed polygon from a flat `[x0, y0, x1, y1, ...]` list.
pub fn polygon(flat: &[f32]) -> Path {
    let points: Vec<_> = flat.chunks_exact(2).map(|c| point(c[0], c[1])).collect();
    let mut builder = Path::builder();
    builder.add_polygon(Polygon {
        points: &points,
        closed: true,
    });
    builder.build()
}

/// Open polyline through `points`. Fewer than two points give an empty path.
pub fn polyline<I>(points: I) -> Path
where
    I: IntoIterator<Item = (f32, f32)>,
{
    let mut builder = Path::builder();
    let mut points = points.into_iter();
    if let Some((x, y)) = points.next() {
        builder.begin(point(x, y));
        for (x, y) in points {
            builder.line_to(point(x, y));
        }
        builder.end(false);
    }
    builder.build()
}

/// Open path made of independent segments.
pub fn segments<I>(segments: I) -> Path
where
    I: IntoIterator<Item = ((f32, f32), (f32, f32))>,
{
    let mut builder = Path::builder();
    for ((x0, y0), (x1, y1)) in segments {
        builder.begin(point(x0, y0));
        builder.line_to(point(x1, y1));
        builder.end(false);
    }
    builder.build()
}

/// Converts a lyon path to a tiny-skia path. Empty paths give `None`.
pub fn to_skia_path(path: &Path) -> Option<tiny_skia::Path> {
    let mut pb = PathBuilder::new();
    for event in path.iter() {
        match event {
            Event::Begin { at } => pb.move_to(at.x, at.y),
            Event::Line { to, .. } => pb.line_to(to.x, to.y),
            Event::Quadratic { ctrl, to, .. } => pb.quad_to(ctrl.x, ctrl.y, to.x, to.y),
            Event::Cubic {
                ctrl1, ctrl2, to, ..
            } => pb.cubic_to(ctrl1.x, ctrl1.y, ctrl2.x, ctrl2.y, to.x, to.y),
            Event::End { close, .. } => {
                if close {
                    pb.close();
                }
            }
        }
    }
    pb.finish()
}

/// Bounding box of every point of `path`, control points included.
pub fn bounds(path: &Path) -> Option<(Point, Point)> {
    let mut min = Point::new(f32::INFINITY, f32::INFINITY);
    let mut max = Point::new(f32::NEG_INFINITY, f32::NEG_INFINITY);
    for p in path.iter().flat_map(event_points) {
        min.x = min.x.min(p.0);
        min.y = min.y.min(p.1);
        max.x = max.x.max(p.0);
        max.y = max.y.max(p.1);
    }
    (min.x <= max.x).then_some((min, max))
}

fn event_points(event: Event<lyon::math::Point, lyon::math::Point>) -> Vec<(f32, f32)> {
    match event {
        Event::Begin { at } => vec![(at.x, at.y)],
        Event::Line { to, .. } => vec![(to.x, to.y)],
        Event::Quadratic { ctrl, to, .. } => vec![(ctrl.x, ctrl.y), (to.x, to.y)],
        Event::Cubic {
            ctrl1, ctrl2, to, ..
        } => vec![(ctrl1.x, ctrl1.y), (ctrl2.x, ctrl2.y), (to.x, to.y)],
        Event::End { .. } => Vec::new(),
    }
}

/// Straight segments of `path`. Curves are approximated by their chords.
pub fn path_segments(path: &Path) -> impl Iterator<Item = (Point, Point)> + '_ {
    path.iter().filter_map(|event| match event {
        Event::Line { from, to } => Some((Point::new(from.x, from.y), Point::new(to.x, to.y))),
        Event::Quadratic { from, to, .. } | Event::Cubic { from, to, .. } => {
            Some((Point::new(from.x, from.y), Point::new(to.x, to.y)))
        }
        Event::End {
            last, first, close, ..
        } if close => Some((Point::new(last.x, last.y), Point::new(first.x, first.y))),
        _ => None,
    })
}

/// Distance from `p` to the segment `a`-`b`.
pub fn distance_to_segment(p: Point, a: Point, b: Point) -> f32 {
    let (dx, dy) = (b.x - a.x, b.y - a.y);
    let len_sq = dx * dx + dy * dy;
    if len_sq == 0.0 {
        return p.distance(&a);
    }
    let t = (((p.x - a.x) * dx + (p.y - a.y) * dy) / len_sq).clamp(0.0, 1.0);
    p.distance(&Point::new(a.x + t * dx, a.y + t * dy))
}

/// Applies `transform` to `p`.
pub fn apply(transform: &Transform, p: Point) -> Point {
    Point::new(
        transform.sx * p.x + transform.kx * p.y + transform.tx,
        transform.ky * p.x + transform.sy * p.y + transform.ty,
    )
}

/// Uniform scale factor of `transform`, ignoring rotation.
pub fn scale_of(transform: &Transform) -> f32 {
    transform.sx.hypot(transform.ky)
}
