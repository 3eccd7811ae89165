use stitchkit_canvas::Viewport;
use stitchkit_core::Point;

fn viewport() -> Viewport {
    let mut vp = Viewport::new(800.0, 600.0);
    vp.set_world_size(100.0, 80.0);
    vp
}

#[test]
fn test_world_edges_are_outside() {
    let vp = viewport();
    assert!(vp.point_is_outside(Point::new(0.0, 40.0)));
    assert!(vp.point_is_outside(Point::new(100.0, 40.0)));
    assert!(vp.point_is_outside(Point::new(50.0, 0.0)));
    assert!(vp.point_is_outside(Point::new(50.0, 80.0)));
}

#[test]
fn test_interior_is_inside() {
    let vp = viewport();
    assert!(!vp.point_is_outside(Point::new(50.0, 40.0)));
    assert!(!vp.point_is_outside(Point::new(0.01, 79.99)));
}

#[test]
fn test_negative_points_are_outside() {
    let vp = viewport();
    assert!(vp.point_is_outside(Point::new(-1.0, 40.0)));
    assert!(vp.point_is_outside(Point::new(50.0, -0.5)));
}
