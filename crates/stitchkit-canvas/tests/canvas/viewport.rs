use proptest::prelude::*;
use stitchkit_canvas::Viewport;
use stitchkit_core::Point;

#[test]
fn test_wheel_zoom_is_clamped() {
    let mut vp = Viewport::default();
    for _ in 0..200 {
        vp.wheel(600.0, 400.0, 1.0);
    }
    assert_eq!(vp.zoom(), 100.0);
    for _ in 0..200 {
        vp.wheel(600.0, 400.0, -1.0);
    }
    assert_eq!(vp.zoom(), 1.0);
}

#[test]
fn test_pinch_is_clamped_and_ignores_bad_scale() {
    let mut vp = Viewport::default();
    vp.pinch(0.0, 0.0, 1000.0);
    assert_eq!(vp.zoom(), 100.0);
    vp.pinch(0.0, 0.0, 0.0);
    vp.pinch(0.0, 0.0, f32::NAN);
    assert_eq!(vp.zoom(), 100.0);
}

#[test]
fn test_zoom_keeps_cursor_anchor() {
    let mut vp = Viewport::default();
    vp.set_pan(-40.0, 25.0);
    let before = vp.screen_to_world(300.0, 200.0);
    vp.wheel(300.0, 200.0, 3.0);
    let after = vp.screen_to_world(300.0, 200.0);
    assert!((before.x - after.x).abs() < 1e-3);
    assert!((before.y - after.y).abs() < 1e-3);
}

#[test]
fn test_non_finite_wheel_is_ignored() {
    let mut vp = Viewport::default();
    vp.wheel(10.0, 10.0, 2.0);
    let (zoom, pan) = (vp.zoom(), vp.pan());

    vp.wheel(10.0, 10.0, f32::NAN);
    vp.wheel(10.0, 10.0, f32::INFINITY);
    vp.wheel(10.0, 10.0, f32::NEG_INFINITY);
    assert_eq!(vp.zoom(), zoom);
    assert_eq!(vp.pan(), pan);

    vp.wheel(10.0, 10.0, 1.0);
    assert!(vp.zoom().is_finite());
    assert!(vp.zoom() > zoom);
    assert!(vp.screen_to_world(10.0, 10.0).x.is_finite());
}

#[test]
fn test_nan_zoom_is_ignored() {
    let mut vp = Viewport::default();
    vp.set_zoom(4.0);
    vp.set_zoom(f32::NAN);
    vp.zoom_at(0.0, 0.0, f32::NAN);
    assert_eq!(vp.zoom(), 4.0);
}

proptest! {
    #[test]
    fn prop_screen_world_roundtrip(
        zoom in 1.0f32..100.0,
        pan_x in -5000.0f32..5000.0,
        pan_y in -5000.0f32..5000.0,
        x in 0.0f32..1200.0,
        y in 0.0f32..800.0,
    ) {
        let mut vp = Viewport::default();
        vp.set_zoom(zoom);
        vp.set_pan(pan_x, pan_y);

        let world = vp.screen_to_world(x, y);
        let (sx, sy) = vp.world_to_screen(world);
        prop_assert!((sx - x).abs() < 1e-2);
        prop_assert!((sy - y).abs() < 1e-2);
    }

    #[test]
    fn prop_zoom_stays_in_range(notches in proptest::collection::vec(-5.0f32..5.0, 0..40)) {
        let mut vp = Viewport::default();
        for n in notches {
            vp.wheel(600.0, 400.0, n);
        }
        prop_assert!((1.0..=100.0).contains(&vp.zoom()));
    }

    #[test]
    fn prop_transform_matches_world_to_screen(
        zoom in 1.0f32..100.0,
        pan_x in -500.0f32..500.0,
        px in 0.0f32..100.0,
        py in 0.0f32..100.0,
    ) {
        let mut vp = Viewport::default();
        vp.set_zoom(zoom);
        vp.set_pan(pan_x, 0.0);
        let mut p = tiny_skia::Point::from_xy(px, py);
        vp.transform().map_point(&mut p);
        let (sx, sy) = vp.world_to_screen(Point::new(px, py));
        prop_assert!((p.x - sx).abs() < 1e-2);
        prop_assert!((p.y - sy).abs() < 1e-2);
    }
}
