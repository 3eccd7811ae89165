use stitchkit_canvas::{PatternCanvas, PointerInput};
use stitchkit_core::{
    Bead, CanvasEvent, Color, LineStitch, LineStitchKind, NodeStitch, NodeStitchKind, PaletteItem,
    Pattern, PatternProject, RemoveStitchData, Stitch,
};
use stitchkit_settings::{CanvasSettings, RenderSettings};
use stitchkit_view::{Node, PatternView, RenderContext};

fn project() -> PatternProject {
    PatternProject {
        key: "canvas".to_string(),
        pattern: Pattern {
            palette: vec![PaletteItem {
                brand: "DMC".to_string(),
                number: "310".to_string(),
                name: "Black".to_string(),
                color: Color::BLACK,
                blends: None,
                bead: None,
                symbol_font: None,
                symbol: None,
            }],
            ..Pattern::default()
        },
        ..PatternProject::default()
    }
}

fn back_stitch() -> LineStitch {
    LineStitch {
        x: [10.0, 20.0],
        y: [10.0, 10.0],
        palindex: 0,
        kind: LineStitchKind::Back,
    }
}

fn setup() -> (RenderContext, PatternCanvas<Vec<CanvasEvent>>) {
    let mut ctx = RenderContext::headless(&RenderSettings::default());
    let mut canvas = PatternCanvas::new(&CanvasSettings::default(), 1200.0, 800.0, Vec::new());
    canvas
        .set_pattern_view(&mut ctx, PatternView::new(project()))
        .unwrap();
    (ctx, canvas)
}

#[test]
fn test_set_pattern_view_fits_height() {
    let (mut ctx, canvas) = setup();
    let viewport = canvas.viewport();

    assert_eq!(viewport.world_size(), (100.0, 100.0));
    assert_eq!(viewport.zoom(), 8.0);
    assert_eq!(viewport.center(), stitchkit_core::Point::new(50.0, 50.0));
    assert!(canvas.view().unwrap().is_attached());

    let mut canvas = canvas;
    canvas.clear_pattern_view(&mut ctx);
    assert!(canvas.view().is_none());
    assert_eq!(ctx.textures.stats().live, 0);
}

#[test]
fn test_replacing_view_destroys_previous() {
    let (mut ctx, mut canvas) = setup();
    let mut next = project();
    next.key = "next".to_string();
    next.pattern.fabric.height = 50;
    canvas
        .set_pattern_view(&mut ctx, PatternView::new(next))
        .unwrap();

    assert_eq!(canvas.view().unwrap().key(), "next");
    assert_eq!(canvas.viewport().zoom(), 16.0);
    canvas.clear_pattern_view(&mut ctx);
}

#[test]
fn test_line_hint_is_translucent() {
    let (mut ctx, mut canvas) = setup();
    canvas.draw_line_hint(&back_stitch(), Color::rgb(0xC7, 0x2B, 0x3B));

    match canvas.hint() {
        Some(Node::Graphics(graphics)) => {
            assert_eq!(graphics.alpha, CanvasSettings::default().hint_alpha);
            assert!(graphics.target.is_none());
        }
        other => panic!("expected a graphics hint, got {other:?}"),
    }

    canvas.clear_hint();
    assert!(canvas.hint().is_none());
    canvas.clear_pattern_view(&mut ctx);
}

#[test]
fn test_node_hint_replaces_line_hint() {
    let (mut ctx, mut canvas) = setup();
    canvas.draw_line_hint(&back_stitch(), Color::BLACK);
    let bead = NodeStitch {
        x: 5.0,
        y: 5.0,
        palindex: 0,
        kind: NodeStitchKind::Bead,
        rotated: true,
    };
    canvas
        .draw_node_hint(&mut ctx, &bead, Color::WHITE, Some(&Bead::default()))
        .unwrap();

    match canvas.hint() {
        Some(Node::Sprite(sprite)) => {
            assert_eq!(sprite.alpha, 0.5);
            assert_eq!(sprite.angle, 90.0);
        }
        other => panic!("expected a sprite hint, got {other:?}"),
    }
    canvas.clear_pattern_view(&mut ctx);
}

#[test]
fn test_finished_gesture_clears_hint() {
    let (mut ctx, mut canvas) = setup();
    let (x, y) = canvas
        .viewport()
        .world_to_screen(stitchkit_core::Point::new(10.0, 10.0));
    canvas.pointer_down(PointerInput::at(x, y));
    canvas.draw_line_hint(&back_stitch(), Color::BLACK);
    canvas.pointer_up(PointerInput::at(x + 40.0, y));

    assert!(canvas.hint().is_none());
    assert_eq!(canvas.sink().len(), 2);
    canvas.clear_pattern_view(&mut ctx);
}

#[test]
fn test_secondary_click_removes_hit_stitch() {
    let (mut ctx, mut canvas) = setup();
    canvas.view_mut().unwrap().add_line_stitch(back_stitch());

    let (x, y) = canvas
        .viewport()
        .world_to_screen(stitchkit_core::Point::new(15.0, 10.0));
    canvas.secondary_click(PointerInput::at(x, y));

    assert_eq!(
        canvas.sink().as_slice(),
        &[CanvasEvent::RemoveStitch(RemoveStitchData::Stitch(
            Stitch::Line(back_stitch())
        ))]
    );
    canvas.clear_pattern_view(&mut ctx);
}

#[test]
fn test_secondary_click_on_empty_cell_sends_point() {
    let (mut ctx, mut canvas) = setup();
    let (x, y) = canvas
        .viewport()
        .world_to_screen(stitchkit_core::Point::new(40.5, 60.5));
    canvas.secondary_click(PointerInput::at(x, y));

    match canvas.sink().as_slice() {
        [CanvasEvent::RemoveStitch(RemoveStitchData::Point(point))] => {
            assert!((point.x - 40.5).abs() < 1e-3);
            assert!((point.y - 60.5).abs() < 1e-3);
        }
        other => panic!("unexpected events {other:?}"),
    }
    canvas.clear_pattern_view(&mut ctx);
}

#[test]
fn test_secondary_click_outside_is_ignored() {
    let (mut ctx, mut canvas) = setup();
    // Left of the fabric, which starts at screen x 200.
    canvas.secondary_click(PointerInput::at(100.0, 400.0));
    assert!(canvas.sink().is_empty());
    canvas.clear_pattern_view(&mut ctx);
}

#[test]
fn test_render_matches_screen_size() {
    let (mut ctx, mut canvas) = setup();
    canvas.resize(300.0, 200.0);
    let image = canvas.render(&mut ctx).unwrap();
    assert_eq!(image.dimensions(), (300, 200));
    canvas.clear_pattern_view(&mut ctx);
}
