use stitchkit_core::{
    Color, LineStitch, LineStitchKind, NodeStitch, NodeStitchKind, PaletteItem, Pattern,
    PatternProject, Point, Stitch,
};
use stitchkit_settings::RenderSettings;
use stitchkit_view::{PatternView, RenderContext};

fn attached_view(ctx: &mut RenderContext) -> PatternView {
    let project = PatternProject {
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
    };
    let mut view = PatternView::new(project);
    view.attach(ctx).unwrap();
    view
}

fn line(from: (f32, f32), to: (f32, f32)) -> LineStitch {
    LineStitch {
        x: [from.0, to.0],
        y: [from.1, to.1],
        palindex: 0,
        kind: LineStitchKind::Back,
    }
}

fn knot(x: f32, y: f32) -> NodeStitch {
    NodeStitch {
        x,
        y,
        palindex: 0,
        kind: NodeStitchKind::FrenchKnot,
        rotated: false,
    }
}

#[test]
fn test_line_hit_within_border_width() {
    let mut ctx = RenderContext::headless(&RenderSettings::default());
    let mut view = attached_view(&mut ctx);
    view.add_line_stitch(line((1.0, 1.0), (4.0, 1.0)));

    assert_eq!(
        view.hit_test(Point::new(2.0, 1.05)),
        Some(Stitch::Line(line((1.0, 1.0), (4.0, 1.0))))
    );
    assert_eq!(view.hit_test(Point::new(2.0, 1.5)), None);
    view.destroy(&mut ctx);
}

#[test]
fn test_nodes_hit_above_lines() {
    let mut ctx = RenderContext::headless(&RenderSettings::default());
    let mut view = attached_view(&mut ctx);
    view.add_line_stitch(line((5.0, 3.0), (5.0, 7.0)));
    view.add_node_stitch(&mut ctx, knot(5.0, 5.0)).unwrap();

    assert_eq!(view.hit_test(Point::new(5.0, 5.0)), Some(Stitch::Node(knot(5.0, 5.0))));
    assert_eq!(
        view.hit_test(Point::new(5.0, 6.5)),
        Some(Stitch::Line(line((5.0, 3.0), (5.0, 7.0))))
    );
    view.destroy(&mut ctx);
}

#[test]
fn test_removed_stitch_is_not_hit() {
    let mut ctx = RenderContext::headless(&RenderSettings::default());
    let mut view = attached_view(&mut ctx);
    view.add_node_stitch(&mut ctx, knot(2.0, 2.0)).unwrap();
    view.remove_stitch(Stitch::Node(knot(2.0, 2.0)));

    assert_eq!(view.hit_test(Point::new(2.0, 2.0)), None);
    view.destroy(&mut ctx);
}

#[test]
fn test_rotated_bead_hit_area() {
    let mut ctx = RenderContext::headless(&RenderSettings::default());
    let mut view = attached_view(&mut ctx);
    let bead = NodeStitch {
        kind: NodeStitchKind::Bead,
        rotated: true,
        ..knot(10.0, 10.0)
    };
    view.add_node_stitch(&mut ctx, bead).unwrap();

    // The default bead is about 0.57 x 0.94 cells; rotated it lies horizontally.
    assert_eq!(view.hit_test(Point::new(10.4, 10.0)), Some(Stitch::Node(bead)));
    assert_eq!(view.hit_test(Point::new(10.0, 10.4)), None);
    view.destroy(&mut ctx);
}
