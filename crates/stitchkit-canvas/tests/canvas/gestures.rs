use stitchkit_canvas::{GestureState, PatternCanvas, PointerInput};
use stitchkit_core::{AddStitchStage, CanvasEvent, Point};
use stitchkit_settings::CanvasSettings;

/// Canvas with a 100x100 world at zoom 1 and no pan.
fn canvas() -> PatternCanvas<Vec<CanvasEvent>> {
    let mut canvas = PatternCanvas::new(&CanvasSettings::default(), 200.0, 200.0, Vec::new());
    canvas.viewport_mut().set_world_size(100.0, 100.0);
    canvas
}

fn stages(canvas: &PatternCanvas<Vec<CanvasEvent>>) -> Vec<(AddStitchStage, Point, Point)> {
    canvas
        .sink()
        .iter()
        .filter_map(|event| match event {
            CanvasEvent::AddStitch(data) => Some((data.stage, data.start, data.end)),
            CanvasEvent::RemoveStitch(_) => None,
        })
        .collect()
}

#[test]
fn test_start_continue_end() {
    let mut canvas = canvas();
    canvas.pointer_down(PointerInput::at(10.0, 10.0));
    canvas.pointer_move(PointerInput::at(20.0, 15.0));
    canvas.pointer_up(PointerInput::at(30.0, 20.0));

    let start = Point::new(10.0, 10.0);
    assert_eq!(
        stages(&canvas),
        vec![
            (AddStitchStage::Start, start, start),
            (AddStitchStage::Continue, start, Point::new(20.0, 15.0)),
            (AddStitchStage::End, start, Point::new(30.0, 20.0)),
        ]
    );
    assert_eq!(canvas.gesture().state(), GestureState::Idle);
}

#[test]
fn test_second_pointer_down_does_not_restart() {
    let mut canvas = canvas();
    canvas.pointer_down(PointerInput::at(10.0, 10.0));
    canvas.pointer_down(PointerInput::at(12.0, 12.0));
    canvas.pointer_move(PointerInput::at(14.0, 14.0));

    let events = stages(&canvas);
    let starts = events
        .iter()
        .filter(|(stage, _, _)| *stage == AddStitchStage::Start)
        .count();
    assert_eq!(starts, 1);
    assert_eq!(events[1].1, Point::new(10.0, 10.0));
}

#[test]
fn test_pointer_down_outside_stays_idle() {
    let mut canvas = canvas();
    canvas.pointer_down(PointerInput::at(150.0, 10.0));
    canvas.pointer_move(PointerInput::at(20.0, 20.0));
    canvas.pointer_up(PointerInput::at(20.0, 20.0));

    assert!(canvas.sink().is_empty());
}

#[test]
fn test_moves_outside_are_skipped() {
    let mut canvas = canvas();
    canvas.pointer_down(PointerInput::at(10.0, 10.0));
    canvas.pointer_move(PointerInput::at(120.0, 10.0));
    canvas.pointer_up(PointerInput::at(120.0, 10.0));

    assert_eq!(stages(&canvas).len(), 1);
    assert_eq!(canvas.gesture().state(), GestureState::Idle);
}

#[test]
fn test_shift_drag_pans_instead_of_placing() {
    let mut canvas = canvas();
    let shift = |x, y| PointerInput {
        shift: true,
        ..PointerInput::at(x, y)
    };
    canvas.pointer_down(shift(10.0, 10.0));
    canvas.pointer_move(shift(15.0, 12.0));
    canvas.pointer_up(shift(15.0, 12.0));

    assert!(canvas.sink().is_empty());
    // Drag factor 2.
    assert_eq!(canvas.viewport().pan(), (10.0, 4.0));
}

#[test]
fn test_ctrl_is_passed_through() {
    let mut canvas = canvas();
    canvas.pointer_down(PointerInput {
        ctrl: true,
        ..PointerInput::at(10.0, 10.0)
    });
    match canvas.sink()[0] {
        CanvasEvent::AddStitch(data) => assert!(data.alt && data.fixed),
        other => panic!("unexpected event {other:?}"),
    }
}

#[test]
fn test_events_reach_a_channel() {
    let (tx, rx) = std::sync::mpsc::channel();
    let mut canvas = PatternCanvas::new(&CanvasSettings::default(), 200.0, 200.0, tx);
    canvas.viewport_mut().set_world_size(100.0, 100.0);
    canvas.pointer_down(PointerInput::at(5.0, 5.0));
    canvas.pointer_up(PointerInput::at(6.0, 6.0));

    let received: Vec<CanvasEvent> = rx.try_iter().collect();
    assert_eq!(received.len(), 2);
}
