//! Stitch placement gesture.
//!
//! A primary-button gesture places stitches: pressing starts it, moving
//! extends it and releasing ends it, each step reported as an
//! [`AddStitchData`] with the gesture's fixed start point. Holding the pan
//! modifier turns the pointer into a viewport drag and abandons any gesture
//! in progress.

use stitchkit_core::{AddStitchData, AddStitchStage, Point};
use tracing::trace;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum GestureState {
    #[default]
    Idle,
    Dragging {
        start: Point,
    },
}

/// Modifier keys held during a pointer event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    /// Pan modifier (Shift).
    pub pan: bool,
    /// Secondary-click modifier (Ctrl), reported as `alt` and `fixed`.
    pub ctrl: bool,
}

/// Outcome of feeding one pointer event to the gesture.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Transition {
    pub event: Option<AddStitchData>,
    pub clear_hint: bool,
}

impl Transition {
    fn none() -> Self {
        Self::default()
    }

    fn clear() -> Self {
        Self {
            event: None,
            clear_hint: true,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Gesture {
    state: GestureState,
}

impl Gesture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> GestureState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, GestureState::Dragging { .. })
    }

    /// Primary button pressed at world `point`.
    pub fn pointer_down(&mut self, point: Point, inside: bool, mods: Modifiers) -> Transition {
        if mods.pan || !inside {
            self.reset("pointer down with pan modifier or outside the fabric");
            return Transition::clear();
        }
        if self.is_dragging() {
            trace!("Pointer down ignored, gesture already in progress");
            return Transition::none();
        }

        self.state = GestureState::Dragging { start: point };
        trace!("Gesture started at ({}, {})", point.x, point.y);
        Transition {
            event: Some(add_stitch(AddStitchStage::Start, point, point, mods)),
            clear_hint: false,
        }
    }

    /// Pointer moved to world `point`.
    pub fn pointer_move(&mut self, point: Point, inside: bool, mods: Modifiers) -> Transition {
        if mods.pan {
            self.reset("pan modifier held during move");
            return Transition::clear();
        }
        match self.state {
            GestureState::Idle => Transition::clear(),
            GestureState::Dragging { start } if inside => Transition {
                event: Some(add_stitch(AddStitchStage::Continue, start, point, mods)),
                clear_hint: false,
            },
            GestureState::Dragging { .. } => Transition::none(),
        }
    }

    /// Primary button released at world `point`.
    pub fn pointer_up(&mut self, point: Point, inside: bool, mods: Modifiers) -> Transition {
        let state = std::mem::take(&mut self.state);
        match state {
            GestureState::Dragging { start } if !mods.pan => {
                trace!("Gesture ended at ({}, {})", point.x, point.y);
                Transition {
                    event: inside.then(|| add_stitch(AddStitchStage::End, start, point, mods)),
                    clear_hint: true,
                }
            }
            _ => Transition::clear(),
        }
    }

    fn reset(&mut self, reason: &str) {
        if self.is_dragging() {
            trace!("Gesture abandoned: {}", reason);
        }
        self.state = GestureState::Idle;
    }
}

fn add_stitch(stage: AddStitchStage, start: Point, end: Point, mods: Modifiers) -> AddStitchData {
    AddStitchData {
        stage,
        start,
        end,
        alt: mods.ctrl,
        fixed: mods.ctrl,
    }
}
