//! # StitchKit Canvas
//!
//! Interactive surface for a pattern view: viewport zoom and pan, the
//! stitch placement gesture, removal requests and stitch hints.
//!
//! The canvas never edits the pattern itself. It reports what the user did
//! as [`stitchkit_core::CanvasEvent`]s through a [`CanvasEventSink`].

pub mod canvas;
pub mod error;
pub mod gesture;
pub mod viewport;

pub use canvas::{CanvasEventSink, PatternCanvas, PointerInput};
pub use error::{CanvasError, CanvasResult};
pub use gesture::{Gesture, GestureState, Modifiers, Transition};
pub use viewport::Viewport;
