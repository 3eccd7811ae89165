//! Error types for the canvas crate.

use stitchkit_view::RenderError;
use thiserror::Error;

/// Errors raised by canvas operations.
#[derive(Error, Debug)]
pub enum CanvasError {
    /// Attaching a view, drawing a hint or rasterizing failed
    #[error("Render error: {0}")]
    Render(#[from] RenderError),
}

/// Result type for canvas operations
pub type CanvasResult<T> = std::result::Result<T, CanvasError>;
