//! Error types for the view crate.

use thiserror::Error;

/// Errors raised while producing textures or rasterizing a scene.
#[derive(Error, Debug)]
pub enum RenderError {
    /// A texture or surface with a zero or oversized dimension was requested
    #[error("Cannot allocate a {width}x{height} pixel surface")]
    Allocation {
        /// Requested width in pixels.
        width: u32,
        /// Requested height in pixels.
        height: u32,
    },

    /// A scene node references a texture that was already destroyed
    #[error("Texture {0} is no longer alive")]
    DeadTexture(String),

    /// Encoding or writing the output image failed
    #[error("Image export error: {0}")]
    Export(#[from] image::ImageError),

    /// I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for view operations
pub type Result<T> = std::result::Result<T, RenderError>;
