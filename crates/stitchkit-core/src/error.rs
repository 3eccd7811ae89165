//! Error handling for StitchKit core
//!
//! Provides the error types raised while decoding pattern data:
//! - Color errors (hex parsing)
//! - Pattern errors (payload decoding and validation)
//!
//! All error types use `thiserror` for ergonomic error handling.
//!
//! Lookup misses on stitches the caller knows to exist are NOT represented
//! here. They indicate desynchronized state and panic at the call site.

use thiserror::Error;

/// Color error type
///
/// Raised when a palette, fabric or grid color string cannot be decoded.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ColorError {
    /// The string has a length other than 6 or 8 hex digits
    #[error("Invalid color length {length} in '{value}' (expected 6 or 8 hex digits)")]
    InvalidLength {
        /// The offending input.
        value: String,
        /// Number of hex digits found.
        length: usize,
    },

    /// The string contains a non hexadecimal character
    #[error("Invalid hex digit in color '{value}'")]
    InvalidDigit {
        /// The offending input.
        value: String,
    },
}

/// Pattern error type
///
/// Represents errors in a decoded pattern payload.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PatternError {
    /// A stitch references a palette entry that does not exist
    #[error("Stitch references palette index {palindex}, but the palette has {palette_len} items")]
    PaletteIndexOutOfRange {
        /// The referenced index.
        palindex: u32,
        /// The palette size.
        palette_len: usize,
    },

    /// A special stitch references a model that does not exist
    #[error("Special stitch references model {modindex}, but only {models_len} models exist")]
    ModelIndexOutOfRange {
        /// The referenced model index.
        modindex: u32,
        /// The number of known models.
        models_len: usize,
    },

    /// A stitch lies outside the fabric
    #[error("Stitch at ({x}, {y}) lies outside the {width}x{height} fabric")]
    OutOfFabric {
        /// Stitch X coordinate.
        x: f32,
        /// Stitch Y coordinate.
        y: f32,
        /// Fabric width.
        width: u16,
        /// Fabric height.
        height: u16,
    },

    /// Display settings do not cover every palette item
    #[error("Display settings define {found} {what} entries for {expected} palette items")]
    DisplaySettingsMismatch {
        /// Which list is short ("symbols" or "formats").
        what: &'static str,
        /// Entries found.
        found: usize,
        /// Palette size.
        expected: usize,
    },

    /// A coordinate is NaN
    #[error("Stitch coordinate is not a number")]
    NanCoordinate,
}

/// Main error type for StitchKit core operations
#[derive(Error, Debug)]
pub enum CoreError {
    /// Color decoding error
    #[error("Color error: {0}")]
    Color(#[from] ColorError),

    /// Pattern validation error
    #[error("Pattern error: {0}")]
    Pattern(#[from] PatternError),

    /// Payload decoding error
    #[error("Payload decoding error: {0}")]
    Decode(#[from] serde_json::Error),

    /// I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for StitchKit core operations
pub type Result<T> = std::result::Result<T, CoreError>;
