//! Unit conversions.

/// CSS pixels per inch.
pub const PIXELS_PER_INCH: f32 = 96.0;

/// Millimeters per inch.
pub const MM_PER_INCH: f32 = 25.4;

/// Converts millimeters to pixels at 96 DPI.
pub fn mm_to_px(mm: f32) -> f32 {
    mm * PIXELS_PER_INCH / MM_PER_INCH
}

/// Converts pixels at 96 DPI to millimeters.
pub fn px_to_mm(px: f32) -> f32 {
    px * MM_PER_INCH / PIXELS_PER_INCH
}
