//! RGBA colors decoded from the hex strings used in pattern payloads.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ColorError;

/// An 8-bit RGBA color.
///
/// Serialized as `RRGGBB` when opaque and `RRGGBBAA` otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parses `RRGGBB` or `RRGGBBAA`, with or without a leading `#`.
    pub fn from_hex(value: &str) -> Result<Self, ColorError> {
        let digits = value.trim().trim_start_matches('#');
        if digits.len() != 6 && digits.len() != 8 {
            return Err(ColorError::InvalidLength {
                value: value.to_string(),
                length: digits.len(),
            });
        }

        let channel = |i: usize| {
            digits
                .get(i..i + 2)
                .and_then(|pair| u8::from_str_radix(pair, 16).ok())
                .ok_or_else(|| ColorError::InvalidDigit {
                    value: value.to_string(),
                })
        };

        let a = if digits.len() == 8 { channel(6)? } else { 255 };
        Ok(Self::rgba(channel(0)?, channel(2)?, channel(4)?, a))
    }

    /// Formats as uppercase hex without a leading `#`.
    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            format!("{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
        }
    }

    /// Packs the color as `0xRRGGBBAA`.
    pub fn to_u32(&self) -> u32 {
        u32::from_be_bytes([self.r, self.g, self.b, self.a])
    }

    /// Channel-wise multiplication, used for tinting white shapes.
    pub fn multiply(&self, other: Color) -> Color {
        let mul = |a: u8, b: u8| ((a as u16 * b as u16 + 127) / 255) as u8;
        Color::rgba(
            mul(self.r, other.r),
            mul(self.g, other.g),
            mul(self.b, other.b),
            mul(self.a, other.a),
        )
    }

    /// Returns the same color with a different alpha.
    pub fn with_alpha(&self, a: u8) -> Color {
        Color { a, ..*self }
    }

    /// Perceived brightness in the 0..=255 range.
    pub fn brightness(&self) -> f32 {
        self.r as f32 * 0.299 + self.g as f32 * 0.587 + self.b as f32 * 0.114
    }

    /// Black or white, whichever reads better on top of this color.
    pub fn contrast_color(&self) -> Color {
        if self.brightness() > 128.0 {
            Color::BLACK
        } else {
            Color::WHITE
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.to_hex())
    }
}

impl FromStr for Color {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl TryFrom<String> for Color {
    type Error = ColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_hex(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}
