//! Palette items and their per-index display settings.

use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use super::stitches::StitchKind;
use crate::color::Color;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Blend {
    pub brand: String,
    pub number: String,
}

/// Bead geometry in millimeters.
///
/// Used as a texture cache key, so it hashes structurally like stitches do.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bead {
    pub length: f32,
    pub diameter: f32,
}

impl Default for Bead {
    fn default() -> Self {
        Self {
            length: 2.5,
            diameter: 1.5,
        }
    }
}

impl Eq for Bead {}

impl Hash for Bead {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for value in [self.length, self.diameter] {
            let value = if value == 0.0 { 0.0 } else { value };
            value.to_bits().hash(state);
        }
    }
}

/// A symbol assigned directly to a palette item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Symbol {
    Code(u16),
    Char(String),
}

impl Symbol {
    pub fn as_char(&self) -> Option<char> {
        match self {
            Symbol::Code(code) => char::from_u32(u32::from(*code)),
            Symbol::Char(s) => s.chars().next(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaletteItem {
    pub brand: String,
    pub number: String,
    #[serde(default)]
    pub name: String,
    pub color: Color,
    #[serde(default)]
    pub blends: Option<Vec<Blend>>,
    #[serde(default)]
    pub bead: Option<Bead>,
    #[serde(default)]
    pub symbol_font: Option<String>,
    #[serde(default)]
    pub symbol: Option<Symbol>,
}

/// Per-kind glyph codes for one palette item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Symbols {
    pub full: Option<u16>,
    pub petite: Option<u16>,
    pub half: Option<u16>,
    pub quarter: Option<u16>,
    pub french_knot: Option<u16>,
    pub bead: Option<u16>,
}

impl Symbols {
    /// The glyph for `kind`, falling back to the full stitch glyph.
    pub fn get(&self, kind: StitchKind) -> Option<char> {
        let code = match kind {
            StitchKind::Full => self.full,
            StitchKind::Petite => self.petite,
            StitchKind::Half => self.half,
            StitchKind::Quarter => self.quarter,
            StitchKind::FrenchKnot => self.french_knot,
            StitchKind::Bead => self.bead,
        };
        code.or(self.full).and_then(|c| char::from_u32(u32::from(c)))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LineStitchStyle {
    #[default]
    Solid,
    Barred,
    Dotted,
    ChainDotted,
    Dashed,
    Outlined,
    Zebra,
    ZigZag,
    Morse,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SymbolFormat {
    pub use_alt_bg_color: bool,
    pub bg_color: Color,
    pub fg_color: Color,
}

impl Default for SymbolFormat {
    fn default() -> Self {
        Self {
            use_alt_bg_color: false,
            bg_color: Color::WHITE,
            fg_color: Color::BLACK,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineStitchFormat {
    pub use_alt_color: bool,
    pub color: Color,
    pub style: LineStitchStyle,
    pub thickness: f32,
}

impl Default for LineStitchFormat {
    fn default() -> Self {
        Self {
            use_alt_color: false,
            color: Color::BLACK,
            style: LineStitchStyle::Solid,
            thickness: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeStitchFormat {
    pub use_dot_style: bool,
    pub use_alt_color: bool,
    pub color: Color,
    pub thickness: f32,
}

impl Default for NodeStitchFormat {
    fn default() -> Self {
        Self {
            use_dot_style: true,
            use_alt_color: false,
            color: Color::BLACK,
            thickness: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontFormat {
    pub font_name: Option<String>,
    pub bold: bool,
    pub italic: bool,
    /// Glyph size in percent of a full cell.
    pub stitch_size: u8,
    /// Glyph size in percent of a half cell.
    pub small_stitch_size: u8,
}

impl Default for FontFormat {
    fn default() -> Self {
        Self {
            font_name: None,
            bold: false,
            italic: false,
            stitch_size: 100,
            small_stitch_size: 60,
        }
    }
}

/// Per-kind rendering overrides for one palette item.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Formats {
    pub symbol: SymbolFormat,
    pub backstitch: LineStitchFormat,
    pub straightstitch: LineStitchFormat,
    pub french_knot: NodeStitchFormat,
    pub bead: NodeStitchFormat,
    pub specialstitch: LineStitchFormat,
    pub font: FontFormat,
}

/// A palette item merged with its symbols and formats. Read-only.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletePaletteItem {
    palitem: PaletteItem,
    symbols: Symbols,
    formats: Formats,
}

impl CompletePaletteItem {
    pub fn new(palitem: PaletteItem, symbols: Symbols, formats: Formats) -> Self {
        Self {
            palitem,
            symbols,
            formats,
        }
    }

    pub fn brand(&self) -> &str {
        &self.palitem.brand
    }

    pub fn number(&self) -> &str {
        &self.palitem.number
    }

    pub fn name(&self) -> &str {
        &self.palitem.name
    }

    pub fn color(&self) -> Color {
        self.palitem.color
    }

    pub fn blends(&self) -> Option<&[Blend]> {
        self.palitem.blends.as_deref()
    }

    pub fn bead(&self) -> Option<&Bead> {
        self.palitem.bead.as_ref()
    }

    pub fn palitem(&self) -> &PaletteItem {
        &self.palitem
    }

    pub fn symbols(&self) -> &Symbols {
        &self.symbols
    }

    pub fn formats(&self) -> &Formats {
        &self.formats
    }

    /// Glyph drawn for `kind`: the per-kind symbol, then the full stitch
    /// symbol, then the palette item's own symbol.
    pub fn symbol_for(&self, kind: StitchKind) -> Option<char> {
        self.symbols
            .get(kind)
            .or_else(|| self.palitem.symbol.as_ref().and_then(Symbol::as_char))
    }

    /// Font family for symbols, falling back to `default`.
    pub fn symbol_font<'a>(&'a self, default: &'a str) -> &'a str {
        self.formats
            .font
            .font_name
            .as_deref()
            .or(self.palitem.symbol_font.as_deref())
            .unwrap_or(default)
    }

    pub fn title(&self) -> String {
        palette_item_title(&self.palitem, &PaletteDisplayOptions::default())
    }
}

/// A palette item inserted at `palindex`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddedPaletteItemData {
    pub palitem: PaletteItem,
    pub palindex: u32,
    #[serde(default)]
    pub symbols: Symbols,
    #[serde(default)]
    pub formats: Formats,
}

/// Which parts of a palette item make up its title.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaletteDisplayOptions {
    pub show_brand: bool,
    pub show_number: bool,
    pub show_name: bool,
}

impl Default for PaletteDisplayOptions {
    fn default() -> Self {
        Self {
            show_brand: true,
            show_number: true,
            show_name: true,
        }
    }
}

/// Composes a title such as `DMC 310, Black` or `DMC: DMC 310, Anchor 403`.
pub fn palette_item_title(palitem: &PaletteItem, options: &PaletteDisplayOptions) -> String {
    let mut components = Vec::new();
    if options.show_brand && !palitem.brand.is_empty() {
        components.push(palitem.brand.clone());
    }

    if let Some(blends) = palitem.blends.as_ref().filter(|b| !b.is_empty()) {
        let blends = blends
            .iter()
            .map(|blend| blend_title(blend, options))
            .filter(|title| !title.is_empty())
            .collect::<Vec<_>>()
            .join(", ");
        components.push(blends);
        return components.join(": ");
    }

    if options.show_number && !palitem.number.is_empty() {
        components.push(palitem.number.clone());
    }

    // Blends have an empty name.
    if options.show_name && !palitem.name.is_empty() {
        if components.is_empty() {
            return palitem.name.clone();
        }
        return format!("{}, {}", components.join(" "), palitem.name);
    }

    components.join(" ")
}

pub fn blend_title(blend: &Blend, options: &PaletteDisplayOptions) -> String {
    let mut components = Vec::new();
    if options.show_brand {
        components.push(blend.brand.as_str());
    }
    if options.show_number {
        components.push(blend.number.as_str());
    }
    components.join(" ")
}
