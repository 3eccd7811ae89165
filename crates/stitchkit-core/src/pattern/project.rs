//! Decoded pattern payloads.
//!
//! A [`PatternProject`] is what the pattern-loading service hands over when a
//! pattern is opened: the pattern itself plus the display settings that go
//! with it. Decoding is plain `serde`; [`PatternProject::validate`] checks
//! the cross-references that serde cannot.

use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use super::palette::{CompletePaletteItem, Formats, PaletteItem, Symbols};
use super::stitches::{
    FullStitch, LineStitch, NodeStitch, PartStitch, SpecialStitch, SpecialStitchModel, Stitch,
};
use crate::color::Color;
use crate::error::{PatternError, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatternInfo {
    pub title: String,
    pub author: String,
    pub copyright: String,
    pub description: String,
}

impl Default for PatternInfo {
    fn default() -> Self {
        Self {
            title: "Untitled".to_string(),
            author: String::new(),
            copyright: String::new(),
            description: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Fabric {
    /// Width in stitches.
    pub width: u16,
    /// Height in stitches.
    pub height: u16,
    /// Stitches per inch, horizontally and vertically.
    pub spi: [u8; 2],
    pub kind: String,
    pub name: String,
    pub color: Color,
}

impl Default for Fabric {
    fn default() -> Self {
        Self {
            width: 100,
            height: 100,
            spi: [14, 14],
            kind: "Aida".to_string(),
            name: "White".to_string(),
            color: Color::WHITE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridLineStyle {
    pub color: Color,
    /// Line width in stitch units.
    pub thickness: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Grid {
    /// Number of cells between major lines.
    pub major_lines_interval: u16,
    pub minor_screen_lines: GridLineStyle,
    pub major_screen_lines: GridLineStyle,
}

impl Default for Grid {
    fn default() -> Self {
        Self {
            major_lines_interval: 10,
            minor_screen_lines: GridLineStyle {
                color: Color::rgb(0xC8, 0xC8, 0xC8),
                thickness: 0.072,
            },
            major_screen_lines: GridLineStyle {
                color: Color::rgb(0x64, 0x64, 0x64),
                thickness: 0.072,
            },
        }
    }
}

/// How full and part stitches are drawn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DisplayMode {
    /// Plain filled shapes.
    #[default]
    Solid,
    /// Shape outline with the thread strands.
    Stitches,
    /// Filled shapes with the strands on top.
    Mixed,
}

impl DisplayMode {
    pub const ALL: [DisplayMode; 3] = [DisplayMode::Solid, DisplayMode::Stitches, DisplayMode::Mixed];
}

impl std::fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DisplayMode::Solid => write!(f, "solid"),
            DisplayMode::Stitches => write!(f, "stitches"),
            DisplayMode::Mixed => write!(f, "mixed"),
        }
    }
}

impl std::str::FromStr for DisplayMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "solid" => Ok(DisplayMode::Solid),
            "stitches" => Ok(DisplayMode::Stitches),
            "mixed" => Ok(DisplayMode::Mixed),
            other => Err(format!("Unknown display mode: {other}")),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    /// Falls back to the application's render settings when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_symbol_font: Option<String>,
    pub symbols: Vec<Symbols>,
    pub formats: Vec<Formats>,
    pub grid: Grid,
    /// Falls back to the application's render settings when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_mode: Option<DisplayMode>,
    pub show_symbols: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Pattern {
    pub info: PatternInfo,
    pub fabric: Fabric,
    pub palette: Vec<PaletteItem>,
    pub fullstitches: Vec<FullStitch>,
    pub partstitches: Vec<PartStitch>,
    pub linestitches: Vec<LineStitch>,
    pub nodestitches: Vec<NodeStitch>,
    pub specialstitches: Vec<SpecialStitch>,
    pub special_stitch_models: Vec<SpecialStitchModel>,
}

impl Pattern {
    /// Every individually addressable stitch, special stitches excluded.
    pub fn stitches(&self) -> impl Iterator<Item = Stitch> + '_ {
        self.fullstitches
            .iter()
            .copied()
            .map(Stitch::from)
            .chain(self.partstitches.iter().copied().map(Stitch::from))
            .chain(self.linestitches.iter().copied().map(Stitch::from))
            .chain(self.nodestitches.iter().copied().map(Stitch::from))
    }

    pub fn stitch_count(&self) -> usize {
        self.fullstitches.len()
            + self.partstitches.len()
            + self.linestitches.len()
            + self.nodestitches.len()
            + self.specialstitches.len()
    }
}

/// The payload of an opened pattern.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PatternProject {
    /// Opaque key the backend uses to address the pattern.
    #[serde(default)]
    pub key: String,
    pub pattern: Pattern,
    #[serde(default)]
    pub display_settings: DisplaySettings,
}

impl PatternProject {
    /// Decodes and validates a project from JSON text.
    pub fn from_json(json: &str) -> Result<Self> {
        let project: PatternProject = serde_json::from_str(json)?;
        project.validate()?;
        info!(
            "Loaded pattern '{}' ({} stitches, {} palette items)",
            project.pattern.info.title,
            project.pattern.stitch_count(),
            project.pattern.palette.len()
        );
        Ok(project)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let project: PatternProject = serde_json::from_reader(reader)?;
        project.validate()?;
        Ok(project)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Checks palette and model references, coordinates and display settings.
    ///
    /// Missing symbols or formats are tolerated (defaults are used), but
    /// more entries than palette items indicate a desynchronized payload.
    pub fn validate(&self) -> std::result::Result<(), PatternError> {
        let pattern = &self.pattern;
        let palette_len = pattern.palette.len();
        let Fabric { width, height, .. } = pattern.fabric;

        for stitch in pattern.stitches() {
            stitch.validate_coords()?;
            stitch.validate_bounds(width, height)?;
            check_palindex(stitch.palindex(), palette_len)?;
        }

        for special in &pattern.specialstitches {
            if special.x.is_nan() || special.y.is_nan() {
                return Err(PatternError::NanCoordinate);
            }
            check_palindex(special.palindex, palette_len)?;
            if special.modindex as usize >= pattern.special_stitch_models.len() {
                return Err(PatternError::ModelIndexOutOfRange {
                    modindex: special.modindex,
                    models_len: pattern.special_stitch_models.len(),
                });
            }
        }

        let display = &self.display_settings;
        for (what, found) in [("symbols", display.symbols.len()), ("formats", display.formats.len())] {
            if found > palette_len {
                return Err(PatternError::DisplaySettingsMismatch {
                    what,
                    found,
                    expected: palette_len,
                });
            }
        }

        Ok(())
    }

    /// Merges each palette item with its symbols and formats.
    pub fn complete_palette(&self) -> Vec<CompletePaletteItem> {
        let display = &self.display_settings;
        self.pattern
            .palette
            .iter()
            .enumerate()
            .map(|(idx, palitem)| {
                CompletePaletteItem::new(
                    palitem.clone(),
                    display.symbols.get(idx).cloned().unwrap_or_default(),
                    display.formats.get(idx).cloned().unwrap_or_default(),
                )
            })
            .collect()
    }
}

fn check_palindex(palindex: u32, palette_len: usize) -> std::result::Result<(), PatternError> {
    if palindex as usize >= palette_len {
        return Err(PatternError::PaletteIndexOutOfRange {
            palindex,
            palette_len,
        });
    }
    Ok(())
}
