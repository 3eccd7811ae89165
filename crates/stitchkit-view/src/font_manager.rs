//! Symbol font lookup.
//!
//! Symbol fonts are resolved through a `fontdb` database of system fonts,
//! plus any font data registered explicitly. Loaded faces are cached per
//! family and style; a family that cannot be found falls back to the
//! generic sans-serif face and is reported once.

use fontdb::{Database, Family, Query, Source, Stretch, Style, Weight};
use rusttype::Font;
use std::{
    collections::{HashMap, HashSet},
    fs,
};
use tracing::{debug, warn};

#[derive(Debug, Clone, Eq, PartialEq, Hash)]
struct FontKey {
    family: String,
    bold: bool,
    italic: bool,
}

pub struct FontManager {
    db: Database,
    system_loaded: bool,
    cache: HashMap<FontKey, Option<Font<'static>>>,
    reported: HashSet<String>,
}

impl std::fmt::Debug for FontManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontManager")
            .field("faces", &self.db.len())
            .field("system_loaded", &self.system_loaded)
            .field("cached", &self.cache.len())
            .finish()
    }
}

impl Default for FontManager {
    fn default() -> Self {
        Self::new()
    }
}

impl FontManager {
    /// Creates a manager that loads system fonts on first lookup.
    pub fn new() -> Self {
        Self {
            db: Database::new(),
            system_loaded: false,
            cache: HashMap::new(),
            reported: HashSet::new(),
        }
    }

    /// Creates a manager that only knows explicitly registered fonts.
    pub fn without_system_fonts() -> Self {
        Self {
            system_loaded: true,
            ..Self::new()
        }
    }

    /// Registers a TTF/OTF font from memory.
    pub fn register_font_data(&mut self, data: Vec<u8>) {
        self.db.load_font_data(data);
        self.cache.clear();
    }

    pub fn list_font_families(&mut self) -> Vec<String> {
        self.ensure_system_fonts();
        let mut set = HashSet::new();
        for face in self.db.faces() {
            for (name, _) in &face.families {
                set.insert(name.clone());
            }
        }
        let mut out: Vec<_> = set.into_iter().collect();
        out.sort();
        out
    }

    /// The face for `family`, or the sans-serif fallback. `None` when no
    /// font at all is available.
    pub fn resolve(&mut self, family: &str, bold: bool, italic: bool) -> Option<&Font<'static>> {
        self.ensure_system_fonts();
        let key = FontKey {
            family: family.to_string(),
            bold,
            italic,
        };

        if !self.cache.contains_key(&key) {
            let font = match load_font(&self.db, family, bold, italic) {
                Some(font) => Some(font),
                None => {
                    if self.reported.insert(family.to_string()) {
                        warn!("Symbol font '{}' not found, falling back to sans-serif", family);
                    }
                    load_font(&self.db, "", bold, italic)
                }
            };
            self.cache.insert(key.clone(), font);
        }

        self.cache.get(&key).and_then(Option::as_ref)
    }

    fn ensure_system_fonts(&mut self) {
        if !self.system_loaded {
            self.db.load_system_fonts();
            self.system_loaded = true;
            debug!("Loaded {} system font faces", self.db.len());
        }
    }
}

fn load_font(db: &Database, family: &str, bold: bool, italic: bool) -> Option<Font<'static>> {
    let families: Vec<Family<'_>> = match family.trim() {
        "" | "Sans" => vec![Family::SansSerif],
        "Serif" => vec![Family::Serif],
        "Monospace" => vec![Family::Monospace],
        other => vec![Family::Name(other)],
    };

    let query = Query {
        families: &families,
        weight: if bold { Weight::BOLD } else { Weight::NORMAL },
        stretch: Stretch::Normal,
        style: if italic { Style::Italic } else { Style::Normal },
    };

    let id = db.query(&query)?;
    let face = db.face(id)?;

    match &face.source {
        Source::File(path) | Source::SharedFile(path, _) => {
            let bytes = fs::read(path).ok()?;
            Font::try_from_vec_and_index(bytes, face.index)
        }
        Source::Binary(bytes) => {
            Font::try_from_vec_and_index(bytes.as_ref().as_ref().to_vec(), face.index)
        }
    }
}
