//! Font resolution, fallback, and discovery
//!
//! Uses fontdb to discover and load host fonts by path or family name. The
//! resolver is an explicit value the caller constructs once and passes into
//! renders; resolved faces and discovery results are cached inside it for
//! the life of the process (the host font set is assumed static), with no
//! hidden global state.
//!
//! `resolve` is total. The chain runs, in strict order: direct file path,
//! family-name lookup, a fixed list of well-known sans-serif fonts, and
//! finally the embedded reference glyph set, which cannot fail.

use crate::builtin;
use crate::font::{FontData, FontFace, TextBounds};
use crate::shaper::TextShaper;
use crate::{Result, TextError};
use fontdb::{Database, Family, Query, Source, Stretch, Style, Weight};
use rustc_hash::{FxHashMap, FxHashSet};
use std::path::Path;
use std::sync::Arc;

/// Locator for the guaranteed "Default" discovery entry
pub const DEFAULT_LOCATOR: &str = "default";

/// Known system font paths loaded eagerly at startup
///
/// Loading these by path is fast; the full system scan is deferred until a
/// lookup actually misses.
#[cfg(target_os = "macos")]
const KNOWN_FONT_PATHS: &[&str] = &[
    "/System/Library/Fonts/SFNS.ttf",
    "/System/Library/Fonts/Helvetica.ttc",
    "/System/Library/Fonts/Times.ttc",
    "/Library/Fonts/Arial.ttf",
    "/Library/Fonts/Georgia.ttf",
];

#[cfg(target_os = "windows")]
const KNOWN_FONT_PATHS: &[&str] = &[
    "C:\\Windows\\Fonts\\segoeui.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
    "C:\\Windows\\Fonts\\times.ttf",
    "C:\\Windows\\Fonts\\verdana.ttf",
];

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
const KNOWN_FONT_PATHS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSerif.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/truetype/noto/NotoSans-Regular.ttf",
    "/usr/share/fonts/truetype/freefont/FreeSans.ttf",
];

/// Well-known general-purpose sans-serif families, tried in order when the
/// requested font cannot be loaded
const FALLBACK_FAMILIES: &[&str] = &[
    "DejaVu Sans",
    "Liberation Sans",
    "Arial",
    "Helvetica",
    "Noto Sans",
    "FreeSans",
];

/// Display names probed by name during discovery, mirroring fonts commonly
/// installed outside the scanned directories
const COMMON_DISPLAY_NAMES: &[&str] = &[
    "Arial",
    "Times New Roman",
    "Courier New",
    "Verdana",
    "Georgia",
    "Tahoma",
    "Trebuchet MS",
    "Impact",
    "Comic Sans MS",
];

/// One discoverable font: display name plus an opaque locator
///
/// Locators round-trip verbatim into [`FontResolver::resolve`]; callers must
/// not interpret them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontEntry {
    pub name: String,
    pub locator: String,
}

/// A scalable font bound to one concrete pixel size
#[derive(Clone)]
pub struct OutlineFont {
    face: Arc<FontFace>,
    size: f32,
}

impl OutlineFont {
    pub fn face(&self) -> &FontFace {
        &self.face
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    fn measure(&self, text: &str) -> TextBounds {
        let shaped = TextShaper::new().shape(text, &self.face);
        let scale = shaped.px_scale(self.size);
        let Some(ttf) = self.face.as_ttf_face() else {
            return TextBounds::default();
        };

        // Union of glyph ink boxes in font units, pen advancing per glyph
        let mut pen = 0i32;
        let mut units: Option<(i32, i32, i32, i32)> = None;
        for g in &shaped.glyphs {
            if let Some(bb) = ttf.glyph_bounding_box(ttf_parser::GlyphId(g.glyph_id)) {
                let x0 = pen + g.x_offset + bb.x_min as i32;
                let x1 = pen + g.x_offset + bb.x_max as i32;
                let y0 = g.y_offset + bb.y_min as i32;
                let y1 = g.y_offset + bb.y_max as i32;
                units = Some(match units {
                    None => (x0, y0, x1, y1),
                    Some((l, b, r, t)) => (l.min(x0), b.min(y0), r.max(x1), t.max(y1)),
                });
            }
            pen += g.x_advance;
        }

        let Some((min_x, min_y, max_x, max_y)) = units else {
            return TextBounds::default();
        };

        // Flip to canvas coordinates: y grows downward from the draw origin,
        // with the baseline one ascent below it
        let baseline = self.face.metrics().ascender_px(self.size).round();
        TextBounds {
            left: (min_x as f32 * scale).floor() as i32,
            top: (baseline - max_y as f32 * scale).floor() as i32,
            right: (max_x as f32 * scale).ceil() as i32,
            bottom: (baseline - min_y as f32 * scale).ceil() as i32,
        }
    }
}

impl std::fmt::Debug for OutlineFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OutlineFont")
            .field("family", &self.face.family_name())
            .field("size", &self.size)
            .finish()
    }
}

/// The builtin reference glyph set scaled to the requested size
///
/// Bounding boxes are the reference-size ink bounds multiplied by
/// `size / REFERENCE_SIZE`; nothing is re-rasterized, so edges get blocky at
/// large sizes but dimensions stay predictable.
#[derive(Debug, Clone, Copy)]
pub struct ScaledFont {
    scale: f32,
}

impl ScaledFont {
    pub fn scale(&self) -> f32 {
        self.scale
    }

    fn measure(&self, text: &str) -> TextBounds {
        let Some((l, t, r, b)) = builtin::ink_bounds(text) else {
            return TextBounds::default();
        };
        TextBounds {
            left: (l as f32 * self.scale).floor() as i32,
            top: (t as f32 * self.scale).floor() as i32,
            right: (r as f32 * self.scale).ceil() as i32,
            bottom: (b as f32 * self.scale).ceil() as i32,
        }
    }
}

/// A resolved, renderable font
///
/// All fallback decisions happen before a handle is handed out; the handle
/// answers bounding-box queries for any string with no further lookups.
#[derive(Debug, Clone)]
pub enum FontHandle {
    /// A host font rendered through the outline rasterizer
    Outline(OutlineFont),
    /// The builtin glyph set with scaled metrics
    Scaled(ScaledFont),
}

impl FontHandle {
    /// Tight ink bounds of `text`, relative to the draw origin
    pub fn measure(&self, text: &str) -> TextBounds {
        match self {
            FontHandle::Outline(font) => font.measure(text),
            FontHandle::Scaled(font) => font.measure(text),
        }
    }
}

/// Font resolver with a fontdb database and per-locator face cache
pub struct FontResolver {
    db: Database,
    /// Resolved faces by locator; `None` records a failed lookup so the
    /// chain is not re-run for the same miss
    faces: FxHashMap<String, Option<Arc<FontFace>>>,
    system_fonts_loaded: bool,
    /// Whether the fallback chain may touch host font paths; off for
    /// resolvers over a prepared database, which are hermetic
    probe_host_paths: bool,
    discovered: Option<Vec<FontEntry>>,
}

impl FontResolver {
    /// Create a resolver, eagerly loading only the known font paths
    pub fn new() -> Self {
        let mut db = Database::new();
        let mut loaded = 0;
        for path in KNOWN_FONT_PATHS {
            if Path::new(path).exists() && db.load_font_file(path).is_ok() {
                loaded += 1;
            }
        }
        tracing::debug!(loaded, "seeded font database with known paths");

        Self {
            db,
            faces: FxHashMap::default(),
            system_fonts_loaded: false,
            probe_host_paths: true,
            discovered: None,
        }
    }

    /// Create a resolver over a prepared database, never touching host fonts
    ///
    /// An empty database forces every lookup down to the builtin fallback,
    /// which is how the fallback path is tested deterministically.
    pub fn with_database(db: Database) -> Self {
        Self {
            db,
            faces: FxHashMap::default(),
            system_fonts_loaded: true,
            probe_host_paths: false,
            discovered: None,
        }
    }

    /// Resolve a locator to a renderable font at `point_size`
    ///
    /// Never fails: when every lookup step misses, the builtin glyph set is
    /// returned. Point sizes below 10 are floored to 10 first.
    pub fn resolve(&mut self, locator: &str, point_size: u32) -> FontHandle {
        let size = point_size.max(10) as f32;

        if let Some(face) = self.lookup(locator) {
            return FontHandle::Outline(OutlineFont { face, size });
        }

        tracing::warn!(locator, "no loadable font found, using builtin glyph set");
        FontHandle::Scaled(ScaledFont {
            scale: size / builtin::REFERENCE_SIZE,
        })
    }

    /// Run the lookup chain for a locator, consulting the cache first
    fn lookup(&mut self, locator: &str) -> Option<Arc<FontFace>> {
        if let Some(cached) = self.faces.get(locator) {
            return cached.clone();
        }

        let result = self
            .load_direct_path(locator)
            .or_else(|| self.load_by_family(locator))
            .or_else(|| self.fallback_face());

        self.faces.insert(locator.to_string(), result.clone());
        result
    }

    /// Step 1: the locator is a path to a font file on disk
    fn load_direct_path(&mut self, locator: &str) -> Option<Arc<FontFace>> {
        if !self.probe_host_paths {
            return None;
        }
        let path = Path::new(locator);
        let is_font_file = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| matches!(e.to_ascii_lowercase().as_str(), "ttf" | "otf" | "ttc"));
        if !is_font_file || !path.is_file() {
            return None;
        }
        match FontFace::from_file(path) {
            Ok(face) => Some(Arc::new(face)),
            Err(e) => {
                tracing::debug!(locator, error = %e, "direct font path failed to load");
                None
            }
        }
    }

    /// Step 2: the locator is a family name known to the database
    fn load_by_family(&mut self, locator: &str) -> Option<Arc<FontFace>> {
        let id = self.find_face_id(locator)?;
        match self.load_face_by_id(id) {
            Ok(face) => Some(Arc::new(face)),
            Err(e) => {
                tracing::debug!(locator, error = %e, "family lookup failed to load");
                None
            }
        }
    }

    /// Step 3: fixed list of well-known sans-serif fonts, names then paths
    ///
    /// Cached under its own key since the result is locator-independent.
    fn fallback_face(&mut self) -> Option<Arc<FontFace>> {
        const CACHE_KEY: &str = "__fallback";
        if let Some(cached) = self.faces.get(CACHE_KEY) {
            return cached.clone();
        }

        let mut result = None;
        for family in FALLBACK_FAMILIES {
            if let Some(face) = self
                .find_face_id(family)
                .and_then(|id| self.load_face_by_id(id).ok())
            {
                tracing::debug!(%family, "fell back to well-known font");
                result = Some(Arc::new(face));
                break;
            }
        }
        if result.is_none() && self.probe_host_paths {
            for path in KNOWN_FONT_PATHS {
                if let Ok(face) = FontFace::from_file(Path::new(path)) {
                    tracing::debug!(%path, "fell back to well-known font path");
                    result = Some(Arc::new(face));
                    break;
                }
            }
        }

        self.faces.insert(CACHE_KEY.to_string(), result.clone());
        result
    }

    fn find_face_id(&mut self, family: &str) -> Option<fontdb::ID> {
        let query = Query {
            families: &[Family::Name(family)],
            weight: Weight::NORMAL,
            stretch: Stretch::Normal,
            style: Style::Normal,
        };
        if let Some(id) = self.db.query(&query) {
            return Some(id);
        }
        if !self.system_fonts_loaded {
            self.ensure_system_fonts_loaded();
            return self.db.query(&query);
        }
        None
    }

    /// Scan all system font directories, once
    fn ensure_system_fonts_loaded(&mut self) {
        if self.system_fonts_loaded {
            return;
        }
        tracing::debug!("scanning system fonts");
        self.db.load_system_fonts();
        self.system_fonts_loaded = true;
        tracing::debug!(faces = self.db.faces().count(), "system font scan complete");
    }

    fn load_face_by_id(&mut self, id: fontdb::ID) -> Result<FontFace> {
        let (source, face_index) = self
            .db
            .face_source(id)
            .ok_or_else(|| TextError::FontLoad("face source missing from database".into()))?;

        let data = match source {
            Source::File(path) => {
                let bytes = std::fs::read(&path)
                    .map_err(|e| TextError::FontLoad(format!("{}: {e}", path.display())))?;
                FontData::from_vec(bytes)
            }
            Source::Binary(data) => FontData::from_shared(data),
            Source::SharedFile(_, data) => FontData::from_shared(data),
        };

        FontFace::from_font_data(data, face_index)
    }

    /// Enumerate selectable fonts for a chooser UI
    ///
    /// Walks the database (triggering the full system scan), probes a list
    /// of common display names, dedups by display name with the first
    /// occurrence winning, appends the guaranteed `Default` entry, and sorts
    /// case-insensitively. The result is computed once per resolver.
    pub fn discover(&mut self) -> Vec<FontEntry> {
        if let Some(entries) = &self.discovered {
            return entries.clone();
        }

        self.ensure_system_fonts_loaded();

        let mut entries = Vec::new();
        for face in self.db.faces() {
            let Some((family, _)) = face.families.first() else {
                continue;
            };
            let locator = match &face.source {
                Source::File(path) | Source::SharedFile(path, _) => {
                    path.to_string_lossy().into_owned()
                }
                Source::Binary(_) => family.clone(),
            };
            entries.push(FontEntry {
                name: family.clone(),
                locator,
            });
        }

        for name in COMMON_DISPLAY_NAMES {
            if self.find_face_id(name).is_some() {
                entries.push(FontEntry {
                    name: (*name).to_string(),
                    locator: (*name).to_string(),
                });
            }
        }

        entries.push(FontEntry {
            name: "Default".to_string(),
            locator: DEFAULT_LOCATOR.to_string(),
        });

        let mut seen = FxHashSet::default();
        entries.retain(|e| seen.insert(e.name.clone()));
        entries.sort_by_key(|e| e.name.to_lowercase());

        self.discovered = Some(entries.clone());
        entries
    }
}

impl Default for FontResolver {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_resolver() -> FontResolver {
        FontResolver::with_database(Database::new())
    }

    #[test]
    fn resolve_is_total_for_any_input() {
        let mut resolver = empty_resolver();
        for locator in ["", "definitely-not-a-font", "🤷", "/no/such/file.ttf", "default"] {
            for size in [1, 10, 72, 500] {
                let handle = resolver.resolve(locator, size);
                // With an empty database only the builtin fallback remains
                assert!(matches!(handle, FontHandle::Scaled(_)));
                assert!(!handle.measure("X").is_empty());
            }
        }
    }

    #[test]
    fn point_size_is_floored_to_ten() {
        let mut resolver = empty_resolver();
        for size in [1, 5, 9] {
            let FontHandle::Scaled(font) = resolver.resolve("nope", size) else {
                panic!("expected builtin fallback");
            };
            assert_eq!(font.scale(), 10.0 / builtin::REFERENCE_SIZE);
        }
        let FontHandle::Scaled(font) = resolver.resolve("nope", 32) else {
            panic!("expected builtin fallback");
        };
        assert_eq!(font.scale(), 2.0);
    }

    #[test]
    fn scaled_bounds_grow_with_size() {
        let mut resolver = empty_resolver();
        let small = resolver.resolve("x", 16).measure("AB");
        let large = resolver.resolve("x", 64).measure("AB");
        assert_eq!(large.width(), small.width() * 4);
        assert_eq!(large.height(), small.height() * 4);
    }

    #[test]
    fn empty_text_measures_empty() {
        let mut resolver = empty_resolver();
        let handle = resolver.resolve("x", 72);
        assert_eq!(handle.measure(""), TextBounds::default());
        assert_eq!(handle.measure("   "), TextBounds::default());
    }

    #[test]
    fn discovery_has_default_entry_and_is_sorted() {
        let mut resolver = empty_resolver();
        let entries = resolver.discover();

        assert!(entries
            .iter()
            .any(|e| e.name == "Default" && e.locator == DEFAULT_LOCATOR));

        let mut names: Vec<String> = entries.iter().map(|e| e.name.to_lowercase()).collect();
        let sorted = {
            let mut s = names.clone();
            s.sort();
            s
        };
        assert_eq!(names, sorted);

        names.dedup();
        assert_eq!(names.len(), entries.len(), "display names must be unique");
    }

    #[test]
    fn discovery_against_host_fonts() {
        // Host-dependent: just exercise the scan and print what it found
        let mut resolver = FontResolver::new();
        let entries = resolver.discover();
        println!("discovered {} fonts", entries.len());
        assert!(!entries.is_empty(), "at minimum the Default entry exists");
        // Second call must come from the cache and agree
        assert_eq!(resolver.discover(), entries);
    }

    #[test]
    fn host_font_resolution_if_available() {
        let mut resolver = FontResolver::new();
        match resolver.resolve("DejaVu Sans", 24) {
            FontHandle::Outline(font) => {
                println!("resolved host font: {}", font.face().family_name());
                assert!(!font.measure("Ag").is_empty());
            }
            FontHandle::Scaled(_) => {
                println!("no host fonts available, builtin fallback used");
            }
        }
    }
}
