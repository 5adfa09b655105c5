//! Embedded TrueType face for text the base-14 Helvetica cannot encode
//! (donor names in Telugu and other non-Latin scripts).
//!
//! One face serves the whole process. It is either installed explicitly from
//! the configured path or found among the usual system font locations on
//! first use.

use std::fmt;
use std::fs;
use std::path::Path;
use std::sync::{Arc, OnceLock};

use ab_glyph::{Font, FontArc};

use super::error::{DocumentError, DocumentResult};
use super::metrics::MM_PER_PT;

/// Searched in order when no font is configured: Telugu faces first, then a
/// broad-coverage sans for other scripts.
pub const SYSTEM_FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/noto/NotoSansTelugu-Regular.ttf",
    "/usr/share/fonts/noto/NotoSansTelugu-Regular.ttf",
    "/usr/share/fonts/google-noto/NotoSansTelugu-Regular.ttf",
    "/usr/share/fonts/truetype/lohit-telugu/Lohit-Telugu.ttf",
    "/usr/share/fonts/lohit-telugu/Lohit-Telugu.ttf",
    "C:\\Windows\\Fonts\\gautami.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu-sans-fonts/DejaVuSans.ttf",
];

static UNICODE_FONT: OnceLock<Option<UnicodeFont>> = OnceLock::new();

#[derive(Clone)]
pub struct UnicodeFont {
    name: String,
    bytes: Arc<Vec<u8>>,
    face: FontArc,
}

impl fmt::Debug for UnicodeFont {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UnicodeFont")
            .field("name", &self.name)
            .field("bytes", &self.bytes.len())
            .finish()
    }
}

impl UnicodeFont {
    pub fn from_bytes(name: impl Into<String>, bytes: Vec<u8>) -> DocumentResult<Self> {
        let name = name.into();
        let face = FontArc::try_from_vec(bytes.clone())
            .map_err(|e| DocumentError::Font(format!("{}: {}", name, e)))?;
        Ok(UnicodeFont {
            name,
            bytes: Arc::new(bytes),
            face,
        })
    }

    pub fn load(path: &Path) -> DocumentResult<Self> {
        let bytes = fs::read(path)?;
        Self::from_bytes(path.display().to_string(), bytes)
    }

    /// First readable face among [`SYSTEM_FONT_CANDIDATES`].
    pub fn discover() -> Option<Self> {
        SYSTEM_FONT_CANDIDATES
            .iter()
            .map(Path::new)
            .filter(|path| path.is_file())
            .find_map(|path| match Self::load(path) {
                Ok(font) => {
                    tracing::debug!(font = %path.display(), "using system unicode font");
                    Some(font)
                }
                Err(e) => {
                    tracing::debug!(font = %path.display(), error = %e, "skipping unreadable font");
                    None
                }
            })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Raw font program, embedded as-is into the PDF.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn covers(&self, ch: char) -> bool {
        self.face.glyph_id(ch).0 != 0
    }

    /// Width in millimetres at `size_pt`. Characters without a glyph are not
    /// drawn and take no space.
    pub fn text_width(&self, text: &str, size_pt: f32) -> f32 {
        let units_per_em = self.face.units_per_em().unwrap_or(1000.0);
        let units: f32 = text
            .chars()
            .map(|c| self.face.glyph_id(c))
            .filter(|id| id.0 != 0)
            .map(|id| self.face.h_advance_unscaled(id))
            .sum();
        units / units_per_em * size_pt * MM_PER_PT
    }
}

/// Makes `font` the process-wide face. Returns `false` when one is already in
/// place, installed earlier or found by discovery.
pub fn install_unicode_font(font: UnicodeFont) -> bool {
    UNICODE_FONT.set(Some(font)).is_ok()
}

pub fn unicode_font() -> Option<&'static UnicodeFont> {
    UNICODE_FONT.get_or_init(UnicodeFont::discover).as_ref()
}
