// astro-report-service/src/pdf/fonts.rs
//
// Font registration and per-string script switching. The Devanagari
// font binary is read from storage once per process and cached; each
// document registers its own font refs from the cached bytes.

use printpdf::{BuiltinFont, IndirectFontRef, PdfDocumentReference};
use std::io::Cursor;
use std::sync::OnceLock;

use crate::error::{ReportError, Result};
use crate::locale::is_devanagari;

static DEVANAGARI_BYTES: OnceLock<Vec<u8>> = OnceLock::new();

/// Loads the Devanagari TTF once per process. Subsequent calls return
/// the cached bytes without touching storage.
pub fn devanagari_font_bytes(path: &str) -> Result<&'static [u8]> {
    if let Some(bytes) = DEVANAGARI_BYTES.get() {
        return Ok(bytes);
    }
    let bytes = std::fs::read(path)
        .map_err(|e| ReportError::FontUnavailable(format!("{path}: {e}")))?;
    Ok(DEVANAGARI_BYTES.get_or_init(|| bytes))
}

/// Script class of a text run. Classification is whole-string: a mixed
/// Latin/Devanagari string routes entirely to Devanagari when any code
/// point falls in U+0900..=U+097F.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontKind {
    Latin,
    Devanagari,
}

impl FontKind {
    pub fn classify(text: &str) -> Self {
        if is_devanagari(text) {
            FontKind::Devanagari
        } else {
            FontKind::Latin
        }
    }
}

/// Per-document font registry. The active face is tracked so a draw
/// call can switch for one string and restore the Latin default after.
pub struct FontBook {
    latin: IndirectFontRef,
    latin_bold: IndirectFontRef,
    devanagari: Option<IndirectFontRef>,
    active: FontKind,
    last_selected: FontKind,
}

impl FontBook {
    pub fn register(
        doc: &PdfDocumentReference,
        devanagari_bytes: Option<&[u8]>,
    ) -> Result<Self> {
        let latin = doc.add_builtin_font(BuiltinFont::Helvetica)?;
        let latin_bold = doc.add_builtin_font(BuiltinFont::HelveticaBold)?;
        let devanagari = match devanagari_bytes {
            Some(bytes) => Some(doc.add_external_font(Cursor::new(bytes.to_vec()))?),
            None => None,
        };
        Ok(Self {
            latin,
            latin_bold,
            devanagari,
            active: FontKind::Latin,
            last_selected: FontKind::Latin,
        })
    }

    /// Classifies `text` and switches the active face for this draw.
    /// Bold applies to the Latin family only; the Devanagari face has a
    /// single weight.
    pub fn select(&mut self, text: &str, bold: bool) -> &IndirectFontRef {
        self.last_selected = FontKind::classify(text);
        match (self.last_selected, &self.devanagari) {
            (FontKind::Devanagari, Some(font)) => {
                self.active = FontKind::Devanagari;
                font
            }
            _ => {
                self.active = FontKind::Latin;
                if bold {
                    &self.latin_bold
                } else {
                    &self.latin
                }
            }
        }
    }

    /// Restores the Latin default after a draw call.
    pub fn restore(&mut self) {
        self.active = FontKind::Latin;
    }

    pub fn active(&self) -> FontKind {
        self.active
    }

    /// Classification of the most recent draw, independent of whether a
    /// Devanagari face was registered.
    pub fn last_selected(&self) -> FontKind {
        self.last_selected
    }
}
