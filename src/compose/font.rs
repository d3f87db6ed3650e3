//! Caption font resolution.
//!
//! Two-step resolution: try the configured TTF/OTF path, fall back to the
//! built-in Spleen 12x24 bitmap face. The fallback is never silent: the
//! returned [`FontSource`] records what actually happened so callers can
//! log it.

use std::fs;
use std::path::{Path, PathBuf};

use ab_glyph::FontArc;
use spleen_font::{FONT_12X24, PSF2Font};

use crate::error::QrCardError;

/// Cell width of the built-in bitmap face.
pub const BITMAP_CHAR_WIDTH: u32 = 12;
/// Cell height of the built-in bitmap face.
pub const BITMAP_CHAR_HEIGHT: u32 = 24;

/// Where the caption font actually came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FontSource {
    /// The configured font file loaded successfully
    Custom(PathBuf),
    /// The configured font file was missing or unparseable; the built-in
    /// face was used instead
    Fallback {
        /// The path that failed to load
        requested: PathBuf,
    },
    /// No font path was configured
    Builtin,
}

/// A font face ready for measurement and drawing.
#[derive(Clone)]
pub enum ResolvedFont {
    /// TTF/OTF face rendered at a configurable pixel size
    Truetype { font: FontArc, size: f32 },
    /// The built-in Spleen 12x24 bitmap face (fixed cell size)
    Bitmap,
}

/// Resolve the caption font.
///
/// Only fails if even the built-in face is unavailable. A requested
/// caption is never silently dropped, so that failure is fatal.
pub fn resolve(
    path: Option<&Path>,
    size: f32,
) -> Result<(ResolvedFont, FontSource), QrCardError> {
    if let Some(path) = path {
        return match load_truetype(path, size) {
            Some(face) => Ok((face, FontSource::Custom(path.to_path_buf()))),
            None => Ok((
                builtin()?,
                FontSource::Fallback {
                    requested: path.to_path_buf(),
                },
            )),
        };
    }

    Ok((builtin()?, FontSource::Builtin))
}

fn load_truetype(path: &Path, size: f32) -> Option<ResolvedFont> {
    let bytes = fs::read(path).ok()?;
    let font = FontArc::try_from_vec(bytes).ok()?;
    Some(ResolvedFont::Truetype { font, size })
}

fn builtin() -> Result<ResolvedFont, QrCardError> {
    // Probed here; drawing assumes the face loads.
    PSF2Font::new(FONT_12X24)
        .map_err(|_| QrCardError::Font("built-in bitmap font failed to load".to_string()))?;
    Ok(ResolvedFont::Bitmap)
}
