//! # Composition Configuration
//!
//! This module defines the explicit configuration structure for card
//! composition. Every knob the generator exposes lives here; there are no
//! global defaults hiding in the drawing code.
//!
//! ## Layout
//!
//! ```text
//! ┌──────────────────────────┐ ─┐
//! │       caption above      │  │ border_margin + text_margin
//! ├──────────────────────────┤ ─┤
//! │                          │  │
//! │         QR code          │  │ qr height
//! │                          │  │
//! ├──────────────────────────┤ ─┤
//! │       caption below      │  │ text_margin + border_margin
//! └──────────────────────────┘ ─┘
//! ```
//!
//! ## Usage
//!
//! ```
//! use qrcard::config::ComposeConfig;
//!
//! let mut config = ComposeConfig::default();
//! config.output_size = (2000, 2000);
//! config.validate().unwrap();
//! ```

use std::path::PathBuf;

use image::Rgb;

use crate::error::QrCardError;

/// Configuration for card composition.
///
/// Margins are expressed in pre-resize canvas pixels. The canvas height is
/// `qr_height + 2 * text_margin + 2 * border_margin`; the whole canvas is
/// then resampled to `output_size`.
#[derive(Debug, Clone)]
pub struct ComposeConfig {
    /// Margin reserved around the QR symbol itself. Accepted for
    /// completeness of the margin set; the layout derives the quiet zone
    /// from the encoder options instead (see `QrOptions::quiet_zone`).
    pub qr_margin: u32,

    /// Vertical space between the QR code and each caption strip
    pub text_margin: u32,

    /// Vertical space between each caption and the outer edge
    pub border_margin: u32,

    /// Path to a TTF/OTF caption font. `None` (or an unreadable path) uses
    /// the built-in bitmap face.
    pub font_path: Option<PathBuf>,

    /// Caption font size in pixels (TTF only; the built-in face is fixed)
    pub font_size: f32,

    /// Foreground color for QR modules and caption text
    pub fill_color: Rgb<u8>,

    /// Background color for the canvas and QR light modules
    pub back_color: Rgb<u8>,

    /// Final output dimensions after resampling. No aspect-ratio
    /// preservation is performed; the canvas is stretched to exactly this.
    pub output_size: (u32, u32),
}

impl Default for ComposeConfig {
    fn default() -> Self {
        Self {
            qr_margin: 30,
            text_margin: 10,
            border_margin: 10,
            font_path: None,
            font_size: 40.0,
            fill_color: Rgb([0, 0, 0]),
            back_color: Rgb([255, 255, 255]),
            output_size: (1000, 1000),
        }
    }
}

impl ComposeConfig {
    /// Check that the configuration can produce an image at all.
    ///
    /// Margins are unsigned so they cannot be negative; what remains to
    /// check is the output size and the font size.
    pub fn validate(&self) -> Result<(), QrCardError> {
        let (w, h) = self.output_size;
        if w == 0 || h == 0 {
            return Err(QrCardError::InvalidDimensions(format!(
                "output size {}x{} has a zero dimension",
                w, h
            )));
        }
        if !self.font_size.is_finite() || self.font_size <= 0.0 {
            return Err(QrCardError::InvalidDimensions(format!(
                "font size {} is not positive",
                self.font_size
            )));
        }
        Ok(())
    }
}

/// Parse a color string into an RGB value.
///
/// Accepts:
/// - `#RGB` / `RGB` (3-digit hex)
/// - `#RRGGBB` / `RRGGBB` (6-digit hex)
/// - a small set of named colors (case-insensitive): `black`, `white`,
///   `red`, `green`, `blue`, `yellow`, `cyan`, `magenta`, `gray`/`grey`,
///   `orange`
pub fn parse_color(s: &str) -> Option<Rgb<u8>> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    let hex = s.strip_prefix('#').unwrap_or(s);
    if let Some(c) = parse_hex(hex) {
        return Some(c);
    }

    lookup_named(s)
}

fn parse_hex(hex: &str) -> Option<Rgb<u8>> {
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }

    match hex.len() {
        3 => {
            let r = expand_nibble(hex.as_bytes()[0])?;
            let g = expand_nibble(hex.as_bytes()[1])?;
            let b = expand_nibble(hex.as_bytes()[2])?;
            Some(Rgb([r, g, b]))
        }
        6 => {
            let r = parse_byte(&hex[0..2])?;
            let g = parse_byte(&hex[2..4])?;
            let b = parse_byte(&hex[4..6])?;
            Some(Rgb([r, g, b]))
        }
        _ => None,
    }
}

/// Expand a single hex nibble: 'f' → 0xFF, 'a' → 0xAA.
fn expand_nibble(ch: u8) -> Option<u8> {
    let n = hex_val(ch)?;
    Some(n << 4 | n)
}

fn hex_val(ch: u8) -> Option<u8> {
    match ch {
        b'0'..=b'9' => Some(ch - b'0'),
        b'a'..=b'f' => Some(ch - b'a' + 10),
        b'A'..=b'F' => Some(ch - b'A' + 10),
        _ => None,
    }
}

fn parse_byte(s: &str) -> Option<u8> {
    let b = s.as_bytes();
    Some(hex_val(b[0])? << 4 | hex_val(b[1])?)
}

fn lookup_named(s: &str) -> Option<Rgb<u8>> {
    let rgb = match s.to_ascii_lowercase().as_str() {
        "black" => [0, 0, 0],
        "white" => [255, 255, 255],
        "red" => [255, 0, 0],
        "green" => [0, 128, 0],
        "blue" => [0, 0, 255],
        "yellow" => [255, 255, 0],
        "cyan" => [0, 255, 255],
        "magenta" => [255, 0, 255],
        "gray" | "grey" => [128, 128, 128],
        "orange" => [255, 165, 0],
        _ => return None,
    };
    Some(Rgb(rgb))
}
