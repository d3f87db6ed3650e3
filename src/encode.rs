//! # QR Symbol Rendering
//!
//! Thin glue over the `qrcode` crate: encodes a payload and rasterizes the
//! module grid into an RGBA bitmap ready for composition. All of the actual
//! QR mathematics (Reed-Solomon, masking, module placement) lives in the
//! external crate.

use image::{Rgb, Rgba, RgbaImage};
use qrcode::{EcLevel, QrCode, Version};

use crate::error::QrCardError;

/// QR error correction level.
///
/// Higher levels tolerate more symbol damage. `High` (~30% recovery) is
/// the default because a centered logo overlay destroys modules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorLevel {
    /// ~7% recovery
    Low,
    /// ~15% recovery
    Medium,
    /// ~25% recovery
    Quartile,
    /// ~30% recovery
    High,
}

impl ErrorLevel {
    fn to_ec_level(self) -> EcLevel {
        match self {
            ErrorLevel::Low => EcLevel::L,
            ErrorLevel::Medium => EcLevel::M,
            ErrorLevel::Quartile => EcLevel::Q,
            ErrorLevel::High => EcLevel::H,
        }
    }
}

/// Options for QR symbol generation.
#[derive(Debug, Clone)]
pub struct QrOptions {
    /// Requested symbol version (1-40). `None` picks the smallest version
    /// that fits; a version too small for the payload also falls back to
    /// auto-fit rather than failing.
    pub version: Option<i16>,

    /// Error correction level
    pub error_level: ErrorLevel,

    /// Rendered size of one module in pixels
    pub module_size: u32,

    /// Quiet zone width around the symbol, in modules
    pub quiet_zone: u32,
}

impl Default for QrOptions {
    fn default() -> Self {
        Self {
            version: None,
            error_level: ErrorLevel::High,
            module_size: 20,
            quiet_zone: 6,
        }
    }
}

/// Encode `data` and render the symbol to an RGBA bitmap.
///
/// Dark modules use `fill`, light modules and the quiet zone use `back`.
/// The result is square: `(modules + 2 * quiet_zone) * module_size` pixels
/// per side.
pub fn render_qr(
    data: &str,
    opts: &QrOptions,
    fill: Rgb<u8>,
    back: Rgb<u8>,
) -> Result<RgbaImage, QrCardError> {
    let ec_level = opts.error_level.to_ec_level();

    let code = match opts.version {
        Some(v) => QrCode::with_version(data, Version::Normal(v), ec_level)
            .or_else(|_| QrCode::with_error_correction_level(data, ec_level)),
        None => QrCode::with_error_correction_level(data, ec_level),
    }
    .map_err(|e| QrCardError::QrEncode(e.to_string()))?;

    let module_size = opts.module_size.max(1);
    let qr_size = code.width() as u32;
    let pixel_size = (qr_size + 2 * opts.quiet_zone) * module_size;

    let fill = Rgba([fill[0], fill[1], fill[2], 255]);
    let back = Rgba([back[0], back[1], back[2], 255]);
    let mut img = RgbaImage::from_pixel(pixel_size, pixel_size, back);

    let origin = opts.quiet_zone * module_size;
    for qy in 0..qr_size {
        for qx in 0..qr_size {
            let is_dark = code[(qx as usize, qy as usize)] == qrcode::Color::Dark;
            if !is_dark {
                continue;
            }

            for cy in 0..module_size {
                for cx in 0..module_size {
                    let px = origin + qx * module_size + cx;
                    let py = origin + qy * module_size + cy;
                    img.put_pixel(px, py, fill);
                }
            }
        }
    }

    Ok(img)
}
