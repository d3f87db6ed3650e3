//! Center-logo overlay.
//!
//! Loads the logo, resizes it to the fixed overlay size, and
//! alpha-composites it at the geometric center of the QR bitmap. A logo
//! that cannot be loaded is skipped and reported, never fatal.

use std::path::{Path, PathBuf};

use image::RgbaImage;
use image::imageops::{self, FilterType};

/// Edge length the logo is resized to before overlaying, in QR-bitmap
/// pixels.
pub const LOGO_SIZE: u32 = 120;

/// Outcome of the logo overlay step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogoStatus {
    /// No logo path was given
    NotRequested,
    /// The logo was composited onto the QR bitmap
    Applied,
    /// The file was missing or undecodable; composition continued without it
    Missing(PathBuf),
}

/// Overlay the logo at the center of the QR bitmap.
///
/// The position is computed in the QR bitmap's own coordinate space,
/// independent of any canvas-level margins.
pub fn overlay_logo(qr: &mut RgbaImage, path: &Path) -> LogoStatus {
    let logo = match image::open(path) {
        Ok(img) => img,
        Err(_) => return LogoStatus::Missing(path.to_path_buf()),
    };

    let logo = logo
        .resize_exact(LOGO_SIZE, LOGO_SIZE, FilterType::Lanczos3)
        .to_rgba8();

    let (x, y) = centered_position(qr.width(), qr.height());
    imageops::overlay(qr, &logo, x as i64, y as i64);

    LogoStatus::Applied
}

/// Top-left offset that centers the logo on a QR bitmap of the given size.
pub fn centered_position(qr_width: u32, qr_height: u32) -> (u32, u32) {
    (
        qr_width.saturating_sub(LOGO_SIZE) / 2,
        qr_height.saturating_sub(LOGO_SIZE) / 2,
    )
}
