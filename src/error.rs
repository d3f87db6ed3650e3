//! # Error Types
//!
//! This module defines error types used throughout the qrcard library.
//!
//! Missing resources that composition can recover from (a logo file or a
//! custom font that isn't there) are deliberately *not* errors: they are
//! reported through [`LogoStatus`](crate::compose::LogoStatus) and
//! [`FontSource`](crate::compose::FontSource) so callers can log the
//! degraded result.

use thiserror::Error;

/// Main error type for qrcard operations
#[derive(Debug, Error)]
pub enum QrCardError {
    /// Zero-sized output, empty QR bitmap, or unusable font size
    #[error("Invalid dimensions: {0}")]
    InvalidDimensions(String),

    /// Invalid command-line argument or option value
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Data could not be encoded as a QR symbol
    #[error("QR encoding error: {0}")]
    QrEncode(String),

    /// A caption was requested but no font could be resolved at all
    #[error("Font error: {0}")]
    Font(String),

    /// Image encoding/decoding error
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
