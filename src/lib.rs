//! # QrCard - QR Code Card Generator
//!
//! QrCard generates "cards": QR code images for URLs with an optional
//! centered logo overlay and caption text above/below the code, resampled
//! to a target resolution and saved as PNG. It provides:
//!
//! - **Encoding glue**: QR symbol rendering via the `qrcode` crate
//! - **Layout composition**: logo overlay, caption placement, margins
//! - **Font resolution**: custom TTF fonts with an observable built-in
//!   fallback
//! - **Filename derivation**: timestamped, caption-based output names
//!
//! ## Quick Start
//!
//! ```no_run
//! use qrcard::{ComposeConfig, ComposeRequest, Compositor};
//! use qrcard::encode::{self, QrOptions};
//!
//! let config = ComposeConfig::default();
//!
//! // Render the QR symbol (the qrcode crate does the hard part).
//! let qr = encode::render_qr(
//!     "https://example.com",
//!     &QrOptions::default(),
//!     config.fill_color,
//!     config.back_color,
//! )?;
//!
//! // Compose the card: captions, logo, margins, final resize.
//! let compositor = Compositor::new(config)?;
//! let card = compositor.compose(qr, &ComposeRequest {
//!     caption_above: Some("Scan Me".into()),
//!     ..Default::default()
//! })?;
//!
//! card.image.save(&card.filename)?;
//! # Ok::<(), qrcard::QrCardError>(())
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`encode`] | QR symbol rendering |
//! | [`compose`] | Layout compositor (logo, captions, resize) |
//! | [`config`] | Composition configuration and color parsing |
//! | [`filename`] | Output filename derivation |
//! | [`error`] | Error types |
//!
//! ## Degraded modes
//!
//! A missing logo file or an unloadable custom font never aborts a
//! composition: the card is produced without the logo (or with the
//! built-in font) and the outcome is reported through
//! [`compose::LogoStatus`] and [`compose::FontSource`]. Invalid output
//! dimensions and captions with no resolvable font at all are errors.

pub mod compose;
pub mod config;
pub mod encode;
pub mod error;
pub mod filename;

// Re-exports for convenience
pub use compose::{ComposeRequest, Composition, Compositor};
pub use config::ComposeConfig;
pub use error::QrCardError;
