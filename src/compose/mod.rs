//! # Layout Compositor
//!
//! Arranges the three visual elements of a card (the QR bitmap, an
//! optional centered logo, and optional caption text above/below) onto a
//! single canvas, then resamples to the configured output size.
//!
//! ## Pipeline
//!
//! ```text
//! QR bitmap → logo overlay → canvas paste → caption above → caption below → resize
//!             (centered,     (y = text_margin  (y = border    (ink box ends    (Lanczos3,
//!              alpha mask)    + border_margin)   _margin)       at bottom       exact)
//!                                                               border)
//! ```
//!
//! Canvas dimensions are computed once, before any drawing, and never
//! change except via the final uniform resize. Captions are expected to
//! fit horizontally; no wrapping or overflow handling is performed.
//!
//! ## Example
//!
//! ```no_run
//! use qrcard::compose::{ComposeRequest, Compositor};
//! use qrcard::config::ComposeConfig;
//! use qrcard::encode::{self, QrOptions};
//!
//! let config = ComposeConfig::default();
//! let qr = encode::render_qr(
//!     "https://example.com",
//!     &QrOptions::default(),
//!     config.fill_color,
//!     config.back_color,
//! )?;
//!
//! let compositor = Compositor::new(config)?;
//! let card = compositor.compose(qr, &ComposeRequest {
//!     caption_above: Some("Scan Me".into()),
//!     ..Default::default()
//! })?;
//! card.image.save(&card.filename)?;
//! # Ok::<(), qrcard::QrCardError>(())
//! ```

pub mod font;
pub mod logo;
pub mod text;

pub use font::FontSource;
pub use logo::{LOGO_SIZE, LogoStatus};

use std::path::PathBuf;

use image::imageops::{self, FilterType};
use image::{DynamicImage, RgbImage, Rgba, RgbaImage};

use crate::config::ComposeConfig;
use crate::error::QrCardError;
use crate::filename;

/// The optional elements of one card.
#[derive(Debug, Clone, Default)]
pub struct ComposeRequest {
    /// Caption drawn above the QR code
    pub caption_above: Option<String>,

    /// Caption drawn below the QR code
    pub caption_below: Option<String>,

    /// Logo image to center on the QR code. A path that cannot be loaded
    /// is skipped and reported, not raised.
    pub logo_path: Option<PathBuf>,

    /// Output filename; derived from the date and top caption when absent
    pub filename: Option<String>,
}

/// A finished card.
pub struct Composition {
    /// Final image, exactly the configured output size
    pub image: RgbImage,

    /// Caller-supplied or derived output filename
    pub filename: String,

    /// Whether the logo was applied, skipped, or never requested
    pub logo: LogoStatus,

    /// Which font face the captions used, when any caption was requested
    pub font: Option<FontSource>,
}

/// Lays out QR code, logo, and captions onto one output image.
pub struct Compositor {
    config: ComposeConfig,
}

impl Compositor {
    /// Create a compositor, validating the configuration up front.
    pub fn new(config: ComposeConfig) -> Result<Self, QrCardError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The validated configuration this compositor renders with.
    pub fn config(&self) -> &ComposeConfig {
        &self.config
    }

    /// Compose a card from a pre-rendered QR bitmap.
    ///
    /// A missing logo or custom font degrades the result without failing;
    /// both outcomes are reported in the returned [`Composition`]. A
    /// requested caption with no resolvable font at all is an error.
    pub fn compose(
        &self,
        qr: RgbaImage,
        request: &ComposeRequest,
    ) -> Result<Composition, QrCardError> {
        let (canvas, logo_status, font_source) = self.build_canvas(qr, request)?;

        let (out_w, out_h) = self.config.output_size;
        let image = DynamicImage::ImageRgba8(canvas)
            .resize_exact(out_w, out_h, FilterType::Lanczos3)
            .to_rgb8();

        let filename = match &request.filename {
            Some(name) => name.clone(),
            None => filename::derive(request.caption_above.as_deref()),
        };

        Ok(Composition {
            image,
            filename,
            logo: logo_status,
            font: font_source,
        })
    }

    /// Build the pre-resize canvas: logo-overlaid QR plus caption strips.
    fn build_canvas(
        &self,
        mut qr: RgbaImage,
        request: &ComposeRequest,
    ) -> Result<(RgbaImage, LogoStatus, Option<FontSource>), QrCardError> {
        if qr.width() == 0 || qr.height() == 0 {
            return Err(QrCardError::InvalidDimensions(
                "QR bitmap is empty".to_string(),
            ));
        }

        let logo_status = match &request.logo_path {
            Some(path) => logo::overlay_logo(&mut qr, path),
            None => LogoStatus::NotRequested,
        };

        let width = qr.width();
        let total_height =
            qr.height() + 2 * self.config.text_margin + 2 * self.config.border_margin;

        let back = self.config.back_color;
        let mut canvas = RgbaImage::from_pixel(
            width,
            total_height,
            Rgba([back[0], back[1], back[2], 255]),
        );

        let qr_y = self.config.text_margin + self.config.border_margin;
        imageops::replace(&mut canvas, &qr, 0, qr_y as i64);

        let mut font_source = None;
        if request.caption_above.is_some() || request.caption_below.is_some() {
            // One resolution per composition, shared by both captions.
            let (face, source) =
                font::resolve(self.config.font_path.as_deref(), self.config.font_size)?;

            if let Some(caption) = &request.caption_above {
                let bounds = text::measure(&face, caption);
                let x = width.saturating_sub(bounds.width) / 2;
                text::draw(
                    &mut canvas,
                    &face,
                    caption,
                    x,
                    self.config.border_margin,
                    self.config.fill_color,
                );
            }

            if let Some(caption) = &request.caption_below {
                let bounds = text::measure(&face, caption);
                let x = width.saturating_sub(bounds.width) / 2;
                // Ink box bottom sits exactly border_margin above the
                // canvas bottom.
                let y = total_height.saturating_sub(self.config.border_margin + bounds.height);
                text::draw(&mut canvas, &face, caption, x, y, self.config.fill_color);
            }

            font_source = Some(source);
        }

        Ok((canvas, logo_status, font_source))
    }
}
