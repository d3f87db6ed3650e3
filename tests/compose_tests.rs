//! # Composition Tests
//!
//! End-to-end tests for the card pipeline: QR encoding through layout
//! composition to the final resampled image. Assertions are geometric
//! properties of the output rather than golden files, since the Lanczos
//! resampling step makes byte-exact references fragile across platforms.

use image::{Rgba, RgbaImage};
use pretty_assertions::assert_eq;

use qrcard::compose::{ComposeRequest, Compositor, FontSource, LogoStatus};
use qrcard::config::ComposeConfig;
use qrcard::encode::{self, ErrorLevel, QrOptions};

const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Poster-style margins: wide caption strips above and below.
fn poster_config() -> ComposeConfig {
    ComposeConfig {
        qr_margin: 30,
        text_margin: 50,
        border_margin: 50,
        output_size: (2000, 2000),
        ..ComposeConfig::default()
    }
}

#[test]
fn final_image_matches_output_size_exactly() {
    let compositor = Compositor::new(poster_config()).unwrap();
    let qr = RgbaImage::from_pixel(400, 400, WHITE);

    let card = compositor.compose(qr, &ComposeRequest::default()).unwrap();

    assert_eq!(card.image.width(), 2000);
    assert_eq!(card.image.height(), 2000);
}

#[test]
fn poster_scenario_with_both_captions() {
    // 400x400 QR, margins 50/50, captions above and below, 2000x2000 out:
    // the pre-resize canvas is 400x600 and the final image is exactly the
    // requested size regardless of the aspect distortion that implies.
    let compositor = Compositor::new(poster_config()).unwrap();
    let qr = RgbaImage::from_pixel(400, 400, WHITE);
    let request = ComposeRequest {
        caption_above: Some("Scan Me".to_string()),
        caption_below: Some("Company".to_string()),
        ..Default::default()
    };

    let card = compositor.compose(qr, &request).unwrap();

    assert_eq!((card.image.width(), card.image.height()), (2000, 2000));
    assert_eq!(card.font, Some(FontSource::Builtin));
    assert_eq!(card.logo, LogoStatus::NotRequested);
}

#[test]
fn missing_logo_output_equals_no_logo_output() {
    let compositor = Compositor::new(poster_config()).unwrap();
    let qr = encode::render_qr(
        "https://example.com",
        &QrOptions {
            module_size: 4,
            ..QrOptions::default()
        },
        image::Rgb([0, 0, 0]),
        image::Rgb([255, 255, 255]),
    )
    .unwrap();

    let without_logo = compositor
        .compose(qr.clone(), &ComposeRequest::default())
        .unwrap();
    let with_missing_logo = compositor
        .compose(
            qr,
            &ComposeRequest {
                logo_path: Some("/nonexistent/logo.png".into()),
                ..Default::default()
            },
        )
        .unwrap();

    assert_eq!(
        with_missing_logo.logo,
        LogoStatus::Missing("/nonexistent/logo.png".into())
    );
    assert_eq!(
        without_logo.image.as_raw(),
        with_missing_logo.image.as_raw()
    );
}

#[test]
fn logo_overlay_is_applied_and_centered() {
    let dir = std::env::temp_dir().join("qrcard_compose_test");
    std::fs::create_dir_all(&dir).unwrap();
    let logo_path = dir.join("logo.png");
    RgbaImage::from_pixel(64, 64, Rgba([255, 0, 0, 255]))
        .save(&logo_path)
        .unwrap();

    // Identity-sized output so pixel positions survive composition.
    let config = ComposeConfig {
        text_margin: 0,
        border_margin: 0,
        output_size: (400, 400),
        ..ComposeConfig::default()
    };
    let compositor = Compositor::new(config).unwrap();
    let qr = RgbaImage::from_pixel(400, 400, WHITE);
    let request = ComposeRequest {
        logo_path: Some(logo_path),
        ..Default::default()
    };

    let card = compositor.compose(qr, &request).unwrap();

    assert_eq!(card.logo, LogoStatus::Applied);
    // The logo spans [140, 260) in QR space; its center is logo-red and
    // the area outside it is untouched background.
    let center = card.image.get_pixel(200, 200);
    assert!(center[0] > 200 && center[1] < 60 && center[2] < 60);
    let corner = card.image.get_pixel(10, 10);
    assert!(corner[0] > 200 && corner[1] > 200 && corner[2] > 200);
}

#[test]
fn derived_filename_uses_sanitized_caption() {
    let compositor = Compositor::new(poster_config()).unwrap();
    let qr = RgbaImage::from_pixel(100, 100, WHITE);
    let request = ComposeRequest {
        caption_above: Some("My QR! #1".to_string()),
        ..Default::default()
    };

    let card = compositor.compose(qr, &request).unwrap();

    assert!(card.filename.starts_with("QRCARD_"));
    assert!(card.filename.ends_with("_My_QR_1.png"));
}

#[test]
fn caller_filename_wins_over_derivation() {
    let compositor = Compositor::new(poster_config()).unwrap();
    let qr = RgbaImage::from_pixel(100, 100, WHITE);
    let request = ComposeRequest {
        caption_above: Some("Scan Me".to_string()),
        filename: Some("out.png".to_string()),
        ..Default::default()
    };

    let card = compositor.compose(qr, &request).unwrap();
    assert_eq!(card.filename, "out.png");
}

#[test]
fn encoded_qr_survives_composition() {
    // Black modules on white must still be visibly present after the
    // Lanczos resize (sampled at the stretched position of the top-left
    // finder pattern center).
    let opts = QrOptions {
        version: Some(1),
        error_level: ErrorLevel::Low,
        module_size: 10,
        quiet_zone: 2,
    };
    let qr = encode::render_qr(
        "https://example.com",
        &opts,
        image::Rgb([0, 0, 0]),
        image::Rgb([255, 255, 255]),
    )
    .unwrap();
    let qr_size = qr.width(); // (21 + 4) * 10 = 250

    let config = ComposeConfig {
        text_margin: 0,
        border_margin: 0,
        output_size: (qr_size * 2, qr_size * 2),
        ..ComposeConfig::default()
    };
    let compositor = Compositor::new(config).unwrap();
    let card = compositor.compose(qr, &ComposeRequest::default()).unwrap();

    // Finder pattern center module (quiet zone 2 + offset 3 = module 5.5
    // in, at scale 2 → pixel 110) is solid black well inside dark area.
    let sample = card.image.get_pixel(110, 110);
    assert!(sample[0] < 60, "finder pattern lost after resize: {:?}", sample);
    // Quiet zone stays background.
    let quiet = card.image.get_pixel(5, 5);
    assert!(quiet[0] > 200);
}

#[test]
fn custom_font_fallback_is_observable_end_to_end() {
    let config = ComposeConfig {
        font_path: Some("/nonexistent/Inter-Bold.ttf".into()),
        ..poster_config()
    };
    let compositor = Compositor::new(config).unwrap();
    let qr = RgbaImage::from_pixel(200, 200, WHITE);
    let request = ComposeRequest {
        caption_above: Some("Scan Me".to_string()),
        ..Default::default()
    };

    let card = compositor.compose(qr, &request).unwrap();

    assert_eq!(
        card.font,
        Some(FontSource::Fallback {
            requested: "/nonexistent/Inter-Bold.ttf".into()
        })
    );
}

#[test]
fn distorted_output_size_is_honored() {
    // No aspect-ratio preservation: 300x900 means 300x900.
    let config = ComposeConfig {
        output_size: (300, 900),
        ..ComposeConfig::default()
    };
    let compositor = Compositor::new(config).unwrap();
    let qr = RgbaImage::from_pixel(128, 128, WHITE);

    let card = compositor.compose(qr, &ComposeRequest::default()).unwrap();
    assert_eq!((card.image.width(), card.image.height()), (300, 900));
}
