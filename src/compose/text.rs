//! Caption measurement and drawing.
//!
//! Both font kinds go through the same two-call protocol: `measure` returns
//! the tight ink bounding box, `draw` renders with the box's top-left at
//! the given position. TTF glyphs are laid out along a baseline and their
//! anti-aliased coverage is blended against the existing canvas pixels;
//! the bitmap face blits fixed 12x24 cells.

use ab_glyph::{Font, FontArc, OutlinedGlyph, ScaleFont, point};
use image::{Rgb, Rgba, RgbaImage};
use spleen_font::{FONT_12X24, PSF2Font};

use super::font::{BITMAP_CHAR_HEIGHT, BITMAP_CHAR_WIDTH, ResolvedFont};

/// Tight ink bounding box of a rendered caption.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextBounds {
    pub width: u32,
    pub height: u32,
}

/// Measure the ink bounding box of `text` under the given face.
///
/// Whitespace-only text (or text with no outlines at all) measures as
/// zero-sized.
pub fn measure(face: &ResolvedFont, text: &str) -> TextBounds {
    match face {
        ResolvedFont::Truetype { font, size } => match InkLayout::of(font, *size, text) {
            Some(layout) => TextBounds {
                width: (layout.max_x - layout.min_x) as u32,
                height: (layout.max_y - layout.min_y) as u32,
            },
            None => TextBounds {
                width: 0,
                height: 0,
            },
        },
        ResolvedFont::Bitmap => {
            let chars = text.chars().count() as u32;
            TextBounds {
                width: chars * BITMAP_CHAR_WIDTH,
                height: if chars == 0 { 0 } else { BITMAP_CHAR_HEIGHT },
            }
        }
    }
}

/// Draw `text` with the ink box top-left at `(x, y)`.
pub fn draw(canvas: &mut RgbaImage, face: &ResolvedFont, text: &str, x: u32, y: u32, color: Rgb<u8>) {
    match face {
        ResolvedFont::Truetype { font, size } => draw_truetype(canvas, font, *size, text, x, y, color),
        ResolvedFont::Bitmap => draw_bitmap(canvas, text, x, y, color),
    }
}

/// Glyph outlines plus the union of their pixel bounds, in a layout space
/// where the baseline sits at y = 0.
struct InkLayout {
    glyphs: Vec<OutlinedGlyph>,
    min_x: i32,
    min_y: i32,
    max_x: i32,
    max_y: i32,
}

impl InkLayout {
    /// Lay out `text` along a baseline. Returns `None` when nothing
    /// produces an outline (empty or all-whitespace text).
    fn of(font: &FontArc, size: f32, text: &str) -> Option<Self> {
        let scaled = font.as_scaled(size);

        let mut glyphs = Vec::new();
        let mut caret_x = 0.0f32;
        let (mut min_x, mut min_y) = (i32::MAX, i32::MAX);
        let (mut max_x, mut max_y) = (i32::MIN, i32::MIN);

        for ch in text.chars() {
            let glyph_id = font.glyph_id(ch);
            let advance = scaled.h_advance(glyph_id);
            let glyph = glyph_id.with_scale_and_position(size, point(caret_x, 0.0));
            caret_x += advance;

            if let Some(outlined) = font.outline_glyph(glyph) {
                let bounds = outlined.px_bounds();
                min_x = min_x.min(bounds.min.x.floor() as i32);
                min_y = min_y.min(bounds.min.y.floor() as i32);
                max_x = max_x.max(bounds.max.x.ceil() as i32);
                max_y = max_y.max(bounds.max.y.ceil() as i32);
                glyphs.push(outlined);
            }
        }

        if glyphs.is_empty() {
            return None;
        }

        Some(Self {
            glyphs,
            min_x,
            min_y,
            max_x,
            max_y,
        })
    }
}

fn draw_truetype(
    canvas: &mut RgbaImage,
    font: &FontArc,
    size: f32,
    text: &str,
    x: u32,
    y: u32,
    color: Rgb<u8>,
) {
    let Some(layout) = InkLayout::of(font, size, text) else {
        return;
    };

    let (width, height) = canvas.dimensions();
    for outlined in &layout.glyphs {
        let bounds = outlined.px_bounds();
        let origin_x = bounds.min.x.floor() as i32 - layout.min_x + x as i32;
        let origin_y = bounds.min.y.floor() as i32 - layout.min_y + y as i32;

        outlined.draw(|px, py, coverage| {
            if coverage <= 0.0 {
                return;
            }
            let cx = origin_x + px as i32;
            let cy = origin_y + py as i32;
            if cx >= 0 && cy >= 0 && (cx as u32) < width && (cy as u32) < height {
                let pixel = canvas.get_pixel_mut(cx as u32, cy as u32);
                *pixel = blend(*pixel, color, coverage.min(1.0));
            }
        });
    }
}

fn draw_bitmap(canvas: &mut RgbaImage, text: &str, x: u32, y: u32, color: Rgb<u8>) {
    let Ok(mut face) = PSF2Font::new(FONT_12X24) else {
        return;
    };

    let fg = Rgba([color[0], color[1], color[2], 255]);
    let (width, height) = canvas.dimensions();

    for (i, ch) in text.chars().enumerate() {
        let cell_x = x + i as u32 * BITMAP_CHAR_WIDTH;
        let utf8 = ch.to_string();

        // Characters missing from the face leave their cell blank.
        let Some(glyph) = face.glyph_for_utf8(utf8.as_bytes()) else {
            continue;
        };

        for (row_y, row) in glyph.enumerate() {
            for (col_x, on) in row.enumerate() {
                if !on {
                    continue;
                }
                let px = cell_x + col_x as u32;
                let py = y + row_y as u32;
                if px < width && py < height {
                    canvas.put_pixel(px, py, fg);
                }
            }
        }
    }
}

/// Blend anti-aliased glyph coverage over the existing canvas pixel.
fn blend(bg: Rgba<u8>, fg: Rgb<u8>, alpha: f32) -> Rgba<u8> {
    let inv = 1.0 - alpha;
    Rgba([
        (fg[0] as f32 * alpha + bg[0] as f32 * inv) as u8,
        (fg[1] as f32 * alpha + bg[1] as f32 * inv) as u8,
        (fg[2] as f32 * alpha + bg[2] as f32 * inv) as u8,
        255,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    const BLACK: Rgb<u8> = Rgb([0, 0, 0]);

    fn white_canvas(w: u32, h: u32) -> RgbaImage {
        RgbaImage::from_pixel(w, h, Rgba([255, 255, 255, 255]))
    }

    fn black_pixel_columns(canvas: &RgbaImage) -> Vec<u32> {
        canvas
            .enumerate_pixels()
            .filter(|(_, _, p)| p[0] == 0)
            .map(|(x, _, _)| x)
            .collect()
    }

    #[test]
    fn test_bitmap_measure() {
        let bounds = measure(&ResolvedFont::Bitmap, "Hi");
        assert_eq!(
            bounds,
            TextBounds {
                width: 2 * BITMAP_CHAR_WIDTH,
                height: BITMAP_CHAR_HEIGHT,
            }
        );
    }

    #[test]
    fn test_empty_text_measures_zero() {
        let bounds = measure(&ResolvedFont::Bitmap, "");
        assert_eq!(bounds, TextBounds { width: 0, height: 0 });
    }

    #[test]
    fn test_bitmap_draw_marks_pixels() {
        let mut canvas = white_canvas(100, 40);
        draw(&mut canvas, &ResolvedFont::Bitmap, "A", 10, 5, BLACK);
        assert!(!black_pixel_columns(&canvas).is_empty());
    }

    #[test]
    fn test_bitmap_draw_stays_inside_ink_box() {
        let mut canvas = white_canvas(100, 40);
        draw(&mut canvas, &ResolvedFont::Bitmap, "AB", 20, 5, BLACK);

        let columns = black_pixel_columns(&canvas);
        let min = *columns.iter().min().unwrap();
        let max = *columns.iter().max().unwrap();
        assert!(min >= 20);
        assert!(max < 20 + 2 * BITMAP_CHAR_WIDTH);
    }

    #[test]
    fn test_draw_clips_at_canvas_edge() {
        // Drawing past the right edge must not panic.
        let mut canvas = white_canvas(20, 20);
        draw(&mut canvas, &ResolvedFont::Bitmap, "WIDE TEXT", 10, 2, BLACK);
    }

    #[test]
    fn test_blend_endpoints() {
        let white = Rgba([255, 255, 255, 255]);
        assert_eq!(blend(white, BLACK, 1.0), Rgba([0, 0, 0, 255]));
        assert_eq!(blend(white, BLACK, 0.0), Rgba([255, 255, 255, 255]));
    }
}
