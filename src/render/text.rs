//! Text rasterization for the text tool using ab_glyph

use std::path::PathBuf;

use ab_glyph::{Font, FontArc, GlyphId, PxScale, ScaleFont, point};
use image::{Rgba, RgbaImage};

use crate::domain::TextAnnotation;

/// Draw a single line of text with its baseline starting at the annotation origin
///
/// Glyph coverage is alpha-blended over the image. Returns `true` if any glyph
/// produced an outline (whitespace-only text draws nothing).
pub fn draw_text(img: &mut RgbaImage, font: &FontArc, annotation: &TextAnnotation) -> bool {
    if annotation.size <= 0.0 {
        return false;
    }

    let scale = PxScale::from(annotation.size);
    let scaled = font.as_scaled(scale);
    let [r, g, b, _] = annotation.color.to_rgba_u8();
    let (w, h) = (img.width() as i32, img.height() as i32);

    let mut caret = point(annotation.origin.x, annotation.origin.y);
    let mut last_glyph: Option<GlyphId> = None;
    let mut drew_any = false;

    for ch in annotation.text.chars().filter(|c| !c.is_control()) {
        let glyph_id = font.glyph_id(ch);
        if let Some(prev) = last_glyph {
            caret.x += scaled.kern(prev, glyph_id);
        }
        let glyph = glyph_id.with_scale_and_position(scale, caret);
        caret.x += scaled.h_advance(glyph_id);
        last_glyph = Some(glyph_id);

        let Some(outlined) = font.outline_glyph(glyph) else {
            continue;
        };
        drew_any = true;

        let bounds = outlined.px_bounds();
        let (min_x, min_y) = (bounds.min.x as i32, bounds.min.y as i32);
        outlined.draw(|gx, gy, coverage| {
            let x = min_x + gx as i32;
            let y = min_y + gy as i32;
            if x < 0 || y < 0 || x >= w || y >= h {
                return;
            }
            blend_pixel(img.get_pixel_mut(x as u32, y as u32), [r, g, b], coverage);
        });
    }

    drew_any
}

/// Source-over blend of an opaque color at `coverage` onto a straight-alpha pixel
fn blend_pixel(dst: &mut Rgba<u8>, color: [u8; 3], coverage: f32) {
    let src_a = coverage.clamp(0.0, 1.0);
    if src_a <= 0.0 {
        return;
    }
    let dst_a = f32::from(dst[3]) / 255.0;
    let out_a = src_a + dst_a * (1.0 - src_a);
    for c in 0..3 {
        let src = f32::from(color[c]);
        let below = f32::from(dst[c]);
        let value = (src * src_a + below * dst_a * (1.0 - src_a)) / out_a;
        dst[c] = value.round().clamp(0.0, 255.0) as u8;
    }
    dst[3] = (out_a * 255.0).round().clamp(0.0, 255.0) as u8;
}

/// Sans-serif fonts shipped with common desktop systems
const SYSTEM_FONTS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu-sans-fonts/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation-sans/LiberationSans-Regular.ttf",
    "/usr/share/fonts/truetype/freefont/FreeSans.ttf",
    "/usr/share/fonts/noto/NotoSans-Regular.ttf",
    "/usr/share/fonts/truetype/noto/NotoSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// Find a font for the text tool when none is configured
///
/// Well-known system files are tried first, then any TrueType/OpenType file in
/// the user font directory.
pub fn system_font() -> Option<FontArc> {
    let user_fonts = dirs::font_dir()
        .and_then(|dir| std::fs::read_dir(dir).ok())
        .into_iter()
        .flatten()
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| {
            path.extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| {
                    ext.eq_ignore_ascii_case("ttf") || ext.eq_ignore_ascii_case("otf")
                })
        });

    let font = SYSTEM_FONTS
        .iter()
        .map(PathBuf::from)
        .chain(user_fonts)
        .find_map(|path| {
            let bytes = std::fs::read(&path).ok()?;
            let font = FontArc::try_from_vec(bytes).ok()?;
            log::debug!("Text tool using {}", path.display());
            Some(font)
        });
    if font.is_none() {
        log::warn!("No system font found for the text tool");
    }
    font
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ShapeColor;
    use crate::domain::Point;

    #[test]
    fn test_blend_full_and_zero_coverage() {
        let mut pixel = Rgba([10, 20, 30, 255]);
        blend_pixel(&mut pixel, [200, 100, 0], 0.0);
        assert_eq!(pixel, Rgba([10, 20, 30, 255]));
        blend_pixel(&mut pixel, [200, 100, 0], 1.0);
        assert_eq!(pixel, Rgba([200, 100, 0, 255]));
    }

    #[test]
    fn test_blend_half_coverage() {
        let mut pixel = Rgba([0, 0, 0, 255]);
        blend_pixel(&mut pixel, [200, 100, 50], 0.5);
        assert_eq!(pixel, Rgba([100, 50, 25, 255]));

        let mut clear = Rgba([0, 0, 0, 0]);
        blend_pixel(&mut clear, [200, 100, 50], 0.5);
        assert_eq!(clear, Rgba([200, 100, 50, 128]));
    }

    #[test]
    fn test_draw_text_with_system_font() {
        // This test is skipped on systems without a known font file
        let Some(font) = system_font() else {
            return;
        };
        let mut img = RgbaImage::from_pixel(120, 50, Rgba([255, 255, 255, 255]));
        let annotation = TextAnnotation {
            origin: Point::new(5.0, 35.0),
            text: "Hello".into(),
            size: 30.0,
            color: ShapeColor::new(0, 0, 0),
        };
        assert!(draw_text(&mut img, &font, &annotation));

        let dark = img.pixels().filter(|p| p[0] < 128).count();
        assert!(dark > 20, "expected inked pixels, got {dark}");
        // "Hello" has no descenders, so nothing reaches row 45
        assert!(img.rows().skip(45).flatten().all(|p| p[0] == 255));
    }

    #[test]
    fn test_whitespace_draws_nothing() {
        let Some(font) = system_font() else {
            return;
        };
        let mut img = RgbaImage::from_pixel(40, 40, Rgba([255, 255, 255, 255]));
        let annotation = TextAnnotation {
            origin: Point::new(5.0, 30.0),
            text: "   ".into(),
            size: 20.0,
            color: ShapeColor::BLACK,
        };
        assert!(!draw_text(&mut img, &font, &annotation));
        assert!(img.pixels().all(|p| *p == Rgba([255, 255, 255, 255])));
    }
}
