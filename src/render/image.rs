//! Image rendering for overlays using tiny-skia
//!
//! These functions burn annotations into an `RgbaImage`. The same call serves
//! both the live preview and the final commit; the editor decides which
//! pixels the shape is drawn over.

use ab_glyph::FontArc;
use image::{Rgba, RgbaImage};
use tiny_skia::{ColorU8, FillRule, IntSize, Paint, PathBuilder, Pixmap, Stroke, Transform};

use super::geometry::{self, arrow, redact};
use super::text;
use crate::domain::{Annotation, ArrowAnnotation, RedactAnnotation};

/// Convert RgbaImage to a premultiplied Pixmap, apply drawing function, and copy back
fn with_pixmap(img: &mut RgbaImage, f: impl FnOnce(&mut Pixmap)) {
    let (w, h) = (img.width(), img.height());
    let Some(size) = IntSize::from_wh(w, h) else {
        return;
    };

    let mut data = Vec::with_capacity(img.as_raw().len());
    for pixel in img.pixels() {
        let [r, g, b, a] = pixel.0;
        let premultiplied = ColorU8::from_rgba(r, g, b, a).premultiply();
        data.extend_from_slice(&[
            premultiplied.red(),
            premultiplied.green(),
            premultiplied.blue(),
            premultiplied.alpha(),
        ]);
    }
    let before = data.clone();
    let Some(mut pixmap) = Pixmap::from_vec(data, size) else {
        return;
    };

    f(&mut pixmap);

    // Copy back only the pixels the drawing touched
    for ((dst, src), old) in img
        .pixels_mut()
        .zip(pixmap.pixels())
        .zip(before.chunks_exact(4))
    {
        if [src.red(), src.green(), src.blue(), src.alpha()] == old {
            continue;
        }
        let color = src.demultiply();
        *dst = Rgba([color.red(), color.green(), color.blue(), color.alpha()]);
    }
}

fn solid_paint(r: u8, g: u8, b: u8, a: u8) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color_rgba8(r, g, b, a);
    paint.anti_alias = true;
    paint
}

/// Fill the rectangle spanned by a redaction's two corners
///
/// Negative extents describe the same pixels as the normalized rectangle. A
/// zero-area rectangle draws nothing.
pub fn draw_redaction(img: &mut RgbaImage, redaction: &RedactAnnotation) {
    let (min_x, min_y, max_x, max_y) = geometry::normalize_rect(
        redaction.start.x,
        redaction.start.y,
        redaction.end.x,
        redaction.end.y,
    );
    let Some(rect) = tiny_skia::Rect::from_ltrb(min_x, min_y, max_x, max_y) else {
        log::trace!("Skipping degenerate redaction {:?}", redaction);
        return;
    };

    with_pixmap(img, |pixmap| {
        let alpha = (redact::OPACITY * 255.0).round() as u8;
        let paint = solid_paint(0, 0, 0, alpha);
        pixmap.fill_rect(rect, &paint, Transform::identity(), None);
    });
}

/// Build the arrowhead as a closed triangle at the arrow's end point
fn build_head_path(annotation: &ArrowAnnotation) -> Option<tiny_skia::Path> {
    let (left, right) = arrow::head_points(annotation.start, annotation.end);

    let mut pb = PathBuilder::new();
    pb.move_to(annotation.end.x, annotation.end.y);
    pb.line_to(left.x, left.y);
    pb.line_to(right.x, right.y);
    pb.close();
    pb.finish()
}

/// Draw an arrow: stroked shaft plus filled triangular head
pub fn draw_arrow(img: &mut RgbaImage, annotation: &ArrowAnnotation) {
    let [r, g, b, a] = annotation.color.to_rgba_u8();

    with_pixmap(img, |pixmap| {
        let paint = solid_paint(r, g, b, a);

        let mut pb = PathBuilder::new();
        pb.move_to(annotation.start.x, annotation.start.y);
        pb.line_to(annotation.end.x, annotation.end.y);
        // A zero-length shaft has no path; the head is still drawn
        if let Some(shaft) = pb.finish() {
            let stroke = Stroke {
                width: arrow::THICKNESS,
                ..Default::default()
            };
            pixmap.stroke_path(&shaft, &paint, &stroke, Transform::identity(), None);
        }

        if let Some(head) = build_head_path(annotation) {
            pixmap.fill_path(
                &head,
                &paint,
                FillRule::Winding,
                Transform::identity(),
                None,
            );
        }
    });
}

/// Draw any annotation onto the image
///
/// Text needs a font; without one it is skipped and `false` is returned.
pub fn draw_annotation(
    img: &mut RgbaImage,
    annotation: &Annotation,
    font: Option<&FontArc>,
) -> bool {
    match annotation {
        Annotation::Redact(redaction) => {
            draw_redaction(img, redaction);
            true
        }
        Annotation::Arrow(arrow) => {
            draw_arrow(img, arrow);
            true
        }
        Annotation::Text(label) => match font {
            Some(font) => text::draw_text(img, font, label),
            None => {
                log::warn!("No font available, text {:?} not drawn", label.text);
                false
            }
        },
    }
}
