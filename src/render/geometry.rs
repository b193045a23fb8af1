//! Shared geometry constants and math for filters and overlays

use crate::domain::Point;

/// Brush filter constants
pub mod filter {
    /// Blur neighborhood radius: each pixel averages a 7×7 window
    pub const BLUR_RADIUS: i32 = 3;
    /// Side length of a pixelation block
    pub const PIXELATE_BLOCK: u32 = 10;
}

/// Arrow geometry constants
pub mod arrow {
    use super::Point;

    /// Shaft stroke width in pixels
    pub const THICKNESS: f32 = 3.0;
    /// Length of the two arrowhead edges in pixels
    pub const HEAD_LENGTH: f32 = 20.0;
    /// Arrowhead angle from the shaft in radians (30 degrees)
    pub const HEAD_ANGLE: f32 = std::f32::consts::FRAC_PI_6;

    /// Calculate the two back corners of the arrowhead at `end`
    ///
    /// The corners sit `HEAD_LENGTH` back from `end` along the shaft direction
    /// rotated by -`HEAD_ANGLE` and +`HEAD_ANGLE`. A zero-length arrow has a
    /// shaft angle of 0 and still gets a head.
    pub fn head_points(start: Point, end: Point) -> (Point, Point) {
        let angle = (end.y - start.y).atan2(end.x - start.x);
        let corner = |theta: f32| {
            Point::new(
                end.x - HEAD_LENGTH * theta.cos(),
                end.y - HEAD_LENGTH * theta.sin(),
            )
        };
        (corner(angle - HEAD_ANGLE), corner(angle + HEAD_ANGLE))
    }
}

/// Redaction rectangle constants
pub mod redact {
    /// Fill opacity of the black redaction box
    pub const OPACITY: f32 = 0.8;
}

/// Normalize min/max coordinates from arbitrary start/end points
#[inline]
pub fn normalize_rect(x1: f32, y1: f32, x2: f32, y2: f32) -> (f32, f32, f32, f32) {
    let (min_x, max_x) = if x1 < x2 { (x1, x2) } else { (x2, x1) };
    let (min_y, max_y) = if y1 < y2 { (y1, y2) } else { (y2, y1) };
    (min_x, min_y, max_x, max_y)
}
