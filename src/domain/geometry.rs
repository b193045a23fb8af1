//! Geometric types for pointer positions and pixel regions

/// A pointer position in buffer pixel coordinates
///
/// Input collaborators scale display coordinates to buffer resolution before
/// handing points to the engine, so fractional values are expected.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Integer rectangle in buffer coordinates
///
/// A `Region` produced by [`Region::clipped`] or [`Region::centered`] always lies
/// inside the buffer it was clipped against and has a non-zero area.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Region {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Region {
    /// Create a region from its top-left corner and size
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// The whole of a `width`×`height` buffer
    pub fn full(width: u32, height: u32) -> Self {
        Self::new(0, 0, width, height)
    }

    /// Clip a signed rectangle to a `bounds_w`×`bounds_h` buffer
    ///
    /// Returns `None` when nothing of the rectangle lies inside the buffer.
    pub fn clipped(
        left: i64,
        top: i64,
        width: i64,
        height: i64,
        bounds_w: u32,
        bounds_h: u32,
    ) -> Option<Region> {
        let x0 = left.max(0);
        let y0 = top.max(0);
        let x1 = left.saturating_add(width).min(i64::from(bounds_w));
        let y1 = top.saturating_add(height).min(i64::from(bounds_h));
        if x0 >= x1 || y0 >= y1 {
            return None;
        }
        Some(Region {
            x: x0 as u32,
            y: y0 as u32,
            width: (x1 - x0) as u32,
            height: (y1 - y0) as u32,
        })
    }

    /// Square of side `side` around `center`, clipped to the buffer
    ///
    /// The top-left corner sits at `floor(center - side / 2)` on both axes,
    /// moved to 0 when that is negative. A square near the left or top edge
    /// keeps its full side; only the right and bottom edges cut it short.
    pub fn centered(center: Point, side: u32, bounds_w: u32, bounds_h: u32) -> Option<Region> {
        if side == 0 || !center.x.is_finite() || !center.y.is_finite() {
            return None;
        }
        let half = side as f32 / 2.0;
        let left = ((center.x - half).floor() as i64).max(0);
        let top = ((center.y - half).floor() as i64).max(0);
        Self::clipped(
            left,
            top,
            i64::from(side),
            i64::from(side),
            bounds_w,
            bounds_h,
        )
    }

    /// Calculate the intersection of two regions
    pub fn intersect(&self, other: Region) -> Option<Region> {
        let left = self.x.max(other.x);
        let top = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        if left < right && top < bottom {
            Some(Region {
                x: left,
                y: top,
                width: right - left,
                height: bottom - top,
            })
        } else {
            None
        }
    }

    /// Exclusive right edge
    pub fn right(&self) -> u32 {
        self.x.saturating_add(self.width)
    }

    /// Exclusive bottom edge
    pub fn bottom(&self) -> u32 {
        self.y.saturating_add(self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clipped_inside() {
        let region = Region::clipped(10, 20, 30, 40, 100, 100).unwrap();
        assert_eq!(region, Region::new(10, 20, 30, 40));
    }

    #[test]
    fn test_clipped_overhanging_edges() {
        let region = Region::clipped(-5, 90, 20, 20, 100, 100).unwrap();
        assert_eq!(region, Region::new(0, 90, 15, 10));
    }

    #[test]
    fn test_clipped_outside_is_none() {
        assert!(Region::clipped(150, 10, 20, 20, 100, 100).is_none());
        assert!(Region::clipped(-30, 10, 20, 20, 100, 100).is_none());
        assert!(Region::clipped(10, 10, 0, 20, 100, 100).is_none());
    }

    #[test]
    fn test_centered_square() {
        let region = Region::centered(Point::new(50.0, 50.0), 30, 100, 100).unwrap();
        assert_eq!(region, Region::new(35, 35, 30, 30));
    }

    #[test]
    fn test_centered_near_left_edge_keeps_full_side() {
        let region = Region::centered(Point::new(2.0, 50.0), 30, 100, 100).unwrap();
        assert_eq!(region, Region::new(0, 35, 30, 30));
    }

    #[test]
    fn test_centered_near_corner_is_clamped() {
        let region = Region::centered(Point::new(2.0, 98.5), 30, 100, 100).unwrap();
        assert_eq!(region, Region::new(0, 83, 30, 17));
        assert_eq!(region.bottom(), 100);
    }

    #[test]
    fn test_centered_past_far_edge_is_none() {
        assert!(Region::centered(Point::new(130.0, 50.0), 30, 100, 100).is_none());
        // Negative positions are pulled back to the near edge
        let region = Region::centered(Point::new(-40.0, 50.0), 10, 100, 100).unwrap();
        assert_eq!(region, Region::new(0, 45, 10, 10));
    }

    #[test]
    fn test_centered_zero_side() {
        assert!(Region::centered(Point::new(50.0, 50.0), 0, 100, 100).is_none());
    }

    #[test]
    fn test_intersect() {
        let a = Region::new(0, 0, 10, 10);
        let b = Region::new(5, 5, 10, 10);
        assert_eq!(a.intersect(b), Some(Region::new(5, 5, 5, 5)));
        assert_eq!(a.intersect(Region::new(10, 0, 5, 5)), None);
    }
}
