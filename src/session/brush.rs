//! Brush strokes: repeated local filter applications along a pointer path
//!
//! Every dab reads from the pre-stroke buffer and writes into the committed
//! image, so overlapping dabs within one stroke never filter already-filtered
//! pixels.

use image::RgbaImage;

use crate::domain::{Point, Region, Tool};
use crate::render::filters;
use crate::surface::{Buffer, EditSurface};

/// Filter a brush applies under its square
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BrushFilter {
    Blur,
    Pixelate,
}

impl BrushFilter {
    /// The filter for a brush tool, `None` for other tools
    pub fn for_tool(tool: Tool) -> Option<Self> {
        match tool {
            Tool::Blur => Some(BrushFilter::Blur),
            Tool::Pixelate => Some(BrushFilter::Pixelate),
            Tool::Rectangle | Tool::Arrow | Tool::Text => None,
        }
    }

    pub fn apply(self, region: &mut RgbaImage) {
        match self {
            BrushFilter::Blur => filters::apply_blur(region),
            BrushFilter::Pixelate => filters::apply_pixelate(region),
        }
    }
}

/// One brush stroke in progress
#[derive(Clone, Debug)]
pub struct BrushStroke {
    filter: BrushFilter,
    diameter: u32,
    dabs: usize,
}

impl BrushStroke {
    /// Start a stroke: freeze the committed image as the stroke's read source
    pub fn begin(surface: &mut EditSurface, filter: BrushFilter, diameter: u32) -> Self {
        surface.freeze();
        Self {
            filter,
            diameter,
            dabs: 0,
        }
    }

    /// Filter the square under `at`
    ///
    /// Returns the region written, or `None` when the square misses the surface.
    pub fn dab(&mut self, surface: &mut EditSurface, at: Point) -> Option<Region> {
        let (width, height) = surface.dimensions();
        let region = Region::centered(at, self.diameter, width, height)?;
        let mut pixels = surface.get_region(Buffer::PreStroke, region)?;
        self.filter.apply(&mut pixels);
        surface.put_region(Buffer::Committed, region, &pixels);
        self.dabs += 1;
        Some(region)
    }

    /// Number of dabs that hit the surface so far
    pub fn dabs(&self) -> usize {
        self.dabs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    /// Vertical stripes so blur and pixelate both change pixels
    fn stripes(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_fn(width, height, |x, _| {
            if (x / 2) % 2 == 0 {
                Rgba([250, 10, 10, 255])
            } else {
                Rgba([10, 10, 250, 255])
            }
        })
    }

    fn surface_with(image: &RgbaImage) -> EditSurface {
        let mut surface = EditSurface::new();
        surface.load_image(image);
        surface
    }

    #[test]
    fn test_filter_for_tool() {
        assert_eq!(BrushFilter::for_tool(Tool::Blur), Some(BrushFilter::Blur));
        assert_eq!(BrushFilter::for_tool(Tool::Pixelate), Some(BrushFilter::Pixelate));
        assert_eq!(BrushFilter::for_tool(Tool::Arrow), None);
    }

    #[test]
    fn test_dab_filters_only_its_square() {
        let original = stripes(60, 60);
        let mut surface = surface_with(&original);
        let mut stroke = BrushStroke::begin(&mut surface, BrushFilter::Blur, 20);

        let region = stroke.dab(&mut surface, Point::new(30.0, 30.0)).unwrap();
        assert_eq!(region, Region::new(20, 20, 20, 20));
        assert_eq!(stroke.dabs(), 1);

        let mut expected = surface
            .get_region(Buffer::PreStroke, region)
            .unwrap();
        filters::apply_blur(&mut expected);
        assert_eq!(surface.get_region(Buffer::Committed, region).unwrap(), expected);

        assert_eq!(surface.committed().get_pixel(5, 5), original.get_pixel(5, 5));
        assert_eq!(surface.committed().get_pixel(45, 30), original.get_pixel(45, 30));
    }

    #[test]
    fn test_overlapping_dabs_read_pre_stroke_pixels() {
        let original = stripes(80, 40);
        let mut surface = surface_with(&original);
        let mut stroke = BrushStroke::begin(&mut surface, BrushFilter::Blur, 20);

        stroke.dab(&mut surface, Point::new(30.0, 20.0)).unwrap();
        let second = stroke.dab(&mut surface, Point::new(36.0, 20.0)).unwrap();

        // Second dab's output must be the filter of the original pixels, even
        // where it overlaps the first dab
        let mut expected = image::imageops::crop_imm(
            &original,
            second.x,
            second.y,
            second.width,
            second.height,
        )
        .to_image();
        filters::apply_blur(&mut expected);
        assert_eq!(surface.get_region(Buffer::Committed, second).unwrap(), expected);

        // Filtering the first dab's output instead would give a different result
        let mut compounded = surface.get_region(Buffer::Committed, second).unwrap();
        filters::apply_blur(&mut compounded);
        assert_ne!(compounded, expected);
    }

    #[test]
    fn test_repeated_dab_is_stable() {
        let original = stripes(40, 40);
        let mut surface = surface_with(&original);
        let mut stroke = BrushStroke::begin(&mut surface, BrushFilter::Pixelate, 30);

        stroke.dab(&mut surface, Point::new(20.0, 20.0));
        let once = surface.committed().clone();
        for _ in 0..5 {
            stroke.dab(&mut surface, Point::new(20.0, 20.0));
        }
        assert_eq!(*surface.committed(), once);
    }

    #[test]
    fn test_dab_outside_surface_is_noop() {
        let original = stripes(20, 20);
        let mut surface = surface_with(&original);
        let mut stroke = BrushStroke::begin(&mut surface, BrushFilter::Blur, 10);
        assert!(stroke.dab(&mut surface, Point::new(40.0, 5.0)).is_none());
        assert!(stroke.dab(&mut surface, Point::new(5.0, 40.0)).is_none());
        assert_eq!(stroke.dabs(), 0);
        assert_eq!(*surface.committed(), original);
    }

    #[test]
    fn test_dab_at_edge_is_clamped() {
        let original = stripes(20, 20);
        let mut surface = surface_with(&original);
        let mut stroke = BrushStroke::begin(&mut surface, BrushFilter::Pixelate, 10);
        let region = stroke.dab(&mut surface, Point::new(19.0, 0.0)).unwrap();
        assert_eq!(region, Region::new(14, 0, 6, 10));
    }

    #[test]
    fn test_dab_near_left_edge_keeps_full_width() {
        let original = stripes(100, 100);
        let mut surface = surface_with(&original);
        let mut stroke = BrushStroke::begin(&mut surface, BrushFilter::Blur, 30);
        let region = stroke.dab(&mut surface, Point::new(2.0, 50.0)).unwrap();
        assert_eq!(region, Region::new(0, 35, 30, 30));

        // Column 29 is filtered, column 30 is not
        assert_ne!(surface.committed().get_pixel(29, 50), original.get_pixel(29, 50));
        assert_eq!(surface.committed().get_pixel(30, 50), original.get_pixel(30, 50));
    }
}
