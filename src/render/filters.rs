//! Pixel filters applied by the blur and pixelate brushes
//!
//! Both filters work on a standalone region image (not the whole surface) and
//! never touch the alpha channel. Averages truncate toward zero.

use image::RgbaImage;

use super::geometry::filter::{BLUR_RADIUS, PIXELATE_BLOCK};

/// Replace every pixel's RGB with the mean of its 7×7 neighborhood
///
/// Pixels are blurred in place in row-major order, so a pixel's window already
/// holds blurred values above and to the left of it. Cells outside the region
/// are skipped and edge pixels average over fewer samples.
pub fn apply_blur(region: &mut RgbaImage) {
    let (width, height) = region.dimensions();
    let (w, h) = (width as i32, height as i32);

    for y in 0..h {
        for x in 0..w {
            let mut total = [0u32; 3];
            let mut count = 0u32;

            for ny in (y - BLUR_RADIUS).max(0)..=(y + BLUR_RADIUS).min(h - 1) {
                for nx in (x - BLUR_RADIUS).max(0)..=(x + BLUR_RADIUS).min(w - 1) {
                    let pixel = region.get_pixel(nx as u32, ny as u32);
                    total[0] += u32::from(pixel[0]);
                    total[1] += u32::from(pixel[1]);
                    total[2] += u32::from(pixel[2]);
                    count += 1;
                }
            }

            let pixel = region.get_pixel_mut(x as u32, y as u32);
            pixel[0] = (total[0] / count) as u8;
            pixel[1] = (total[1] / count) as u8;
            pixel[2] = (total[2] / count) as u8;
        }
    }
}

/// Flatten the region into 10×10 blocks of their mean RGB
///
/// Blocks are anchored at the region's top-left corner; the last row and
/// column of blocks are clipped to the region.
pub fn apply_pixelate(region: &mut RgbaImage) {
    pixelate_blocks(region, PIXELATE_BLOCK);
}

fn pixelate_blocks(region: &mut RgbaImage, block_size: u32) {
    let (width, height) = region.dimensions();
    let block_size = block_size.max(1);

    let mut block_y = 0;
    while block_y < height {
        let block_end_y = (block_y + block_size).min(height);

        let mut block_x = 0;
        while block_x < width {
            let block_end_x = (block_x + block_size).min(width);

            // Calculate average color for this block
            let mut total_r: u64 = 0;
            let mut total_g: u64 = 0;
            let mut total_b: u64 = 0;
            let mut pixel_count: u64 = 0;

            for py in block_y..block_end_y {
                for px in block_x..block_end_x {
                    let pixel = region.get_pixel(px, py);
                    total_r += u64::from(pixel[0]);
                    total_g += u64::from(pixel[1]);
                    total_b += u64::from(pixel[2]);
                    pixel_count += 1;
                }
            }

            let avg = [
                (total_r / pixel_count) as u8,
                (total_g / pixel_count) as u8,
                (total_b / pixel_count) as u8,
            ];

            for py in block_y..block_end_y {
                for px in block_x..block_end_x {
                    let pixel = region.get_pixel_mut(px, py);
                    pixel[0] = avg[0];
                    pixel[1] = avg[1];
                    pixel[2] = avg[2];
                }
            }

            block_x += block_size;
        }
        block_y += block_size;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    /// Deterministic noise image with varying alpha
    fn noisy(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_fn(width, height, |x, y| {
            let v = x.wrapping_mul(73) ^ y.wrapping_mul(151);
            Rgba([
                (v % 256) as u8,
                ((v * 7) % 256) as u8,
                ((x * 13 + y * 29) % 256) as u8,
                (100 + (x + y) % 150) as u8,
            ])
        })
    }

    #[test]
    fn test_blur_preserves_size_and_alpha() {
        let original = noisy(23, 17);
        let mut region = original.clone();
        apply_blur(&mut region);

        assert_eq!(region.dimensions(), original.dimensions());
        for (after, before) in region.pixels().zip(original.pixels()) {
            assert_eq!(after[3], before[3]);
        }
    }

    #[test]
    fn test_blur_edge_divides_by_in_bounds_count() {
        // Single bright pixel in the corner: the corner's 4×4 in-bounds window
        // holds 16 cells, so the corner averages to 160 / 16 = 10.
        let mut region = RgbaImage::from_pixel(10, 10, Rgba([0, 0, 0, 255]));
        region.put_pixel(0, 0, Rgba([160, 0, 0, 255]));
        apply_blur(&mut region);

        assert_eq!(region.get_pixel(0, 0)[0], 10);
        // Later pixels see the blurred corner (10), which truncates away
        for (x, y, pixel) in region.enumerate_pixels().skip(1) {
            assert_eq!(pixel[0], 0, "pixel ({x}, {y})");
        }
    }

    #[test]
    fn test_blur_truncates() {
        // (0 + 255) / 2 truncates to 127; the second pixel then sees 127
        let mut region = RgbaImage::new(2, 1);
        region.put_pixel(0, 0, Rgba([0, 0, 0, 255]));
        region.put_pixel(1, 0, Rgba([255, 255, 255, 255]));
        apply_blur(&mut region);
        assert_eq!(region.get_pixel(0, 0).0, [127, 127, 127, 255]);
        assert_eq!(region.get_pixel(1, 0).0, [191, 191, 191, 255]);
    }

    #[test]
    fn test_blur_reads_already_blurred_neighbors() {
        let mut region = RgbaImage::from_fn(14, 1, |x, _| {
            if x < 7 {
                Rgba([0, 0, 0, 255])
            } else {
                Rgba([140, 140, 140, 255])
            }
        });
        apply_blur(&mut region);

        let row: Vec<u8> = region.pixels().map(|p| p[0]).collect();
        assert_eq!(
            row,
            [0, 0, 0, 0, 20, 42, 68, 98, 109, 119, 126, 129, 130, 131]
        );
    }

    #[test]
    fn test_uniform_region_is_fixed_point() {
        let uniform = RgbaImage::from_pixel(25, 13, Rgba([12, 200, 99, 77]));

        let mut blurred = uniform.clone();
        apply_blur(&mut blurred);
        assert_eq!(blurred, uniform);
        apply_blur(&mut blurred);
        assert_eq!(blurred, uniform);

        let mut pixelated = uniform.clone();
        apply_pixelate(&mut pixelated);
        assert_eq!(pixelated, uniform);
        apply_pixelate(&mut pixelated);
        assert_eq!(pixelated, uniform);
    }

    #[test]
    fn test_pixelate_blocks_are_floor_means() {
        let original = noisy(25, 14);
        let mut region = original.clone();
        apply_pixelate(&mut region);

        // Blocks: x in [0,10), [10,20), [20,25); y in [0,10), [10,14)
        for (bx0, bx1) in [(0, 10), (10, 20), (20, 25)] {
            for (by0, by1) in [(0, 10), (10, 14)] {
                let mut sum = [0u64; 3];
                let mut n = 0u64;
                for y in by0..by1 {
                    for x in bx0..bx1 {
                        let p = original.get_pixel(x, y);
                        for c in 0..3 {
                            sum[c] += u64::from(p[c]);
                        }
                        n += 1;
                    }
                }
                let expected = [(sum[0] / n) as u8, (sum[1] / n) as u8, (sum[2] / n) as u8];

                for y in by0..by1 {
                    for x in bx0..bx1 {
                        let p = region.get_pixel(x, y);
                        assert_eq!(
                            [p[0], p[1], p[2]],
                            expected,
                            "block ({bx0},{by0}) at ({x},{y})"
                        );
                        assert_eq!(p[3], original.get_pixel(x, y)[3]);
                    }
                }
            }
        }
    }

    #[test]
    fn test_empty_region_is_noop() {
        let mut region = RgbaImage::new(0, 0);
        apply_blur(&mut region);
        apply_pixelate(&mut region);
        assert_eq!(region.dimensions(), (0, 0));
    }
}
