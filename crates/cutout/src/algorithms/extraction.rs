use image::GrayImage;
use imageproc::contours::BorderType;

use crate::{error::Result, traits::ContourTracer};

/// Imageproc-based contour tracer
///
/// Keeps external boundaries only; hole contours are discarded.
#[derive(Debug, Clone, Default)]
pub struct ImageprocContourTracer;

impl ContourTracer for ImageprocContourTracer {
    fn trace(&self, binary_image: &GrayImage) -> Result<Vec<Vec<[i32; 2]>>> {
        let contours = imageproc::contours::find_contours::<i32>(binary_image);

        let result = contours
            .into_iter()
            .filter(|contour| contour.border_type == BorderType::Outer)
            .map(|contour| contour.points.iter().map(|p| [p.x, p.y]).collect())
            .collect();

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    fn fill_rect(img: &mut GrayImage, x0: u32, y0: u32, x1: u32, y1: u32) {
        for y in y0..=y1 {
            for x in x0..=x1 {
                img.put_pixel(x, y, Luma([255u8]));
            }
        }
    }

    #[test]
    fn test_traces_one_contour_per_blob() {
        let mut img = GrayImage::new(40, 40);
        fill_rect(&mut img, 2, 2, 10, 10);
        fill_rect(&mut img, 20, 20, 30, 30);

        let contours = ImageprocContourTracer
            .trace(&img)
            .expect("tracing should not fail");
        assert_eq!(contours.len(), 2);
    }

    #[test]
    fn test_holes_are_ignored() {
        let mut img = GrayImage::new(20, 20);
        fill_rect(&mut img, 2, 2, 15, 15);
        // carve a hole; its boundary must not be reported
        for y in 6..=10 {
            for x in 6..=10 {
                img.put_pixel(x, y, Luma([0u8]));
            }
        }

        let contours = ImageprocContourTracer
            .trace(&img)
            .expect("tracing should not fail");
        assert_eq!(contours.len(), 1);
    }

    #[test]
    fn test_blank_image_yields_no_contours() {
        let img = GrayImage::new(16, 16);
        let contours = ImageprocContourTracer
            .trace(&img)
            .expect("tracing should not fail");
        assert!(contours.is_empty());
    }
}
