//! Polygon rasterization, alpha-masked compositing, and bounding-box
//! tightening.

use image::{GrayImage, Luma, Rgba, RgbaImage};
use imageproc::{drawing::draw_polygon_mut, point::Point};

use crate::{
    error::{CutoutError, Result},
    types::ShapeProfile,
};

/// Rasterize a shape profile into a binary alpha mask of the given size.
///
/// Polygon interior and boundary are set to 255, everything else stays 0.
/// Consecutive duplicate vertices and an explicit closing vertex are dropped
/// before drawing (`draw_polygon_mut` closes the ring itself and rejects a
/// pre-closed one); if fewer than 3 vertices remain the profile is
/// degenerate.
pub fn rasterize_profile(profile: &ShapeProfile, width: u32, height: u32) -> Result<GrayImage> {
    let mut polygon: Vec<Point<i32>> = Vec::with_capacity(profile.len());
    for &[x, y] in profile.points() {
        let point = Point::new(x, y);
        if polygon.last() != Some(&point) {
            polygon.push(point);
        }
    }
    if polygon.len() > 1 && polygon.first() == polygon.last() {
        polygon.pop();
    }

    if polygon.len() < 3 {
        return Err(CutoutError::DegeneratePolygon {
            points: polygon.len(),
        });
    }

    let mut mask = GrayImage::new(width, height);
    draw_polygon_mut(&mut mask, &polygon, Luma([255u8]));
    Ok(mask)
}

/// Composite a source image through the profile's mask.
///
/// The output has the source's dimensions; every pixel is either copied
/// verbatim from the source (where the mask is opaque) or fully transparent.
pub fn crop_with_profile(source: &RgbaImage, profile: &ShapeProfile) -> Result<RgbaImage> {
    let mask = rasterize_profile(profile, source.width(), source.height())?;

    let composited = RgbaImage::from_fn(source.width(), source.height(), |x, y| {
        if mask.get_pixel(x, y)[0] != 0 {
            *source.get_pixel(x, y)
        } else {
            Rgba([0, 0, 0, 0])
        }
    });

    Ok(composited)
}

/// Crop an image to the minimal bounding box of its non-transparent pixels.
///
/// An image with no opaque pixel at all is returned unchanged rather than
/// collapsed to an empty crop.
pub fn tighten(image: RgbaImage) -> RgbaImage {
    let mut bounds: Option<(u32, u32, u32, u32)> = None;

    for (x, y, pixel) in image.enumerate_pixels() {
        if pixel[3] == 0 {
            continue;
        }
        bounds = Some(match bounds {
            None => (x, y, x, y),
            Some((min_x, min_y, max_x, max_y)) => {
                (min_x.min(x), min_y.min(y), max_x.max(x), max_y.max(y))
            }
        });
    }

    match bounds {
        None => image,
        Some((min_x, min_y, max_x, max_y)) => {
            image::imageops::crop_imm(&image, min_x, min_y, max_x - min_x + 1, max_y - min_y + 1)
                .to_image()
        }
    }
}
