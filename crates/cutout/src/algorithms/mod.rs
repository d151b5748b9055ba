pub mod extraction;
pub mod preprocessing;

pub use extraction::*;
pub use preprocessing::*;

use geo_types::{Coord, LineString, Polygon};

use crate::{
    error::{CutoutError, Result},
    traits::{ContourTracer, ImagePreprocessor, ProfileExtractor},
    types::ShapeProfile,
};

/// Profile extractor keeping the contour with the greatest enclosed area
#[derive(Debug)]
pub struct LargestProfileExtractor<P, C>
where
    P: ImagePreprocessor,
    C: ContourTracer,
{
    pub preprocessor: P,
    pub tracer: C,
}

impl<P, C> LargestProfileExtractor<P, C>
where
    P: ImagePreprocessor,
    C: ContourTracer,
{
    pub fn new(preprocessor: P, tracer: C) -> Self {
        Self {
            preprocessor,
            tracer,
        }
    }
}

impl<P, C> ProfileExtractor for LargestProfileExtractor<P, C>
where
    P: ImagePreprocessor,
    C: ContourTracer,
{
    fn extract_profile(&self, image: &image::GrayImage) -> Result<ShapeProfile> {
        let binary_image = self.preprocessor.preprocess(image)?;
        let contours = self.tracer.trace(&binary_image)?;
        largest_profile(contours)
    }
}

/// Select the contour enclosing the greatest area.
///
/// Areas are compared with strictly-greater, so an exact tie keeps the
/// earliest contour in tracing order.
pub fn largest_profile(contours: Vec<Vec<[i32; 2]>>) -> Result<ShapeProfile> {
    let mut best: Option<(f64, Vec<[i32; 2]>)> = None;

    for contour in contours {
        let area = contour_area(&contour);
        let replace = match &best {
            None => true,
            Some((best_area, _)) => area > *best_area,
        };
        if replace {
            best = Some((area, contour));
        }
    }

    let (_, points) = best.ok_or(CutoutError::NoContourFound)?;
    if points.len() < 3 {
        return Err(CutoutError::DegeneratePolygon {
            points: points.len(),
        });
    }

    Ok(ShapeProfile::new(points))
}

fn contour_area(points: &[[i32; 2]]) -> f64 {
    use geo::Area;

    let coords: Vec<Coord<f64>> = points
        .iter()
        .map(|&[x, y]| Coord {
            x: x as f64,
            y: y as f64,
        })
        .collect();

    Polygon::new(LineString::new(coords), vec![]).unsigned_area()
}
