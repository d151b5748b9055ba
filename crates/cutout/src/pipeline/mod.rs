pub mod builder;

use image::{GrayImage, RgbaImage};
use tracing::debug;

use crate::{
    algorithms::largest_profile,
    crop,
    error::Result,
    traits::{ContourTracer, ImagePreprocessor},
    types::ShapeProfile,
};

/// The shape-to-mask pipeline: template preprocessing, contour tracing,
/// largest-contour selection, mask compositing, and tightening
pub struct Pipeline {
    preprocessors: Vec<Box<dyn ImagePreprocessor>>,
    tracer: Box<dyn ContourTracer>,
}

impl Pipeline {
    /// Create a new pipeline builder
    pub fn builder() -> builder::PipelineBuilder {
        builder::PipelineBuilder::new()
    }

    /// Create a new pipeline with the given components
    pub fn new(
        preprocessors: Vec<Box<dyn ImagePreprocessor>>,
        tracer: Box<dyn ContourTracer>,
    ) -> Self {
        Self {
            preprocessors,
            tracer,
        }
    }

    /// Extract the dominant shape profile from a grayscale template
    pub fn extract_profile(&self, template: &GrayImage) -> Result<ShapeProfile> {
        let mut processed = template.clone();
        for preprocessor in &self.preprocessors {
            processed = preprocessor.preprocess(&processed)?;
        }

        let contours = self.tracer.trace(&processed)?;
        let profile = largest_profile(contours)?;
        debug!(vertices = profile.len(), "extracted shape profile");

        Ok(profile)
    }

    /// Run one (template, source) pair through the entire pipeline: extract
    /// the profile, composite the source through its mask, and tighten the
    /// result to its opaque bounding box
    pub fn process(&self, template: &GrayImage, source: &RgbaImage) -> Result<RgbaImage> {
        let profile = self.extract_profile(template)?;
        let composited = crop::crop_with_profile(source, &profile)?;
        Ok(crop::tighten(composited))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    #[test]
    fn test_threshold_preprocessor_drops_noise() {
        let mut template = GrayImage::new(30, 30);
        for y in 5..15 {
            for x in 5..15 {
                template.put_pixel(x, y, Luma([220u8]));
            }
        }
        // dim speckle larger than the bright region
        for y in 16..29 {
            for x in 5..25 {
                template.put_pixel(x, y, Luma([40u8]));
            }
        }

        let pipeline = builder::PipelineBuilder::build_simple(128);
        let profile = pipeline
            .extract_profile(&template)
            .expect("extraction should succeed");

        assert_eq!(profile.bounding_box(), Some(([5, 5], [14, 14])));
    }
}
