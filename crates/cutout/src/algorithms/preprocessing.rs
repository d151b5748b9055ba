use image::GrayImage;

use crate::{error::Result, traits::ImagePreprocessor};

/// Simple thresholding preprocessor
///
/// Pixels with intensity strictly above the threshold become foreground
/// (255), everything else background (0). The default threshold of 0 keeps
/// every non-zero pixel, matching the binary-mask reading of templates.
#[derive(Debug, Clone)]
pub struct ThresholdPreprocessor {
    pub threshold: u8,
}

impl Default for ThresholdPreprocessor {
    fn default() -> Self {
        Self { threshold: 0 }
    }
}

impl ImagePreprocessor for ThresholdPreprocessor {
    fn preprocess(&self, image: &GrayImage) -> Result<GrayImage> {
        Ok(imageproc::contrast::threshold(image, self.threshold))
    }
}

/// Gaussian blur preprocessor for noise reduction
#[derive(Debug, Clone)]
pub struct GaussianBlurPreprocessor {
    pub sigma: f32,
}

impl Default for GaussianBlurPreprocessor {
    fn default() -> Self {
        Self { sigma: 1.0 }
    }
}

impl ImagePreprocessor for GaussianBlurPreprocessor {
    fn preprocess(&self, image: &GrayImage) -> Result<GrayImage> {
        Ok(imageproc::filter::gaussian_blur_f32(image, self.sigma))
    }
}
