use image::{GrayImage, RgbaImage};

use crate::{error::Result, types::ShapeProfile};

/// Trait for template preprocessing algorithms
pub trait ImagePreprocessor: Send + Sync {
    /// Preprocess the input image (e.g., blur, threshold)
    fn preprocess(&self, image: &GrayImage) -> Result<GrayImage>;
}

/// Trait for contour tracing algorithms
pub trait ContourTracer: Send + Sync {
    /// Trace the external boundaries of connected foreground regions in a
    /// binary image, one vertex list per region
    fn trace(&self, image: &GrayImage) -> Result<Vec<Vec<[i32; 2]>>>;
}

/// Main trait for shape profile extraction
pub trait ProfileExtractor: Send + Sync {
    /// Extract the dominant shape profile from a grayscale template
    fn extract_profile(&self, image: &GrayImage) -> Result<ShapeProfile>;
}

/// Trait for batch output destinations
pub trait OutputSink {
    /// Persist the finished cutout for the given pair index
    fn write(&mut self, pair: usize, image: &RgbaImage) -> Result<()>;
}

/// Trait for batch progress reporting
pub trait ProgressObserver {
    /// Called after each pair completes with the fraction of pairs done
    fn on_progress(&mut self, fraction: f64);
}
