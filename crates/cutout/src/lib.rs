//! # Shape-Masked Cutout Library
//!
//! Batch-crops source images through shape masks derived from grayscale
//! template images, producing tightly-bounded transparent-background
//! cutouts.
//!
//! ## Core Features
//!
//! - **Profile Extraction**: traces the largest external contour of a
//!   template's foreground region into an ordered polygon
//! - **Masked Compositing**: rasterizes the polygon into a binary alpha
//!   mask and copies source pixels through it
//! - **Tightening**: crops the composite to the bounding box of its
//!   non-transparent pixels
//! - **Batch Runner**: cyclic template reuse, per-pair error reporting,
//!   progress observation, atomic PNG output
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use cutout::{Pipeline, io};
//!
//! let pipeline = Pipeline::builder().build();
//!
//! let template = io::load_template("shape.png")?;
//! let source = io::load_source("photo.png")?;
//!
//! let result = pipeline.process(&template, &source)?;
//! io::save_rgba("cutout.png", &result)?;
//! # Ok::<(), cutout::CutoutError>(())
//! ```
//!
//! ## Custom Pipeline
//!
//! ```rust,no_run
//! use cutout::{Pipeline, algorithms::*};
//!
//! let pipeline = Pipeline::builder()
//!     .add_preprocessor(GaussianBlurPreprocessor { sigma: 1.0 })
//!     .add_preprocessor(ThresholdPreprocessor { threshold: 150 })
//!     .build();
//! ```

// Core modules
pub mod algorithms;
pub mod batch;
pub mod crop;
pub mod error;
pub mod io;
pub mod pipeline;
pub mod traits;
pub mod types;

// Re-exports for convenience
pub use algorithms::*;
pub use batch::{BatchRunner, DirectorySink, NoProgress, ProgressFn};
pub use crop::{crop_with_profile, rasterize_profile, tighten};
pub use error::{CutoutError, PairError, Result};
pub use pipeline::{Pipeline, builder::PipelineBuilder};
pub use traits::*;
pub use types::ShapeProfile;

/// Type alias for the common threshold-then-trace extractor configuration
pub type SimpleProfileExtractor =
    LargestProfileExtractor<ThresholdPreprocessor, ImageprocContourTracer>;

impl Default for SimpleProfileExtractor {
    fn default() -> Self {
        Self::new(ThresholdPreprocessor::default(), ImageprocContourTracer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma, Rgba, RgbaImage};

    fn centered_square_template() -> GrayImage {
        let mut img = GrayImage::new(20, 20);
        for y in 5..15 {
            for x in 5..15 {
                img.put_pixel(x, y, Luma([255u8]));
            }
        }
        img
    }

    #[test]
    fn test_end_to_end_square_cutout() {
        let red = Rgba([255, 0, 0, 255]);
        let source = RgbaImage::from_pixel(20, 20, red);
        let template = centered_square_template();

        let pipeline = Pipeline::builder().build();
        let result = pipeline
            .process(&template, &source)
            .expect("pipeline should succeed");

        // the traced boundary spans pixels 5..=14, so the tightened cutout
        // is exactly the 10x10 foreground with no transparent border
        assert_eq!(result.dimensions(), (10, 10));
        for pixel in result.pixels() {
            assert_eq!(*pixel, red);
        }
    }

    #[test]
    fn test_simple_extractor() {
        let extractor = SimpleProfileExtractor::default();
        let profile = extractor
            .extract_profile(&centered_square_template())
            .expect("extraction should succeed");

        assert!(profile.len() >= 3);
        assert_eq!(profile.bounding_box(), Some(([5, 5], [14, 14])));
    }

    #[test]
    fn test_profile_survives_serde_round_trip() {
        let profile = ShapeProfile::new(vec![[1, 2], [5, 2], [3, 6]]);
        let json = serde_json::to_string(&profile).expect("serialize");
        let back: ShapeProfile = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(profile, back);
    }
}
