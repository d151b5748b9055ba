use crate::{
    algorithms::{GaussianBlurPreprocessor, ImageprocContourTracer, ThresholdPreprocessor},
    pipeline::Pipeline,
    traits::{ContourTracer, ImagePreprocessor},
};

/// Builder for creating cutout pipelines with a fluent API
pub struct PipelineBuilder {
    preprocessors: Vec<Box<dyn ImagePreprocessor>>,
    tracer: Option<Box<dyn ContourTracer>>,
}

impl PipelineBuilder {
    /// Create a new pipeline builder
    pub fn new() -> Self {
        Self {
            preprocessors: Vec::new(),
            tracer: None,
        }
    }

    /// Add a preprocessor to the pipeline
    pub fn add_preprocessor<P>(mut self, preprocessor: P) -> Self
    where
        P: ImagePreprocessor + 'static,
    {
        self.preprocessors.push(Box::new(preprocessor));
        self
    }

    /// Set the contour tracer (replaces any existing one)
    pub fn set_tracer<C>(mut self, tracer: C) -> Self
    where
        C: ContourTracer + 'static,
    {
        self.tracer = Some(Box::new(tracer));
        self
    }

    /// Add threshold binarization as a preprocessing step
    pub fn with_threshold(self, threshold: u8) -> Self {
        self.add_preprocessor(ThresholdPreprocessor { threshold })
    }

    /// Add Gaussian blur as a preprocessing step
    pub fn with_blur(self, sigma: f32) -> Self {
        self.add_preprocessor(GaussianBlurPreprocessor { sigma })
    }

    /// Build the pipeline with default components if not specified
    pub fn build(self) -> Pipeline {
        let tracer = self
            .tracer
            .unwrap_or_else(|| Box::new(ImageprocContourTracer));

        Pipeline::new(self.preprocessors, tracer)
    }

    /// Build a simple pipeline with basic threshold preprocessing
    pub fn build_simple(threshold: u8) -> Pipeline {
        Self::new().with_threshold(threshold).build()
    }
}

impl Default for PipelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}
