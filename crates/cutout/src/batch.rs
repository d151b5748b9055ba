//! Batch-sequential processing of (source, template) pairs.
//!
//! Templates are reused cyclically when sources outnumber them: pair `i`
//! uses template `i % template_count`. Each template's profile is extracted
//! on first use and cached for the rest of the batch.

use std::path::PathBuf;

use image::{GrayImage, RgbaImage};
use tracing::debug;

use crate::{
    crop,
    error::{CutoutError, PairError, Result},
    io,
    pipeline::Pipeline,
    traits::{OutputSink, ProgressObserver},
    types::ShapeProfile,
};

/// Observer that discards progress reports
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressObserver for NoProgress {
    fn on_progress(&mut self, _fraction: f64) {}
}

/// Adapter reporting progress through a closure
pub struct ProgressFn<F: FnMut(f64)>(pub F);

impl<F: FnMut(f64)> ProgressObserver for ProgressFn<F> {
    fn on_progress(&mut self, fraction: f64) {
        (self.0)(fraction)
    }
}

/// Sink writing cutouts as 1-based numbered PNG files into a directory
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        Self { dir: dir.into() }
    }
}

impl OutputSink for DirectorySink {
    fn write(&mut self, pair: usize, image: &RgbaImage) -> Result<()> {
        io::save_rgba(self.dir.join(format!("{}.png", pair + 1)), image)
    }
}

/// Drives a [`Pipeline`] over a batch of sources with cyclic template reuse
pub struct BatchRunner<'a> {
    pipeline: &'a Pipeline,
    templates: Vec<GrayImage>,
    profiles: Vec<Option<ShapeProfile>>,
}

impl<'a> BatchRunner<'a> {
    pub fn new(pipeline: &'a Pipeline, templates: Vec<GrayImage>) -> Result<Self> {
        if templates.is_empty() {
            return Err(CutoutError::NoTemplates);
        }
        let profiles = vec![None; templates.len()];
        Ok(Self {
            pipeline,
            templates,
            profiles,
        })
    }

    pub fn template_count(&self) -> usize {
        self.templates.len()
    }

    fn profile_for(&mut self, template_index: usize) -> Result<&ShapeProfile> {
        let slot = &mut self.profiles[template_index];
        match slot {
            Some(profile) => Ok(profile),
            None => {
                let profile = self
                    .pipeline
                    .extract_profile(&self.templates[template_index])?;
                Ok(slot.insert(profile))
            }
        }
    }

    /// Run a single pair: select the template cyclically, composite the
    /// source through its profile's mask, and tighten the result.
    ///
    /// Callers wanting a skip-and-continue failure policy drive this method
    /// directly instead of [`BatchRunner::run`].
    pub fn process_pair(&mut self, pair: usize, source: &RgbaImage) -> Result<RgbaImage> {
        let template_index = pair % self.templates.len();
        debug!(pair, template_index, "processing pair");

        let profile = self.profile_for(template_index)?;
        let composited = crop::crop_with_profile(source, profile)?;
        Ok(crop::tighten(composited))
    }

    /// Process every source to completion in order, writing each cutout
    /// through the sink and reporting fractional progress after each pair.
    ///
    /// Aborts on the first failure, surfacing the failing pair index; the
    /// decision to skip instead belongs to the caller (see
    /// [`BatchRunner::process_pair`]). Returns the number of pairs processed.
    pub fn run<I, S, O>(
        &mut self,
        sources: I,
        sink: &mut S,
        observer: &mut O,
    ) -> std::result::Result<usize, PairError>
    where
        I: IntoIterator<Item = Result<RgbaImage>>,
        I::IntoIter: ExactSizeIterator,
        S: OutputSink,
        O: ProgressObserver,
    {
        let sources = sources.into_iter();
        let total = sources.len();

        for (pair, source) in sources.enumerate() {
            let outcome = source
                .and_then(|image| self.process_pair(pair, &image))
                .and_then(|output| sink.write(pair, &output));

            if let Err(error) = outcome {
                return Err(PairError {
                    pair,
                    source: error,
                });
            }

            observer.on_progress((pair + 1) as f64 / total as f64);
        }

        Ok(total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Luma, Rgba};

    /// Sink recording pair indices and output dimensions instead of writing
    /// files.
    #[derive(Default)]
    struct RecordingSink {
        writes: Vec<(usize, u32, u32)>,
    }

    impl OutputSink for RecordingSink {
        fn write(&mut self, pair: usize, image: &RgbaImage) -> Result<()> {
            self.writes.push((pair, image.width(), image.height()));
            Ok(())
        }
    }

    /// Template with a centered square blob of the given side length.
    fn square_template(side: u32) -> GrayImage {
        let mut img = GrayImage::new(16, 16);
        let offset = (16 - side) / 2;
        for y in offset..offset + side {
            for x in offset..offset + side {
                img.put_pixel(x, y, Luma([255u8]));
            }
        }
        img
    }

    fn opaque_source() -> Result<RgbaImage> {
        Ok(RgbaImage::from_pixel(16, 16, Rgba([0, 0, 255, 255])))
    }

    #[test]
    fn test_templates_are_assigned_cyclically() {
        let pipeline = Pipeline::builder().build();
        let templates = vec![square_template(4), square_template(6), square_template(8)];
        let mut runner = BatchRunner::new(&pipeline, templates).expect("runner");

        let mut sink = RecordingSink::default();
        let mut fractions = Vec::new();
        let mut observer = ProgressFn(|fraction| fractions.push(fraction));

        let sources: Vec<Result<RgbaImage>> = (0..7).map(|_| opaque_source()).collect();
        let processed = runner
            .run(sources, &mut sink, &mut observer)
            .expect("batch should succeed");

        assert_eq!(processed, 7);
        for (pair, &(index, width, height)) in sink.writes.iter().enumerate() {
            let expected_side = [4, 6, 8][pair % 3];
            assert_eq!(index, pair);
            assert_eq!((width, height), (expected_side, expected_side));
        }
        let expected: Vec<f64> = (1..=7).map(|i| i as f64 / 7.0).collect();
        assert_eq!(fractions, expected);
    }

    #[test]
    fn test_empty_template_set_is_rejected() {
        let pipeline = Pipeline::builder().build();
        let result = BatchRunner::new(&pipeline, Vec::new());
        assert!(matches!(result, Err(CutoutError::NoTemplates)));
    }

    #[test]
    fn test_run_aborts_on_first_failure() {
        let pipeline = Pipeline::builder().build();
        let mut runner =
            BatchRunner::new(&pipeline, vec![square_template(6)]).expect("runner");

        let mut sink = RecordingSink::default();
        let sources = vec![
            opaque_source(),
            Err(CutoutError::Io {
                path: "missing.png".into(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
            }),
            opaque_source(),
        ];

        let error = runner
            .run(sources, &mut sink, &mut NoProgress)
            .expect_err("batch should abort");

        assert_eq!(error.pair, 1);
        assert_eq!(sink.writes.len(), 1);
    }

    #[test]
    fn test_blank_template_fails_the_pair_using_it() {
        let pipeline = Pipeline::builder().build();
        let mut runner =
            BatchRunner::new(&pipeline, vec![square_template(6), GrayImage::new(16, 16)])
                .expect("runner");

        let mut sink = RecordingSink::default();
        let sources: Vec<Result<RgbaImage>> = (0..2).map(|_| opaque_source()).collect();

        let error = runner
            .run(sources, &mut sink, &mut NoProgress)
            .expect_err("second pair should fail");

        assert_eq!(error.pair, 1);
        assert!(matches!(error.source, CutoutError::NoContourFound));
    }
}
