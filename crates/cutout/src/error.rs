use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CutoutError {
    #[error("No contour found in template")]
    NoContourFound,

    #[error("Degenerate polygon: {points} usable vertices, at least 3 required")]
    DegeneratePolygon { points: usize },

    #[error("Batch requires at least one template")]
    NoTemplates,

    #[error("Failed to read image {path}")]
    ImageRead {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Failed to write image {path}")]
    ImageWrite {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("IO error on {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, CutoutError>;

/// Failure of a single (source, template) pair within a batch run.
#[derive(Error, Debug)]
#[error("Pair {pair} failed: {source}")]
pub struct PairError {
    /// Zero-based index of the failed pair.
    pub pair: usize,
    #[source]
    pub source: CutoutError,
}
