use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CutoutCliError {
    #[error(transparent)]
    SerdeError(#[from] serde_json::Error),
    #[error(transparent)]
    TomlDeError(#[from] toml::de::Error),
    #[error(transparent)]
    TomlSerError(#[from] toml::ser::Error),
    #[error(transparent)]
    IoError(#[from] std::io::Error),
    #[error("Unsupported file format. Please use .toml or .json files")]
    UnsupportedFileFormat,
}

/// Batch configuration: where shapes and sources come from, where cutouts go
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct BatchConfig {
    /// Directory of grayscale shape templates
    pub shape_dir: PathBuf,
    /// Directory of source images
    pub image_dir: PathBuf,
    /// Destination directory for cutouts
    pub output_dir: PathBuf,
    /// Foreground threshold applied to templates (0 keeps every non-zero pixel)
    #[serde(default)]
    pub threshold: u8,
    /// Optional Gaussian blur sigma applied before thresholding
    #[serde(default)]
    pub blur_sigma: Option<f32>,
    /// Log pair failures and continue instead of aborting the batch
    #[serde(default)]
    pub keep_going: bool,
}

impl BatchConfig {
    /// Load configuration from a TOML file
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self, CutoutCliError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Load configuration from a TOML string
    pub fn from_toml(content: &str) -> Result<Self, CutoutCliError> {
        let config: BatchConfig = toml::from_str(content)?;
        Ok(config)
    }

    /// Load configuration from a JSON file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, CutoutCliError> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Load configuration from a JSON string
    pub fn from_json(content: &str) -> Result<Self, CutoutCliError> {
        let config: BatchConfig = serde_json::from_str(content)?;
        Ok(config)
    }

    /// Auto-detect file format and load configuration
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, CutoutCliError> {
        let path_ref = path.as_ref();
        match path_ref.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Self::from_toml_file(path),
            Some("json") => Self::from_json_file(path),
            _ => Err(CutoutCliError::UnsupportedFileFormat),
        }
    }

    /// Convert configuration to a TOML string
    pub fn to_toml(&self) -> Result<String, CutoutCliError> {
        let toml = toml::to_string_pretty(&self)?;
        Ok(toml)
    }

    /// Convert configuration to a JSON string
    pub fn to_json(&self) -> Result<String, CutoutCliError> {
        Ok(serde_json::to_string_pretty(&self)?)
    }
}

const IMAGE_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "tiff"];

/// List the supported raster files in a directory, in batch order.
pub fn list_images<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>, CutoutCliError> {
    let mut paths = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let supported = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()));
        if supported {
            paths.push(path);
        }
    }
    sort_numeric(&mut paths);
    Ok(paths)
}

/// Numeric-stem-aware ordering: `2.png` sorts before `10.png`, and numbered
/// files sort before named ones.
pub fn sort_numeric(paths: &mut [PathBuf]) {
    paths.sort_by_key(|path| {
        let stem = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or("")
            .to_string();
        match stem.parse::<u64>() {
            Ok(number) => (false, number, String::new()),
            Err(_) => (true, 0, stem),
        }
    });
}
