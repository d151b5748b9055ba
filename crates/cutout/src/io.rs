//! Image loading and saving collaborators.
//!
//! Directory enumeration is the caller's job; these functions decode and
//! encode single files, attaching the offending path to every failure.

use std::{
    ffi::OsStr,
    fs,
    path::{Path, PathBuf},
};

use image::{GrayImage, ImageFormat, RgbaImage};

use crate::error::{CutoutError, Result};

/// Load a template image, converted to single-channel intensity.
pub fn load_template<P: AsRef<Path>>(path: P) -> Result<GrayImage> {
    let path = path.as_ref();
    let image = image::open(path).map_err(|source| CutoutError::ImageRead {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(image.to_luma8())
}

/// Load a source image, converted to RGBA.
pub fn load_source<P: AsRef<Path>>(path: P) -> Result<RgbaImage> {
    let path = path.as_ref();
    let image = image::open(path).map_err(|source| CutoutError::ImageRead {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(image.to_rgba8())
}

/// Save an RGBA image as PNG, atomically.
///
/// The image is encoded to a sibling temp file which is then renamed into
/// place, so a truncated file can never be observed at the final path.
pub fn save_rgba<P: AsRef<Path>>(path: P, image: &RgbaImage) -> Result<()> {
    let path = path.as_ref();
    let tmp = tmp_sibling(path);

    if let Err(source) = image.save_with_format(&tmp, ImageFormat::Png) {
        let _ = fs::remove_file(&tmp);
        return Err(CutoutError::ImageWrite {
            path: path.to_path_buf(),
            source,
        });
    }

    fs::rename(&tmp, path).map_err(|source| CutoutError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn tmp_sibling(path: &Path) -> PathBuf {
    let mut file_name = path
        .file_name()
        .unwrap_or_else(|| OsStr::new("cutout"))
        .to_os_string();
    file_name.push(".tmp");
    path.with_file_name(file_name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join("cutout_io_tests").join(name);
        fs::create_dir_all(&dir).expect("scratch dir");
        dir
    }

    #[test]
    fn test_missing_file_reports_path() {
        let path = PathBuf::from("definitely/not/here.png");
        let error = load_source(&path).expect_err("load should fail");
        match error {
            CutoutError::ImageRead { path: reported, .. } => assert_eq!(reported, path),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_save_round_trips_and_leaves_no_temp_file() {
        let dir = scratch_dir("round_trip");
        let path = dir.join("1.png");

        let mut image = RgbaImage::new(6, 6);
        image.put_pixel(2, 3, Rgba([1, 2, 3, 255]));
        save_rgba(&path, &image).expect("save should succeed");

        let reloaded = load_source(&path).expect("reload should succeed");
        assert_eq!(reloaded, image);
        assert!(!tmp_sibling(&path).exists());
    }
}
