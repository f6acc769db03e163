//! I/O helpers for page images and JSON reports.
//!
//! - `load_grayscale_image`: read a PNG/JPEG/etc. into an 8-bit gray image.
//! - `save_rgba_image`: write an annotated RGBA image, creating parent dirs.
//! - `write_json_file`: pretty-print a serializable value to disk.
use crate::error::LedgerResult;
use image::{GrayImage, RgbaImage};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Load an image from disk and convert to 8-bit grayscale.
pub fn load_grayscale_image(path: &Path) -> LedgerResult<GrayImage> {
    Ok(image::open(path)?.into_luma8())
}

/// Save an RGBA image, format chosen from the file extension.
pub fn save_rgba_image(image: &RgbaImage, path: &Path) -> LedgerResult<()> {
    ensure_parent_dir(path)?;
    image.save(path)?;
    Ok(())
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> LedgerResult<()> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json)?;
    Ok(())
}

pub(crate) fn ensure_parent_dir(path: &Path) -> LedgerResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}
