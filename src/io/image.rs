//! PNG preview of an assembled mosaic

use crate::io::error::{MosaicError, Result, file_system, invalid_source};
use crate::spatial::layout::MosaicLayout;
use crate::spatial::store::TileStore;
use image::GrayImage;
use ndarray::Array2;
use std::path::Path;

/// Convert grayscale pixels (row, col) into an `image` buffer
///
/// # Errors
///
/// Returns `InvalidSourceData` if the dimensions do not fit the buffer
pub fn to_gray_image(pixels: &Array2<u8>) -> Result<GrayImage> {
    let (height, width) = pixels.dim();
    let raw: Vec<u8> = pixels.iter().copied().collect();
    GrayImage::from_raw(width as u32, height as u32, raw)
        .ok_or_else(|| invalid_source(&format!("cannot build {width}x{height} image buffer")))
}

/// Render a layout and save it as a grayscale PNG
///
/// # Errors
///
/// Returns an error if:
/// - A layout position refers outside the store
/// - The parent directory cannot be created
/// - The image cannot be saved to the specified path
pub fn export_layout_as_png(layout: &MosaicLayout, store: &TileStore, path: &Path) -> Result<()> {
    let img = to_gray_image(&layout.render(store)?)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(file_system(parent, "create directory"))?;
    }

    img.save_with_format(path, image::ImageFormat::Png)
        .map_err(|e| MosaicError::ImageExport {
            path: path.to_path_buf(),
            source: e,
        })?;

    log::info!("wrote preview to '{}'", path.display());
    Ok(())
}
