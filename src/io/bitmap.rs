//! Fixed-layout 8-bit grayscale bitmaps
//!
//! Files start with a 14-byte file header and a 40-byte info header,
//! followed by a 256-entry gray palette (entry `i` is `(i, i, i)`) and the
//! indexed pixels, stored bottom-up with each row padded to a multiple of
//! four bytes. The writer is byte-stable: encoding the same pixels always
//! yields the same file.

use crate::io::configuration::{
    BMP_FILE_HEADER_SIZE, BMP_INFO_HEADER_SIZE, BMP_PALETTE_ENTRIES, BMP_PIXEL_OFFSET,
};
use crate::io::error::{MosaicError, Result, file_system, invalid_parameter, invalid_source};
use crate::spatial::geometry::GridShape;
use crate::spatial::store::TileStore;
use crate::spatial::tiles::TileRecord;
use image::ImageFormat;
use ndarray::{Array2, s};
use std::path::Path;

/// Bytes per stored pixel row, including padding
pub const fn row_stride(width: usize) -> usize {
    width.div_ceil(4) * 4
}

/// Total file size for an image of the given pixel dimensions
pub const fn bitmap_file_size(width: usize, height: usize) -> usize {
    BMP_PIXEL_OFFSET + row_stride(width) * height
}

fn header_field(name: &'static str, value: usize) -> Result<u32> {
    u32::try_from(value).map_err(|e| invalid_parameter(name, &value, &e))
}

/// Encode grayscale pixels (row, col) as a bitmap
///
/// # Errors
///
/// Returns `InvalidParameter` if the image is too large for the header fields
pub fn encode_bitmap(pixels: &Array2<u8>) -> Result<Vec<u8>> {
    let (height, width) = pixels.dim();
    let stride = row_stride(width);
    let image_size = header_field("image size", stride * height)?;
    let file_size = header_field("file size", bitmap_file_size(width, height))?;
    let width_field = i32::try_from(width).map_err(|e| invalid_parameter("width", &width, &e))?;
    let height_field =
        i32::try_from(height).map_err(|e| invalid_parameter("height", &height, &e))?;

    let mut bytes = Vec::with_capacity(file_size as usize);

    // File header
    bytes.extend_from_slice(b"BM");
    bytes.extend_from_slice(&file_size.to_le_bytes());
    bytes.extend_from_slice(&0u16.to_le_bytes());
    bytes.extend_from_slice(&0u16.to_le_bytes());
    bytes.extend_from_slice(&(BMP_PIXEL_OFFSET as u32).to_le_bytes());

    // Info header
    bytes.extend_from_slice(&(BMP_INFO_HEADER_SIZE as u32).to_le_bytes());
    bytes.extend_from_slice(&width_field.to_le_bytes());
    bytes.extend_from_slice(&height_field.to_le_bytes());
    bytes.extend_from_slice(&1u16.to_le_bytes());
    bytes.extend_from_slice(&8u16.to_le_bytes());
    bytes.extend_from_slice(&0u32.to_le_bytes());
    bytes.extend_from_slice(&image_size.to_le_bytes());
    bytes.extend_from_slice(&0i32.to_le_bytes());
    bytes.extend_from_slice(&0i32.to_le_bytes());
    bytes.extend_from_slice(&0u32.to_le_bytes());
    bytes.extend_from_slice(&0u32.to_le_bytes());
    debug_assert_eq!(bytes.len(), BMP_FILE_HEADER_SIZE + BMP_INFO_HEADER_SIZE);

    // Palette: blue, green, red, reserved
    for level in 0..BMP_PALETTE_ENTRIES {
        let level = level as u8;
        bytes.extend_from_slice(&[level, level, level, 0]);
    }

    // Pixels, bottom row first
    let padding = [0u8; 3];
    for row in pixels.rows().into_iter().rev() {
        bytes.extend(row.iter().copied());
        bytes.extend_from_slice(padding.get(..stride - width).unwrap_or(&[]));
    }

    Ok(bytes)
}

/// Decode a bitmap into full-size grayscale pixels (row, col)
///
/// # Errors
///
/// Returns an error if:
/// - Fewer bytes are present than the expected dimensions require
/// - The data is not a decodable bitmap
/// - The decoded dimensions differ from the expected ones
pub fn decode_bitmap(bytes: &[u8], width: usize, height: usize) -> Result<Array2<u8>> {
    let expected = bitmap_file_size(width, height);
    if bytes.len() < expected {
        return Err(MosaicError::Truncated {
            what: "bitmap bytes",
            expected,
            found: bytes.len(),
        });
    }

    let luma = image::load_from_memory_with_format(bytes, ImageFormat::Bmp)?.to_luma8();
    let (found_width, found_height) = (luma.width() as usize, luma.height() as usize);
    if (found_width, found_height) != (width, height) {
        return Err(invalid_source(&format!(
            "bitmap is {found_width}x{found_height} pixels, expected {width}x{height}"
        )));
    }

    Array2::from_shape_vec((height, width), luma.into_raw())
        .map_err(|e| invalid_source(&format!("bitmap pixels: {e}")))
}

/// Cut full-size pixels into tiles, numbered 1.. in raster order
pub fn slice_tiles(pixels: &Array2<u8>, shape: GridShape) -> Vec<TileRecord> {
    let size = shape.tile_size;
    shape
        .coordinates()
        .enumerate()
        .map(|(index, [row, col])| {
            let top = row * size;
            let left = col * size;
            let samples = pixels
                .slice(s![top..top + size, left..left + size])
                .to_owned();
            TileRecord::new(index + 1, samples)
        })
        .collect()
}

/// Write pixels to a bitmap file
///
/// # Errors
///
/// Returns an error if the pixels cannot be encoded or the file cannot be
/// written
pub fn write_bitmap_file(path: &Path, pixels: &Array2<u8>) -> Result<()> {
    let bytes = encode_bitmap(pixels)?;
    std::fs::write(path, bytes).map_err(file_system(path, "write bitmap"))?;
    log::info!(
        "wrote {}x{} bitmap to '{}'",
        pixels.ncols(),
        pixels.nrows(),
        path.display()
    );
    Ok(())
}

/// Read a tile store from a bitmap file
///
/// # Errors
///
/// Returns an error if the file cannot be read, is truncated, or does not
/// match the shape
pub fn read_bitmap_file(path: &Path, shape: GridShape) -> Result<TileStore> {
    shape.validate()?;
    let bytes = std::fs::read(path).map_err(file_system(path, "read bitmap"))?;
    let pixels =
        decode_bitmap(&bytes, shape.pixel_width(), shape.pixel_height()).map_err(|e| match e {
            MosaicError::ImageLoad { source, .. } => MosaicError::ImageLoad {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })?;
    log::info!("loaded {} bitmap from '{}'", shape, path.display());
    TileStore::from_records(shape, slice_tiles(&pixels, shape))
}
