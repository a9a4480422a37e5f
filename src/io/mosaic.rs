//! Text mosaic format: one `<tile identifier> <rotation>` line per cell

use crate::io::error::{MosaicError, Result, file_system, invalid_source};
use crate::spatial::geometry::Rotation;
use crate::spatial::layout::{MosaicLayout, Position};
use crate::spatial::store::TileStore;
use std::path::Path;

/// Render a layout as mosaic text in row-major cell order
///
/// # Errors
///
/// Returns `InvalidTileIndex` if a position refers outside the store
pub fn format_mosaic(layout: &MosaicLayout, store: &TileStore) -> Result<String> {
    layout
        .iter()
        .map(|(_, position)| {
            let tile = store.require(position.tile)?;
            Ok(format!("{} {}\n", tile.no(), position.rotation))
        })
        .collect()
}

/// Parse mosaic text back into a layout over `store`
///
/// Identifiers are resolved to base cells through the store. Blank lines
/// are skipped; lines beyond the cell count are ignored.
///
/// # Errors
///
/// Returns an error if:
/// - A line does not hold exactly two integers
/// - A rotation lies outside 0..=3
/// - An identifier is not present in the store
/// - Fewer lines than cells are present
pub fn parse_mosaic(text: &str, store: &TileStore) -> Result<MosaicLayout> {
    let shape = store.shape();
    let mut positions = Vec::with_capacity(shape.cell_count());

    let lines = text.lines().filter(|line| !line.trim().is_empty());
    for (line_number, line) in lines.take(shape.cell_count()).enumerate() {
        let fields: Vec<&str> = line.split_whitespace().collect();
        let [no, rotation] = fields.as_slice() else {
            return Err(invalid_source(&format!(
                "mosaic line {} has {} fields, expected 2",
                line_number + 1,
                fields.len()
            )));
        };

        let no: usize = no
            .parse()
            .map_err(|e| invalid_source(&format!("identifier '{no}' is invalid: {e}")))?;
        let rotation: usize = rotation
            .parse()
            .map_err(|e| invalid_source(&format!("rotation '{rotation}' is invalid: {e}")))?;
        let rotation = Rotation::from_index(rotation)
            .ok_or_else(|| invalid_source(&format!("rotation {rotation} is outside 0..=3")))?;
        let tile = store
            .find_by_no(no)
            .ok_or_else(|| invalid_source(&format!("tile {no} is not in the base store")))?;

        positions.push(Position::new(rotation, tile));
    }

    if positions.len() < shape.cell_count() {
        return Err(MosaicError::Truncated {
            what: "mosaic lines",
            expected: shape.cell_count(),
            found: positions.len(),
        });
    }

    MosaicLayout::from_positions(shape, positions)
}

/// Write a layout as a mosaic text file
///
/// # Errors
///
/// Returns an error if a position is invalid or the file cannot be written
pub fn write_mosaic_file(path: &Path, layout: &MosaicLayout, store: &TileStore) -> Result<()> {
    let text = format_mosaic(layout, store)?;
    std::fs::write(path, text).map_err(file_system(path, "write mosaic"))?;
    log::info!("wrote mosaic layout to '{}'", path.display());
    Ok(())
}

/// Read a layout over `store` from a mosaic text file
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed
pub fn read_mosaic_file(path: &Path, store: &TileStore) -> Result<MosaicLayout> {
    let text = std::fs::read_to_string(path).map_err(file_system(path, "read mosaic"))?;
    parse_mosaic(&text, store)
}
