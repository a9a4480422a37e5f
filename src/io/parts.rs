//! Text parts format: whitespace-separated integers describing a tile set
//!
//! Each tile is an identifier followed by its brightness samples in
//! row-major order. Tiles follow each other in row-major grid order. Line
//! breaks carry no meaning for the reader.

use crate::io::error::{MosaicError, Result, file_system, invalid_source};
use crate::spatial::geometry::GridShape;
use crate::spatial::store::TileStore;
use crate::spatial::tiles::TileRecord;
use ndarray::Array2;
use std::path::Path;

/// Parse tile records for a grid from parts text
///
/// Tokens beyond the grid's requirement are ignored.
///
/// # Errors
///
/// Returns an error if:
/// - Fewer tokens are present than the grid requires
/// - A token is not an integer
/// - A sample lies outside 0..=255
pub fn parse_parts(text: &str, shape: GridShape) -> Result<Vec<TileRecord>> {
    shape.validate()?;

    let tokens_per_tile = shape.samples_per_tile() + 1;
    let expected = shape.cell_count() * tokens_per_tile;
    let mut tokens = text.split_whitespace();
    let mut consumed = 0;
    let mut next = |what: &'static str| -> Result<i64> {
        let token = tokens.next().ok_or(MosaicError::Truncated {
            what: "parts tokens",
            expected,
            found: consumed,
        })?;
        consumed += 1;
        token
            .parse::<i64>()
            .map_err(|e| invalid_source(&format!("{what} token '{token}' is not an integer: {e}")))
    };

    let mut records = Vec::with_capacity(shape.cell_count());
    for _ in 0..shape.cell_count() {
        let no = next("identifier")?;
        let no = usize::try_from(no)
            .map_err(|e| invalid_source(&format!("identifier {no} is invalid: {e}")))?;

        let mut samples = Vec::with_capacity(shape.samples_per_tile());
        for _ in 0..shape.samples_per_tile() {
            let value = next("brightness")?;
            let value = u8::try_from(value).map_err(|e| {
                invalid_source(&format!(
                    "brightness {value} of tile {no} is outside 0..=255: {e}"
                ))
            })?;
            samples.push(value);
        }

        let samples = Array2::from_shape_vec((shape.tile_size, shape.tile_size), samples)
            .map_err(|e| invalid_source(&format!("tile {no}: {e}")))?;
        records.push(TileRecord::new(no, samples));
    }

    Ok(records)
}

/// Read a tile store from a parts file
///
/// # Errors
///
/// Returns an error if the file cannot be read or its contents cannot fill
/// the grid
pub fn read_parts_file(path: &Path, shape: GridShape) -> Result<TileStore> {
    let text = std::fs::read_to_string(path).map_err(file_system(path, "read parts"))?;
    let records = parse_parts(&text, shape)?;
    log::info!("loaded {} tiles from '{}'", records.len(), path.display());
    TileStore::from_records(shape, records)
}

/// Render records as parts text
///
/// Each identifier gets its own line, followed by one line per sample row.
pub fn format_parts(records: &[TileRecord]) -> String {
    records
        .iter()
        .flat_map(|record| {
            let rows = record.samples.rows().into_iter().map(|row| {
                row.iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(" ")
            });
            std::iter::once(record.no.to_string()).chain(rows)
        })
        .map(|line| line + "\n")
        .collect()
}

/// Write a store's rotation-0 tiles as a parts file
///
/// # Errors
///
/// Returns `FileSystem` if the file cannot be written
pub fn write_parts_file(path: &Path, store: &TileStore) -> Result<()> {
    std::fs::write(path, format_parts(&store.records())).map_err(file_system(path, "write parts"))
}
