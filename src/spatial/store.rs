//! Tile stores: the full grid of tiles for one side of the matching problem

use crate::io::error::{MosaicError, Result, invalid_source};
use crate::spatial::geometry::GridShape;
use crate::spatial::tiles::{Tile, TileRecord};
use ndarray::Array2;

/// Grid of tiles addressed by (row, col) in load order
///
/// Cell addresses are independent of the identifiers embedded in each
/// tile; an identifier lookup is available through [`TileStore::find_by_no`].
#[derive(Clone, Debug)]
pub struct TileStore {
    shape: GridShape,
    tiles: Array2<Tile>,
}

impl TileStore {
    /// Fill a store in row-major order from a sequence of records
    ///
    /// Records beyond the grid's cell count are ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The shape is invalid
    /// - The records run out before every cell is filled
    /// - A record's samples are not `tile_size` x `tile_size`
    pub fn from_records<I>(shape: GridShape, records: I) -> Result<Self>
    where
        I: IntoIterator<Item = TileRecord>,
    {
        shape.validate()?;

        let expected = shape.cell_count();
        let mut tiles = Vec::with_capacity(expected);
        let mut records = records.into_iter();

        while tiles.len() < expected {
            let Some(record) = records.next() else {
                return Err(MosaicError::Truncated {
                    what: "tile records",
                    expected,
                    found: tiles.len(),
                });
            };

            if record.samples.dim() != (shape.tile_size, shape.tile_size) {
                return Err(invalid_source(&format!(
                    "tile {} has {}x{} samples, expected {}x{}",
                    record.no,
                    record.samples.nrows(),
                    record.samples.ncols(),
                    shape.tile_size,
                    shape.tile_size
                )));
            }

            tiles.push(Tile::from_record(record));
        }

        let surplus = records.count();
        if surplus > 0 {
            log::debug!("ignoring {surplus} records beyond the {expected} cells of the grid");
        }

        let tiles = Array2::from_shape_vec((shape.rows, shape.cols), tiles).map_err(|e| {
            invalid_source(&format!("cannot arrange tiles as {shape}: {e}"))
        })?;

        Ok(Self { shape, tiles })
    }

    /// Shape of the grid and its tiles
    pub const fn shape(&self) -> GridShape {
        self.shape
    }

    /// Tile at a cell, if the cell is inside the grid
    pub fn tile(&self, coordinate: [usize; 2]) -> Option<&Tile> {
        self.tiles.get(coordinate)
    }

    /// Mutable tile at a cell, if the cell is inside the grid
    pub fn tile_mut(&mut self, coordinate: [usize; 2]) -> Option<&mut Tile> {
        self.tiles.get_mut(coordinate)
    }

    /// Tile at a cell, or an `InvalidTileIndex` error
    ///
    /// # Errors
    ///
    /// Returns `InvalidTileIndex` if the cell is outside the grid
    pub fn require(&self, coordinate: [usize; 2]) -> Result<&Tile> {
        self.tile(coordinate)
            .ok_or(MosaicError::InvalidTileIndex {
                position: coordinate,
                grid_dimensions: (self.shape.rows, self.shape.cols),
            })
    }

    /// Every tile with its cell coordinate, row-major
    pub fn iter(&self) -> impl Iterator<Item = ([usize; 2], &Tile)> {
        self.tiles
            .indexed_iter()
            .map(|((row, col), tile)| ([row, col], tile))
    }

    /// Cell holding the tile with the given identifier
    pub fn find_by_no(&self, no: usize) -> Option<[usize; 2]> {
        self.iter()
            .find(|(_, tile)| tile.no() == no)
            .map(|(coordinate, _)| coordinate)
    }

    /// Number of tiles already consumed by an assignment
    pub fn locked_count(&self) -> usize {
        self.tiles.iter().filter(|tile| tile.is_locked()).count()
    }

    /// Rotation-0 records in row-major order, suitable for writing back out
    pub fn records(&self) -> Vec<TileRecord> {
        self.tiles.iter().map(Tile::to_record).collect()
    }
}
