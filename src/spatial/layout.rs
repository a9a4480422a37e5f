//! Mosaic layouts: which base tile, at which rotation, fills each cell
//!
//! A layout never owns tiles. Each cell holds a [`Position`], a handle into
//! the base [`TileStore`] that is resolved on demand, so the store must be
//! kept around for as long as the layout is rendered or written out. Cells
//! stay freely editable after assignment for manual correction.

use crate::io::error::{MosaicError, Result, invalid_source};
use crate::spatial::geometry::{GridShape, Rotation};
use crate::spatial::store::TileStore;
use ndarray::{Array2, s};

/// A rotation paired with the base cell whose tile is placed
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Position {
    /// Rotation applied to the referenced tile
    pub rotation: Rotation,
    /// (row, col) of the referenced tile in the base store
    pub tile: [usize; 2],
}

impl Position {
    /// Reference a base cell at a rotation
    pub const fn new(rotation: Rotation, tile: [usize; 2]) -> Self {
        Self { rotation, tile }
    }
}

/// Random-access grid of positions with the same shape as a tile store
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MosaicLayout {
    shape: GridShape,
    cells: Array2<Position>,
}

impl MosaicLayout {
    /// Identity layout: every cell shows its own base tile unrotated
    pub fn scaffold(store: &TileStore) -> Self {
        let shape = store.shape();
        let cells = Array2::from_shape_fn((shape.rows, shape.cols), |(row, col)| {
            Position::new(Rotation::Deg0, [row, col])
        });
        Self { shape, cells }
    }

    /// Build a layout from row-major positions
    ///
    /// # Errors
    ///
    /// Returns `Truncated` if fewer positions than cells are supplied
    pub fn from_positions(shape: GridShape, mut positions: Vec<Position>) -> Result<Self> {
        let found = positions.len();
        let expected = shape.cell_count();
        if found < expected {
            return Err(MosaicError::Truncated {
                what: "mosaic cells",
                expected,
                found,
            });
        }

        positions.truncate(expected);
        let cells = Array2::from_shape_vec((shape.rows, shape.cols), positions).map_err(|e| {
            invalid_source(&format!("cannot arrange layout as {shape}: {e}"))
        })?;

        Ok(Self { shape, cells })
    }

    /// Shape of the layout grid
    pub const fn shape(&self) -> GridShape {
        self.shape
    }

    /// Position at a cell
    pub fn get(&self, coordinate: [usize; 2]) -> Option<&Position> {
        self.cells.get(coordinate)
    }

    /// Mutable position at a cell
    pub fn get_mut(&mut self, coordinate: [usize; 2]) -> Option<&mut Position> {
        self.cells.get_mut(coordinate)
    }

    /// Overwrite a cell
    ///
    /// # Errors
    ///
    /// Returns `InvalidTileIndex` if the cell is outside the layout
    pub fn set(&mut self, coordinate: [usize; 2], position: Position) -> Result<()> {
        let slot = self.slot(coordinate)?;
        *slot = position;
        Ok(())
    }

    /// Exchange the contents of two cells
    ///
    /// # Errors
    ///
    /// Returns `InvalidTileIndex` if either cell is outside the layout
    pub fn swap(&mut self, a: [usize; 2], b: [usize; 2]) -> Result<()> {
        let first = *self.slot(a)?;
        let second = std::mem::replace(self.slot(b)?, first);
        *self.slot(a)? = second;
        Ok(())
    }

    /// Force the rotation of a cell, keeping its tile
    ///
    /// # Errors
    ///
    /// Returns `InvalidTileIndex` if the cell is outside the layout
    pub fn rotate_cell(&mut self, coordinate: [usize; 2], rotation: Rotation) -> Result<()> {
        self.slot(coordinate)?.rotation = rotation;
        Ok(())
    }

    /// Every position with its cell coordinate, row-major
    pub fn iter(&self) -> impl Iterator<Item = ([usize; 2], &Position)> {
        self.cells
            .indexed_iter()
            .map(|((row, col), position)| ([row, col], position))
    }

    /// Assemble the full grayscale image described by this layout
    ///
    /// # Errors
    ///
    /// Returns `InvalidTileIndex` if a position refers outside the store
    pub fn render(&self, store: &TileStore) -> Result<Array2<u8>> {
        let size = store.shape().tile_size;
        let mut pixels = Array2::zeros((self.shape.rows * size, self.shape.cols * size));

        for ([row, col], position) in self.iter() {
            let tile = store.require(position.tile)?;
            let top = row * size;
            let left = col * size;
            pixels
                .slice_mut(s![top..top + size, left..left + size])
                .assign(tile.brightness(position.rotation));
        }

        Ok(pixels)
    }

    fn slot(&mut self, coordinate: [usize; 2]) -> Result<&mut Position> {
        let grid_dimensions = (self.shape.rows, self.shape.cols);
        self.cells
            .get_mut(coordinate)
            .ok_or(MosaicError::InvalidTileIndex {
                position: coordinate,
                grid_dimensions,
            })
    }
}
