//! Grid shape and rotation vocabulary shared by stores, layouts and codecs

use crate::io::configuration::{MAX_GRID_CELLS, MAX_GRID_DIMENSION, MAX_GRID_SAMPLES};
use crate::io::error::{Result, invalid_parameter};
use std::fmt;

/// Number of rotation variants kept per tile
pub const ROTATION_COUNT: usize = 4;

/// Dimensions of a tile grid and of each (square) tile within it
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GridShape {
    /// Number of tile rows
    pub rows: usize,
    /// Number of tile columns
    pub cols: usize,
    /// Edge length of a tile in samples
    pub tile_size: usize,
}

impl GridShape {
    /// Create a shape without validating it
    pub const fn new(rows: usize, cols: usize, tile_size: usize) -> Self {
        Self {
            rows,
            cols,
            tile_size,
        }
    }

    /// Reject empty or oversized shapes
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if any dimension is zero or exceeds
    /// `MAX_GRID_DIMENSION`, if the grid holds more than `MAX_GRID_CELLS`
    /// cells or `MAX_GRID_SAMPLES` samples in total
    pub fn validate(&self) -> Result<()> {
        for (parameter, value) in [
            ("rows", self.rows),
            ("cols", self.cols),
            ("tile_size", self.tile_size),
        ] {
            if value == 0 {
                return Err(invalid_parameter(parameter, &value, &"must be positive"));
            }
            if value > MAX_GRID_DIMENSION {
                return Err(invalid_parameter(
                    parameter,
                    &value,
                    &format!("must not exceed {MAX_GRID_DIMENSION}"),
                ));
            }
        }

        if self.cell_count() > MAX_GRID_CELLS {
            return Err(invalid_parameter(
                "cols",
                &self.cols,
                &format!(
                    "{} rows of {} cells exceed {MAX_GRID_CELLS} cells",
                    self.rows, self.cols
                ),
            ));
        }
        let samples = self.cell_count().checked_mul(self.samples_per_tile());
        if samples.is_none_or(|count| count > MAX_GRID_SAMPLES) {
            return Err(invalid_parameter(
                "tile_size",
                &self.tile_size,
                &format!("grid would hold more than {MAX_GRID_SAMPLES} samples"),
            ));
        }

        Ok(())
    }

    /// Total number of cells
    pub const fn cell_count(&self) -> usize {
        self.rows * self.cols
    }

    /// Number of samples in a single tile
    pub const fn samples_per_tile(&self) -> usize {
        self.tile_size * self.tile_size
    }

    /// Width of the assembled image in pixels
    pub const fn pixel_width(&self) -> usize {
        self.cols * self.tile_size
    }

    /// Height of the assembled image in pixels
    pub const fn pixel_height(&self) -> usize {
        self.rows * self.tile_size
    }

    /// Check whether a cell coordinate lies inside the grid
    pub const fn contains(&self, coordinate: [usize; 2]) -> bool {
        coordinate[0] < self.rows && coordinate[1] < self.cols
    }

    /// All cell coordinates in row-major order
    pub fn coordinates(&self) -> impl DoubleEndedIterator<Item = [usize; 2]> + use<> {
        let cols = self.cols;
        (0..self.cell_count()).map(move |index| [index / cols, index % cols])
    }
}

impl fmt::Display for GridShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}x{} tiles of {}x{}",
            self.rows, self.cols, self.tile_size, self.tile_size
        )
    }
}

/// Quarter-turn rotation applied to a tile
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Rotation {
    /// Unrotated
    #[default]
    Deg0,
    /// One quarter turn
    Deg90,
    /// Two quarter turns
    Deg180,
    /// Three quarter turns
    Deg270,
}

impl Rotation {
    /// Every rotation in ascending order; scan order for tie-breaking
    pub const ALL: [Self; ROTATION_COUNT] = [Self::Deg0, Self::Deg90, Self::Deg180, Self::Deg270];

    /// Index in `0..ROTATION_COUNT`, as used by the text mosaic format
    pub const fn index(self) -> usize {
        match self {
            Self::Deg0 => 0,
            Self::Deg90 => 1,
            Self::Deg180 => 2,
            Self::Deg270 => 3,
        }
    }

    /// Inverse of [`Rotation::index`]
    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::Deg0),
            1 => Some(Self::Deg90),
            2 => Some(Self::Deg180),
            3 => Some(Self::Deg270),
            _ => None,
        }
    }

    /// One more quarter turn, wrapping back to `Deg0`
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Deg0 => Self::Deg90,
            Self::Deg90 => Self::Deg180,
            Self::Deg180 => Self::Deg270,
            Self::Deg270 => Self::Deg0,
        }
    }
}

impl fmt::Display for Rotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.index())
    }
}
