//! Tiles with precomputed quarter-turn variants and unit-length vectors
//!
//! Every tile keeps its brightness samples in all four rotations together
//! with an L2-normalized floating point copy of each. The norm is taken from
//! rotation 0 and shared by the other three, since rotation preserves it.

use crate::spatial::geometry::Rotation;
use ndarray::Array2;

/// Identifier plus brightness samples, as produced and consumed by codecs
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileRecord {
    /// 1-based source identifier
    pub no: usize,
    /// Square grid of brightness samples (row, col)
    pub samples: Array2<u8>,
}

impl TileRecord {
    /// Bundle an identifier with its samples
    pub const fn new(no: usize, samples: Array2<u8>) -> Self {
        Self { no, samples }
    }
}

/// One value per rotation, addressed by [`Rotation`] instead of an index
#[derive(Clone, Debug)]
struct PerRotation<T>([T; 4]);

impl<T> PerRotation<T> {
    fn from_base(base: T, rotate: impl Fn(&T) -> T) -> Self {
        let quarter = rotate(&base);
        let half = rotate(&quarter);
        let three_quarter = rotate(&half);
        Self([base, quarter, half, three_quarter])
    }

    fn map<U>(&self, f: impl Fn(&T) -> U) -> PerRotation<U> {
        let [a, b, c, d] = &self.0;
        PerRotation([f(a), f(b), f(c), f(d)])
    }

    const fn get(&self, rotation: Rotation) -> &T {
        let [a, b, c, d] = &self.0;
        match rotation {
            Rotation::Deg0 => a,
            Rotation::Deg90 => b,
            Rotation::Deg180 => c,
            Rotation::Deg270 => d,
        }
    }
}

/// A square block of brightness samples with its rotations
#[derive(Clone, Debug)]
pub struct Tile {
    no: usize,
    brightness: PerRotation<Array2<u8>>,
    normalized: PerRotation<Array2<f64>>,
    degenerate: bool,
    locked: bool,
}

impl Tile {
    /// Build a tile from its rotation-0 samples
    ///
    /// Derives rotations 1..3 by repeated quarter turns and normalizes each
    /// by the L2 norm of rotation 0. An all-zero tile has no direction; its
    /// normalized vectors are left at zero so it scores 0 against anything.
    pub fn from_record(record: TileRecord) -> Self {
        let TileRecord { no, samples } = record;

        let norm = samples
            .iter()
            .map(|&value| f64::from(value).powi(2))
            .sum::<f64>()
            .sqrt();
        let degenerate = norm == 0.0;
        if degenerate {
            log::warn!("tile {no} is entirely black; it will match nothing");
        }

        let brightness = PerRotation::from_base(samples, rotate_quarter);
        let normalized = brightness.map(|grid| {
            if degenerate {
                Array2::zeros(grid.dim())
            } else {
                grid.mapv(|value| f64::from(value) / norm)
            }
        });

        Self {
            no,
            brightness,
            normalized,
            degenerate,
            locked: false,
        }
    }

    /// 1-based source identifier
    pub const fn no(&self) -> usize {
        self.no
    }

    /// Brightness samples at the given rotation
    pub const fn brightness(&self, rotation: Rotation) -> &Array2<u8> {
        self.brightness.get(rotation)
    }

    /// Unit-length brightness vector at the given rotation
    pub const fn normalized(&self, rotation: Rotation) -> &Array2<f64> {
        self.normalized.get(rotation)
    }

    /// Edge length in samples
    pub fn size(&self) -> usize {
        self.brightness.get(Rotation::Deg0).nrows()
    }

    /// Whether every sample is zero, leaving normalization undefined
    pub const fn is_degenerate(&self) -> bool {
        self.degenerate
    }

    /// Whether this tile has already been used by an assignment
    pub const fn is_locked(&self) -> bool {
        self.locked
    }

    /// Mark this tile as used
    pub const fn lock(&mut self) {
        self.locked = true;
    }

    /// Rotation-0 samples paired with the identifier
    pub fn to_record(&self) -> TileRecord {
        TileRecord::new(self.no, self.brightness.get(Rotation::Deg0).clone())
    }
}

/// Rotate a square sample grid by one quarter turn
///
/// Sample `(row, col)` moves to `(width - 1 - col, row)`.
pub fn rotate_quarter(grid: &Array2<u8>) -> Array2<u8> {
    let (rows, cols) = grid.dim();
    Array2::from_shape_fn((cols, rows), |(row, col)| {
        grid.get([col, cols - 1 - row]).copied().unwrap_or(0)
    })
}
