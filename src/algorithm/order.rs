//! Visitation orders deciding which target cell picks first
//!
//! Assignment is greedy, so the order is a quality knob: cells visited early
//! choose from the whole base pool while late cells get what is left.

use crate::io::error::{Result, invalid_parameter};
use crate::spatial::geometry::GridShape;
use bitvec::prelude::*;
use clap::ValueEnum;
use rand::{SeedableRng, rngs::StdRng, seq::SliceRandom};

/// Strategy for generating a visitation order
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OrderPolicy {
    /// Row-major from the top-left cell
    #[default]
    Ascending,
    /// Row-major from the bottom-right cell, the exact reverse of ascending
    Descending,
    /// Seeded random permutation
    Shuffled,
}

/// Sequence of target cells consumed once by the assignment engine
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VisitationOrder {
    shape: GridShape,
    coordinates: Vec<[usize; 2]>,
}

impl VisitationOrder {
    /// Generate an order covering every cell of the grid
    ///
    /// The seed is only used by [`OrderPolicy::Shuffled`].
    pub fn new(shape: GridShape, policy: OrderPolicy, seed: u64) -> Self {
        let coordinates = match policy {
            OrderPolicy::Ascending => shape.coordinates().collect(),
            OrderPolicy::Descending => shape.coordinates().rev().collect(),
            OrderPolicy::Shuffled => {
                let mut coordinates: Vec<_> = shape.coordinates().collect();
                coordinates.shuffle(&mut StdRng::seed_from_u64(seed));
                coordinates
            }
        };

        Self { shape, coordinates }
    }

    /// Use a caller-supplied order
    ///
    /// Repeated cells are accepted here; the engine refuses to visit a cell
    /// twice.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if a coordinate lies outside the grid
    pub fn from_coordinates(shape: GridShape, coordinates: Vec<[usize; 2]>) -> Result<Self> {
        if let Some(outside) = coordinates.iter().find(|&&c| !shape.contains(c)) {
            return Err(invalid_parameter(
                "visitation order",
                &format!("({}, {})", outside[0], outside[1]),
                &format!("cell lies outside the {}x{} grid", shape.rows, shape.cols),
            ));
        }

        Ok(Self { shape, coordinates })
    }

    /// Grid the order was built for
    pub const fn shape(&self) -> GridShape {
        self.shape
    }

    /// Number of steps
    pub const fn len(&self) -> usize {
        self.coordinates.len()
    }

    /// Whether the order has no steps
    pub const fn is_empty(&self) -> bool {
        self.coordinates.is_empty()
    }

    /// Coordinate visited at a step
    pub fn get(&self, step: usize) -> Option<[usize; 2]> {
        self.coordinates.get(step).copied()
    }

    /// Coordinates in visiting order
    pub fn iter(&self) -> impl Iterator<Item = [usize; 2]> + '_ {
        self.coordinates.iter().copied()
    }

    /// Whether every cell appears exactly once
    pub fn is_permutation(&self) -> bool {
        if self.coordinates.len() != self.shape.cell_count() {
            return false;
        }

        let mut seen = bitvec![0; self.shape.cell_count()];
        for &[row, col] in &self.coordinates {
            let index = row * self.shape.cols + col;
            if seen.get(index).as_deref() != Some(&false) {
                return false;
            }
            seen.set(index, true);
        }
        true
    }
}
