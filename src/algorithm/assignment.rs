//! Greedy exclusive assignment of base tiles to target cells
//!
//! Each visited target cell scans every still-unlocked base tile in every
//! rotation and takes the most similar one. Both tiles are then locked, so
//! every base tile is used at most once. The scan for a single cell is
//! read-only, but commits must stay in visiting order because each one
//! shrinks the pool seen by every later cell.

use crate::algorithm::order::VisitationOrder;
use crate::algorithm::similarity::best_rotation;
use crate::io::error::{MosaicError, Result};
use crate::spatial::geometry::{GridShape, Rotation};
use crate::spatial::layout::{MosaicLayout, Position};
use crate::spatial::store::TileStore;
use crate::spatial::tiles::Tile;

/// Best candidate found while scanning the base store
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Candidate {
    /// Base cell holding the tile
    pub tile: [usize; 2],
    /// Rotation of the base tile
    pub rotation: Rotation,
    /// Similarity to the target tile at rotation 0
    pub score: f64,
}

/// Summary of a finished run
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AssignmentReport {
    /// Number of target cells assigned
    pub assigned: usize,
    /// Sum of the similarity of every committed match
    pub total_similarity: f64,
    /// Lowest similarity among committed matches
    pub min_similarity: Option<f64>,
}

impl AssignmentReport {
    /// Average similarity of committed matches
    pub fn mean_similarity(&self) -> Option<f64> {
        (self.assigned > 0).then(|| self.total_similarity / self.assigned as f64)
    }

    fn record(&mut self, score: f64) {
        self.assigned += 1;
        self.total_similarity += score;
        self.min_similarity = Some(self.min_similarity.map_or(score, |min| min.min(score)));
    }
}

/// Scan unlocked base tiles for the best match to `target`
///
/// Base cells are visited row-major and rotations in ascending order; only
/// a strictly higher score replaces the best so far, so the earliest
/// (row, col, rotation) wins ties. Returns `None` when every base tile is
/// locked.
pub fn find_best_candidate(target: &Tile, base: &TileStore) -> Option<Candidate> {
    let mut best: Option<Candidate> = None;

    for (coordinate, tile) in base.iter().filter(|(_, tile)| !tile.is_locked()) {
        let (rotation, score) = best_rotation(target, tile);
        if best.is_none_or(|current| score > current.score) {
            best = Some(Candidate {
                tile: coordinate,
                rotation,
                score,
            });
        }
    }

    best
}

/// Stepwise greedy assignment over an owned pair of tile stores
///
/// The engine owns both stores and the layout for the duration of a run;
/// [`GreedyAssignment::into_parts`] hands them back afterwards.
pub struct GreedyAssignment {
    base: TileStore,
    target: TileStore,
    layout: MosaicLayout,
    order: VisitationOrder,
    step: usize,
    report: AssignmentReport,
}

impl GreedyAssignment {
    /// Prepare a run, seeding the layout with the identity scaffold
    ///
    /// # Errors
    ///
    /// Returns `ShapeMismatch` if the stores, or the order, disagree on shape
    pub fn new(base: TileStore, target: TileStore, order: VisitationOrder) -> Result<Self> {
        let dims = |shape: GridShape| (shape.rows, shape.cols, shape.tile_size);

        if base.shape() != target.shape() {
            return Err(MosaicError::ShapeMismatch {
                base: dims(base.shape()),
                target: dims(target.shape()),
            });
        }
        let order_shape = order.shape();
        if (order_shape.rows, order_shape.cols) != (target.shape().rows, target.shape().cols) {
            return Err(MosaicError::ShapeMismatch {
                base: dims(base.shape()),
                target: dims(order_shape),
            });
        }

        if !order.is_permutation() {
            log::warn!("visitation order does not cover every cell exactly once");
        }

        let layout = MosaicLayout::scaffold(&base);

        Ok(Self {
            base,
            target,
            layout,
            order,
            step: 0,
            report: AssignmentReport::default(),
        })
    }

    /// Assign the next target cell in the visitation order
    ///
    /// Returns `false` once the order is exhausted.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The target cell was already assigned (order revisits a cell, or the
    ///   stores were reused without reloading)
    /// - Every base tile is already locked
    pub fn execute_step(&mut self) -> Result<bool> {
        let Some(coordinate) = self.order.get(self.step) else {
            return Ok(false);
        };

        let target = self.target.require(coordinate)?;
        if target.is_locked() {
            log::error!(
                "target cell ({}, {}) visited twice at step {}",
                coordinate[0],
                coordinate[1],
                self.step
            );
            return Err(MosaicError::TargetAlreadyLocked {
                coordinate,
                step: self.step,
            });
        }

        let candidate = find_best_candidate(target, &self.base)
            .ok_or(MosaicError::BaseExhausted { coordinate })?;

        self.commit(coordinate, candidate)?;
        self.step += 1;

        Ok(true)
    }

    /// Run every remaining step
    ///
    /// # Errors
    ///
    /// Propagates the first error from [`GreedyAssignment::execute_step`]
    pub fn run(&mut self) -> Result<AssignmentReport> {
        while self.execute_step()? {}
        Ok(self.report)
    }

    fn commit(&mut self, coordinate: [usize; 2], candidate: Candidate) -> Result<()> {
        self.layout
            .set(coordinate, Position::new(candidate.rotation, candidate.tile))?;

        let grid_dimensions = (self.base.shape().rows, self.base.shape().cols);
        let base_tile = self
            .base
            .tile_mut(candidate.tile)
            .ok_or(MosaicError::InvalidTileIndex {
                position: candidate.tile,
                grid_dimensions,
            })?;
        base_tile.lock();
        let base_no = base_tile.no();

        let target_tile = self
            .target
            .tile_mut(coordinate)
            .ok_or(MosaicError::InvalidTileIndex {
                position: coordinate,
                grid_dimensions,
            })?;
        target_tile.lock();

        log::debug!(
            "cell ({}, {}) <- tile {base_no} rotation {} (similarity {:.6})",
            coordinate[0],
            coordinate[1],
            candidate.rotation,
            candidate.score
        );

        self.report.record(candidate.score);
        Ok(())
    }

    /// Steps completed and total steps in the order
    pub const fn progress(&self) -> (usize, usize) {
        (self.step, self.order.len())
    }

    /// Statistics for the steps completed so far
    pub const fn report(&self) -> AssignmentReport {
        self.report
    }

    /// Current layout
    pub const fn layout(&self) -> &MosaicLayout {
        &self.layout
    }

    /// Base store with its lock state
    pub const fn base(&self) -> &TileStore {
        &self.base
    }

    /// Target store with its lock state
    pub const fn target(&self) -> &TileStore {
        &self.target
    }

    /// Release the base store, target store and layout
    pub fn into_parts(self) -> (TileStore, TileStore, MosaicLayout) {
        (self.base, self.target, self.layout)
    }
}
