//! Cosine similarity between oriented tiles

use crate::spatial::geometry::Rotation;
use crate::spatial::tiles::Tile;

/// Dot product of two tiles' normalized vectors at the given rotations
///
/// Both vectors have unit length, so this is the cosine of the angle
/// between the brightness vectors: 1.0 for identical shading, lower for
/// less similar tiles. Brightness is non-negative, keeping the result in
/// `[0, 1]`. Degenerate (all-black) tiles score 0 against everything.
pub fn similarity(a: &Tile, rotation_a: Rotation, b: &Tile, rotation_b: Rotation) -> f64 {
    a.normalized(rotation_a)
        .iter()
        .zip(b.normalized(rotation_b).iter())
        .map(|(&x, &y)| x * y)
        .sum()
}

/// Best rotation of `candidate` against `target` at rotation 0
///
/// Rotations are tried in ascending order and only a strictly higher score
/// replaces the current best, so the lowest rotation wins ties.
pub fn best_rotation(target: &Tile, candidate: &Tile) -> (Rotation, f64) {
    let mut best = (Rotation::Deg0, f64::NEG_INFINITY);
    for rotation in Rotation::ALL {
        let score = similarity(target, Rotation::Deg0, candidate, rotation);
        if score > best.1 {
            best = (rotation, score);
        }
    }
    best
}
