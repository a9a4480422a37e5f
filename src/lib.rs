//! Greedy rotation-aware reassembly of grayscale tile mosaics
//!
//! A target picture, cut into a grid of square tiles, is rebuilt out of the
//! tiles of a base picture. Every target cell is matched to the most similar
//! unused base tile in any of its four quarter-turn rotations, using cosine
//! similarity of brightness vectors.

#![deny(unsafe_code)]

/// Similarity, visitation order, assignment and validation
pub mod algorithm;
/// Tile set and mosaic codecs, CLI, logging and error handling
pub mod io;
/// Grid geometry, tiles, tile stores and mosaic layouts
pub mod spatial;

pub use io::error::{MosaicError, Result};
