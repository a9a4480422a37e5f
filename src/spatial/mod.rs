//! Spatial data structures for tiles and grids
//!
//! This module contains:
//! - Grid shape and rotation types
//! - Tiles with precomputed rotations
//! - Tile stores and mosaic layouts

/// Grid shape and rotation vocabulary
pub mod geometry;
/// Mosaic layouts referencing base tiles
pub mod layout;
/// Tile stores addressed by grid cell
pub mod store;
/// Tiles and their rotation variants
pub mod tiles;

pub use geometry::{GridShape, Rotation};
pub use layout::{MosaicLayout, Position};
pub use store::TileStore;
pub use tiles::{Tile, TileRecord};
