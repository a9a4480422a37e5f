//! Error types for loading, matching and exporting mosaics

use std::fmt;
use std::path::PathBuf;

/// Main error type for all mosaic operations
#[derive(Debug)]
pub enum MosaicError {
    /// Failed to decode a bitmap or other image from disk
    ImageLoad {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image decoding error
        source: image::ImageError,
    },

    /// Failed to save a rendered image to disk
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Input ended before the fixed grid shape was filled
    Truncated {
        /// What was being read when input ran out
        what: &'static str,
        /// Number of items the shape requires
        expected: usize,
        /// Number of items actually available
        found: usize,
    },

    /// Input is present but does not describe a valid tile set or layout
    InvalidSourceData {
        /// Description of what's wrong with the source data
        reason: String,
    },

    /// Parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// A layout position refers to a cell outside its tile store
    InvalidTileIndex {
        /// The offending (row, col) handle
        position: [usize; 2],
        /// Store dimensions (rows, cols)
        grid_dimensions: (usize, usize),
    },

    /// Base and target stores have different shapes
    ShapeMismatch {
        /// Base store dimensions (rows, cols, tile size)
        base: (usize, usize, usize),
        /// Target store dimensions (rows, cols, tile size)
        target: (usize, usize, usize),
    },

    /// The visitation order reached a target cell that was already assigned
    ///
    /// Happens only when the order is not a permutation or the stores were
    /// reused from a previous run without reloading.
    TargetAlreadyLocked {
        /// Target cell (row, col)
        coordinate: [usize; 2],
        /// Zero-based step in the visitation order
        step: usize,
    },

    /// No unlocked base tile was left for a target cell
    BaseExhausted {
        /// Target cell (row, col) that could not be served
        coordinate: [usize; 2],
    },
}

impl fmt::Display for MosaicError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ImageLoad { path, source } => {
                write!(f, "Failed to load image '{}': {source}", path.display())
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
            Self::Truncated {
                what,
                expected,
                found,
            } => {
                write!(
                    f,
                    "Truncated {what}: expected {expected} items, found {found}"
                )
            }
            Self::InvalidSourceData { reason } => {
                write!(f, "Invalid source data: {reason}")
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::InvalidTileIndex {
                position,
                grid_dimensions,
            } => {
                write!(
                    f,
                    "Tile position ({}, {}) is out of bounds (grid size {}x{})",
                    position[0], position[1], grid_dimensions.0, grid_dimensions.1
                )
            }
            Self::ShapeMismatch { base, target } => {
                write!(
                    f,
                    "Base grid {}x{} (tile {}) does not match target grid {}x{} (tile {})",
                    base.0, base.1, base.2, target.0, target.1, target.2
                )
            }
            Self::TargetAlreadyLocked { coordinate, step } => {
                write!(
                    f,
                    "Target cell ({}, {}) already assigned at step {step}",
                    coordinate[0], coordinate[1]
                )
            }
            Self::BaseExhausted { coordinate } => {
                write!(
                    f,
                    "No unassigned base tile left for target cell ({}, {})",
                    coordinate[0], coordinate[1]
                )
            }
        }
    }
}

impl std::error::Error for MosaicError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageLoad { source, .. } | Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for mosaic results
pub type Result<T> = std::result::Result<T, MosaicError>;

impl From<image::ImageError> for MosaicError {
    fn from(err: image::ImageError) -> Self {
        Self::ImageLoad {
            path: PathBuf::from("<unknown>"),
            source: err,
        }
    }
}

impl From<std::io::Error> for MosaicError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> MosaicError {
    MosaicError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create an invalid source data error
pub fn invalid_source(reason: &impl ToString) -> MosaicError {
    MosaicError::InvalidSourceData {
        reason: reason.to_string(),
    }
}

/// Attach a path and operation name to an I/O error
pub fn file_system(
    path: impl Into<PathBuf>,
    operation: &'static str,
) -> impl FnOnce(std::io::Error) -> MosaicError {
    let path = path.into();
    move |source| MosaicError::FileSystem {
        path,
        operation,
        source,
    }
}
