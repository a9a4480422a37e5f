//! Default geometry, file names and fixed format constants

/// Number of tile rows in the default mosaic grid
pub const DEFAULT_GRID_ROWS: usize = 20;
/// Number of tile columns in the default mosaic grid
pub const DEFAULT_GRID_COLS: usize = 20;
/// Edge length of a square tile in samples
pub const DEFAULT_TILE_SIZE: usize = 10;

// Safety limit to prevent excessive memory allocation
/// Maximum allowed grid or tile dimension
pub const MAX_GRID_DIMENSION: usize = 10_000;

/// Maximum number of cells in one grid
pub const MAX_GRID_CELLS: usize = 1_000_000;

/// Maximum number of brightness samples across all tiles of one grid
pub const MAX_GRID_SAMPLES: usize = 1 << 24;

/// Parts file providing the tiles that get placed
pub const DEFAULT_BASE_FILE: &str = "noguchi_parts.txt";
/// Parts file describing the picture to reproduce
pub const DEFAULT_TARGET_FILE: &str = "kitazato_parts.txt";
/// Text mosaic written after assignment
pub const DEFAULT_MOSAIC_FILE: &str = "mosaic.txt";
/// Bitmap of the assembled mosaic
pub const DEFAULT_BITMAP_FILE: &str = "mosaic.bmp";

/// Seed for the shuffled visitation order
pub const DEFAULT_SEED: u64 = 42;

/// Width of the assignment progress bar in characters
pub const PROGRESS_BAR_WIDTH: u16 = 40;

// Bitmap layout: BITMAPFILEHEADER + BITMAPINFOHEADER + 256 gray palette entries
/// Size of the bitmap file header in bytes
pub const BMP_FILE_HEADER_SIZE: usize = 14;
/// Size of the bitmap info header in bytes
pub const BMP_INFO_HEADER_SIZE: usize = 40;
/// Number of palette entries for 8-bit indexed grayscale
pub const BMP_PALETTE_ENTRIES: usize = 256;
/// Bytes per palette entry (blue, green, red, reserved)
pub const BMP_PALETTE_ENTRY_SIZE: usize = 4;
/// Offset of the pixel array from the start of the file
pub const BMP_PIXEL_OFFSET: usize =
    BMP_FILE_HEADER_SIZE + BMP_INFO_HEADER_SIZE + BMP_PALETTE_ENTRIES * BMP_PALETTE_ENTRY_SIZE;
