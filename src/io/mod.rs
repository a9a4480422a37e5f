/// Fixed-layout grayscale bitmap reader and writer
pub mod bitmap;
/// Command-line interface
pub mod cli;
/// Default geometry, file names and format constants
pub mod configuration;
/// Error types
pub mod error;
/// PNG preview export
pub mod image;
/// Logger setup
pub mod logging;
/// Text mosaic reader and writer
pub mod mosaic;
/// Text parts reader and writer
pub mod parts;
/// Assignment progress display
pub mod progress;
