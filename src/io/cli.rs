//! Command-line interface running one load, assign, validate and export pass

use crate::algorithm::assignment::GreedyAssignment;
use crate::algorithm::order::{OrderPolicy, VisitationOrder};
use crate::algorithm::validation::{all_tiles_consumed, check_completeness};
use crate::io::bitmap::{read_bitmap_file, write_bitmap_file};
use crate::io::configuration::{
    DEFAULT_BASE_FILE, DEFAULT_BITMAP_FILE, DEFAULT_GRID_COLS, DEFAULT_GRID_ROWS,
    DEFAULT_MOSAIC_FILE, DEFAULT_SEED, DEFAULT_TARGET_FILE, DEFAULT_TILE_SIZE,
};
use crate::io::error::{Result, invalid_parameter, invalid_source};
use crate::io::image::export_layout_as_png;
use crate::io::mosaic::write_mosaic_file;
use crate::io::parts::read_parts_file;
use crate::io::progress::AssignmentProgress;
use crate::spatial::geometry::GridShape;
use crate::spatial::layout::MosaicLayout;
use crate::spatial::store::TileStore;
use clap::{Parser, ValueEnum};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Instant;

/// Encoding of the tile set input files
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum InputFormat {
    /// Whitespace-separated identifiers and samples
    #[default]
    Text,
    /// 8-bit grayscale bitmap, tiles numbered in raster order
    Bitmap,
}

/// Manual exchange of two layout cells, written `ROW,COL:ROW,COL`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellSwap {
    /// First cell (row, col)
    pub first: [usize; 2],
    /// Second cell (row, col)
    pub second: [usize; 2],
}

fn parse_cell(text: &str) -> std::result::Result<[usize; 2], String> {
    let (row, col) = text
        .split_once(',')
        .ok_or_else(|| format!("expected ROW,COL but got '{text}'"))?;
    let parse = |part: &str| {
        part.trim()
            .parse::<usize>()
            .map_err(|e| format!("'{part}' is not a cell index: {e}"))
    };
    Ok([parse(row)?, parse(col)?])
}

impl FromStr for CellSwap {
    type Err = String;

    fn from_str(text: &str) -> std::result::Result<Self, Self::Err> {
        let (first, second) = text
            .split_once(':')
            .ok_or_else(|| format!("expected ROW,COL:ROW,COL but got '{text}'"))?;
        Ok(Self {
            first: parse_cell(first)?,
            second: parse_cell(second)?,
        })
    }
}

#[derive(Parser, Debug)]
#[command(name = "greedymosaic")]
#[command(
    author,
    version,
    about = "Rebuild a target picture from the tiles of a base picture"
)]
/// Command-line arguments for the mosaic tool
pub struct Cli {
    /// Tile set whose tiles are placed
    #[arg(short, long, default_value = DEFAULT_BASE_FILE)]
    pub base: PathBuf,

    /// Tile set describing the picture to reproduce
    #[arg(short, long, default_value = DEFAULT_TARGET_FILE)]
    pub target: PathBuf,

    /// Encoding of both tile set files
    #[arg(short, long, value_enum, default_value_t = InputFormat::Text)]
    pub format: InputFormat,

    /// Number of tile rows
    #[arg(long, default_value_t = DEFAULT_GRID_ROWS)]
    pub rows: usize,

    /// Number of tile columns
    #[arg(long, default_value_t = DEFAULT_GRID_COLS)]
    pub cols: usize,

    /// Tile edge length in samples
    #[arg(long, default_value_t = DEFAULT_TILE_SIZE)]
    pub tile_size: usize,

    /// Order in which target cells pick their tile
    #[arg(short, long, value_enum, default_value_t = OrderPolicy::Ascending)]
    pub order: OrderPolicy,

    /// Seed for the shuffled order
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Text mosaic output
    #[arg(long, default_value = DEFAULT_MOSAIC_FILE)]
    pub output: PathBuf,

    /// Bitmap of the assembled mosaic
    #[arg(long, default_value = DEFAULT_BITMAP_FILE)]
    pub bitmap: PathBuf,

    /// Optional PNG preview of the assembled mosaic
    #[arg(long)]
    pub png: Option<PathBuf>,

    /// Optional bitmap of the unmodified base tile set
    #[arg(long)]
    pub export_base: Option<PathBuf>,

    /// Swap two cells after assignment (repeatable)
    #[arg(long, value_name = "ROW,COL:ROW,COL")]
    pub swap: Vec<CellSwap>,

    /// Only report warnings and errors
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase log detail (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Grid geometry selected on the command line
    pub const fn shape(&self) -> GridShape {
        GridShape::new(self.rows, self.cols, self.tile_size)
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }
}

/// Orchestrates one run from input files to exported mosaic
pub struct MosaicProcessor {
    cli: Cli,
}

impl MosaicProcessor {
    /// Create a processor for the given arguments
    pub const fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Load, assign, validate, edit and export
    ///
    /// # Errors
    ///
    /// Returns the first failure: unreadable or malformed input, a failed
    /// assignment, unconsumed tiles, or an export error
    pub fn process(&self) -> Result<()> {
        let start_time = Instant::now();
        let shape = self.cli.shape();
        shape.validate()?;

        let base = self.load_store(&self.cli.base, shape)?;
        let target = self.load_store(&self.cli.target, shape)?;

        if let Some(path) = &self.cli.export_base {
            write_bitmap_file(path, &MosaicLayout::scaffold(&base).render(&base)?)?;
        }

        let order = VisitationOrder::new(shape, self.cli.order, self.cli.seed);
        log::info!(
            "assigning {} cells in {:?} order",
            order.len(),
            self.cli.order
        );

        let mut engine = GreedyAssignment::new(base, target, order)?;
        let progress = self
            .cli
            .should_show_progress()
            .then(|| AssignmentProgress::new(engine.progress().1, "assigning"));
        while engine.execute_step()? {
            if let Some(bar) = &progress {
                bar.update(engine.progress().0);
            }
        }
        if let Some(bar) = &progress {
            bar.finish();
        }

        let report = engine.report();
        let (base, target, mut layout) = engine.into_parts();

        if !all_tiles_consumed(&base) || !all_tiles_consumed(&target) {
            return Err(invalid_source(&format!(
                "assignment left tiles unused: base {}/{} locked, target {}/{} locked",
                base.locked_count(),
                shape.cell_count(),
                target.locked_count(),
                shape.cell_count()
            )));
        }
        log::info!(
            "assigned {} cells, mean similarity {:.4}, worst {:.4}",
            report.assigned,
            report.mean_similarity().unwrap_or(0.0),
            report.min_similarity.unwrap_or(0.0)
        );

        Self::report_completeness(&layout, &base, "after assignment");

        if !self.cli.swap.is_empty() {
            for swap in &self.cli.swap {
                layout
                    .swap(swap.first, swap.second)
                    .map_err(|e| invalid_parameter("swap", &format!("{swap:?}"), &e))?;
            }
            log::info!("applied {} manual swaps", self.cli.swap.len());
            Self::report_completeness(&layout, &base, "after manual edits");
        }

        write_mosaic_file(&self.cli.output, &layout, &base)?;
        write_bitmap_file(&self.cli.bitmap, &layout.render(&base)?)?;
        if let Some(path) = &self.cli.png {
            export_layout_as_png(&layout, &base, path)?;
        }

        log::info!("done in {:.2?}", start_time.elapsed());
        Ok(())
    }

    fn load_store(&self, path: &Path, shape: GridShape) -> Result<TileStore> {
        match self.cli.format {
            InputFormat::Text => read_parts_file(path, shape),
            InputFormat::Bitmap => read_bitmap_file(path, shape),
        }
    }

    // Incomplete layouts are reported but still written, so they can be fixed by hand
    fn report_completeness(layout: &MosaicLayout, base: &TileStore, stage: &str) {
        let report = check_completeness(layout, base);
        if report.is_complete() {
            log::debug!("layout complete {stage}");
        } else {
            log::warn!(
                "layout incomplete {stage}: missing {:?}, duplicated {:?}, out of range {:?}",
                report.missing,
                report.duplicated,
                report.out_of_range
            );
        }
    }
}
