//! CLI entry point for greedy tile mosaic reassembly

use clap::Parser;
use greedymosaic::io::cli::{Cli, MosaicProcessor};
use greedymosaic::io::logging::{init_logging, level_for};

fn main() -> greedymosaic::Result<()> {
    let cli = Cli::parse();
    init_logging(level_for(cli.quiet, cli.verbose));
    let processor = MosaicProcessor::new(cli);
    processor.process()
}
