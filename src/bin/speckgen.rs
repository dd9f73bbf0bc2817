//! Process input CSV files for OpenSpace.
//!
//! Reads a dataset CSV describing one asset group per row, converts each
//! row's points CSV into speck/label files plus the Lua assets that load
//! them, purges stale copies from the OpenSpace cache, and copies the
//! fresh outputs into the asset directory.

use clap::Parser;
use log::LevelFilter;
use speckgen::pipeline::{self, Config};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "speckgen",
    about = "Process input CSV files for OpenSpace",
    long_about = None
)]
struct Args {
    /// Input dataset CSV file
    #[arg(short = 'i', long)]
    input_dataset_csv_file: PathBuf,

    /// OpenSpace cache directory
    #[arg(short, long)]
    cache_dir: PathBuf,

    /// Output directory for assets
    #[arg(short, long)]
    asset_dir: PathBuf,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    env_logger::Builder::from_default_env()
        .filter_level(if args.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        })
        .init();

    let config = Config {
        dataset: args.input_dataset_csv_file,
        cache_dir: args.cache_dir,
        asset_dir: args.asset_dir,
    };

    let outputs = pipeline::run(&config)?;
    println!(
        "Wrote {} files to {}",
        outputs.len(),
        config.asset_dir.display()
    );
    Ok(())
}
