//! # rawxrd
//!
//! Command-line inspection of Bruker RAW1.01 diffraction files.
//!
//! ## Usage
//!
//! ```bash
//! # Header and range overview
//! rawxrd info sample.raw
//!
//! # Full metadata as JSON
//! rawxrd info sample.raw --json
//!
//! # 2theta profile summed over the whole map
//! rawxrd integrate sample.raw --region all --axis angular
//!
//! # Nearest indices for a coordinate
//! rawxrd lookup sample.raw --angular 28.4 --tilt 90
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::info;
use std::path::{Path, PathBuf};

use rawxrd::{Dataset, DecodeOptions, IntegrationAxis, Region};

/// rawxrd - Bruker RAW1.01 decoder
#[derive(Parser)]
#[command(name = "rawxrd")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Decode ranges in parallel
    #[arg(long, global = true)]
    parallel: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Display header and range information
    Info {
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Print every decoded header field as JSON
        #[arg(long)]
        json: bool,
    },

    /// Sum the intensity over a region, keeping one axis
    Integrate {
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// "all" or x1,y1,x2,y2 index box
        #[arg(short, long, default_value = "all")]
        region: Region,

        /// Axis to keep: angular or tilt
        #[arg(short, long, default_value = "angular")]
        axis: IntegrationAxis,
    },

    /// Resolve coordinates to the nearest axis indices
    Lookup {
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// 2theta value
        #[arg(long, allow_negative_numbers = true)]
        angular: Option<f64>,

        /// Tilt value (area maps only)
        #[arg(long, allow_negative_numbers = true)]
        tilt: Option<f64>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let options = DecodeOptions::builder().parallel(cli.parallel).build();
    match cli.command {
        Commands::Info { file, json } => run_info(&file, &options, json),
        Commands::Integrate {
            file,
            region,
            axis,
        } => run_integrate(&file, &options, region, axis),
        Commands::Lookup {
            file,
            angular,
            tilt,
        } => run_lookup(&file, &options, angular, tilt),
    }
}

fn open(path: &Path, options: &DecodeOptions) -> Result<Dataset> {
    let dataset = Dataset::open_with(path, options)
        .with_context(|| format!("Failed to decode {}", path.display()))?;
    info!("Opened {}", dataset.source());
    Ok(dataset)
}

fn run_info(path: &Path, options: &DecodeOptions, json: bool) -> Result<()> {
    let dataset = open(path, options)?;
    if json {
        println!("{}", dataset.metadata_json()?);
    } else {
        print!("{}", dataset.summary());
    }
    Ok(())
}

fn run_integrate(
    path: &Path,
    options: &DecodeOptions,
    region: Region,
    axis: IntegrationAxis,
) -> Result<()> {
    let dataset = open(path, options)?;
    let line = dataset.integrate(&region, axis)?;
    let coordinates = match axis {
        IntegrationAxis::Angular => Some(dataset.angular_axis()),
        IntegrationAxis::Tilt => dataset.tilt_axis(),
    };

    let offset = match (axis, region) {
        (IntegrationAxis::Angular, Region::Box { x1, .. }) => x1,
        (IntegrationAxis::Tilt, Region::Box { y1, .. }) => y1,
        (_, Region::All) => 0,
    };
    for (i, value) in line.iter().enumerate() {
        match coordinates.and_then(|axis| axis.get(offset + i)) {
            Some(coordinate) => println!("{coordinate}\t{value}"),
            None => println!("{}\t{value}", offset + i),
        }
    }
    Ok(())
}

fn run_lookup(
    path: &Path,
    options: &DecodeOptions,
    angular: Option<f64>,
    tilt: Option<f64>,
) -> Result<()> {
    let dataset = open(path, options)?;
    let (x, y) = dataset.index_of(angular, tilt)?;
    if let Some(x) = x {
        println!("angular index: {x} ({})", dataset.angular_axis()[x]);
    }
    if let (Some(y), Some(axis)) = (y, dataset.tilt_axis()) {
        println!("tilt index: {y} ({})", axis[y]);
    }
    Ok(())
}
