//! Command-line interface for yoda-plot.
//!
//! A single command: read a YODA file, pick the histogram from the first
//! usable namespace, plot it and optionally save the plot next to the input.
//!
//! ## Usage
//!
//! ```text
//! # Plot the default histogram from the default file
//! yoda-plot
//!
//! # Prefer the unfinalized (/RAW) objects and save a PNG
//! yoda-plot Rivet.yoda --raw --save
//!
//! # Machine-readable summary, no viewer
//! yoda-plot Rivet.yoda.gz --no-show --format json
//!
//! # What is in the file?
//! yoda-plot Rivet.yoda --list
//! ```

use std::path::PathBuf;

use clap::Parser;

use crate::matching::engine::{DEFAULT_HISTOGRAM, DEFAULT_MIN_EFF_ENTRIES};
use crate::utils::validation::normalize_object_path;

pub mod plot;
pub mod prompt;

/// Input file used when none is given
pub const DEFAULT_INPUT: &str = "AO2D_LHC23d1f_520259_001.yoda";

#[derive(Parser)]
#[command(name = "yoda-plot")]
#[command(version)]
#[command(about = "Plot results of a Rivet analysis from a YODA file")]
#[command(
    long_about = "yoda-plot reads the analysis objects of a Rivet run from a YODA file and draws the charged-particle pseudorapidity density as an error-bar plot.\n\nThe histogram is looked up under the finalized, /RAW and /REF namespaces in turn; the first one with data (and with event count and cross-section alongside) is plotted."
)]
pub struct Cli {
    /// Input YODA file (plain or gzip-compressed)
    #[arg(default_value = DEFAULT_INPUT, value_parser = existing_file)]
    pub input: PathBuf,

    /// Show raw results (prefer the /RAW objects)
    #[arg(short = 'r', long)]
    pub raw: bool,

    /// Show reference results (prefer the /REF objects)
    #[arg(short = 'R', long)]
    pub reference: bool,

    /// Save plot to image file (<input stem>.png)
    #[arg(short, long)]
    pub save: bool,

    /// Histogram path, without namespace prefix
    #[arg(long, default_value = DEFAULT_HISTOGRAM, value_parser = object_path)]
    pub histogram: String,

    /// Minimum effective number of entries for a histogram to be used
    #[arg(long, default_value_t = DEFAULT_MIN_EFF_ENTRIES)]
    pub min_entries: f64,

    /// Do not open the plot in the image viewer
    #[arg(long)]
    pub no_show: bool,

    /// List the analysis objects in the file instead of plotting
    #[arg(long)]
    pub list: bool,

    /// Output format of the summary
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}

fn existing_file(s: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(s);
    if path.is_file() {
        Ok(path)
    } else {
        Err(format!("can't open '{s}': no such file"))
    }
}

fn object_path(s: &str) -> Result<String, String> {
    normalize_object_path(s).ok_or_else(|| format!("'{s}' is not a valid object path"))
}
