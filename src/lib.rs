//! # yoda-plot
//!
//! A library and command-line tool for plotting Rivet analysis results stored in YODA files.
//!
//! A Rivet run writes every analysis object up to three times: finalized,
//! unfinalized (`/RAW`) and as reference data (`/REF`). Which of them holds
//! usable data depends on how the job ended, so the plotter looks the
//! histogram up under each namespace in turn and uses the first one that has
//! entries, an event count and a cross-section.
//!
//! ## Features
//!
//! - **YODA reader**: Histograms, counters and scalar estimates in YODA1 and YODA2 layouts
//! - **Compressed input**: Transparent reading of gzip-compressed `.yoda.gz` files
//! - **Namespace fallback**: Finalized, `/RAW` and `/REF` objects with a configurable preference
//! - **Error-bar plots**: PNG rendering with bin-width and height-error bars
//!
//! ## Example
//!
//! ```rust,no_run
//! use yoda_plot::{MatchingConfig, MatchingEngine};
//! use yoda_plot::parsing::yoda::parse_yoda_file;
//! use yoda_plot::render::errorbar::{points_from_histogram, render_png};
//! use yoda_plot::render::{plot_title, PlotStyle};
//! use std::path::Path;
//!
//! let objects = parse_yoda_file(Path::new("Rivet.yoda")).unwrap();
//! let selection = MatchingEngine::new(&objects, MatchingConfig::default())
//!     .find()
//!     .unwrap();
//!
//! let title = plot_title(selection.num_events(), &selection.prefix);
//! let points = points_from_histogram(selection.histogram);
//! render_png(&points, &title, &PlotStyle::default(), Path::new("Rivet.png")).unwrap();
//! ```
//!
//! ## Modules
//!
//! - [`core`]: Histogram, counter and estimate types
//! - [`parsing`]: YODA file reader
//! - [`matching`]: Namespace fallback search
//! - [`render`]: Chart rendering
//! - [`cli`]: Command-line interface implementation

pub mod cli;
pub mod core;
pub mod matching;
pub mod parsing;
pub mod render;
pub mod utils;

// Re-export commonly used types for convenience
pub use core::{AnalysisObject, AnalysisObjects, Counter, Estimate, Histo1D, Prefix};
pub use matching::engine::{MatchingConfig, MatchingEngine, Selection};
pub use parsing::ParseError;
