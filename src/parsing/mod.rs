//! Readers for analysis object files.
//!
//! - **YODA files** ([`yoda`]): Rivet's text format, versions 1 and 2
//! - **Compression** ([`format`]): transparent gzip decoding (`.yoda.gz`)
//!
//! ## Example
//!
//! ```rust,no_run
//! use yoda_plot::parsing::yoda::{parse_yoda_file, parse_yoda_text};
//! use std::path::Path;
//!
//! // Parse from a file
//! let objects = parse_yoda_file(Path::new("Rivet.yoda")).unwrap();
//!
//! // Or parse from raw text
//! let text = "BEGIN YODA_COUNTER_V2 /_EVTCOUNT\n---\n100 100 100\nEND YODA_COUNTER_V2\n";
//! let objects = parse_yoda_text(text).unwrap();
//! assert_eq!(objects.len(), 1);
//! ```
//!
//! ## Supported Objects
//!
//! | Block | Model |
//! |-------|-------|
//! | `HISTO1D`, `HISTO1D_V2`, `HISTO1D_V3` | [`Histo1D`](crate::core::Histo1D) |
//! | `COUNTER`, `COUNTER_V2`, `COUNTER_V3` | [`Counter`](crate::core::Counter) |
//! | `SCATTER1D`, `SCATTER1D_V2`, `ESTIMATE0D_V3` | [`Estimate`](crate::core::Estimate) |

pub mod format;
pub mod yoda;

pub use yoda::ParseError;
