//! Histogram selection across output namespaces.
//!
//! Rivet writes each analysis object up to three times: finalized (no
//! prefix), unfinalized (`/RAW`) and reference data (`/REF`). Depending on
//! how a job ended, some of these are empty. The [`MatchingEngine`] walks the
//! prefixes in priority order and selects the first one where:
//!
//! 1. the histogram exists and has more than the minimum effective entries,
//! 2. the event counter `<prefix>/_EVTCOUNT` exists,
//! 3. the cross-section `<prefix>/_XSEC` exists.
//!
//! ## Example
//!
//! ```rust,no_run
//! use yoda_plot::matching::{MatchingConfig, MatchingEngine};
//! use yoda_plot::parsing::yoda::parse_yoda_file;
//! use std::path::Path;
//!
//! let objects = parse_yoda_file(Path::new("Rivet.yoda")).unwrap();
//! let engine = MatchingEngine::new(&objects, MatchingConfig::default());
//! let selection = engine.find().unwrap();
//!
//! println!("{} events under '{}'", selection.num_events(), selection.prefix);
//! ```

pub mod engine;

pub use engine::{
    prefix_order, Candidate, MatchingConfig, MatchingEngine, Rejection, SelectError, Selection,
};
