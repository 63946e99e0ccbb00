//! Core data types for analysis objects read from YODA files.
//!
//! - [`Histo1D`]: A 1D binned histogram with per-bin fill statistics
//! - [`Counter`]: A weighted event counter (e.g. `/_EVTCOUNT`)
//! - [`Estimate`]: A single value with errors (e.g. the cross-section `/_XSEC`)
//! - [`AnalysisObjects`]: The objects of one file, indexed by path
//! - [`Prefix`], [`ObjectKind`]: Path namespace and object classification
//!
//! ## Paths
//!
//! Rivet writes the same analysis output under several namespaces:
//!
//! | Prefix | Content |
//! |--------|---------|
//! | (none) | Finalized, scaled objects |
//! | `/RAW` | Objects before finalization |
//! | `/REF` | Reference data shipped with the analysis |

pub mod counter;
pub mod estimate;
pub mod histogram;
pub mod object;
pub mod types;

pub use counter::Counter;
pub use estimate::Estimate;
pub use histogram::{Dbn1D, Histo1D, HistoBin1D};
pub use object::{AnalysisObject, AnalysisObjects};
pub use types::{ObjectKind, Prefix};
