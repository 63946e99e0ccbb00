use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::core::{AnalysisObjects, Counter, Estimate, Histo1D, Prefix};

/// Histogram plotted when none is given on the command line
pub const DEFAULT_HISTOGRAM: &str = "/ALICE_YYYY_I1234567/d01-x01-y01";

/// Event counter written by Rivet next to every set of analysis objects
pub const EVENT_COUNT_PATH: &str = "/_EVTCOUNT";

/// Cross-section estimate written by Rivet next to every set of analysis objects
pub const CROSS_SECTION_PATH: &str = "/_XSEC";

/// Default minimum effective number of entries for a histogram to be used
pub const DEFAULT_MIN_EFF_ENTRIES: f64 = 0.1;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SelectError {
    #[error("No analysis objects read")]
    NoData,

    #[error("Histogram not found")]
    HistogramNotFound {
        histogram: String,
        tried: Vec<Candidate>,
    },
}

/// Configuration for the prefix search
#[derive(Debug, Clone)]
pub struct MatchingConfig {
    /// Histogram path without prefix
    pub histogram: String,
    /// Prefixes in priority order
    pub prefixes: Vec<Prefix>,
    /// A histogram needs strictly more effective entries than this
    pub min_eff_entries: f64,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            histogram: DEFAULT_HISTOGRAM.to_string(),
            prefixes: prefix_order(false, false),
            min_eff_entries: DEFAULT_MIN_EFF_ENTRIES,
        }
    }
}

impl MatchingConfig {
    #[must_use]
    pub fn with_histogram(mut self, histogram: impl Into<String>) -> Self {
        self.histogram = histogram.into();
        self
    }

    #[must_use]
    pub fn with_prefixes(mut self, prefixes: Vec<Prefix>) -> Self {
        self.prefixes = prefixes;
        self
    }

    #[must_use]
    pub fn with_min_eff_entries(mut self, min_eff_entries: f64) -> Self {
        self.min_eff_entries = min_eff_entries;
        self
    }
}

/// Prefix priority for the raw/reference preference flags.
///
/// All three namespaces are always searched; the flags only move the
/// preferred variant to the front.
#[must_use]
pub fn prefix_order(raw: bool, reference: bool) -> Vec<Prefix> {
    match (raw, reference) {
        (false, false) => vec![Prefix::none(), Prefix::raw(), Prefix::reference()],
        (true, false) => vec![Prefix::raw(), Prefix::none(), Prefix::reference()],
        (false, true) => vec![Prefix::reference(), Prefix::none(), Prefix::raw()],
        (true, true) => vec![Prefix::raw(), Prefix::reference(), Prefix::none()],
    }
}

/// Why a prefix was not selected
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", tag = "reason", content = "value")]
pub enum Rejection {
    MissingHistogram,
    TooFewEntries(f64),
    MissingEventCount,
    MissingCrossSection,
}

impl std::fmt::Display for Rejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingHistogram => write!(f, "histogram missing"),
            Self::TooFewEntries(n) => write!(f, "only {n:.3} effective entries"),
            Self::MissingEventCount => write!(f, "event count missing"),
            Self::MissingCrossSection => write!(f, "cross-section missing"),
        }
    }
}

/// A prefix that was tried and rejected
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Candidate {
    pub prefix: Prefix,
    pub rejection: Rejection,
}

/// The histogram chosen for plotting, with its companion objects
#[derive(Debug, Clone)]
pub struct Selection<'a> {
    pub prefix: Prefix,
    pub histogram: &'a Histo1D,
    pub event_count: &'a Counter,
    pub cross_section: &'a Estimate,
    pub eff_entries: f64,
    /// Higher-priority prefixes that were passed over
    pub rejected: Vec<Candidate>,
}

impl Selection<'_> {
    #[must_use]
    pub fn num_events(&self) -> f64 {
        self.event_count.val()
    }
}

/// Searches analysis objects for the first usable histogram in prefix order
pub struct MatchingEngine<'a> {
    objects: &'a AnalysisObjects,
    config: MatchingConfig,
}

impl<'a> MatchingEngine<'a> {
    #[must_use]
    pub fn new(objects: &'a AnalysisObjects, config: MatchingConfig) -> Self {
        Self { objects, config }
    }

    /// Find the histogram under the first prefix that has enough entries and
    /// both companion objects.
    ///
    /// # Errors
    ///
    /// Returns `SelectError::NoData` if there are no objects at all, or
    /// `SelectError::HistogramNotFound` if no prefix qualifies.
    pub fn find(&self) -> Result<Selection<'a>, SelectError> {
        if self.objects.is_empty() {
            return Err(SelectError::NoData);
        }

        let mut rejected = Vec::new();
        for prefix in &self.config.prefixes {
            match self.try_prefix(prefix) {
                Ok((histogram, event_count, cross_section)) => {
                    let eff_entries = histogram.eff_num_entries();
                    debug!(
                        prefix = %prefix,
                        histogram = %histogram.path,
                        eff_entries,
                        "Selected histogram"
                    );
                    return Ok(Selection {
                        prefix: prefix.clone(),
                        histogram,
                        event_count,
                        cross_section,
                        eff_entries,
                        rejected,
                    });
                }
                Err(rejection) => {
                    debug!(prefix = %prefix, %rejection, "Prefix rejected");
                    rejected.push(Candidate {
                        prefix: prefix.clone(),
                        rejection,
                    });
                }
            }
        }

        Err(SelectError::HistogramNotFound {
            histogram: self.config.histogram.clone(),
            tried: rejected,
        })
    }

    fn try_prefix(
        &self,
        prefix: &Prefix,
    ) -> Result<(&'a Histo1D, &'a Counter, &'a Estimate), Rejection> {
        let objects: &'a AnalysisObjects = self.objects;

        let histogram = objects
            .histo1d(&prefix.qualify(&self.config.histogram))
            .ok_or(Rejection::MissingHistogram)?;

        let eff_entries = histogram.eff_num_entries();
        // NaN never qualifies
        if !(eff_entries > self.config.min_eff_entries) {
            return Err(Rejection::TooFewEntries(eff_entries));
        }

        let event_count = objects
            .counter(&prefix.qualify(EVENT_COUNT_PATH))
            .ok_or(Rejection::MissingEventCount)?;
        let cross_section = objects
            .estimate(&prefix.qualify(CROSS_SECTION_PATH))
            .ok_or(Rejection::MissingCrossSection)?;

        Ok((histogram, event_count, cross_section))
    }
}
