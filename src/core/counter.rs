use serde::{Deserialize, Serialize};

/// A weighted event counter, e.g. `/_EVTCOUNT`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Counter {
    pub path: String,
    pub sumw: f64,
    pub sumw2: f64,
    pub num_entries: f64,
}

impl Counter {
    pub fn new(path: impl Into<String>, sumw: f64, sumw2: f64, num_entries: f64) -> Self {
        Self {
            path: path.into(),
            sumw,
            sumw2,
            num_entries,
        }
    }

    /// Sum of weights
    #[must_use]
    pub fn val(&self) -> f64 {
        self.sumw
    }

    #[must_use]
    pub fn err(&self) -> f64 {
        self.sumw2.sqrt()
    }

    #[must_use]
    pub fn num_entries(&self) -> f64 {
        self.num_entries
    }
}
