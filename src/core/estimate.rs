use serde::{Deserialize, Serialize};

/// A single value with asymmetric errors, e.g. the cross-section `/_XSEC`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Estimate {
    pub path: String,
    pub value: f64,
    /// Downward error, stored as a non-negative magnitude
    pub err_down: f64,
    pub err_up: f64,
}

impl Estimate {
    /// Create an estimate; the sign of the errors is dropped
    pub fn new(path: impl Into<String>, value: f64, err_down: f64, err_up: f64) -> Self {
        Self {
            path: path.into(),
            value,
            err_down: err_down.abs(),
            err_up: err_up.abs(),
        }
    }

    #[must_use]
    pub fn val(&self) -> f64 {
        self.value
    }

    /// Average of the down and up errors
    #[must_use]
    pub fn err_avg(&self) -> f64 {
        (self.err_down + self.err_up) / 2.0
    }
}
