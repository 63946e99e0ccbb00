use serde::{Deserialize, Serialize};

/// Fill statistics of a weighted distribution (one bin, a flow bin, or the total)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Dbn1D {
    pub sumw: f64,
    pub sumw2: f64,
    pub sumwx: f64,
    pub sumwx2: f64,
    pub num_entries: f64,
}

impl Dbn1D {
    #[must_use]
    pub fn new(sumw: f64, sumw2: f64, sumwx: f64, sumwx2: f64, num_entries: f64) -> Self {
        Self {
            sumw,
            sumw2,
            sumwx,
            sumwx2,
            num_entries,
        }
    }

    /// Effective number of entries, `(Σw)² / Σw²`
    #[must_use]
    pub fn eff_num_entries(&self) -> f64 {
        if self.sumw2 == 0.0 {
            return 0.0;
        }
        self.sumw * self.sumw / self.sumw2
    }
}

impl std::ops::AddAssign for Dbn1D {
    fn add_assign(&mut self, other: Self) {
        self.sumw += other.sumw;
        self.sumw2 += other.sumw2;
        self.sumwx += other.sumwx;
        self.sumwx2 += other.sumwx2;
        self.num_entries += other.num_entries;
    }
}

/// A single bin of a 1D histogram
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoBin1D {
    pub xlow: f64,
    pub xhigh: f64,
    pub dbn: Dbn1D,
}

impl HistoBin1D {
    #[must_use]
    pub fn new(xlow: f64, xhigh: f64, dbn: Dbn1D) -> Self {
        Self { xlow, xhigh, dbn }
    }

    #[must_use]
    pub fn x_mid(&self) -> f64 {
        (self.xlow + self.xhigh) / 2.0
    }

    #[must_use]
    pub fn x_width(&self) -> f64 {
        self.xhigh - self.xlow
    }

    /// Bin height, the sum of weights divided by the bin width
    #[must_use]
    pub fn height(&self) -> f64 {
        let width = self.x_width();
        if width == 0.0 {
            return 0.0;
        }
        self.dbn.sumw / width
    }

    #[must_use]
    pub fn height_err(&self) -> f64 {
        let width = self.x_width();
        if width == 0.0 {
            return 0.0;
        }
        self.dbn.sumw2.sqrt() / width
    }
}

/// A one-dimensional binned histogram
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Histo1D {
    pub path: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    pub bins: Vec<HistoBin1D>,

    pub underflow: Dbn1D,

    pub overflow: Dbn1D,

    /// Total distribution as stored in the file; summed from the bins when absent
    total: Option<Dbn1D>,
}

impl Histo1D {
    pub fn new(path: impl Into<String>, bins: Vec<HistoBin1D>) -> Self {
        Self {
            path: path.into(),
            title: None,
            bins,
            underflow: Dbn1D::default(),
            overflow: Dbn1D::default(),
            total: None,
        }
    }

    #[must_use]
    pub fn with_flows(mut self, underflow: Dbn1D, overflow: Dbn1D) -> Self {
        self.underflow = underflow;
        self.overflow = overflow;
        self
    }

    #[must_use]
    pub fn with_total(mut self, total: Dbn1D) -> Self {
        self.total = Some(total);
        self
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn num_bins(&self) -> usize {
        self.bins.len()
    }

    /// Distribution over all bins including under- and overflow
    #[must_use]
    pub fn total_dbn(&self) -> Dbn1D {
        if let Some(total) = self.total {
            return total;
        }
        let mut total = self.underflow;
        total += self.overflow;
        for bin in &self.bins {
            total += bin.dbn;
        }
        total
    }

    #[must_use]
    pub fn eff_num_entries(&self) -> f64 {
        self.total_dbn().eff_num_entries()
    }

    #[must_use]
    pub fn x_mids(&self) -> Vec<f64> {
        self.bins.iter().map(HistoBin1D::x_mid).collect()
    }

    #[must_use]
    pub fn x_widths(&self) -> Vec<f64> {
        self.bins.iter().map(HistoBin1D::x_width).collect()
    }

    #[must_use]
    pub fn y_vals(&self) -> Vec<f64> {
        self.bins.iter().map(HistoBin1D::height).collect()
    }

    #[must_use]
    pub fn y_errs(&self) -> Vec<f64> {
        self.bins.iter().map(HistoBin1D::height_err).collect()
    }
}
