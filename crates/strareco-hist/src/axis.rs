//! Fixed-width binning along one dimension.

use crate::error::HistError;

/// A uniformly binned axis on `[min, max)`.
///
/// Bin indices follow the usual convention: `0` is the underflow bin,
/// `1..=bins` are the regular bins and `bins + 1` is the overflow bin.
#[derive(Clone, Debug, PartialEq)]
pub struct Axis {
    bins: usize,
    min: f64,
    max: f64,
    title: Option<String>,
    labels: Vec<String>,
}

impl Axis {
    /// Create an axis with `bins` equal-width bins on `[min, max)`.
    ///
    /// Fails if `bins` is zero, either edge is non-finite, or
    /// `min >= max`.
    pub fn new(bins: usize, min: f64, max: f64) -> Result<Self, HistError> {
        if bins == 0 {
            return Err(HistError::InvalidAxis {
                reason: "axis must have at least one bin".to_string(),
            });
        }
        if !min.is_finite() || !max.is_finite() || min >= max {
            return Err(HistError::InvalidAxis {
                reason: format!("axis range [{min}, {max}) is empty or non-finite"),
            });
        }
        Ok(Self {
            bins,
            min,
            max,
            title: None,
            labels: Vec::new(),
        })
    }

    /// Attach a display title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Attach one label per regular bin.
    pub fn with_labels<I, S>(mut self, labels: I) -> Result<Self, HistError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let labels: Vec<String> = labels.into_iter().map(Into::into).collect();
        if labels.len() != self.bins {
            return Err(HistError::InvalidAxis {
                reason: format!("{} labels for {} bins", labels.len(), self.bins),
            });
        }
        self.labels = labels;
        Ok(self)
    }

    /// Number of regular bins.
    pub fn bins(&self) -> usize {
        self.bins
    }

    /// Lower edge of the axis range.
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Upper edge of the axis range.
    pub fn max(&self) -> f64 {
        self.max
    }

    /// Display title, if any.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Label of regular bin `bin` (1-based), if labels were attached.
    pub fn label(&self, bin: usize) -> Option<&str> {
        bin.checked_sub(1)
            .and_then(|i| self.labels.get(i))
            .map(String::as_str)
    }

    /// Number of storage slots including underflow and overflow.
    pub(crate) fn slots(&self) -> usize {
        self.bins + 2
    }

    /// Width of one regular bin.
    pub fn bin_width(&self) -> f64 {
        (self.max - self.min) / self.bins as f64
    }

    /// Bin index for `value`.
    ///
    /// NaN is counted as underflow.
    pub fn find_bin(&self, value: f64) -> usize {
        if value.is_nan() || value < self.min {
            return 0;
        }
        if value >= self.max {
            return self.bins + 1;
        }
        let bin = ((value - self.min) / self.bin_width()) as usize;
        // Rounding at the upper edge can land one past the last bin.
        bin.min(self.bins - 1) + 1
    }

    /// Centre of regular bin `bin` (1-based).
    pub fn bin_center(&self, bin: usize) -> f64 {
        self.min + (bin as f64 - 0.5) * self.bin_width()
    }

    /// Whether two axes bin identically (titles and labels are ignored).
    pub fn same_binning(&self, other: &Axis) -> bool {
        self.bins == other.bins
            && self.min.to_bits() == other.min.to_bits()
            && self.max.to_bits() == other.max.to_bits()
    }
}
