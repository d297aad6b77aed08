//! The write-only aggregation interface used by the QA components.

use crate::error::HistError;

/// A destination for named, binned counts.
///
/// Repeated fills with the same name always add to the same logical
/// histogram. Components that fill a sink never read back from it, so a
/// sink may equally be an in-memory registry, a recorder used in tests,
/// or an adapter to an external histogram backend.
pub trait HistogramSink {
    /// Add `weight` at the bin containing `values` (one value per axis).
    fn fill_weighted(&mut self, name: &str, values: &[f64], weight: f64)
        -> Result<(), HistError>;

    /// Add one count at the bin containing `values`.
    fn fill(&mut self, name: &str, values: &[f64]) -> Result<(), HistError> {
        self.fill_weighted(name, values, 1.0)
    }
}

impl<S: HistogramSink + ?Sized> HistogramSink for &mut S {
    fn fill_weighted(
        &mut self,
        name: &str,
        values: &[f64],
        weight: f64,
    ) -> Result<(), HistError> {
        (**self).fill_weighted(name, values, weight)
    }
}
