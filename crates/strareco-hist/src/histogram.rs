//! A dense N-dimensional count histogram.

use smallvec::SmallVec;

use crate::axis::Axis;
use crate::error::HistError;

/// Per-axis bin indices of one fill.
type BinIndex = SmallVec<[usize; 3]>;

/// A dense histogram over one or more [`Axis`] definitions.
///
/// Storage includes underflow and overflow slots on every axis, so a
/// fill never fails because a value is out of range. Contents are `f64`
/// so that weighted fills (event-selection counters) add exactly.
#[derive(Clone, Debug, PartialEq)]
pub struct Histogram {
    title: String,
    axes: SmallVec<[Axis; 2]>,
    counts: Vec<f64>,
    entries: u64,
}

impl Histogram {
    /// Create an empty histogram.
    pub fn new(title: impl Into<String>, axes: Vec<Axis>) -> Result<Self, HistError> {
        if axes.is_empty() {
            return Err(HistError::InvalidAxis {
                reason: "histogram needs at least one axis".to_string(),
            });
        }
        let len = axes.iter().map(Axis::slots).product();
        Ok(Self {
            title: title.into(),
            axes: axes.into_iter().collect(),
            counts: vec![0.0; len],
            entries: 0,
        })
    }

    /// One-dimensional convenience constructor.
    pub fn new_1d(title: impl Into<String>, x: Axis) -> Self {
        Self {
            title: title.into(),
            counts: vec![0.0; x.slots()],
            axes: SmallVec::from_iter([x]),
            entries: 0,
        }
    }

    /// Two-dimensional convenience constructor.
    pub fn new_2d(title: impl Into<String>, x: Axis, y: Axis) -> Self {
        Self {
            title: title.into(),
            counts: vec![0.0; x.slots() * y.slots()],
            axes: SmallVec::from_iter([x, y]),
            entries: 0,
        }
    }

    /// Display title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Number of dimensions.
    pub fn ndim(&self) -> usize {
        self.axes.len()
    }

    /// The axis definitions, x first.
    pub fn axes(&self) -> &[Axis] {
        &self.axes
    }

    /// Number of fill calls, weighted or not.
    pub fn entries(&self) -> u64 {
        self.entries
    }

    /// Add `weight` at the bin containing `values`.
    ///
    /// `name` is only used for the error message.
    pub(crate) fn fill_weighted(
        &mut self,
        name: &str,
        values: &[f64],
        weight: f64,
    ) -> Result<(), HistError> {
        if values.len() != self.axes.len() {
            return Err(HistError::DimensionMismatch {
                name: name.to_string(),
                expected: self.axes.len(),
                got: values.len(),
            });
        }
        let index: BinIndex = self
            .axes
            .iter()
            .zip(values)
            .map(|(axis, &v)| axis.find_bin(v))
            .collect();
        let slot = self.slot(&index);
        self.counts[slot] += weight;
        self.entries += 1;
        Ok(())
    }

    /// Content of the bin with per-axis indices `bins` (0 = underflow).
    ///
    /// Returns `None` if the index has the wrong length or is out of range.
    pub fn bin_content(&self, bins: &[usize]) -> Option<f64> {
        if bins.len() != self.axes.len() {
            return None;
        }
        if bins.iter().zip(&self.axes).any(|(&b, a)| b >= a.slots()) {
            return None;
        }
        Some(self.counts[self.slot(bins)])
    }

    /// Content of the bin that a fill at `values` would land in.
    pub fn content_at(&self, values: &[f64]) -> Option<f64> {
        if values.len() != self.axes.len() {
            return None;
        }
        let index: BinIndex = self
            .axes
            .iter()
            .zip(values)
            .map(|(axis, &v)| axis.find_bin(v))
            .collect();
        Some(self.counts[self.slot(&index)])
    }

    /// Sum of all regular (in-range) bins.
    pub fn integral(&self) -> f64 {
        self.counts
            .iter()
            .enumerate()
            .filter(|(slot, _)| self.is_regular(*slot))
            .map(|(_, &c)| c)
            .sum()
    }

    /// Sum of every bin, underflow and overflow included.
    pub fn total(&self) -> f64 {
        self.counts.iter().sum()
    }

    /// Whether two histograms can be merged.
    pub fn same_binning(&self, other: &Histogram) -> bool {
        self.axes.len() == other.axes.len()
            && self
                .axes
                .iter()
                .zip(&other.axes)
                .all(|(a, b)| a.same_binning(b))
    }

    /// Add `other` bin by bin.
    ///
    /// `name` is only used for the error message.
    pub(crate) fn merge(&mut self, name: &str, other: &Histogram) -> Result<(), HistError> {
        if !self.same_binning(other) {
            return Err(HistError::ShapeMismatch {
                name: name.to_string(),
            });
        }
        for (mine, theirs) in self.counts.iter_mut().zip(&other.counts) {
            *mine += theirs;
        }
        self.entries += other.entries;
        Ok(())
    }

    /// Zero every bin and the entry count.
    pub fn reset(&mut self) {
        self.counts.fill(0.0);
        self.entries = 0;
    }

    /// Flat storage offset of a per-axis index. The x axis varies fastest.
    fn slot(&self, bins: &[usize]) -> usize {
        let mut slot = 0;
        let mut stride = 1;
        for (axis, &b) in self.axes.iter().zip(bins) {
            slot += b * stride;
            stride *= axis.slots();
        }
        slot
    }

    fn is_regular(&self, mut slot: usize) -> bool {
        for axis in &self.axes {
            let b = slot % axis.slots();
            if b == 0 || b == axis.bins() + 1 {
                return false;
            }
            slot /= axis.slots();
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pt_axis() -> Axis {
        Axis::new(10, 0.0, 10.0).unwrap()
    }

    #[test]
    fn one_dimensional_fill() {
        let mut h = Histogram::new_1d("pt", pt_axis());
        h.fill_weighted("pt", &[2.5], 1.0).unwrap();
        h.fill_weighted("pt", &[2.7], 1.0).unwrap();
        h.fill_weighted("pt", &[12.0], 1.0).unwrap();
        assert_eq!(h.bin_content(&[3]), Some(2.0));
        assert_eq!(h.bin_content(&[11]), Some(1.0));
        assert_eq!(h.integral(), 2.0);
        assert_eq!(h.total(), 3.0);
        assert_eq!(h.entries(), 3);
    }

    #[test]
    fn two_dimensional_fill_lands_in_one_bin() {
        let mut h = Histogram::new_2d("mass", pt_axis(), Axis::new(400, 1.01, 1.21).unwrap());
        h.fill_weighted("mass", &[1.5, 1.115683], 1.0).unwrap();
        assert_eq!(h.content_at(&[1.5, 1.115683]), Some(1.0));
        assert_eq!(h.integral(), 1.0);
        assert_eq!(h.content_at(&[1.5, 1.2]), Some(0.0));
    }

    #[test]
    fn wrong_dimensionality_is_an_error() {
        let mut h = Histogram::new_1d("pt", pt_axis());
        let err = h.fill_weighted("pt", &[1.0, 2.0], 1.0).unwrap_err();
        assert_eq!(
            err,
            HistError::DimensionMismatch {
                name: "pt".into(),
                expected: 1,
                got: 2
            }
        );
        assert_eq!(h.entries(), 0);
    }

    #[test]
    fn weighted_fill_adds_weight() {
        let mut h = Histogram::new_1d("sel", Axis::new(3, -0.5, 2.5).unwrap());
        h.fill_weighted("sel", &[0.0], 7.0).unwrap();
        h.fill_weighted("sel", &[2.0], 3.0).unwrap();
        assert_eq!(h.bin_content(&[1]), Some(7.0));
        assert_eq!(h.bin_content(&[3]), Some(3.0));
        assert_eq!(h.entries(), 2);
    }

    #[test]
    fn merge_requires_same_binning() {
        let mut a = Histogram::new_1d("pt", pt_axis());
        let b = Histogram::new_1d("pt", Axis::new(20, 0.0, 10.0).unwrap());
        assert!(matches!(
            a.merge("pt", &b),
            Err(HistError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn merge_adds_bins_and_entries() {
        let mut a = Histogram::new_1d("pt", pt_axis());
        let mut b = Histogram::new_1d("pt", pt_axis());
        a.fill_weighted("pt", &[1.5], 1.0).unwrap();
        b.fill_weighted("pt", &[1.5], 1.0).unwrap();
        b.fill_weighted("pt", &[8.5], 1.0).unwrap();
        a.merge("pt", &b).unwrap();
        assert_eq!(a.bin_content(&[2]), Some(2.0));
        assert_eq!(a.bin_content(&[9]), Some(1.0));
        assert_eq!(a.entries(), 3);
    }

    #[test]
    fn reset_clears_everything() {
        let mut h = Histogram::new_1d("pt", pt_axis());
        h.fill_weighted("pt", &[1.0], 1.0).unwrap();
        h.reset();
        assert_eq!(h.total(), 0.0);
        assert_eq!(h.entries(), 0);
    }

    #[test]
    fn out_of_range_bin_index_is_none() {
        let h = Histogram::new_2d("m", pt_axis(), pt_axis());
        assert_eq!(h.bin_content(&[12, 0]), None);
        assert_eq!(h.bin_content(&[1]), None);
        assert_eq!(h.bin_content(&[11, 11]), Some(0.0));
    }
}
