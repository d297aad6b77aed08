//! Insertion-ordered collection of named histograms.

use indexmap::IndexMap;

use crate::axis::Axis;
use crate::error::HistError;
use crate::histogram::Histogram;
use crate::sink::HistogramSink;

/// A named set of histograms, the in-memory [`HistogramSink`].
///
/// Histograms must be declared before they are filled; filling an
/// undeclared name is an error rather than an implicit creation so that
/// typos in histogram names surface immediately. Declaration order is
/// preserved for iteration and output.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HistogramRegistry {
    name: String,
    histograms: IndexMap<String, Histogram>,
}

impl HistogramRegistry {
    /// Create an empty registry.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            histograms: IndexMap::new(),
        }
    }

    /// Registry name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declare a histogram. Fails if the name is already taken.
    pub fn add(&mut self, name: impl Into<String>, histogram: Histogram) -> Result<(), HistError> {
        let name = name.into();
        if self.histograms.contains_key(&name) {
            return Err(HistError::DuplicateHistogram { name });
        }
        self.histograms.insert(name, histogram);
        Ok(())
    }

    /// Declare a 1-D histogram whose title is its name.
    pub fn add_1d(&mut self, name: &str, x: Axis) -> Result<(), HistError> {
        self.add(name, Histogram::new_1d(name, x))
    }

    /// Declare a 2-D histogram whose title is its name.
    pub fn add_2d(&mut self, name: &str, x: Axis, y: Axis) -> Result<(), HistError> {
        self.add(name, Histogram::new_2d(name, x, y))
    }

    /// Look up a histogram by name.
    pub fn get(&self, name: &str) -> Option<&Histogram> {
        self.histograms.get(name)
    }

    /// Whether a histogram with this name is declared.
    pub fn contains(&self, name: &str) -> bool {
        self.histograms.contains_key(name)
    }

    /// Number of declared histograms.
    pub fn len(&self) -> usize {
        self.histograms.len()
    }

    /// Whether no histogram is declared.
    pub fn is_empty(&self) -> bool {
        self.histograms.is_empty()
    }

    /// Iterate `(name, histogram)` in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Histogram)> {
        self.histograms.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Sum of entry counts over every histogram.
    pub fn total_entries(&self) -> u64 {
        self.histograms.values().map(Histogram::entries).sum()
    }

    /// Add every histogram of `other` into this registry, bin by bin.
    ///
    /// Histograms present only in `other` are copied in. A histogram
    /// present in both with different binning is an error; in that case
    /// this registry may be partially merged.
    pub fn merge(&mut self, other: &HistogramRegistry) -> Result<(), HistError> {
        for (name, theirs) in &other.histograms {
            match self.histograms.get_mut(name) {
                Some(mine) => mine.merge(name, theirs)?,
                None => {
                    self.histograms.insert(name.clone(), theirs.clone());
                }
            }
        }
        Ok(())
    }

    /// Zero every histogram, keeping the declarations.
    pub fn reset(&mut self) {
        for h in self.histograms.values_mut() {
            h.reset();
        }
    }
}

impl HistogramSink for HistogramRegistry {
    fn fill_weighted(
        &mut self,
        name: &str,
        values: &[f64],
        weight: f64,
    ) -> Result<(), HistError> {
        let histogram =
            self.histograms
                .get_mut(name)
                .ok_or_else(|| HistError::UnknownHistogram {
                    name: name.to_string(),
                })?;
        histogram.fill_weighted(name, values, weight)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> HistogramRegistry {
        let mut r = HistogramRegistry::new("test");
        r.add_1d("hPt", Axis::new(100, 0.0, 10.0).unwrap()).unwrap();
        r.add_2d(
            "hMass",
            Axis::new(100, 0.0, 10.0).unwrap(),
            Axis::new(400, 0.4, 0.6).unwrap(),
        )
        .unwrap();
        r
    }

    #[test]
    fn fill_unknown_name_is_an_error() {
        let mut r = registry();
        assert_eq!(
            r.fill("hNope", &[1.0]),
            Err(HistError::UnknownHistogram {
                name: "hNope".into()
            })
        );
    }

    #[test]
    fn duplicate_declaration_is_rejected() {
        let mut r = registry();
        let err = r.add_1d("hPt", Axis::new(1, 0.0, 1.0).unwrap()).unwrap_err();
        assert_eq!(err, HistError::DuplicateHistogram { name: "hPt".into() });
        assert_eq!(r.len(), 2);
    }

    #[test]
    fn repeated_fills_accumulate() {
        let mut r = registry();
        r.fill("hPt", &[1.05]).unwrap();
        r.fill("hPt", &[1.05]).unwrap();
        r.fill("hMass", &[1.05, 0.497]).unwrap();
        assert_eq!(r.get("hPt").unwrap().content_at(&[1.05]), Some(2.0));
        assert_eq!(r.get("hMass").unwrap().integral(), 1.0);
        assert_eq!(r.total_entries(), 3);
    }

    #[test]
    fn iteration_follows_declaration_order() {
        let r = registry();
        let names: Vec<&str> = r.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["hPt", "hMass"]);
    }

    #[test]
    fn merge_sums_and_copies_missing() {
        let mut a = registry();
        let mut b = registry();
        b.add_1d("hExtra", Axis::new(2, 0.0, 2.0).unwrap()).unwrap();
        a.fill("hPt", &[3.3]).unwrap();
        b.fill("hPt", &[3.3]).unwrap();
        b.fill("hExtra", &[0.5]).unwrap();
        a.merge(&b).unwrap();
        assert_eq!(a.get("hPt").unwrap().content_at(&[3.3]), Some(2.0));
        assert_eq!(a.get("hExtra").unwrap().entries(), 1);
    }

    #[test]
    fn reset_keeps_declarations() {
        let mut r = registry();
        r.fill("hPt", &[3.3]).unwrap();
        r.reset();
        assert_eq!(r.len(), 2);
        assert_eq!(r.total_entries(), 0);
    }

    #[test]
    fn fill_through_mutable_reference() {
        fn fill_twice(mut sink: impl HistogramSink) {
            sink.fill("hPt", &[0.5]).unwrap();
            sink.fill_weighted("hPt", &[0.5], 2.0).unwrap();
        }
        let mut r = registry();
        fill_twice(&mut r);
        assert_eq!(r.get("hPt").unwrap().content_at(&[0.5]), Some(3.0));
    }
}
