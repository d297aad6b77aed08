//! Named, binned count histograms for the strareco QA pipeline.
//!
//! The QA components never read back what they accumulate: they only call
//! [`HistogramSink::fill`] / [`HistogramSink::fill_weighted`] with a
//! histogram name and one value per dimension. [`HistogramRegistry`] is
//! the in-memory sink: an insertion-ordered set of [`Histogram`]s with
//! fixed [`Axis`] binning, underflow/overflow bins, and bin-wise
//! [`merge`](HistogramRegistry::merge) so that per-worker registries can be
//! reduced into one.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod axis;
pub mod error;
pub mod histogram;
pub mod registry;
pub mod sink;

pub use axis::Axis;
pub use error::HistError;
pub use histogram::Histogram;
pub use registry::HistogramRegistry;
pub use sink::HistogramSink;
