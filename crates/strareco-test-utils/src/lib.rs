//! Test utilities for strareco development.
//!
//! Provides a [`TablesBuilder`] for hand-built batches, a seeded
//! [`SyntheticBatchGenerator`] for volume tests and benchmarks, and a
//! [`RecordingSink`] that captures every fill in order.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;
pub mod synthetic;

pub use fixtures::TablesBuilder;
pub use synthetic::{SyntheticBatchGenerator, SyntheticProfile};

use strareco_hist::{HistError, HistogramSink};

/// One captured fill.
#[derive(Clone, Debug, PartialEq)]
pub struct Fill {
    pub name: String,
    pub values: Vec<f64>,
    pub weight: f64,
}

/// A [`HistogramSink`] that accepts every name and records each fill.
///
/// Useful for asserting exactly which histograms a component touches,
/// without declaring a registry layout first.
#[derive(Clone, Debug, Default)]
pub struct RecordingSink {
    fills: Vec<Fill>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every fill, in call order.
    pub fn fills(&self) -> &[Fill] {
        &self.fills
    }

    /// Names of every fill, in call order.
    pub fn names(&self) -> Vec<&str> {
        self.fills.iter().map(|f| f.name.as_str()).collect()
    }

    /// Number of fills of `name`.
    pub fn count(&self, name: &str) -> usize {
        self.fills.iter().filter(|f| f.name == name).count()
    }

    /// Number of fills whose name starts with `prefix`.
    pub fn count_prefixed(&self, prefix: &str) -> usize {
        self.fills
            .iter()
            .filter(|f| f.name.starts_with(prefix))
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.fills.is_empty()
    }

    pub fn clear(&mut self) {
        self.fills.clear();
    }
}

impl HistogramSink for RecordingSink {
    fn fill_weighted(&mut self, name: &str, values: &[f64], weight: f64) -> Result<(), HistError> {
        self.fills.push(Fill {
            name: name.to_string(),
            values: values.to_vec(),
            weight,
        });
        Ok(())
    }
}
