//! Event selection and its counter histogram.

use strareco_core::ReconstructedCollision;
use strareco_hist::{HistError, HistogramSink};

use crate::config::EventSelectionConfig;
use crate::layout::EVENT_SELECTION;

/// Running tallies of the event-selection chain.
///
/// Always `all >= passed_sel8 >= passed_vertex_z`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EventSelectionCounters {
    /// Collisions seen.
    pub all: u64,
    /// Collisions that passed the sel8 gate.
    pub passed_sel8: u64,
    /// Collisions that also passed the vertex-z gate.
    pub passed_vertex_z: u64,
}

impl EventSelectionCounters {
    /// Add another set of counters.
    pub fn absorb(&mut self, other: &EventSelectionCounters) {
        self.all += other.all;
        self.passed_sel8 += other.passed_sel8;
        self.passed_vertex_z += other.passed_vertex_z;
    }
}

/// Gates reconstructed collisions and counts how far each one got.
#[derive(Clone, Debug, Default)]
pub struct EventSelector {
    config: EventSelectionConfig,
    counters: EventSelectionCounters,
}

impl EventSelector {
    /// Create a selector with zeroed counters.
    pub fn new(config: EventSelectionConfig) -> Self {
        Self {
            config,
            counters: EventSelectionCounters::default(),
        }
    }

    /// Decide whether `collision` enters candidate evaluation.
    pub fn select(&mut self, collision: &ReconstructedCollision) -> bool {
        self.counters.all += 1;
        if self.config.require_sel8 && !collision.sel8 {
            return false;
        }
        self.counters.passed_sel8 += 1;
        if self.config.require_vertex_z
            && f64::from(collision.position.z).abs() > self.config.max_vertex_z
        {
            return false;
        }
        self.counters.passed_vertex_z += 1;
        true
    }

    /// Counters accumulated since the last [`emit`](Self::emit).
    pub fn counters(&self) -> EventSelectionCounters {
        self.counters
    }

    /// Write the counters into the event-selection histogram and reset them.
    ///
    /// Bins 0, 1 and 2 receive `all`, `passed_sel8` and `passed_vertex_z`
    /// as weights. Returns the emitted counters. On a sink error the
    /// counters are left untouched.
    pub fn emit<S: HistogramSink>(
        &mut self,
        sink: &mut S,
    ) -> Result<EventSelectionCounters, HistError> {
        let c = self.counters;
        sink.fill_weighted(EVENT_SELECTION, &[0.0], c.all as f64)?;
        sink.fill_weighted(EVENT_SELECTION, &[1.0], c.passed_sel8 as f64)?;
        sink.fill_weighted(EVENT_SELECTION, &[2.0], c.passed_vertex_z as f64)?;
        self.counters = EventSelectionCounters::default();
        Ok(c)
    }
}
