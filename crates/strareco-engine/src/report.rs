//! Per-batch and per-run bookkeeping.
//!
//! [`BatchReport`] captures what one call to
//! [`process_batch`](crate::analysis::StrangenessQa::process_batch) did,
//! for logging and for checks that do not want to inspect histograms.
//! [`RunSummary`] sums reports over a run.

use crate::event::EventSelectionCounters;
use crate::outcome::CandidateTally;
use crate::status::RecoStatusTable;

/// What one batch contributed.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BatchReport {
    /// Event-selection counters emitted for this batch.
    pub events: EventSelectionCounters,
    /// V0 candidate outcomes.
    pub v0s: CandidateTally,
    /// Cascade candidate outcomes.
    pub cascades: CandidateTally,
    /// Fills of the pure generated spectra.
    pub generated_pure: u64,
    /// Fills of the reconstructible generated spectra.
    pub generated_reconstructible: u64,
    /// Reconstruction flag of every simulated collision of the batch.
    pub reco_status: RecoStatusTable,
}

/// Totals over a run of batches.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Batches processed.
    pub batches: u64,
    /// Summed event-selection counters.
    pub events: EventSelectionCounters,
    /// Summed V0 outcomes.
    pub v0s: CandidateTally,
    /// Summed cascade outcomes.
    pub cascades: CandidateTally,
    /// Summed pure generated fills.
    pub generated_pure: u64,
    /// Summed reconstructible generated fills.
    pub generated_reconstructible: u64,
    /// Simulated collisions seen.
    pub sim_collisions: u64,
    /// Simulated collisions flagged as reconstructed.
    pub reconstructed_sim_collisions: u64,
}

impl RunSummary {
    /// Add one batch report.
    pub fn absorb_report(&mut self, report: &BatchReport) {
        self.batches += 1;
        self.events.absorb(&report.events);
        self.v0s.absorb(&report.v0s);
        self.cascades.absorb(&report.cascades);
        self.generated_pure += report.generated_pure;
        self.generated_reconstructible += report.generated_reconstructible;
        self.sim_collisions += report.reco_status.len() as u64;
        self.reconstructed_sim_collisions += report.reco_status.reconstructed_count() as u64;
    }

    /// Add another summary.
    pub fn absorb(&mut self, other: &RunSummary) {
        self.batches += other.batches;
        self.events.absorb(&other.events);
        self.v0s.absorb(&other.v0s);
        self.cascades.absorb(&other.cascades);
        self.generated_pure += other.generated_pure;
        self.generated_reconstructible += other.generated_reconstructible;
        self.sim_collisions += other.sim_collisions;
        self.reconstructed_sim_collisions += other.reconstructed_sim_collisions;
    }
}
