//! Generated (truth-level) spectra.

use std::collections::HashSet;

use strareco_core::{McParticle, SimCollisionId, Species};
use strareco_hist::{HistError, HistogramSink};

use crate::layout::{generated_histogram, generated_with_pv_histogram};

/// Fills the truth pT spectra of the strange species inside the
/// rapidity window.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeneratedSpectrumAccumulator {
    max_rapidity: f64,
}

impl GeneratedSpectrumAccumulator {
    /// Accept particles with |y| strictly below `max_rapidity`.
    pub fn new(max_rapidity: f64) -> Self {
        Self { max_rapidity }
    }

    fn species_in_window(&self, particle: &McParticle) -> Option<Species> {
        if f64::from(particle.rapidity).abs() < self.max_rapidity {
            Species::from_pdg(particle.pdg_code)
        } else {
            None
        }
    }

    /// Fill `hGen<Species>` for every particle. Returns the number of fills.
    pub fn fill_pure<S: HistogramSink>(
        &self,
        particles: &[McParticle],
        sink: &mut S,
    ) -> Result<u64, HistError> {
        let mut filled = 0;
        for p in particles {
            if let Some(species) = self.species_in_window(p) {
                sink.fill(generated_histogram(species), &[f64::from(p.pt)])?;
                filled += 1;
            }
        }
        Ok(filled)
    }

    /// Fill `hGenWithPV<Species>` for particles whose simulated collision
    /// is in `reconstructed`. Returns the number of fills.
    pub fn fill_reconstructible<S: HistogramSink>(
        &self,
        particles: &[McParticle],
        reconstructed: &HashSet<SimCollisionId>,
        sink: &mut S,
    ) -> Result<u64, HistError> {
        let mut filled = 0;
        for p in particles {
            if !reconstructed.contains(&p.sim_collision) {
                continue;
            }
            if let Some(species) = self.species_in_window(p) {
                sink.fill(generated_with_pv_histogram(species), &[f64::from(p.pt)])?;
                filled += 1;
            }
        }
        Ok(filled)
    }
}
