//! V0 candidate evaluation: truth association, QA and mass histograms.

use strareco_core::{Species, V0Candidate, Vec3};
use strareco_hist::HistogramSink;
use tracing::trace;

use crate::config::{QaConfig, V0Cuts};
use crate::error::QaError;
use crate::index::BatchIndex;
use crate::layout::{mass_histogram, v0_qa_histograms};
use crate::outcome::{CandidateOutcome, CandidateTally};
use crate::prefilter::Prefilter;
use crate::track::TrackQualityFilter;

/// Evaluates the V0 candidates of accepted events.
#[derive(Clone, Debug)]
pub struct V0CandidateEvaluator {
    cuts: V0Cuts,
    tracks: TrackQualityFilter,
    max_rapidity: f64,
    prefilter: Option<Prefilter>,
}

impl V0CandidateEvaluator {
    /// Build from the V0, track and rapidity settings of `config`.
    pub fn new(config: &QaConfig) -> Self {
        Self {
            cuts: config.v0,
            tracks: TrackQualityFilter::new(config.tracks),
            max_rapidity: config.max_rapidity,
            prefilter: config.apply_prefilter.then(|| Prefilter::new(config)),
        }
    }

    /// Whether `v0` passes the topological signal-region cuts, with all
    /// positions taken relative to `primary_vertex`.
    pub fn in_signal_region(&self, v0: &V0Candidate, primary_vertex: Vec3) -> bool {
        v0.radius() > self.cuts.radius
            && v0.cos_pa(primary_vertex) > self.cuts.cospa
            && f64::from(v0.dca_v0_daughters) < self.cuts.dca_v0_daughters
    }

    /// Evaluate one V0 of an accepted event whose primary vertex is
    /// `primary_vertex`, filling `sink` on selection.
    ///
    /// Errors only on sink failures or rows that bypassed [`BatchIndex`]
    /// validation.
    pub fn evaluate<S: HistogramSink>(
        &self,
        v0: &V0Candidate,
        primary_vertex: Vec3,
        index: &BatchIndex<'_>,
        sink: &mut S,
    ) -> Result<CandidateOutcome, QaError> {
        if let Some(prefilter) = &self.prefilter {
            if !prefilter.accepts_v0(v0) {
                return Ok(CandidateOutcome::Prefiltered);
            }
        }

        let pos = index.require_track("v0s", v0.id.0, v0.pos_track)?;
        let neg = index.require_track("v0s", v0.id.0, v0.neg_track)?;

        // 1. Truth on the candidate and on both daughters.
        let label = match (v0.mc_particle, pos.mc_particle, neg.mc_particle) {
            (Some(label), Some(_), Some(_)) => label,
            _ => {
                trace!("V0 {} skipped: missing truth", v0.id);
                return Ok(CandidateOutcome::MissingTruth);
            }
        };
        let truth = index.require_mc_particle("v0s", v0.id.0, label)?;

        // 2. Rapidity window.
        let rapidity = f64::from(truth.rapidity);
        if rapidity.is_nan() || rapidity.abs() > self.max_rapidity {
            return Ok(CandidateOutcome::OutsideRapidity);
        }

        // 3. Daughter track quality.
        if !self.tracks.accept_all([pos, neg]) {
            trace!("V0 {} skipped: daughter track quality", v0.id);
            return Ok(CandidateOutcome::FailedTrackQuality);
        }

        let species = Species::from_pdg(truth.pdg_code);
        let pt = v0.pt();

        // 4. QA histograms.
        let qa = species.and_then(v0_qa_histograms);
        if let Some(qa) = qa {
            sink.fill(qa.radius, &[pt, v0.radius()])?;
            sink.fill(qa.dca_v0_daughters, &[pt, f64::from(v0.dca_v0_daughters)])?;
            sink.fill(qa.dca_pos_to_pv, &[pt, f64::from(pos.dca_xy)])?;
            sink.fill(qa.dca_neg_to_pv, &[pt, f64::from(neg.dca_xy)])?;
            sink.fill(qa.pointing_angle, &[pt, v0.pointing_angle(primary_vertex)])?;
        }

        // 5. Mass of the truth species in the signal region.
        let in_signal_region = self.in_signal_region(v0, primary_vertex);
        let mass = match species {
            Some(Species::KaonShort) => Some(v0.m_k0short),
            Some(Species::Lambda) => Some(v0.m_lambda),
            Some(Species::AntiLambda) => Some(v0.m_antilambda),
            _ => None,
        };
        let mut mass_filled = false;
        if let (true, Some(species), Some(mass)) = (in_signal_region, species, mass) {
            sink.fill(mass_histogram(species), &[pt, f64::from(mass)])?;
            mass_filled = true;
        }

        Ok(CandidateOutcome::Selected {
            qa_filled: qa.is_some(),
            in_signal_region,
            mass_filled,
        })
    }

    /// Evaluate every V0 of the accepted collision at row `collision_pos`.
    pub fn evaluate_event<S: HistogramSink>(
        &self,
        collision_pos: usize,
        primary_vertex: Vec3,
        index: &BatchIndex<'_>,
        sink: &mut S,
        tally: &mut CandidateTally,
    ) -> Result<(), QaError> {
        for v0 in index.v0s_of(collision_pos) {
            let outcome = self.evaluate(v0, primary_vertex, index, sink)?;
            tally.record(outcome);
        }
        Ok(())
    }
}
