//! Cascade candidate evaluation.
//!
//! A cascade is a V0 plus a charged bachelor. The daughters of the V0
//! are reached through the V0 link table: a cascade whose link row holds
//! no V0 candidate cannot have its daughters checked and is skipped.

use strareco_core::{CascadeCandidate, Species, Vec3};
use strareco_hist::HistogramSink;
use tracing::trace;

use crate::config::{CascadeCuts, MissingTruthPolicy, QaConfig, V0Cuts};
use crate::error::QaError;
use crate::index::BatchIndex;
use crate::layout::{cascade_qa_histograms, mass_histogram};
use crate::outcome::{CandidateOutcome, CandidateTally};
use crate::prefilter::Prefilter;
use crate::track::TrackQualityFilter;

/// Evaluates the cascade candidates of accepted events.
#[derive(Clone, Debug)]
pub struct CascadeCandidateEvaluator {
    v0_cuts: V0Cuts,
    cuts: CascadeCuts,
    tracks: TrackQualityFilter,
    max_rapidity: f64,
    missing_truth: MissingTruthPolicy,
    prefilter: Option<Prefilter>,
}

impl CascadeCandidateEvaluator {
    /// Build from the cascade-related settings of `config`.
    pub fn new(config: &QaConfig) -> Self {
        Self {
            v0_cuts: config.v0,
            cuts: config.cascade,
            tracks: TrackQualityFilter::new(config.tracks),
            max_rapidity: config.max_rapidity,
            missing_truth: config.missing_cascade_truth,
            prefilter: config.apply_prefilter.then(|| Prefilter::new(config)),
        }
    }

    /// Whether `casc` passes the topological signal-region cuts, with all
    /// positions taken relative to `primary_vertex`.
    pub fn in_signal_region(&self, casc: &CascadeCandidate, primary_vertex: Vec3) -> bool {
        casc.v0_radius() > self.v0_cuts.radius
            && casc.radius() > self.cuts.radius
            && casc.v0_cos_pa(primary_vertex) > self.v0_cuts.cospa
            && casc.cos_pa(primary_vertex) > self.cuts.cospa
            && f64::from(casc.dca_v0_daughters) < self.v0_cuts.dca_v0_daughters
    }

    /// Evaluate one cascade of an accepted event whose primary vertex is
    /// `primary_vertex`.
    pub fn evaluate<S: HistogramSink>(
        &self,
        casc: &CascadeCandidate,
        primary_vertex: Vec3,
        index: &BatchIndex<'_>,
        sink: &mut S,
    ) -> Result<CandidateOutcome, QaError> {
        if let Some(prefilter) = &self.prefilter {
            if !prefilter.accepts_cascade(casc) {
                return Ok(CandidateOutcome::Prefiltered);
            }
        }

        let Some(label) = casc.mc_particle else {
            trace!("cascade {} skipped: missing truth", casc.id);
            return Ok(CandidateOutcome::MissingTruth);
        };
        let truth = index.require_mc_particle("cascades", casc.id.0, label)?;
        let rapidity = f64::from(truth.rapidity);
        if rapidity.is_nan() || rapidity.abs() > self.max_rapidity {
            return Ok(CandidateOutcome::OutsideRapidity);
        }

        let Some(v0) = index.resolve_v0_link(casc.v0_link) else {
            trace!(
                "cascade {} skipped: link {} has no V0",
                casc.id,
                casc.v0_link
            );
            return Ok(CandidateOutcome::UnresolvedV0Link);
        };

        let pos = index.require_track("v0s", v0.id.0, v0.pos_track)?;
        let neg = index.require_track("v0s", v0.id.0, v0.neg_track)?;
        let bachelor = index.require_track("cascades", casc.id.0, casc.bachelor)?;
        if !self.tracks.accept_all([pos, neg, bachelor]) {
            trace!("cascade {} skipped: daughter track quality", casc.id);
            return Ok(CandidateOutcome::FailedTrackQuality);
        }

        let species = Species::from_pdg(truth.pdg_code);
        let pt = casc.pt();

        let qa = species.and_then(cascade_qa_histograms);
        if let Some(qa) = qa {
            sink.fill(qa.v0_radius, &[pt, casc.v0_radius()])?;
            sink.fill(qa.cascade_radius, &[pt, casc.radius()])?;
            sink.fill(qa.dca_v0_daughters, &[pt, f64::from(casc.dca_v0_daughters)])?;
            sink.fill(qa.dca_casc_daughters, &[pt, f64::from(casc.dca_casc_daughters)])?;
            sink.fill(qa.dca_pos_to_pv, &[pt, f64::from(casc.dca_pos_to_pv)])?;
            sink.fill(qa.dca_neg_to_pv, &[pt, f64::from(casc.dca_neg_to_pv)])?;
            sink.fill(qa.dca_bach_to_pv, &[pt, f64::from(casc.dca_bach_to_pv)])?;
            sink.fill(qa.dca_casc_to_pv, &[pt, f64::from(casc.dca_casc_to_pv)])?;
            sink.fill(qa.pointing_angle, &[pt, casc.pointing_angle(primary_vertex)])?;
        }

        let in_signal_region = self.in_signal_region(casc, primary_vertex);
        let mass = match species {
            Some(Species::XiMinus | Species::XiPlus) => Some(casc.m_xi),
            Some(Species::OmegaMinus | Species::OmegaPlus) => Some(casc.m_omega),
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

    /// Evaluate every cascade of the accepted collision at row
    /// `collision_pos`, honouring the missing-truth policy.
    pub fn evaluate_event<S: HistogramSink>(
        &self,
        collision_pos: usize,
        primary_vertex: Vec3,
        index: &BatchIndex<'_>,
        sink: &mut S,
        tally: &mut CandidateTally,
    ) -> Result<(), QaError> {
        let mut cascades = index.cascades_of(collision_pos);
        while let Some(casc) = cascades.next() {
            let outcome = self.evaluate(casc, primary_vertex, index, sink)?;
            tally.record(outcome);
            if outcome == CandidateOutcome::MissingTruth
                && self.missing_truth == MissingTruthPolicy::AbortEvent
            {
                let rest = cascades.by_ref().count() as u64;
                trace!("cascade {} aborted the event, {} left", casc.id, rest);
                tally.aborted += rest;
                break;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strareco_core::{
        CascadeId, CollisionId, McParticle, McParticleId, ReconstructedCollision, SimCollisionId,
        SimulatedCollision, StrangenessTables, Track, TrackId, V0Candidate, V0Id, V0Link,
        V0LinkId,
    };
    use strareco_hist::HistError;

    #[derive(Default)]
    struct Recorder(Vec<String>);

    impl HistogramSink for Recorder {
        fn fill_weighted(&mut self, name: &str, _: &[f64], _: f64) -> Result<(), HistError> {
            self.0.push(name.to_string());
            Ok(())
        }
    }

    fn track(id: u32) -> Track {
        Track {
            id: TrackId(id),
            collision: CollisionId(0),
            its_clusters: 6,
            tpc_crossed_rows: 100,
            dca_xy: 0.2,
            dca_z: 0.0,
            mc_particle: None,
        }
    }

    fn cascade(id: u32, link: u32, truth: Option<u32>) -> CascadeCandidate {
        CascadeCandidate {
            id: CascadeId(id),
            collision: CollisionId(0),
            decay_vertex: Vec3::new(2.0, 0.0, 0.0),
            momentum: Vec3::new(1.5, 0.0, 0.0),
            v0_decay_vertex: Vec3::new(5.0, 0.1, 0.0),
            v0_momentum: Vec3::new(1.0, 0.0, 0.0),
            dca_v0_daughters: 0.3,
            dca_casc_daughters: 0.4,
            dca_pos_to_pv: 0.5,
            dca_neg_to_pv: -0.6,
            dca_bach_to_pv: 0.3,
            dca_casc_to_pv: 0.02,
            dca_v0_to_pv: 0.1,
            m_lambda: 1.1157,
            m_xi: 1.3217,
            m_omega: 1.6725,
            bachelor: TrackId(2),
            v0_link: V0LinkId(link),
            mc_particle: truth.map(McParticleId),
        }
    }

    fn tables(pdg: i32) -> StrangenessTables {
        StrangenessTables {
            sim_collisions: vec![SimulatedCollision {
                id: SimCollisionId(0),
                position: Vec3::default(),
            }],
            collisions: vec![ReconstructedCollision {
                id: CollisionId(0),
                position: Vec3::default(),
                sel8: true,
                sim_collision: Some(SimCollisionId(0)),
            }],
            tracks: vec![track(0), track(1), track(2)],
            v0s: vec![V0Candidate {
                id: V0Id(0),
                collision: CollisionId(0),
                decay_vertex: Vec3::new(5.0, 0.1, 0.0),
                momentum: Vec3::new(1.0, 0.0, 0.0),
                dca_v0_daughters: 0.3,
                dca_pos_to_pv: 0.5,
                dca_neg_to_pv: -0.6,
                m_k0short: 0.45,
                m_lambda: 1.1157,
                m_antilambda: 1.13,
                pos_track: TrackId(0),
                neg_track: TrackId(1),
                mc_particle: None,
            }],
            v0_links: vec![
                V0Link {
                    id: V0LinkId(0),
                    v0: Some(V0Id(0)),
                },
                V0Link {
                    id: V0LinkId(1),
                    v0: None,
                },
            ],
            cascades: vec![cascade(0, 0, Some(0))],
            mc_particles: vec![McParticle {
                id: McParticleId(0),
                pdg_code: pdg,
                rapidity: 0.1,
                pt: 1.5,
                sim_collision: SimCollisionId(0),
            }],
        }
    }

    fn evaluate(tables: &StrangenessTables, config: &QaConfig) -> (CandidateTally, Recorder) {
        let index = BatchIndex::build(tables).unwrap();
        let mut rec = Recorder::default();
        let mut tally = CandidateTally::default();
        CascadeCandidateEvaluator::new(config)
            .evaluate_event(0, Vec3::default(), &index, &mut rec, &mut tally)
            .unwrap();
        (tally, rec)
    }

    #[test]
    fn xi_minus_fills_nine_qa_histograms_and_mass() {
        let (tally, rec) = evaluate(&tables(3312), &QaConfig::default());
        assert_eq!(tally.selected, 1);
        assert_eq!(tally.mass_filled, 1);
        assert_eq!(rec.0.len(), 10);
        assert_eq!(rec.0[1], "h2dXiMinusQACascadeRadius");
        assert_eq!(rec.0[9], "h2dMassXiMinus");
    }

    #[test]
    fn omega_plus_fills_only_its_mass() {
        let (tally, rec) = evaluate(&tables(-3334), &QaConfig::default());
        assert_eq!(tally.qa_filled, 0);
        assert_eq!(rec.0, vec!["h2dMassOmegaPlus".to_string()]);
    }

    #[test]
    fn unresolved_link_skips_only_that_cascade() {
        let mut t = tables(3312);
        t.cascades = vec![cascade(0, 1, Some(0)), cascade(1, 0, Some(0))];
        let (tally, rec) = evaluate(&t, &QaConfig::default());
        assert_eq!(tally.unresolved_v0_link, 1);
        assert_eq!(tally.selected, 1);
        assert_eq!(rec.0.len(), 10);
    }

    #[test]
    fn nan_rapidity_is_outside_the_window() {
        let mut t = tables(3312);
        t.mc_particles[0].rapidity = f32::NAN;
        let (tally, rec) = evaluate(&t, &QaConfig::default());
        assert_eq!(tally.outside_rapidity, 1);
        assert!(rec.0.is_empty());
    }

    #[test]
    fn bachelor_must_pass_crossed_rows() {
        let mut t = tables(3312);
        t.tracks[2].tpc_crossed_rows = 50;
        let (tally, rec) = evaluate(&t, &QaConfig::default());
        assert_eq!(tally.failed_track_quality, 1);
        assert!(rec.0.is_empty());
    }

    #[test]
    fn v0_daughter_quality_comes_from_linked_v0() {
        let mut t = tables(3312);
        t.tracks[1].its_clusters = 1;
        let (tally, _) = evaluate(&t, &QaConfig::default());
        assert_eq!(tally.failed_track_quality, 1);
    }

    #[test]
    fn missing_truth_skip_continues() {
        let mut t = tables(3312);
        t.cascades = vec![cascade(0, 0, None), cascade(1, 0, Some(0))];
        let (tally, _) = evaluate(&t, &QaConfig::default());
        assert_eq!(tally.missing_truth, 1);
        assert_eq!(tally.selected, 1);
        assert_eq!(tally.aborted, 0);
    }

    #[test]
    fn missing_truth_abort_stops_the_event() {
        let mut t = tables(3312);
        t.cascades = vec![
            cascade(0, 0, Some(0)),
            cascade(1, 0, None),
            cascade(2, 0, Some(0)),
            cascade(3, 0, Some(0)),
        ];
        let config = QaConfig {
            missing_cascade_truth: MissingTruthPolicy::AbortEvent,
            ..QaConfig::default()
        };
        let (tally, rec) = evaluate(&t, &config);
        assert_eq!(tally.selected, 1);
        assert_eq!(tally.missing_truth, 1);
        assert_eq!(tally.aborted, 2);
        assert_eq!(rec.0.len(), 10);
    }

    #[test]
    fn signal_region_needs_cascade_radius() {
        let mut config = QaConfig::default();
        config.cascade.radius = 3.0;
        let (tally, rec) = evaluate(&tables(3312), &config);
        assert_eq!(tally.selected, 1);
        assert_eq!(tally.in_signal_region, 0);
        assert_eq!(rec.0.len(), 9);
    }
}
