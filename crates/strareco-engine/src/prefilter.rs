//! Source-side candidate pre-selection.
//!
//! Table sources usually push these predicates down so that loose
//! candidates never reach the pipeline. [`Prefilter`] exposes the same
//! predicates for sources that deliver unfiltered tables; the evaluators
//! apply it when [`QaConfig::apply_prefilter`] is set.

use strareco_core::{CascadeCandidate, V0Candidate};

use crate::config::{CascadeCuts, QaConfig, V0Cuts};

/// Loose topological pre-selection of V0 and cascade candidates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Prefilter {
    v0: V0Cuts,
    cascade: CascadeCuts,
}

impl Prefilter {
    /// Build from the V0 and cascade cuts of `config`.
    pub fn new(config: &QaConfig) -> Self {
        Self {
            v0: config.v0,
            cascade: config.cascade,
        }
    }

    /// Whether a V0 candidate survives the pre-selection.
    pub fn accepts_v0(&self, v0: &V0Candidate) -> bool {
        v0.mc_particle.is_some()
            && f64::from(v0.dca_pos_to_pv).abs() > self.v0.dca_pos_to_pv
            && f64::from(v0.dca_neg_to_pv).abs() > self.v0.dca_neg_to_pv
            && f64::from(v0.dca_v0_daughters) < self.v0.dca_v0_daughters
    }

    /// Whether a cascade candidate survives the pre-selection.
    ///
    /// Neither the Λ mass window nor the V0 DCA to the primary vertex is
    /// part of the pre-selection.
    pub fn accepts_cascade(&self, casc: &CascadeCandidate) -> bool {
        casc.mc_particle.is_some()
            && f64::from(casc.dca_pos_to_pv).abs() > self.v0.dca_pos_to_pv
            && f64::from(casc.dca_neg_to_pv).abs() > self.v0.dca_neg_to_pv
            && f64::from(casc.dca_v0_daughters) < self.v0.dca_v0_daughters
            && f64::from(casc.dca_bach_to_pv).abs() > self.cascade.dca_bach_to_pv
            && f64::from(casc.dca_casc_daughters) < self.cascade.dca_casc_daughters
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strareco_core::{CascadeId, CollisionId, McParticleId, TrackId, V0Id, V0LinkId, Vec3};

    fn v0() -> V0Candidate {
        V0Candidate {
            id: V0Id(0),
            collision: CollisionId(0),
            decay_vertex: Vec3::new(2.0, 0.0, 0.0),
            momentum: Vec3::new(1.0, 0.0, 0.0),
            dca_v0_daughters: 0.5,
            dca_pos_to_pv: 0.3,
            dca_neg_to_pv: -0.3,
            m_k0short: 0.497,
            m_lambda: 1.115,
            m_antilambda: 1.115,
            pos_track: TrackId(0),
            neg_track: TrackId(1),
            mc_particle: Some(McParticleId(0)),
        }
    }

    fn cascade() -> CascadeCandidate {
        CascadeCandidate {
            id: CascadeId(0),
            collision: CollisionId(0),
            decay_vertex: Vec3::new(1.0, 0.0, 0.0),
            momentum: Vec3::new(1.0, 0.0, 0.0),
            v0_decay_vertex: Vec3::new(3.0, 0.0, 0.0),
            v0_momentum: Vec3::new(1.0, 0.0, 0.0),
            dca_v0_daughters: 0.5,
            dca_casc_daughters: 0.5,
            dca_pos_to_pv: 0.3,
            dca_neg_to_pv: -0.3,
            dca_bach_to_pv: -0.2,
            dca_casc_to_pv: 0.05,
            dca_v0_to_pv: 0.05,
            m_lambda: 1.1160,
            m_xi: 1.3217,
            m_omega: 1.6725,
            bachelor: TrackId(2),
            v0_link: V0LinkId(0),
            mc_particle: Some(McParticleId(0)),
        }
    }

    #[test]
    fn v0_dca_cuts_use_absolute_values() {
        let f = Prefilter::new(&QaConfig::default());
        assert!(f.accepts_v0(&v0()));
        let mut close = v0();
        close.dca_neg_to_pv = -0.05;
        assert!(!f.accepts_v0(&close));
    }

    #[test]
    fn v0_without_truth_is_rejected() {
        let f = Prefilter::new(&QaConfig::default());
        let mut c = v0();
        c.mc_particle = None;
        assert!(!f.accepts_v0(&c));
    }

    #[test]
    fn cascade_ignores_lambda_mass_and_v0_dca() {
        let f = Prefilter::new(&QaConfig::default());
        assert!(f.accepts_cascade(&cascade()));

        let mut off_peak = cascade();
        off_peak.m_lambda = 1.13;
        off_peak.dca_v0_to_pv = 0.005;
        assert!(f.accepts_cascade(&off_peak));

        let mut close_bachelor = cascade();
        close_bachelor.dca_bach_to_pv = 0.05;
        assert!(!f.accepts_cascade(&close_bachelor));

        let mut loose = cascade();
        loose.dca_casc_daughters = 1.5;
        assert!(!f.accepts_cascade(&loose));
    }
}
