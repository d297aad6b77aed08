//! Table rows consumed by the QA pipeline.
//!
//! One [`StrangenessTables`] value is one processing batch as delivered by
//! the table source. Rows reference each other only through identifiers;
//! the engine resolves them through an explicit index built once per batch.

use crate::geometry::{cos_pointing_angle, pointing_angle, Vec3};
use crate::id::{
    CascadeId, CollisionId, McParticleId, SimCollisionId, TrackId, V0Id, V0LinkId,
};

/// One simulated primary interaction.
#[derive(Clone, Debug, PartialEq)]
pub struct SimulatedCollision {
    /// Row identifier.
    pub id: SimCollisionId,
    /// Generated primary vertex (cm).
    pub position: Vec3,
}

/// One reconstructed collision (event).
#[derive(Clone, Debug, PartialEq)]
pub struct ReconstructedCollision {
    /// Row identifier.
    pub id: CollisionId,
    /// Reconstructed primary vertex (cm).
    pub position: Vec3,
    /// Standard event-selection decision for this collision.
    pub sel8: bool,
    /// Truth link to the simulated collision, if the reconstruction was
    /// matched to one.
    pub sim_collision: Option<SimCollisionId>,
}

/// A reconstructed charged-particle track.
#[derive(Clone, Debug, PartialEq)]
pub struct Track {
    /// Row identifier.
    pub id: TrackId,
    /// Collision the track was reconstructed in.
    pub collision: CollisionId,
    /// Number of inner tracking system clusters.
    pub its_clusters: u8,
    /// Number of crossed TPC readout rows.
    pub tpc_crossed_rows: u8,
    /// Transverse impact parameter to the primary vertex (cm).
    pub dca_xy: f32,
    /// Longitudinal impact parameter to the primary vertex (cm).
    pub dca_z: f32,
    /// Truth particle that produced this track.
    pub mc_particle: Option<McParticleId>,
}

/// A reconstructed two-prong decay vertex.
#[derive(Clone, Debug, PartialEq)]
pub struct V0Candidate {
    /// Row identifier.
    pub id: V0Id,
    /// Collision the candidate belongs to.
    pub collision: CollisionId,
    /// Secondary (decay) vertex position (cm).
    pub decay_vertex: Vec3,
    /// Total momentum of the daughter pair (GeV/c).
    pub momentum: Vec3,
    /// Distance of closest approach between the two daughters (cm).
    pub dca_v0_daughters: f32,
    /// Positive daughter DCA to the primary vertex (cm).
    pub dca_pos_to_pv: f32,
    /// Negative daughter DCA to the primary vertex (cm).
    pub dca_neg_to_pv: f32,
    /// Invariant mass under the K0S hypothesis (GeV/c²).
    pub m_k0short: f32,
    /// Invariant mass under the Λ hypothesis (GeV/c²).
    pub m_lambda: f32,
    /// Invariant mass under the anti-Λ hypothesis (GeV/c²).
    pub m_antilambda: f32,
    /// Positive daughter track.
    pub pos_track: TrackId,
    /// Negative daughter track.
    pub neg_track: TrackId,
    /// Truth particle associated with the candidate.
    pub mc_particle: Option<McParticleId>,
}

impl V0Candidate {
    /// Transverse momentum (GeV/c).
    pub fn pt(&self) -> f64 {
        self.momentum.transverse()
    }

    /// Transverse radius of the decay vertex (cm).
    pub fn radius(&self) -> f64 {
        self.decay_vertex.transverse()
    }

    /// Cosine of the pointing angle relative to `primary_vertex`.
    pub fn cos_pa(&self, primary_vertex: Vec3) -> f64 {
        cos_pointing_angle(self.decay_vertex, self.momentum, primary_vertex)
    }

    /// Pointing angle relative to `primary_vertex` (rad).
    pub fn pointing_angle(&self, primary_vertex: Vec3) -> f64 {
        pointing_angle(self.decay_vertex, self.momentum, primary_vertex)
    }
}

/// One row of the cascade → V0 indirection table.
///
/// The cascade builder may have produced a V0 for the cascade that was
/// not kept as a standalone V0 candidate; in that case `v0` is `None`.
#[derive(Clone, Debug, PartialEq)]
pub struct V0Link {
    /// Row identifier.
    pub id: V0LinkId,
    /// The standalone V0 candidate, when one exists.
    pub v0: Option<V0Id>,
}

/// A reconstructed cascade: a V0 plus a charged bachelor track.
#[derive(Clone, Debug, PartialEq)]
pub struct CascadeCandidate {
    /// Row identifier.
    pub id: CascadeId,
    /// Collision the candidate belongs to.
    pub collision: CollisionId,
    /// Cascade decay vertex (cm).
    pub decay_vertex: Vec3,
    /// Cascade momentum (GeV/c).
    pub momentum: Vec3,
    /// Decay vertex of the V0 inside the cascade (cm).
    pub v0_decay_vertex: Vec3,
    /// Momentum of the V0 inside the cascade (GeV/c).
    pub v0_momentum: Vec3,
    /// DCA between the two V0 daughters (cm).
    pub dca_v0_daughters: f32,
    /// DCA between the V0 and the bachelor (cm).
    pub dca_casc_daughters: f32,
    /// Positive V0 daughter DCA to the primary vertex (cm).
    pub dca_pos_to_pv: f32,
    /// Negative V0 daughter DCA to the primary vertex (cm).
    pub dca_neg_to_pv: f32,
    /// Bachelor DCA to the primary vertex (cm).
    pub dca_bach_to_pv: f32,
    /// Cascade DCA to the primary vertex (cm).
    pub dca_casc_to_pv: f32,
    /// V0 DCA to the primary vertex (cm).
    pub dca_v0_to_pv: f32,
    /// Invariant mass of the V0 under the Λ hypothesis (GeV/c²).
    pub m_lambda: f32,
    /// Invariant mass under the Ξ hypothesis (GeV/c²).
    pub m_xi: f32,
    /// Invariant mass under the Ω hypothesis (GeV/c²).
    pub m_omega: f32,
    /// Bachelor track.
    pub bachelor: TrackId,
    /// Link row resolving the V0 used by this cascade.
    pub v0_link: V0LinkId,
    /// Truth particle associated with the candidate.
    pub mc_particle: Option<McParticleId>,
}

impl CascadeCandidate {
    /// Transverse momentum (GeV/c).
    pub fn pt(&self) -> f64 {
        self.momentum.transverse()
    }

    /// Transverse radius of the cascade decay vertex (cm).
    pub fn radius(&self) -> f64 {
        self.decay_vertex.transverse()
    }

    /// Transverse radius of the V0 decay vertex (cm).
    pub fn v0_radius(&self) -> f64 {
        self.v0_decay_vertex.transverse()
    }

    /// Cosine of the cascade pointing angle relative to `primary_vertex`.
    pub fn cos_pa(&self, primary_vertex: Vec3) -> f64 {
        cos_pointing_angle(self.decay_vertex, self.momentum, primary_vertex)
    }

    /// Cosine of the V0 pointing angle relative to `primary_vertex`.
    pub fn v0_cos_pa(&self, primary_vertex: Vec3) -> f64 {
        cos_pointing_angle(self.v0_decay_vertex, self.v0_momentum, primary_vertex)
    }

    /// Cascade pointing angle relative to `primary_vertex` (rad).
    pub fn pointing_angle(&self, primary_vertex: Vec3) -> f64 {
        pointing_angle(self.decay_vertex, self.momentum, primary_vertex)
    }
}

/// A Monte Carlo truth particle.
#[derive(Clone, Debug, PartialEq)]
pub struct McParticle {
    /// Row identifier.
    pub id: McParticleId,
    /// Signed PDG code.
    pub pdg_code: i32,
    /// Rapidity.
    pub rapidity: f32,
    /// Transverse momentum (GeV/c).
    pub pt: f32,
    /// Simulated collision the particle was generated in.
    pub sim_collision: SimCollisionId,
}

/// One processing batch: every table the QA pipeline consumes.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StrangenessTables {
    /// Simulated collisions, in source order.
    pub sim_collisions: Vec<SimulatedCollision>,
    /// Reconstructed collisions, in source order.
    pub collisions: Vec<ReconstructedCollision>,
    /// Reconstructed tracks.
    pub tracks: Vec<Track>,
    /// V0 candidates.
    pub v0s: Vec<V0Candidate>,
    /// Cascade → V0 indirection rows.
    pub v0_links: Vec<V0Link>,
    /// Cascade candidates.
    pub cascades: Vec<CascadeCandidate>,
    /// Truth particles.
    pub mc_particles: Vec<McParticle>,
}

impl StrangenessTables {
    /// Whether the batch has no rows at all.
    pub fn is_empty(&self) -> bool {
        self.sim_collisions.is_empty()
            && self.collisions.is_empty()
            && self.tracks.is_empty()
            && self.v0s.is_empty()
            && self.v0_links.is_empty()
            && self.cascades.is_empty()
            && self.mc_particles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cascade() -> CascadeCandidate {
        CascadeCandidate {
            id: CascadeId(0),
            collision: CollisionId(0),
            decay_vertex: Vec3::new(0.6, 0.8, 1.0),
            momentum: Vec3::new(1.2, 1.6, 0.3),
            v0_decay_vertex: Vec3::new(3.0, 4.0, 2.0),
            v0_momentum: Vec3::new(0.6, 0.8, 0.0),
            dca_v0_daughters: 0.2,
            dca_casc_daughters: 0.3,
            dca_pos_to_pv: 0.5,
            dca_neg_to_pv: -0.5,
            dca_bach_to_pv: 0.4,
            dca_casc_to_pv: 0.05,
            dca_v0_to_pv: 0.1,
            m_lambda: 1.1157,
            m_xi: 1.3217,
            m_omega: 1.6725,
            bachelor: TrackId(2),
            v0_link: V0LinkId(0),
            mc_particle: None,
        }
    }

    #[test]
    fn cascade_radii_are_transverse() {
        let c = cascade();
        assert!((c.radius() - 1.0).abs() < 1e-6);
        assert!((c.v0_radius() - 5.0).abs() < 1e-6);
        assert!((c.pt() - 2.0).abs() < 1e-6);
    }

    #[test]
    fn cascade_pointing_angles_use_their_own_vectors() {
        let c = cascade();
        let pv = Vec3::new(0.0, 0.0, 1.0);
        // The cascade momentum is not parallel to its flight line; the
        // V0 flight line in the transverse plane is parallel to its momentum.
        assert!(c.cos_pa(pv) > 0.9 && c.cos_pa(pv) < 1.0);
        let v0_pv = Vec3::new(0.0, 0.0, 2.0);
        assert!((c.v0_cos_pa(v0_pv) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn pointing_angle_is_acos_of_cosine() {
        let c = cascade();
        let pv = Vec3::new(0.0, 0.0, 1.0);
        assert!((c.pointing_angle(pv) - c.cos_pa(pv).acos()).abs() < 1e-12);
        assert!(c.pointing_angle(pv) > 0.0);
    }

    #[test]
    fn empty_batch() {
        assert!(StrangenessTables::default().is_empty());
        let mut t = StrangenessTables::default();
        t.v0_links.push(V0Link {
            id: V0LinkId(0),
            v0: None,
        });
        assert!(!t.is_empty());
    }
}
