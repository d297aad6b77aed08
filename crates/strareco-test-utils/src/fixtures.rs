//! Hand-built batches for unit and integration tests.
//!
//! [`TablesBuilder`] hands out fresh identifiers and keeps every
//! reference valid, so a test only spells out the rows it cares about.
//! Candidates are created "good": truth-matched, with daughters that pass
//! the default track cuts and a topology inside the default signal
//! region. Tests then break exactly the property under test through the
//! `*_mut` accessors.

use strareco_core::{
    CascadeCandidate, CascadeId, CollisionId, McParticle, McParticleId, ReconstructedCollision,
    SimCollisionId, SimulatedCollision, StrangenessTables, Track, TrackId, V0Candidate, V0Id,
    V0Link, V0LinkId, Vec3,
};

/// Nominal K0S mass (GeV/c²).
pub const K0SHORT_MASS: f32 = 0.497611;
/// Nominal Λ mass (GeV/c²).
pub const LAMBDA_MASS: f32 = 1.115683;
/// Nominal Ξ mass (GeV/c²).
pub const XI_MASS: f32 = 1.32171;
/// Nominal Ω mass (GeV/c²).
pub const OMEGA_MASS: f32 = 1.67245;

/// PDG code of the positive pion, used for daughter truth particles.
pub const PION_PLUS: i32 = 211;
/// PDG code of the negative pion.
pub const PION_MINUS: i32 = -211;

/// Incremental builder of a referentially valid [`StrangenessTables`].
#[derive(Clone, Debug, Default)]
pub struct TablesBuilder {
    tables: StrangenessTables,
    next_track: u32,
    next_particle: u32,
    next_v0: u32,
    next_link: u32,
    next_cascade: u32,
}

impl TablesBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a simulated collision at the origin.
    pub fn sim_collision(&mut self) -> SimCollisionId {
        let id = SimCollisionId(self.tables.sim_collisions.len() as u32);
        self.tables.sim_collisions.push(SimulatedCollision {
            id,
            position: Vec3::default(),
        });
        id
    }

    /// Add a reconstructed collision at the origin passing sel8.
    pub fn collision(&mut self, sim: Option<SimCollisionId>) -> CollisionId {
        self.collision_at(Vec3::default(), true, sim)
    }

    /// Add a reconstructed collision with explicit vertex and sel8 decision.
    pub fn collision_at(
        &mut self,
        position: Vec3,
        sel8: bool,
        sim: Option<SimCollisionId>,
    ) -> CollisionId {
        let id = CollisionId(self.tables.collisions.len() as u32);
        self.tables.collisions.push(ReconstructedCollision {
            id,
            position,
            sel8,
            sim_collision: sim,
        });
        id
    }

    /// Add a truth particle.
    pub fn particle(
        &mut self,
        sim: SimCollisionId,
        pdg_code: i32,
        rapidity: f32,
        pt: f32,
    ) -> McParticleId {
        let id = McParticleId(self.next_particle);
        self.next_particle += 1;
        self.tables.mc_particles.push(McParticle {
            id,
            pdg_code,
            rapidity,
            pt,
            sim_collision: sim,
        });
        id
    }

    /// Add a track passing the default quality cuts.
    pub fn track(&mut self, collision: CollisionId, truth: Option<McParticleId>) -> TrackId {
        let id = TrackId(self.next_track);
        self.next_track += 1;
        self.tables.tracks.push(Track {
            id,
            collision,
            its_clusters: 7,
            tpc_crossed_rows: 130,
            dca_xy: 0.25,
            dca_z: 0.1,
            mc_particle: truth,
        });
        id
    }

    /// Add a truth-matched V0 with two good daughters.
    ///
    /// The decay vertex sits 1 cm from the primary vertex along x, the
    /// momentum has cosPA = 0.97, and the daughter DCA is 0.5 cm.
    pub fn truth_v0(&mut self, collision: CollisionId, truth: McParticleId) -> V0Id {
        let sim = self.sim_of(truth);
        let pos_truth = self.particle(sim, PION_PLUS, 0.0, 0.5);
        let neg_truth = self.particle(sim, PION_MINUS, 0.0, 0.5);
        let pos = self.track(collision, Some(pos_truth));
        let neg = self.track(collision, Some(neg_truth));
        self.v0_with_daughters(collision, pos, neg, Some(truth))
    }

    /// Add a V0 on existing daughter tracks.
    pub fn v0_with_daughters(
        &mut self,
        collision: CollisionId,
        pos_track: TrackId,
        neg_track: TrackId,
        truth: Option<McParticleId>,
    ) -> V0Id {
        let pv = self.vertex_of(collision);
        let id = V0Id(self.next_v0);
        self.next_v0 += 1;
        self.tables.v0s.push(V0Candidate {
            id,
            collision,
            decay_vertex: Vec3::new(pv.x + 1.0, pv.y, pv.z),
            momentum: Vec3::new(0.97, (1.0f32 - 0.97 * 0.97).sqrt(), 0.0),
            dca_v0_daughters: 0.5,
            dca_pos_to_pv: 0.25,
            dca_neg_to_pv: -0.25,
            m_k0short: K0SHORT_MASS,
            m_lambda: LAMBDA_MASS,
            m_antilambda: LAMBDA_MASS,
            pos_track,
            neg_track,
            mc_particle: truth,
        });
        id
    }

    /// Add a V0 link row.
    pub fn link(&mut self, v0: Option<V0Id>) -> V0LinkId {
        let id = V0LinkId(self.next_link);
        self.next_link += 1;
        self.tables.v0_links.push(V0Link { id, v0 });
        id
    }

    /// Add a truth-matched cascade with a resolvable V0 and good daughters.
    ///
    /// The standalone V0 it links to carries no truth label, so it never
    /// fills V0 histograms itself.
    pub fn truth_cascade(&mut self, collision: CollisionId, truth: McParticleId) -> CascadeId {
        let pos = self.track(collision, None);
        let neg = self.track(collision, None);
        let v0 = self.v0_with_daughters(collision, pos, neg, None);
        let link = self.link(Some(v0));
        self.cascade_on_link(collision, link, Some(truth))
    }

    /// Add a cascade whose V0 link row carries no V0.
    pub fn cascade_without_v0(
        &mut self,
        collision: CollisionId,
        truth: Option<McParticleId>,
    ) -> CascadeId {
        let link = self.link(None);
        self.cascade_on_link(collision, link, truth)
    }

    /// Add a cascade on an existing link row, with a fresh good bachelor.
    pub fn cascade_on_link(
        &mut self,
        collision: CollisionId,
        v0_link: V0LinkId,
        truth: Option<McParticleId>,
    ) -> CascadeId {
        let pv = self.vertex_of(collision);
        let bachelor = self.track(collision, None);
        let id = CascadeId(self.next_cascade);
        self.next_cascade += 1;
        self.tables.cascades.push(CascadeCandidate {
            id,
            collision,
            decay_vertex: Vec3::new(pv.x + 2.0, pv.y, pv.z),
            momentum: Vec3::new(1.5, 0.0, 0.0),
            v0_decay_vertex: Vec3::new(pv.x + 5.0, pv.y + 0.1, pv.z),
            v0_momentum: Vec3::new(1.0, 0.0, 0.0),
            dca_v0_daughters: 0.3,
            dca_casc_daughters: 0.4,
            dca_pos_to_pv: 0.5,
            dca_neg_to_pv: -0.6,
            dca_bach_to_pv: 0.3,
            dca_casc_to_pv: 0.02,
            dca_v0_to_pv: 0.1,
            m_lambda: LAMBDA_MASS,
            m_xi: XI_MASS,
            m_omega: OMEGA_MASS,
            bachelor,
            v0_link,
            mc_particle: truth,
        });
        id
    }

    pub fn track_mut(&mut self, id: TrackId) -> Option<&mut Track> {
        self.tables.tracks.iter_mut().find(|t| t.id == id)
    }

    pub fn v0_mut(&mut self, id: V0Id) -> Option<&mut V0Candidate> {
        self.tables.v0s.iter_mut().find(|v| v.id == id)
    }

    pub fn cascade_mut(&mut self, id: CascadeId) -> Option<&mut CascadeCandidate> {
        self.tables.cascades.iter_mut().find(|c| c.id == id)
    }

    pub fn particle_mut(&mut self, id: McParticleId) -> Option<&mut McParticle> {
        self.tables.mc_particles.iter_mut().find(|p| p.id == id)
    }

    /// The tables built so far.
    pub fn tables(&self) -> &StrangenessTables {
        &self.tables
    }

    pub fn build(self) -> StrangenessTables {
        self.tables
    }

    fn vertex_of(&self, collision: CollisionId) -> Vec3 {
        self.tables
            .collisions
            .iter()
            .find(|c| c.id == collision)
            .map(|c| c.position)
            .unwrap_or_default()
    }

    fn sim_of(&self, particle: McParticleId) -> SimCollisionId {
        self.tables
            .mc_particles
            .iter()
            .find(|p| p.id == particle)
            .map(|p| p.sim_collision)
            .unwrap_or(SimCollisionId(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truth_v0_creates_matched_daughters() {
        let mut b = TablesBuilder::new();
        let sim = b.sim_collision();
        let col = b.collision(Some(sim));
        let lambda = b.particle(sim, 3122, 0.1, 1.0);
        let v0 = b.truth_v0(col, lambda);
        let tables = b.build();
        assert_eq!(tables.v0s.len(), 1);
        assert_eq!(tables.v0s[0].id, v0);
        assert_eq!(tables.tracks.len(), 2);
        assert!(tables.tracks.iter().all(|t| t.mc_particle.is_some()));
        assert_eq!(tables.mc_particles.len(), 3);
    }

    #[test]
    fn truth_cascade_links_an_unlabelled_v0() {
        let mut b = TablesBuilder::new();
        let sim = b.sim_collision();
        let col = b.collision(Some(sim));
        let xi = b.particle(sim, 3312, 0.0, 2.0);
        b.truth_cascade(col, xi);
        let tables = b.build();
        assert_eq!(tables.v0_links[0].v0, Some(tables.v0s[0].id));
        assert_eq!(tables.v0s[0].mc_particle, None);
        assert_eq!(tables.cascades[0].mc_particle, Some(xi));
        assert_eq!(tables.tracks.len(), 3);
    }

    #[test]
    fn candidates_follow_the_collision_vertex() {
        let mut b = TablesBuilder::new();
        let sim = b.sim_collision();
        let col = b.collision_at(Vec3::new(0.0, 0.0, 4.0), true, Some(sim));
        let k0 = b.particle(sim, 310, 0.0, 1.0);
        b.truth_v0(col, k0);
        let tables = b.build();
        assert_eq!(tables.v0s[0].decay_vertex, Vec3::new(1.0, 0.0, 4.0));
    }
}
