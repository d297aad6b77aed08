//! Seeded generator of realistic-looking batches.
//!
//! Produces referentially valid [`StrangenessTables`] with a controllable
//! mix of reconstructed and lost collisions, fake candidates, missing
//! truth, poor daughter tracks and unresolvable cascade V0 links. Output
//! is fully determined by the seed (ChaCha8).

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use strareco_core::{
    CascadeCandidate, CascadeId, CollisionId, McParticle, McParticleId, ReconstructedCollision,
    SimCollisionId, SimulatedCollision, Species, SpeciesFamily, StrangenessTables, Track, TrackId,
    V0Candidate, V0Id, V0Link, V0LinkId, Vec3,
};

use crate::fixtures::{K0SHORT_MASS, LAMBDA_MASS, OMEGA_MASS, PION_MINUS, PION_PLUS, XI_MASS};

/// Shape of the generated batches.
#[derive(Clone, Debug, PartialEq)]
pub struct SyntheticProfile {
    /// Simulated collisions per batch.
    pub sim_collisions: usize,
    /// Strange truth particles per simulated collision.
    pub strange_per_collision: usize,
    /// Non-strange truth particles per simulated collision.
    pub background_per_collision: usize,
    /// Probability that a simulated collision is reconstructed.
    pub reconstruction_efficiency: f64,
    /// Probability that a strange particle yields a candidate.
    pub candidate_efficiency: f64,
    /// Probability that a candidate carries no truth label.
    pub missing_truth_rate: f64,
    /// Probability that a daughter track fails the default quality cuts.
    pub bad_track_rate: f64,
    /// Probability that a cascade's V0 link row holds no V0.
    pub unresolved_link_rate: f64,
}

impl Default for SyntheticProfile {
    fn default() -> Self {
        Self {
            sim_collisions: 16,
            strange_per_collision: 6,
            background_per_collision: 4,
            reconstruction_efficiency: 0.8,
            candidate_efficiency: 0.7,
            missing_truth_rate: 0.05,
            bad_track_rate: 0.1,
            unresolved_link_rate: 0.1,
        }
    }
}

/// Deterministic batch generator.
#[derive(Clone, Debug)]
pub struct SyntheticBatchGenerator {
    rng: ChaCha8Rng,
    profile: SyntheticProfile,
}

/// Per-batch id counters and the tables under construction.
#[derive(Default)]
struct Batch {
    tables: StrangenessTables,
    next_track: u32,
    next_particle: u32,
    next_v0: u32,
    next_link: u32,
    next_cascade: u32,
}

impl SyntheticBatchGenerator {
    pub fn new(seed: u64) -> Self {
        Self::with_profile(seed, SyntheticProfile::default())
    }

    pub fn with_profile(seed: u64, profile: SyntheticProfile) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            profile,
        }
    }

    pub fn profile(&self) -> &SyntheticProfile {
        &self.profile
    }

    /// Generate `n` consecutive batches.
    pub fn batches(&mut self, n: usize) -> Vec<StrangenessTables> {
        (0..n).map(|_| self.next_batch()).collect()
    }

    /// Generate the next batch.
    pub fn next_batch(&mut self) -> StrangenessTables {
        let mut batch = Batch::default();
        for s in 0..self.profile.sim_collisions {
            self.sim_collision(&mut batch, SimCollisionId(s as u32));
        }
        batch.tables
    }

    fn sim_collision(&mut self, batch: &mut Batch, sim: SimCollisionId) {
        let vertex = Vec3::new(
            self.rng.random_range(-0.01..0.01),
            self.rng.random_range(-0.01..0.01),
            self.rng.random_range(-15.0..15.0),
        );
        batch.tables.sim_collisions.push(SimulatedCollision {
            id: sim,
            position: vertex,
        });

        let reconstructed = self.rng.random_bool(self.profile.reconstruction_efficiency);
        let collision = reconstructed.then(|| {
            let id = CollisionId(batch.tables.collisions.len() as u32);
            batch.tables.collisions.push(ReconstructedCollision {
                id,
                position: vertex,
                sel8: self.rng.random_bool(0.9),
                sim_collision: Some(sim),
            });
            id
        });

        for _ in 0..self.profile.background_per_collision {
            let pdg = if self.rng.random_bool(0.5) { PION_PLUS } else { PION_MINUS };
            self.particle(batch, sim, pdg);
        }

        for _ in 0..self.profile.strange_per_collision {
            let species = Species::ALL[self.rng.random_range(0..Species::ALL.len())];
            let truth = self.particle(batch, sim, species.pdg_code());
            let Some(collision) = collision else {
                continue;
            };
            if !self.rng.random_bool(self.profile.candidate_efficiency) {
                continue;
            }
            match species.family() {
                SpeciesFamily::V0 => self.v0(batch, sim, collision, vertex, species, truth),
                SpeciesFamily::Cascade => self.cascade(batch, collision, vertex, species, truth),
            }
        }
    }

    fn particle(&mut self, batch: &mut Batch, sim: SimCollisionId, pdg_code: i32) -> McParticleId {
        let id = McParticleId(batch.next_particle);
        batch.next_particle += 1;
        batch.tables.mc_particles.push(McParticle {
            id,
            pdg_code,
            rapidity: self.rng.random_range(-1.0..1.0),
            pt: self.rng.random_range(0.0..10.0),
            sim_collision: sim,
        });
        id
    }

    fn track(
        &mut self,
        batch: &mut Batch,
        collision: CollisionId,
        truth: Option<McParticleId>,
    ) -> TrackId {
        let id = TrackId(batch.next_track);
        batch.next_track += 1;
        let bad = self.rng.random_bool(self.profile.bad_track_rate);
        batch.tables.tracks.push(Track {
            id,
            collision,
            its_clusters: if bad {
                self.rng.random_range(0..4)
            } else {
                self.rng.random_range(4..8)
            },
            tpc_crossed_rows: if bad {
                self.rng.random_range(20..70)
            } else {
                self.rng.random_range(70..160)
            },
            dca_xy: self.rng.random_range(-1.5..1.5),
            dca_z: self.rng.random_range(-1.5..1.5),
            mc_particle: truth,
        });
        id
    }

    fn label(&mut self, truth: McParticleId) -> Option<McParticleId> {
        (!self.rng.random_bool(self.profile.missing_truth_rate)).then_some(truth)
    }

    /// Decay vertex and momentum of a candidate flying roughly along its
    /// flight line from `pv`.
    fn topology(&mut self, pv: Vec3, max_radius: f32, pt: f32) -> (Vec3, Vec3) {
        let phi: f32 = self.rng.random_range(0.0..std::f32::consts::TAU);
        let radius: f32 = self.rng.random_range(0.05..max_radius);
        let smear: f32 = self.rng.random_range(-0.4..0.4);
        let pz: f32 = self.rng.random_range(-1.0..1.0);
        let decay = Vec3::new(
            pv.x + radius * phi.cos(),
            pv.y + radius * phi.sin(),
            pv.z + pz * radius * 0.3,
        );
        let dir = phi + smear;
        let momentum = Vec3::new(pt * dir.cos(), pt * dir.sin(), pz * pt * 0.3);
        (decay, momentum)
    }

    fn mass_smear(&mut self) -> f32 {
        self.rng.random_range(-0.006..0.006)
    }

    fn v0(
        &mut self,
        batch: &mut Batch,
        sim: SimCollisionId,
        collision: CollisionId,
        pv: Vec3,
        species: Species,
        truth: McParticleId,
    ) {
        let pos_truth = self.particle(batch, sim, PION_PLUS);
        let neg_truth = self.particle(batch, sim, PION_MINUS);
        let pos_label = self.label(pos_truth);
        let neg_label = self.label(neg_truth);
        let pos_track = self.track(batch, collision, pos_label);
        let neg_track = self.track(batch, collision, neg_label);
        let pt = self.rng.random_range(0.2..8.0);
        let (decay_vertex, momentum) = self.topology(pv, 40.0, pt);
        let (k0, lambda, antilambda) = match species {
            Species::KaonShort => (K0SHORT_MASS + self.mass_smear(), 1.15, 1.15),
            Species::Lambda => (0.55, LAMBDA_MASS + self.mass_smear(), 1.13),
            _ => (0.55, 1.13, LAMBDA_MASS + self.mass_smear()),
        };
        let id = V0Id(batch.next_v0);
        batch.next_v0 += 1;
        let mc_particle = self.label(truth);
        batch.tables.v0s.push(V0Candidate {
            id,
            collision,
            decay_vertex,
            momentum,
            dca_v0_daughters: self.rng.random_range(0.0..1.5),
            dca_pos_to_pv: self.rng.random_range(-1.5..1.5),
            dca_neg_to_pv: self.rng.random_range(-1.5..1.5),
            m_k0short: k0,
            m_lambda: lambda,
            m_antilambda: antilambda,
            pos_track,
            neg_track,
            mc_particle,
        });
    }

    fn cascade(
        &mut self,
        batch: &mut Batch,
        collision: CollisionId,
        pv: Vec3,
        species: Species,
        truth: McParticleId,
    ) {
        // The cascade's V0 exists as a standalone candidate unless the
        // link is meant to be unresolvable.
        let v0 = if self.rng.random_bool(self.profile.unresolved_link_rate) {
            None
        } else {
            let pos_track = self.track(batch, collision, None);
            let neg_track = self.track(batch, collision, None);
            let id = V0Id(batch.next_v0);
            batch.next_v0 += 1;
            let (decay_vertex, momentum) = self.topology(pv, 40.0, 1.0);
            batch.tables.v0s.push(V0Candidate {
                id,
                collision,
                decay_vertex,
                momentum,
                dca_v0_daughters: self.rng.random_range(0.0..1.5),
                dca_pos_to_pv: self.rng.random_range(-1.5..1.5),
                dca_neg_to_pv: self.rng.random_range(-1.5..1.5),
                m_k0short: 0.55,
                m_lambda: LAMBDA_MASS,
                m_antilambda: 1.13,
                pos_track,
                neg_track,
                mc_particle: None,
            });
            Some(id)
        };
        let link = V0LinkId(batch.next_link);
        batch.next_link += 1;
        batch.tables.v0_links.push(V0Link { id: link, v0 });

        let bachelor = self.track(batch, collision, None);
        let pt = self.rng.random_range(0.3..8.0);
        let (decay_vertex, momentum) = self.topology(pv, 20.0, pt);
        let (v0_decay_vertex, v0_momentum) = self.topology(pv, 40.0, pt * 0.7);
        let (m_xi, m_omega) = if matches!(species, Species::XiMinus | Species::XiPlus) {
            (XI_MASS + self.mass_smear(), 1.75)
        } else {
            (1.40, OMEGA_MASS + self.mass_smear())
        };
        let id = CascadeId(batch.next_cascade);
        batch.next_cascade += 1;
        let mc_particle = self.label(truth);
        batch.tables.cascades.push(CascadeCandidate {
            id,
            collision,
            decay_vertex,
            momentum,
            v0_decay_vertex,
            v0_momentum,
            dca_v0_daughters: self.rng.random_range(0.0..1.5),
            dca_casc_daughters: self.rng.random_range(0.0..1.5),
            dca_pos_to_pv: self.rng.random_range(-1.5..1.5),
            dca_neg_to_pv: self.rng.random_range(-1.5..1.5),
            dca_bach_to_pv: self.rng.random_range(-1.5..1.5),
            dca_casc_to_pv: self.rng.random_range(-0.5..0.5),
            dca_v0_to_pv: self.rng.random_range(0.0..1.0),
            m_lambda: LAMBDA_MASS + self.mass_smear(),
            m_xi,
            m_omega,
            bachelor,
            v0_link: link,
            mc_particle,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn same_seed_same_batches() {
        let a = SyntheticBatchGenerator::new(7).batches(3);
        let b = SyntheticBatchGenerator::new(7).batches(3);
        assert_eq!(a, b);
        let c = SyntheticBatchGenerator::new(8).batches(3);
        assert_ne!(a, c);
    }

    #[test]
    fn references_resolve() {
        let batch = SyntheticBatchGenerator::new(1).next_batch();
        let tracks: HashSet<_> = batch.tracks.iter().map(|t| t.id).collect();
        let particles: HashSet<_> = batch.mc_particles.iter().map(|p| p.id).collect();
        let links: HashSet<_> = batch.v0_links.iter().map(|l| l.id).collect();
        let v0s: HashSet<_> = batch.v0s.iter().map(|v| v.id).collect();
        for v in &batch.v0s {
            assert!(tracks.contains(&v.pos_track) && tracks.contains(&v.neg_track));
            assert!(v.mc_particle.is_none_or(|p| particles.contains(&p)));
        }
        for c in &batch.cascades {
            assert!(tracks.contains(&c.bachelor));
            assert!(links.contains(&c.v0_link));
        }
        for l in &batch.v0_links {
            assert!(l.v0.is_none_or(|v| v0s.contains(&v)));
        }
        assert_eq!(tracks.len(), batch.tracks.len());
    }

    #[test]
    fn default_profile_produces_candidates() {
        let batches = SyntheticBatchGenerator::new(42).batches(4);
        let v0s: usize = batches.iter().map(|b| b.v0s.len()).sum();
        let cascades: usize = batches.iter().map(|b| b.cascades.len()).sum();
        assert!(v0s > 0);
        assert!(cascades > 0);
    }
}
