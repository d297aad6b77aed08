//! Per-batch lookup index over [`StrangenessTables`].
//!
//! The table source delivers flat rows that reference each other by id.
//! [`BatchIndex::build`] validates every reference once and records row
//! positions, so the evaluators can dereference in O(1) without
//! re-checking. A batch with a dangling reference or a duplicated id is
//! rejected before anything is accumulated.

use std::collections::HashMap;
use std::hash::Hash;

use strareco_core::{
    CascadeCandidate, CollisionId, DataError, McParticle, McParticleId, ReconstructedCollision,
    StrangenessTables, Track, TrackId, V0Candidate, V0Id, V0LinkId,
};

/// Validated id → row lookups and per-collision candidate lists.
#[derive(Debug)]
pub struct BatchIndex<'a> {
    tables: &'a StrangenessTables,
    collisions: HashMap<CollisionId, usize>,
    tracks: HashMap<TrackId, usize>,
    v0s: HashMap<V0Id, usize>,
    v0_links: HashMap<V0LinkId, usize>,
    mc_particles: HashMap<McParticleId, usize>,
    /// V0 row positions, one list per collision row, in source order.
    v0s_by_collision: Vec<Vec<usize>>,
    /// Cascade row positions, one list per collision row, in source order.
    cascades_by_collision: Vec<Vec<usize>>,
}

fn positions<I, K>(table: &'static str, ids: I) -> Result<HashMap<K, usize>, DataError>
where
    I: ExactSizeIterator<Item = (K, u32)>,
    K: Eq + Hash,
{
    let mut map = HashMap::with_capacity(ids.len());
    for (pos, (id, raw)) in ids.enumerate() {
        if map.insert(id, pos).is_some() {
            return Err(DataError::DuplicateId { table, id: raw });
        }
    }
    Ok(map)
}

impl<'a> BatchIndex<'a> {
    /// Index and validate one batch.
    pub fn build(tables: &'a StrangenessTables) -> Result<Self, DataError> {
        // 1. Id → position maps; duplicate ids are rejected.
        let sim_collisions = positions(
            "sim_collisions",
            tables.sim_collisions.iter().map(|c| (c.id, c.id.0)),
        )?;
        let collisions = positions(
            "collisions",
            tables.collisions.iter().map(|c| (c.id, c.id.0)),
        )?;
        let tracks = positions("tracks", tables.tracks.iter().map(|t| (t.id, t.id.0)))?;
        let v0s = positions("v0s", tables.v0s.iter().map(|v| (v.id, v.id.0)))?;
        let v0_links = positions("v0_links", tables.v0_links.iter().map(|l| (l.id, l.id.0)))?;
        let _cascades = positions("cascades", tables.cascades.iter().map(|c| (c.id, c.id.0)))?;
        let mc_particles = positions(
            "mc_particles",
            tables.mc_particles.iter().map(|p| (p.id, p.id.0)),
        )?;

        // 2. Reference checks. Reconstructed → simulated collision links
        //    are not checked: an unmatched link just never flags anything.
        for p in &tables.mc_particles {
            if !sim_collisions.contains_key(&p.sim_collision) {
                return Err(DataError::UnknownSimCollision {
                    particle: p.id,
                    sim_collision: p.sim_collision,
                });
            }
        }

        let check_collision = |table, row, collision: CollisionId| {
            collisions
                .get(&collision)
                .copied()
                .ok_or(DataError::UnknownCollision {
                    table,
                    row,
                    collision,
                })
        };
        let check_track = |table, row, track: TrackId| {
            if tracks.contains_key(&track) {
                Ok(())
            } else {
                Err(DataError::UnknownTrack { table, row, track })
            }
        };
        let check_particle = |table, row, particle: Option<McParticleId>| match particle {
            Some(particle) if !mc_particles.contains_key(&particle) => {
                Err(DataError::UnknownMcParticle {
                    table,
                    row,
                    particle,
                })
            }
            _ => Ok(()),
        };

        for t in &tables.tracks {
            check_collision("tracks", t.id.0, t.collision)?;
            check_particle("tracks", t.id.0, t.mc_particle)?;
        }

        for l in &tables.v0_links {
            if let Some(v0) = l.v0 {
                if !v0s.contains_key(&v0) {
                    return Err(DataError::UnknownV0 { link: l.id, v0 });
                }
            }
        }

        // 3. Per-collision candidate lists.
        let mut v0s_by_collision = vec![Vec::new(); tables.collisions.len()];
        for (pos, v) in tables.v0s.iter().enumerate() {
            let owner = check_collision("v0s", v.id.0, v.collision)?;
            check_track("v0s", v.id.0, v.pos_track)?;
            check_track("v0s", v.id.0, v.neg_track)?;
            check_particle("v0s", v.id.0, v.mc_particle)?;
            v0s_by_collision[owner].push(pos);
        }

        let mut cascades_by_collision = vec![Vec::new(); tables.collisions.len()];
        for (pos, c) in tables.cascades.iter().enumerate() {
            let owner = check_collision("cascades", c.id.0, c.collision)?;
            check_track("cascades", c.id.0, c.bachelor)?;
            check_particle("cascades", c.id.0, c.mc_particle)?;
            if !v0_links.contains_key(&c.v0_link) {
                return Err(DataError::UnknownV0Link {
                    cascade: c.id.0,
                    link: c.v0_link,
                });
            }
            cascades_by_collision[owner].push(pos);
        }

        Ok(Self {
            tables,
            collisions,
            tracks,
            v0s,
            v0_links,
            mc_particles,
            v0s_by_collision,
            cascades_by_collision,
        })
    }

    /// The indexed tables.
    pub fn tables(&self) -> &'a StrangenessTables {
        self.tables
    }

    /// Look up a reconstructed collision.
    pub fn collision(&self, id: CollisionId) -> Option<&'a ReconstructedCollision> {
        let tables = self.tables;
        self.collisions.get(&id).map(|&pos| &tables.collisions[pos])
    }

    /// Look up a track.
    pub fn track(&self, id: TrackId) -> Option<&'a Track> {
        let tables = self.tables;
        self.tracks.get(&id).map(|&pos| &tables.tracks[pos])
    }

    /// Look up a truth particle.
    pub fn mc_particle(&self, id: McParticleId) -> Option<&'a McParticle> {
        let tables = self.tables;
        self.mc_particles.get(&id).map(|&pos| &tables.mc_particles[pos])
    }

    /// Look up a V0 candidate.
    pub fn v0(&self, id: V0Id) -> Option<&'a V0Candidate> {
        let tables = self.tables;
        self.v0s.get(&id).map(|&pos| &tables.v0s[pos])
    }

    /// Follow a cascade's V0 link to the standalone V0 candidate.
    ///
    /// Returns `None` when the link row carries no V0.
    pub fn resolve_v0_link(&self, link: V0LinkId) -> Option<&'a V0Candidate> {
        let tables = self.tables;
        let row = self.v0_links.get(&link).map(|&pos| &tables.v0_links[pos])?;
        self.v0(row.v0?)
    }

    /// V0 candidates of the collision at row `collision_pos`, in source order.
    pub fn v0s_of(&self, collision_pos: usize) -> impl Iterator<Item = &'a V0Candidate> + '_ {
        let tables = self.tables;
        self.v0s_by_collision
            .get(collision_pos)
            .into_iter()
            .flatten()
            .map(move |&pos| &tables.v0s[pos])
    }

    /// Cascade candidates of the collision at row `collision_pos`, in source order.
    pub fn cascades_of(
        &self,
        collision_pos: usize,
    ) -> impl Iterator<Item = &'a CascadeCandidate> + '_ {
        let tables = self.tables;
        self.cascades_by_collision
            .get(collision_pos)
            .into_iter()
            .flatten()
            .map(move |&pos| &tables.cascades[pos])
    }

    /// A track referenced by a row of `table`.
    ///
    /// Only fails for references that were not validated by
    /// [`build`](Self::build), i.e. never for rows of the indexed tables.
    pub(crate) fn require_track(
        &self,
        table: &'static str,
        row: u32,
        track: TrackId,
    ) -> Result<&'a Track, DataError> {
        self.track(track)
            .ok_or(DataError::UnknownTrack { table, row, track })
    }

    /// The truth particle behind a present label of a row of `table`.
    pub(crate) fn require_mc_particle(
        &self,
        table: &'static str,
        row: u32,
        particle: McParticleId,
    ) -> Result<&'a McParticle, DataError> {
        self.mc_particle(particle)
            .ok_or(DataError::UnknownMcParticle {
                table,
                row,
                particle,
            })
    }
}
