//! Reconstruction-status annotation of simulated collisions.

use std::collections::HashSet;

use strareco_core::{ReconstructedCollision, SimCollisionId, SimulatedCollision};

/// One reconstruction flag per simulated collision, in input order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RecoStatusTable {
    ids: Vec<SimCollisionId>,
    flags: Vec<bool>,
}

impl RecoStatusTable {
    /// The output column: `flags()[i]` belongs to the i-th simulated collision.
    pub fn flags(&self) -> &[bool] {
        &self.flags
    }

    /// Whether `id` was reconstructed at least once.
    ///
    /// Unknown ids are not reconstructible.
    pub fn is_reconstructible(&self, id: SimCollisionId) -> bool {
        self.ids
            .iter()
            .zip(&self.flags)
            .any(|(&sim, &flag)| flag && sim == id)
    }

    /// `(id, flag)` pairs in input order.
    pub fn iter(&self) -> impl Iterator<Item = (SimCollisionId, bool)> + '_ {
        self.ids.iter().copied().zip(self.flags.iter().copied())
    }

    /// Number of annotated simulated collisions.
    pub fn len(&self) -> usize {
        self.flags.len()
    }

    /// Whether no simulated collision was annotated.
    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    /// Number of simulated collisions flagged as reconstructed.
    pub fn reconstructed_count(&self) -> usize {
        self.flags.iter().filter(|&&f| f).count()
    }
}

/// Flag every simulated collision that some reconstructed collision is
/// truth-linked to.
///
/// Linear in both inputs. Truth links that name no simulated collision
/// in `sim` are ignored.
pub fn annotate_reconstruction_status(
    sim: &[SimulatedCollision],
    reco: &[ReconstructedCollision],
) -> RecoStatusTable {
    let linked: HashSet<SimCollisionId> = reco.iter().filter_map(|c| c.sim_collision).collect();
    RecoStatusTable {
        ids: sim.iter().map(|c| c.id).collect(),
        flags: sim.iter().map(|c| linked.contains(&c.id)).collect(),
    }
}

/// Set of reconstructed simulated-collision ids, for O(1) lookups in the
/// reconstructible generated pass.
pub(crate) fn reconstructed_set(table: &RecoStatusTable) -> HashSet<SimCollisionId> {
    table
        .iter()
        .filter_map(|(id, flag)| flag.then_some(id))
        .collect()
}
