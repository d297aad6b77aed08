//! Data-contract errors raised at the table-source boundary.
//!
//! The QA pipeline treats missing truth labels, unresolved V0 links and
//! failed cuts as ordinary skip decisions. A [`DataError`] is reserved for
//! batches that violate their referential contract (a candidate pointing
//! at a row that does not exist, or two rows sharing an identifier). Such
//! a batch is rejected as a whole before anything is accumulated.

use std::error::Error;
use std::fmt;

use crate::id::{CollisionId, McParticleId, SimCollisionId, TrackId, V0Id, V0LinkId};

/// A referential-integrity violation inside one batch of tables.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DataError {
    /// Two rows of the same table share an identifier.
    DuplicateId {
        /// Table name (`"tracks"`, `"v0s"`, ...).
        table: &'static str,
        /// The duplicated raw identifier.
        id: u32,
    },
    /// A row references a reconstructed collision that is not in the batch.
    UnknownCollision {
        /// Table holding the dangling reference.
        table: &'static str,
        /// Raw identifier of the referencing row.
        row: u32,
        /// The missing collision.
        collision: CollisionId,
    },
    /// A candidate references a track that is not in the batch.
    UnknownTrack {
        /// Table holding the dangling reference.
        table: &'static str,
        /// Raw identifier of the referencing row.
        row: u32,
        /// The missing track.
        track: TrackId,
    },
    /// A truth label references a particle that is not in the batch.
    UnknownMcParticle {
        /// Table holding the dangling reference.
        table: &'static str,
        /// Raw identifier of the referencing row.
        row: u32,
        /// The missing particle.
        particle: McParticleId,
    },
    /// A truth particle references a simulated collision that is not in
    /// the batch.
    UnknownSimCollision {
        /// The referencing particle.
        particle: McParticleId,
        /// The missing simulated collision.
        sim_collision: SimCollisionId,
    },
    /// A cascade references a V0 link row that is not in the batch.
    UnknownV0Link {
        /// Raw identifier of the cascade.
        cascade: u32,
        /// The missing link row.
        link: V0LinkId,
    },
    /// A V0 link row points at a V0 candidate that is not in the batch.
    ///
    /// This is distinct from a link row with no V0, which is a legal,
    /// skippable state.
    UnknownV0 {
        /// The link row.
        link: V0LinkId,
        /// The missing V0 candidate.
        v0: V0Id,
    },
}

impl fmt::Display for DataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateId { table, id } => write!(f, "duplicate id {id} in table '{table}'"),
            Self::UnknownCollision {
                table,
                row,
                collision,
            } => write!(f, "{table}[{row}] references unknown collision {collision}"),
            Self::UnknownTrack { table, row, track } => {
                write!(f, "{table}[{row}] references unknown track {track}")
            }
            Self::UnknownMcParticle {
                table,
                row,
                particle,
            } => write!(f, "{table}[{row}] references unknown mc particle {particle}"),
            Self::UnknownSimCollision {
                particle,
                sim_collision,
            } => write!(
                f,
                "mc particle {particle} references unknown simulated collision {sim_collision}"
            ),
            Self::UnknownV0Link { cascade, link } => {
                write!(f, "cascade {cascade} references unknown v0 link {link}")
            }
            Self::UnknownV0 { link, v0 } => {
                write!(f, "v0 link {link} references unknown v0 {v0}")
            }
        }
    }
}

impl Error for DataError {}
