//! Strongly-typed row identifiers.
//!
//! Every table carries its own identifier newtype so that a track index
//! can never be used where a V0 index is expected. Identifiers are
//! opaque: they are not required to be dense or ordered within a batch.

use std::fmt;

macro_rules! row_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(pub u32);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<u32> for $name {
            fn from(v: u32) -> Self {
                Self(v)
            }
        }
    };
}

row_id! {
    /// Identifies a simulated (Monte Carlo) collision.
    SimCollisionId
}

row_id! {
    /// Identifies a reconstructed collision.
    CollisionId
}

row_id! {
    /// Identifies a reconstructed track.
    TrackId
}

row_id! {
    /// Identifies a V0 candidate.
    V0Id
}

row_id! {
    /// Identifies a row of the cascade → V0 indirection table.
    ///
    /// A cascade always points at a link row; the link row may or may not
    /// point at a V0 candidate.
    V0LinkId
}

row_id! {
    /// Identifies a cascade candidate.
    CascadeId
}

row_id! {
    /// Identifies a Monte Carlo truth particle.
    McParticleId
}
