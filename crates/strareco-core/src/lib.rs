//! Core types for strangeness reconstruction QA.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the table rows consumed by the QA pipeline (simulated and reconstructed
//! collisions, tracks, V0 and cascade candidates, truth particles), their
//! strongly-typed identifiers, the closed [`Species`] enumeration and the
//! [`DataError`] raised when a batch violates its referential contract.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod geometry;
pub mod id;
pub mod species;
pub mod tables;

pub use error::DataError;
pub use geometry::Vec3;
pub use id::{
    CascadeId, CollisionId, McParticleId, SimCollisionId, TrackId, V0Id, V0LinkId,
};
pub use species::{Species, SpeciesFamily};
pub use tables::{
    CascadeCandidate, McParticle, ReconstructedCollision, SimulatedCollision, StrangenessTables,
    Track, V0Candidate, V0Link,
};
