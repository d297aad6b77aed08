//! Strareco: truth-matched QA histograms for strangeness reconstruction.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all strareco sub-crates. For most users, adding `strareco` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use strareco::prelude::*;
//!
//! let mut tables = StrangenessTables::default();
//! tables.sim_collisions.push(SimulatedCollision {
//!     id: SimCollisionId(0),
//!     position: Vec3::default(),
//! });
//! tables.mc_particles.push(McParticle {
//!     id: McParticleId(0),
//!     pdg_code: Species::Lambda.pdg_code(),
//!     rapidity: 0.1,
//!     pt: 1.2,
//!     sim_collision: SimCollisionId(0),
//! });
//!
//! let mut qa = StrangenessQa::new(QaConfig::default()).unwrap();
//! let report = qa.process_batch(&tables).unwrap();
//! assert_eq!(report.generated_pure, 1);
//! assert_eq!(report.generated_reconstructible, 0);
//! assert_eq!(qa.registry().get("hGenLambda").unwrap().integral(), 1.0);
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `strareco-core` | IDs, table rows, species, data errors |
//! | [`hist`] | `strareco-hist` | Axes, histograms, the sink trait, the registry |
//! | [`engine`] | `strareco-engine` | Configuration, selections, evaluators, batch driver |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core table types, IDs and species (`strareco-core`).
///
/// Contains the row types bundled in [`types::StrangenessTables`], the
/// [`types::Species`] enumeration and [`types::DataError`].
pub use strareco_core as types;

/// Histogram storage and aggregation (`strareco-hist`).
///
/// [`hist::HistogramSink`] is the write-only interface the QA components
/// fill; [`hist::HistogramRegistry`] is the in-memory implementation.
pub use strareco_hist as hist;

/// Selections, candidate evaluation and batch processing (`strareco-engine`).
///
/// [`engine::StrangenessQa`] processes batches on the calling thread,
/// [`engine::ShardedRunner`] spreads them over worker threads.
pub use strareco_engine as engine;

/// Common imports for typical strareco usage.
///
/// ```rust
/// use strareco::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use strareco_core::{
        CascadeCandidate, CascadeId, CollisionId, McParticle, McParticleId,
        ReconstructedCollision, SimCollisionId, SimulatedCollision, Species, StrangenessTables,
        Track, TrackId, V0Candidate, V0Id, V0Link, V0LinkId, Vec3,
    };

    // Histograms
    pub use strareco_hist::{Axis, Histogram, HistogramRegistry, HistogramSink};

    // Errors
    pub use strareco_core::DataError;
    pub use strareco_engine::{ConfigError, QaError};
    pub use strareco_hist::HistError;

    // Engine
    pub use strareco_engine::{
        BatchReport, MissingTruthPolicy, QaConfig, RunSummary, ShardedOutput, ShardedRunner,
        StrangenessQa,
    };
}
