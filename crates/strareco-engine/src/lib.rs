//! QA engine for strangeness reconstruction.
//!
//! Takes one batch of [`StrangenessTables`](strareco_core::StrangenessTables)
//! at a time, associates V0 and cascade candidates with their Monte Carlo
//! truth, applies track, topology and event selections, and accumulates
//! the QA histograms into a [`HistogramSink`](strareco_hist::HistogramSink).
//!
//! [`StrangenessQa`] is the single-threaded batch driver;
//! [`ShardedRunner`] spreads independent batches over a worker pool and
//! merges the per-worker registries.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod analysis;
pub mod cascade;
pub mod config;
pub mod error;
pub mod event;
pub mod generated;
pub mod index;
pub mod layout;
pub mod outcome;
pub mod prefilter;
pub mod report;
pub mod sharded;
pub mod status;
pub mod track;
pub mod v0;

pub use analysis::StrangenessQa;
pub use cascade::CascadeCandidateEvaluator;
pub use config::{
    CascadeCuts, ConfigError, EventSelectionConfig, MissingTruthPolicy, ProcessSwitches,
    QaConfig, TrackQualityCuts, V0Cuts,
};
pub use error::QaError;
pub use event::{EventSelectionCounters, EventSelector};
pub use generated::GeneratedSpectrumAccumulator;
pub use index::BatchIndex;
pub use layout::strangeness_registry;
pub use outcome::{CandidateOutcome, CandidateTally};
pub use prefilter::Prefilter;
pub use report::{BatchReport, RunSummary};
pub use sharded::{ShardedOutput, ShardedRunner};
pub use status::{annotate_reconstruction_status, RecoStatusTable};
pub use track::TrackQualityFilter;
pub use v0::V0CandidateEvaluator;
