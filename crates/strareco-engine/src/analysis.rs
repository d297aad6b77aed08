//! The batch driver tying every QA component together.
//!
//! [`StrangenessQa`] owns the configuration, the event selector and the
//! histogram sink. Each call to [`process_batch`](StrangenessQa::process_batch)
//! runs, in order:
//!
//! 1. **Index**: build and validate a [`BatchIndex`]; a malformed batch is
//!    rejected here, before any histogram is filled.
//! 2. **Annotate**: flag the simulated collisions that were reconstructed.
//! 3. **Reconstructed pass**: gate each reconstructed collision through the
//!    [`EventSelector`], then evaluate its V0s and cascades. The
//!    event-selection counters are emitted once at the end of the pass.
//! 4. **Generated passes**: the reconstructible and pure generated spectra.
//!
//! Each pass can be switched off through [`ProcessSwitches`](crate::config::ProcessSwitches).

use strareco_core::StrangenessTables;
use strareco_hist::{HistogramRegistry, HistogramSink};
use tracing::debug;

use crate::cascade::CascadeCandidateEvaluator;
use crate::config::QaConfig;
use crate::error::QaError;
use crate::event::EventSelector;
use crate::generated::GeneratedSpectrumAccumulator;
use crate::index::BatchIndex;
use crate::layout::strangeness_registry;
use crate::report::{BatchReport, RunSummary};
use crate::status::{annotate_reconstruction_status, reconstructed_set};
use crate::v0::V0CandidateEvaluator;

/// Strangeness reconstruction QA over a stream of batches.
///
/// The sink is written to but never read back, so any
/// [`HistogramSink`] works; the default is the in-memory
/// [`HistogramRegistry`] pre-declared by [`strangeness_registry`].
#[derive(Debug)]
pub struct StrangenessQa<S = HistogramRegistry> {
    config: QaConfig,
    events: EventSelector,
    v0s: V0CandidateEvaluator,
    cascades: CascadeCandidateEvaluator,
    generated: GeneratedSpectrumAccumulator,
    sink: S,
    summary: RunSummary,
}

impl StrangenessQa<HistogramRegistry> {
    /// Validate `config` and start with an empty, fully declared registry.
    pub fn new(config: QaConfig) -> Result<Self, QaError> {
        let registry = strangeness_registry()?;
        Self::with_sink(config, registry)
    }

    /// The accumulated histograms.
    pub fn registry(&self) -> &HistogramRegistry {
        &self.sink
    }
}

impl<S: HistogramSink> StrangenessQa<S> {
    /// Validate `config` and fill into `sink`.
    ///
    /// The sink must accept every name declared by [`strangeness_registry`].
    pub fn with_sink(config: QaConfig, sink: S) -> Result<Self, QaError> {
        config.validate()?;
        Ok(Self {
            events: EventSelector::new(config.event),
            v0s: V0CandidateEvaluator::new(&config),
            cascades: CascadeCandidateEvaluator::new(&config),
            generated: GeneratedSpectrumAccumulator::new(config.max_rapidity),
            config,
            sink,
            summary: RunSummary::default(),
        })
    }

    /// The active configuration.
    pub fn config(&self) -> &QaConfig {
        &self.config
    }

    /// Totals over every batch processed so far.
    pub fn summary(&self) -> RunSummary {
        self.summary
    }

    /// The sink being filled.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Consume the driver and return its sink.
    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Process one batch.
    ///
    /// A [`QaError::Data`] leaves the sink untouched. A sink error may
    /// leave the batch partially accumulated.
    pub fn process_batch(&mut self, tables: &StrangenessTables) -> Result<BatchReport, QaError> {
        let index = BatchIndex::build(tables)?;
        let mut report = BatchReport {
            reco_status: annotate_reconstruction_status(&tables.sim_collisions, &tables.collisions),
            ..BatchReport::default()
        };

        let process = self.config.process;
        if process.reconstructed {
            for (pos, collision) in tables.collisions.iter().enumerate() {
                if !self.events.select(collision) {
                    continue;
                }
                let pv = collision.position;
                self.v0s
                    .evaluate_event(pos, pv, &index, &mut self.sink, &mut report.v0s)?;
                self.cascades.evaluate_event(
                    pos,
                    pv,
                    &index,
                    &mut self.sink,
                    &mut report.cascades,
                )?;
            }
            report.events = self.events.emit(&mut self.sink)?;
        }

        if process.generated_reconstructible {
            let reconstructed = reconstructed_set(&report.reco_status);
            report.generated_reconstructible = self.generated.fill_reconstructible(
                &tables.mc_particles,
                &reconstructed,
                &mut self.sink,
            )?;
        }

        if process.pure_generated {
            report.generated_pure = self
                .generated
                .fill_pure(&tables.mc_particles, &mut self.sink)?;
        }

        debug!(
            "batch done: {} events ({} selected), v0s {}/{} selected, cascades {}/{} selected, generated {} pure / {} reconstructible",
            report.events.all,
            report.events.passed_vertex_z,
            report.v0s.selected,
            report.v0s.evaluated,
            report.cascades.selected,
            report.cascades.evaluated,
            report.generated_pure,
            report.generated_reconstructible,
        );

        self.summary.absorb_report(&report);
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProcessSwitches;
    use crate::layout::EVENT_SELECTION;
    use strareco_core::{
        CollisionId, DataError, McParticle, McParticleId, ReconstructedCollision, SimCollisionId,
        SimulatedCollision, TrackId, V0Candidate, V0Id, Vec3,
    };

    fn generated_only() -> StrangenessTables {
        let particle = |id: u32, y: f32| McParticle {
            id: McParticleId(id),
            pdg_code: 3122,
            rapidity: y,
            pt: 1.2,
            sim_collision: SimCollisionId(0),
        };
        StrangenessTables {
            sim_collisions: vec![SimulatedCollision {
                id: SimCollisionId(0),
                position: Vec3::default(),
            }],
            mc_particles: vec![particle(0, 0.1), particle(1, 0.3), particle(2, 0.9)],
            ..StrangenessTables::default()
        }
    }

    #[test]
    fn invalid_config_is_rejected() {
        let mut config = QaConfig::default();
        config.v0.cospa = 2.0;
        assert!(matches!(
            StrangenessQa::new(config),
            Err(QaError::Config(_))
        ));
    }

    #[test]
    fn generated_passes_without_reconstruction() {
        let mut qa = StrangenessQa::new(QaConfig::default()).unwrap();
        let report = qa.process_batch(&generated_only()).unwrap();
        assert_eq!(report.generated_pure, 2);
        assert_eq!(report.generated_reconstructible, 0);
        assert_eq!(report.reco_status.flags(), &[false]);
        assert_eq!(qa.registry().get("hGenLambda").unwrap().integral(), 2.0);
        assert_eq!(qa.registry().get("hGenWithPVLambda").unwrap().integral(), 0.0);
    }

    #[test]
    fn process_switches_disable_passes() {
        let config = QaConfig {
            process: ProcessSwitches {
                pure_generated: false,
                ..ProcessSwitches::default()
            },
            ..QaConfig::default()
        };
        let mut qa = StrangenessQa::new(config).unwrap();
        let report = qa.process_batch(&generated_only()).unwrap();
        assert_eq!(report.generated_pure, 0);
        assert_eq!(qa.registry().total_entries(), 3);
    }

    #[test]
    fn event_counters_are_emitted_per_batch() {
        let mut tables = generated_only();
        tables.collisions = vec![
            ReconstructedCollision {
                id: CollisionId(0),
                position: Vec3::new(0.0, 0.0, 3.0),
                sel8: true,
                sim_collision: Some(SimCollisionId(0)),
            },
            ReconstructedCollision {
                id: CollisionId(1),
                position: Vec3::new(0.0, 0.0, 30.0),
                sel8: true,
                sim_collision: None,
            },
        ];
        let mut qa = StrangenessQa::new(QaConfig::default()).unwrap();
        let report = qa.process_batch(&tables).unwrap();
        assert_eq!(report.events.all, 2);
        assert_eq!(report.events.passed_vertex_z, 1);
        assert_eq!(report.generated_reconstructible, 2);

        qa.process_batch(&tables).unwrap();
        let h = qa.registry().get(EVENT_SELECTION).unwrap();
        assert_eq!(h.bin_content(&[1]), Some(4.0));
        assert_eq!(h.bin_content(&[3]), Some(2.0));
        assert_eq!(qa.summary().batches, 2);
        assert_eq!(qa.summary().events.all, 4);
    }

    #[test]
    fn malformed_batch_fills_nothing() {
        let mut tables = generated_only();
        tables.collisions.push(ReconstructedCollision {
            id: CollisionId(0),
            position: Vec3::default(),
            sel8: true,
            sim_collision: None,
        });
        tables.v0s.push(V0Candidate {
            id: V0Id(0),
            collision: CollisionId(0),
            decay_vertex: Vec3::new(1.0, 0.0, 0.0),
            momentum: Vec3::new(1.0, 0.0, 0.0),
            dca_v0_daughters: 0.1,
            dca_pos_to_pv: 0.2,
            dca_neg_to_pv: 0.2,
            m_k0short: 0.5,
            m_lambda: 1.1,
            m_antilambda: 1.1,
            pos_track: TrackId(0),
            neg_track: TrackId(1),
            mc_particle: None,
        });
        let mut qa = StrangenessQa::new(QaConfig::default()).unwrap();
        let err = qa.process_batch(&tables).unwrap_err();
        assert!(matches!(
            err,
            QaError::Data(DataError::UnknownTrack { .. })
        ));
        assert_eq!(qa.registry().total_entries(), 0);
        assert_eq!(qa.summary().batches, 0);
    }
}
