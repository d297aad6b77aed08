//! Integration test: the sharded runner reproduces the serial result.
//!
//! Histograms are sums of per-batch contributions, so distributing
//! batches over any number of workers and merging must give exactly the
//! registry and totals of one `StrangenessQa` processing them in order.

use proptest::prelude::*;
use strareco_core::StrangenessTables;
use strareco_engine::config::{MissingTruthPolicy, QaConfig};
use strareco_engine::{QaError, ShardedRunner, StrangenessQa};
use strareco_test_utils::{SyntheticBatchGenerator, SyntheticProfile};

fn serial(config: &QaConfig, batches: &[StrangenessTables]) -> StrangenessQa {
    let mut qa = StrangenessQa::new(config.clone()).unwrap();
    for batch in batches {
        qa.process_batch(batch).unwrap();
    }
    qa
}

fn small_profile() -> SyntheticProfile {
    SyntheticProfile {
        sim_collisions: 6,
        strange_per_collision: 4,
        background_per_collision: 2,
        ..SyntheticProfile::default()
    }
}

#[test]
fn four_workers_match_serial() {
    let batches = SyntheticBatchGenerator::new(2024).batches(12);
    let config = QaConfig::default();
    let expected = serial(&config, &batches);

    let out = ShardedRunner::new(config, Some(4))
        .unwrap()
        .run(batches)
        .unwrap();

    assert_eq!(&out.registry, expected.registry());
    assert_eq!(out.summary, expected.summary());
    assert_eq!(out.summary.batches, 12);
}

#[test]
fn more_workers_than_batches() {
    let batches = SyntheticBatchGenerator::new(5).batches(2);
    let config = QaConfig::default();
    let expected = serial(&config, &batches);

    let out = ShardedRunner::new(config, Some(8))
        .unwrap()
        .run(batches)
        .unwrap();
    assert_eq!(&out.registry, expected.registry());
}

#[test]
fn malformed_batch_fails_the_run() {
    let mut batches = SyntheticBatchGenerator::new(9).batches(4);
    let victim = batches[2]
        .tracks
        .first()
        .map(|t| t.id)
        .expect("synthetic batch has tracks");
    let duplicate = batches[2].tracks[0].clone();
    batches[2].tracks.push(duplicate);
    let out = ShardedRunner::new(QaConfig::default(), Some(2))
        .unwrap()
        .run(batches);
    match out {
        Err(QaError::Data(strareco_core::DataError::DuplicateId { table, id })) => {
            assert_eq!(table, "tracks");
            assert_eq!(id, victim.0);
        }
        other => panic!("expected DuplicateId, got {other:?}"),
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(12))]

    #[test]
    fn result_is_independent_of_worker_count(
        seed in any::<u64>(),
        n_batches in 0usize..10,
        workers in 1usize..6,
        abort in any::<bool>(),
        prefilter in any::<bool>(),
    ) {
        let batches = SyntheticBatchGenerator::with_profile(seed, small_profile()).batches(n_batches);
        let config = QaConfig {
            missing_cascade_truth: if abort {
                MissingTruthPolicy::AbortEvent
            } else {
                MissingTruthPolicy::Skip
            },
            apply_prefilter: prefilter,
            ..QaConfig::default()
        };
        let expected = serial(&config, &batches);

        let out = ShardedRunner::new(config, Some(workers))
            .unwrap()
            .run(batches)
            .unwrap();
        prop_assert_eq!(&out.registry, expected.registry());
        prop_assert_eq!(out.summary, expected.summary());
    }
}
