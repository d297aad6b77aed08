//! Benchmark profiles and utilities for the strareco QA pipeline.
//!
//! Provides pre-built [`SyntheticProfile`]s for benchmarking:
//!
//! - [`reference_profile`]: 64 simulated collisions per batch, default rates
//! - [`stress_profile`]: 512 simulated collisions per batch, dense candidates
//! - [`reference_batches`]: deterministic batches for a given seed

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use strareco_core::StrangenessTables;
use strareco_engine::QaConfig;
use strareco_test_utils::{SyntheticBatchGenerator, SyntheticProfile};

/// Reference batch shape: 64 simulated collisions, 6 strange particles each.
pub fn reference_profile() -> SyntheticProfile {
    SyntheticProfile {
        sim_collisions: 64,
        ..SyntheticProfile::default()
    }
}

/// Stress batch shape: 512 simulated collisions with every strange
/// particle producing a candidate.
pub fn stress_profile() -> SyntheticProfile {
    SyntheticProfile {
        sim_collisions: 512,
        strange_per_collision: 12,
        background_per_collision: 8,
        candidate_efficiency: 1.0,
        ..SyntheticProfile::default()
    }
}

/// `n` reference batches generated from `seed`.
pub fn reference_batches(seed: u64, n: usize) -> Vec<StrangenessTables> {
    SyntheticBatchGenerator::with_profile(seed, reference_profile()).batches(n)
}

/// `n` stress batches generated from `seed`.
pub fn stress_batches(seed: u64, n: usize) -> Vec<StrangenessTables> {
    SyntheticBatchGenerator::with_profile(seed, stress_profile()).batches(n)
}

/// QA configuration used by every benchmark: defaults with the
/// prefilter enabled, as in production skims.
pub fn bench_config() -> QaConfig {
    QaConfig {
        apply_prefilter: true,
        ..QaConfig::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bench_config_validates() {
        bench_config().validate().unwrap();
    }

    #[test]
    fn reference_batches_are_deterministic() {
        let a = reference_batches(42, 2);
        let b = reference_batches(42, 2);
        assert_eq!(a, b);
        assert_eq!(a[0].sim_collisions.len(), 64);
    }

    #[test]
    fn stress_batches_are_larger() {
        let reference = reference_batches(7, 1);
        let stress = stress_batches(7, 1);
        assert!(stress[0].mc_particles.len() > reference[0].mc_particles.len());
    }
}
