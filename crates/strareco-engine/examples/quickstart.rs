//! Strareco quickstart: QA histograms from synthetic batches.
//!
//! Demonstrates:
//!   1. Loading a `QaConfig` from TOML (or using the defaults)
//!   2. Processing batches serially with `StrangenessQa`
//!   3. Running the same batches through the sharded runner
//!   4. Reading integrals back from the merged registry
//!
//! Run with:
//!   cargo run --example quickstart
//!   RUST_LOG=strareco_engine=debug cargo run --example quickstart

use anyhow::Context;
use strareco_engine::config::QaConfig;
use strareco_engine::layout::{
    generated_histogram, generated_with_pv_histogram, mass_histogram, EVENT_SELECTION,
    EVENT_SELECTION_LABELS,
};
use strareco_engine::{ShardedRunner, StrangenessQa};
use strareco_core::Species;
use strareco_hist::HistogramRegistry;
use strareco_test_utils::SyntheticBatchGenerator;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// ─── Run parameters ─────────────────────────────────────────────

const SEED: u64 = 42;
const BATCHES: usize = 32;

const CONFIG: &str = r#"
max_rapidity = 0.5

[v0]
radius = 1.2
cospa = 0.97

[cascade]
radius = 1.0
"#;

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "strareco_engine=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn print_species(registry: &HistogramRegistry) -> anyhow::Result<()> {
    println!(
        "{:<12} {:>10} {:>12} {:>10} {:>8}",
        "species", "generated", "gen. w/ PV", "mass fills", "eff."
    );
    for species in Species::ALL {
        let integral = |name: &str| -> anyhow::Result<f64> {
            Ok(registry
                .get(name)
                .with_context(|| format!("{name} is not declared"))?
                .integral())
        };
        let generated = integral(generated_histogram(species))?;
        let gen_pv = integral(generated_with_pv_histogram(species))?;
        let reco = integral(mass_histogram(species))?;
        let eff = if gen_pv > 0.0 { reco / gen_pv } else { 0.0 };
        println!(
            "{:<12} {:>10} {:>12} {:>10} {:>8.3}",
            mass_histogram(species).trim_start_matches("h2dMass"),
            generated,
            gen_pv,
            reco,
            eff
        );
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = QaConfig::from_toml_str(CONFIG).context("parsing quickstart config")?;

    // ── Serial ──────────────────────────────────────────────────
    let batches = SyntheticBatchGenerator::new(SEED).batches(BATCHES);
    let mut qa = StrangenessQa::new(config.clone())?;
    for batch in &batches {
        qa.process_batch(batch)?;
    }
    let serial = qa.summary();
    println!(
        "serial: {} batches, {} events, {} V0s and {} cascades selected",
        serial.batches, serial.events.all, serial.v0s.selected, serial.cascades.selected
    );

    // ── Sharded ─────────────────────────────────────────────────
    let runner = ShardedRunner::new(config, None)?;
    let out = runner.run(batches)?;
    anyhow::ensure!(
        &out.registry == qa.registry(),
        "sharded registry differs from the serial one"
    );
    println!(
        "sharded on {} workers: identical registry",
        runner.resolved_worker_count()
    );

    let events = out
        .registry
        .get(EVENT_SELECTION)
        .context("event selection histogram missing")?;
    for (bin, label) in EVENT_SELECTION_LABELS.iter().enumerate() {
        println!("{label:<10} {}", events.bin_content(&[bin + 1]).unwrap_or(0.0));
    }
    println!();
    print_species(&out.registry)
}
