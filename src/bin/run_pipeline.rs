//! Run the full analytical pipeline over the cleaned input tables.
//!
//! Loads the three raw tables, writes the granular drill-down dataset,
//! builds the state-month feature/risk table, forecasts per-state risk,
//! simulates the intervention scenarios, and profiles the stress genome.
//! A full run recomputes everything; there is no incremental mode.

use anyhow::{Context, Result};
use clap::Parser;
use enrolment_risk_system::io::{load_biometric, load_demographic, load_enrolment, write_csv};
use enrolment_risk_system::{
    apply_policy_scenarios, assign_archetypes, build_granular_dataset, build_state_features,
    compute_risk_scores, compute_stress_genome, forecast_state_risk, InterventionFactors,
    PipelineConfig, MIN_HISTORY_PERIODS,
};
use log::{info, warn};
use std::fs;
use std::path::PathBuf;
use std::time::Instant;

/// State-level operational risk pipeline for identity enrolment data.
#[derive(Debug, Parser)]
#[command(name = "run_pipeline")]
struct Args {
    /// Directory holding enrolment_clean.csv, demographic_clean.csv and
    /// biometric_clean.csv
    #[arg(long, default_value = "data/processed")]
    input_dir: PathBuf,

    /// Directory for the granular and feature/risk tables
    #[arg(long, default_value = "data/processed")]
    processed_dir: PathBuf,

    /// Directory for the final policy and genome tables
    #[arg(long, default_value = "results")]
    results_dir: PathBuf,

    /// JSON file overriding the intervention factors, e.g.
    /// {"low": 0.95, "medium": 0.75, "high": 0.55}
    #[arg(long)]
    factors: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let factors = match &args.factors {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading factor override {}", path.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("parsing factor override {}", path.display()))?
        }
        None => InterventionFactors::default(),
    };

    let config = PipelineConfig {
        input_dir: args.input_dir,
        processed_dir: args.processed_dir,
        results_dir: args.results_dir,
        factors,
    };

    run(&config)
}

fn run(config: &PipelineConfig) -> Result<()> {
    let start = Instant::now();

    info!("loading input tables from {}", config.input_dir.display());
    let enrolment = load_enrolment(&config.enrolment_path())?;
    let demographic = load_demographic(&config.demographic_path())?;
    let biometric = load_biometric(&config.biometric_path())?;
    info!(
        "loaded {} enrolment / {} demographic / {} biometric rows",
        enrolment.len(),
        demographic.len(),
        biometric.len()
    );

    // Granular drill-down table: independent of the risk stages.
    let granular = build_granular_dataset(&enrolment, &demographic, &biometric);
    write_csv(&config.granular_path(), &granular)?;
    info!(
        "granular activity table: {} rows -> {}",
        granular.len(),
        config.granular_path().display()
    );

    // Feature construction and risk scoring.
    let features = build_state_features(&enrolment, &demographic, &biometric);
    let risk = compute_risk_scores(&features);
    let states = risk
        .iter()
        .map(|r| r.state.as_str())
        .collect::<std::collections::BTreeSet<_>>()
        .len();
    write_csv(&config.feature_path(), &risk)?;
    info!(
        "feature/risk table: {} state-month rows across {} states -> {}",
        risk.len(),
        states,
        config.feature_path().display()
    );

    // Forecasting and policy simulation.
    let outcome = forecast_state_risk(&risk);
    for skipped in &outcome.excluded {
        warn!(
            "no forecast for {}: {} of {} required periods",
            skipped.state, skipped.periods, MIN_HISTORY_PERIODS
        );
    }
    let policy = apply_policy_scenarios(&outcome.forecasts, &config.factors);
    write_csv(&config.policy_path(), &policy)?;
    info!(
        "policy table: {} forecastable states ({} excluded) -> {}",
        policy.len(),
        outcome.excluded.len(),
        config.policy_path().display()
    );

    // Stress genome profiling.
    let genome = assign_archetypes(compute_stress_genome(&risk));
    write_csv(&config.genome_path(), &genome)?;
    info!(
        "stress genome table: {} states -> {}",
        genome.len(),
        config.genome_path().display()
    );

    println!("Pipeline completed in {:?}", start.elapsed());
    Ok(())
}
