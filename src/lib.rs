//! State-level operational risk analytics for a national identity program
//!
//! The pipeline ingests cleaned enrolment and update tables, aggregates
//! them to state-month granularity, derives a composite operational risk
//! score, forecasts its near-term trajectory per state, simulates three
//! intervention policies against the forecast, and profiles each state's
//! behavioral "stress genome".
//!
//! Stages are pure functions from immutable input collections to new
//! output collections; all file I/O happens at the binary's stage
//! boundaries.

pub mod config;
pub mod error;
pub mod features;
pub mod forecast;
pub mod genome;
pub mod granular;
pub mod io;
pub mod policy;
pub mod risk;

pub use config::PipelineConfig;
pub use error::PipelineError;
pub use features::{build_state_features, FeatureRow};
pub use forecast::{forecast_state_risk, ForecastOutcome, ForecastRow, MIN_HISTORY_PERIODS};
pub use genome::{assign_archetypes, compute_stress_genome, Archetype, ArchetypeRow, GenomeRow};
pub use granular::{build_granular_dataset, GranularRow};
pub use policy::{apply_policy_scenarios, InterventionFactors, PolicyRow};
pub use risk::{compute_risk_scores, RiskRow};
