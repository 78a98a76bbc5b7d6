//! Intervention policy simulation
//!
//! Applies fixed multiplicative damping factors to each state's forecasted
//! risk to produce what-if outcomes for three intervention intensities.
//! Pure and deterministic: no state, no side effects.

use crate::forecast::ForecastRow;
use serde::{Deserialize, Serialize};

/// Damping factors for the three intervention intensities.
///
/// Each factor is the share of forecast risk that remains after the
/// intervention: light outreach keeps 90%, targeted intervention 70%, full
/// mobilization 50%. Callers may override them for scenario analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterventionFactors {
    #[serde(default = "default_low")]
    pub low: f64,
    #[serde(default = "default_medium")]
    pub medium: f64,
    #[serde(default = "default_high")]
    pub high: f64,
}

fn default_low() -> f64 {
    0.90
}
fn default_medium() -> f64 {
    0.70
}
fn default_high() -> f64 {
    0.50
}

impl Default for InterventionFactors {
    fn default() -> Self {
        Self {
            low: 0.90,
            medium: 0.70,
            high: 0.50,
        }
    }
}

/// A forecast row with the three simulated intervention outcomes attached.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicyRow {
    pub state: String,
    pub predicted_risk_score: f64,
    pub low_intervention: f64,
    pub medium_intervention: f64,
    pub high_intervention: f64,
}

/// Simulate the three intervention scenarios over each forecast row,
/// preserving input order (worst state first, per the forecaster contract).
pub fn apply_policy_scenarios(
    forecasts: &[ForecastRow],
    factors: &InterventionFactors,
) -> Vec<PolicyRow> {
    forecasts
        .iter()
        .map(|row| PolicyRow {
            state: row.state.clone(),
            predicted_risk_score: row.predicted_risk_score,
            low_intervention: row.predicted_risk_score * factors.low,
            medium_intervention: row.predicted_risk_score * factors.medium,
            high_intervention: row.predicted_risk_score * factors.high,
        })
        .collect()
}
