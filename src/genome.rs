//! Stress genome profiling and archetype classification
//!
//! Condenses each state's full risk history into four behavioral
//! dimensions, min-max normalizes them across the run's state set, and
//! thresholds the result into one of four archetypes.
//!
//! The normalization is relative: every dimension is scaled against the
//! states present in the current run, so recomputing over a different state
//! set changes every state's values. That is a property of the design, not
//! a defect; genome outputs from different runs are not comparable.

use crate::risk::RiskRow;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Guard against zero normalization ranges and perfectly flat risk series.
pub const EPSILON: f64 = 1e-6;

/// Normalized-dimension thresholds for archetype assignment.
const VOLATILITY_THRESHOLD: f64 = 0.6;
const BURDEN_THRESHOLD: f64 = 0.6;
const SLOW_RECOVERY_THRESHOLD: f64 = 0.4;
const FAST_RECOVERY_THRESHOLD: f64 = 0.6;

/// Behavioral archetype labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Archetype {
    #[serde(rename = "Volatile Grower")]
    VolatileGrower,
    #[serde(rename = "Structurally Burdened")]
    StructurallyBurdened,
    #[serde(rename = "Resilient High-Load")]
    ResilientHighLoad,
    #[serde(rename = "Stable Low-Risk")]
    StableLowRisk,
}

impl fmt::Display for Archetype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Archetype::VolatileGrower => "Volatile Grower",
            Archetype::StructurallyBurdened => "Structurally Burdened",
            Archetype::ResilientHighLoad => "Resilient High-Load",
            Archetype::StableLowRisk => "Stable Low-Risk",
        };
        f.write_str(label)
    }
}

/// The four stress dimensions for one state, normalized to [0, 1] across
/// the run's state set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenomeRow {
    pub state: String,
    pub growth_volatility: f64,
    pub update_burden: f64,
    pub age_pressure: f64,
    pub recovery_speed: f64,
}

/// A genome row with its archetype label attached.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArchetypeRow {
    pub state: String,
    pub growth_volatility: f64,
    pub update_burden: f64,
    pub age_pressure: f64,
    pub recovery_speed: f64,
    pub archetype: Archetype,
}

/// Compute the normalized stress genome for every state in the risk table.
pub fn compute_stress_genome(risk_rows: &[RiskRow]) -> Vec<GenomeRow> {
    let mut by_state: BTreeMap<&str, Vec<&RiskRow>> = BTreeMap::new();
    for row in risk_rows {
        by_state.entry(row.state.as_str()).or_default().push(row);
    }

    let mut groups: Vec<(&str, Vec<&RiskRow>)> = by_state.into_iter().collect();
    for (_, rows) in groups.iter_mut() {
        rows.sort_by_key(|r| r.date);
    }

    let mut rows: Vec<GenomeRow> = groups
        .par_iter()
        .map(|(state, history)| state_dimensions(state, history))
        .collect();

    normalize(&mut rows);
    rows
}

/// Attach an archetype label to every genome row.
pub fn assign_archetypes(genome: Vec<GenomeRow>) -> Vec<ArchetypeRow> {
    genome
        .into_iter()
        .map(|row| {
            let archetype = classify(&row);
            ArchetypeRow {
                state: row.state,
                growth_volatility: row.growth_volatility,
                update_burden: row.update_burden,
                age_pressure: row.age_pressure,
                recovery_speed: row.recovery_speed,
                archetype,
            }
        })
        .collect()
}

/// Threshold a normalized genome row into an archetype.
///
/// The checks overlap, so evaluation order is part of the contract: a state
/// that is both volatile and burdened classifies as Volatile Grower because
/// that check runs first.
pub fn classify(row: &GenomeRow) -> Archetype {
    if row.growth_volatility > VOLATILITY_THRESHOLD
        && row.recovery_speed < SLOW_RECOVERY_THRESHOLD
    {
        Archetype::VolatileGrower
    } else if row.update_burden > BURDEN_THRESHOLD
        && row.recovery_speed < SLOW_RECOVERY_THRESHOLD
    {
        Archetype::StructurallyBurdened
    } else if row.update_burden > BURDEN_THRESHOLD
        && row.recovery_speed >= FAST_RECOVERY_THRESHOLD
    {
        Archetype::ResilientHighLoad
    } else {
        Archetype::StableLowRisk
    }
}

/// Raw (pre-normalization) dimensions over one state's date-sorted history.
fn state_dimensions(state: &str, history: &[&RiskRow]) -> GenomeRow {
    let growth: Vec<f64> = history.iter().map(|r| r.monthly_growth).collect();
    let growth_volatility = sample_std(&growth);

    let n = history.len() as f64;
    let update_burden = history.iter().map(|r| r.demo_update_pressure).sum::<f64>() / n
        + history.iter().map(|r| r.biometric_update_pressure).sum::<f64>() / n;

    let youth: Vec<f64> = history.iter().filter_map(|r| r.youth_ratio).collect();
    let age_pressure = if youth.is_empty() {
        0.0
    } else {
        youth.iter().sum::<f64>() / youth.len() as f64
    };

    // Mean absolute step between consecutive risk scores; a single-period
    // state has no steps and behaves like a perfectly flat series.
    let mut diff_sum = 0.0;
    let mut diff_count = 0usize;
    for pair in history.windows(2) {
        diff_sum += (pair[1].risk_score - pair[0].risk_score).abs();
        diff_count += 1;
    }
    let mean_abs_diff = if diff_count > 0 {
        diff_sum / diff_count as f64
    } else {
        0.0
    };
    let recovery_speed = 1.0 / (mean_abs_diff + EPSILON);

    GenomeRow {
        state: state.to_string(),
        growth_volatility,
        update_burden,
        age_pressure,
        recovery_speed,
    }
}

/// Sample standard deviation; fewer than two observations yield 0.
fn sample_std(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
    variance.sqrt()
}

/// Min-max scale each dimension to [0, 1] across all states. The ε in the
/// denominator keeps a degenerate dimension (max = min) at ~0 for every
/// state instead of dividing by zero.
fn normalize(rows: &mut [GenomeRow]) {
    type Get = fn(&GenomeRow) -> f64;
    type Set = fn(&mut GenomeRow, f64);
    let dimensions: [(Get, Set); 4] = [
        (|r| r.growth_volatility, |r, v| r.growth_volatility = v),
        (|r| r.update_burden, |r, v| r.update_burden = v),
        (|r| r.age_pressure, |r, v| r.age_pressure = v),
        (|r| r.recovery_speed, |r, v| r.recovery_speed = v),
    ];

    for (get, set) in dimensions {
        let min = rows.iter().map(|r| get(r)).fold(f64::INFINITY, f64::min);
        let max = rows.iter().map(|r| get(r)).fold(f64::NEG_INFINITY, f64::max);
        for row in rows.iter_mut() {
            let scaled = (get(row) - min) / (max - min + EPSILON);
            set(row, scaled);
        }
    }
}
