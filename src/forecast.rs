//! Per-state risk trend forecasting
//!
//! Fits an independent ordinary-least-squares line over each state's
//! time-ordered risk history and projects one period ahead. States have no
//! cross-dependencies, so the fits run in parallel; a final sort restores
//! the output contract (highest predicted risk first).

use crate::risk::RiskRow;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Minimum number of historical periods a state needs to be forecastable.
pub const MIN_HISTORY_PERIODS: usize = 6;

/// One-step-ahead risk prediction for a state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastRow {
    pub state: String,
    pub predicted_risk_score: f64,
}

/// A state skipped by the forecaster for lack of history. Not an error:
/// callers treat "no forecast for state X" as a normal outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExcludedState {
    pub state: String,
    pub periods: usize,
}

/// Forecast rows plus the states that could not be forecast.
#[derive(Debug, Clone)]
pub struct ForecastOutcome {
    /// One row per eligible state, sorted descending by predicted risk.
    pub forecasts: Vec<ForecastRow>,
    /// States with fewer than [`MIN_HISTORY_PERIODS`] periods, in state order.
    pub excluded: Vec<ExcludedState>,
}

/// Forecast next-period risk for every state with enough history.
pub fn forecast_state_risk(risk_rows: &[RiskRow]) -> ForecastOutcome {
    let mut by_state: BTreeMap<&str, Vec<&RiskRow>> = BTreeMap::new();
    for row in risk_rows {
        by_state.entry(row.state.as_str()).or_default().push(row);
    }

    let mut groups: Vec<(&str, Vec<&RiskRow>)> = by_state.into_iter().collect();
    for (_, rows) in groups.iter_mut() {
        rows.sort_by_key(|r| r.date);
    }

    let fitted: Vec<Result<ForecastRow, ExcludedState>> = groups
        .par_iter()
        .map(|(state, rows)| {
            if rows.len() < MIN_HISTORY_PERIODS {
                return Err(ExcludedState {
                    state: state.to_string(),
                    periods: rows.len(),
                });
            }
            let series: Vec<f64> = rows.iter().map(|r| r.risk_score).collect();
            Ok(ForecastRow {
                state: state.to_string(),
                predicted_risk_score: predict_next(&series),
            })
        })
        .collect();

    let mut forecasts = Vec::new();
    let mut excluded = Vec::new();
    for result in fitted {
        match result {
            Ok(row) => forecasts.push(row),
            Err(skip) => excluded.push(skip),
        }
    }

    // Dashboard contract: worst state first.
    forecasts.sort_by(|a, b| b.predicted_risk_score.total_cmp(&a.predicted_risk_score));

    ForecastOutcome {
        forecasts,
        excluded,
    }
}

/// Least-squares fit of `value ~ index` over a time-ordered series,
/// extrapolated one step past the end.
///
/// Indices are 0..n by construction, strictly increasing, so the fit only
/// degenerates for a single observation (slope 0, predict the mean).
fn predict_next(series: &[f64]) -> f64 {
    let n = series.len() as f64;
    let mean_x = (n - 1.0) / 2.0;
    let mean_y = series.iter().sum::<f64>() / n;

    let mut sxx = 0.0;
    let mut sxy = 0.0;
    for (i, y) in series.iter().enumerate() {
        let dx = i as f64 - mean_x;
        sxx += dx * dx;
        sxy += dx * (y - mean_y);
    }

    let slope = if sxx > 0.0 { sxy / sxx } else { 0.0 };
    let intercept = mean_y - slope * mean_x;
    slope * n + intercept
}
