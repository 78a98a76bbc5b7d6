//! Composite operational risk scoring
//!
//! Combines growth and update-pressure features into one weighted score per
//! state-month row. The weights are fixed, named constants rather than
//! fitted parameters so the score stays auditable by a non-technical
//! administrator.

use crate::features::FeatureRow;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Weight on the absolute monthly growth component.
pub const GROWTH_WEIGHT: f64 = 0.4;
/// Weight on the demographic update pressure ratio.
pub const DEMO_PRESSURE_WEIGHT: f64 = 0.3;
/// Weight on the biometric update pressure ratio.
pub const BIO_PRESSURE_WEIGHT: f64 = 0.3;

/// A feature row with pressure ratios and the composite risk score attached.
///
/// All null-producing inputs are sanitized here: `monthly_growth` and the
/// pressure ratios are plain numbers from this stage on, and `risk_score`
/// is always finite.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskRow {
    pub state: String,
    pub date: NaiveDate,
    pub total_enrolment: f64,
    pub monthly_growth: f64,
    pub child_ratio: Option<f64>,
    pub youth_ratio: Option<f64>,
    pub adult_ratio: Option<f64>,
    pub demo_update_pressure: f64,
    pub biometric_update_pressure: f64,
    pub demo_pressure_ratio: f64,
    pub biometric_pressure_ratio: f64,
    pub risk_score: f64,
}

/// Score every feature row, preserving input order.
pub fn compute_risk_scores(features: &[FeatureRow]) -> Vec<RiskRow> {
    features.iter().map(score_feature).collect()
}

/// Score a single state-month feature row.
///
/// A zero-enrolment period forces both pressure ratios to 0 (not null) so
/// it cannot poison the downstream score; missing growth contributes
/// nothing.
pub fn score_feature(row: &FeatureRow) -> RiskRow {
    let demo_pressure_ratio = pressure_ratio(row.demo_update_pressure, row.total_enrolment);
    let biometric_pressure_ratio =
        pressure_ratio(row.biometric_update_pressure, row.total_enrolment);
    let monthly_growth = row.monthly_growth.unwrap_or(0.0);

    let risk_score = GROWTH_WEIGHT * monthly_growth.abs()
        + DEMO_PRESSURE_WEIGHT * demo_pressure_ratio
        + BIO_PRESSURE_WEIGHT * biometric_pressure_ratio;

    RiskRow {
        state: row.state.clone(),
        date: row.date,
        total_enrolment: row.total_enrolment,
        monthly_growth,
        child_ratio: row.child_ratio,
        youth_ratio: row.youth_ratio,
        adult_ratio: row.adult_ratio,
        demo_update_pressure: row.demo_update_pressure,
        biometric_update_pressure: row.biometric_update_pressure,
        demo_pressure_ratio,
        biometric_pressure_ratio,
        risk_score,
    }
}

fn pressure_ratio(pressure: f64, total_enrolment: f64) -> f64 {
    if total_enrolment > 0.0 {
        pressure / total_enrolment
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn feature(
        total: f64,
        growth: Option<f64>,
        demo_pressure: f64,
        bio_pressure: f64,
    ) -> FeatureRow {
        FeatureRow {
            state: "Maharashtra".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            total_enrolment: total,
            monthly_growth: growth,
            child_ratio: Some(0.1),
            youth_ratio: Some(0.3),
            adult_ratio: Some(0.6),
            demo_update_pressure: demo_pressure,
            biometric_update_pressure: bio_pressure,
        }
    }

    #[test]
    fn test_weighted_score() {
        let row = score_feature(&feature(1000.0, Some(-0.1), 200.0, 100.0));
        assert_relative_eq!(row.demo_pressure_ratio, 0.2, max_relative = 1e-12);
        assert_relative_eq!(row.biometric_pressure_ratio, 0.1, max_relative = 1e-12);
        // 0.4*0.1 + 0.3*0.2 + 0.3*0.1
        assert_relative_eq!(row.risk_score, 0.13, max_relative = 1e-12);
    }

    #[test]
    fn test_zero_enrolment_forces_ratios_to_zero() {
        let row = score_feature(&feature(0.0, None, 500.0, 500.0));
        assert_eq!(row.demo_pressure_ratio, 0.0);
        assert_eq!(row.biometric_pressure_ratio, 0.0);
        assert_eq!(row.risk_score, 0.0);
        assert!(row.risk_score.is_finite());
    }

    #[test]
    fn test_missing_growth_contributes_nothing() {
        let row = score_feature(&feature(1000.0, None, 300.0, 0.0));
        assert_eq!(row.monthly_growth, 0.0);
        assert_relative_eq!(row.risk_score, 0.09, max_relative = 1e-12);
    }

    #[test]
    fn test_score_in_unit_range_for_documented_inputs() {
        // Growth magnitude and pressure ratios each bounded by 1.
        let row = score_feature(&feature(1000.0, Some(1.0), 1000.0, 1000.0));
        assert!(row.risk_score >= 0.0 && row.risk_score <= 1.0);
        assert_relative_eq!(row.risk_score, 1.0, max_relative = 1e-12);
    }
}
