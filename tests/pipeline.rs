//! End-to-end pipeline test over a synthetic two-state dataset.

use approx::assert_relative_eq;
use chrono::NaiveDate;
use enrolment_risk_system::io::data::{BiometricRecord, DemographicRecord, EnrolmentRecord};
use enrolment_risk_system::{
    apply_policy_scenarios, assign_archetypes, build_granular_dataset, build_state_features,
    compute_risk_scores, compute_stress_genome, forecast_state_risk, InterventionFactors,
};

fn date(month: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, month, 1).unwrap()
}

/// Seven months of data for a growing state and a flat one, plus one state
/// with too little history and one invalid state name.
fn fixture() -> (
    Vec<EnrolmentRecord>,
    Vec<DemographicRecord>,
    Vec<BiometricRecord>,
) {
    let mut enrolment = Vec::new();
    let mut demographic = Vec::new();
    let mut biometric = Vec::new();

    for month in 1..=7u32 {
        // Rajasthan grows 10% a month from a 1000 base.
        let total = 1000.0 * 1.1f64.powi(month as i32 - 1);
        enrolment.push(EnrolmentRecord {
            state: "Rajasthan".to_string(),
            district: "Jaipur".to_string(),
            pincode: "302001".to_string(),
            date: date(month),
            age_0_5: total * 0.1,
            age_5_17: total * 0.3,
            age_18_greater: total * 0.6,
        });
        demographic.push(DemographicRecord {
            state: "Rajasthan".to_string(),
            district: "Jaipur".to_string(),
            pincode: "302001".to_string(),
            date: date(month),
            demo_age_5_17: 40.0,
            demo_age_17_: 60.0,
        });
        biometric.push(BiometricRecord {
            state: "Rajasthan".to_string(),
            district: "Jaipur".to_string(),
            pincode: "302001".to_string(),
            date: date(month),
            bio_age_5_17: 20.0,
            bio_age_17_: 30.0,
        });

        // Karnataka is perfectly flat with no update activity.
        enrolment.push(EnrolmentRecord {
            state: "Karnataka".to_string(),
            district: "Bengaluru".to_string(),
            pincode: "560001".to_string(),
            date: date(month),
            age_0_5: 200.0,
            age_5_17: 300.0,
            age_18_greater: 500.0,
        });
    }

    // Only three periods: excluded from forecasting, present elsewhere.
    for month in 1..=3u32 {
        enrolment.push(EnrolmentRecord {
            state: "Sikkim".to_string(),
            district: "Gangtok".to_string(),
            pincode: "737101".to_string(),
            date: date(month),
            age_0_5: 10.0,
            age_5_17: 20.0,
            age_18_greater: 30.0,
        });
    }

    // Cleaning artifact; must vanish from every output.
    enrolment.push(EnrolmentRecord {
        state: "110001".to_string(),
        district: "None".to_string(),
        pincode: "110001".to_string(),
        date: date(1),
        age_0_5: 1.0,
        age_5_17: 1.0,
        age_18_greater: 1.0,
    });

    (enrolment, demographic, biometric)
}

#[test]
fn test_full_pipeline_stage_chain() {
    let (enrolment, demographic, biometric) = fixture();

    let features = build_state_features(&enrolment, &demographic, &biometric);

    // 7 Rajasthan + 7 Karnataka + 3 Sikkim rows; the numeric state is gone.
    assert_eq!(features.len(), 17);
    assert!(features.iter().all(|f| f.state != "110001"));

    for row in &features {
        if row.total_enrolment > 0.0 {
            let sum = row.child_ratio.unwrap()
                + row.youth_ratio.unwrap()
                + row.adult_ratio.unwrap();
            assert_relative_eq!(sum, 1.0, epsilon = 1e-9);
        }
    }

    let risk = compute_risk_scores(&features);
    for row in &risk {
        assert!(row.risk_score.is_finite());
        assert!(row.risk_score >= 0.0);
    }

    // Karnataka carries no update activity: risk is pure growth, which is 0.
    let karnataka: Vec<_> = risk.iter().filter(|r| r.state == "Karnataka").collect();
    for row in karnataka {
        assert_relative_eq!(row.risk_score, 0.0, epsilon = 1e-12);
    }

    let outcome = forecast_state_risk(&risk);
    assert_eq!(outcome.forecasts.len(), 2);
    assert_eq!(outcome.excluded.len(), 1);
    assert_eq!(outcome.excluded[0].state, "Sikkim");
    assert_eq!(outcome.excluded[0].periods, 3);

    // Rajasthan's risk dominates Karnataka's zero: worst state first.
    assert_eq!(outcome.forecasts[0].state, "Rajasthan");
    assert!(
        outcome.forecasts[0].predicted_risk_score
            >= outcome.forecasts[1].predicted_risk_score
    );

    let policy = apply_policy_scenarios(&outcome.forecasts, &InterventionFactors::default());
    assert_eq!(policy.len(), 2);
    for row in &policy {
        assert_relative_eq!(
            row.low_intervention,
            row.predicted_risk_score * 0.9,
            max_relative = 1e-12
        );
        assert!(row.low_intervention >= row.medium_intervention);
        assert!(row.medium_intervention >= row.high_intervention);
    }

    let genome = assign_archetypes(compute_stress_genome(&risk));
    assert_eq!(genome.len(), 3);
    for row in &genome {
        assert!(row.growth_volatility.is_finite());
        assert!((0.0..=1.0).contains(&row.growth_volatility));
        assert!((0.0..=1.0).contains(&row.update_burden));
        assert!((0.0..=1.0).contains(&row.age_pressure));
        assert!((0.0..=1.0).contains(&row.recovery_speed));
    }
}

#[test]
fn test_granular_is_independent_of_risk_stages() {
    let (enrolment, demographic, biometric) = fixture();
    let granular = build_granular_dataset(&enrolment, &demographic, &biometric);

    // One row per surviving enrolment record.
    assert_eq!(granular.len(), 17);

    let rajasthan_jan = granular
        .iter()
        .find(|r| r.state == "Rajasthan" && r.date == date(1))
        .unwrap();
    assert_relative_eq!(rajasthan_jan.enrolment, 1000.0, max_relative = 1e-12);
    assert_relative_eq!(rajasthan_jan.demographic, 100.0, max_relative = 1e-12);
    assert_relative_eq!(rajasthan_jan.biometric, 50.0, max_relative = 1e-12);

    // Karnataka never matched an update table: zero-filled, never null.
    let karnataka_jan = granular
        .iter()
        .find(|r| r.state == "Karnataka" && r.date == date(1))
        .unwrap();
    assert_eq!(karnataka_jan.demographic, 0.0);
    assert_eq!(karnataka_jan.biometric, 0.0);
}

#[test]
fn test_outputs_round_trip_through_csv() {
    let (enrolment, demographic, biometric) = fixture();
    let features = build_state_features(&enrolment, &demographic, &biometric);
    let risk = compute_risk_scores(&features);

    let dir = std::env::temp_dir().join(format!(
        "enrolment_risk_system_test_{}",
        std::process::id()
    ));
    let path = dir.join("feature_dataset.csv");
    enrolment_risk_system::io::write_csv(&path, &risk).unwrap();

    let written = std::fs::read_to_string(&path).unwrap();
    let header = written.lines().next().unwrap();
    assert!(header.starts_with("state,date,total_enrolment,monthly_growth"));
    assert_eq!(written.lines().count(), risk.len() + 1);

    std::fs::remove_dir_all(&dir).ok();
}
