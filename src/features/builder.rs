//! State-month feature builder
//!
//! Converts raw per-pincode records into one feature row per (state, date):
//! enrolment totals and growth, age-composition ratios, and demographic/
//! biometric update pressures. Growth and ratio columns stay null where the
//! data cannot support them (first period, zero enrolment); the risk scorer
//! sanitizes them later.

use crate::features::validity::is_valid_state;
use crate::io::data::{BiometricRecord, DemographicRecord, EnrolmentRecord};
use chrono::NaiveDate;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One aggregated feature row per (state, date).
///
/// Invariant: `child_ratio + youth_ratio + adult_ratio` is approximately 1
/// for any bucket whose underlying rows all had positive enrolment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureRow {
    pub state: String,
    pub date: NaiveDate,
    pub total_enrolment: f64,
    /// Fractional change versus the preceding period; `None` for the first
    /// period of a state.
    pub monthly_growth: Option<f64>,
    pub child_ratio: Option<f64>,
    pub youth_ratio: Option<f64>,
    pub adult_ratio: Option<f64>,
    pub demo_update_pressure: f64,
    pub biometric_update_pressure: f64,
}

/// Per-record enrolment derivations before aggregation.
struct DerivedEnrolment {
    state: String,
    date: NaiveDate,
    total: f64,
    growth: Option<f64>,
    child_ratio: Option<f64>,
    youth_ratio: Option<f64>,
    adult_ratio: Option<f64>,
}

/// Running sums for one (state, date) bucket. Growth and ratios are averaged
/// over the sub-regional rows that carry a value; totals are summed.
#[derive(Default)]
struct Bucket {
    total: f64,
    growth: MeanAccumulator,
    child_ratio: MeanAccumulator,
    youth_ratio: MeanAccumulator,
    adult_ratio: MeanAccumulator,
}

#[derive(Default)]
struct MeanAccumulator {
    sum: f64,
    count: usize,
}

impl MeanAccumulator {
    fn push(&mut self, value: Option<f64>) {
        if let Some(v) = value {
            self.sum += v;
            self.count += 1;
        }
    }

    /// Mean of the observed values; `None` when nothing was observed.
    fn mean(&self) -> Option<f64> {
        if self.count == 0 {
            None
        } else {
            Some(self.sum / self.count as f64)
        }
    }
}

/// Build the state-month feature table from the three raw tables.
///
/// Records with invalid state names are dropped before any aggregation.
/// Update pressures are left-joined onto the enrolment aggregate; a
/// (state, date) bucket with no matching update records gets pressure 0.
pub fn build_state_features(
    enrolment: &[EnrolmentRecord],
    demographic: &[DemographicRecord],
    biometric: &[BiometricRecord],
) -> Vec<FeatureRow> {
    let derived = derive_enrolment(enrolment);

    let mut buckets: BTreeMap<(String, NaiveDate), Bucket> = BTreeMap::new();
    for row in &derived {
        let bucket = buckets
            .entry((row.state.clone(), row.date))
            .or_default();
        bucket.total += row.total;
        bucket.growth.push(row.growth);
        bucket.child_ratio.push(row.child_ratio);
        bucket.youth_ratio.push(row.youth_ratio);
        bucket.adult_ratio.push(row.adult_ratio);
    }

    let demo_pressure = sum_pressure(demographic.iter().map(|r| (r.state.as_str(), r.date, r.pressure())));
    let bio_pressure = sum_pressure(biometric.iter().map(|r| (r.state.as_str(), r.date, r.pressure())));

    buckets
        .into_iter()
        .map(|((state, date), bucket)| {
            let key = (state.clone(), date);
            FeatureRow {
                state,
                date,
                total_enrolment: bucket.total,
                monthly_growth: bucket.growth.mean(),
                child_ratio: bucket.child_ratio.mean(),
                youth_ratio: bucket.youth_ratio.mean(),
                adult_ratio: bucket.adult_ratio.mean(),
                demo_update_pressure: demo_pressure.get(&key).copied().unwrap_or(0.0),
                biometric_update_pressure: bio_pressure.get(&key).copied().unwrap_or(0.0),
            }
        })
        .collect()
}

/// Per-record totals, age ratios, and growth versus the preceding row of the
/// same state after sorting by (state, date). Ratios are `None` when a record
/// has zero enrolment; growth is `None` for the first row of a state or when
/// the preceding total is zero.
fn derive_enrolment(enrolment: &[EnrolmentRecord]) -> Vec<DerivedEnrolment> {
    let before = enrolment.len();
    let mut records: Vec<&EnrolmentRecord> = enrolment
        .iter()
        .filter(|r| is_valid_state(&r.state))
        .collect();
    if records.len() < before {
        debug!(
            "dropped {} enrolment rows with invalid state names",
            before - records.len()
        );
    }

    records.sort_by(|a, b| {
        (a.state.trim(), a.date).cmp(&(b.state.trim(), b.date))
    });

    let mut derived = Vec::with_capacity(records.len());
    let mut prev: Option<(&str, f64)> = None;
    for record in records {
        let state = record.state.trim();
        let total = record.total();

        let growth = match prev {
            Some((prev_state, prev_total)) if prev_state == state && prev_total > 0.0 => {
                Some((total - prev_total) / prev_total)
            }
            _ => None,
        };
        prev = Some((state, total));

        let ratio = |bracket: f64| {
            if total > 0.0 {
                Some(bracket / total)
            } else {
                None
            }
        };

        derived.push(DerivedEnrolment {
            state: state.to_string(),
            date: record.date,
            total,
            growth,
            child_ratio: ratio(record.age_0_5),
            youth_ratio: ratio(record.age_5_17),
            adult_ratio: ratio(record.age_18_greater),
        });
    }

    derived
}

/// Sum pressures into (state, date) buckets, skipping invalid states.
fn sum_pressure<'a, I>(records: I) -> BTreeMap<(String, NaiveDate), f64>
where
    I: Iterator<Item = (&'a str, NaiveDate, f64)>,
{
    let mut sums: BTreeMap<(String, NaiveDate), f64> = BTreeMap::new();
    for (state, date, pressure) in records {
        if !is_valid_state(state) {
            continue;
        }
        *sums.entry((state.trim().to_string(), date)).or_default() += pressure;
    }
    sums
}
