//! Pincode-level activity dataset for dashboard drill-down
//!
//! A coarser, independent join of the three raw tables at the full
//! (state, district, pincode, date) key. Consumed only by the dashboard;
//! the risk pipeline never reads it.

use crate::features::is_valid_state;
use crate::io::data::{BiometricRecord, DemographicRecord, EnrolmentRecord};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Monthly activity counts for one pincode.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GranularRow {
    pub state: String,
    pub district: String,
    pub pincode: String,
    pub date: NaiveDate,
    pub enrolment: f64,
    pub biometric: f64,
    pub demographic: f64,
}

type RegionKey = (String, String, String, NaiveDate);

/// Left-join update activity onto every enrolment record.
///
/// A pincode-month with no matching update records gets 0, not null.
/// The same state-name cleaning as the feature builder applies, so the
/// drill-down and the risk tables agree on which states exist.
pub fn build_granular_dataset(
    enrolment: &[EnrolmentRecord],
    demographic: &[DemographicRecord],
    biometric: &[BiometricRecord],
) -> Vec<GranularRow> {
    let demo_by_key = index_pressure(
        demographic
            .iter()
            .map(|r| (region_key(&r.state, &r.district, &r.pincode, r.date), r.pressure())),
    );
    let bio_by_key = index_pressure(
        biometric
            .iter()
            .map(|r| (region_key(&r.state, &r.district, &r.pincode, r.date), r.pressure())),
    );

    enrolment
        .iter()
        .filter(|r| is_valid_state(&r.state))
        .map(|r| {
            let key = region_key(&r.state, &r.district, &r.pincode, r.date);
            GranularRow {
                state: r.state.trim().to_string(),
                district: r.district.clone(),
                pincode: r.pincode.clone(),
                date: r.date,
                enrolment: r.total(),
                biometric: bio_by_key.get(&key).copied().unwrap_or(0.0),
                demographic: demo_by_key.get(&key).copied().unwrap_or(0.0),
            }
        })
        .collect()
}

fn region_key(state: &str, district: &str, pincode: &str, date: NaiveDate) -> RegionKey {
    (
        state.trim().to_string(),
        district.to_string(),
        pincode.to_string(),
        date,
    )
}

/// Sum pressures per regional key; duplicate keys accumulate.
fn index_pressure<I>(records: I) -> HashMap<RegionKey, f64>
where
    I: Iterator<Item = (RegionKey, f64)>,
{
    let mut index: HashMap<RegionKey, f64> = HashMap::new();
    for (key, pressure) in records {
        *index.entry(key).or_default() += pressure;
    }
    index
}
