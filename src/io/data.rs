//! Raw input table row types
//!
//! The three cleaned source tables share the regional key
//! (state, district, pincode, date); dates are monthly granularity.
//! Column names match the cleaned CSV headers exactly.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One enrolment record for a pincode in a month, split by age bracket.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrolmentRecord {
    pub state: String,
    pub district: String,
    pub pincode: String,
    pub date: NaiveDate,
    pub age_0_5: f64,
    pub age_5_17: f64,
    pub age_18_greater: f64,
}

impl EnrolmentRecord {
    /// Total enrolments across all three age brackets.
    pub fn total(&self) -> f64 {
        self.age_0_5 + self.age_5_17 + self.age_18_greater
    }
}

/// One demographic-update record for a pincode in a month.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DemographicRecord {
    pub state: String,
    pub district: String,
    pub pincode: String,
    pub date: NaiveDate,
    pub demo_age_5_17: f64,
    pub demo_age_17_: f64,
}

impl DemographicRecord {
    /// Combined demographic update pressure for this record.
    pub fn pressure(&self) -> f64 {
        self.demo_age_5_17 + self.demo_age_17_
    }
}

/// One biometric-update record for a pincode in a month.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BiometricRecord {
    pub state: String,
    pub district: String,
    pub pincode: String,
    pub date: NaiveDate,
    pub bio_age_5_17: f64,
    pub bio_age_17_: f64,
}

impl BiometricRecord {
    /// Combined biometric update pressure for this record.
    pub fn pressure(&self) -> f64 {
        self.bio_age_5_17 + self.bio_age_17_
    }
}
