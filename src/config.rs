//! Pipeline configuration
//!
//! Every file location and tunable is passed explicitly into the stage that
//! needs it; nothing is resolved from ambient process state. This keeps the
//! pipeline runnable against temporary-directory fixtures in tests.

use crate::policy::InterventionFactors;
use std::path::PathBuf;

/// File name of the cleaned enrolment table inside the input directory.
pub const ENROLMENT_FILE: &str = "enrolment_clean.csv";
/// File name of the cleaned demographic-update table.
pub const DEMOGRAPHIC_FILE: &str = "demographic_clean.csv";
/// File name of the cleaned biometric-update table.
pub const BIOMETRIC_FILE: &str = "biometric_clean.csv";

/// Pincode-level activity table consumed by the dashboard drill-down.
pub const GRANULAR_FILE: &str = "granular_uidai.csv";
/// State-month feature/risk table.
pub const FEATURE_FILE: &str = "feature_dataset.csv";
/// Final policy-scenario table, the dashboard's primary risk source.
pub const POLICY_FILE: &str = "final_policy_output.csv";
/// Per-state stress genome and archetype table.
pub const GENOME_FILE: &str = "stress_genome_output.csv";

/// All paths and parameters for one pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Directory holding the three cleaned input tables.
    pub input_dir: PathBuf,
    /// Directory for intermediate outputs (granular + feature/risk tables).
    pub processed_dir: PathBuf,
    /// Directory for the final policy and genome tables.
    pub results_dir: PathBuf,
    /// Damping factors used by the policy simulator.
    pub factors: InterventionFactors,
}

impl PipelineConfig {
    /// Configuration with default intervention factors.
    pub fn new(input_dir: PathBuf, processed_dir: PathBuf, results_dir: PathBuf) -> Self {
        Self {
            input_dir,
            processed_dir,
            results_dir,
            factors: InterventionFactors::default(),
        }
    }

    pub fn enrolment_path(&self) -> PathBuf {
        self.input_dir.join(ENROLMENT_FILE)
    }

    pub fn demographic_path(&self) -> PathBuf {
        self.input_dir.join(DEMOGRAPHIC_FILE)
    }

    pub fn biometric_path(&self) -> PathBuf {
        self.input_dir.join(BIOMETRIC_FILE)
    }

    pub fn granular_path(&self) -> PathBuf {
        self.processed_dir.join(GRANULAR_FILE)
    }

    pub fn feature_path(&self) -> PathBuf {
        self.processed_dir.join(FEATURE_FILE)
    }

    pub fn policy_path(&self) -> PathBuf {
        self.results_dir.join(POLICY_FILE)
    }

    pub fn genome_path(&self) -> PathBuf {
        self.results_dir.join(GENOME_FILE)
    }
}
