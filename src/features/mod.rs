//! Feature construction: state-month aggregation of raw activity records

mod builder;
pub mod validity;

pub use builder::{build_state_features, FeatureRow};
pub use validity::is_valid_state;
