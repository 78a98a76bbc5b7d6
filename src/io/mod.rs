//! Raw table row types, CSV loaders, and output writers

pub mod data;
pub mod loader;
pub mod writer;

pub use data::{BiometricRecord, DemographicRecord, EnrolmentRecord};
pub use loader::{
    load_biometric, load_biometric_from_reader, load_demographic, load_demographic_from_reader,
    load_enrolment, load_enrolment_from_reader,
};
pub use writer::write_csv;
