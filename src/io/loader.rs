//! CSV loaders for the three cleaned input tables
//!
//! Each loader has a `_from_reader` variant so tests can feed in-memory
//! data instead of touching the filesystem. A missing or empty table is a
//! hard failure; the pipeline cannot produce anything useful without all
//! three inputs.

use crate::error::PipelineError;
use crate::io::data::{BiometricRecord, DemographicRecord, EnrolmentRecord};
use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::Read;
use std::path::Path;

pub fn load_enrolment(path: &Path) -> Result<Vec<EnrolmentRecord>, PipelineError> {
    load_enrolment_from_reader(open_input(path)?)
}

pub fn load_enrolment_from_reader<R: Read>(
    reader: R,
) -> Result<Vec<EnrolmentRecord>, PipelineError> {
    read_table(reader, "enrolment")
}

pub fn load_demographic(path: &Path) -> Result<Vec<DemographicRecord>, PipelineError> {
    load_demographic_from_reader(open_input(path)?)
}

pub fn load_demographic_from_reader<R: Read>(
    reader: R,
) -> Result<Vec<DemographicRecord>, PipelineError> {
    read_table(reader, "demographic")
}

pub fn load_biometric(path: &Path) -> Result<Vec<BiometricRecord>, PipelineError> {
    load_biometric_from_reader(open_input(path)?)
}

pub fn load_biometric_from_reader<R: Read>(
    reader: R,
) -> Result<Vec<BiometricRecord>, PipelineError> {
    read_table(reader, "biometric")
}

fn open_input(path: &Path) -> Result<File, PipelineError> {
    if !path.exists() {
        return Err(PipelineError::MissingInput {
            path: path.to_path_buf(),
        });
    }
    Ok(File::open(path)?)
}

fn read_table<R: Read, T: DeserializeOwned>(
    reader: R,
    name: &'static str,
) -> Result<Vec<T>, PipelineError> {
    let mut rdr = csv::Reader::from_reader(reader);
    let mut rows = Vec::new();
    for result in rdr.deserialize() {
        let row: T = result.map_err(|source| PipelineError::Read { name, source })?;
        rows.push(row);
    }
    if rows.is_empty() {
        return Err(PipelineError::EmptyInput { name });
    }
    Ok(rows)
}
