//! Pipeline error taxonomy
//!
//! The only surfaced failure is unusable input: a required table that is
//! missing, unreadable, or empty. Insufficient history, zero denominators
//! and degenerate normalization are ordinary outcomes handled inside the
//! stage that produces them.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("required input table not found: {path}")]
    MissingInput { path: PathBuf },

    #[error("input table '{name}' is empty; the pipeline needs at least one row")]
    EmptyInput { name: &'static str },

    #[error("failed to read table '{name}'")]
    Read {
        name: &'static str,
        #[source]
        source: csv::Error,
    },

    #[error("failed to write {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
