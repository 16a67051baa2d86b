//! Error types for baseload

use thiserror::Error;

/// Errors produced while parsing one client record from a flat-file line.
///
/// Parsing is strict: the first malformed field aborts the whole record,
/// so a `ParseError` always means the record was discarded.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("expected {expected} fields, got {actual}")]
    FieldCount { expected: usize, actual: usize },

    #[error("invalid date: {0}")]
    Date(#[from] chrono::ParseError),

    #[error("invalid amount: {0}")]
    Amount(#[from] std::num::ParseFloatError),
}
