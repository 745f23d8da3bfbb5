use thiserror::Error;

/// Malformed-input failures surfaced at the system boundary.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("invalid date: {0}")]
    InvalidDate(String),

    #[error("missing required field: {0}")]
    MissingField(&'static str),
}
