//! Error types for reproducibility code generation.

use thiserror::Error;

/// Errors that can occur while generating a reproducibility script.
#[derive(Debug, Error)]
pub enum ReproError {
    /// A reform date-interval key is not of the form `<start>.<end>`.
    #[error("malformed date interval: {0}")]
    MalformedInterval(String),

    /// A date component could not be read as a calendar date.
    #[error("invalid date: {0}")]
    InvalidDate(String),

    /// Household scope was requested without a household.
    #[error("household scope requires household input")]
    HouseholdMissing,

    /// The household structure is not a map of entity groups.
    #[error("invalid household: {0}")]
    InvalidHousehold(String),

    /// The household normaliser rejected its input.
    #[error("household normalisation failed: {0}")]
    Normalisation(String),

    /// Rendering the situation literal failed.
    #[error("serialization failed: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for ReproError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Convenience result type for reproducibility code generation.
pub type ReproResult<T> = Result<T, ReproError>;
