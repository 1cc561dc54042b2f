//! Error types for georesolve

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GeocodingError {
    // Request validation errors
    #[error("Invalid request: {level} count({parents}) != names count({names})")]
    ParentCountMismatch {
        level: &'static str,
        parents: usize,
        names: usize,
    },

    #[error("Invalid request: countries and scope can't be used simultaneously")]
    CountriesWithScope,

    #[error("{}", not_found_message(.name, .parents))]
    NotFoundInNames { name: String, parents: Vec<String> },

    #[error("'{argument}' has {count} entries, but expected to have exactly 1")]
    ExpectedSingleEntry {
        argument: &'static str,
        count: usize,
    },

    #[error("Too many parent objects. Expected single object instead of {0}")]
    TooManyParents(usize),

    #[error("Ambiguity resolver accepts only one of: ignoring strategy, closest coordinate, box")]
    ConflictingResolver,

    #[error("{0}")]
    MissingArgument(&'static str),

    #[error("Resolution is out of range. Expected to be from (1) to (15), but was ({0}).")]
    ResolutionOutOfRange(i64),

    #[error("Invalid resolution: {0}")]
    InvalidResolution(String),

    // Round-trip outcomes
    #[error("{0}")]
    Ambiguous(String),

    #[error("{0}")]
    Service(String),

    #[error("Geocoding service unavailable: {reason}")]
    Transport { reason: String },

    #[error("Malformed geocoding payload: {0}")]
    Protocol(String),

    #[error("Geocoding response has no {payload} for feature {id}")]
    MissingPayload { id: String, payload: &'static str },

    // Configuration errors
    #[error("Invalid configuration value for {key}: {reason}")]
    Config { key: String, reason: String },
}

fn not_found_message(name: &str, parents: &[String]) -> String {
    if parents.is_empty() {
        format!("{} is not found in names", name)
    } else {
        format!("{}({}) is not found in names", name, parents.join(", "))
    }
}

impl GeocodingError {
    /// True for errors raised before any request reaches the service
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            GeocodingError::ParentCountMismatch { .. }
                | GeocodingError::CountriesWithScope
                | GeocodingError::NotFoundInNames { .. }
                | GeocodingError::ExpectedSingleEntry { .. }
                | GeocodingError::TooManyParents(_)
                | GeocodingError::ConflictingResolver
                | GeocodingError::MissingArgument(_)
                | GeocodingError::ResolutionOutOfRange(_)
                | GeocodingError::InvalidResolution(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, GeocodingError>;
