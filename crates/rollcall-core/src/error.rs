//! Error types for availability queries.
//!
//! Callers get one of three distinct failures: the request itself was
//! malformed, the roster could not be loaded, or a lookup matched nobody.

use thiserror::Error;

use crate::source::SourceError;

/// A malformed request, detected before any data is read.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("Unknown day '{0}'; expected Monday through Friday (or Mon..Fri)")]
    UnknownDay(String),

    #[error("Bad {field} time '{value}'; use 3-4 digit 24-hour HHMM such as 0830 or 1730")]
    BadClock { field: &'static str, value: String },

    #[error("Empty time window {start}-{end}; end must be after start")]
    EmptyWindow { start: String, end: String },

    #[error("Empty lookup query")]
    EmptyQuery,
}

#[derive(Error, Debug)]
pub enum AvailabilityError {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error("Roster unavailable: {0}")]
    DataUnavailable(#[from] SourceError),

    #[error("No matching cadet found for '{0}'")]
    NotFound(String),
}

impl AvailabilityError {
    /// True when the caller should fix the request rather than retry.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, AvailabilityError::DataUnavailable(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_error_classification() {
        let input: AvailabilityError = InputError::UnknownDay("Sat".into()).into();
        assert!(input.is_client_error());

        let missing = AvailabilityError::NotFound("nobody".into());
        assert!(missing.is_client_error());

        let upstream: AvailabilityError = SourceError::RateLimited.into();
        assert!(!upstream.is_client_error());
    }

    #[test]
    fn test_messages_carry_offending_value() {
        let err = InputError::BadClock {
            field: "start",
            value: "9am".into(),
        };
        assert!(err.to_string().contains("9am"));
        assert!(err.to_string().contains("start"));
    }
}
