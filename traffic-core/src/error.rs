//! Error types for sample validation

use thiserror::Error;

/// Errors that cause a sample to be rejected before it reaches a buffer
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SampleError {
    /// Latitude, longitude or altitude is NaN or infinite
    #[error("Corrupt sample at {timestamp_ms} ms: non-finite coordinate {field}")]
    NonFiniteCoordinate {
        field: &'static str,
        timestamp_ms: i64,
    },

    /// Heading, pitch or bank is NaN or infinite
    #[error("Corrupt sample at {timestamp_ms} ms: non-finite angle {field}")]
    NonFiniteAngle {
        field: &'static str,
        timestamp_ms: i64,
    },

    /// Any other numeric field (ground speed, elevation) is NaN or infinite
    #[error("Corrupt sample at {timestamp_ms} ms: non-finite value {field}")]
    NonFiniteValue {
        field: &'static str,
        timestamp_ms: i64,
    },

    /// Callsign is empty after trimming
    #[error("Corrupt sample: empty callsign")]
    EmptyCallsign,
}

impl SampleError {
    /// Field name that failed validation, if any
    pub fn field(&self) -> Option<&'static str> {
        match self {
            SampleError::NonFiniteCoordinate { field, .. }
            | SampleError::NonFiniteAngle { field, .. }
            | SampleError::NonFiniteValue { field, .. } => Some(field),
            SampleError::EmptyCallsign => None,
        }
    }
}

/// Check a coordinate field, returning the matching error when it is not finite
pub(crate) fn check_coordinate(
    field: &'static str,
    value: f64,
    timestamp_ms: i64,
) -> Result<(), SampleError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(SampleError::NonFiniteCoordinate {
            field,
            timestamp_ms,
        })
    }
}

pub(crate) fn check_angle(field: &'static str, value: f64, timestamp_ms: i64) -> Result<(), SampleError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(SampleError::NonFiniteAngle {
            field,
            timestamp_ms,
        })
    }
}

pub(crate) fn check_value(field: &'static str, value: f64, timestamp_ms: i64) -> Result<(), SampleError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(SampleError::NonFiniteValue {
            field,
            timestamp_ms,
        })
    }
}
