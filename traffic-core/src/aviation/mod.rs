//! Aviation data model
//!
//! Value types for the samples that arrive from the network: the callsign that
//! keys every per-aircraft store, position/attitude [`Situation`]s and the
//! discrete configuration carried by [`Parts`].

pub mod parts;
pub mod situation;

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::SampleError;

pub use parts::{Engine, Lights, Parts, MAX_ENGINES};
pub use situation::{GeoPosition, OnGroundHint, Situation};

/// Aircraft callsign, trimmed and upper-cased
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Callsign(String);

impl Callsign {
    /// Create a callsign, rejecting empty or whitespace-only input
    pub fn new(value: &str) -> Result<Self, SampleError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(SampleError::EmptyCallsign);
        }
        Ok(Callsign(trimmed.to_ascii_uppercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Callsign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for Callsign {
    type Error = SampleError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Callsign::new(&value)
    }
}

impl From<Callsign> for String {
    fn from(value: Callsign) -> Self {
        value.0
    }
}
