//! Interpolation setup
//!
//! One global [`InterpolationSetup`] applies to every aircraft; individual
//! callsigns can carry an override. Setups are plain values, read once per
//! query.

use serde::{Deserialize, Serialize};

use crate::interpolation::InterpolatorMode;

/// How to interpolate one aircraft
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InterpolationSetup {
    pub interpolator_mode: InterpolatorMode,
    /// Interpolate parts as well as situations
    pub enabled_aircraft_parts: bool,
    /// Record every query in the interpolation log
    pub log_interpolation: bool,
    /// Fixed pitch used while on the ground
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pitch_on_ground_deg: Option<f64>,
}

impl Default for InterpolationSetup {
    fn default() -> Self {
        InterpolationSetup {
            interpolator_mode: InterpolatorMode::Spline,
            enabled_aircraft_parts: true,
            log_interpolation: false,
            pitch_on_ground_deg: None,
        }
    }
}

impl InterpolationSetup {
    pub fn with_mode(mut self, mode: InterpolatorMode) -> Self {
        self.interpolator_mode = mode;
        self
    }
}
