//! Pitch, bank and heading interpolation
//!
//! Every angle is interpolated independently along the shortest arc between
//! the two samples. Results are not normalized; callers normalize for
//! display if they want to.

use serde::{Deserialize, Serialize};

use crate::angle::interpolate_angle;
use crate::aviation::Situation;

/// Pitch, bank and heading in degrees
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pbh {
    pub pitch_deg: f64,
    pub bank_deg: f64,
    pub heading_deg: f64,
}

impl Pbh {
    pub fn new(pitch_deg: f64, bank_deg: f64, heading_deg: f64) -> Self {
        Pbh {
            pitch_deg,
            bank_deg,
            heading_deg,
        }
    }

    pub fn from_situation(situation: &Situation) -> Self {
        Pbh::new(situation.pitch_deg, situation.bank_deg, situation.heading_deg)
    }
}

/// Interpolates attitude between two samples
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PbhInterpolator {
    start: Pbh,
    end: Pbh,
}

impl PbhInterpolator {
    pub fn new(start: Pbh, end: Pbh) -> Self {
        PbhInterpolator { start, end }
    }

    pub fn from_situations(older: &Situation, newer: &Situation) -> Self {
        PbhInterpolator::new(Pbh::from_situation(older), Pbh::from_situation(newer))
    }

    pub fn heading(&self, fraction: f64) -> f64 {
        interpolate_angle(self.start.heading_deg, self.end.heading_deg, fraction)
    }

    pub fn pitch(&self, fraction: f64) -> f64 {
        interpolate_angle(self.start.pitch_deg, self.end.pitch_deg, fraction)
    }

    pub fn bank(&self, fraction: f64) -> f64 {
        interpolate_angle(self.start.bank_deg, self.end.bank_deg, fraction)
    }

    /// All three angles at `fraction` (0 = start, 1 = end)
    pub fn at(&self, fraction: f64) -> Pbh {
        Pbh {
            pitch_deg: self.pitch(fraction),
            bank_deg: self.bank(fraction),
            heading_deg: self.heading(fraction),
        }
    }
}
