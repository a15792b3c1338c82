//! Position and attitude samples

use serde::{Deserialize, Serialize};

use super::Callsign;
use crate::buffer::TimedSample;
use crate::error::{check_angle, check_coordinate, check_value, SampleError};

/// Geographic position of an aircraft
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeoPosition {
    /// Latitude in degrees (-90..90)
    pub latitude_deg: f64,
    /// Longitude in degrees (-180..180)
    pub longitude_deg: f64,
    /// Altitude above mean sea level in meters
    pub altitude_msl_m: f64,
    /// Pressure altitude in meters (if reported)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pressure_altitude_m: Option<f64>,
}

impl GeoPosition {
    pub fn new(latitude_deg: f64, longitude_deg: f64, altitude_msl_m: f64) -> Self {
        GeoPosition {
            latitude_deg,
            longitude_deg,
            altitude_msl_m,
            pressure_altitude_m: None,
        }
    }

    fn validate(&self, timestamp_ms: i64) -> Result<(), SampleError> {
        check_coordinate("latitude", self.latitude_deg, timestamp_ms)?;
        check_coordinate("longitude", self.longitude_deg, timestamp_ms)?;
        check_coordinate("altitude", self.altitude_msl_m, timestamp_ms)?;
        if let Some(pressure_altitude) = self.pressure_altitude_m {
            check_coordinate("pressureAltitude", pressure_altitude, timestamp_ms)?;
        }
        Ok(())
    }
}

/// What the sender said about being on the ground
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OnGroundHint {
    /// No statement at all
    #[default]
    Unknown,
    /// Sender asserted it is on the ground
    OnGround,
    /// Sender asserted it is airborne
    NotOnGround,
    /// Ground state is published through the parts stream
    FromNetwork,
}

impl OnGroundHint {
    /// The asserted state, if the sender made one inside this situation
    pub fn asserted(&self) -> Option<bool> {
        match self {
            OnGroundHint::OnGround => Some(true),
            OnGroundHint::NotOnGround => Some(false),
            OnGroundHint::Unknown | OnGroundHint::FromNetwork => None,
        }
    }
}

/// One position/attitude report for a remote aircraft
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Situation {
    pub callsign: Callsign,
    /// Sender timestamp, ms since the Unix epoch
    pub timestamp_ms: i64,
    /// Time offset in ms added to the timestamp before ordering
    #[serde(default)]
    pub time_offset_ms: i64,
    pub position: GeoPosition,
    /// Heading in degrees, any range
    pub heading_deg: f64,
    /// Pitch in degrees, positive nose up
    pub pitch_deg: f64,
    /// Bank in degrees, positive right wing down
    pub bank_deg: f64,
    /// Ground speed in knots
    pub ground_speed_kts: f64,
    /// Ground elevation below the aircraft, meters MSL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ground_elevation_m: Option<f64>,
    #[serde(default)]
    pub on_ground: OnGroundHint,
}

impl Situation {
    pub fn new(callsign: Callsign, timestamp_ms: i64, position: GeoPosition) -> Self {
        Situation {
            callsign,
            timestamp_ms,
            time_offset_ms: 0,
            position,
            heading_deg: 0.0,
            pitch_deg: 0.0,
            bank_deg: 0.0,
            ground_speed_kts: 0.0,
            ground_elevation_m: None,
            on_ground: OnGroundHint::Unknown,
        }
    }

    /// Timestamp plus time offset, used for ordering and bracketing
    pub fn adjusted_ms(&self) -> i64 {
        self.timestamp_ms.saturating_add(self.time_offset_ms)
    }

    /// Height above the ground elevation, when the elevation is known
    pub fn height_above_ground_m(&self) -> Option<f64> {
        self.ground_elevation_m
            .map(|elevation| self.position.altitude_msl_m - elevation)
    }

    /// Reject samples carrying NaN or infinite values
    pub fn validate(&self) -> Result<(), SampleError> {
        let ts = self.timestamp_ms;
        self.position.validate(ts)?;
        check_angle("heading", self.heading_deg, ts)?;
        check_angle("pitch", self.pitch_deg, ts)?;
        check_angle("bank", self.bank_deg, ts)?;
        check_value("groundSpeed", self.ground_speed_kts, ts)?;
        if let Some(elevation) = self.ground_elevation_m {
            check_value("groundElevation", elevation, ts)?;
        }
        Ok(())
    }
}

impl TimedSample for Situation {
    fn adjusted_ms(&self) -> i64 {
        Situation::adjusted_ms(self)
    }

    fn validate(&self) -> Result<(), SampleError> {
        Situation::validate(self)
    }
}
