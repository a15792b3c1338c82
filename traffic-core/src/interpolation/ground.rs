//! On-ground resolution
//!
//! Decides whether an interpolated aircraft is on the ground. Sources are
//! tried in order and the first one that gives an answer wins:
//!
//! 1. The nearest bracketing situation, if the sender asserted its state
//! 2. The parts sample nearest to the query time, inside the correlation window
//! 3. Height above ground (situation elevation, else an [`ElevationProvider`])
//! 4. Unknown

use serde::{Deserialize, Serialize};

use crate::aviation::{Parts, Situation};
use crate::buffer::{Bracket, PartsBuffer};

/// Elevation lookup used when samples carry no ground elevation
pub trait ElevationProvider: Send + Sync {
    /// Ground elevation in meters MSL of a known point within `radius_m` of the coordinate
    fn elevation_within_range(&self, latitude_deg: f64, longitude_deg: f64, radius_m: f64) -> Option<f64>;
}

/// Provider that never knows the elevation
#[derive(Debug, Clone, Copy, Default)]
pub struct NoElevation;

impl ElevationProvider for NoElevation {
    fn elevation_within_range(&self, _latitude_deg: f64, _longitude_deg: f64, _radius_m: f64) -> Option<f64> {
        None
    }
}

/// Resolved ground state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OnGround {
    #[default]
    Unknown,
    OnGround,
    NotOnGround,
}

impl OnGround {
    pub fn from_flag(on_ground: bool) -> Self {
        if on_ground {
            OnGround::OnGround
        } else {
            OnGround::NotOnGround
        }
    }

    pub fn is_on_ground(&self) -> bool {
        *self == OnGround::OnGround
    }
}

/// Where the ground state came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GroundProvenance {
    #[default]
    Unknown,
    /// Asserted by the sender inside the situation
    FromSituation,
    /// Taken from a time-correlated parts sample
    FromParts,
    /// Derived from height above ground
    FromElevation,
}

/// Result of ground resolution
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroundResolution {
    pub on_ground: OnGround,
    pub provenance: GroundProvenance,
    /// Time between query and the parts sample used, in ms
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correlation_ms: Option<i64>,
    /// Height above ground used for the decision, in meters
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height_above_ground_m: Option<f64>,
}

/// Tunables for ground resolution
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GroundSettings {
    /// Largest time distance between query and parts sample
    pub correlation_window_ms: i64,
    /// Height above ground considered on ground when the CG is unknown
    pub on_ground_threshold_m: f64,
    /// Search radius for elevation lookups
    pub elevation_radius_m: f64,
}

impl Default for GroundSettings {
    fn default() -> Self {
        GroundSettings {
            correlation_window_ms: 5000, // nominal slow update interval
            on_ground_threshold_m: 1.0,
            elevation_radius_m: 250.0,
        }
    }
}

/// Everything the resolver needs for one query
#[derive(Debug, Clone, Copy)]
pub struct GroundQuery<'a> {
    pub bracket: &'a Bracket<'a, Situation>,
    pub fraction: f64,
    pub time_ms: i64,
    pub latitude_deg: f64,
    pub longitude_deg: f64,
    pub altitude_msl_m: f64,
    /// Ground elevation known from the samples
    pub ground_elevation_m: Option<f64>,
    /// Height of the center of gravity above the wheels, if known
    pub cg_m: Option<f64>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct GroundFlagResolver {
    settings: GroundSettings,
}

impl GroundFlagResolver {
    pub fn new(settings: GroundSettings) -> Self {
        GroundFlagResolver { settings }
    }

    pub fn settings(&self) -> &GroundSettings {
        &self.settings
    }

    pub fn resolve(
        &self,
        query: &GroundQuery<'_>,
        parts: &PartsBuffer,
        elevation: &dyn ElevationProvider,
    ) -> GroundResolution {
        if let Some(resolution) = self.from_situation(query) {
            return resolution;
        }
        if let Some(resolution) = self.from_parts(query.time_ms, parts) {
            return resolution;
        }
        if let Some(resolution) = self.from_elevation(query, elevation) {
            return resolution;
        }
        GroundResolution::default()
    }

    fn from_situation(&self, query: &GroundQuery<'_>) -> Option<GroundResolution> {
        let nearest = if query.fraction < 0.5 {
            query.bracket.older
        } else {
            query.bracket.newer
        };
        let on_ground = nearest.on_ground.asserted()?;
        Some(GroundResolution {
            on_ground: OnGround::from_flag(on_ground),
            provenance: GroundProvenance::FromSituation,
            ..Default::default()
        })
    }

    fn from_parts(&self, time_ms: i64, parts: &PartsBuffer) -> Option<GroundResolution> {
        let (nearest, distance) = nearest_parts(parts, time_ms)?;
        if distance > self.settings.correlation_window_ms {
            return None;
        }
        Some(GroundResolution {
            on_ground: OnGround::from_flag(nearest.on_ground),
            provenance: GroundProvenance::FromParts,
            correlation_ms: Some(distance),
            height_above_ground_m: None,
        })
    }

    fn from_elevation(
        &self,
        query: &GroundQuery<'_>,
        elevation: &dyn ElevationProvider,
    ) -> Option<GroundResolution> {
        let ground = query.ground_elevation_m.or_else(|| {
            elevation.elevation_within_range(
                query.latitude_deg,
                query.longitude_deg,
                self.settings.elevation_radius_m,
            )
        })?;
        let height = query.altitude_msl_m - ground;
        let threshold = query.cg_m.unwrap_or(self.settings.on_ground_threshold_m);
        Some(GroundResolution {
            on_ground: OnGround::from_flag(height <= threshold),
            provenance: GroundProvenance::FromElevation,
            correlation_ms: None,
            height_above_ground_m: Some(height),
        })
    }
}

/// Parts sample closest in time to `time_ms`, with the absolute distance.
/// Ties go to the older sample.
pub fn nearest_parts(parts: &PartsBuffer, time_ms: i64) -> Option<(&Parts, i64)> {
    parts
        .iter()
        .map(|p| (p, time_ms.abs_diff(p.adjusted_ms())))
        .min_by_key(|(_, distance)| *distance)
        .map(|(p, distance)| (p, i64::try_from(distance).unwrap_or(i64::MAX)))
}
