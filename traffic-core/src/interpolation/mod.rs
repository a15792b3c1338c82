//! Interpolation strategies
//!
//! A [`PositionInterpolator`] turns the buffered history of one aircraft into
//! a pose for an arbitrary render time. Both strategies share the same
//! pipeline (bracketing, attitude, ground resolution, parts) and only differ
//! in how position, altitude and ground speed are estimated between samples:
//!
//! - [`LinearInterpolator`]: straight line between the bracketing samples
//! - [`SplineInterpolator`]: cubic Hermite spline through four samples
//!
//! Queries never fail. Missing data, holds and clamping are reported through
//! [`InterpolationStatus`].

pub mod ground;
pub mod linear;
pub mod parts;
pub mod pbh;
pub mod spline;

use nalgebra::SVector;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::angle::{normalize_180, shortest_delta};
use crate::aviation::{Callsign, GeoPosition, Situation};
use crate::buffer::{Bracket, BracketPosition, PartsBuffer, SituationBuffer};
use crate::setup::InterpolationSetup;

pub use ground::{
    ElevationProvider, GroundFlagResolver, GroundProvenance, GroundResolution, GroundSettings,
    NoElevation, OnGround,
};
pub use linear::LinearInterpolator;
pub use parts::{interpolate_parts, InterpolatedParts};
pub use pbh::{Pbh, PbhInterpolator};
pub use spline::SplineInterpolator;

use ground::GroundQuery;

/// [latitude, longitude (unwrapped), altitude MSL, ground speed]
pub type KinematicVector = SVector<f64, 4>;

/// Which strategy to use
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum InterpolatorMode {
    Linear,
    #[default]
    Spline,
}

/// Position, altitude and ground speed at one instant
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Kinematics {
    pub latitude_deg: f64,
    pub longitude_deg: f64,
    pub altitude_msl_m: f64,
    pub pressure_altitude_m: Option<f64>,
    pub ground_speed_kts: f64,
}

impl Kinematics {
    pub fn from_situation(situation: &Situation) -> Self {
        Kinematics {
            latitude_deg: situation.position.latitude_deg,
            longitude_deg: situation.position.longitude_deg,
            altitude_msl_m: situation.position.altitude_msl_m,
            pressure_altitude_m: situation.position.pressure_altitude_m,
            ground_speed_kts: situation.ground_speed_kts,
        }
    }

    pub fn to_vector(&self) -> KinematicVector {
        KinematicVector::new(
            self.latitude_deg,
            self.longitude_deg,
            self.altitude_msl_m,
            self.ground_speed_kts,
        )
    }

    /// Build from a vector, normalizing the longitude back into (-180, 180]
    pub fn from_vector(v: &KinematicVector, pressure_altitude_m: Option<f64>) -> Self {
        Kinematics {
            latitude_deg: v[0],
            longitude_deg: normalize_180(v[1]),
            altitude_msl_m: v[2],
            pressure_altitude_m,
            ground_speed_kts: v[3],
        }
    }

    pub fn position(&self) -> GeoPosition {
        GeoPosition {
            latitude_deg: self.latitude_deg,
            longitude_deg: self.longitude_deg,
            altitude_msl_m: self.altitude_msl_m,
            pressure_altitude_m: self.pressure_altitude_m,
        }
    }
}

/// Straight-line estimate between two samples, longitude along the shortest way
pub fn lerp_kinematics(older: &Situation, newer: &Situation, fraction: f64) -> Kinematics {
    let start = Kinematics::from_situation(older);
    let mut end = Kinematics::from_situation(newer).to_vector();
    end[1] = start.longitude_deg + shortest_delta(start.longitude_deg, end[1]);

    let v = start.to_vector().lerp(&end, fraction);
    let pressure_altitude_m = match (start.pressure_altitude_m, newer.position.pressure_altitude_m) {
        (Some(p0), Some(p1)) => Some(p0 + fraction * (p1 - p0)),
        _ => None,
    };
    Kinematics::from_vector(&v, pressure_altitude_m)
}

/// Interpolated pose of one aircraft
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterpolatedSituation {
    /// Render time this pose is for
    pub time_ms: i64,
    pub position: GeoPosition,
    pub pbh: Pbh,
    pub ground_speed_kts: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ground_elevation_m: Option<f64>,
    pub on_ground: OnGround,
}

/// How much to trust an [`InterpolationResult`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterpolationStatus {
    /// Query time fell between two samples
    pub is_interpolated: bool,
    /// Query time was outside the buffered span and the boundary was held
    pub is_extrapolated: bool,
    /// Parts samples are buffered for this aircraft
    pub supports_parts: bool,
    /// Strategy actually applied (spline falls back to linear)
    pub method: InterpolatorMode,
    /// Fraction between the bracketing samples
    pub fraction: f64,
    pub ground: GroundResolution,
}

impl Default for InterpolationStatus {
    fn default() -> Self {
        InterpolationStatus {
            is_interpolated: false,
            is_extrapolated: false,
            supports_parts: false,
            method: InterpolatorMode::Linear,
            fraction: 0.0,
            ground: GroundResolution::default(),
        }
    }
}

/// Coarse classification of a result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Availability {
    /// No situation was ever received
    NoDataAvailable,
    /// A single sample was returned unchanged
    InsufficientSamples,
    /// Boundary sample held
    Extrapolated,
    Interpolated,
}

/// Output of a query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterpolationResult {
    pub callsign: Callsign,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub situation: Option<InterpolatedSituation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parts: Option<InterpolatedParts>,
    pub status: InterpolationStatus,
}

impl InterpolationResult {
    /// Result for an aircraft without situations
    pub fn unavailable(callsign: Callsign) -> Self {
        InterpolationResult {
            callsign,
            situation: None,
            parts: None,
            status: InterpolationStatus::default(),
        }
    }

    pub fn is_available(&self) -> bool {
        self.situation.is_some()
    }

    pub fn availability(&self) -> Availability {
        if self.situation.is_none() {
            Availability::NoDataAvailable
        } else if self.status.is_interpolated {
            Availability::Interpolated
        } else if self.status.is_extrapolated {
            Availability::Extrapolated
        } else {
            Availability::InsufficientSamples
        }
    }
}

/// Read-only view of one aircraft, plus the collaborators a query needs
#[derive(Clone, Copy)]
pub struct InterpolationContext<'a> {
    pub callsign: &'a Callsign,
    pub situations: &'a SituationBuffer,
    pub parts: &'a PartsBuffer,
    pub elevation: &'a dyn ElevationProvider,
    pub resolver: &'a GroundFlagResolver,
    /// Height of the center of gravity above the wheels, if known
    pub cg_m: Option<f64>,
}

/// Strategy for estimating position between samples
pub trait PositionInterpolator: Send + Sync {
    fn mode(&self) -> InterpolatorMode;

    /// Position, altitude and ground speed inside an `Inside` bracket.
    ///
    /// Returns the estimate and the method actually used.
    fn kinematics(
        &self,
        situations: &SituationBuffer,
        bracket: &Bracket<'_, Situation>,
        time_ms: i64,
        fraction: f64,
    ) -> (Kinematics, InterpolatorMode);

    /// Full pose for `render_ms`
    fn get_interpolation(
        &self,
        context: &InterpolationContext<'_>,
        render_ms: i64,
        setup: &InterpolationSetup,
    ) -> InterpolationResult {
        interpolate(self, context, render_ms, setup)
    }
}

/// Strategy instance for a mode
pub fn interpolator_for(mode: InterpolatorMode) -> &'static dyn PositionInterpolator {
    match mode {
        InterpolatorMode::Linear => &LinearInterpolator,
        InterpolatorMode::Spline => &SplineInterpolator,
    }
}

fn interpolate<I: PositionInterpolator + ?Sized>(
    interpolator: &I,
    context: &InterpolationContext<'_>,
    render_ms: i64,
    setup: &InterpolationSetup,
) -> InterpolationResult {
    let callsign = context.callsign.clone();
    let bracket = match context.situations.bracketing(render_ms) {
        Some(bracket) => bracket,
        None => {
            let mut result = InterpolationResult::unavailable(callsign);
            result.status.supports_parts = !context.parts.is_empty();
            return result;
        }
    };

    let fraction = bracket.fraction(render_ms);
    let (kinematics, method) = match bracket.position {
        BracketPosition::Inside => {
            interpolator.kinematics(context.situations, &bracket, render_ms, fraction)
        }
        _ => (
            Kinematics::from_situation(bracket.newer),
            InterpolatorMode::Linear,
        ),
    };

    let mut pbh = PbhInterpolator::from_situations(bracket.older, bracket.newer).at(fraction);

    let sample_elevation = bracket
        .newer
        .ground_elevation_m
        .or(bracket.older.ground_elevation_m);

    let ground = context.resolver.resolve(
        &GroundQuery {
            bracket: &bracket,
            fraction,
            time_ms: render_ms,
            latitude_deg: kinematics.latitude_deg,
            longitude_deg: kinematics.longitude_deg,
            altitude_msl_m: kinematics.altitude_msl_m,
            ground_elevation_m: sample_elevation,
            cg_m: context.cg_m,
        },
        context.parts,
        context.elevation,
    );

    if ground.on_ground.is_on_ground() {
        if let Some(pitch) = setup.pitch_on_ground_deg {
            pbh.pitch_deg = pitch;
        }
    }

    let mut ground_elevation_m = sample_elevation.or_else(|| {
        ground
            .height_above_ground_m
            .map(|height| kinematics.altitude_msl_m - height)
    });

    let parts = if setup.enabled_aircraft_parts {
        interpolate_parts(context.parts, render_ms)
    } else {
        None
    };

    // Pull the aircraft down to the ground around takeoff and landing
    let mut position = kinematics.position();
    if let Some(ground_factor) = parts.as_ref().map(|p| p.ground_factor).filter(|gf| *gf > 0.0) {
        if ground_elevation_m.is_none() {
            ground_elevation_m = context.elevation.elevation_within_range(
                kinematics.latitude_deg,
                kinematics.longitude_deg,
                context.resolver.settings().elevation_radius_m,
            );
        }
        if let Some(elevation) = ground_elevation_m {
            position.altitude_msl_m =
                ground_altitude_blend(position.altitude_msl_m, elevation, context.cg_m, ground_factor);
        }
    }

    let is_interpolated = bracket.position == BracketPosition::Inside;
    let is_extrapolated = match bracket.position {
        BracketPosition::Inside => false,
        BracketPosition::BeforeOldest | BracketPosition::AfterNewest => true,
        BracketPosition::Single => bracket.newer.adjusted_ms() != render_ms,
    };

    InterpolationResult {
        callsign,
        situation: Some(InterpolatedSituation {
            time_ms: render_ms,
            position,
            pbh,
            ground_speed_kts: kinematics.ground_speed_kts,
            ground_elevation_m,
            on_ground: ground.on_ground,
        }),
        parts,
        status: InterpolationStatus {
            is_interpolated,
            is_extrapolated,
            supports_parts: !context.parts.is_empty(),
            method,
            fraction,
            ground,
        },
    }
}

/// Altitude weighted between flight and the ground by `ground_factor`.
///
/// On the ground the reference point sits `cg_m` above the elevation.
pub fn ground_altitude_blend(
    altitude_msl_m: f64,
    ground_elevation_m: f64,
    cg_m: Option<f64>,
    ground_factor: f64,
) -> f64 {
    let ground_factor = ground_factor.clamp(0.0, 1.0);
    let on_ground_m = ground_elevation_m + cg_m.unwrap_or(0.0);
    altitude_msl_m * (1.0 - ground_factor) + on_ground_m * ground_factor
}
