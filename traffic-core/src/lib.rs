//! # Traffic Core
//!
//! Platform-independent interpolation engine for remote aircraft in a
//! multiplayer flight simulation.
//!
//! Network updates for other aircraft arrive sparse (every 0.2 to 5 seconds),
//! late and sometimes out of order. This crate turns the bounded history of
//! those samples into a smooth, deterministic pose for any render time.
//!
//! The crate contains **no I/O, no logging and no locking**. Thread safety,
//! per-callsign storage and diagnostics live in the `traffic-interp` crate.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │  traffic-core (pure, deterministic)                        │
//! │  ├── aviation/       (Situation, Parts, Callsign)          │
//! │  ├── buffer          (bounded time-ordered history)        │
//! │  ├── interpolation/  (linear, spline, pbh, ground, parts)  │
//! │  └── setup           (per aircraft interpolation setup)    │
//! └────────────────────────────────────────────────────────────┘
//!                             ▲
//!              ┌──────────────┴──────────────┐
//!              │  traffic-interp             │
//!              │  (RemoteAircraftProvider)   │
//!              └─────────────────────────────┘
//! ```
//!
//! ## Key Modules
//!
//! - [`aviation`] - Sample types received from the network
//! - [`buffer`] - [`SituationBuffer`] and [`PartsBuffer`]
//! - [`interpolation`] - [`LinearInterpolator`], [`SplineInterpolator`], [`PbhInterpolator`]
//!   and the [`GroundFlagResolver`]
//! - [`angle`] - Angle normalization and shortest-arc helpers
//! - [`setup`] - [`InterpolationSetup`]
//!
//! ## Example: Interpolating a Pose
//!
//! ```rust
//! use traffic_core::{
//!     interpolator_for, Callsign, GeoPosition, GroundFlagResolver, InterpolationContext,
//!     InterpolationSetup, NoElevation, PartsBuffer, Situation, SituationBuffer,
//! };
//!
//! let callsign = Callsign::new("DLH4AB").unwrap();
//! let mut situations = SituationBuffer::default();
//! for (ts, lat) in [(0, 50.0), (5000, 50.1)] {
//!     let situation = Situation::new(callsign.clone(), ts, GeoPosition::new(lat, 8.5, 3000.0));
//!     situations.insert(situation).unwrap();
//! }
//! let parts = PartsBuffer::default();
//! let resolver = GroundFlagResolver::default();
//! let context = InterpolationContext {
//!     callsign: &callsign,
//!     situations: &situations,
//!     parts: &parts,
//!     elevation: &NoElevation,
//!     resolver: &resolver,
//!     cg_m: None,
//! };
//!
//! let setup = InterpolationSetup::default();
//! let result = interpolator_for(setup.interpolator_mode).get_interpolation(&context, 2500, &setup);
//! assert!(result.status.is_interpolated);
//! let lat = result.situation.unwrap().position.latitude_deg;
//! assert!((lat - 50.05).abs() < 1e-9);
//! ```

pub mod angle;
pub mod aviation;
pub mod buffer;
pub mod error;
pub mod interpolation;
pub mod setup;

pub use aviation::{Callsign, Engine, GeoPosition, Lights, OnGroundHint, Parts, Situation};
pub use buffer::{
    Bracket, BracketPosition, InsertOutcome, PartsBuffer, SampleBuffer, SituationBuffer,
    TimedSample,
};
pub use error::SampleError;
pub use interpolation::{
    interpolator_for, Availability, ElevationProvider, GroundFlagResolver, GroundProvenance,
    GroundResolution, GroundSettings, InterpolatedParts, InterpolatedSituation,
    InterpolationContext, InterpolationResult, InterpolationStatus, InterpolatorMode,
    LinearInterpolator, NoElevation, OnGround, Pbh, PbhInterpolator, PositionInterpolator,
    SplineInterpolator,
};
pub use setup::InterpolationSetup;
