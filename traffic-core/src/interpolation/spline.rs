//! Cubic Hermite spline through four consecutive samples
//!
//! The segment between the two bracketing samples is evaluated with tangents
//! taken from their neighbours (non-uniform Catmull-Rom). Tangents are limited
//! so the curve never overshoots the samples: zero at a local extremum and at
//! most three times the smaller adjacent secant otherwise. Each tangent only
//! depends on the samples around it, so neighbouring segments share it and
//! the path stays C1 across samples.
//!
//! Latitude, longitude (unwrapped across the antimeridian), altitude and
//! ground speed are interpolated together as one [`KinematicVector`].

use super::{
    lerp_kinematics, InterpolatorMode, KinematicVector, Kinematics, PositionInterpolator,
};
use crate::angle::shortest_delta;
use crate::aviation::Situation;
use crate::buffer::{Bracket, SituationBuffer};

#[derive(Debug, Clone, Copy, Default)]
pub struct SplineInterpolator;

impl PositionInterpolator for SplineInterpolator {
    fn mode(&self) -> InterpolatorMode {
        InterpolatorMode::Spline
    }

    fn kinematics(
        &self,
        situations: &SituationBuffer,
        bracket: &Bracket<'_, Situation>,
        time_ms: i64,
        fraction: f64,
    ) -> (Kinematics, InterpolatorMode) {
        let window = match window(situations, time_ms) {
            Some(window) => window,
            None => {
                return (
                    lerp_kinematics(bracket.older, bracket.newer, fraction),
                    InterpolatorMode::Linear,
                )
            }
        };

        let times = window.map(|s| s.adjusted_ms() as f64);
        let values = unwrapped_vectors(&window);

        let d0 = secant(&values[0], &values[1], times[1] - times[0]);
        let d1 = secant(&values[1], &values[2], times[2] - times[1]);
        let d2 = secant(&values[2], &values[3], times[3] - times[2]);

        let m1 = limit_tangent(&secant(&values[0], &values[2], times[2] - times[0]), &d0, &d1);
        let m2 = limit_tangent(&secant(&values[1], &values[3], times[3] - times[1]), &d1, &d2);

        let v = hermite(&values[1], &values[2], &m1, &m2, times[2] - times[1], fraction);

        let pressure_altitude_m = lerp_kinematics(bracket.older, bracket.newer, fraction).pressure_altitude_m;
        (
            Kinematics::from_vector(&v, pressure_altitude_m),
            InterpolatorMode::Spline,
        )
    }
}

/// Four samples around the query time, or `None` at the buffer edges
fn window(situations: &SituationBuffer, time_ms: i64) -> Option<[&Situation; 4]> {
    match situations.window(time_ms) {
        [a, b, c, d] => Some([a, b, c, d]),
        _ => None,
    }
}

/// Sample vectors with longitudes made continuous across the antimeridian
fn unwrapped_vectors(window: &[&Situation; 4]) -> [KinematicVector; 4] {
    let mut values = window.map(|s| Kinematics::from_situation(s).to_vector());
    for i in 1..values.len() {
        let previous = values[i - 1][1];
        values[i][1] = previous + shortest_delta(previous, values[i][1]);
    }
    values
}

fn secant(from: &KinematicVector, to: &KinematicVector, dt: f64) -> KinematicVector {
    (to - from) / dt.max(1.0)
}

fn limit_tangent(
    tangent: &KinematicVector,
    before: &KinematicVector,
    after: &KinematicVector,
) -> KinematicVector {
    KinematicVector::from_fn(|i, _| {
        let (m, d0, d1) = (tangent[i], before[i], after[i]);
        if d0 * d1 <= 0.0 {
            0.0
        } else {
            let bound = 3.0 * d0.abs().min(d1.abs());
            m.clamp(-bound, bound)
        }
    })
}

/// Cubic Hermite between `y0` and `y1` over an interval of `h` ms at `t` in [0, 1]
fn hermite(
    y0: &KinematicVector,
    y1: &KinematicVector,
    k0: &KinematicVector,
    k1: &KinematicVector,
    h: f64,
    t: f64,
) -> KinematicVector {
    let h = h.max(1.0);
    let dy = y1 - y0;
    let a = k0 * h - dy;
    let b = -k1 * h + dy;
    y0 * (1.0 - t) + y1 * t + (a * (1.0 - t) + b * t) * (t * (1.0 - t))
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::super::*;
    use crate::aviation::{Callsign, GeoPosition};
    use crate::buffer::PartsBuffer;
    use crate::setup::InterpolationSetup;

    const TS: i64 = 1_425_000_000_000;

    fn query(situations: &SituationBuffer, render_ms: i64) -> InterpolationResult {
        let cs = callsign();
        let parts = PartsBuffer::default();
        let resolver = GroundFlagResolver::default();
        let context = InterpolationContext {
            callsign: &cs,
            situations,
            parts: &parts,
            elevation: &NoElevation,
            resolver: &resolver,
            cg_m: None,
        };
        SplineInterpolator.get_interpolation(&context, render_ms, &InterpolationSetup::default())
    }

    fn buffer_from_latitudes(latitudes: &[f64], spacing_ms: i64) -> SituationBuffer {
        let mut buffer = SituationBuffer::new(latitudes.len());
        for (i, lat) in latitudes.iter().enumerate() {
            let situation = Situation::new(
                Callsign::new("SPL1").unwrap(),
                i as i64 * spacing_ms,
                GeoPosition::new(*lat, 0.0, 1000.0),
            );
            buffer.insert(situation).unwrap();
        }
        buffer
    }

    #[test]
    fn test_falls_back_to_linear_at_edges() {
        let situations = make_buffer(3, TS);
        let result = query(&situations, TS + OFFSET_MS - 2500);
        assert!(result.status.is_interpolated);
        assert_eq!(result.status.method, InterpolatorMode::Linear);
    }

    #[test]
    fn test_uses_spline_in_the_middle() {
        let situations = make_buffer(20, TS);
        let result = query(&situations, TS - 40_000);
        assert!(result.status.is_interpolated);
        assert_eq!(result.status.method, InterpolatorMode::Spline);
    }

    #[test]
    fn test_quadratic_reproduced() {
        // y = t^2 has exact Catmull-Rom tangents on a uniform grid
        let situations = buffer_from_latitudes(&[0.0, 1.0, 4.0, 9.0], 1000);
        let result = query(&situations, 1500);
        let lat = result.situation.unwrap().position.latitude_deg;
        assert!((lat - 2.25).abs() < 1e-9, "got {}", lat);
    }

    #[test]
    fn test_passes_through_samples() {
        let situations = make_buffer(20, TS);
        for sample in situations.iter() {
            let pose = query(&situations, sample.adjusted_ms()).situation.unwrap();
            assert!((pose.position.latitude_deg - sample.position.latitude_deg).abs() < 1e-12);
            assert!((pose.position.longitude_deg - sample.position.longitude_deg).abs() < 1e-12);
            assert!((pose.position.altitude_msl_m - sample.position.altitude_msl_m).abs() < 1e-9);
        }
    }

    #[test]
    fn test_no_overshoot_on_step() {
        let situations = buffer_from_latitudes(&[0.0, 0.0, 1.0, 1.0, 1.0], 5000);
        let mut previous = 0.0;
        for render in (5000..=10_000).step_by(100) {
            let lat = query(&situations, render).situation.unwrap().position.latitude_deg;
            assert!((0.0..=1.0).contains(&lat), "overshoot {} at {}", lat, render);
            assert!(lat >= previous, "not monotonic at {}", render);
            previous = lat;
        }
    }

    #[test]
    fn test_monotonic_with_irregular_spacing() {
        let mut situations = SituationBuffer::new(10);
        let times = [0, 200, 5200, 5400, 9000, 14_000];
        for (i, ts) in times.iter().enumerate() {
            let situation = Situation::new(
                Callsign::new("SPL2").unwrap(),
                *ts,
                GeoPosition::new(i as f64 * 0.01, i as f64 * 0.02, 1000.0 + i as f64),
            );
            situations.insert(situation).unwrap();
        }

        let mut previous = f64::MIN;
        for render in (0..=14_000).step_by(50) {
            let lat = query(&situations, render).situation.unwrap().position.latitude_deg;
            assert!(lat >= previous, "latitude fell at {}", render);
            previous = lat;
        }
    }

    #[test]
    fn test_across_antimeridian() {
        let mut situations = SituationBuffer::new(4);
        for (i, lon) in [179.0, 179.5, -180.0, -179.5].iter().enumerate() {
            let situation = Situation::new(
                Callsign::new("SPL3").unwrap(),
                i as i64 * 1000,
                GeoPosition::new(0.0, *lon, 1000.0),
            );
            situations.insert(situation).unwrap();
        }
        let pose = query(&situations, 1500).situation.unwrap();
        assert!((pose.position.longitude_deg - 179.75).abs() < 1e-9);
    }

    #[test]
    fn test_idempotent() {
        let situations = make_buffer(20, TS);
        assert_eq!(query(&situations, TS - 33_333), query(&situations, TS - 33_333));
    }

    #[test]
    fn test_altitude_blended_after_takeoff() {
        let situations = make_buffer(6, TS);
        // Between samples 3 and 2, inside the spline window
        let render = TS + OFFSET_MS - 2 * DELTA_T_MS - 2500;
        let mut parts = PartsBuffer::default();
        parts.insert(make_parts(render - 3500 - OFFSET_MS, true)).unwrap();
        // Lift off 2.5 s ago, half of the blend horizon
        parts.insert(make_parts(render - 2500 - OFFSET_MS, false)).unwrap();

        let cs = callsign();
        let resolver = GroundFlagResolver::default();
        let context = InterpolationContext {
            callsign: &cs,
            situations: &situations,
            parts: &parts,
            elevation: &NoElevation,
            resolver: &resolver,
            cg_m: None,
        };
        let result = SplineInterpolator.get_interpolation(&context, render, &InterpolationSetup::default());
        assert_eq!(result.status.method, InterpolatorMode::Spline);
        assert!((result.parts.as_ref().unwrap().ground_factor - 0.5).abs() < 1e-12);
        // Spline altitude 4750 m halfway to the -1000 m ground elevation
        let altitude = result.situation.unwrap().position.altitude_msl_m;
        assert!((altitude - 1875.0).abs() < 1e-6, "altitude {}", altitude);
    }
}
