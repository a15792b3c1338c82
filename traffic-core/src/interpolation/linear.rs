//! Linear interpolation between the two bracketing samples

use super::{lerp_kinematics, InterpolatorMode, Kinematics, PositionInterpolator};
use crate::aviation::Situation;
use crate::buffer::{Bracket, SituationBuffer};

#[derive(Debug, Clone, Copy, Default)]
pub struct LinearInterpolator;

impl PositionInterpolator for LinearInterpolator {
    fn mode(&self) -> InterpolatorMode {
        InterpolatorMode::Linear
    }

    fn kinematics(
        &self,
        _situations: &SituationBuffer,
        bracket: &Bracket<'_, Situation>,
        _time_ms: i64,
        fraction: f64,
    ) -> (Kinematics, InterpolatorMode) {
        (
            lerp_kinematics(bracket.older, bracket.newer, fraction),
            InterpolatorMode::Linear,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::super::*;
    use crate::angle::normalize_360;
    use crate::buffer::PartsBuffer;
    use crate::setup::InterpolationSetup;

    const TS: i64 = 1_425_000_000_000;

    fn query(
        situations: &SituationBuffer,
        parts: &PartsBuffer,
        render_ms: i64,
        setup: &InterpolationSetup,
    ) -> InterpolationResult {
        let cs = callsign();
        let resolver = GroundFlagResolver::default();
        let context = InterpolationContext {
            callsign: &cs,
            situations,
            parts,
            elevation: &NoElevation,
            resolver: &resolver,
            cg_m: None,
        };
        LinearInterpolator.get_interpolation(&context, render_ms, setup)
    }

    #[test]
    fn test_sweep_is_interpolated_and_monotonic() {
        let situations = make_buffer(20, TS);
        let parts = PartsBuffer::default();
        let setup = InterpolationSetup::default();

        let mut last: Option<(f64, f64)> = None;
        let mut render = TS + OFFSET_MS - 1;
        while render >= TS {
            let result = query(&situations, &parts, render, &setup);
            assert!(result.status.is_interpolated, "not interpolated at {}", render);
            assert!(!result.status.is_extrapolated);
            let pos = result.situation.unwrap().position;
            if let Some((lat, lon)) = last {
                assert!(pos.latitude_deg < lat, "latitude not falling at {}", render);
                assert!(pos.longitude_deg < lon, "longitude not falling at {}", render);
            }
            last = Some((pos.latitude_deg, pos.longitude_deg));
            render -= 250;
        }
    }

    #[test]
    fn test_exact_samples_reproduced() {
        let situations = make_buffer(5, TS);
        let parts = PartsBuffer::default();
        let setup = InterpolationSetup::default();

        for sample in situations.iter() {
            let result = query(&situations, &parts, sample.adjusted_ms(), &setup);
            let pose = result.situation.unwrap();
            assert_eq!(pose.position.latitude_deg, sample.position.latitude_deg);
            assert_eq!(pose.position.longitude_deg, sample.position.longitude_deg);
            assert_eq!(pose.position.altitude_msl_m, sample.position.altitude_msl_m);
            assert_eq!(normalize_360(pose.pbh.heading_deg), normalize_360(sample.heading_deg));
        }
    }

    #[test]
    fn test_midpoint() {
        let situations = make_buffer(2, TS);
        let parts = PartsBuffer::default();
        // Samples at TS-5000 (number 1) and TS (number 0), both adjusted by the offset
        let result = query(&situations, &parts, TS + OFFSET_MS - 2500, &InterpolationSetup::default());
        let pose = result.situation.unwrap();
        assert_eq!(result.status.fraction, 0.5);
        assert_eq!(pose.position.latitude_deg, -0.5);
        assert_eq!(pose.position.longitude_deg, 9.5);
        assert_eq!(pose.position.altitude_msl_m, 4950.0);
        assert_eq!(pose.ground_speed_kts, 197.5);
        assert_eq!(pose.pbh.heading_deg, 85.0);
        assert_eq!(result.status.method, InterpolatorMode::Linear);
    }

    #[test]
    fn test_hold_outside_span() {
        let situations = make_buffer(3, TS);
        let parts = PartsBuffer::default();
        let setup = InterpolationSetup::default();
        let newest = situations.latest().unwrap().clone();
        let oldest = situations.oldest().unwrap().clone();

        let after = query(&situations, &parts, TS + 60_000, &setup);
        assert!(after.status.is_extrapolated);
        assert!(!after.status.is_interpolated);
        assert_eq!(after.availability(), Availability::Extrapolated);
        assert_eq!(after.situation.unwrap().position, newest.position);

        let before = query(&situations, &parts, 0, &setup);
        assert!(before.status.is_extrapolated);
        assert_eq!(before.situation.unwrap().position, oldest.position);
    }

    #[test]
    fn test_single_sample_returned_unchanged() {
        let situations = make_buffer(1, TS);
        let parts = PartsBuffer::default();
        let sample = situations.latest().unwrap().clone();

        let result = query(&situations, &parts, sample.adjusted_ms(), &InterpolationSetup::default());
        assert!(!result.status.is_interpolated);
        assert!(!result.status.is_extrapolated);
        assert_eq!(result.availability(), Availability::InsufficientSamples);
        let pose = result.situation.unwrap();
        assert_eq!(pose.position, sample.position);
        assert_eq!(pose.pbh, Pbh::from_situation(&sample));
    }

    #[test]
    fn test_ground_from_correlated_parts() {
        let situations = make_buffer(4, TS);
        let t0 = TS + OFFSET_MS - 10_000;
        let mut parts = PartsBuffer::default();
        // Parts adjusted time t0 + 33
        parts.insert(make_parts(t0 + 33 - OFFSET_MS, true)).unwrap();

        for delta in [100, 1000, 4000] {
            let result = query(&situations, &parts, t0 + delta, &InterpolationSetup::default());
            let status = result.status;
            assert_eq!(status.ground.provenance, GroundProvenance::FromParts);
            assert_eq!(status.ground.correlation_ms, Some(delta - 33));
            assert_eq!(result.situation.unwrap().on_ground, OnGround::OnGround);
            assert!(status.supports_parts);
            let parts = result.parts.unwrap();
            assert!(parts.parts.gear_down);
            assert_eq!(parts.ground_factor, 1.0);
        }
    }

    #[test]
    fn test_pitch_on_ground_override() {
        let situations = make_buffer(4, TS);
        let mut parts = PartsBuffer::default();
        parts.insert(make_parts(TS - 2000, true)).unwrap();
        let setup = InterpolationSetup {
            pitch_on_ground_deg: Some(0.0),
            ..Default::default()
        };
        let result = query(&situations, &parts, TS + OFFSET_MS - 2000, &setup);
        assert_eq!(result.situation.unwrap().pbh.pitch_deg, 0.0);
    }

    #[test]
    fn test_parts_disabled() {
        let situations = make_buffer(4, TS);
        let mut parts = PartsBuffer::default();
        parts.insert(make_parts(TS, false)).unwrap();
        let setup = InterpolationSetup {
            enabled_aircraft_parts: false,
            ..Default::default()
        };
        let result = query(&situations, &parts, TS, &setup);
        assert!(result.parts.is_none());
        assert!(result.status.supports_parts);
    }

    #[test]
    fn test_idempotent() {
        let situations = make_buffer(10, TS);
        let mut parts = PartsBuffer::default();
        parts.insert(make_parts(TS - 7000, false)).unwrap();
        let setup = InterpolationSetup::default();
        let first = query(&situations, &parts, TS - 12_345, &setup);
        let second = query(&situations, &parts, TS - 12_345, &setup);
        assert_eq!(first, second);
    }

    #[test]
    fn test_altitude_pulled_down_before_landing() {
        let situations = make_buffer(2, TS);
        let render = TS + OFFSET_MS - 2500;
        let mut parts = PartsBuffer::default();
        parts.insert(make_parts(render - 1000 - OFFSET_MS, false)).unwrap();
        // Touchdown 2.5 s ahead, half of the blend horizon
        parts.insert(make_parts(render + 2500 - OFFSET_MS, true)).unwrap();

        let result = query(&situations, &parts, render, &InterpolationSetup::default());
        let blended = result.parts.as_ref().unwrap();
        assert!(!blended.parts.on_ground);
        assert!((blended.ground_factor - 0.5).abs() < 1e-12);
        // Halfway between 4950 m and the -1000 m ground elevation
        let altitude = result.situation.unwrap().position.altitude_msl_m;
        assert!((altitude - 1975.0).abs() < 1e-9, "altitude {}", altitude);

        let setup = InterpolationSetup {
            enabled_aircraft_parts: false,
            ..Default::default()
        };
        let unblended = query(&situations, &parts, render, &setup);
        assert_eq!(unblended.situation.unwrap().position.altitude_msl_m, 4950.0);
    }

    struct FixedElevation(f64);

    impl ElevationProvider for FixedElevation {
        fn elevation_within_range(&self, _lat: f64, _lon: f64, _radius_m: f64) -> Option<f64> {
            Some(self.0)
        }
    }

    #[test]
    fn test_on_ground_altitude_from_elevation_provider() {
        let mut situations = SituationBuffer::new(2);
        for i in (0..2).rev() {
            let mut situation = make_situation(i, TS);
            situation.ground_elevation_m = None;
            situations.insert(situation).unwrap();
        }
        let render = TS + OFFSET_MS - 2500;
        let mut parts = PartsBuffer::default();
        parts.insert(make_parts(render - 500 - OFFSET_MS, true)).unwrap();

        let cs = callsign();
        let resolver = GroundFlagResolver::default();
        let context = InterpolationContext {
            callsign: &cs,
            situations: &situations,
            parts: &parts,
            elevation: &FixedElevation(100.0),
            resolver: &resolver,
            cg_m: Some(2.0),
        };
        let result = LinearInterpolator.get_interpolation(&context, render, &InterpolationSetup::default());
        assert_eq!(result.parts.as_ref().unwrap().ground_factor, 1.0);
        let pose = result.situation.unwrap();
        assert_eq!(pose.on_ground, OnGround::OnGround);
        assert_eq!(pose.ground_elevation_m, Some(100.0));
        assert_eq!(pose.position.altitude_msl_m, 102.0);
    }

    #[test]
    fn test_timestamps_at_the_ends_of_the_range() {
        let mut situations = SituationBuffer::new(2);
        let mut oldest = make_situation(1, i64::MIN + 10 + DELTA_T_MS);
        oldest.time_offset_ms = 0;
        let mut newest = make_situation(0, i64::MAX - 10);
        newest.time_offset_ms = 0;
        situations.insert(oldest).unwrap();
        situations.insert(newest).unwrap();

        let mut parts = PartsBuffer::default();
        for (ts, on_ground) in [(i64::MIN + 10, true), (i64::MIN + 20, false), (i64::MAX - 10, true)] {
            let mut sample = make_parts(ts, on_ground);
            sample.time_offset_ms = 0;
            parts.insert(sample).unwrap();
        }

        let setup = InterpolationSetup::default();
        for render in [i64::MIN + 20, 0, i64::MAX - 20] {
            let result = query(&situations, &parts, render, &setup);
            assert!(result.status.is_interpolated);
            let pose = result.situation.unwrap();
            assert!(pose.position.latitude_deg.is_finite());
            assert!(pose.position.altitude_msl_m.is_finite());
            let ground_factor = result.parts.unwrap().ground_factor;
            assert!((0.0..=1.0).contains(&ground_factor));
        }

        let middle = query(&situations, &parts, 0, &setup).situation.unwrap();
        assert!((middle.position.latitude_deg + 0.5).abs() < 1e-6);
    }
}
