//! Parts selection with a smooth ground factor
//!
//! Parts are discrete, so the sample in effect at the query time is used
//! as is. The one continuous value is the ground factor (1 = on ground,
//! 0 = airborne) which is blended over a few seconds around takeoff and
//! landing so gear compression and ground effects do not snap.

use serde::{Deserialize, Serialize};

use crate::aviation::Parts;
use crate::buffer::PartsBuffer;

/// Seconds over which the ground factor is blended
pub const GROUND_BLEND_SECS: f64 = 5.0;

/// Parts in effect at a given time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterpolatedParts {
    pub parts: Parts,
    /// 1.0 on the ground, 0.0 airborne, in between around takeoff/landing
    pub ground_factor: f64,
}

/// Smootherstep easing, clamped to [0, 1]
pub fn smootherstep(x: f64) -> f64 {
    let x = x.clamp(0.0, 1.0);
    x * x * x * (x * (x * 6.0 - 15.0) + 10.0)
}

/// Parts in effect at `time_ms`.
///
/// Uses the newest sample at or before the query time, or the earliest
/// sample when all are in the future. Returns `None` for an empty buffer.
pub fn interpolate_parts(parts: &PartsBuffer, time_ms: i64) -> Option<InterpolatedParts> {
    let samples = parts.as_slice();
    let split = samples.partition_point(|p| p.adjusted_ms() <= time_ms);
    let (older, newer) = samples.split_at(split);

    let current = match older.last() {
        Some(current) => current,
        None => {
            let earliest = newer.first()?;
            return Some(InterpolatedParts {
                parts: earliest.clone(),
                ground_factor: if earliest.on_ground { 1.0 } else { 0.0 },
            });
        }
    };

    if current.on_ground {
        return Some(InterpolatedParts {
            parts: current.clone(),
            ground_factor: 1.0,
        });
    }

    // First airborne sample after the latest on-ground one
    let takeoff = older
        .windows(2)
        .rev()
        .find(|pair| pair[0].on_ground)
        .map(|pair| &pair[1]);
    let landing = newer.iter().find(|p| p.on_ground);

    let takeoff_factor = match takeoff {
        Some(takeoff) => time_ms.saturating_sub(takeoff.adjusted_ms()) as f64 / 1000.0 / GROUND_BLEND_SECS,
        None => 1.0,
    };
    let landing_factor = match landing {
        Some(landing) => {
            let until_landing = landing.adjusted_ms().saturating_sub(time_ms) as f64 / 1000.0;
            // The future is only known as far ahead as the sample offset reaches
            let predictable = GROUND_BLEND_SECS.min(landing.time_offset_ms as f64 / 1000.0);
            if predictable > 0.0 {
                until_landing / predictable
            } else {
                0.0
            }
        }
        None => 1.0,
    };

    let airborne = takeoff_factor.min(landing_factor).min(1.0);
    Some(InterpolatedParts {
        parts: current.clone(),
        ground_factor: 1.0 - smootherstep(airborne),
    })
}
