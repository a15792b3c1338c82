//! Angle helpers
//!
//! Headings, pitch and bank arrive in arbitrary ranges (0..360, -180..180 or
//! unnormalized). Interpolation needs the signed shortest delta between two of
//! them; display code wants a canonical range.

/// Normalize an angle in degrees into (-180, 180]
pub fn normalize_180(deg: f64) -> f64 {
    let d = deg.rem_euclid(360.0);
    if d > 180.0 {
        d - 360.0
    } else {
        d
    }
}

/// Normalize an angle in degrees into [0, 360)
pub fn normalize_360(deg: f64) -> f64 {
    let d = deg.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if d >= 360.0 {
        0.0
    } else {
        d
    }
}

/// Signed shortest rotation from `from` to `to`, in degrees.
///
/// The result lies in (-180, 180]. A rotation of exactly half a turn is
/// always reported as +180, i.e. towards increasing angles.
pub fn shortest_delta(from: f64, to: f64) -> f64 {
    normalize_180(to - from)
}

/// Interpolate between two angles along the shortest arc.
///
/// The result is `a0 + f * shortest_delta(a0, a1)` and is left unnormalized,
/// so a sweep from 270 to 30 produces values above 360.
pub fn interpolate_angle(a0: f64, a1: f64, fraction: f64) -> f64 {
    a0 + fraction * shortest_delta(a0, a1)
}
