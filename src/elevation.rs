//! In-memory elevation cache.
//!
//! Remembers ground elevation points reported by the simulator (or read from
//! a recording) and answers [`ElevationProvider`] lookups with the nearest
//! point inside the search radius. Oldest points are forgotten first.

use log::trace;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::sync::{PoisonError, RwLock};

use traffic_core::ElevationProvider;

/// Meters per degree of latitude (60 nautical miles)
pub const METERS_PER_DEGREE_LATITUDE: f64 = 60.0 * 1852.0;

/// Points closer than this replace each other
const SAME_POINT_M: f64 = 1.0;

#[inline]
pub fn meters_per_degree_longitude(lat_deg: f64) -> f64 {
    METERS_PER_DEGREE_LATITUDE * lat_deg.to_radians().cos()
}

/// Approximate ground distance between two coordinates in meters.
///
/// Flat earth around the first point, good enough for the few hundred
/// meters elevation lookups care about.
pub fn distance_m(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let dlat_m = (lat2 - lat1) * METERS_PER_DEGREE_LATITUDE;
    let dlon = traffic_core::angle::shortest_delta(lon1, lon2);
    let dlon_m = dlon * meters_per_degree_longitude(lat1);
    dlat_m.hypot(dlon_m)
}

/// A known ground elevation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElevationPoint {
    pub latitude_deg: f64,
    pub longitude_deg: f64,
    /// Meters MSL
    pub elevation_m: f64,
}

impl ElevationPoint {
    pub fn new(latitude_deg: f64, longitude_deg: f64, elevation_m: f64) -> Self {
        ElevationPoint {
            latitude_deg,
            longitude_deg,
            elevation_m,
        }
    }

    fn is_finite(&self) -> bool {
        self.latitude_deg.is_finite() && self.longitude_deg.is_finite() && self.elevation_m.is_finite()
    }
}

#[derive(Debug)]
pub struct ElevationCache {
    max_points: usize,
    points: RwLock<VecDeque<ElevationPoint>>,
}

impl ElevationCache {
    pub fn new(max_points: usize) -> Self {
        let max_points = max_points.max(1);
        ElevationCache {
            max_points,
            points: RwLock::new(VecDeque::with_capacity(max_points)),
        }
    }

    /// Remember a point, returns false for non-finite input
    pub fn remember(&self, point: ElevationPoint) -> bool {
        if !point.is_finite() {
            return false;
        }
        let mut points = self.points.write().unwrap_or_else(PoisonError::into_inner);
        points.retain(|p| {
            distance_m(p.latitude_deg, p.longitude_deg, point.latitude_deg, point.longitude_deg)
                > SAME_POINT_M
        });
        if points.len() >= self.max_points {
            points.pop_front();
        }
        points.push_back(point);
        trace!("Elevation cache holds {} points", points.len());
        true
    }

    pub fn len(&self) -> usize {
        self.points.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.points.write().unwrap_or_else(PoisonError::into_inner).clear();
    }
}

impl ElevationProvider for ElevationCache {
    fn elevation_within_range(&self, latitude_deg: f64, longitude_deg: f64, radius_m: f64) -> Option<f64> {
        let points = self.points.read().unwrap_or_else(PoisonError::into_inner);
        points
            .iter()
            .map(|p| (p, distance_m(latitude_deg, longitude_deg, p.latitude_deg, p.longitude_deg)))
            .filter(|(_, distance)| *distance <= radius_m)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(p, _)| p.elevation_m)
    }
}
