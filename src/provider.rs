//! Remote aircraft provider.
//!
//! Owns the per-callsign situation and parts buffers and answers
//! interpolation queries for the render loop.
//!
//! Locking: a coarse map lock is held only to look up, add or remove an
//! aircraft. Every aircraft has its own lock guarding an `Arc` snapshot of its
//! buffers. Writers modify the snapshot copy-on-write; readers clone the `Arc`
//! and interpolate with no lock held, so a render query never waits on more
//! than a pointer copy.

use chrono::Utc;
use log::{debug, info, trace, warn};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use traffic_core::{
    interpolator_for, Callsign, ElevationProvider, GroundFlagResolver, InsertOutcome,
    InterpolationContext, InterpolationResult, InterpolationSetup, Parts, PartsBuffer, Situation,
    SituationBuffer,
};

use crate::config::ProviderConfig;
use crate::interpolation_log::InterpolationLogger;

fn read_lock<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

fn write_lock<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}

/// Spread of time between consecutive situations of one aircraft
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimestampDifference {
    pub min_ms: i64,
    pub max_ms: i64,
    pub mean_ms: f64,
}

/// Immutable view of one aircraft's buffers
#[derive(Debug, Clone)]
struct AircraftSnapshot {
    situations: SituationBuffer,
    parts: PartsBuffer,
    cg_m: Option<f64>,
    situations_last_modified_ms: Option<i64>,
    parts_last_modified_ms: Option<i64>,
}

impl AircraftSnapshot {
    fn new(config: &ProviderConfig) -> Self {
        AircraftSnapshot {
            situations: SituationBuffer::new(config.max_situations_per_callsign),
            parts: PartsBuffer::new(config.max_parts_per_callsign),
            cg_m: None,
            situations_last_modified_ms: None,
            parts_last_modified_ms: None,
        }
    }
}

#[derive(Debug)]
struct AircraftEntry {
    snapshot: RwLock<Arc<AircraftSnapshot>>,
}

impl AircraftEntry {
    fn new(config: &ProviderConfig) -> Self {
        AircraftEntry {
            snapshot: RwLock::new(Arc::new(AircraftSnapshot::new(config))),
        }
    }

    fn snapshot(&self) -> Arc<AircraftSnapshot> {
        read_lock(&self.snapshot).clone()
    }

    fn modify<R>(&self, f: impl FnOnce(&mut AircraftSnapshot) -> R) -> R {
        let mut guard = write_lock(&self.snapshot);
        f(Arc::make_mut(&mut *guard))
    }
}

#[derive(Debug, Default)]
struct Setups {
    global: InterpolationSetup,
    per_callsign: HashMap<Callsign, InterpolationSetup>,
}

#[derive(Debug, Default)]
struct Counters {
    situations_added: AtomicU64,
    parts_added: AtomicU64,
}

#[derive(Clone)]
pub struct RemoteAircraftProvider {
    config: ProviderConfig,
    resolver: GroundFlagResolver,
    aircraft: Arc<RwLock<HashMap<Callsign, Arc<AircraftEntry>>>>,
    setups: Arc<RwLock<Setups>>,
    elevation: Arc<dyn ElevationProvider>,
    logger: InterpolationLogger,
    counters: Arc<Counters>,
}

impl RemoteAircraftProvider {
    pub fn new(config: ProviderConfig, elevation: Arc<dyn ElevationProvider>) -> Self {
        RemoteAircraftProvider {
            resolver: GroundFlagResolver::new(config.ground),
            logger: InterpolationLogger::new(config.max_log_entries),
            config,
            aircraft: Arc::new(RwLock::new(HashMap::new())),
            setups: Arc::new(RwLock::new(Setups::default())),
            elevation,
            counters: Arc::new(Counters::default()),
        }
    }

    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    pub fn logger(&self) -> &InterpolationLogger {
        &self.logger
    }

    fn entry(&self, callsign: &Callsign) -> Option<Arc<AircraftEntry>> {
        read_lock(&self.aircraft).get(callsign).cloned()
    }

    fn entry_or_insert(&self, callsign: &Callsign) -> Arc<AircraftEntry> {
        if let Some(entry) = self.entry(callsign) {
            return entry;
        }
        let mut aircraft = write_lock(&self.aircraft);
        aircraft
            .entry(callsign.clone())
            .or_insert_with(|| {
                info!("{}: added remote aircraft", callsign);
                Arc::new(AircraftEntry::new(&self.config))
            })
            .clone()
    }

    fn snapshot(&self, callsign: &Callsign) -> Option<Arc<AircraftSnapshot>> {
        // Map lock is released before the aircraft lock is taken
        let entry = self.entry(callsign)?;
        Some(entry.snapshot())
    }

    ///
    /// Add a situation, creating the aircraft on its first sample.
    /// Corrupt samples are logged and dropped; returns what happened.
    ///
    pub fn insert_new_situation(&self, situation: Situation) -> Option<InsertOutcome> {
        if let Err(e) = situation.validate() {
            warn!("{}: dropping situation: {}", situation.callsign, e);
            return None;
        }

        let callsign = situation.callsign.clone();
        let entry = self.entry_or_insert(&callsign);
        let result = entry.modify(|snapshot| {
            let result = snapshot.situations.insert(situation);
            if result.is_ok() {
                snapshot.situations_last_modified_ms = Some(Utc::now().timestamp_millis());
            }
            result
        });

        match result {
            Ok(outcome) => {
                self.counters.situations_added.fetch_add(1, Ordering::Relaxed);
                log_outcome(&callsign, "situation", outcome);
                Some(outcome)
            }
            Err(e) => {
                warn!("{}: dropping situation: {}", callsign, e);
                None
            }
        }
    }

    ///
    /// Add a parts sample. A full update also drops parts that are more than
    /// `max_parts_age_ms` older than the new sample.
    ///
    pub fn insert_new_aircraft_parts(
        &self,
        callsign: &Callsign,
        parts: Parts,
        is_full_update: bool,
    ) -> Option<InsertOutcome> {
        let parts = parts.sanitized();
        let min_ms = parts.adjusted_ms().saturating_sub(self.config.max_parts_age_ms);
        let entry = self.entry_or_insert(callsign);

        let (result, pruned) = entry.modify(|snapshot| {
            let result = snapshot.parts.insert(parts);
            let pruned = if is_full_update && result.is_ok() {
                snapshot.parts.remove_older_than(min_ms)
            } else {
                0
            };
            if result.is_ok() {
                snapshot.parts_last_modified_ms = Some(Utc::now().timestamp_millis());
            }
            (result, pruned)
        });

        if pruned > 0 {
            debug!("{}: pruned {} outdated parts", callsign, pruned);
        }
        match result {
            Ok(outcome) => {
                self.counters.parts_added.fetch_add(1, Ordering::Relaxed);
                log_outcome(callsign, "parts", outcome);
                Some(outcome)
            }
            Err(e) => {
                warn!("{}: dropping parts: {}", callsign, e);
                None
            }
        }
    }

    ///
    /// Interpolated pose of `callsign` at `render_ms` using `setup`.
    /// Never fails; unknown aircraft give an unavailable result.
    ///
    pub fn get_interpolation(
        &self,
        callsign: &Callsign,
        render_ms: i64,
        setup: &InterpolationSetup,
    ) -> InterpolationResult {
        let snapshot = match self.snapshot(callsign) {
            Some(snapshot) => snapshot,
            None => {
                trace!("{}: no data for interpolation", callsign);
                return InterpolationResult::unavailable(callsign.clone());
            }
        };

        let context = InterpolationContext {
            callsign,
            situations: &snapshot.situations,
            parts: &snapshot.parts,
            elevation: self.elevation.as_ref(),
            resolver: &self.resolver,
            cg_m: snapshot.cg_m,
        };
        let result = interpolator_for(setup.interpolator_mode).get_interpolation(&context, render_ms, setup);

        if setup.log_interpolation {
            self.logger.log_result(&result, setup.interpolator_mode, render_ms);
        }
        result
    }

    /// Like [`Self::get_interpolation`] with the setup stored for the callsign
    pub fn get_interpolation_with_stored_setup(&self, callsign: &Callsign, render_ms: i64) -> InterpolationResult {
        let setup = self.setup_for(callsign);
        self.get_interpolation(callsign, render_ms, &setup)
    }

    pub fn remove_aircraft(&self, callsign: &Callsign) -> bool {
        let removed = write_lock(&self.aircraft).remove(callsign).is_some();
        if removed {
            info!("{}: removed remote aircraft", callsign);
        }
        removed
    }

    /// Remove all aircraft, returns how many were removed
    pub fn clear(&self) -> usize {
        let mut aircraft = write_lock(&self.aircraft);
        let count = aircraft.len();
        aircraft.clear();
        if count > 0 {
            info!("Removed all {} remote aircraft", count);
        }
        count
    }

    /// Known callsigns, sorted
    pub fn aircraft_in_range_callsigns(&self) -> Vec<Callsign> {
        let mut callsigns: Vec<Callsign> = read_lock(&self.aircraft).keys().cloned().collect();
        callsigns.sort();
        callsigns
    }

    pub fn aircraft_in_range_count(&self) -> usize {
        read_lock(&self.aircraft).len()
    }

    pub fn is_aircraft_in_range(&self, callsign: &Callsign) -> bool {
        read_lock(&self.aircraft).contains_key(callsign)
    }

    /// Buffered situations, newest first
    pub fn remote_aircraft_situations(&self, callsign: &Callsign) -> Vec<Situation> {
        self.snapshot(callsign)
            .map(|s| s.situations.iter().rev().cloned().collect())
            .unwrap_or_default()
    }

    pub fn remote_aircraft_situations_count(&self, callsign: &Callsign) -> usize {
        self.snapshot(callsign).map_or(0, |s| s.situations.len())
    }

    /// Buffered parts, newest first
    pub fn remote_aircraft_parts(&self, callsign: &Callsign) -> Vec<Parts> {
        self.snapshot(callsign)
            .map(|s| s.parts.iter().rev().cloned().collect())
            .unwrap_or_default()
    }

    pub fn remote_aircraft_parts_count(&self, callsign: &Callsign) -> usize {
        self.snapshot(callsign).map_or(0, |s| s.parts.len())
    }

    pub fn is_remote_aircraft_supporting_parts(&self, callsign: &Callsign) -> bool {
        self.snapshot(callsign).map_or(false, |s| !s.parts.is_empty())
    }

    /// Callsigns with buffered parts, sorted
    pub fn remote_aircraft_supporting_parts(&self) -> Vec<Callsign> {
        self.aircraft_in_range_callsigns()
            .into_iter()
            .filter(|cs| self.is_remote_aircraft_supporting_parts(cs))
            .collect()
    }

    /// Newest situation of every aircraft, sorted by callsign
    pub fn latest_remote_aircraft_situations(&self) -> Vec<Situation> {
        self.aircraft_in_range_callsigns()
            .iter()
            .filter_map(|cs| self.snapshot(cs))
            .filter_map(|s| s.situations.latest().cloned())
            .collect()
    }

    /// Min, max and mean time between consecutive situations
    pub fn situations_timestamp_difference(&self, callsign: &Callsign) -> Option<TimestampDifference> {
        let snapshot = self.snapshot(callsign)?;
        let gaps: Vec<i64> = snapshot
            .situations
            .as_slice()
            .windows(2)
            .map(|pair| pair[1].adjusted_ms().saturating_sub(pair[0].adjusted_ms()))
            .collect();
        let min_ms = *gaps.iter().min()?;
        let max_ms = *gaps.iter().max()?;
        let mean_ms = gaps.iter().map(|gap| *gap as f64).sum::<f64>() / gaps.len() as f64;
        Some(TimestampDifference {
            min_ms,
            max_ms,
            mean_ms,
        })
    }

    /// Set the height of the center of gravity above the wheels
    pub fn update_cg(&self, callsign: &Callsign, cg_m: f64) -> bool {
        if !cg_m.is_finite() {
            return false;
        }
        match self.entry(callsign) {
            Some(entry) => {
                entry.modify(|snapshot| snapshot.cg_m = Some(cg_m));
                debug!("{}: CG set to {} m", callsign, cg_m);
                true
            }
            None => false,
        }
    }

    /// Attach a ground elevation to the newest situation of `callsign`
    pub fn update_aircraft_ground_elevation(&self, callsign: &Callsign, elevation_m: f64) -> bool {
        if !elevation_m.is_finite() {
            return false;
        }
        let entry = match self.entry(callsign) {
            Some(entry) => entry,
            None => return false,
        };
        entry.modify(|snapshot| match snapshot.situations.latest_mut() {
            Some(latest) => {
                latest.ground_elevation_m = Some(elevation_m);
                true
            }
            None => false,
        })
    }

    /// Situations accepted since creation
    pub fn situations_added(&self) -> u64 {
        self.counters.situations_added.load(Ordering::Relaxed)
    }

    /// Parts accepted since creation
    pub fn parts_added(&self) -> u64 {
        self.counters.parts_added.load(Ordering::Relaxed)
    }

    /// Wall clock time (ms) of the last situation change
    pub fn situations_last_modified(&self, callsign: &Callsign) -> Option<i64> {
        self.snapshot(callsign)?.situations_last_modified_ms
    }

    pub fn parts_last_modified(&self, callsign: &Callsign) -> Option<i64> {
        self.snapshot(callsign)?.parts_last_modified_ms
    }

    pub fn global_setup(&self) -> InterpolationSetup {
        read_lock(&self.setups).global.clone()
    }

    pub fn set_global_setup(&self, setup: InterpolationSetup) {
        let mut setups = write_lock(&self.setups);
        info!("Global interpolation setup: {:?}", setup);
        setups.global = setup;
    }

    /// Setup for `callsign`, the global one unless overridden
    pub fn setup_for(&self, callsign: &Callsign) -> InterpolationSetup {
        let setups = read_lock(&self.setups);
        setups
            .per_callsign
            .get(callsign)
            .unwrap_or(&setups.global)
            .clone()
    }

    ///
    /// Override the setup of one callsign. A setup equal to the global one
    /// removes the override. Returns true if anything changed.
    ///
    pub fn set_setup_for(&self, callsign: &Callsign, setup: InterpolationSetup) -> bool {
        let mut setups = write_lock(&self.setups);
        if setup == setups.global {
            return setups.per_callsign.remove(callsign).is_some();
        }
        match setups.per_callsign.insert(callsign.clone(), setup.clone()) {
            Some(previous) => previous != setup,
            None => true,
        }
    }

    /// Drop the override of `callsign`, true if there was one
    pub fn remove_setup_for(&self, callsign: &Callsign) -> bool {
        write_lock(&self.setups).per_callsign.remove(callsign).is_some()
    }

    pub fn callsigns_with_setup(&self) -> Vec<Callsign> {
        let mut callsigns: Vec<Callsign> = read_lock(&self.setups).per_callsign.keys().cloned().collect();
        callsigns.sort();
        callsigns
    }
}

fn log_outcome(callsign: &Callsign, kind: &str, outcome: InsertOutcome) {
    match outcome {
        InsertOutcome::Appended => trace!("{}: {} appended", callsign, kind),
        InsertOutcome::Replaced => debug!("{}: {} replaced sample with same timestamp", callsign, kind),
        InsertOutcome::OutOfOrder => debug!("{}: stale {} merged out of order", callsign, kind),
        InsertOutcome::TooOld => debug!("{}: {} older than buffered history, dropped", callsign, kind),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use traffic_core::{GeoPosition, GroundProvenance, InterpolatorMode, NoElevation, OnGround, OnGroundHint};

    fn provider() -> RemoteAircraftProvider {
        RemoteAircraftProvider::new(ProviderConfig::default(), Arc::new(NoElevation))
    }

    fn cs(name: &str) -> Callsign {
        Callsign::new(name).unwrap()
    }

    fn make_situation(callsign: &str, ts: i64, lat: f64) -> Situation {
        let mut situation = Situation::new(cs(callsign), ts, GeoPosition::new(lat, 8.0, 1000.0));
        situation.on_ground = OnGroundHint::FromNetwork;
        situation
    }

    #[test]
    fn test_unknown_callsign_unavailable() {
        let provider = provider();
        let result = provider.get_interpolation(&cs("GHOST"), 0, &InterpolationSetup::default());
        assert!(!result.is_available());
        assert_eq!(result.callsign, cs("GHOST"));
    }

    #[test]
    fn test_insert_creates_aircraft() {
        let provider = provider();
        assert_eq!(
            provider.insert_new_situation(make_situation("ABC", 1000, 1.0)),
            Some(InsertOutcome::Appended)
        );
        assert!(provider.is_aircraft_in_range(&cs("abc")));
        assert_eq!(provider.aircraft_in_range_count(), 1);
        assert_eq!(provider.situations_added(), 1);
        assert!(provider.situations_last_modified(&cs("ABC")).is_some());
        assert!(provider.parts_last_modified(&cs("ABC")).is_none());
    }

    #[test]
    fn test_corrupt_situation_dropped() {
        let provider = provider();
        let mut bad = make_situation("BAD", 1000, 1.0);
        bad.heading_deg = f64::NAN;
        assert_eq!(provider.insert_new_situation(bad), None);
        assert!(!provider.is_aircraft_in_range(&cs("BAD")));
        assert_eq!(provider.situations_added(), 0);
    }

    #[test]
    fn test_situations_newest_first() {
        let provider = provider();
        provider.insert_new_situation(make_situation("ORD", 2000, 2.0));
        provider.insert_new_situation(make_situation("ORD", 1000, 1.0));
        provider.insert_new_situation(make_situation("ORD", 3000, 3.0));
        let situations = provider.remote_aircraft_situations(&cs("ORD"));
        let ts: Vec<i64> = situations.iter().map(|s| s.timestamp_ms).collect();
        assert_eq!(ts, vec![3000, 2000, 1000]);
        assert_eq!(provider.remote_aircraft_situations_count(&cs("ORD")), 3);
    }

    #[test]
    fn test_buffer_capacity_from_config() {
        let config = ProviderConfig {
            max_situations_per_callsign: 3,
            ..Default::default()
        };
        let provider = RemoteAircraftProvider::new(config, Arc::new(NoElevation));
        for i in 0..10 {
            provider.insert_new_situation(make_situation("CAP", i * 1000, i as f64));
        }
        assert_eq!(provider.remote_aircraft_situations_count(&cs("CAP")), 3);
    }

    #[test]
    fn test_parts_full_update_prunes() {
        let provider = provider();
        let callsign = cs("PRT");
        provider.insert_new_aircraft_parts(&callsign, Parts::new(0), false);
        provider.insert_new_aircraft_parts(&callsign, Parts::new(30_000), false);
        assert_eq!(provider.remote_aircraft_parts_count(&callsign), 2);

        provider.insert_new_aircraft_parts(&callsign, Parts::new(70_000), true);
        let parts = provider.remote_aircraft_parts(&callsign);
        let ts: Vec<i64> = parts.iter().map(|p| p.timestamp_ms).collect();
        assert_eq!(ts, vec![70_000, 30_000]);
        assert!(provider.is_remote_aircraft_supporting_parts(&callsign));
        assert_eq!(provider.remote_aircraft_supporting_parts(), vec![callsign]);
        assert_eq!(provider.parts_added(), 3);
    }

    #[test]
    fn test_remove_and_clear() {
        let provider = provider();
        provider.insert_new_situation(make_situation("ONE", 0, 0.0));
        provider.insert_new_situation(make_situation("TWO", 0, 0.0));
        assert!(provider.remove_aircraft(&cs("ONE")));
        assert!(!provider.remove_aircraft(&cs("ONE")));
        assert_eq!(provider.aircraft_in_range_callsigns(), vec![cs("TWO")]);
        assert_eq!(provider.clear(), 1);
        assert_eq!(provider.aircraft_in_range_count(), 0);
        let result = provider.get_interpolation(&cs("TWO"), 0, &InterpolationSetup::default());
        assert!(!result.is_available());
    }

    #[test]
    fn test_timestamp_difference() {
        let provider = provider();
        assert!(provider.situations_timestamp_difference(&cs("GAP")).is_none());
        for ts in [0, 1000, 3000, 7000] {
            provider.insert_new_situation(make_situation("GAP", ts, 0.0));
        }
        let diff = provider.situations_timestamp_difference(&cs("GAP")).unwrap();
        assert_eq!(diff.min_ms, 1000);
        assert_eq!(diff.max_ms, 4000);
        assert!((diff.mean_ms - 7000.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_latest_situations() {
        let provider = provider();
        provider.insert_new_situation(make_situation("BBB", 0, 0.0));
        provider.insert_new_situation(make_situation("BBB", 1000, 1.0));
        provider.insert_new_situation(make_situation("AAA", 500, 5.0));
        let latest = provider.latest_remote_aircraft_situations();
        assert_eq!(latest.len(), 2);
        assert_eq!(latest[0].callsign, cs("AAA"));
        assert_eq!(latest[1].timestamp_ms, 1000);
    }

    #[test]
    fn test_ground_elevation_and_cg() {
        let provider = provider();
        let callsign = cs("ELV");
        assert!(!provider.update_cg(&callsign, 2.0));
        provider.insert_new_situation(make_situation("ELV", 0, 0.0));
        provider.insert_new_situation(make_situation("ELV", 1000, 0.0));
        assert!(provider.update_aircraft_ground_elevation(&callsign, 998.0));
        assert!(!provider.update_aircraft_ground_elevation(&callsign, f64::NAN));
        assert!(provider.update_cg(&callsign, 2.5));

        let result = provider.get_interpolation(&callsign, 500, &InterpolationSetup::default());
        let status = result.status;
        assert_eq!(status.ground.provenance, GroundProvenance::FromElevation);
        assert_eq!(status.ground.height_above_ground_m, Some(2.0));
        assert_eq!(result.situation.unwrap().on_ground, OnGround::OnGround);
    }

    #[test]
    fn test_setups() {
        let provider = provider();
        let callsign = cs("SET");
        assert_eq!(provider.setup_for(&callsign), InterpolationSetup::default());

        let linear = InterpolationSetup::default().with_mode(InterpolatorMode::Linear);
        assert!(provider.set_setup_for(&callsign, linear.clone()));
        assert!(!provider.set_setup_for(&callsign, linear.clone()));
        assert_eq!(provider.setup_for(&callsign).interpolator_mode, InterpolatorMode::Linear);
        assert_eq!(provider.callsigns_with_setup(), vec![callsign.clone()]);

        // Equal to global removes the override
        assert!(provider.set_setup_for(&callsign, InterpolationSetup::default()));
        assert!(provider.callsigns_with_setup().is_empty());

        provider.set_global_setup(linear.clone());
        assert_eq!(provider.setup_for(&callsign), linear);

        let logging = InterpolationSetup {
            log_interpolation: true,
            ..Default::default()
        };
        assert!(provider.set_setup_for(&callsign, logging.clone()));
        assert_eq!(provider.setup_for(&callsign), logging);
        assert!(provider.remove_setup_for(&callsign));
        assert!(!provider.remove_setup_for(&callsign));
        assert_eq!(provider.setup_for(&callsign), linear);
    }

    #[test]
    fn test_logging_follows_setup() {
        let provider = provider();
        let callsign = cs("LOG");
        provider.insert_new_situation(make_situation("LOG", 0, 0.0));
        provider.insert_new_situation(make_situation("LOG", 1000, 1.0));

        provider.get_interpolation(&callsign, 500, &InterpolationSetup::default());
        assert!(provider.logger().situation_logs(None).is_empty());

        let setup = InterpolationSetup {
            log_interpolation: true,
            ..Default::default()
        };
        let result = provider.get_interpolation(&callsign, 500, &setup);
        let logs = provider.logger().situation_logs(Some(&callsign));
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].latitude_deg, result.situation.unwrap().position.latitude_deg);
    }

    #[test]
    fn test_snapshot_survives_writes() {
        let provider = provider();
        let callsign = cs("SNAP");
        provider.insert_new_situation(make_situation("SNAP", 0, 0.0));
        let snapshot = provider.snapshot(&callsign).unwrap();
        provider.insert_new_situation(make_situation("SNAP", 1000, 1.0));
        assert_eq!(snapshot.situations.len(), 1);
        assert_eq!(provider.snapshot(&callsign).unwrap().situations.len(), 2);
    }
}
