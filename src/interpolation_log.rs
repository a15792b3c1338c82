//! Interpolation logger.
//!
//! When `logInterpolation` is enabled for an aircraft, every query result is
//! recorded here. The log is a bounded ring per kind (situations and parts)
//! and can be written to a JSON file for offline analysis. Logging never
//! changes a result.

use chrono::{DateTime, Utc};
use log::{debug, info};
use serde::Serialize;
use std::collections::VecDeque;
use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};
use thiserror::Error;

use traffic_core::{
    Callsign, GroundProvenance, InterpolationResult, InterpolatorMode, OnGround, Parts,
};

use crate::config::get_project_dirs;

#[derive(Error, Debug)]
pub enum LogWriteError {
    #[error("No directory available for interpolation logs")]
    NoLogDirectory,

    #[error("Cannot write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Cannot serialize interpolation log: {0}")]
    Json(#[from] serde_json::Error),
}

/// One situation query
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SituationLog {
    pub callsign: Callsign,
    pub logged_at: DateTime<Utc>,
    pub render_ms: i64,
    pub requested_mode: InterpolatorMode,
    pub method: InterpolatorMode,
    pub fraction: f64,
    pub is_interpolated: bool,
    pub is_extrapolated: bool,
    pub latitude_deg: f64,
    pub longitude_deg: f64,
    pub altitude_msl_m: f64,
    pub heading_deg: f64,
    pub pitch_deg: f64,
    pub bank_deg: f64,
    pub ground_speed_kts: f64,
    pub on_ground: OnGround,
    pub ground_provenance: GroundProvenance,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correlation_ms: Option<i64>,
}

/// One parts query
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PartsLog {
    pub callsign: Callsign,
    pub logged_at: DateTime<Utc>,
    pub render_ms: i64,
    pub parts: Parts,
    pub ground_factor: f64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LogFile<'a> {
    written_at: DateTime<Utc>,
    situations: &'a VecDeque<SituationLog>,
    parts: &'a VecDeque<PartsLog>,
}

#[derive(Debug, Default)]
struct Logs {
    situations: VecDeque<SituationLog>,
    parts: VecDeque<PartsLog>,
}

#[derive(Debug, Clone)]
pub struct InterpolationLogger {
    max_entries: usize,
    logs: Arc<Mutex<Logs>>,
}

impl InterpolationLogger {
    pub fn new(max_entries: usize) -> Self {
        InterpolationLogger {
            max_entries: max_entries.max(1),
            logs: Arc::new(Mutex::new(Logs::default())),
        }
    }

    /// Record a query result; results without a situation are skipped
    pub fn log_result(&self, result: &InterpolationResult, requested_mode: InterpolatorMode, render_ms: i64) {
        let situation = match &result.situation {
            Some(situation) => situation,
            None => return,
        };
        let now = Utc::now();
        let status = &result.status;

        let mut logs = self.logs.lock().unwrap_or_else(PoisonError::into_inner);
        push_bounded(
            &mut logs.situations,
            SituationLog {
                callsign: result.callsign.clone(),
                logged_at: now,
                render_ms,
                requested_mode,
                method: status.method,
                fraction: status.fraction,
                is_interpolated: status.is_interpolated,
                is_extrapolated: status.is_extrapolated,
                latitude_deg: situation.position.latitude_deg,
                longitude_deg: situation.position.longitude_deg,
                altitude_msl_m: situation.position.altitude_msl_m,
                heading_deg: situation.pbh.heading_deg,
                pitch_deg: situation.pbh.pitch_deg,
                bank_deg: situation.pbh.bank_deg,
                ground_speed_kts: situation.ground_speed_kts,
                on_ground: situation.on_ground,
                ground_provenance: status.ground.provenance,
                correlation_ms: status.ground.correlation_ms,
            },
            self.max_entries,
        );

        if let Some(parts) = &result.parts {
            push_bounded(
                &mut logs.parts,
                PartsLog {
                    callsign: result.callsign.clone(),
                    logged_at: now,
                    render_ms,
                    parts: parts.parts.clone(),
                    ground_factor: parts.ground_factor,
                },
                self.max_entries,
            );
        }
    }

    /// Situation logs, optionally for one callsign only, oldest first
    pub fn situation_logs(&self, callsign: Option<&Callsign>) -> Vec<SituationLog> {
        let logs = self.logs.lock().unwrap_or_else(PoisonError::into_inner);
        logs.situations
            .iter()
            .filter(|l| callsign.map_or(true, |cs| &l.callsign == cs))
            .cloned()
            .collect()
    }

    pub fn parts_logs(&self, callsign: Option<&Callsign>) -> Vec<PartsLog> {
        let logs = self.logs.lock().unwrap_or_else(PoisonError::into_inner);
        logs.parts
            .iter()
            .filter(|l| callsign.map_or(true, |cs| &l.callsign == cs))
            .cloned()
            .collect()
    }

    pub fn clear(&self) {
        let mut logs = self.logs.lock().unwrap_or_else(PoisonError::into_inner);
        logs.situations.clear();
        logs.parts.clear();
    }

    /// Write all entries as JSON to `path`
    pub fn write_json(&self, path: &Path) -> Result<(), LogWriteError> {
        let io_error = |source| LogWriteError::Io {
            path: path.to_owned(),
            source,
        };

        let logs = self.logs.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_error)?;
        }
        let file = fs::File::create(path).map_err(io_error)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(
            &mut writer,
            &LogFile {
                written_at: Utc::now(),
                situations: &logs.situations,
                parts: &logs.parts,
            },
        )?;
        writer.flush().map_err(io_error)?;
        info!(
            "Wrote {} situation and {} parts log entries to {}",
            logs.situations.len(),
            logs.parts.len(),
            path.display()
        );
        Ok(())
    }

    /// Write to a time stamped file in the `logs` folder of the data
    /// directory, returns its path
    pub fn write_to_data_dir(&self) -> Result<PathBuf, LogWriteError> {
        let dirs = get_project_dirs().ok_or(LogWriteError::NoLogDirectory)?;
        self.write_to_dir(&dirs.data_dir().join("logs"))
    }

    /// Write to a time stamped file in `dir`, returns its path
    pub fn write_to_dir(&self, dir: &Path) -> Result<PathBuf, LogWriteError> {
        let file_name = format!("interpolation_{}.json", Utc::now().format("%Y%m%d_%H%M%S"));
        let path = dir.join(file_name);
        debug!("Interpolation log file: {}", path.display());
        self.write_json(&path)?;
        Ok(path)
    }
}

fn push_bounded<T>(ring: &mut VecDeque<T>, entry: T, max_entries: usize) {
    while ring.len() >= max_entries {
        ring.pop_front();
    }
    ring.push_back(entry);
}
