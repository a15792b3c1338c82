//! Traffic recordings.
//!
//! A recording is a JSON-lines file, one event per line:
//!
//! ```text
//! {"type":"situation","callsign":"DLH4AB","timestampMs":1000,"position":{...},...}
//! {"type":"parts","callsign":"DLH4AB","fullUpdate":true,"parts":{...}}
//! {"type":"elevation","latitudeDeg":50.03,"longitudeDeg":8.57,"elevationM":111.0}
//! ```
//!
//! Blank lines and lines starting with `#` are ignored. The [`Replayer`] feeds
//! events into a provider in arrival order as the replay clock advances.

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

use traffic_core::{Callsign, Parts, Situation};

use crate::elevation::{ElevationCache, ElevationPoint};
use crate::provider::RemoteAircraftProvider;

#[derive(Error, Debug)]
pub enum RecordingError {
    #[error("Cannot open recording {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Read error in recording at line {line}: {source}")]
    Read {
        line: usize,
        #[source]
        source: io::Error,
    },

    #[error("Invalid event at line {line}: {source}")]
    Parse {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("Cannot write recording: {0}")]
    Write(#[from] io::Error),

    #[error("Cannot serialize event: {0}")]
    Serialize(#[from] serde_json::Error),
}

fn default_full_update() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum RecordingEvent {
    Situation(Situation),
    Parts {
        callsign: Callsign,
        #[serde(rename = "fullUpdate", default = "default_full_update")]
        full_update: bool,
        parts: Parts,
    },
    Elevation(ElevationPoint),
}

impl RecordingEvent {
    /// Time the event arrives over the network (sender timestamp).
    /// Elevation points are known from the start.
    pub fn arrival_ms(&self) -> i64 {
        match self {
            RecordingEvent::Situation(situation) => situation.timestamp_ms,
            RecordingEvent::Parts { parts, .. } => parts.timestamp_ms,
            RecordingEvent::Elevation(_) => i64::MIN,
        }
    }

    /// Time the event is meant to be displayed (timestamp + offset)
    pub fn display_ms(&self) -> Option<i64> {
        match self {
            RecordingEvent::Situation(situation) => Some(situation.adjusted_ms()),
            RecordingEvent::Parts { parts, .. } => Some(parts.adjusted_ms()),
            RecordingEvent::Elevation(_) => None,
        }
    }
}

/// Read all events from a JSON-lines reader
pub fn read_events<R: BufRead>(reader: R) -> Result<Vec<RecordingEvent>, RecordingError> {
    let mut events = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line_number = index + 1;
        let line = line.map_err(|source| RecordingError::Read {
            line: line_number,
            source,
        })?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let event = serde_json::from_str(trimmed).map_err(|source| RecordingError::Parse {
            line: line_number,
            source,
        })?;
        events.push(event);
    }
    Ok(events)
}

pub fn load(path: &Path) -> Result<Vec<RecordingEvent>, RecordingError> {
    let file = fs::File::open(path).map_err(|source| RecordingError::Open {
        path: path.to_owned(),
        source,
    })?;
    let events = read_events(BufReader::new(file))?;
    debug!("Loaded {} events from {}", events.len(), path.display());
    Ok(events)
}

pub fn write_events<W: Write>(events: &[RecordingEvent], mut writer: W) -> Result<(), RecordingError> {
    for event in events {
        serde_json::to_writer(&mut writer, event)?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;
    Ok(())
}

/// Display time span covered by the events
pub fn time_span(events: &[RecordingEvent]) -> Option<(i64, i64)> {
    let times = events.iter().filter_map(RecordingEvent::display_ms);
    let (min, max) = times.fold((i64::MAX, i64::MIN), |(min, max), t| (min.min(t), max.max(t)));
    (min <= max).then_some((min, max))
}

/// Counts of what a replay step delivered
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    pub situations: usize,
    pub parts: usize,
    pub elevations: usize,
    pub rejected: usize,
}

impl ReplaySummary {
    fn add(&mut self, other: ReplaySummary) {
        self.situations += other.situations;
        self.parts += other.parts;
        self.elevations += other.elevations;
        self.rejected += other.rejected;
    }
}

/// Feeds recorded events into a provider in arrival order
pub struct Replayer {
    events: Vec<RecordingEvent>,
    next: usize,
    total: ReplaySummary,
}

impl Replayer {
    pub fn new(mut events: Vec<RecordingEvent>) -> Self {
        // Stable: events arriving at the same time keep file order
        events.sort_by_key(RecordingEvent::arrival_ms);
        Replayer {
            events,
            next: 0,
            total: ReplaySummary::default(),
        }
    }

    pub fn is_finished(&self) -> bool {
        self.next >= self.events.len()
    }

    pub fn total(&self) -> ReplaySummary {
        self.total
    }

    /// Deliver every event that has arrived by `now_ms`
    pub fn advance_to(
        &mut self,
        now_ms: i64,
        provider: &RemoteAircraftProvider,
        elevation: &ElevationCache,
    ) -> ReplaySummary {
        let mut summary = ReplaySummary::default();
        while let Some(event) = self.events.get(self.next) {
            if event.arrival_ms() > now_ms {
                break;
            }
            self.next += 1;

            match event {
                RecordingEvent::Situation(situation) => {
                    match provider.insert_new_situation(situation.clone()) {
                        Some(_) => summary.situations += 1,
                        None => summary.rejected += 1,
                    }
                }
                RecordingEvent::Parts {
                    callsign,
                    full_update,
                    parts,
                } => match provider.insert_new_aircraft_parts(callsign, parts.clone(), *full_update) {
                    Some(_) => summary.parts += 1,
                    None => summary.rejected += 1,
                },
                RecordingEvent::Elevation(point) => {
                    if elevation.remember(*point) {
                        summary.elevations += 1;
                    } else {
                        warn!("Ignoring invalid elevation point {:?}", point);
                        summary.rejected += 1;
                    }
                }
            }
        }
        self.total.add(summary);
        summary
    }
}
