//! Discrete aircraft configuration (gear, flaps, lights, engines)

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::buffer::TimedSample;
use crate::error::SampleError;

/// Most engines a parts sample can describe
pub const MAX_ENGINES: usize = 6;

bitflags! {
    /// Light circuits
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct Lights: u8 {
        const STROBE = 0b0000_0001;
        const LANDING = 0b0000_0010;
        const TAXI = 0b0000_0100;
        const BEACON = 0b0000_1000;
        const NAV = 0b0001_0000;
        const LOGO = 0b0010_0000;
    }
}

/// A single engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Engine {
    /// 1-based engine number
    pub number: u8,
    pub on: bool,
}

/// Aircraft parts sample
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Parts {
    /// Sender timestamp, ms since the Unix epoch
    pub timestamp_ms: i64,
    #[serde(default)]
    pub time_offset_ms: i64,
    pub gear_down: bool,
    /// Flaps extension, percent (0-100)
    pub flaps_percent: u8,
    pub spoilers_out: bool,
    pub lights: Lights,
    #[serde(default)]
    pub engines: Vec<Engine>,
    pub on_ground: bool,
}

impl Parts {
    pub fn new(timestamp_ms: i64) -> Self {
        Parts {
            timestamp_ms,
            time_offset_ms: 0,
            gear_down: false,
            flaps_percent: 0,
            spoilers_out: false,
            lights: Lights::empty(),
            engines: Vec::new(),
            on_ground: false,
        }
    }

    /// Timestamp plus time offset
    pub fn adjusted_ms(&self) -> i64 {
        self.timestamp_ms.saturating_add(self.time_offset_ms)
    }

    /// Clamp flaps and drop engines beyond [`MAX_ENGINES`]
    pub fn sanitized(mut self) -> Self {
        self.flaps_percent = self.flaps_percent.min(100);
        self.engines.truncate(MAX_ENGINES);
        self
    }

    pub fn is_engine_on(&self, number: u8) -> bool {
        self.engines.iter().any(|e| e.number == number && e.on)
    }

    pub fn engines_on(&self) -> usize {
        self.engines.iter().filter(|e| e.on).count()
    }
}

impl TimedSample for Parts {
    fn adjusted_ms(&self) -> i64 {
        Parts::adjusted_ms(self)
    }

    // Parts carry no floating point values
    fn validate(&self) -> Result<(), SampleError> {
        Ok(())
    }
}
