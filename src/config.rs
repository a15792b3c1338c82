//! Settings file handling.
//!
//! Settings are stored as pretty printed JSON. Default location:
//! `~/.config/traffic-interp/settings.json` (platform equivalent on macOS
//! and Windows). A missing file is not an error; defaults are used.

use directories::ProjectDirs;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

use traffic_core::buffer::{DEFAULT_PARTS_CAPACITY, DEFAULT_SITUATION_CAPACITY, MAX_PARTS_AGE_MS};
use traffic_core::{Callsign, GroundSettings, InterpolationSetup, InterpolatorMode};

const SETTINGS_FILE: &str = "settings.json";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("No home directory available to hold the settings")]
    NoProjectDirectory,

    #[error("Cannot access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid settings in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub fn get_project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("org", "traffic-interp", "traffic-interp")
}

/// Limits and tunables of the [`crate::provider::RemoteAircraftProvider`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProviderConfig {
    pub max_situations_per_callsign: usize,
    pub max_parts_per_callsign: usize,
    /// Full parts updates drop parts older than this
    pub max_parts_age_ms: i64,
    pub ground: GroundSettings,
    /// Number of elevation points kept by the elevation cache
    pub elevation_cache_size: usize,
    /// Entries kept per log kind by the interpolation logger
    pub max_log_entries: usize,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        ProviderConfig {
            max_situations_per_callsign: DEFAULT_SITUATION_CAPACITY,
            max_parts_per_callsign: DEFAULT_PARTS_CAPACITY,
            max_parts_age_ms: MAX_PARTS_AGE_MS,
            ground: GroundSettings::default(),
            elevation_cache_size: 1000,
            max_log_entries: 2500,
        }
    }
}

/// Everything stored in the settings file
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub provider: ProviderConfig,
    /// Setup used for every aircraft without an override
    pub setup: InterpolationSetup,
    /// Per callsign overrides
    pub callsign_setups: BTreeMap<Callsign, InterpolationSetup>,
}

impl Settings {
    /// Default settings file location
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        let dirs = get_project_dirs().ok_or(ConfigError::NoProjectDirectory)?;
        Ok(dirs.config_dir().join(SETTINGS_FILE))
    }

    /// Load from the default location
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::default_path()?)
    }

    /// Load from `path`, falling back to defaults when it does not exist
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            info!("No settings at {}, using defaults", path.display());
            return Ok(Settings::default());
        }

        let file = fs::File::open(path).map_err(|source| ConfigError::Io {
            path: path.to_owned(),
            source,
        })?;
        let settings: Settings =
            serde_json::from_reader(BufReader::new(file)).map_err(|source| ConfigError::Json {
                path: path.to_owned(),
                source,
            })?;
        debug!("Loaded settings from {}: {:?}", path.display(), settings);
        Ok(settings)
    }

    /// Write to `path`, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let io_error = |source| ConfigError::Io {
            path: path.to_owned(),
            source,
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_error)?;
        }
        let file = fs::File::create(path).map_err(io_error)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, self).map_err(|source| ConfigError::Json {
            path: path.to_owned(),
            source,
        })?;
        writer.write_all(b"\n").map_err(io_error)?;
        writer.flush().map_err(io_error)?;
        info!("Saved settings to {}", path.display());
        Ok(())
    }

    /// Force a mode and/or interpolation logging on the global setup and
    /// every per callsign override
    pub fn override_all(&mut self, mode: Option<InterpolatorMode>, log_interpolation: bool) {
        let overrides = self.callsign_setups.values_mut();
        for setup in std::iter::once(&mut self.setup).chain(overrides) {
            if let Some(mode) = mode {
                setup.interpolator_mode = mode;
            }
            if log_interpolation {
                setup.log_interpolation = true;
            }
        }
    }
}
