//! # Traffic Interp
//!
//! Remote aircraft provider for multiplayer flight simulation.
//!
//! This crate wraps the pure interpolation engine in [`traffic_core`] with
//! everything a simulator client needs around it:
//! - Thread-safe per-callsign storage fed by the network receiver
//! - Interpolation queries for the render loop that never block on writers
//! - Settings files, an elevation cache and an interpolation logger
//! - A replay tool that runs recorded traffic through the provider
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                     traffic-interp                       │
//! │  ┌──────────────┐  ┌──────────────┐  ┌─────────────────┐ │
//! │  │ network      │  │ render loop  │  │ replay (CLI)    │ │
//! │  │ receiver     │  │              │  │ recording.rs    │ │
//! │  └──────┬───────┘  └──────┬───────┘  └───────┬─────────┘ │
//! │         ▼ insert          ▼ query            ▼           │
//! │  ┌─────────────────────────────────────────────────────┐ │
//! │  │       RemoteAircraftProvider (RwLock + Arc)         │ │
//! │  │  - per callsign SituationBuffer / PartsBuffer       │ │
//! │  │  - global and per callsign InterpolationSetup       │ │
//! │  │  - InterpolationLogger, ElevationCache              │ │
//! │  └─────────────────────────────────────────────────────┘ │
//! │         │                                                │
//! │         ▼                                                │
//! │  traffic_core (linear / spline / pbh / ground / parts)   │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key Components
//!
//! - [`provider::RemoteAircraftProvider`] - Per-callsign buffers and queries
//! - [`config::Settings`] - Settings file with provider limits and setups
//! - [`elevation::ElevationCache`] - Ground elevation lookups
//! - [`interpolation_log::InterpolationLogger`] - Optional query log
//! - [`recording::Replayer`] - Feeds recorded traffic into the provider
//!
//! ## Command-Line Interface
//!
//! See [`Cli`] for all available options. Key options:
//!
//! - `<RECORDING>` - JSON-lines traffic recording to replay
//! - `-m, --mode` - Force `linear` or `spline` interpolation
//! - `-f, --fps` - Frames per second to render (default: 30)
//! - `-v` - Increase verbosity (use multiple times)

use clap::Parser;
use std::path::PathBuf;

use traffic_core::InterpolatorMode;

pub mod config;
pub mod elevation;
pub mod interpolation_log;
pub mod provider;
pub mod recording;

pub use provider::RemoteAircraftProvider;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser, Clone, Debug)]
#[command(version = VERSION, about = "Replay recorded traffic through the interpolation engine")]
pub struct Cli {
    #[clap(flatten)]
    pub verbose: clap_verbosity_flag::Verbosity<clap_verbosity_flag::InfoLevel>,

    /// Recording to replay (JSON lines)
    pub recording: PathBuf,

    /// Settings file, default is the user configuration directory
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Interpolation mode for all aircraft, overriding the settings
    #[arg(short, long)]
    pub mode: Option<InterpolatorMode>,

    /// Frames per second to render
    #[arg(short, long, default_value_t = 30)]
    pub fps: u32,

    /// Only print these callsigns
    #[arg(long = "callsign")]
    pub callsigns: Vec<String>,

    /// First render time in ms, default is the start of the recording
    #[arg(long)]
    pub start: Option<i64>,

    /// Last render time in ms, default is the end of the recording
    #[arg(long)]
    pub end: Option<i64>,

    /// Log every interpolation and write the log to the data directory
    #[arg(long, default_value_t = false)]
    pub log: bool,

    /// Log every interpolation and write the log to this file
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Write the effective settings to the settings file and exit
    #[arg(long, default_value_t = false)]
    pub save_config: bool,
}
