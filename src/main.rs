use clap::Parser;
use log::{info, warn};
use miette::{IntoDiagnostic, Result};
use std::io::{self, BufWriter, Write};
use std::sync::Arc;

use traffic_core::{angle::normalize_360, Callsign, InterpolationResult};
use traffic_interp::config::Settings;
use traffic_interp::elevation::ElevationCache;
use traffic_interp::recording::{self, Replayer};
use traffic_interp::{Cli, RemoteAircraftProvider, VERSION};

fn main() -> Result<()> {
    let args = Cli::parse();

    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();
    info!("traffic-interp {}", VERSION);

    let settings_path = match &args.config {
        Some(path) => path.clone(),
        None => Settings::default_path().into_diagnostic()?,
    };
    let mut settings = Settings::load_from(&settings_path).into_diagnostic()?;
    settings.override_all(args.mode, args.log || args.log_file.is_some());

    if args.save_config {
        settings.save_to(&settings_path).into_diagnostic()?;
        return Ok(());
    }

    let elevation = Arc::new(ElevationCache::new(settings.provider.elevation_cache_size));
    let provider = RemoteAircraftProvider::new(settings.provider.clone(), elevation.clone());
    provider.set_global_setup(settings.setup.clone());
    for (callsign, setup) in &settings.callsign_setups {
        provider.set_setup_for(callsign, setup.clone());
    }

    let events = recording::load(&args.recording).into_diagnostic()?;
    let (first, last) = match recording::time_span(&events) {
        Some(span) => span,
        None => {
            warn!("{} holds no traffic", args.recording.display());
            return Ok(());
        }
    };
    let start = args.start.unwrap_or(first);
    let end = args.end.unwrap_or(last);
    let step_ms = (1000 / args.fps.max(1)).max(1) as usize;

    let filter: Vec<Callsign> = args
        .callsigns
        .iter()
        .filter_map(|cs| match Callsign::new(cs) {
            Ok(callsign) => Some(callsign),
            Err(e) => {
                warn!("Ignoring callsign '{}': {}", cs, e);
                None
            }
        })
        .collect();

    let mut replayer = Replayer::new(events);
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    writeln!(
        out,
        "time_ms,callsign,latitude_deg,longitude_deg,altitude_m,heading_deg,pitch_deg,bank_deg,ground_speed_kts,on_ground,interpolated,extrapolated,method"
    )
    .into_diagnostic()?;

    let mut frames = 0usize;
    for render_ms in (start..=end).step_by(step_ms) {
        replayer.advance_to(render_ms, &provider, &elevation);
        for callsign in provider.aircraft_in_range_callsigns() {
            if !filter.is_empty() && !filter.contains(&callsign) {
                continue;
            }
            let result = provider.get_interpolation_with_stored_setup(&callsign, render_ms);
            write_row(&mut out, render_ms, &result).into_diagnostic()?;
        }
        frames += 1;
    }
    out.flush().into_diagnostic()?;

    let total = replayer.total();
    info!(
        "Rendered {} frames: {} situations, {} parts, {} elevation points, {} rejected",
        frames, total.situations, total.parts, total.elevations, total.rejected
    );

    if let Some(path) = &args.log_file {
        provider.logger().write_json(path).into_diagnostic()?;
    } else if args.log {
        let path = provider.logger().write_to_data_dir().into_diagnostic()?;
        info!("Interpolation log written to {}", path.display());
    }
    Ok(())
}

fn write_row<W: Write>(out: &mut W, render_ms: i64, result: &InterpolationResult) -> io::Result<()> {
    let situation = match &result.situation {
        Some(situation) => situation,
        None => return Ok(()),
    };
    writeln!(
        out,
        "{},{},{:.7},{:.7},{:.2},{:.2},{:.2},{:.2},{:.1},{:?},{},{},{}",
        render_ms,
        result.callsign,
        situation.position.latitude_deg,
        situation.position.longitude_deg,
        situation.position.altitude_msl_m,
        normalize_360(situation.pbh.heading_deg),
        situation.pbh.pitch_deg,
        situation.pbh.bank_deg,
        situation.ground_speed_kts,
        situation.on_ground,
        result.status.is_interpolated,
        result.status.is_extrapolated,
        result.status.method,
    )
}
