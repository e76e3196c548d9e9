//! CLI binary for the GPS tracker
//!
//! Starts the device worker in the background and runs the display loop on
//! the main thread.

use anyhow::{Context, Result};
use clap::{value_parser, Arg, Command};
use crossbeam_channel::unbounded;
use gps_tracker::{
    init_logging, spawn_worker, ConsoleDisplay, CsvTrackLog, DisplayFormat, TickOutcome,
    TileSource, TrackSink, TrackerConfig, DEFAULT_BAUD_RATE, DEFAULT_OUTPUT_PATH,
    DEFAULT_SERIAL_PORT, DEFAULT_TICK, MIN_DISTANCE_METERS,
};
use std::path::PathBuf;
use tracing::{error, info};

fn version() -> String {
    match option_env!("VERGEN_GIT_SHA") {
        Some(sha) if !sha.is_empty() && sha != "VERGEN_IDEMPOTENT_OUTPUT" => {
            let dirty = matches!(option_env!("VERGEN_GIT_DIRTY"), Some("true"));
            format!(
                "{} ({}{})",
                env!("CARGO_PKG_VERSION"),
                sha,
                if dirty { "-dirty" } else { "" }
            )
        }
        _ => env!("CARGO_PKG_VERSION").to_string(),
    }
}

fn build_command() -> Command {
    Command::new("GPS Tracker")
        .version(version())
        .about("Read GPS fixes from a serial device, track distance and heading, and log accepted fixes to CSV.")
        .arg(
            Arg::new("port")
                .long("port")
                .help("Serial device to read from")
                .value_name("DEVICE")
                .default_value(DEFAULT_SERIAL_PORT),
        )
        .arg(
            Arg::new("baud")
                .long("baud")
                .help("Serial baud rate")
                .value_name("RATE")
                .value_parser(value_parser!(u32))
                .default_value(DEFAULT_BAUD_RATE.to_string()),
        )
        .arg(
            Arg::new("output")
                .long("output")
                .help("CSV file that accepted fixes are appended to (header written on creation)")
                .value_name("FILE")
                .value_parser(value_parser!(PathBuf))
                .default_value(DEFAULT_OUTPUT_PATH),
        )
        .arg(
            Arg::new("min-distance")
                .long("min-distance")
                .help("Minimum spacing in meters between recorded path vertices")
                .value_name("METERS")
                .value_parser(value_parser!(f64))
                .default_value(MIN_DISTANCE_METERS.to_string()),
        )
        .arg(
            Arg::new("tiles")
                .long("tiles")
                .help("Map tile source: osm, google, satellite")
                .value_name("SOURCE")
                .default_value("osm"),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("Print display updates as JSON lines (requires the `json` feature)")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("debug")
                .long("debug")
                .help("Enable debug logging on stderr")
                .action(clap::ArgAction::SetTrue),
        )
}

fn display_format(json: bool) -> Result<DisplayFormat> {
    if !json {
        return Ok(DisplayFormat::Labels);
    }
    #[cfg(feature = "json")]
    {
        Ok(DisplayFormat::Json)
    }
    #[cfg(not(feature = "json"))]
    {
        anyhow::bail!("--json requires building with the `json` feature")
    }
}

fn main() -> Result<()> {
    let matches = build_command().get_matches();

    let debug = matches.get_flag("debug");
    init_logging(debug);

    let tiles = matches
        .get_one::<String>("tiles")
        .map(String::as_str)
        .unwrap_or("osm");

    let config = TrackerConfig {
        port: matches
            .get_one::<String>("port")
            .cloned()
            .unwrap_or_else(|| DEFAULT_SERIAL_PORT.to_string()),
        baud_rate: matches
            .get_one::<u32>("baud")
            .copied()
            .unwrap_or(DEFAULT_BAUD_RATE),
        output_path: matches
            .get_one::<PathBuf>("output")
            .cloned()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_PATH)),
        min_distance_meters: matches
            .get_one::<f64>("min-distance")
            .copied()
            .unwrap_or(MIN_DISTANCE_METERS),
        tile_source: tiles.parse::<TileSource>()?,
        ..Default::default()
    };
    config.validate()?;

    let format = display_format(matches.get_flag("json"))?;

    let log = CsvTrackLog::open(&config.output_path).with_context(|| {
        format!(
            "Failed to open track log: {}",
            config.output_path.display()
        )
    })?;

    let (tx, rx) = unbounded();
    let log_sink: Box<dyn TrackSink + Send> = Box::new(log);
    // Not joined: the reader runs for the life of the process
    let _worker = spawn_worker(config.clone(), Some(log_sink), tx)
        .context("Failed to start device reader thread")?;

    info!(
        port = %config.port,
        output = %config.output_path.display(),
        "tracking started"
    );

    let mut display = ConsoleDisplay::new(std::io::stdout(), format, config.tile_source);
    display.show_tile_source()?;

    let mut device_failed = false;
    loop {
        match display.tick(&rx, DEFAULT_TICK)? {
            TickOutcome::Painted(_) => {}
            TickOutcome::DeviceError(message) => {
                error!("{message}");
                eprintln!("Error: {message}");
                device_failed = true;
            }
            TickOutcome::Disconnected => break,
        }
    }

    if device_failed {
        std::process::exit(1);
    }
    Ok(())
}
