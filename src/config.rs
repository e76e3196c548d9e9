//! Runtime configuration and fixed tuning constants
//!
//! The tracker runs from compiled-in defaults. The CLI may override the
//! device, output and minimum-distance settings; the filter and motion
//! thresholds are fixed.

use crate::error::{Result, TrackerError};
use crate::types::TileSource;
use std::path::PathBuf;
use std::time::Duration;

#[cfg(windows)]
pub const DEFAULT_SERIAL_PORT: &str = "COM4";
#[cfg(not(windows))]
pub const DEFAULT_SERIAL_PORT: &str = "/dev/ttyUSB0";

pub const DEFAULT_BAUD_RATE: u32 = 115_200;
pub const DEFAULT_OUTPUT_PATH: &str = "gps_positions.csv";
/// Minimum spacing between recorded path vertices
pub const MIN_DISTANCE_METERS: f64 = 3.0;
pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_secs(1);
/// How often the UI loop wakes up to drain worker updates
pub const DEFAULT_TICK: Duration = Duration::from_millis(100);

/// Number of raw fixes averaged into one smoothed point
pub const SMOOTHING_WINDOW: usize = 5;
/// Smoothed points closer than this on both axes are receiver jitter
pub const JITTER_THRESHOLD_DEGREES: f64 = 0.00001;
/// Reported speed at or above which the receiver is considered moving
pub const MOTION_SPEED_KMH: f64 = 1.0;
/// Displacement at or above which the receiver is considered moving
pub const MOTION_DISTANCE_METERS: f64 = 1.5;

pub const MAP_ZOOM_LEVEL: u8 = 18;
pub const MARKER_LABEL: &str = "Current Location";

/// Tracker settings
#[derive(Debug, Clone, PartialEq)]
pub struct TrackerConfig {
    pub port: String,
    pub baud_rate: u32,
    pub output_path: PathBuf,
    pub min_distance_meters: f64,
    pub read_timeout: Duration,
    pub tile_source: TileSource,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_SERIAL_PORT.to_string(),
            baud_rate: DEFAULT_BAUD_RATE,
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            min_distance_meters: MIN_DISTANCE_METERS,
            read_timeout: DEFAULT_READ_TIMEOUT,
            tile_source: TileSource::default(),
        }
    }
}

impl TrackerConfig {
    pub fn validate(&self) -> Result<()> {
        if self.port.trim().is_empty() {
            return Err(TrackerError::Config("serial port must not be empty".to_string()));
        }
        if self.baud_rate == 0 {
            return Err(TrackerError::Config("baud rate must be positive".to_string()));
        }
        if self.read_timeout.is_zero() {
            return Err(TrackerError::Config("read timeout must be positive".to_string()));
        }
        if !self.min_distance_meters.is_finite() || self.min_distance_meters < 0.0 {
            return Err(TrackerError::Config(format!(
                "minimum distance must be a non-negative number of meters, got {}",
                self.min_distance_meters
            )));
        }
        if self.output_path.as_os_str().is_empty() {
            return Err(TrackerError::Config("output path must not be empty".to_string()));
        }
        Ok(())
    }
}
