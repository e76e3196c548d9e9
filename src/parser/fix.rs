//! Field extraction for one telemetry frame
//!
//! Each recognized line looks like `<Label>...: <value>`. Only latitude and
//! longitude are parsed as numbers here; the remaining fields stay as text.

use crate::parser::frame::RawFrame;
use crate::types::Fix;
use tracing::debug;

/// Recognized field prefixes, matched in this order, case-sensitive
const LATITUDE_PREFIX: &str = "Latitude:";
const LONGITUDE_PREFIX: &str = "Longitude:";
const ALTITUDE_PREFIX: &str = "Altitude";
const SPEED_PREFIX: &str = "Speed";
const DATE_PREFIX: &str = "Date";
const TIME_PREFIX: &str = "Time";

/// Convert one frame into a fix.
///
/// Never fails: an unparsable coordinate only clears that field, and lines
/// that match no known prefix are ignored.
pub fn parse_fix(frame: &RawFrame) -> Fix {
    let mut fix = Fix::default();

    for line in frame.iter() {
        let line = line.trim();
        if line.starts_with(LATITUDE_PREFIX) {
            fix.latitude = parse_coordinate(line);
        } else if line.starts_with(LONGITUDE_PREFIX) {
            fix.longitude = parse_coordinate(line);
        } else if line.starts_with(ALTITUDE_PREFIX) {
            fix.altitude = field_value(line);
        } else if line.starts_with(SPEED_PREFIX) {
            fix.speed = field_value(line);
        } else if line.starts_with(DATE_PREFIX) {
            fix.date = field_value(line);
        } else if line.starts_with(TIME_PREFIX) {
            fix.time = field_value(line);
        }
    }

    fix
}

/// Text after the first colon, trimmed. `None` if the line has no colon.
pub fn field_value(line: &str) -> Option<String> {
    line.split_once(':').map(|(_, value)| value.trim().to_string())
}

fn parse_coordinate(line: &str) -> Option<f64> {
    let raw = field_value(line)?;
    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() => Some(value),
        _ => {
            debug!(line, "unparsable coordinate");
            None
        }
    }
}
