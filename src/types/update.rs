use crate::config::{MAP_ZOOM_LEVEL, MARKER_LABEL};
use crate::types::GeoPoint;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Outcome of one fix accepted by the track accumulator
///
/// Every accepted fix yields exactly one update, whether or not it became a
/// path vertex. `heading` is the track's current heading, which keeps its
/// previous value while the receiver is stationary.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TrackUpdate {
    pub position: GeoPoint,
    pub altitude: Option<String>,
    pub speed: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub heading: Option<f64>,
    pub total_distance_m: f64,
    pub vertex_added: bool,
    pub heading_updated: bool,
    pub path_len: usize,
}

/// Immutable view handed from the worker to the UI thread
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DisplaySnapshot {
    pub position: GeoPoint,
    pub altitude: Option<String>,
    pub speed: Option<String>,
    pub heading: Option<f64>,
    pub total_distance_m: f64,
    pub date: Option<String>,
    pub time: Option<String>,
    pub zoom: u8,
    pub marker_label: String,
    /// Full path, only present when this fix appended a vertex
    pub path: Option<Vec<GeoPoint>>,
}

impl DisplaySnapshot {
    pub fn from_update(update: &TrackUpdate, path: &[GeoPoint]) -> Self {
        Self {
            position: update.position,
            altitude: update.altitude.clone(),
            speed: update.speed.clone(),
            heading: update.heading,
            total_distance_m: update.total_distance_m,
            date: update.date.clone(),
            time: update.time.clone(),
            zoom: MAP_ZOOM_LEVEL,
            marker_label: MARKER_LABEL.to_string(),
            path: update.vertex_added.then(|| path.to_vec()),
        }
    }
}

/// Messages from the background worker to the UI loop
#[derive(Debug, Clone, PartialEq)]
pub enum WorkerEvent {
    Snapshot(DisplaySnapshot),
    /// The device could not be opened or was lost; the worker has stopped
    DeviceError(String),
}
