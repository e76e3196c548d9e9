//! Path, distance and heading bookkeeping
//!
//! `Track` is the session state: an append-only list of vertices, the running
//! distance along them, the most recent heading, and the first accepted
//! position. `TrackAccumulator` applies the motion gate to every fix that got
//! past the position filter.

use crate::config::{MIN_DISTANCE_METERS, MOTION_DISTANCE_METERS, MOTION_SPEED_KMH};
use crate::geo::{haversine_distance, initial_bearing};
use crate::types::{Fix, GeoPoint, TrackUpdate};
use tracing::{debug, info};

/// Session track state
#[derive(Debug, Clone, Default)]
pub struct Track {
    path: Vec<GeoPoint>,
    total_distance_m: f64,
    heading_deg: Option<f64>,
    start_position: Option<GeoPoint>,
}

impl Track {
    pub fn new() -> Self {
        Self::default()
    }

    /// Vertices in the order they were recorded
    pub fn path(&self) -> &[GeoPoint] {
        &self.path
    }

    pub fn last_vertex(&self) -> Option<GeoPoint> {
        self.path.last().copied()
    }

    pub fn start_position(&self) -> Option<GeoPoint> {
        self.start_position
    }

    pub fn total_distance_m(&self) -> f64 {
        self.total_distance_m
    }

    /// Last computed heading; `None` until the first motion event
    pub fn heading(&self) -> Option<f64> {
        self.heading_deg
    }

    /// Set the start position if it has not been set yet.
    /// Returns false when a start position already existed.
    pub fn set_start_position(&mut self, point: GeoPoint) -> bool {
        if self.start_position.is_some() {
            return false;
        }
        self.start_position = Some(point);
        true
    }

    /// Record the first accepted point as start position and sole vertex
    pub fn record_start(&mut self, point: GeoPoint) {
        self.set_start_position(point);
        if self.path.is_empty() {
            self.path.push(point);
        }
    }

    fn append_vertex(&mut self, point: GeoPoint, distance_m: f64) {
        self.path.push(point);
        self.total_distance_m += distance_m;
    }
}

/// Applies the motion gate and grows the track
#[derive(Debug, Clone)]
pub struct TrackAccumulator {
    track: Track,
    min_distance_m: f64,
}

impl Default for TrackAccumulator {
    fn default() -> Self {
        Self::new(MIN_DISTANCE_METERS)
    }
}

impl TrackAccumulator {
    pub fn new(min_distance_m: f64) -> Self {
        Self {
            track: Track::new(),
            min_distance_m,
        }
    }

    pub fn track(&self) -> &Track {
        &self.track
    }

    pub fn min_distance_m(&self) -> f64 {
        self.min_distance_m
    }

    /// Fold one filtered fix into the track.
    ///
    /// A fix counts as motion when its reported speed is at least
    /// `MOTION_SPEED_KMH` or it lies `MOTION_DISTANCE_METERS` or more from the
    /// last vertex. Motion refreshes the heading; it appends a vertex only
    /// beyond `min_distance_m`. Without motion nothing changes and the old
    /// heading is carried into the returned update.
    pub fn accept(&mut self, fix: &Fix, point: GeoPoint) -> TrackUpdate {
        let mut vertex_added = false;
        let mut heading_updated = false;

        match self.track.last_vertex() {
            None => {
                self.track.record_start(point);
                vertex_added = true;
                info!(
                    latitude = point.latitude,
                    longitude = point.longitude,
                    "track started"
                );
            }
            Some(last) => {
                let distance = haversine_distance(&last, &point);
                let speed = fix.speed_kmh();

                if speed >= MOTION_SPEED_KMH || distance >= MOTION_DISTANCE_METERS {
                    if distance >= self.min_distance_m {
                        self.track.append_vertex(point, distance);
                        vertex_added = true;
                        info!(
                            vertices = self.track.path.len(),
                            segment_m = distance,
                            total_m = self.track.total_distance_m,
                            "vertex appended"
                        );
                    }
                    self.track.heading_deg = Some(initial_bearing(&last, &point));
                    heading_updated = true;
                } else {
                    debug!(speed, distance, "stationary fix");
                }
            }
        }

        TrackUpdate {
            position: point,
            altitude: fix.altitude.clone(),
            speed: fix.speed.clone(),
            date: fix.date.clone(),
            time: fix.time.clone(),
            heading: self.track.heading_deg,
            total_distance_m: self.track.total_distance_m,
            vertex_added,
            heading_updated,
            path_len: self.track.path.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fix_with_speed(speed: &str) -> Fix {
        Fix {
            speed: Some(speed.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_first_point_starts_track_without_heading() {
        let mut acc = TrackAccumulator::default();
        let start = GeoPoint::new(10.0, 20.0);
        let update = acc.accept(&fix_with_speed("0"), start);

        assert!(update.vertex_added);
        assert!(!update.heading_updated);
        assert_eq!(update.heading, None);
        assert_eq!(update.path_len, 1);
        assert_eq!(acc.track().start_position(), Some(start));
        assert_eq!(acc.track().total_distance_m(), 0.0);
    }

    #[test]
    fn test_far_point_appends_vertex_and_heading() {
        let mut acc = TrackAccumulator::default();
        acc.accept(&fix_with_speed("0"), GeoPoint::new(10.0, 20.0));
        let update = acc.accept(&fix_with_speed("0"), GeoPoint::new(10.0001, 20.0001));

        assert!(update.vertex_added);
        assert!(update.heading_updated);
        let heading = update.heading.expect("heading after motion");
        assert!(heading > 0.0 && heading < 90.0, "heading {heading}");
        assert!(update.total_distance_m > 15.0);
        assert_eq!(acc.track().path().len(), 2);
    }

    #[test]
    fn test_speed_alone_updates_heading_but_not_path() {
        let mut acc = TrackAccumulator::default();
        acc.accept(&fix_with_speed("0"), GeoPoint::new(10.0, 20.0));
        // ~1.1 m north, below both distance thresholds
        let update = acc.accept(&fix_with_speed("5.2"), GeoPoint::new(10.00001, 20.0));

        assert!(!update.vertex_added);
        assert!(update.heading_updated);
        assert!(update.heading.unwrap().abs() < 1e-6);
        assert_eq!(update.total_distance_m, 0.0);
        assert_eq!(update.path_len, 1);
    }

    #[test]
    fn test_motion_between_gate_and_min_distance() {
        let mut acc = TrackAccumulator::default();
        acc.accept(&fix_with_speed("0"), GeoPoint::new(10.0, 20.0));
        // ~2.2 m east: passes the 1.5 m motion gate, short of 3 m
        let update = acc.accept(&fix_with_speed("0"), GeoPoint::new(10.0, 20.00002));

        assert!(!update.vertex_added);
        assert!(update.heading_updated);
        assert!((update.heading.unwrap() - 90.0).abs() < 0.01);
    }

    #[test]
    fn test_stationary_fix_keeps_previous_heading() {
        let mut acc = TrackAccumulator::default();
        acc.accept(&fix_with_speed("0"), GeoPoint::new(10.0, 20.0));
        let moved = acc.accept(&fix_with_speed("0"), GeoPoint::new(10.0001, 20.0001));

        let still = acc.accept(&fix_with_speed("0"), GeoPoint::new(10.00011, 20.0001));
        assert!(!still.vertex_added);
        assert!(!still.heading_updated);
        assert_eq!(still.heading, moved.heading);
        assert_eq!(still.total_distance_m, moved.total_distance_m);
    }

    #[test]
    fn test_unparsable_speed_counts_as_zero() {
        let mut acc = TrackAccumulator::default();
        acc.accept(&fix_with_speed("0"), GeoPoint::new(10.0, 20.0));
        let update = acc.accept(&fix_with_speed("n/a"), GeoPoint::new(10.000005, 20.0));
        assert!(!update.heading_updated);
    }

    #[test]
    fn test_custom_min_distance() {
        let mut acc = TrackAccumulator::new(20.0);
        acc.accept(&fix_with_speed("0"), GeoPoint::new(10.0, 20.0));
        let update = acc.accept(&fix_with_speed("3"), GeoPoint::new(10.0001, 20.0001));
        assert!(!update.vertex_added);
        assert!(update.heading_updated);
    }

    #[test]
    fn test_start_position_never_changes() {
        let mut track = Track::new();
        assert!(track.set_start_position(GeoPoint::new(1.0, 2.0)));
        assert!(!track.set_start_position(GeoPoint::new(3.0, 4.0)));
        track.record_start(GeoPoint::new(5.0, 6.0));
        assert_eq!(track.start_position(), Some(GeoPoint::new(1.0, 2.0)));
        assert_eq!(track.path(), &[GeoPoint::new(5.0, 6.0)]);
    }
}
