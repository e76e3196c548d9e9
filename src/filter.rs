//! Coordinate smoothing and the jitter gate
//!
//! Raw coordinates are averaged over a short FIFO window. The smoothed point
//! is then compared against the last path vertex and dropped when it has not
//! moved beyond receiver noise. Rejected points still enter the window.

use crate::config::{JITTER_THRESHOLD_DEGREES, SMOOTHING_WINDOW};
use crate::track::Track;
use crate::types::{Fix, GeoPoint};
use std::collections::VecDeque;
use tracing::debug;

/// Fixed-capacity moving average over raw coordinates
#[derive(Debug, Clone)]
pub struct SmoothingWindow {
    points: VecDeque<GeoPoint>,
    capacity: usize,
}

impl Default for SmoothingWindow {
    fn default() -> Self {
        Self::with_capacity(SMOOTHING_WINDOW)
    }
}

impl SmoothingWindow {
    /// A zero capacity is bumped to one so the mean is always defined
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            points: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Add a point, evicting the oldest once full, and return the new mean
    pub fn push(&mut self, point: GeoPoint) -> GeoPoint {
        if self.is_full() {
            self.points.pop_front();
        }
        self.points.push_back(point);

        // Running mean: a window of identical points yields that point exactly
        let mut mean = point;
        for (i, p) in self.points.iter().enumerate() {
            let k = (i + 1) as f64;
            if i == 0 {
                mean = *p;
            } else {
                mean.latitude += (p.latitude - mean.latitude) / k;
                mean.longitude += (p.longitude - mean.longitude) / k;
            }
        }
        mean
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.points.len() == self.capacity
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

/// Validity check, smoothing and jitter gate in front of the track
#[derive(Debug, Clone)]
pub struct PositionFilter {
    window: SmoothingWindow,
    jitter_degrees: f64,
}

impl Default for PositionFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl PositionFilter {
    pub fn new() -> Self {
        Self {
            window: SmoothingWindow::default(),
            jitter_degrees: JITTER_THRESHOLD_DEGREES,
        }
    }

    pub fn window(&self) -> &SmoothingWindow {
        &self.window
    }

    /// Smoothed position of `fix` if it should reach the track.
    ///
    /// Fixes without a usable position leave the window untouched. Otherwise
    /// the point is averaged in and then compared with the last vertex, or the
    /// start position when the path is still empty.
    pub fn admit(&mut self, fix: &Fix, track: &Track) -> Option<GeoPoint> {
        let Some(raw) = fix.position() else {
            debug!(
                latitude = ?fix.latitude,
                longitude = ?fix.longitude,
                "dropping fix without position lock"
            );
            return None;
        };

        let smoothed = self.window.push(raw);

        let reference = track.last_vertex().or(track.start_position());
        if let Some(reference) = reference {
            if smoothed.within_degrees(&reference, self.jitter_degrees) {
                debug!(
                    latitude = smoothed.latitude,
                    longitude = smoothed.longitude,
                    "fix within jitter threshold"
                );
                return None;
            }
        }

        Some(smoothed)
    }
}
