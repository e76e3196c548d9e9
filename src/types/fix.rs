#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A latitude/longitude pair in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// True when both coordinate deltas to `other` are below `threshold` degrees
    pub fn within_degrees(&self, other: &GeoPoint, threshold: f64) -> bool {
        (self.latitude - other.latitude).abs() < threshold
            && (self.longitude - other.longitude).abs() < threshold
    }
}

/// One decoded telemetry sample from the device
///
/// Coordinates are parsed numerically; everything else is kept as the trimmed
/// text the device sent, since it is only displayed and logged.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Fix {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub altitude: Option<String>,
    pub speed: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
}

impl Fix {
    /// Coordinates of a usable fix.
    ///
    /// Returns `None` when either coordinate is missing or exactly zero; the
    /// receiver reports 0 while it has no satellite lock.
    pub fn position(&self) -> Option<GeoPoint> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) if lat != 0.0 && lon != 0.0 => Some(GeoPoint::new(lat, lon)),
            _ => None,
        }
    }

    /// Reported ground speed in km/h, 0.0 when missing or not numeric
    pub fn speed_kmh(&self) -> f64 {
        self.speed
            .as_deref()
            .and_then(|s| s.trim().parse::<f64>().ok())
            .filter(|v| v.is_finite())
            .unwrap_or(0.0)
    }
}
