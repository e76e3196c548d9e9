use crate::error::TrackerError;
use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Map tile source presets offered by the map type selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TileSource {
    #[default]
    OpenStreetMap,
    GoogleNormal,
    GoogleSatellite,
}

impl TileSource {
    pub const ALL: [TileSource; 3] = [
        TileSource::OpenStreetMap,
        TileSource::GoogleNormal,
        TileSource::GoogleSatellite,
    ];

    /// URL template with `{x}`, `{y}` and `{z}` placeholders
    pub fn url_template(&self) -> &'static str {
        match self {
            TileSource::OpenStreetMap => "https://a.tile.openstreetmap.org/{z}/{x}/{y}.png",
            TileSource::GoogleNormal => "https://mt1.google.com/vt/lyrs=m&x={x}&y={y}&z={z}",
            TileSource::GoogleSatellite => "https://mt1.google.com/vt/lyrs=s&x={x}&y={y}&z={z}",
        }
    }

    /// Expand the template for one tile
    pub fn tile_url(&self, x: u32, y: u32, z: u8) -> String {
        self.url_template()
            .replace("{x}", &x.to_string())
            .replace("{y}", &y.to_string())
            .replace("{z}", &z.to_string())
    }

    /// Name shown in the selector
    pub fn display_name(&self) -> &'static str {
        match self {
            TileSource::OpenStreetMap => "OpenStreetMap",
            TileSource::GoogleNormal => "Google Normal",
            TileSource::GoogleSatellite => "Google Satellite",
        }
    }

    /// Short command-line key
    pub fn key(&self) -> &'static str {
        match self {
            TileSource::OpenStreetMap => "osm",
            TileSource::GoogleNormal => "google",
            TileSource::GoogleSatellite => "satellite",
        }
    }
}

impl fmt::Display for TileSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for TileSource {
    type Err = TrackerError;

    /// Accepts either the short key or the selector name, case-insensitive
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        TileSource::ALL
            .into_iter()
            .find(|source| {
                source.key() == wanted || source.display_name().to_ascii_lowercase() == wanted
            })
            .ok_or_else(|| TrackerError::Config(format!("unknown tile source '{s}'")))
    }
}
