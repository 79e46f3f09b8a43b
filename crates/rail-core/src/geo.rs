//! Geographic coordinate type.
//!
//! Station coordinates are optional in the topology file; they exist solely
//! to feed the informed-search heuristic, so `GeoPoint` offers a planar
//! distance in coordinate space rather than a great-circle distance.

use serde::{Deserialize, Serialize};

/// A WGS-84 coordinate pair as carried by the topology file.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    #[inline]
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Euclidean distance in degree space.
    ///
    /// Planar, not geodesic; callers use it only to order candidate
    /// stations relative to each other.
    pub fn distance_deg(self, other: GeoPoint) -> f64 {
        let d_lat = self.lat - other.lat;
        let d_lon = self.lon - other.lon;
        (d_lat * d_lat + d_lon * d_lon).sqrt()
    }
}

impl std::fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.4}, {:.4})", self.lat, self.lon)
    }
}
