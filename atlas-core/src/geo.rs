//! Geodesy helpers
//!
//! Great-circle distance between two WGS84 positions, plus an offset helper
//! used to build positions at a known distance.

use serde::{Deserialize, Serialize};

/// Mean earth radius in meters
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// A position in decimal degrees (WGS84)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Coordinates { lat, lng }
    }

    /// Latitude within -90..=90 and longitude within -180..=180 (false for NaN)
    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.lat) && (-180.0..=180.0).contains(&self.lng)
    }

    /// Great-circle distance to `other` in meters
    pub fn distance_to(&self, other: &Coordinates) -> f64 {
        distance(self, other)
    }

    /// Position `meters` due north of this one, along the meridian
    pub fn offset_north(&self, meters: f64) -> Coordinates {
        Coordinates {
            lat: self.lat + (meters / EARTH_RADIUS_METERS).to_degrees(),
            lng: self.lng,
        }
    }
}

/// Haversine distance between `a` and `b` in meters.
///
/// Never fails: NaN inputs yield NaN.
pub fn distance(a: &Coordinates, b: &Coordinates) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lng = (b.lng - a.lng).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lng / 2.0).sin().powi(2);

    // Rounding can push h a hair above 1 for antipodal points
    let c = 2.0 * h.sqrt().clamp(0.0, 1.0).asin();

    EARTH_RADIUS_METERS * c
}
