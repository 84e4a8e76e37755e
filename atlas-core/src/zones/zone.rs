//! Zone Implementation
//!
//! Defines circular zones, severity ranking and the membership / nearest
//! queries the classifier is built on.

use serde::{Deserialize, Serialize};

use crate::geo::Coordinates;

/// Width of the warning band outside every danger zone, in meters
pub const WARNING_BAND_METERS: f64 = 500.0;

/// Label used in messages for a danger zone without a name
pub const DANGER_ZONE_FALLBACK_NAME: &str = "Hazard Area";

/// Label used in messages for a safe zone without a name
pub const SAFE_ZONE_FALLBACK_NAME: &str = "Safe Zone";

/// Whether a zone is a hazard or a refuge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZoneKind {
    Danger,
    Safe,
}

impl std::fmt::Display for ZoneKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ZoneKind::Danger => write!(f, "danger"),
            ZoneKind::Safe => write!(f, "safe"),
        }
    }
}

/// Hazard severity of a danger zone
///
/// Ordering follows the rank, so `Severity::Critical` is the maximum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Default for Severity {
    fn default() -> Self {
        Severity::Low
    }
}

impl Severity {
    /// Numeric rank: critical=4, high=3, medium=2, low=1
    pub fn rank(self) -> u8 {
        match self {
            Severity::Low => 1,
            Severity::Medium => 2,
            Severity::High => 3,
            Severity::Critical => 4,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
            Severity::Critical => "critical",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Circular geofence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    /// Identifier, unique within a zone set
    pub id: String,
    /// Center latitude in decimal degrees
    pub lat: f64,
    /// Center longitude in decimal degrees
    pub lng: f64,
    /// Radius in meters (0 is a point zone)
    pub radius: f64,
    #[serde(rename = "type")]
    pub kind: ZoneKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Only meaningful for danger zones
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<Severity>,
}

impl Zone {
    /// Create a new danger zone
    pub fn new_danger(
        id: impl Into<String>,
        center: Coordinates,
        radius: f64,
        severity: Severity,
    ) -> Self {
        Zone {
            id: id.into(),
            lat: center.lat,
            lng: center.lng,
            radius,
            kind: ZoneKind::Danger,
            name: None,
            severity: Some(severity),
        }
    }

    /// Create a new safe zone
    pub fn new_safe(id: impl Into<String>, center: Coordinates, radius: f64) -> Self {
        Zone {
            id: id.into(),
            lat: center.lat,
            lng: center.lng,
            radius,
            kind: ZoneKind::Safe,
            name: None,
            severity: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn center(&self) -> Coordinates {
        Coordinates::new(self.lat, self.lng)
    }

    /// Severity used for ranking; a missing severity counts as low
    pub fn effective_severity(&self) -> Severity {
        self.severity.unwrap_or_default()
    }

    /// Display name, falling back to a generic label for the zone kind
    pub fn label(&self) -> &str {
        match (&self.name, self.kind) {
            (Some(name), _) => name.as_str(),
            (None, ZoneKind::Danger) => DANGER_ZONE_FALLBACK_NAME,
            (None, ZoneKind::Safe) => SAFE_ZONE_FALLBACK_NAME,
        }
    }

    /// Distance from `point` to the zone center in meters
    pub fn distance_from(&self, point: &Coordinates) -> f64 {
        point.distance_to(&self.center())
    }

    /// Boundary inclusive: a point exactly on the radius is inside
    pub fn contains(&self, point: &Coordinates) -> bool {
        self.distance_from(point) <= self.radius
    }

    /// True if `point` is outside the zone but within the warning band
    /// (exclusive lower bound, inclusive upper bound)
    pub fn in_warning_band(&self, point: &Coordinates) -> bool {
        let d = self.distance_from(point);
        d > self.radius && d <= self.radius + WARNING_BAND_METERS
    }
}

/// Check whether `point` lies inside `zone`
pub fn is_inside(point: &Coordinates, zone: &Zone) -> bool {
    zone.contains(point)
}

/// All zones containing `point`, in input order
pub fn containing_zones<'a>(point: &Coordinates, zones: &'a [Zone]) -> Vec<&'a Zone> {
    zones.iter().filter(|z| z.contains(point)).collect()
}

/// A zone together with its distance from the query point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NearestZone {
    pub zone: Zone,
    /// Distance to the zone center in meters
    pub distance: f64,
}

/// Find the zone closest to `point`, comparing center distances.
///
/// Returns `None` only when `zones` is empty. On ties the zone seen first
/// wins.
pub fn nearest(point: &Coordinates, zones: &[Zone]) -> Option<NearestZone> {
    let mut best: Option<(&Zone, f64)> = None;

    for zone in zones {
        let d = zone.distance_from(point);
        match best {
            None => best = Some((zone, d)),
            Some((_, best_d)) if d < best_d => best = Some((zone, d)),
            Some(_) => {}
        }
    }

    best.map(|(zone, distance)| NearestZone {
        zone: zone.clone(),
        distance,
    })
}
