//! Zone sets and zone file validation.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

use super::zone::{Zone, ZoneKind};

/// Errors raised when a zone or zone set is malformed
#[derive(Debug, Error)]
pub enum ZoneError {
    #[error("zone {id}: radius {radius} must be a finite, non-negative number of meters")]
    InvalidRadius { id: String, radius: f64 },

    #[error("zone {id}: latitude {lat} is outside -90..=90")]
    InvalidLatitude { id: String, lat: f64 },

    #[error("zone {id}: longitude {lng} is outside -180..=180")]
    InvalidLongitude { id: String, lng: f64 },

    #[error("zone {id} is a {kind} zone but is listed with the {list} zones")]
    MisplacedZone {
        id: String,
        kind: ZoneKind,
        list: ZoneKind,
    },

    #[error("duplicate zone id {0}")]
    DuplicateId(String),

    #[error("invalid zone file: {0}")]
    Parse(#[from] serde_json::Error),
}

impl Zone {
    /// Reject geometry the classifier cannot reason about
    pub fn validate(&self) -> Result<(), ZoneError> {
        if !self.radius.is_finite() || self.radius < 0.0 {
            return Err(ZoneError::InvalidRadius {
                id: self.id.clone(),
                radius: self.radius,
            });
        }
        if !(-90.0..=90.0).contains(&self.lat) {
            return Err(ZoneError::InvalidLatitude {
                id: self.id.clone(),
                lat: self.lat,
            });
        }
        if !(-180.0..=180.0).contains(&self.lng) {
            return Err(ZoneError::InvalidLongitude {
                id: self.id.clone(),
                lng: self.lng,
            });
        }
        Ok(())
    }
}

/// On-disk / on-wire form: one flat list of tagged zones
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ZoneFile {
    #[serde(default)]
    zones: Vec<Zone>,
}

/// Danger and safe zones, each in their original relative order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "ZoneFile", into = "ZoneFile")]
pub struct ZoneSet {
    pub danger: Vec<Zone>,
    pub safe: Vec<Zone>,
}

impl From<ZoneFile> for ZoneSet {
    fn from(file: ZoneFile) -> Self {
        ZoneSet::from_zones(file.zones)
    }
}

impl From<ZoneSet> for ZoneFile {
    fn from(set: ZoneSet) -> Self {
        ZoneFile {
            zones: set.danger.into_iter().chain(set.safe).collect(),
        }
    }
}

impl ZoneSet {
    pub fn new() -> Self {
        ZoneSet::default()
    }

    /// Partition tagged zones into danger and safe lists
    pub fn from_zones(zones: impl IntoIterator<Item = Zone>) -> Self {
        let mut set = ZoneSet::new();
        for zone in zones {
            set.push(zone);
        }
        set
    }

    /// Parse a `{ "zones": [...] }` document and validate it
    pub fn from_json(json: &str) -> Result<Self, ZoneError> {
        let set: ZoneSet = serde_json::from_str(json)?;
        set.validate()?;
        Ok(set)
    }

    /// Add a zone to its list. Severity on a safe zone carries no meaning
    /// and is dropped.
    pub fn push(&mut self, mut zone: Zone) {
        if zone.kind == ZoneKind::Safe && zone.severity.take().is_some() {
            log::warn!("zone {}: ignoring severity on a safe zone", zone.id);
        }
        match zone.kind {
            ZoneKind::Danger => self.danger.push(zone),
            ZoneKind::Safe => self.safe.push(zone),
        }
    }

    pub fn len(&self) -> usize {
        self.danger.len() + self.safe.len()
    }

    pub fn is_empty(&self) -> bool {
        self.danger.is_empty() && self.safe.is_empty()
    }

    /// Validate every zone, list placement and id uniqueness
    pub fn validate(&self) -> Result<(), ZoneError> {
        let mut seen = HashSet::new();

        let lists = [(ZoneKind::Danger, &self.danger), (ZoneKind::Safe, &self.safe)];
        for (list, zones) in lists {
            for zone in zones.iter() {
                if zone.kind != list {
                    return Err(ZoneError::MisplacedZone {
                        id: zone.id.clone(),
                        kind: zone.kind,
                        list,
                    });
                }
                zone.validate()?;
                if !seen.insert(zone.id.as_str()) {
                    return Err(ZoneError::DuplicateId(zone.id.clone()));
                }
            }
        }
        Ok(())
    }
}
