//! Danger and Safe Zones
//!
//! This module provides circular geofences and the geometric queries the
//! alert classifier is built on.
//!
//! # Features
//!
//! - Circular zones tagged danger or safe, with optional severity
//! - Inclusive point-in-zone test and ordered containment queries
//! - Nearest zone lookup (linear scan, first seen wins on ties)
//! - Zone set loading and validation from JSON
//!
//! # Example
//!
//! ```rust
//! use atlas_core::geo::Coordinates;
//! use atlas_core::zones::{containing_zones, nearest, Severity, Zone};
//!
//! let here = Coordinates::new(19.0, 72.82);
//! let danger = vec![Zone::new_danger("d1", here, 1000.0, Severity::High).with_name("Zone A")];
//! let safe = vec![Zone::new_safe("s1", here.offset_north(2000.0), 300.0)];
//!
//! assert_eq!(containing_zones(&here, &danger).len(), 1);
//! assert_eq!(nearest(&here, &safe).unwrap().zone.id, "s1");
//! ```

mod set;
mod zone;

pub use set::*;
pub use zone::*;
