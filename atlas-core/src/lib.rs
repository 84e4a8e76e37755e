//! atlas-core: platform-independent zone alert engine for Atlas-Alert
//!
//! Given a live position and a set of circular danger and safe zones, this
//! crate classifies the user's situation, finds the nearest safe zone and
//! decides when a notification should be raised.
//!
//! - [`geo`]: haversine distance
//! - [`zones`]: zone types, membership, nearest safe zone, zone sets
//! - [`alerts`]: classifier and notification gate
//! - [`session`]: per-user previous alert and notified history
//!
//! Nothing here performs I/O; location sourcing and notification delivery
//! belong to the host.

pub mod alerts;
pub mod geo;
pub mod session;
pub mod zones;

pub use alerts::{classify, should_notify, AlertResult, AlertType, Notification};
pub use geo::{distance, Coordinates};
pub use session::{AlertHistoryEntry, AlertSession, AlertUpdate};
pub use zones::{Severity, Zone, ZoneError, ZoneKind, ZoneSet};
