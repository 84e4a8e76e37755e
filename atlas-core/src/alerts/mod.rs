//! Zone Alerts
//!
//! This module classifies a live position against danger and safe zones and
//! decides when the result deserves a user notification.
//!
//! # Architecture
//!
//! - **classifier**: four-way danger / safe / warning / clear decision
//! - **gate**: duplicate suppression, escalation and recovery detection
//!
//! # Usage
//!
//! ```rust
//! use atlas_core::alerts::{classify, should_notify, AlertType};
//! use atlas_core::geo::Coordinates;
//! use atlas_core::zones::{Severity, Zone};
//!
//! let here = Coordinates::new(19.0, 72.82);
//! let danger = vec![Zone::new_danger("a", here, 1000.0, Severity::High).with_name("Zone A")];
//!
//! let alert = classify(&here, &danger, &[]);
//! assert_eq!(alert.kind, AlertType::Danger);
//! assert!(should_notify(None, &alert));
//! assert!(!should_notify(Some(alert.message.as_str()), &alert));
//! ```

mod classifier;
mod gate;

pub use classifier::{classify, AlertResult, AlertType};
pub use gate::{
    should_notify, should_notify_transition, strip_leading_glyphs, LastAlert, Notification,
    NOTIFICATION_TITLE,
};
