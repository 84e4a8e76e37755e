//! Alert Session Tracking
//!
//! This module provides the stateful wrapper a host drives with location
//! updates. A session remembers the last classification it saw and keeps a
//! short history of the transitions that produced a notification.
//!
//! One session belongs to one tracked user. Hosts that share a session
//! between tasks must serialise `update` calls: the history append and the
//! previous-alert store form a single read-modify-write.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use crate::alerts::{
    classify, should_notify_transition, AlertResult, AlertType, LastAlert, Notification,
};
use crate::geo::Coordinates;
use crate::zones::{Zone, ZoneSet};

/// Number of notified transitions retained per session
pub const HISTORY_CAPACITY: usize = 10;

/// A notified transition, as shown in the alert history list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertHistoryEntry {
    /// Serialized as ISO 8601
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "type")]
    pub kind: AlertType,
    pub message: String,
}

/// Outcome of one location update
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertUpdate {
    pub alert: AlertResult,
    /// Present only when the gate decided the user should be told
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notification: Option<Notification>,
}

/// Per-user alert state: the last observed alert and the notified history
#[derive(Debug, Clone, Default)]
pub struct AlertSession {
    /// Last classification seen, notified or not
    previous: Option<LastAlert>,
    /// Newest first, at most HISTORY_CAPACITY entries
    history: VecDeque<AlertHistoryEntry>,
}

impl AlertSession {
    pub fn new() -> Self {
        AlertSession::default()
    }

    /// Classify a new position using the current time for history entries
    pub fn update(
        &mut self,
        point: &Coordinates,
        danger_zones: &[Zone],
        safe_zones: &[Zone],
    ) -> AlertUpdate {
        self.update_at(point, danger_zones, safe_zones, Utc::now())
    }

    /// Classify a new position against a zone set
    pub fn observe(&mut self, point: &Coordinates, zones: &ZoneSet) -> AlertUpdate {
        self.update(point, &zones.danger, &zones.safe)
    }

    /// Classify a new position, stamping any history entry with `now`
    pub fn update_at(
        &mut self,
        point: &Coordinates,
        danger_zones: &[Zone],
        safe_zones: &[Zone],
        now: DateTime<Utc>,
    ) -> AlertUpdate {
        let alert = classify(point, danger_zones, safe_zones);

        let notification = if should_notify_transition(self.previous.as_ref(), &alert) {
            log::debug!(
                "alert transition {} -> {}: {}",
                self.previous
                    .as_ref()
                    .map(|p| p.kind.as_str())
                    .unwrap_or("none"),
                alert.kind,
                alert.message
            );
            self.history.push_front(AlertHistoryEntry {
                timestamp: now,
                kind: alert.kind,
                message: alert.message.clone(),
            });
            self.history.truncate(HISTORY_CAPACITY);
            Some(Notification::from_alert(&alert))
        } else {
            log::trace!("alert unchanged or quiet: {}", alert.kind);
            None
        };

        // Compared against next time whether or not we notified
        self.previous = Some(LastAlert::from(&alert));

        AlertUpdate {
            alert,
            notification,
        }
    }

    /// The last alert seen by this session
    pub fn previous(&self) -> Option<&LastAlert> {
        self.previous.as_ref()
    }

    /// Notified transitions, newest first
    pub fn history(&self) -> impl ExactSizeIterator<Item = &AlertHistoryEntry> {
        self.history.iter()
    }

    /// Forget the previous alert and the history
    pub fn reset(&mut self) {
        self.previous = None;
        self.history.clear();
    }
}
