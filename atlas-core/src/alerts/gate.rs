//! Notification Gate
//!
//! Decides whether a new classification is worth surfacing to the user.
//! Repeats of the same message are suppressed; escalations into danger or
//! warning always notify, as does recovery from risk into a safe zone.

use serde::{Deserialize, Serialize};

use super::classifier::{AlertResult, AlertType};

/// Title used for every zone notification
pub const NOTIFICATION_TITLE: &str = "Atlas-Alert Zone Update";

/// The last classification a session observed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LastAlert {
    #[serde(rename = "type")]
    pub kind: AlertType,
    pub message: String,
}

impl From<&AlertResult> for LastAlert {
    fn from(alert: &AlertResult) -> Self {
        LastAlert {
            kind: alert.kind,
            message: alert.message.clone(),
        }
    }
}

/// Gate on structured state.
///
/// Recovery is recognised from the previous alert type, so zone names that
/// happen to contain "DANGER" or "WARNING" cannot trigger it.
pub fn should_notify_transition(previous: Option<&LastAlert>, current: &AlertResult) -> bool {
    let previous = match previous {
        None => return current.kind != AlertType::Clear,
        Some(p) => p,
    };

    if previous.message == current.message {
        return false;
    }

    match current.kind {
        AlertType::Danger | AlertType::Warning => true,
        AlertType::Safe => previous.kind.is_risk(),
        AlertType::Clear => false,
    }
}

/// Gate on the previously rendered message text alone.
///
/// For hosts that keep only the last message. Recovery is detected by the
/// "DANGER"/"WARNING" markers the classifier puts in its messages.
pub fn should_notify(previous_message: Option<&str>, current: &AlertResult) -> bool {
    let previous = match previous_message {
        None => return current.kind != AlertType::Clear,
        Some(p) => p,
    };

    if previous == current.message {
        return false;
    }

    match current.kind {
        AlertType::Danger | AlertType::Warning => true,
        AlertType::Safe => previous.contains("DANGER") || previous.contains("WARNING"),
        AlertType::Clear => false,
    }
}

/// User-facing notification payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub title: String,
    pub body: String,
}

impl Notification {
    pub fn from_alert(alert: &AlertResult) -> Self {
        Notification {
            title: NOTIFICATION_TITLE.to_string(),
            body: strip_leading_glyphs(&alert.message).to_string(),
        }
    }
}

/// Drop the decorative emoji (and the space after it) from a message
pub fn strip_leading_glyphs(message: &str) -> &str {
    message.trim_start_matches(|c: char| !c.is_ascii() || c.is_whitespace())
}
