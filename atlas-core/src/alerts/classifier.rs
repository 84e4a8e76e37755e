//! Alert Classifier
//!
//! Turns a position and the current zone sets into one of four alert
//! categories with a message ready for display.

use serde::{Deserialize, Serialize};

use crate::geo::Coordinates;
use crate::zones::{containing_zones, nearest, NearestZone, Zone};

/// Alert category, in decreasing order of urgency as evaluated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertType {
    /// Inside at least one danger zone
    Danger,
    /// Inside a safe zone and no danger zone
    Safe,
    /// Within the warning band of a danger zone
    Warning,
    /// Nothing to report
    Clear,
}

impl AlertType {
    pub fn as_str(self) -> &'static str {
        match self {
            AlertType::Danger => "danger",
            AlertType::Safe => "safe",
            AlertType::Warning => "warning",
            AlertType::Clear => "clear",
        }
    }

    /// Danger and warning alerts call for the user to act
    pub fn is_risk(self) -> bool {
        matches!(self, AlertType::Danger | AlertType::Warning)
    }
}

impl std::fmt::Display for AlertType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classifier output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertResult {
    #[serde(rename = "type")]
    pub kind: AlertType,
    /// Display text, including the leading glyph
    pub message: String,
    /// Present whenever at least one safe zone exists
    pub nearest_safe_zone: Option<NearestZone>,
}

impl AlertResult {
    pub fn new(kind: AlertType, message: impl Into<String>) -> Self {
        AlertResult {
            kind,
            message: message.into(),
            nearest_safe_zone: None,
        }
    }
}

/// Classify `point` against the danger and safe zones.
///
/// Branches are evaluated in priority order: danger membership, safe
/// membership, danger proximity, clear. Never fails; NaN coordinates fall
/// through to `Clear` because every comparison against NaN is false.
pub fn classify(point: &Coordinates, danger_zones: &[Zone], safe_zones: &[Zone]) -> AlertResult {
    let nearest_safe_zone = nearest(point, safe_zones);

    let (kind, message) = if let Some(zone) = most_severe(&containing_zones(point, danger_zones)) {
        (AlertType::Danger, danger_message(zone, nearest_safe_zone.as_ref()))
    } else if let Some(zone) = safe_zones.iter().find(|z| z.contains(point)) {
        (AlertType::Safe, safe_message(zone))
    } else if let Some(zone) = danger_zones.iter().find(|z| z.in_warning_band(point)) {
        let to_edge = zone.distance_from(point) - zone.radius;
        (
            AlertType::Warning,
            warning_message(zone, to_edge, nearest_safe_zone.as_ref()),
        )
    } else {
        (AlertType::Clear, clear_message(nearest_safe_zone.as_ref()))
    };

    log::trace!("classify ({:.6}, {:.6}) -> {}", point.lat, point.lng, kind);

    AlertResult {
        kind,
        message,
        nearest_safe_zone,
    }
}

/// Highest severity zone; the first one seen wins on equal severity
fn most_severe<'a>(zones: &[&'a Zone]) -> Option<&'a Zone> {
    zones.iter().copied().reduce(|best, zone| {
        if zone.effective_severity() > best.effective_severity() {
            zone
        } else {
            best
        }
    })
}

fn meters(distance: f64) -> i64 {
    distance.round() as i64
}

fn danger_message(zone: &Zone, safe: Option<&NearestZone>) -> String {
    let head = format!(
        "🚨 DANGER: You are inside {} ({} severity).",
        zone.label(),
        zone.effective_severity()
    );
    match safe {
        Some(s) => format!(
            "{} Nearest safe zone: {} ({}m away).",
            head,
            s.zone.label(),
            meters(s.distance)
        ),
        None => format!("{} Seek immediate shelter!", head),
    }
}

fn safe_message(zone: &Zone) -> String {
    format!(
        "✅ SAFE: You are in {}. Remain here until an all-clear is given.",
        zone.label()
    )
}

fn warning_message(zone: &Zone, to_edge: f64, safe: Option<&NearestZone>) -> String {
    let head = format!("⚠️ WARNING: You are {}m from {}.", meters(to_edge), zone.label());
    match safe {
        Some(s) => format!(
            "{} Move toward {} ({}m away).",
            head,
            s.zone.label(),
            meters(s.distance)
        ),
        None => format!("{} Move to a safe area.", head),
    }
}

fn clear_message(safe: Option<&NearestZone>) -> String {
    match safe {
        Some(s) => format!(
            "ℹ️ All clear. Nearest safe zone: {} ({}m away).",
            s.zone.label(),
            meters(s.distance)
        ),
        None => "ℹ️ All clear. No nearby hazards.".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::zones::Severity;

    fn origin() -> Coordinates {
        Coordinates::new(0.0, 0.0)
    }

    #[test]
    fn test_scenario_danger_without_safe_zones() {
        let point = Coordinates::new(19.0, 72.82);
        let danger = vec![Zone::new_danger("a", point, 1000.0, Severity::High).with_name("Zone A")];

        let alert = classify(&point, &danger, &[]);

        assert_eq!(alert.kind, AlertType::Danger);
        assert!(alert.message.contains("high"));
        assert!(alert.message.contains("Zone A"));
        assert!(alert.message.contains("Seek immediate shelter"));
        assert!(alert.nearest_safe_zone.is_none());
    }

    #[test]
    fn test_danger_names_nearest_safe_zone() {
        let p = origin();
        let danger = vec![Zone::new_danger("d", p, 1000.0, Severity::Critical)];
        let safe = vec![Zone::new_safe("s", p.offset_north(2499.6), 100.0).with_name("Stadium")];

        let alert = classify(&p, &danger, &safe);

        assert_eq!(alert.kind, AlertType::Danger);
        assert_eq!(
            alert.message,
            "🚨 DANGER: You are inside Hazard Area (critical severity). Nearest safe zone: Stadium (2500m away)."
        );
        assert_eq!(alert.nearest_safe_zone.unwrap().zone.id, "s");
    }

    #[test]
    fn test_danger_takes_priority_over_safe() {
        let p = origin();
        let danger = vec![Zone::new_danger("d", p, 500.0, Severity::Low)];
        let safe = vec![Zone::new_safe("s", p, 500.0)];

        let alert = classify(&p, &danger, &safe);
        assert_eq!(alert.kind, AlertType::Danger);
        assert!(alert.nearest_safe_zone.is_some());
    }

    #[test]
    fn test_highest_severity_wins() {
        let p = origin();
        let danger = vec![
            Zone::new_danger("m", p, 500.0, Severity::Medium).with_name("Medium"),
            Zone::new_danger("c", p, 500.0, Severity::Critical).with_name("Critical"),
            Zone::new_danger("h", p, 500.0, Severity::High).with_name("High"),
        ];

        let alert = classify(&p, &danger, &[]);
        assert!(alert.message.contains("inside Critical (critical severity)"));
    }

    #[test]
    fn test_severity_tie_first_wins() {
        let p = origin();
        let danger = vec![
            Zone::new_danger("1", p, 500.0, Severity::High).with_name("First"),
            Zone::new_danger("2", p, 500.0, Severity::High).with_name("Second"),
        ];

        let alert = classify(&p, &danger, &[]);
        assert!(alert.message.contains("First"));
        assert!(!alert.message.contains("Second"));
    }

    #[test]
    fn test_missing_severity_ranks_low() {
        let p = origin();
        let mut unranked = Zone::new_danger("u", p, 500.0, Severity::Low).with_name("Unranked");
        unranked.severity = None;
        let danger = vec![
            unranked,
            Zone::new_danger("m", p, 500.0, Severity::Medium).with_name("Flood"),
        ];

        let alert = classify(&p, &danger, &[]);
        assert!(alert.message.contains("inside Flood (medium severity)"));

        // Alone, the unranked zone reports as low
        let alert = classify(&p, &danger[..1], &[]);
        assert!(alert.message.contains("(low severity)"));
    }

    #[test]
    fn test_safe_names_first_containing_zone() {
        let p = origin();
        let safe = vec![
            Zone::new_safe("far", p.offset_north(5000.0), 100.0).with_name("Far"),
            Zone::new_safe("big", p.offset_north(300.0), 400.0).with_name("Big"),
            Zone::new_safe("small", p, 50.0).with_name("Small"),
        ];

        let alert = classify(&p, &[], &safe);

        assert_eq!(alert.kind, AlertType::Safe);
        assert_eq!(
            alert.message,
            "✅ SAFE: You are in Big. Remain here until an all-clear is given."
        );
        // Nearest is by center distance, independent of which zone is named
        assert_eq!(alert.nearest_safe_zone.unwrap().zone.id, "small");
    }

    #[test]
    fn test_scenario_warning_band() {
        let center = origin();
        let danger = vec![Zone::new_danger("d", center, 200.0, Severity::High).with_name("Fire")];
        let point = center.offset_north(600.0);

        let alert = classify(&point, &danger, &[]);

        assert_eq!(alert.kind, AlertType::Warning);
        assert_eq!(
            alert.message,
            "⚠️ WARNING: You are 400m from Fire. Move to a safe area."
        );
    }

    #[test]
    fn test_warning_points_to_nearest_safe_zone() {
        let center = origin();
        let danger = vec![Zone::new_danger("d", center, 200.0, Severity::High)];
        let point = center.offset_north(600.0);
        let safe = vec![Zone::new_safe("s", point.offset_north(1000.0), 50.0).with_name("School")];

        let alert = classify(&point, &danger, &safe);

        assert_eq!(alert.kind, AlertType::Warning);
        assert!(alert.message.ends_with("Move toward School (1000m away)."));
    }

    #[test]
    fn test_band_edges_classify() {
        let center = origin();
        let point = center.offset_north(700.0);
        let d = point.distance_to(&center);

        // Exactly radius + 500 away: still a warning
        let outer = vec![Zone::new_danger("o", center, d - 500.0, Severity::High)];
        assert_eq!(classify(&point, &outer, &[]).kind, AlertType::Warning);

        // Exactly on the radius: inside, so danger rather than warning
        let inner = vec![Zone::new_danger("i", center, d, Severity::High)];
        assert_eq!(classify(&point, &inner, &[]).kind, AlertType::Danger);

        // Same for a safe zone edge
        let safe = vec![Zone::new_safe("s", center, d)];
        assert_eq!(classify(&point, &[], &safe).kind, AlertType::Safe);
    }

    #[test]
    fn test_scenario_clear_outside_band() {
        let center = origin();
        let danger = vec![Zone::new_danger("d", center, 200.0, Severity::High)];
        let point = center.offset_north(800.0);

        let alert = classify(&point, &danger, &[]);

        assert_eq!(alert.kind, AlertType::Clear);
        assert_eq!(alert.message, "ℹ️ All clear. No nearby hazards.");
        assert!(alert.nearest_safe_zone.is_none());
    }

    #[test]
    fn test_clear_names_nearest_safe_zone() {
        let p = origin();
        let safe = vec![
            Zone::new_safe("s300", p.offset_north(300.0), 50.0).with_name("Library"),
            Zone::new_safe("s150", p.offset_north(150.0), 50.0).with_name("Temple"),
        ];

        let alert = classify(&p, &[], &safe);

        assert_eq!(alert.kind, AlertType::Clear);
        assert_eq!(alert.message, "ℹ️ All clear. Nearest safe zone: Temple (150m away).");
        let nearest = alert.nearest_safe_zone.unwrap();
        assert_eq!(nearest.zone.id, "s150");
        assert!((nearest.distance - 150.0).abs() < 1e-6);
    }

    #[test]
    fn test_nearest_safe_zone_present_iff_safe_zones_exist() {
        let p = origin();
        let danger = vec![Zone::new_danger("d", p.offset_north(100.0), 50.0, Severity::Low)];
        let safe = vec![Zone::new_safe("s", p.offset_north(10_000.0), 50.0)];
        let points = [
            p,
            p.offset_north(100.0),
            p.offset_north(10_000.0),
            Coordinates::new(45.0, 45.0),
        ];

        for point in &points {
            assert!(classify(point, &danger, &safe).nearest_safe_zone.is_some());
            assert!(classify(point, &danger, &[]).nearest_safe_zone.is_none());
        }
    }

    #[test]
    fn test_nan_point_is_clear() {
        let p = Coordinates::new(f64::NAN, f64::NAN);
        let danger = vec![Zone::new_danger("d", origin(), 1000.0, Severity::High)];
        let alert = classify(&p, &danger, &[]);
        assert_eq!(alert.kind, AlertType::Clear);
    }

    #[test]
    fn test_inputs_untouched() {
        let p = origin();
        let danger = vec![Zone::new_danger("d", p, 10.0, Severity::High)];
        let safe = vec![Zone::new_safe("s", p.offset_north(30.0), 10.0)];
        let (d0, s0) = (danger.clone(), safe.clone());

        classify(&p, &danger, &safe);
        assert_eq!(danger, d0);
        assert_eq!(safe, s0);
    }

    #[test]
    fn test_alert_json_shape() {
        let alert = classify(&origin(), &[], &[]);
        let value = serde_json::to_value(&alert).unwrap();
        assert_eq!(value["type"], "clear");
        assert!(value["nearestSafeZone"].is_null());
    }
}
