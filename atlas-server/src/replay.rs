//! Offline track replay
//!
//! Feeds a recorded track through one alert session, exactly as live
//! location updates would be, and hands every notification to the notifier.
//!
//! Track files are JSON lines, one position per line:
//!
//! ```text
//! {"lat": 19.0, "lng": 72.82}
//! {"lat": 19.001, "lng": 72.82, "timestamp": "2024-07-01T12:00:05Z"}
//! ```
//!
//! Blank lines and lines starting with `#` are skipped. Samples without a
//! timestamp are stamped with the time they are replayed.

use anyhow::Context;
use atlas_core::{AlertSession, AlertType, Coordinates, ZoneSet};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::notify::Notifier;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TrackSample {
    #[serde(flatten)]
    pub position: Coordinates,
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReplaySummary {
    pub samples: usize,
    pub notifications: usize,
    pub last_alert: Option<AlertType>,
}

pub fn read_track<R: BufRead>(reader: R) -> anyhow::Result<Vec<TrackSample>> {
    let mut samples = Vec::new();

    for (index, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("line {}: read failed", index + 1))?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let sample: TrackSample = serde_json::from_str(line)
            .with_context(|| format!("line {}: invalid track sample", index + 1))?;
        if !sample.position.is_valid() {
            anyhow::bail!(
                "line {}: position {}, {} is outside the valid latitude/longitude range",
                index + 1,
                sample.position.lat,
                sample.position.lng
            );
        }
        samples.push(sample);
    }
    Ok(samples)
}

pub fn replay(track: &[TrackSample], zones: &ZoneSet, notifier: &dyn Notifier) -> ReplaySummary {
    let mut session = AlertSession::new();
    let mut summary = ReplaySummary::default();

    for sample in track {
        let now = sample.timestamp.unwrap_or_else(Utc::now);
        let update = session.update_at(&sample.position, &zones.danger, &zones.safe, now);

        if let Some(notification) = &update.notification {
            notifier.notify(notification);
            summary.notifications += 1;
        }
        summary.samples += 1;
        summary.last_alert = Some(update.alert.kind);
    }

    summary
}

pub fn replay_file(
    path: &Path,
    zones: &ZoneSet,
    notifier: &dyn Notifier,
) -> anyhow::Result<ReplaySummary> {
    let file = File::open(path)
        .with_context(|| format!("Unable to open track file {}", path.display()))?;
    let track = read_track(BufReader::new(file))
        .with_context(|| format!("Invalid track file {}", path.display()))?;

    log::info!("Replaying {} samples from {}", track.len(), path.display());
    Ok(replay(&track, zones, notifier))
}
