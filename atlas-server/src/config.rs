//! Zone file location and loading.

use anyhow::Context;
use atlas_core::ZoneSet;
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};

pub const ZONES_FILE_NAME: &str = "zones.json";

/// Platform config location of the zone file, e.g.
/// `~/.config/atlas-alert/zones.json` on Linux
pub fn default_zones_path() -> Option<PathBuf> {
    ProjectDirs::from("org", "Atlas-Alert", "atlas-alert")
        .map(|dirs| dirs.config_dir().join(ZONES_FILE_NAME))
}

/// Load the zone set named on the command line, or the default zone file.
///
/// An explicit path must exist. A missing default file starts the server
/// with no zones.
pub fn load_zones(path: Option<&Path>) -> anyhow::Result<ZoneSet> {
    if let Some(path) = path {
        return read_zone_file(path);
    }

    match default_zones_path() {
        Some(path) if path.exists() => read_zone_file(&path),
        Some(path) => {
            log::warn!("No zone file at {}, starting with no zones", path.display());
            Ok(ZoneSet::new())
        }
        None => {
            log::warn!("No config directory available, starting with no zones");
            Ok(ZoneSet::new())
        }
    }
}

pub fn read_zone_file(path: &Path) -> anyhow::Result<ZoneSet> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Unable to read zone file {}", path.display()))?;
    let zones = ZoneSet::from_json(&json)
        .with_context(|| format!("Invalid zone file {}", path.display()))?;

    log::info!(
        "Loaded {} danger and {} safe zones from {}",
        zones.danger.len(),
        zones.safe.len(),
        path.display()
    );
    Ok(zones)
}
