//! Snapshot persistence
//!
//! Saved snapshots let the dashboard be re-rendered offline, exactly as it
//! looked when the snapshot was fetched.

use std::path::{Path, PathBuf};

use crate::types::{MetricSnapshot, SnapshotError};

/// File name for a snapshot: range and fetch time
pub fn snapshot_file_name(snapshot: &MetricSnapshot) -> String {
    format!(
        "snapshot_{}d_{}.json",
        snapshot.range_days,
        snapshot.fetched_at.format("%Y%m%d_%H%M%S")
    )
}

/// Save snapshot to a JSON file in `dir`, returning its path
pub fn save_snapshot(snapshot: &MetricSnapshot, dir: impl AsRef<Path>) -> Result<PathBuf, SnapshotError> {
    let dir = dir.as_ref();
    let json = serde_json::to_string_pretty(snapshot)?;
    std::fs::create_dir_all(dir)?;

    let path = dir.join(snapshot_file_name(snapshot));
    std::fs::write(&path, json)?;
    tracing::info!(path = %path.display(), "snapshot saved");
    Ok(path)
}

/// Load snapshot from a JSON file
pub fn load_snapshot(path: impl AsRef<Path>) -> Result<MetricSnapshot, SnapshotError> {
    let json = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&json)?)
}

// =============================================================================
// TESTS
// =============================================================================
