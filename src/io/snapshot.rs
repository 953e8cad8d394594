//! Read/write the snapshot JSON.
//!
//! The snapshot is the only persisted artifact. Each write replaces the
//! previous file entirely; the dashboard reads it as a static asset.
//!
//! The schema is defined by `domain::Snapshot`.

use std::fs::{File, create_dir_all};
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::info;

use crate::domain::Snapshot;
use crate::error::AppError;

/// Write `snapshot` to `path`, creating parent directories as needed.
pub fn write_snapshot_json(path: &Path, snapshot: &Snapshot) -> Result<(), AppError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        create_dir_all(parent).map_err(|e| {
            AppError::new(2, format!("Failed to create output directory '{}': {e}", parent.display()))
        })?;
    }

    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create snapshot '{}': {e}", path.display())))?;
    let mut writer = BufWriter::new(file);

    serde_json::to_writer_pretty(&mut writer, snapshot)
        .map_err(|e| AppError::new(2, format!("Failed to write snapshot JSON: {e}")))?;
    writeln!(writer)
        .and_then(|_| writer.flush())
        .map_err(|e| AppError::new(2, format!("Failed to write snapshot JSON: {e}")))?;

    info!(path = %path.display(), "snapshot written");
    Ok(())
}

/// Read a snapshot previously written by `write_snapshot_json`.
pub fn read_snapshot_json(path: &Path) -> Result<Snapshot, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open snapshot '{}': {e}", path.display())))?;
    let snapshot: Snapshot = serde_json::from_reader(std::io::BufReader::new(file))
        .map_err(|e| AppError::new(2, format!("Invalid snapshot JSON: {e}")))?;
    Ok(snapshot)
}
