//! Output formatting and persistence for cleaned trips and reports.
//!
//! Supports CSV tables and pretty-printed JSON.

use anyhow::Result;
use serde::Serialize;
use tracing::debug;

use std::fs::File;
use std::path::Path;

use csv::Writer;

/// Writes a slice of serializable rows as a CSV file with a header row.
///
/// Overwrites any existing file at `path`.
pub fn write_csv<T: Serialize>(path: &Path, rows: &[T]) -> Result<()> {
    debug!(path = %path.display(), rows = rows.len(), "Writing CSV");

    let file = File::create(path)?;
    let mut writer = Writer::from_writer(file);

    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;

    Ok(())
}

/// Writes a serializable value as pretty-printed JSON.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    debug!(path = %path.display(), "Writing JSON");

    let json = serde_json::to_string_pretty(value)?;
    std::fs::write(path, json)?;

    Ok(())
}
