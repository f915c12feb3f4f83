//! CSV ingestion for raw trip logs.

use anyhow::{Context, Result};
use std::fs::File;
use std::path::Path;
use tracing::debug;

use crate::trips::RawTrip;

/// Reads an entire trip log CSV into memory.
///
/// Columns are matched by header name, so extra columns (such as a leftover
/// index column from an earlier export) are ignored. Empty optional fields
/// deserialize to `None`.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or a row cannot be
/// deserialized against the expected headers.
pub fn load_trips(path: &Path) -> Result<Vec<RawTrip>> {
    let file =
        File::open(path).with_context(|| format!("opening trip log {}", path.display()))?;
    let mut rdr = csv::Reader::from_reader(file);

    let mut rows = Vec::new();
    for result in rdr.deserialize() {
        let record: RawTrip = result?;
        rows.push(record);
    }

    debug!(path = %path.display(), rows = rows.len(), "Trip log loaded");
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::fs;

    const HEADER: &str = "ride_id,rideable_type,started_at,ended_at,start_station_name,start_station_id,end_station_name,end_station_id,start_lat,start_lng,end_lat,end_lng,member_casual";

    fn write_temp_csv(name: &str, body: &str) -> std::path::PathBuf {
        let path = env::temp_dir().join(name);
        fs::write(&path, format!("{HEADER}\n{body}\n")).unwrap();
        path
    }

    #[test]
    fn test_load_full_row() {
        let path = write_temp_csv(
            "bikeshare_parser_full.csv",
            "R1,classic_bike,2023-05-01 08:15:00,2023-05-01 08:45:00,Clark St,S1,Wells St,S2,41.88,-87.63,41.89,-87.64,member",
        );

        let rows = load_trips(&path).unwrap();
        assert_eq!(rows.len(), 1);
        let r = &rows[0];
        assert_eq!(r.ride_id, "R1");
        assert_eq!(r.start_station_name.as_deref(), Some("Clark St"));
        assert_eq!(r.end_lat, Some(41.89));
        assert_eq!(r.member_casual, "member");

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_empty_fields_become_none() {
        let path = write_temp_csv(
            "bikeshare_parser_empty.csv",
            "R2,electric_bike,2023-05-01 08:15:00,2023-05-01 08:45:00,,,,,41.88,-87.63,,,casual",
        );

        let rows = load_trips(&path).unwrap();
        let r = &rows[0];
        assert!(r.start_station_name.is_none());
        assert!(r.end_station_id.is_none());
        assert!(r.end_lat.is_none());
        assert!(r.end_lng.is_none());

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let result = load_trips(Path::new("/nonexistent/trips.csv"));
        assert!(result.is_err());
    }
}
