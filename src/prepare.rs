//! Trip enrichment and cleaning pipeline.
//!
//! Raw rows are enriched with duration, great-circle distance, and calendar
//! features, then filtered through an ordered set of validity rules. The
//! result is all-or-nothing: a malformed mandatory field anywhere in the
//! batch aborts the whole preparation, so partial output is never returned.

use chrono::{Datelike, NaiveDateTime, Timelike};
use serde::Serialize;
use tracing::info;

use crate::distance::haversine_km;
use crate::trips::{CleanTrip, OFF_NETWORK, RawTrip};

/// A mandatory field was absent or unparseable. Fatal for the whole batch.
///
/// Missing coordinates are not malformed input; they are handled by the
/// cleaning filter instead.
#[derive(Debug, thiserror::Error)]
#[error("row {line}: malformed {field}: {reason}")]
pub struct MalformedInput {
    pub line: usize,
    pub field: &'static str,
    pub reason: String,
}

/// Records removed at each cleaning stage, for diagnostics.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StageCounts {
    pub input: usize,
    pub missing_coordinate: usize,
    pub non_positive_duration: usize,
    pub false_start: usize,
    pub duration_out_of_range: usize,
    pub retained: usize,
}

/// Output of a successful preparation run.
#[derive(Debug)]
pub struct Prepared {
    pub trips: Vec<CleanTrip>,
    pub counts: StageCounts,
}

// Divvy exports use space-separated local timestamps; the T-separated form
// shows up in re-exports. Fractional seconds are optional in both.
const TIMESTAMP_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

fn parse_timestamp(
    value: &str,
    field: &'static str,
    line: usize,
) -> Result<NaiveDateTime, MalformedInput> {
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .ok_or_else(|| MalformedInput {
            line,
            field,
            reason: format!("unparseable timestamp `{value}`"),
        })
}

fn require_nonempty(
    value: &str,
    field: &'static str,
    line: usize,
) -> Result<(), MalformedInput> {
    if value.is_empty() {
        return Err(MalformedInput {
            line,
            field,
            reason: "field is empty".to_string(),
        });
    }
    Ok(())
}

/// Enriches and cleans a batch of raw trips.
///
/// Each row passes through the stages in order, each operating on the
/// survivors of the prior one:
///
/// 1. missing station name/id fields are filled with [`OFF_NETWORK`]
/// 2. rows missing a coordinate are dropped (distance cannot be computed)
/// 3. rows with non-positive duration are dropped (clock skew or data error)
/// 4. rows with zero distance and duration <= 3 min are dropped (the bike
///    was undocked and immediately redocked: a false start, not a ride)
/// 5. only durations in [1, 1440] minutes are kept; shorter is noise,
///    longer is an abandoned or lost bike
///
/// The input is not mutated and ride ids are carried through as-is; no
/// dedup or merge happens here.
///
/// # Errors
///
/// [`MalformedInput`] if any row has an empty or unparseable mandatory
/// field (`ride_id`, `started_at`, `ended_at`, `member_casual`). The error
/// names the offending row and field and no records are returned.
pub fn prepare_trips(rows: &[RawTrip]) -> Result<Prepared, MalformedInput> {
    let mut counts = StageCounts {
        input: rows.len(),
        ..Default::default()
    };
    let mut trips = Vec::with_capacity(rows.len());

    for (i, row) in rows.iter().enumerate() {
        // CSV data rows start at line 2, after the header.
        let line = i + 2;

        require_nonempty(&row.ride_id, "ride_id", line)?;
        let started_at = parse_timestamp(&row.started_at, "started_at", line)?;
        let ended_at = parse_timestamp(&row.ended_at, "ended_at", line)?;
        if row.member_casual != "member" && row.member_casual != "casual" {
            return Err(MalformedInput {
                line,
                field: "member_casual",
                reason: format!(
                    "unknown user type `{}` (expected `member` or `casual`)",
                    row.member_casual
                ),
            });
        }

        // Stage 1: sentinel fill. Applies before any drop so that the
        // station fields of every surviving record are populated.
        let fill = |v: &Option<String>| {
            v.clone().unwrap_or_else(|| OFF_NETWORK.to_string())
        };
        let start_station_name = fill(&row.start_station_name);
        let start_station_id = fill(&row.start_station_id);
        let end_station_name = fill(&row.end_station_name);
        let end_station_id = fill(&row.end_station_id);

        // Stage 2: distance needs both endpoints.
        let (Some(start_lat), Some(start_lng), Some(end_lat), Some(end_lng)) =
            (row.start_lat, row.start_lng, row.end_lat, row.end_lng)
        else {
            counts.missing_coordinate += 1;
            continue;
        };

        let ride_length_minutes =
            (ended_at - started_at).num_milliseconds() as f64 / 60_000.0;

        // Stage 3: non-positive duration.
        if ride_length_minutes <= 0.0 {
            counts.non_positive_duration += 1;
            continue;
        }

        let ride_distance_km = haversine_km(start_lat, start_lng, end_lat, end_lng);

        // Stage 4: stationary false start.
        if ride_distance_km == 0.0 && ride_length_minutes <= 3.0 {
            counts.false_start += 1;
            continue;
        }

        // Stage 5: duration window for genuine trips.
        if !(1.0..=1440.0).contains(&ride_length_minutes) {
            counts.duration_out_of_range += 1;
            continue;
        }

        trips.push(CleanTrip {
            ride_id: row.ride_id.clone(),
            rideable_type: row.rideable_type.clone(),
            started_at,
            ended_at,
            start_station_name,
            start_station_id,
            end_station_name,
            end_station_id,
            start_lat,
            start_lng,
            end_lat,
            end_lng,
            member_casual: row.member_casual.clone(),
            ride_length_minutes,
            ride_distance_km,
            day_of_week: started_at.format("%A").to_string(),
            month: started_at.month(),
            hour_of_day: started_at.hour(),
        });
    }

    counts.retained = trips.len();
    info!(
        input = counts.input,
        missing_coordinate = counts.missing_coordinate,
        non_positive_duration = counts.non_positive_duration,
        false_start = counts.false_start,
        duration_out_of_range = counts.duration_out_of_range,
        retained = counts.retained,
        "Trip preparation complete"
    );

    Ok(Prepared { trips, counts })
}
