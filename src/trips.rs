//! Trip record types for the bike-share log.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Sentinel written into station fields that were absent in the source data,
/// marking a ride that did not start or end at a fixed station.
pub const OFF_NETWORK: &str = "off-network";

/// A single row deserialized from the raw trip log CSV.
///
/// Timestamps stay as strings here; parsing them is the preparer's job so
/// that a bad value can be reported with its row number. Station fields and
/// coordinates may be empty in the source and deserialize to `None`.
#[derive(Debug, Clone, Deserialize)]
pub struct RawTrip {
    pub ride_id: String,
    pub rideable_type: String,
    pub started_at: String,
    pub ended_at: String,
    pub start_station_name: Option<String>,
    pub start_station_id: Option<String>,
    pub end_station_name: Option<String>,
    pub end_station_id: Option<String>,
    pub start_lat: Option<f64>,
    pub start_lng: Option<f64>,
    pub end_lat: Option<f64>,
    pub end_lng: Option<f64>,
    pub member_casual: String,
}

/// A trip that survived cleaning, enriched with derived ride metrics.
#[derive(Debug, Clone, Serialize)]
pub struct CleanTrip {
    pub ride_id: String,
    pub rideable_type: String,
    pub started_at: NaiveDateTime,
    pub ended_at: NaiveDateTime,
    pub start_station_name: String,
    pub start_station_id: String,
    pub end_station_name: String,
    pub end_station_id: String,
    pub start_lat: f64,
    pub start_lng: f64,
    pub end_lat: f64,
    pub end_lng: f64,
    pub member_casual: String,

    // derived features
    pub ride_length_minutes: f64,
    pub ride_distance_km: f64,
    pub day_of_week: String,
    pub month: u32,
    pub hour_of_day: u32,
}
