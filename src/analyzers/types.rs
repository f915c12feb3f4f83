//! Data types produced by the aggregation pass.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::prepare::StageCounts;

/// Descriptive duration statistics for one user type.
#[derive(Debug, Serialize)]
pub struct DurationStats {
    pub member_casual: String,
    pub rides: usize,
    pub mean_minutes: f64,
    pub median_minutes: f64,
    pub stddev_minutes: f64,
    pub max_minutes: f64,
}

/// Ride count for one (weekday, user type) pair.
#[derive(Debug, PartialEq, Serialize)]
pub struct DayCount {
    pub day_of_week: String,
    pub member_casual: String,
    pub rides: usize,
}

/// Ride count for one (month, user type) pair.
#[derive(Debug, PartialEq, Serialize)]
pub struct MonthCount {
    pub month: u32,
    pub member_casual: String,
    pub rides: usize,
}

/// Ride count for one (hour, user type) pair.
#[derive(Debug, PartialEq, Serialize)]
pub struct HourCount {
    pub hour_of_day: u32,
    pub member_casual: String,
    pub rides: usize,
}

/// Ride count for one (user type, start station) pair.
#[derive(Debug, PartialEq, Serialize)]
pub struct StationCount {
    pub member_casual: String,
    pub start_station_name: String,
    pub rides: usize,
}

/// Ride count for one (user type, rideable type) pair.
#[derive(Debug, PartialEq, Serialize)]
pub struct BikeTypeCount {
    pub member_casual: String,
    pub rideable_type: String,
    pub rides: usize,
}

/// Complete report bundle over one cleaned trip set.
#[derive(Debug, Serialize)]
pub struct TripReport {
    pub generated_at: DateTime<Utc>,
    pub cleaning: StageCounts,
    pub duration_stats: Vec<DurationStats>,
    pub rides_per_day: Vec<DayCount>,
    pub rides_per_month: Vec<MonthCount>,
    pub rides_per_hour: Vec<HourCount>,
    pub top_start_stations: Vec<StationCount>,
    pub bike_type_counts: Vec<BikeTypeCount>,
}
