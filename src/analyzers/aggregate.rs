//! Group-by aggregation over the cleaned trip set.
//!
//! Everything here is read-only reporting: counts and descriptive statistics
//! segmented by user type, weekday, month, hour, station, and bike type.

use std::collections::{BTreeMap, BTreeSet};

use chrono::Utc;

use crate::analyzers::types::{
    BikeTypeCount, DayCount, DurationStats, HourCount, MonthCount, StationCount, TripReport,
};
use crate::analyzers::utility::{mean, median, stddev};
use crate::prepare::StageCounts;
use crate::trips::{CleanTrip, OFF_NETWORK};

/// Weekday ordering used for the per-day breakdown.
pub static DAY_ORDER: &[&str] = &[
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// How many stations the per-user-type station ranking keeps.
const TOP_STATIONS: usize = 10;

fn user_types(trips: &[CleanTrip]) -> BTreeSet<&str> {
    trips.iter().map(|t| t.member_casual.as_str()).collect()
}

/// Mean, median, standard deviation, and max ride duration per user type.
pub fn duration_stats(trips: &[CleanTrip]) -> Vec<DurationStats> {
    user_types(trips)
        .into_iter()
        .map(|user_type| {
            let durations: Vec<f64> = trips
                .iter()
                .filter(|t| t.member_casual == user_type)
                .map(|t| t.ride_length_minutes)
                .collect();

            let avg = mean(&durations);
            DurationStats {
                member_casual: user_type.to_string(),
                rides: durations.len(),
                mean_minutes: avg,
                median_minutes: median(&durations),
                stddev_minutes: stddev(&durations, avg),
                max_minutes: durations.iter().copied().fold(0.0, f64::max),
            }
        })
        .collect()
}

/// Ride counts by weekday and user type, in Monday-to-Sunday order.
///
/// Every (weekday, user type) pair present in the set's user types is
/// emitted, including zero-count days, so downstream tables stay rectangular.
pub fn rides_per_day(trips: &[CleanTrip]) -> Vec<DayCount> {
    let mut counts: BTreeMap<(&str, &str), usize> = BTreeMap::new();
    for t in trips {
        *counts
            .entry((t.day_of_week.as_str(), t.member_casual.as_str()))
            .or_default() += 1;
    }

    let mut out = Vec::new();
    for &day in DAY_ORDER {
        for user_type in user_types(trips) {
            out.push(DayCount {
                day_of_week: day.to_string(),
                member_casual: user_type.to_string(),
                rides: counts.get(&(day, user_type)).copied().unwrap_or(0),
            });
        }
    }
    out
}

/// Ride counts by calendar month (1-12) and user type, observed months only.
pub fn rides_per_month(trips: &[CleanTrip]) -> Vec<MonthCount> {
    let mut counts: BTreeMap<(u32, &str), usize> = BTreeMap::new();
    for t in trips {
        *counts
            .entry((t.month, t.member_casual.as_str()))
            .or_default() += 1;
    }

    counts
        .into_iter()
        .map(|((month, user_type), rides)| MonthCount {
            month,
            member_casual: user_type.to_string(),
            rides,
        })
        .collect()
}

/// Ride counts by hour of day (0-23) and user type, observed hours only.
pub fn rides_per_hour(trips: &[CleanTrip]) -> Vec<HourCount> {
    let mut counts: BTreeMap<(u32, &str), usize> = BTreeMap::new();
    for t in trips {
        *counts
            .entry((t.hour_of_day, t.member_casual.as_str()))
            .or_default() += 1;
    }

    counts
        .into_iter()
        .map(|((hour_of_day, user_type), rides)| HourCount {
            hour_of_day,
            member_casual: user_type.to_string(),
            rides,
        })
        .collect()
}

/// Top start stations per user type, busiest first.
///
/// The off-network sentinel is excluded: undocked rides say nothing about
/// any fixed station. Ties break alphabetically for a stable ordering.
pub fn top_start_stations(trips: &[CleanTrip], limit: usize) -> Vec<StationCount> {
    let mut out = Vec::new();

    for user_type in user_types(trips) {
        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for t in trips {
            if t.member_casual == user_type && t.start_station_name != OFF_NETWORK {
                *counts.entry(t.start_station_name.as_str()).or_default() += 1;
            }
        }

        let mut ranked: Vec<(&str, usize)> = counts.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));

        out.extend(ranked.into_iter().take(limit).map(|(station, rides)| {
            StationCount {
                member_casual: user_type.to_string(),
                start_station_name: station.to_string(),
                rides,
            }
        }));
    }

    out
}

/// Ride counts by user type and bike type.
pub fn bike_type_counts(trips: &[CleanTrip]) -> Vec<BikeTypeCount> {
    let mut counts: BTreeMap<(&str, &str), usize> = BTreeMap::new();
    for t in trips {
        *counts
            .entry((t.member_casual.as_str(), t.rideable_type.as_str()))
            .or_default() += 1;
    }

    counts
        .into_iter()
        .map(|((user_type, bike), rides)| BikeTypeCount {
            member_casual: user_type.to_string(),
            rideable_type: bike.to_string(),
            rides,
        })
        .collect()
}

/// Builds the full report bundle over one cleaned set.
pub fn build_report(trips: &[CleanTrip], cleaning: StageCounts) -> TripReport {
    TripReport {
        generated_at: Utc::now(),
        cleaning,
        duration_stats: duration_stats(trips),
        rides_per_day: rides_per_day(trips),
        rides_per_month: rides_per_month(trips),
        rides_per_hour: rides_per_hour(trips),
        top_start_stations: top_start_stations(trips, TOP_STATIONS),
        bike_type_counts: bike_type_counts(trips),
    }
}
