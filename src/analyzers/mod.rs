//! Aggregation and reporting over the cleaned trip set.
//!
//! This module groups cleaned trips by user type, calendar features,
//! station, and bike type, and packages the results for CSV/JSON output.

pub mod aggregate;
pub mod types;
pub mod utility;
