//! Day plan types

use serde::{Deserialize, Serialize};

/// One day's segment of an itinerary
///
/// Day indices are 1-based and contiguous; each day starts where the
/// previous one ended, and day 1 starts at the route origin.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayPlan {
    pub day: u32,
    pub start: String,
    pub end: String,
    pub distance_km: f64,
    pub accommodation: String,
    pub weather: String,
    pub elevation: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}
