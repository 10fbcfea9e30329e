//! Elevation tool provider

use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone)]
pub struct ElevationRequest {
    pub origin: String,
    pub destination: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElevationResult {
    pub total_elevation_gain_m: f64,
    pub difficulty: String,
}

/// Heuristic elevation profile: mountainous endpoints are hard, the rest
/// moderate
pub struct ElevationProvider;

const MOUNTAIN_CITIES: [&str; 3] = ["bergen", "innsbruck", "geneva"];

impl ElevationProvider {
    /// Estimate total climb for a route; never fails
    pub async fn fetch(&self, request: &ElevationRequest) -> ElevationResult {
        debug!(origin = %request.origin, destination = %request.destination, "fetch: called");
        let mountainous = [&request.origin, &request.destination]
            .iter()
            .any(|city| MOUNTAIN_CITIES.contains(&city.trim().to_lowercase().as_str()));

        if mountainous {
            ElevationResult {
                total_elevation_gain_m: 5200.0,
                difficulty: "hard".to_string(),
            }
        } else {
            ElevationResult {
                total_elevation_gain_m: 1800.0,
                difficulty: "moderate".to_string(),
            }
        }
    }
}
