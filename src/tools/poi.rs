//! Points-of-interest tool provider

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::title_case;

#[derive(Debug, Clone)]
pub struct PoiRequest {
    pub location: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoiResult {
    pub location: String,
    pub name: String,
    pub description: String,
}

/// Fixed sightseeing suggestions for any stop
pub struct PoiProvider;

impl PoiProvider {
    /// Returns a non-empty list of highlights; never fails
    pub async fn fetch(&self, request: &PoiRequest) -> Vec<PoiResult> {
        debug!(location = %request.location, "fetch: called");
        let location = title_case(&request.location);
        vec![
            PoiResult {
                location: location.clone(),
                name: "Old Town".to_string(),
                description: "Historic center great for a rest stop".to_string(),
            },
            PoiResult {
                location,
                name: "Local Market".to_string(),
                description: "Good for refueling snacks".to_string(),
            },
        ]
    }
}
