//! Routing tool provider
//!
//! Tries a live OpenRouteService-compatible API when a credential is
//! configured; any live failure falls back to the static route table so the
//! caller always receives a usable route.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use super::title_case;
use crate::config::RoutingConfig;

/// Distance between synthesized waypoints on live routes, in km
const SYNTH_WAYPOINT_STEP_KM: f64 = 100.0;

#[derive(Debug, Clone)]
pub struct RouteRequest {
    pub origin: String,
    pub destination: String,
    pub preferred_daily_km: Option<f64>,
}

/// A named point along a route with a known distance from the start
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Waypoint {
    pub name: String,
    pub distance_from_start_km: f64,
}

/// A computed route
///
/// Waypoints are ordered by ascending distance from the start and the last
/// waypoint sits exactly at the total distance; the itinerary builder
/// depends on this.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteResult {
    pub origin: String,
    pub destination: String,
    pub total_distance_km: f64,
    pub estimated_days: u32,
    pub waypoints: Vec<Waypoint>,
}

/// Internal live-path errors; never surfaced past the provider
#[derive(Debug, Error)]
enum RouteError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Geocoding failed for '{0}'")]
    Geocode(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Routing provider with optional live path
pub struct RouteProvider {
    live: Option<LiveRouting>,
}

impl RouteProvider {
    /// Enable the live path if the configured API key is present
    pub fn new(config: &RoutingConfig) -> Self {
        let live = config.get_api_key().and_then(|api_key| {
            let http = Client::builder()
                .timeout(Duration::from_millis(config.timeout_ms))
                .build()
                .ok()?;
            debug!(base_url = %config.base_url, "RouteProvider::new: live routing enabled");
            Some(LiveRouting {
                http,
                api_key,
                base_url: config.base_url.clone(),
            })
        });

        if live.is_none() {
            debug!("RouteProvider::new: no routing credential, static routes only");
        }

        Self { live }
    }

    /// Static routes only
    pub fn offline() -> Self {
        Self { live: None }
    }

    /// Compute a route; never fails
    pub async fn fetch(&self, request: &RouteRequest) -> RouteResult {
        debug!(origin = %request.origin, destination = %request.destination, "fetch: called");
        if let Some(live) = &self.live {
            match live.fetch(request).await {
                Ok(route) => return route,
                Err(e) => {
                    warn!(error = %e, "fetch: live routing failed, using static fallback");
                }
            }
        }
        static_route(request)
    }
}

/// estimated_days = floor(total / preferred daily), minimum 1
fn estimated_days(total_km: f64, preferred_daily_km: Option<f64>) -> u32 {
    let daily = preferred_daily_km.filter(|km| *km > 0.0).unwrap_or(100.0);
    ((total_km / daily) as u32).max(1)
}

fn static_route(request: &RouteRequest) -> RouteResult {
    let key = (
        request.origin.trim().to_lowercase(),
        request.destination.trim().to_lowercase(),
    );

    if key == ("amsterdam".to_string(), "copenhagen".to_string()) {
        debug!("static_route: known route amsterdam -> copenhagen");
        return amsterdam_copenhagen();
    }

    // Generic fallback: 600km with evenly spaced waypoints
    debug!("static_route: unknown route, synthesizing 600km fallback");
    let total_distance = 600.0;
    let mut waypoints: Vec<Waypoint> = (1..6)
        .map(|i| Waypoint {
            name: format!("Waypoint {i}"),
            distance_from_start_km: i as f64 * 100.0,
        })
        .collect();
    waypoints.push(Waypoint {
        name: title_case(&request.destination),
        distance_from_start_km: total_distance,
    });

    RouteResult {
        origin: title_case(&request.origin),
        destination: title_case(&request.destination),
        total_distance_km: total_distance,
        estimated_days: estimated_days(total_distance, request.preferred_daily_km),
        waypoints,
    }
}

fn amsterdam_copenhagen() -> RouteResult {
    let stops = [
        ("Almere", 30.0),
        ("Lelystad", 55.0),
        ("Zwolle", 120.0),
        ("Meppel", 140.0),
        ("Groningen", 185.0),
        ("Leer", 225.0),
        ("Oldenburg", 310.0),
        ("Bremen", 380.0),
        ("Hamburg", 480.0),
        ("Lubeck", 575.0),
        ("Puttgarden", 670.0),
        ("Rodby", 715.0),
        ("Copenhagen", 780.0),
    ];

    RouteResult {
        origin: "Amsterdam".to_string(),
        destination: "Copenhagen".to_string(),
        total_distance_km: 780.0,
        estimated_days: 8,
        waypoints: stops
            .iter()
            .map(|(name, km)| Waypoint {
                name: name.to_string(),
                distance_from_start_km: *km,
            })
            .collect(),
    }
}

/// Live OpenRouteService-compatible client
struct LiveRouting {
    http: Client,
    api_key: String,
    base_url: String,
}

impl LiveRouting {
    async fn fetch(&self, request: &RouteRequest) -> Result<RouteResult, RouteError> {
        let origin = self.geocode(&request.origin).await?;
        let destination = self.geocode(&request.destination).await?;
        let meters = self.directions(origin, destination).await?;
        let total_km = (meters / 1000.0 * 10.0).round() / 10.0;

        // The directions API returns geometry, not named stops; synthesize
        // evenly spaced waypoints the itinerary builder can snap to
        let mut waypoints = Vec::new();
        let mut km = SYNTH_WAYPOINT_STEP_KM;
        let mut index = 1;
        while km < total_km {
            waypoints.push(Waypoint {
                name: format!("Waypoint {index}"),
                distance_from_start_km: km,
            });
            km += SYNTH_WAYPOINT_STEP_KM;
            index += 1;
        }
        waypoints.push(Waypoint {
            name: title_case(&request.destination),
            distance_from_start_km: total_km,
        });

        debug!(total_km, waypoint_count = waypoints.len(), "fetch: live route computed");
        Ok(RouteResult {
            origin: title_case(&request.origin),
            destination: title_case(&request.destination),
            total_distance_km: total_km,
            estimated_days: estimated_days(total_km, request.preferred_daily_km),
            waypoints,
        })
    }

    /// Resolve a place name to (lon, lat)
    async fn geocode(&self, place: &str) -> Result<(f64, f64), RouteError> {
        debug!(%place, "geocode: called");
        let url = format!("{}/geocode/search", self.base_url);
        let response = self
            .http
            .get(url)
            .query(&[("api_key", self.api_key.as_str()), ("text", place), ("size", "1")])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(RouteError::Geocode(place.to_string()));
        }

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| RouteError::InvalidResponse(e.to_string()))?;

        let coords = body["features"][0]["geometry"]["coordinates"]
            .as_array()
            .ok_or_else(|| RouteError::Geocode(place.to_string()))?;

        match (coords.first().and_then(|v| v.as_f64()), coords.get(1).and_then(|v| v.as_f64())) {
            (Some(lon), Some(lat)) => Ok((lon, lat)),
            _ => Err(RouteError::Geocode(place.to_string())),
        }
    }

    /// Cycling directions distance in meters between two coordinates
    async fn directions(&self, from: (f64, f64), to: (f64, f64)) -> Result<f64, RouteError> {
        debug!(?from, ?to, "directions: called");
        let url = format!("{}/v2/directions/cycling-regular", self.base_url);
        let body = serde_json::json!({
            "coordinates": [[from.0, from.1], [to.0, to.1]],
        });

        let response = self
            .http
            .post(url)
            .header("Authorization", self.api_key.clone())
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(RouteError::InvalidResponse(format!("directions returned {status}")));
        }

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| RouteError::InvalidResponse(e.to_string()))?;

        body["routes"][0]["summary"]["distance"]
            .as_f64()
            .ok_or_else(|| RouteError::InvalidResponse("missing routes[0].summary.distance".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(origin: &str, destination: &str) -> RouteRequest {
        RouteRequest {
            origin: origin.to_string(),
            destination: destination.to_string(),
            preferred_daily_km: None,
        }
    }

    #[tokio::test]
    async fn test_known_route_amsterdam_copenhagen() {
        let provider = RouteProvider::offline();
        let route = provider.fetch(&request("Amsterdam", "Copenhagen")).await;

        assert_eq!(route.total_distance_km, 780.0);
        assert_eq!(route.estimated_days, 8);
        assert_eq!(route.waypoints.len(), 13);
        assert_eq!(route.waypoints.last().unwrap().name, "Copenhagen");
        assert_eq!(route.waypoints.last().unwrap().distance_from_start_km, 780.0);
    }

    #[tokio::test]
    async fn test_known_route_is_case_insensitive() {
        let provider = RouteProvider::offline();
        let route = provider.fetch(&request("  amsterdam ", "COPENHAGEN")).await;
        assert_eq!(route.total_distance_km, 780.0);
    }

    #[tokio::test]
    async fn test_unknown_route_synthesizes_fallback() {
        let provider = RouteProvider::offline();
        let route = provider.fetch(&request("lisbon", "porto")).await;

        assert_eq!(route.origin, "Lisbon");
        assert_eq!(route.destination, "Porto");
        assert_eq!(route.total_distance_km, 600.0);
        assert_eq!(route.waypoints.len(), 6);
        assert_eq!(route.waypoints.last().unwrap().name, "Porto");
        assert_eq!(route.waypoints.last().unwrap().distance_from_start_km, 600.0);
    }

    #[tokio::test]
    async fn test_waypoints_ascend_and_end_at_total() {
        let provider = RouteProvider::offline();
        for (o, d) in [("Amsterdam", "Copenhagen"), ("lisbon", "porto")] {
            let route = provider.fetch(&request(o, d)).await;
            let mut prev = 0.0;
            for wp in &route.waypoints {
                assert!(wp.distance_from_start_km >= prev, "waypoints must not decrease");
                prev = wp.distance_from_start_km;
            }
            assert_eq!(prev, route.total_distance_km);
        }
    }

    #[test]
    fn test_estimated_days_floors_with_minimum_one() {
        assert_eq!(estimated_days(600.0, Some(100.0)), 6);
        assert_eq!(estimated_days(600.0, Some(250.0)), 2);
        assert_eq!(estimated_days(50.0, Some(100.0)), 1);
        // Default daily distance when unspecified or invalid
        assert_eq!(estimated_days(600.0, None), 6);
        assert_eq!(estimated_days(600.0, Some(0.0)), 6);
        assert_eq!(estimated_days(600.0, Some(-5.0)), 6);
    }
}
