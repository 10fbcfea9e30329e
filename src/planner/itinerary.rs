//! Day-by-day itinerary construction
//!
//! Splits a route into days by greedy distance accumulation: each day targets
//! the preferred daily distance and snaps its end to the named waypoint
//! closest to that target. Lodging, weather and terrain summaries, and POI
//! notes are attached per day from the toolbox.

use thiserror::Error;
use tracing::debug;

use crate::domain::DayPlan;
use crate::tools::{
    AccommodationMix, AccommodationRequest, ElevationResult, PoiRequest, RouteResult, Toolbox,
    WeatherResult,
};

#[derive(Debug, Error)]
pub enum PlanError {
    #[error("daily distance must be positive, got {0}")]
    NonPositiveDailyDistance(f64),
    #[error("route has no waypoints to split into days")]
    EmptyRoute,
}

/// A complete day split plus the lodging mix it implies
#[derive(Debug)]
pub struct Itinerary {
    pub days: Vec<DayPlan>,
    pub mix: AccommodationMix,
}

/// Index of the waypoint whose distance is closest to `target_km`.
///
/// Ties go to the earlier waypoint: the comparison is strict, so a later
/// waypoint only wins by being genuinely closer.
fn closest_waypoint(route: &RouteResult, target_km: f64) -> usize {
    let mut best = 0;
    let mut best_gap = f64::INFINITY;
    for (i, wp) in route.waypoints.iter().enumerate() {
        let gap = (wp.distance_from_start_km - target_km).abs();
        if gap < best_gap {
            best_gap = gap;
            best = i;
        }
    }
    best
}

pub async fn build_itinerary(
    toolbox: &Toolbox,
    route: &RouteResult,
    daily_km: f64,
    accommodation_pref: &str,
    hostel_every: Option<u32>,
    weather: &WeatherResult,
    elevation: &ElevationResult,
) -> Result<Itinerary, PlanError> {
    debug!(
        total_km = route.total_distance_km,
        daily_km,
        accommodation_pref,
        ?hostel_every,
        "build_itinerary: called"
    );
    if daily_km <= 0.0 {
        return Err(PlanError::NonPositiveDailyDistance(daily_km));
    }
    if route.waypoints.is_empty() {
        return Err(PlanError::EmptyRoute);
    }

    let weather_summary = format!("{:.0}C avg, {}", weather.avg_temp_c, weather.notes);
    let elevation_summary = format!(
        "{:.0}m gain over trip, {}",
        elevation.total_elevation_gain_m, elevation.difficulty
    );

    let mut days: Vec<DayPlan> = Vec::new();
    let mut done_km = 0.0;
    let mut day = 0u32;
    let mut camping_nights = 0u32;
    let mut hostel_nights = 0u32;
    let mut hotel_nights = 0u32;

    while done_km < route.total_distance_km {
        day += 1;
        let target = (done_km + daily_km).min(route.total_distance_km);

        let end_name = route.waypoints[closest_waypoint(route, target)].name.clone();

        let start_name = match days.last() {
            Some(prev) => prev.end.clone(),
            None => route.origin.clone(),
        };

        let distance = target - done_km;
        done_km = target;

        let stay_type = match hostel_every {
            Some(n) if n > 0 && day % n == 0 => "hostel",
            _ => accommodation_pref,
        };
        match stay_type {
            "camping" => camping_nights += 1,
            "hostel" => hostel_nights += 1,
            _ => hotel_nights += 1,
        }

        let options = toolbox
            .accommodation
            .fetch(&AccommodationRequest {
                location: end_name.clone(),
                preference: stay_type.to_string(),
            })
            .await;
        let accommodation = match options.first() {
            Some(opt) => format!("{} ({})", opt.name, opt.kind),
            None => stay_type.to_string(),
        };

        let pois = toolbox.poi.fetch(&PoiRequest { location: end_name.clone() }).await;
        let notes = if pois.is_empty() {
            None
        } else {
            let names: Vec<&str> = pois.iter().map(|p| p.name.as_str()).collect();
            Some(format!("POIs: {}", names.join(", ")))
        };

        days.push(DayPlan {
            day,
            start: start_name,
            end: end_name,
            distance_km: (distance * 10.0).round() / 10.0,
            accommodation,
            weather: weather_summary.clone(),
            elevation: elevation_summary.clone(),
            notes,
        });
    }

    debug!(day_count = days.len(), "build_itinerary: day split complete");
    Ok(Itinerary {
        days,
        mix: AccommodationMix::from_counts(camping_nights, hostel_nights, hotel_nights),
    })
}
